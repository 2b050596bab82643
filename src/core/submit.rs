use crate::config::Config;
use crate::core::intervals::MAX_INTERVALS;
use crate::core::logic::Core;
use crate::core::workflow::{SubmissionWorkflow, SubmitReceipt, SyncOutcome};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::models::answer::Answer;
use crate::models::interval::{Interval, IntervalField};
use crate::models::response::Response;
use crate::ui::board;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::parse_interval_arg;

/// Everything `submit` takes from the command line.
pub struct SubmitInput {
    pub name: String,
    pub pin: String,
    pub answer: Option<Answer>,
    pub intervals: Vec<String>,
}

/// High-level business logic for the `submit` command.
pub struct SubmitLogic;

impl SubmitLogic {
    pub async fn apply(
        workflow: &mut SubmissionWorkflow,
        cfg: &Config,
        input: SubmitInput,
    ) -> AppResult<SubmitOutcome> {
        // parse everything before touching the form
        let intervals = Self::parse_intervals(&input.intervals)?;

        if !intervals.is_empty() && input.answer != Some(Answer::Yes) {
            warning("Free slots are only shown for a 'yes' answer.");
        }

        workflow.load().await;

        workflow.set_name(input.name);
        workflow.set_pin(input.pin);
        workflow.choose_answer(input.answer);
        Self::fill_intervals(workflow, &intervals)?;

        let receipt = workflow.submit()?;
        let response = receipt.response.clone();

        success(format!(
            "Answer saved for {} on {}.",
            response.name,
            response.day_str()
        ));

        let sync = Self::finish_sync(cfg, receipt).await;

        print!(
            "\n{}",
            board::render(workflow.board_day(), &workflow.board())
        );

        Ok(SubmitOutcome { response, sync })
    }

    /// Parse `--interval` values, keeping at most [`MAX_INTERVALS`].
    pub fn parse_intervals(raw: &[String]) -> AppResult<Vec<Interval>> {
        if raw.len() > MAX_INTERVALS {
            warning(format!(
                "At most {} free slots per answer, ignoring {} extra.",
                MAX_INTERVALS,
                raw.len() - MAX_INTERVALS
            ));
        }

        raw.iter()
            .take(MAX_INTERVALS)
            .map(|s| parse_interval_arg(s))
            .collect()
    }

    fn fill_intervals(workflow: &mut SubmissionWorkflow, intervals: &[Interval]) -> AppResult<()> {
        for (idx, interval) in intervals.iter().enumerate() {
            if idx > 0 && !workflow.add_interval() {
                break;
            }
            workflow.set_interval(idx, IntervalField::Start, interval.start.clone())?;
            workflow.set_interval(idx, IntervalField::End, interval.end.clone())?;
        }
        Ok(())
    }

    /// Give the background write a bounded chance to finish before the
    /// process exits, then record the submit in the audit log. A failed
    /// write is logged, never reported as a command failure.
    pub async fn finish_sync(cfg: &Config, receipt: SubmitReceipt) -> SyncOutcome {
        let response = receipt.response.clone();
        let outcome = receipt.settle(Core::sync_wait(cfg)).await;

        audit(
            &cfg.database,
            "submit",
            &response.name,
            &describe(&response),
        );

        match &outcome {
            SyncOutcome::LocalOnly => {
                info("No response store configured: the answer is kept for this session only.")
            }
            SyncOutcome::Persisted => {}
            SyncOutcome::Failed(reason) => {
                audit(&cfg.database, "sync_failed", &response.name, reason);
            }
            SyncOutcome::TimedOut => {
                audit(&cfg.database, "sync_failed", &response.name, "timed out");
            }
        }

        outcome
    }
}

pub struct SubmitOutcome {
    pub response: Response,
    pub sync: SyncOutcome,
}

fn describe(response: &Response) -> String {
    let answer = response
        .answer
        .map(|a| a.to_db_str())
        .unwrap_or("unset");
    let slots = response
        .intervals
        .iter()
        .map(|i| format!("{}-{}", i.start, i.end))
        .collect::<Vec<_>>()
        .join(",");
    format!("day={} answer={} slots=[{}]", response.day_str(), answer, slots)
}
