//! Interactive form: one command per line on stdin.

use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::core::workflow::{SubmissionWorkflow, SubmitReceipt, SyncOutcome};
use crate::errors::{AppError, AppResult};
use crate::models::answer::Answer;
use crate::models::interval::IntervalField;
use crate::ui::board;
use crate::ui::messages::{form_error, header, info, success, warning};
use crate::utils::time::normalize_time;
use std::io::{BufRead, IsTerminal, Write};

const HELP: &str = "\
Commands:
  name <your name>          set your name
  pin <PIN>                 set the shared PIN
  confirm                   confirm the PIN
  answer yes|no|unset       lunch today?
  add                       add a free slot (max 5)
  set <n> start|end [HH:MM] edit slot n (empty value clears it)
  form                      show the form
  show                      show today's answers
  submit                    save your answer
  quit                      leave";

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Help,
    Name(String),
    Pin(String),
    Confirm,
    Answer(Option<Answer>),
    Add,
    Set(usize, IntervalField, String),
    Form,
    Show,
    Submit,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_line(line: &str) -> Action {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd.to_lowercase().as_str() {
        "" => Action::Nothing,
        "help" | "?" => Action::Help,
        "name" => Action::Name(rest.to_string()),
        "pin" => Action::Pin(rest.to_string()),
        "confirm" => Action::Confirm,
        "answer" => match Answer::parse_input(rest) {
            Some(a) => Action::Answer(a),
            None => Action::Unknown(line.to_string()),
        },
        "add" => Action::Add,
        "set" => {
            let mut parts = rest.split_whitespace();
            let idx = parts.next().and_then(|n| n.parse::<usize>().ok());
            let field = parts.next().and_then(IntervalField::from_code);
            let value = parts.next().unwrap_or("").to_string();
            match (idx, field) {
                (Some(n), Some(f)) => Action::Set(n, f, value),
                _ => Action::Unknown(line.to_string()),
            }
        }
        "form" => Action::Form,
        "show" | "list" => Action::Show,
        "submit" | "save" => Action::Submit,
        "quit" | "exit" => Action::Quit,
        _ => Action::Unknown(line.to_string()),
    }
}

fn needs_pin(action: &Action) -> bool {
    matches!(
        action,
        Action::Answer(_) | Action::Add | Action::Set(..) | Action::Show
    )
}

pub struct SessionLogic;

impl SessionLogic {
    pub async fn run<R: BufRead>(
        workflow: &mut SubmissionWorkflow,
        cfg: &Config,
        input: R,
    ) -> AppResult<Vec<SyncOutcome>> {
        let interactive = std::io::stdin().is_terminal();

        workflow.load().await;

        header("Lunch today");
        info("Enter your name and the PIN, then 'confirm'. Type 'help' for commands.");

        let mut pending: Vec<SubmitReceipt> = Vec::new();
        let mut lines = input.lines();

        loop {
            if interactive {
                print!("> ");
                std::io::stdout().flush()?;
            }

            let Some(line) = lines.next() else { break };
            let action = parse_line(&line?);

            if needs_pin(&action) && !workflow.is_authorized() {
                form_error("Confirm the PIN first.");
                continue;
            }

            match action {
                Action::Nothing => {}
                Action::Help => println!("{HELP}"),
                Action::Name(name) => workflow.set_name(name),
                Action::Pin(pin) => workflow.set_pin(pin),
                Action::Confirm => match workflow.confirm_pin() {
                    Ok(()) => success("PIN confirmed."),
                    Err(e) => form_error(e),
                },
                Action::Answer(answer) => workflow.choose_answer(answer),
                Action::Add => {
                    if !workflow.add_interval() {
                        warning("Already at the maximum number of slots.");
                    }
                }
                Action::Set(n, field, value) => {
                    if let Err(e) = Self::set_slot(workflow, n, field, &value) {
                        form_error(e);
                    }
                }
                Action::Form => Self::print_form(workflow),
                Action::Show => Self::print_board(workflow),
                Action::Submit => match workflow.submit() {
                    Ok(receipt) => {
                        success(format!("Answer saved for {}.", receipt.response.name));
                        pending.push(receipt);
                        Self::print_board(workflow);
                    }
                    Err(e) => form_error(e),
                },
                Action::Quit => break,
                Action::Unknown(line) => warning(format!("Unknown command: {line}")),
            }
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        for receipt in pending {
            outcomes.push(SubmitLogic::finish_sync(cfg, receipt).await);
        }

        Ok(outcomes)
    }

    /// `n` is 1-based as shown by `form`.
    fn set_slot(
        workflow: &mut SubmissionWorkflow,
        n: usize,
        field: IntervalField,
        value: &str,
    ) -> AppResult<()> {
        let idx = n.checked_sub(1).ok_or(AppError::InvalidInterval(n))?;
        let value = normalize_time(value)?;
        workflow
            .set_interval(idx, field, value)
            .map_err(|e| match e {
                AppError::InvalidInterval(_) => AppError::InvalidInterval(n),
                other => other,
            })
    }

    fn print_form(workflow: &SubmissionWorkflow) {
        let form = workflow.form();
        let answer = form.answer.map(|a| a.to_db_str()).unwrap_or("unset");

        println!("name   : {}", form.name);
        println!("pin    : {}", "*".repeat(form.pin.chars().count()));
        println!("answer : {}", answer);
        if form.answer == Some(Answer::Yes) {
            for (i, slot) in form.intervals.entries().iter().enumerate() {
                println!("slot {} : {} - {}", i + 1, slot.start, slot.end);
            }
        }
        if !form.error.is_empty() {
            form_error(&form.error);
        }
    }

    fn print_board(workflow: &SubmissionWorkflow) {
        print!(
            "{}",
            board::render(workflow.board_day(), &workflow.board())
        );
    }
}
