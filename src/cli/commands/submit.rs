use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::logic::Core;
use crate::core::submit::{SubmitInput, SubmitLogic};
use crate::errors::AppResult;

/// Submit or replace today's answer.
pub async fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        name,
        pin,
        answer,
        intervals,
    } = &cli.command
    {
        let mut workflow = Core::workflow(cfg, cli.today.as_deref())?;

        let input = SubmitInput {
            name: name.clone(),
            pin: pin.clone(),
            answer: *answer,
            intervals: intervals.clone(),
        };

        SubmitLogic::apply(&mut workflow, cfg, input).await?;
    }
    Ok(())
}
