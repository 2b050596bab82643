use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::core::logic::Core;
use crate::errors::AppResult;

/// Show today's board.
pub async fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { pin, json } = &cli.command {
        let mut workflow = Core::workflow(cfg, cli.today.as_deref())?;
        ListLogic::apply(&mut workflow, pin, *json).await?;
    }
    Ok(())
}
