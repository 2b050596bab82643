use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::logic::Core;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use std::io;

/// Run the interactive form on stdin.
pub async fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut workflow = Core::workflow(cfg, cli.today.as_deref())?;
    let stdin = io::stdin();
    SessionLogic::run(&mut workflow, cfg, stdin.lock()).await?;
    Ok(())
}
