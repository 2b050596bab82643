use crate::config::StoreBackend;
use crate::models::answer::Answer;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rLunchPoll
/// CLI application for the daily team lunch poll
#[derive(Parser)]
#[command(
    name = "rlunchpoll",
    version = env!("CARGO_PKG_VERSION"),
    about = "Team lunch poll: answer yes/no for today, add your free slots, see who's in",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the response store backend
    #[arg(global = true, long = "store", value_enum)]
    pub store: Option<StoreBackend>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration (secrets masked)")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show today's answers
    List {
        #[arg(long = "pin", help = "Shared PIN")]
        pin: String,

        #[arg(long = "json", help = "Print the board as JSON")]
        json: bool,
    },

    /// Submit (or replace) your answer for today
    Submit {
        #[arg(long = "name", help = "Your name")]
        name: String,

        #[arg(long = "pin", help = "Shared PIN")]
        pin: String,

        #[arg(long = "answer", value_enum, help = "yes or no (omit to leave unset)")]
        answer: Option<Answer>,

        /// Free slot as HH:MM-HH:MM; repeat up to 5 times
        #[arg(
            long = "interval",
            short = 'i',
            value_name = "HH:MM-HH:MM",
            help = "Free slot (HH:MM-HH:MM), repeatable up to 5 times"
        )]
        intervals: Vec<String>,
    },

    /// Interactive form on stdin
    Session,

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
