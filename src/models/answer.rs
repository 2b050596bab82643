use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            _ => None,
        }
    }

    /// Parse user input. `Ok(None)` means "unset".
    pub fn parse_input(s: &str) -> Option<Option<Self>> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "da" => Some(Some(Answer::Yes)),
            "no" | "n" | "ne" => Some(Some(Answer::No)),
            "unset" | "-" => Some(None),
            _ => None,
        }
    }
}
