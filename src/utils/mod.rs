pub mod formatting;
pub mod time;
