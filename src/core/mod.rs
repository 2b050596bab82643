pub mod aggregate;
pub mod clock;
pub mod gate;
pub mod intervals;
pub mod list;
pub mod log;
pub mod logic;
pub mod session;
pub mod submit;
pub mod workflow;
