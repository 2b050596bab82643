pub mod config;
pub mod init;
pub mod list;
pub mod log;
pub mod session;
pub mod submit;
