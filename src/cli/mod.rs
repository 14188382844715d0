pub mod app;
pub mod args;
pub mod prompt;
pub mod session;
