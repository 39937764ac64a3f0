//! Process-level wiring for `submit-indexnow`: arguments, logging and exit codes.
mod app;
mod cli;
mod logging;

pub use app::run_app;
