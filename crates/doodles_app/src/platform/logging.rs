//! Terminal logging for submit-indexnow.
//!
//! Info goes to stdout; warnings and errors go to stderr.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelPadding, SharedLogger, TermLogger,
    TerminalMode,
};

/// Initialize the logger; `verbose` lowers the level to debug.
pub fn initialize(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_level_padding(LevelPadding::Off)
        // Keep HTTP client internals out of debug output.
        .add_filter_allow_str("doodles")
        .build()
}
