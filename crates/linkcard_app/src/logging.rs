//! Logging for the desktop shell: `./linkcard.log` in the working directory.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Initialize the file logger. If the log file cannot be created the app
/// runs unlogged rather than refusing to start.
pub fn initialize() {
    let log_path = PathBuf::from("./linkcard.log");
    let file = match File::create(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not create log file at {log_path:?}: {err}");
            return;
        }
    };
    let _ = WriteLogger::init(LevelFilter::Info, build_config(), file);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
