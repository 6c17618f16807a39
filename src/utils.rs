//! Logging bootstrap for embedding hosts and tests.

use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Initializes terminal logging at the requested level. `loglevel` is one
/// of "debug", "info", "warn", "error" (case-insensitive); `None` defaults
/// to Info. Safe to call more than once; later calls are no-ops.
///
/// # Panics
/// Panics on an unrecognized loglevel string.
pub fn init_logging(loglevel: Option<&str>) {
    let log_option = if let Some(loglevel) = loglevel {
        match loglevel.to_lowercase().as_str() {
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => panic!("loglevel must be debug, info, warn or error"),
        }
    } else {
        LevelFilter::Info
    };
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    if logger_instance.is_ok() {
        info!("logging initialized at {}", log_option);
    }
}

//___________________________________TESTS____________________________________
