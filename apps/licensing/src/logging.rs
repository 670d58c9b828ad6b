//! Logging setup and runtime level changes.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// The `env_logger` setup used by `init_logging`. Honors `RUST_LOG` (default:
/// `info`) unless `level` is given, in which case `level` applies to every
/// module instead.
pub fn logger_builder(level: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
}

/// Installs the logger from `logger_builder`.
///
/// Calling it twice is harmless: the second call reports the existing logger.
pub fn init_logging(level: Option<LevelFilter>) -> Result<(), log::SetLoggerError> {
    logger_builder(level).try_init()
}

/// Parses `debug`, `info`, `warn`/`warning`, `error`, `trace` or `off`.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "trace" => Some(LevelFilter::Trace),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Changes the global log level at runtime. Unknown names mean `info`.
///
/// This only lowers verbosity below what the installed logger lets through. To
/// get more detail than the logger was built with, restart with a higher level.
pub fn set_log_level(level: &str) -> LevelFilter {
    let filter = parse_level(level).unwrap_or(LevelFilter::Info);
    log::set_max_level(filter);
    log::info!("Log level changed to {filter}");
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, level: Level) -> bool {
        logger.enabled(&Metadata::builder().level(level).target("mwi_licensing").build())
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARNING "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(set_log_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_explicit_level_raises_verbosity_past_default() {
        let logger = logger_builder(Some(LevelFilter::Debug)).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
        assert!(enabled(&logger, Level::Debug));
        assert!(!enabled(&logger, Level::Trace));
    }

    #[test]
    fn test_explicit_level_can_quiet_logging() {
        let logger = logger_builder(Some(LevelFilter::Error)).build();
        assert!(enabled(&logger, Level::Error));
        assert!(!enabled(&logger, Level::Warn));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        let _ = init_logging(None);
        assert!(init_logging(Some(LevelFilter::Debug)).is_err());
    }
}
