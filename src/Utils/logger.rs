/// Terminal logging for the binary, optionally duplicated into a log file.
use crate::LocalSettings::settings_error::SettingsError;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// 0 - warnings, 1 - info, 2 - debug, 3 and more - trace
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logger(level: LevelFilter, log_file: Option<&str>) -> Result<(), SettingsError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::info;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(7), LevelFilter::Trace);
    }

    // the only test in the crate that installs the global logger
    #[test]
    fn test_log_file_receives_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kipath.log");
        init_logger(LevelFilter::Info, Some(path.to_str().unwrap())).unwrap();
        info!("logger test record");
        log::logger().flush();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("logger test record"));
        // a second logger cannot be installed
        assert!(matches!(
            init_logger(LevelFilter::Info, None),
            Err(SettingsError::Logger(_))
        ));
    }
}
