//! Opt-in file logging.
//!
//! The game draws on the whole terminal, so log records never go to
//! stdout/stderr. Set `MATCH3_LOG_PATH` to write them to a file instead;
//! `MATCH3_LOG` picks the level (`error`, `warn`, `info`, `debug`, `trace`,
//! default `info`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: None,
            level: LevelFilter::Info,
        }
    }
}

impl LogSettings {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let path = env::var("MATCH3_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let level = env::var("MATCH3_LOG")
            .ok()
            .and_then(|s| parse_level(&s))
            .unwrap_or(LevelFilter::Info);

        Self { path, level }
    }
}

pub fn parse_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}

/// Appends one line per record to a file.
pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    /// Open (truncating) `path`.
    pub fn create(path: &Path, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} {:<5} {}: {}",
                millis,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger if `settings` name a path.
///
/// Returns whether a logger was installed.
pub fn init(settings: &LogSettings) -> anyhow::Result<bool> {
    let Some(path) = settings.path.as_deref() else {
        return Ok(false);
    };
    let logger = FileLogger::create(path, settings.level)?;
    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| anyhow::anyhow!("failed to install logger: {}", err))?;
    log::set_max_level(settings.level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_default_settings_log_nothing() {
        let settings = LogSettings::default();
        assert!(settings.path.is_none());
        assert!(!init(&settings).unwrap());
    }

    #[test]
    fn test_file_logger_filters_by_level() {
        let path = std::env::temp_dir().join(format!("match3-log-{}.txt", std::process::id()));
        let logger = FileLogger::create(&path, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .level(log::Level::Info)
                .target("engine")
                .args(format_args!("swap accepted"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(log::Level::Debug)
                .target("engine")
                .args(format_args!("pass 0"))
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("INFO  engine: swap accepted"));
        assert!(!text.contains("pass 0"));
    }

    #[test]
    fn test_init_installs_global_file_logger() {
        let path =
            std::env::temp_dir().join(format!("match3-global-log-{}.txt", std::process::id()));
        let settings = LogSettings {
            path: Some(path.clone()),
            level: LevelFilter::Debug,
        };

        assert!(init(&settings).unwrap());
        log::debug!(target: "resolver", "pass 1");
        log::logger().flush();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("DEBUG resolver: pass 1"));

        // Only one logger per process.
        assert!(init(&settings).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
