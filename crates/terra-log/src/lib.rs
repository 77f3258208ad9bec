//! Structured logging for the Terra viewer.
//!
//! Installs a `tracing` subscriber with a human-readable console layer and,
//! when enabled, a JSON file layer. The filter comes from `RUST_LOG` if set,
//! otherwise from the configured log level.

use std::path::{Path, PathBuf};

use terra_config::DebugConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside the log directory.
pub const LOG_FILE_NAME: &str = "terra.log";

/// Filter directives for a debug config: the configured level, or
/// [`DEFAULT_FILTER`] when it is blank.
pub fn filter_directives(config: Option<&DebugConfig>) -> String {
    config
        .map(|c| c.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Path of the JSON log file for `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `config` - debug settings; `log_to_file` enables the file layer
///
/// A second call is a no-op: the first installed subscriber stays active.
pub fn init_logging(log_dir: Option<&Path>, config: Option<&DebugConfig>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let log_to_file = config.is_some_and(|c| c.log_to_file);
    if log_to_file
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_config_level_used() {
        let config = DebugConfig {
            log_level: "debug,terra_texture=trace".to_string(),
            log_to_file: false,
        };
        assert_eq!(filter_directives(Some(&config)), "debug,terra_texture=trace");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let config = DebugConfig {
            log_level: "   ".to_string(),
            log_to_file: false,
        };
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_directives_parse() {
        for level in ["info", "warn,terra_shading=debug", "error", DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(level).is_ok(), "failed to parse {level}");
        }
    }

    #[test]
    fn test_log_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        assert!(path.starts_with(dir.path()));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let config = DebugConfig {
            log_level: "warn".to_string(),
            log_to_file: true,
        };
        init_logging(Some(dir.path()), Some(&config));
        init_logging(None, None);
    }
}
