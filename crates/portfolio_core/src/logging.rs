//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend for the `log` facade exactly once.
//! - Write either to stderr or to size-rotated files in a log directory.
//!
//! # Invariants
//! - Initialization is idempotent for the same level and destination.
//! - Re-initialization with a different level or destination is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "portfolio";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

/// Accepted spellings and the `flexi_logger` spec each maps to.
const LEVEL_ALIASES: &[(&str, &str)] = &[
    ("trace", "trace"),
    ("debug", "debug"),
    ("info", "info"),
    ("warn", "warn"),
    ("warning", "warn"),
    ("error", "error"),
];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    Directory(PathBuf),
}

impl Display for LogDestination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

struct LoggingState {
    level: &'static str,
    destination: LogDestination,
    _logger: LoggerHandle,
}

/// Initializes process logging.
///
/// `log_dir = None` logs to stderr; `Some(dir)` writes rotating files under
/// the absolute directory `dir`, creating it if needed.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with a different level or destination.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;
    let destination = match log_dir {
        Some(dir) => LogDestination::Directory(normalize_log_dir(dir)?),
        None => LogDestination::Stderr,
    };

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(normalized_level, &destination))?;
    ensure_same_config(state, normalized_level, &destination)
}

/// Returns `(level, destination)` when logging is active.
pub fn logging_status() -> Option<(&'static str, LogDestination)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.destination.clone()))
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, destination: &LogDestination) -> Result<LoggingState, String> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match destination {
        LogDestination::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .start(),
        LogDestination::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
    }
    .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} optimized={} version={}",
        std::env::consts::OS,
        !cfg!(debug_assertions),
        env!("CARGO_PKG_VERSION")
    );
    info!("event=logging_init module=core status=ok level={level} destination={destination}");

    Ok(LoggingState {
        level,
        destination: destination.clone(),
        _logger: logger,
    })
}

fn ensure_same_config(
    state: &LoggingState,
    level: &'static str,
    destination: &LogDestination,
) -> Result<(), String> {
    if &state.destination != destination {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{destination}`",
            state.destination
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, spec)| *spec)
        .ok_or_else(|| {
            format!("unsupported log level `{wanted}`; expected trace|debug|info|warn|error")
        })
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook_once() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Handler panics can carry submitted field text.
            let location = panic_info
                .location()
                .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
            let payload = one_line_excerpt(panic_message(panic_info), MAX_PANIC_PAYLOAD_CHARS);
            error!("event=panic_captured module=core status=error location={location} payload={payload}");
            previous_hook(panic_info);
        }));
    });
}

fn panic_message<'a>(info: &'a std::panic::PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Flattens control characters to spaces and caps the result at `max_chars`.
fn one_line_excerpt(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let mut excerpt: String = chars
        .by_ref()
        .take(max_chars)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if chars.next().is_some() {
        excerpt.push_str("...");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, normalize_level, normalize_log_dir, one_line_excerpt,
        LogDestination,
    };

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").expect("INFO should normalize"), "info");
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn normalize_log_dir_rejects_relative_and_empty_paths() {
        let error = normalize_log_dir("logs/dev").expect_err("relative paths must be rejected");
        assert!(error.contains("absolute"));
        assert!(normalize_log_dir("   ").is_err());
    }

    #[test]
    fn one_line_excerpt_flattens_control_chars_and_caps_length() {
        assert_eq!(
            one_line_excerpt("name=Jo\nemail=\tjo@x\r", 64),
            "name=Jo email= jo@x "
        );
        assert_eq!(one_line_excerpt("line1\nline2", 5), "line1...");
        assert_eq!(one_line_excerpt("exact", 5), "exact");
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().expect("temp dir");
        let log_dir_str = log_dir
            .path()
            .to_str()
            .expect("temp dir should be valid UTF-8")
            .to_string();

        init_logging("info", Some(&log_dir_str)).expect("first init should succeed");
        init_logging("INFO", Some(&log_dir_str)).expect("same config should be idempotent");

        let level_error =
            init_logging("debug", Some(&log_dir_str)).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let destination_error =
            init_logging("info", None).expect_err("destination conflict should fail");
        assert!(destination_error.contains("refusing to switch"));

        let (active_level, active_destination) =
            logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(
            active_destination,
            LogDestination::Directory(log_dir.path().to_path_buf())
        );
    }
}
