//! Leveled logging used by the adapter internals.
//!
//! Each area of the crate owns a named [`Logger`]. Levels can be adjusted per
//! instance or for every live logger at once via [`set_log_level`], and the
//! output sink can be swapped with [`Logger::set_log_handler`], which is how
//! the tests capture log lines.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock, Weak};

use chrono::{SecondsFormat, Utc};

/// Severity of a single log call, ordered from chattiest to silent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 0,
    Verbose = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Silent = 5,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    fn from_u8(value: u8) -> LogLevel {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Verbose,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Silent,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            other => Err(LogError::InvalidLogLevel(other.to_string())),
        }
    }
}

/// Errors produced by the logging layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    InvalidLogLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLogLevel(value) => {
                write!(f, "invalid log level: {value}")
            }
        }
    }
}

impl std::error::Error for LogError {}

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LOG_LEVEL as u8);

static INSTANCES: LazyLock<Mutex<Vec<Weak<LoggerInner>>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));

type SharedLogHandler = Arc<dyn Fn(&Logger, LogLevel, &str) + Send + Sync + 'static>;

struct LoggerInner {
    name: String,
    log_level: AtomicU8,
    log_handler: RwLock<SharedLogHandler>,
}

/// A named logger. Cloning is cheap and clones share level and handler.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Creates a logger named `name`, starting at the current global level.
    pub fn new(name: impl Into<String>) -> Self {
        let inner = Arc::new(LoggerInner {
            name: name.into(),
            log_level: AtomicU8::new(GLOBAL_LOG_LEVEL.load(Ordering::Relaxed)),
            log_handler: RwLock::new(Arc::new(default_log_handler) as SharedLogHandler),
        });
        let mut instances = INSTANCES.lock().unwrap_or_else(|p| p.into_inner());
        instances.push(Arc::downgrade(&inner));
        Logger { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.log_level.load(Ordering::Relaxed))
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.inner.log_level.store(level as u8, Ordering::Relaxed);
    }

    /// Replaces the output sink for this logger.
    pub fn set_log_handler<F>(&self, handler: F)
    where
        F: Fn(&Logger, LogLevel, &str) + Send + Sync + 'static,
    {
        let mut slot = self
            .inner
            .log_handler
            .write()
            .unwrap_or_else(|p| p.into_inner());
        *slot = Arc::new(handler);
    }

    /// Restores the built-in stdout/stderr sink.
    pub fn reset_log_handler(&self) {
        let mut slot = self
            .inner
            .log_handler
            .write()
            .unwrap_or_else(|p| p.into_inner());
        *slot = Arc::new(default_log_handler);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Debug, message);
    }

    pub fn log(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Verbose, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Error, message);
    }

    fn dispatch(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        let handler = self
            .inner
            .log_handler
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        handler(self, level, &message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("log_level", &self.log_level())
            .finish()
    }
}

/// Sets the default level for new loggers and applies it to every logger that
/// is still alive.
pub fn set_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    let mut instances = INSTANCES.lock().unwrap_or_else(|p| p.into_inner());
    instances.retain(|weak| match weak.upgrade() {
        Some(inner) => {
            inner.log_level.store(level as u8, Ordering::Relaxed);
            true
        }
        None => false,
    });
}

pub fn global_log_level() -> LogLevel {
    LogLevel::from_u8(GLOBAL_LOG_LEVEL.load(Ordering::Relaxed))
}

fn default_log_handler(logger: &Logger, level: LogLevel, message: &str) {
    let current = logger.log_level();
    if level < current || current == LogLevel::Silent || level == LogLevel::Silent {
        return;
    }
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let line = format!("[{now}]  {}: {message}", logger.name());
    match level {
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}
