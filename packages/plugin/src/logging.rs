// Plugin logging
//
// The plugin reports declined ids and chosen strategies at debug, lifecycle
// anomalies at warn, and parse diagnostics at error.

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Warn = 1,
    Error = 2,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Sink for plugin messages. Shared across every transform of a build.
pub trait Logger: Send + Sync {
    /// Lowest level this logger records.
    fn level(&self) -> LogLevel;

    /// Record `msg`. Only called for enabled levels.
    fn log(&self, level: LogLevel, msg: &str);

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg);
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg);
    }

    fn emit(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            self.log(level, msg);
        }
    }
}

/// Writes `[LEVEL] [excalidraw-as-json] msg` lines to stderr.
///
/// stdout is left alone since hosts may pipe generated code through it.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn log(&self, level: LogLevel, msg: &str) {
        eprintln!("[{}] [{}] {}", level.tag(), crate::plugin::PLUGIN_NAME, msg);
    }
}

/// Discards everything. The plugin's default.
#[derive(Default)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _msg: &str) {}
}
