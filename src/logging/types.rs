//! Core logging types: severities, sink routes, call sites, and the [`Log`] trait.
use std::fmt;

/// Severity of a log call.
///
/// The discriminants are the raw levels accepted by
/// [`Logger::log_raw`](super::logger::Logger::log_raw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Most detailed output.
    Verbose = 1,
    /// Debugging output.
    Debug = 2,
    /// Informational output.
    Info = 3,
    /// Something unexpected but recoverable.
    Warn = 4,
    /// A failure.
    Error = 5,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Map a raw numeric level to a severity, if it names one.
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Verbose),
            2 => Some(Self::Debug),
            3 => Some(Self::Info),
            4 => Some(Self::Warn),
            5 => Some(Self::Error),
            _ => None,
        }
    }

    /// The sink method this severity is written through.
    ///
    /// `Debug` has no dedicated sink method: it shares the verbose route.
    #[must_use]
    pub const fn route(self) -> SinkRoute {
        match self {
            Self::Info => SinkRoute::Info,
            Self::Warn => SinkRoute::Warn,
            Self::Error => SinkRoute::Error,
            Self::Verbose | Self::Debug => SinkRoute::Verbose,
        }
    }

    /// Lowercase name, as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four methods a [`Sink`](super::sink::Sink) exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkRoute {
    /// `Sink::verbose`.
    Verbose,
    /// `Sink::info`.
    Info,
    /// `Sink::warn`.
    Warn,
    /// `Sink::error`.
    Error,
}

impl SinkRoute {
    /// Route for a raw numeric level.
    ///
    /// Levels that do not name a [`Severity`] fall back to the verbose route,
    /// the same one `Debug` uses.
    #[must_use]
    pub const fn for_level(level: u8) -> Self {
        match Severity::from_level(level) {
            Some(severity) => severity.route(),
            None => Self::Verbose,
        }
    }

    /// Single-letter prefix used by console output (`V`, `I`, `W`, `E`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Verbose => 'V',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// The frame that issued a log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Last path segment of the owning type (or module, for free functions).
    pub simple_type_name: String,
    /// Function or method name.
    pub method_name: String,
    /// Source file name without directories.
    pub file_name: String,
    /// 1-based source line.
    pub line_number: u32,
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}  ({}:{})",
            self.simple_type_name, self.method_name, self.file_name, self.line_number
        )
    }
}

/// Abstraction over framed loggers.
///
/// [`Logger`](super::logger::Logger) implements this trait so call sites can
/// hold a `&dyn Log` without caring which sink or resolver sits behind it.
/// The tag-less methods use the configured default tag.
pub trait Log: Send + Sync {
    /// Log a verbose message.
    fn verbose(&self, msg: &str);
    /// Log a debug message (routed like verbose).
    fn debug(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a verbose message with an explicit tag.
    fn verbose_with_tag(&self, tag: &str, msg: &str);
    /// Log a debug message with an explicit tag.
    fn debug_with_tag(&self, tag: &str, msg: &str);
    /// Log an informational message with an explicit tag.
    fn info_with_tag(&self, tag: &str, msg: &str);
    /// Log a warning message with an explicit tag.
    fn warn_with_tag(&self, tag: &str, msg: &str);
    /// Log an error message with an explicit tag.
    fn error_with_tag(&self, tag: &str, msg: &str);
}
