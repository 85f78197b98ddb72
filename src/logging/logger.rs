//! Framed logger: config gating, call-site lookup, and per-line emission.
use std::sync::{PoisonError, RwLock};

use super::frame::FrameBlock;
use super::resolver::{BacktraceResolver, ResolveCallSite, SkipFrame};
use super::sink::{ConsoleSink, Sink, emit_line};
use super::types::{Log, Severity, SinkRoute};
use super::utils::current_thread_name;
use crate::config::Config;

/// Generate the tag-less and tagged entry points for each severity.
macro_rules! severity_methods {
    ($($method:ident, $tagged:ident => $severity:ident);+ $(;)?) => {
        $(
            #[doc = concat!("Log a `", stringify!($severity), "` frame with the default tag.")]
            pub fn $method(&self, msg: &str) {
                self.log(Severity::$severity, None, msg);
            }

            #[doc = concat!("Log a `", stringify!($severity), "` frame with an explicit tag.")]
            pub fn $tagged(&self, tag: &str, msg: &str) {
                self.log(Severity::$severity, Some(tag), msg);
            }
        )+
    };
}

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident, $tagged:ident);+ $(;)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }

            fn $tagged(&self, tag: &str, msg: &str) {
                self.$tagged(tag, msg);
            }
        )+
    };
}

/// Framed logger.
///
/// Each call builds a [`FrameBlock`] and writes its lines, one sink call per
/// line, through the route of the call's severity. The configuration lives
/// behind an [`RwLock`]: a call reads it once, so the enabled check, tag and
/// thread toggle it uses always come from the same snapshot, and setters
/// take effect from the next call on.
pub struct Logger {
    config: RwLock<Config>,
    sink: Box<dyn Sink>,
    resolver: Box<dyn ResolveCallSite>,
}

impl Logger {
    /// Create a logger with default configuration writing to `sink`.
    ///
    /// Call sites are resolved by walking the stack with
    /// [`BacktraceResolver`].
    #[must_use]
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::builder().sink(sink).build()
    }

    /// Start configuring a logger.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Replace the default tag.
    pub fn set_tag(&self, tag: impl Into<String>) {
        self.update(|c| c.default_tag = tag.into());
    }

    /// Turn all output on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.update(|c| c.enabled = enabled);
    }

    /// Include or omit the thread-name block.
    pub fn set_enable_thread_info(&self, enabled: bool) {
        self.update(|c| c.include_thread_info = enabled);
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut Config)) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    severity_methods! {
        verbose, verbose_with_tag => Verbose;
        debug, debug_with_tag => Debug;
        info, info_with_tag => Info;
        warn, warn_with_tag => Warn;
        error, error_with_tag => Error;
    }

    /// Log a frame at `severity`, using the default tag when `tag` is `None`.
    pub fn log(&self, severity: Severity, tag: Option<&str>, msg: &str) {
        self.write(severity.route(), tag, msg);
    }

    /// Log a frame at a raw numeric level (`1` verbose through `5` error).
    ///
    /// Levels outside that range are written on the verbose route, the same
    /// one debug uses.
    pub fn log_raw(&self, level: u8, tag: Option<&str>, msg: &str) {
        self.write(SinkRoute::for_level(level), tag, msg);
    }

    /// Build the frame a call would emit right now, without emitting it.
    ///
    /// Ignores the enabled flag.
    #[must_use]
    pub fn frame(&self, msg: &str) -> FrameBlock {
        self.build_frame(&self.config(), msg)
    }

    fn build_frame(&self, config: &Config, msg: &str) -> FrameBlock {
        let thread = config.include_thread_info.then(current_thread_name);
        let call_site = self.resolver.resolve(&SkipFrame::DEFAULT);
        if call_site.is_none() {
            tracing::debug!(target: "framelog::internal", "call site unresolved; omitting caller line");
        }
        FrameBlock::build(thread.as_deref(), call_site.as_ref(), msg)
    }

    fn write(&self, route: SinkRoute, tag: Option<&str>, msg: &str) {
        let config = self.config();
        if !config.enabled {
            tracing::trace!(target: "framelog::internal", "logger disabled; frame dropped");
            return;
        }
        let tag = tag.unwrap_or(config.default_tag.as_str());
        let block = self.build_frame(&config, msg);
        for line in &block {
            emit_line(self.sink.as_ref(), route, tag, line);
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

impl Log for Logger {
    forward_log_methods! {
        verbose, verbose_with_tag;
        debug, debug_with_tag;
        info, info_with_tag;
        warn, warn_with_tag;
        error, error_with_tag;
    }
}

/// Builder for [`Logger`].
///
/// Defaults: [`Config::default`], a stderr [`ConsoleSink`], and
/// [`BacktraceResolver`].
pub struct LoggerBuilder {
    config: Config,
    sink: Option<Box<dyn Sink>>,
    resolver: Box<dyn ResolveCallSite>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            sink: None,
            resolver: Box::new(BacktraceResolver),
        }
    }
}

impl LoggerBuilder {
    /// Start from `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Write frames to `sink`.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Locate call sites with `resolver`.
    #[must_use]
    pub fn resolver(mut self, resolver: impl ResolveCallSite + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            config: RwLock::new(self.config),
            sink: self
                .sink
                .unwrap_or_else(|| Box::new(ConsoleSink::stderr())),
            resolver: self.resolver,
        }
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
