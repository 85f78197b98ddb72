// Shared helpers for integration tests.
//
// Provides a logger wired to an in-memory sink and a resolver that reports a
// fixed call site, so each test can inspect the exact lines a call produces
// without depending on debug info or the test harness's stack.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::sync::Arc;

use framelog::config::Config;
use framelog::logging::{CallSite, Logger, MemorySink, ResolveCallSite, SkipFrame};

/// Resolver that always reports the same call site.
#[derive(Debug, Clone, Default)]
pub struct FixedResolver(pub Option<CallSite>);

impl ResolveCallSite for FixedResolver {
    fn resolve(&self, _skip: &[SkipFrame]) -> Option<CallSite> {
        self.0.clone()
    }
}

/// The `Foo.bar (Foo.ext:42)` call site used by the documented scenario.
pub fn foo_bar_site() -> CallSite {
    CallSite {
        simple_type_name: "Foo".to_string(),
        method_name: "bar".to_string(),
        file_name: "Foo.ext".to_string(),
        line_number: 42,
    }
}

/// A logger over a [`MemorySink`], plus the sink for inspection.
pub struct TestLogger {
    /// The logger under test.
    pub log: Logger,
    /// Every line the logger emitted.
    pub sink: Arc<MemorySink>,
}

impl TestLogger {
    /// Logger with `config` that reports `call_site` for every call.
    pub fn new(config: Config, call_site: Option<CallSite>) -> Self {
        let sink = Arc::new(MemorySink::new());
        let log = Logger::builder()
            .config(config)
            .sink(Arc::clone(&sink))
            .resolver(FixedResolver(call_site))
            .build();
        Self { log, sink }
    }

    /// Logger with default config and the `Foo.bar` call site.
    pub fn with_call_site() -> Self {
        Self::new(Config::default(), Some(foo_bar_site()))
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.sink.lines()
    }
}

/// Run `f` on a thread named `name` and return its result.
pub fn on_thread<T: Send + 'static>(name: &str, f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(f)
        .expect("spawn named thread")
        .join()
        .expect("join named thread")
}
