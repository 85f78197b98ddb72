//! Framed logging: boxed multi-line records with thread and caller lines.

mod frame;
mod logger;
mod resolver;
mod sink;
mod subscriber;
mod types;
mod utils;

pub use frame::{
    BOTTOM_BORDER, BOTTOM_LEFT_CORNER, DIVIDER_WIDTH, DOUBLE_DIVIDER, FrameBlock, MIDDLE_BORDER,
    MIDDLE_CORNER, SINGLE_DIVIDER, TOP_BORDER, TOP_LEFT_CORNER, VERTICAL_DOUBLE_LINE,
};
pub use logger::{Logger, LoggerBuilder};
pub use resolver::{
    BacktraceResolver, NoCallSite, ResolveCallSite, SkipFrame, StackFrame, first_eligible,
};
pub use sink::{ConsoleSink, MemorySink, Sink, SinkRecord, TracingSink, emit_line};
pub use subscriber::init_subscriber;
pub use types::{CallSite, Log, Severity, SinkRoute};
pub use utils::{current_thread_name, set_thread_label, simple_type_name};

/// Module path whose frames count as the logging facility's own.
const FACILITY_PATH: &str = module_path!();

/// Call site used by unit tests that stub the resolver.
#[cfg(test)]
pub(crate) fn sample_call_site() -> CallSite {
    CallSite {
        simple_type_name: "Foo".to_string(),
        method_name: "bar".to_string(),
        file_name: "Foo.ext".to_string(),
        line_number: 42,
    }
}

/// Create a Logger that records into a [`MemorySink`] and reports
/// `call_site` for every call instead of walking the stack.
///
/// Returns the shared sink so the test can inspect what was emitted.
#[cfg(test)]
pub(crate) fn recording_logger(
    call_site: Option<CallSite>,
) -> (Logger, std::sync::Arc<MemorySink>) {
    let sink = std::sync::Arc::new(MemorySink::new());
    let mut resolver = resolver::MockResolveCallSite::new();
    resolver
        .expect_resolve()
        .returning(move |_| call_site.clone());
    let log = Logger::builder()
        .sink(std::sync::Arc::clone(&sink))
        .resolver(resolver)
        .build();
    (log, sink)
}
