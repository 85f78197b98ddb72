#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for live call-site resolution.
//!
//! These tests log through [`BacktraceResolver`] from ordinary functions in
//! this file, verifying that:
//! - the reported frame is the caller, not the logger or the stack walker
//! - methods, closures and trait-object calls are attributed correctly
//! - builds without debug info drop the caller block instead of failing
//!
//! Every profile in Cargo.toml keeps line tables, so builds with debug
//! assertions must report the caller. Only optimised builds with debug
//! assertions off accept a frame without a caller block.

use std::sync::Arc;

use framelog::config::Config;
use framelog::logging::{
    BacktraceResolver, CallSite, Log, Logger, MemorySink, ResolveCallSite, SkipFrame,
};

fn quiet_config() -> Config {
    Config {
        include_thread_info: false,
        ..Config::default()
    }
}

fn live_logger(config: Config) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let log = Logger::builder()
        .config(config)
        .sink(Arc::clone(&sink))
        .resolver(BacktraceResolver)
        .build();
    (log, sink)
}

/// Whether this build must resolve call sites.
const CALLER_REQUIRED: bool = cfg!(debug_assertions);

/// Assert `lines` is a frame without thread info whose caller line equals
/// `expected`.
fn assert_caller_line(lines: &[String], expected: &str) {
    if CALLER_REQUIRED {
        assert_eq!(lines.len(), 5, "caller block missing: {lines:#?}");
    } else {
        assert!(
            lines.len() == 3 || lines.len() == 5,
            "unexpected frame: {lines:#?}"
        );
    }
    if lines.len() == 5 {
        assert_eq!(lines[1], expected);
    }
}

#[inline(never)]
fn log_from_free_function(log: &Logger) -> u32 {
    let line = line!() + 1;
    log.info("located");
    line
}

#[test]
fn free_function_is_reported_as_caller() {
    let (log, sink) = live_logger(quiet_config());
    let line = log_from_free_function(&log);
    assert_caller_line(
        &sink.lines(),
        &format!("║ call_site.log_from_free_function  (call_site.rs:{line})"),
    );
}

struct Checkout;

impl Checkout {
    #[inline(never)]
    fn submit(&self, log: &Logger) -> u32 {
        let line = line!() + 1;
        log.warn("submitting");
        line
    }
}

#[test]
fn method_is_reported_with_its_type() {
    let (log, sink) = live_logger(quiet_config());
    let line = Checkout.submit(&log);
    assert_caller_line(
        &sink.lines(),
        &format!("║ Checkout.submit  (call_site.rs:{line})"),
    );
}

#[inline(never)]
fn log_through_trait_object(log: &dyn Log) -> u32 {
    let line = line!() + 1;
    log.error_with_tag("Dyn", "via trait");
    line
}

#[test]
fn trait_object_calls_skip_logger_frames() {
    let (log, sink) = live_logger(quiet_config());
    let line = log_through_trait_object(&log);
    assert_caller_line(
        &sink.lines(),
        &format!("║ call_site.log_through_trait_object  (call_site.rs:{line})"),
    );
    assert!(sink.records().iter().all(|r| r.tag == "Dyn"));
}

#[inline(never)]
fn log_from_spawned_closure(log: Arc<Logger>) -> u32 {
    std::thread::Builder::new()
        .name("worker".to_string())
        .spawn(move || {
            let line = line!() + 1;
            log.debug("from a thread");
            line
        })
        .expect("spawn")
        .join()
        .expect("join")
}

#[test]
fn closure_on_named_thread_reports_enclosing_function() {
    let sink = Arc::new(MemorySink::new());
    let log = Arc::new(
        Logger::builder()
            .sink(Arc::clone(&sink))
            .resolver(BacktraceResolver)
            .build(),
    );
    let line = log_from_spawned_closure(log);

    let lines = sink.lines();
    if CALLER_REQUIRED {
        assert_eq!(lines.len(), 7, "caller block missing: {lines:#?}");
    } else {
        assert!(lines.len() == 5 || lines.len() == 7, "{lines:#?}");
    }
    assert_eq!(lines[1], "║ Thread: worker");
    if lines.len() == 7 {
        assert_eq!(
            lines[3],
            format!("║ call_site.log_from_spawned_closure  (call_site.rs:{line})")
        );
    }
}

#[inline(never)]
fn resolve_here() -> (Option<CallSite>, u32) {
    let line = line!() + 1;
    let site = BacktraceResolver.resolve(&SkipFrame::DEFAULT);
    (site, line)
}

#[test]
fn resolver_reports_its_direct_caller() {
    let (site, line) = resolve_here();
    assert!(!CALLER_REQUIRED || site.is_some(), "no call site resolved");
    if let Some(site) = site {
        assert_eq!(site.simple_type_name, "call_site");
        assert_eq!(site.method_name, "resolve_here");
        assert_eq!(site.file_name, "call_site.rs");
        assert_eq!(site.line_number, line);
    }
}

#[test]
fn resolution_is_repeatable() {
    let (first, _) = resolve_here();
    let (second, _) = resolve_here();
    assert!(!CALLER_REQUIRED || first.is_some(), "no call site resolved");
    assert_eq!(first, second);
}

#[test]
fn many_threads_resolve_their_own_stacks() {
    let sink = Arc::new(MemorySink::new());
    let log = Arc::new(
        Logger::builder()
            .config(quiet_config())
            .sink(Arc::clone(&sink))
            .resolver(BacktraceResolver)
            .build(),
    );
    std::thread::scope(|s| {
        for _ in 0..4 {
            let log = Arc::clone(&log);
            s.spawn(move || {
                log_from_free_function(&log);
            });
        }
    });
    let callers: Vec<String> = sink
        .lines()
        .into_iter()
        .filter(|l| l.contains("  ("))
        .collect();
    if CALLER_REQUIRED {
        assert_eq!(callers.len(), 4, "{callers:#?}");
    } else {
        assert!(callers.is_empty() || callers.len() == 4);
    }
    assert!(
        callers
            .iter()
            .all(|l| l.starts_with("║ call_site.log_from_free_function  (call_site.rs:"))
    );
}
