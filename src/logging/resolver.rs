//! Call-site resolution: find the frame that asked to log.
//!
//! [`BacktraceResolver`] walks the calling thread's stack from the innermost
//! frame outward and reports the first frame that no [`SkipFrame`] rule
//! excludes. Everything else in the module is the symbol-path handling that
//! turns a demangled name such as
//! `<app::net::Client<T> as app::Connect>::connect::{{closure}}` into a
//! `Client.connect` pair.
use std::path::PathBuf;

use super::FACILITY_PATH;
use super::types::CallSite;
use super::utils::{file_name_of, simple_type_name};

/// Symbol prefixes that belong to thread start-up and closure plumbing.
const THREAD_INTERNAL_PREFIXES: &[&str] = &[
    "std::thread::",
    "std::sys::",
    "std::sys_common::",
    "std::rt::",
    "std::panicking::",
    "std::panic::",
    "core::ops::function::",
    "core::panic::",
    "alloc::boxed::Box::",
];

/// Markers the standard library places around thread and test entry points.
const SHORT_BACKTRACE_MARKERS: &[&str] =
    &["__rust_begin_short_backtrace", "__rust_end_short_backtrace"];

/// Trait paths whose impls are call adapters rather than user code.
const CALL_ADAPTER_TRAIT_PREFIX: &str = "core::ops::function::";

/// Stack-walking machinery that runs inside the resolver itself.
const INTROSPECTION_PREFIXES: &[&str] = &["backtrace::", "_Unwind_"];

/// One resolved symbol from a stack walk.
///
/// Inlined functions produce several `StackFrame`s for a single machine
/// frame, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrame {
    /// Demangled symbol name without the trailing hash.
    pub symbol: Option<String>,
    /// Source file recorded in debug info.
    pub file: Option<PathBuf>,
    /// Source line recorded in debug info.
    pub line: Option<u32>,
}

impl StackFrame {
    /// Build a frame from a symbol name and source location.
    #[must_use]
    pub fn new(symbol: &str, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            file: Some(file.into()),
            line: Some(line),
        }
    }

    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        Self {
            symbol: symbol.name().map(|name| format!("{name:#}")),
            file: symbol.filename().map(std::path::Path::to_path_buf),
            line: symbol.lineno(),
        }
    }

    fn path(&self) -> Option<SymbolPath> {
        self.symbol.as_deref().map(SymbolPath::parse)
    }

    /// Convert to a [`CallSite`] if the frame has a symbol and a location.
    ///
    /// Unqualified symbols (`#[no_mangle]` callbacks, C-linked `main`) take
    /// the source file's stem as their owner.
    #[must_use]
    pub fn to_call_site(&self) -> Option<CallSite> {
        let path = self.path()?;
        let file = self.file.as_deref()?;
        let line = self.line?;
        let owner = if path.type_path.is_empty() {
            file.file_stem()
                .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
        } else {
            simple_type_name(&path.type_path).to_string()
        };
        Some(CallSite {
            simple_type_name: owner,
            method_name: path.method,
            file_name: file_name_of(file),
            line_number: line,
        })
    }
}

/// A demangled symbol split into owner path and method.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SymbolPath {
    /// Owner path with generic arguments removed (`app::net::Client`).
    type_path: String,
    /// Trait path for `<T as Trait>::m` symbols.
    trait_path: Option<String>,
    /// Final segment (`connect`).
    method: String,
}

impl SymbolPath {
    fn parse(symbol: &str) -> Self {
        let mut symbol = symbol.trim();
        while let Some(outer) = symbol.strip_suffix("::{{closure}}") {
            symbol = outer;
        }

        if let Some(rest) = symbol.strip_prefix('<')
            && let Some(close) = matching_angle(rest)
        {
            let (qualified, tail) = rest.split_at(close);
            let method = tail.trim_start_matches('>').trim_start_matches("::");
            let (type_part, trait_part) = split_top_level(qualified, " as ")
                .map_or((qualified, None), |(t, tr)| (t, Some(tr)));
            return Self {
                type_path: strip_generics(type_part),
                trait_path: trait_part.map(strip_generics),
                method: last_segment(method).to_string(),
            };
        }

        let (owner, method) = split_top_level_last(symbol, "::").unwrap_or(("", symbol));
        Self {
            type_path: strip_generics(owner),
            trait_path: None,
            method: strip_generics(method),
        }
    }

    fn qualified(&self) -> String {
        if self.type_path.is_empty() {
            self.method.clone()
        } else {
            format!("{}::{}", self.type_path, self.method)
        }
    }
}

/// Byte index of the `>` closing the `<` already consumed before `s`.
fn matching_angle(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => return Some(idx),
            '>' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Split at the first occurrence of `sep` outside angle brackets.
fn split_top_level<'a>(s: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    top_level_matches(s, sep).next().map(|idx| split_around(s, idx, sep))
}

/// Split at the last occurrence of `sep` outside angle brackets.
fn split_top_level_last<'a>(s: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    top_level_matches(s, sep).last().map(|idx| split_around(s, idx, sep))
}

fn split_around<'a>(s: &'a str, idx: usize, sep: &str) -> (&'a str, &'a str) {
    let (head, tail) = s.split_at(idx);
    (head, tail.strip_prefix(sep).unwrap_or(tail))
}

fn top_level_matches<'a>(s: &'a str, sep: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut depth = 0usize;
    s.char_indices().filter_map(move |(idx, c)| {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        (depth == 0 && s.get(idx..).is_some_and(|rest| rest.starts_with(sep))).then_some(idx)
    })
}

/// Remove every `<...>` group, nested ones included.
fn strip_generics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn last_segment(path: &str) -> &str {
    split_top_level_last(path, "::").map_or(path, |(_, last)| last)
}

/// Rule that excludes a frame from being reported as the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipFrame {
    /// Frames without a symbol or without a source location.
    Native,
    /// Thread start-up, panic plumbing and closure call adapters.
    ThreadInternals,
    /// The logging facility's own frames, including the stack walker.
    Facility,
}

impl SkipFrame {
    /// The rules every log call applies.
    pub const DEFAULT: [Self; 3] = [Self::Native, Self::ThreadInternals, Self::Facility];

    /// Return `true` if this rule excludes `frame`.
    #[must_use]
    pub fn matches(self, frame: &StackFrame) -> bool {
        match self {
            Self::Native => frame.symbol.is_none() || frame.file.is_none() || frame.line.is_none(),
            Self::ThreadInternals => frame.symbol.as_deref().is_some_and(is_thread_internal),
            Self::Facility => frame.path().is_some_and(|path| {
                let qualified = path.qualified();
                qualified
                    .strip_prefix(FACILITY_PATH)
                    .is_some_and(|rest| rest.starts_with("::"))
                    || INTROSPECTION_PREFIXES
                        .iter()
                        .any(|prefix| qualified.starts_with(prefix))
            }),
        }
    }
}

fn is_thread_internal(symbol: &str) -> bool {
    if SHORT_BACKTRACE_MARKERS.iter().any(|m| symbol.contains(m)) {
        return true;
    }
    let path = SymbolPath::parse(symbol);
    let qualified = path.qualified();
    THREAD_INTERNAL_PREFIXES
        .iter()
        .any(|prefix| qualified.starts_with(prefix))
        || path
            .trait_path
            .as_deref()
            .is_some_and(|t| t.starts_with(CALL_ADAPTER_TRAIT_PREFIX))
}

/// Report the first frame no rule in `skip` excludes.
///
/// Frames are expected innermost first. Inspection stops at the first
/// eligible frame.
pub fn first_eligible<I>(frames: I, skip: &[SkipFrame]) -> Option<CallSite>
where
    I: IntoIterator<Item = StackFrame>,
{
    frames.into_iter().find_map(|frame| eligible(&frame, skip))
}

fn eligible(frame: &StackFrame, skip: &[SkipFrame]) -> Option<CallSite> {
    if skip.iter().any(|rule| rule.matches(frame)) {
        return None;
    }
    frame.to_call_site()
}

/// Capability that locates the code which issued a log call.
#[cfg_attr(test, mockall::automock)]
pub trait ResolveCallSite: Send + Sync {
    /// Return the first frame on the current thread's stack not excluded by
    /// `skip`, or `None` when every frame is excluded.
    fn resolve(&self, skip: &[SkipFrame]) -> Option<CallSite>;
}

/// Resolver backed by a live stack walk of the calling thread.
///
/// Needs debug info for file and line numbers; without it every frame counts
/// as [`SkipFrame::Native`] and no call site is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceResolver;

impl ResolveCallSite for BacktraceResolver {
    fn resolve(&self, skip: &[SkipFrame]) -> Option<CallSite> {
        let mut found = None;
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_none() {
                    found = eligible(&StackFrame::from_symbol(symbol), skip);
                }
            });
            found.is_none()
        });
        if found.is_none() {
            tracing::trace!(target: "framelog::internal", "no eligible frame on stack");
        }
        found
    }
}

/// Resolver that never reports a call site.
///
/// Frames built with it omit the caller-location block.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallSite;

impl ResolveCallSite for NoCallSite {
    fn resolve(&self, _skip: &[SkipFrame]) -> Option<CallSite> {
        None
    }
}
