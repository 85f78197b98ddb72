//! Utility functions for thread naming and symbol-path handling.
use std::cell::RefCell;
use std::path::Path;

thread_local! {
    /// Label for the current thread, set by callers that run on unnamed threads.
    ///
    /// `std::thread::scope` and most pools spawn unnamed threads, so
    /// `std::thread::current().name()` returns `None`.  This thread-local
    /// gives the thread-info line something better than a placeholder.
    static THREAD_LABEL: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Label the current thread for the `Thread:` line of subsequent frames.
///
/// Only used when the OS thread has no name of its own.
pub fn set_thread_label(name: &str) {
    THREAD_LABEL.with(|cell| {
        *cell.borrow_mut() = Some(name.to_string());
    });
}

/// Display name of the current thread.
///
/// Prefers the OS thread name, then the label set via [`set_thread_label`],
/// then `<unnamed>`.
#[must_use]
pub fn current_thread_name() -> String {
    let thread = std::thread::current();
    if let Some(name) = thread.name() {
        return name.to_string();
    }
    THREAD_LABEL.with(|cell| {
        cell.borrow()
            .as_deref()
            .unwrap_or("<unnamed>")
            .to_string()
    })
}

/// Return the last segment of a qualified type name.
///
/// Both `::` and `.` count as separators; a name without one is returned
/// unchanged.
#[must_use]
pub fn simple_type_name(name: &str) -> &str {
    name.rsplit([':', '.']).next().unwrap_or(name)
}

/// Return the file-name component of a source path, or the path itself.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
