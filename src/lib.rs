//! Framed, caller-aware logging.
//!
//! Wraps a platform log sink and turns each `(severity, tag, message)` call
//! into a boxed block of lines: a border, an optional `Thread:` line, an
//! optional caller line resolved from the current stack, the message, and a
//! closing border. Each line reaches the sink as a separate call.
//!
//! The public API is organised into three layers:
//!
//! - **[`logging`]**: [`Logger`](logging::Logger), frame formatting, call-site resolution, sinks
//! - **[`config`]**: the runtime [`Config`](config::Config) and its TOML loader
//! - **[`error`]**: error types for the fallible setup paths
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
