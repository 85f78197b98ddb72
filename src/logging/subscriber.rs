//! Tracing subscriber setup: logcat-style console formatter and initialisation.
use tracing_subscriber::EnvFilter;

/// Target used by [`TracingSink`](super::sink::TracingSink) events.
const SINK_TARGET: &str = "framelog::sink";

/// Extracts the `message` and `tag` fields from a [`tracing::Event`].
#[derive(Default)]
struct FieldExtractor {
    message: String,
    tag: Option<String>,
}

impl tracing::field::Visit for FieldExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "tag" => self.tag = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "tag" => self.tag = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Route letter for a tracing level, matching the console sink's output.
const fn level_letter(level: tracing::Level) -> char {
    match level {
        tracing::Level::ERROR => 'E',
        tracing::Level::WARN => 'W',
        tracing::Level::INFO => 'I',
        tracing::Level::DEBUG => 'D',
        tracing::Level::TRACE => 'V',
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that renders sink events as
/// `<L>/<tag>: <line>` and everything else as `framelog: <message>`.
struct LogcatFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for LogcatFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        let mut extractor = FieldExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        if metadata.target() == SINK_TARGET {
            let letter = level_letter(*metadata.level());
            let tag = extractor.tag.as_deref().unwrap_or("");
            writeln!(writer, "{letter}/{tag}: {msg}")
        } else if writer.has_ansi_escapes() {
            writeln!(writer, "\x1b[2mframelog: {msg}\x1b[0m")
        } else {
            writeln!(writer, "framelog: {msg}")
        }
    }
}

/// Default filter: every sink line, plus internal diagnostics when verbose.
fn default_filter(verbose: bool) -> String {
    let internal = if verbose { "debug" } else { "warn" };
    format!("warn,{SINK_TARGET}=trace,framelog::internal={internal}")
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a stderr console layer that prints
/// [`TracingSink`](super::sink::TracingSink) lines logcat-style. `RUST_LOG`
/// overrides the default filter. Internal diagnostics are dimmed only when
/// stderr is a terminal. Has no effect if a global subscriber is already
/// installed.
pub fn init_subscriber(verbose: bool) {
    use std::io::IsTerminal as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console_layer = fmt::layer()
        .event_format(LogcatFormatter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .ok();
}
