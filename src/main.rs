//! Demo binary: frame a message and write it to stderr or through tracing.
use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

use framelog::cli::{self, EmitOpts};
use framelog::config::Config;
use framelog::logging::{
    BacktraceResolver, ConsoleSink, Logger, NoCallSite, Severity, TracingSink, init_subscriber,
};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    init_subscriber(args.verbose);

    match args.command {
        cli::Command::Emit(opts) => emit(&opts),
        cli::Command::Version => {
            let version = option_env!("FRAMELOG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            writeln!(std::io::stdout(), "framelog {version}")?;
            Ok(())
        }
    }
}

/// Build a logger from the options and write one frame.
fn emit(opts: &EmitOpts) -> Result<()> {
    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if opts.no_thread {
        config.include_thread_info = false;
    }

    let mut builder = Logger::builder().config(config);
    builder = if opts.tracing {
        builder.sink(TracingSink)
    } else {
        builder.sink(ConsoleSink::stderr())
    };
    builder = if opts.no_caller {
        builder.resolver(NoCallSite)
    } else {
        builder.resolver(BacktraceResolver)
    };
    let log = builder.build();

    let tag = opts.tag.as_deref();
    match opts.raw_level {
        Some(level) => log.log_raw(level, tag, &opts.message),
        None => log.log(Severity::from(opts.level), tag, &opts.message),
    }
    Ok(())
}
