use anyhow::Context;
use clap::Parser;
use scopelog::logger::{ConsoleUi, Logger, LoggerBuilder, LoggerConfig};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

/// Log messages through a scoped logger.
///
/// Messages come from the positional arguments, or from stdin (one per line)
/// when none are given. Structured output is flushed before exit.
#[derive(Parser, Debug)]
#[command(name = "scopelog", about = "Leveled, context-scoped logging from the command line")]
struct Args {
    /// TOML file with level/file/context/format defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threshold level (DEBUG, INFO, WARN, ERROR, CRIT, NIL)
    #[arg(long)]
    level: Option<String>,

    /// Output format: text, json or pretty
    #[arg(long)]
    format: Option<String>,

    /// Append log lines to this file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Root context name
    #[arg(long)]
    context: Option<String>,

    /// Extra context segments, pushed in order (e.g. --scope ec2 --scope tag)
    #[arg(long = "scope")]
    scopes: Vec<String>,

    /// Level each message is logged at
    #[arg(long, default_value = "INFO")]
    emit: String,

    /// Messages to log
    messages: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoggerConfig::load(path)
            .with_context(|| format!("failed to load logger config {}", path.display()))?,
        None => LoggerConfig::default(),
    };
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(file) = args.file {
        config.file = Some(file);
    }
    if let Some(context) = args.context {
        config.context = context;
    }

    let log = LoggerBuilder::from_config(config)
        .ui(Arc::new(ConsoleUi))
        .build();
    for scope in &args.scopes {
        log.push_context(scope.as_str());
    }

    // Flush on every exit path, including a stdin read error
    let result = emit_messages(&log, &args.emit, &args.messages);
    log.flush();
    result
}

fn emit_messages(log: &Logger, level: &str, messages: &[String]) -> anyhow::Result<()> {
    if messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            log.log(level, format_args!("{}", line));
        }
    } else {
        for message in messages {
            log.log(level, format_args!("{}", message));
        }
    }
    Ok(())
}
