//! Core logging implementation with level gating and output dispatch
//!
//! This module contains the `Logger` façade that:
//! - Checks whether a call passes the threshold before any formatting
//! - Renders the current context and formats the line
//! - Writes immediately (text) or buffers a record (json/pretty)
//! - Drains the buffer on `flush`

use super::config::{LoggerBuilder, LoggerConfig};
use super::context::ContextStack;
use super::error::LoggerResult;
use super::format::{trim_line, Colorizer, OutputFormat};
use super::levels::{lookup_level, LogLevel};
use super::record::{LogRecord, RecordBuffer};
use super::sink::{Sink, Ui};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

pub struct Logger {
    state: Mutex<LoggerState>,
}

struct LoggerState {
    threshold: String,
    threshold_rank: u8,
    format: OutputFormat,
    context: ContextStack,
    sink: Sink,
    buffer: RecordBuffer,
}

/// Console that drops everything, used by `Logger::nil`
struct SilentUi;

impl Ui for SilentUi {
    fn output(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Build from configuration. Without a UI, console lines go to plain stdout.
    pub fn from_config(config: LoggerConfig) -> Self {
        LoggerBuilder::from_config(config).build()
    }

    /// Logger that emits nothing: threshold `NIL`, no file, silent console
    pub fn nil() -> Self {
        Logger::builder()
            .level(LogLevel::Nil.as_str())
            .context("")
            .ui(Arc::new(SilentUi))
            .build()
    }

    pub(crate) fn assemble(
        level: &str,
        format: &str,
        context: &str,
        ui: Option<Arc<dyn Ui>>,
        file: Option<Box<dyn Write + Send>>,
        file_label: String,
        colorize: Colorizer,
    ) -> Self {
        let (threshold, threshold_rank) = lookup_level(level);
        Self {
            state: Mutex::new(LoggerState {
                threshold,
                threshold_rank,
                format: OutputFormat::parse(format),
                context: ContextStack::new(context),
                sink: Sink::new(ui, file, file_label, colorize),
                buffer: RecordBuffer::default(),
            }),
        }
    }

    // =========================================================================
    // LEVELED EMISSION
    // =========================================================================

    /// Whether a call at `level` would be emitted under the current threshold
    pub fn enabled(&self, level: &str) -> bool {
        let (_, rank) = lookup_level(level);
        self.passes(rank)
    }

    fn passes(&self, rank: u8) -> bool {
        rank <= self.state.lock().threshold_rank
    }

    /// Log a formatted line at `level`.
    ///
    /// Suppressed calls return before `args` is rendered.
    pub fn log(&self, level: &str, args: fmt::Arguments<'_>) {
        let (channel, rank) = lookup_level(level);
        if !self.passes(rank) {
            return;
        }

        let line = args.to_string();
        let message = Value::String(trim_line(&line).to_string());
        self.state.lock().emit(&channel, rank, message);
    }

    /// Log an arbitrary serializable payload at `level`.
    ///
    /// Buffered as-is in structured modes; rendered as compact JSON in text mode.
    pub fn log_value<T: Serialize + ?Sized>(&self, level: &str, value: &T) {
        let (channel, rank) = lookup_level(level);
        if !self.passes(rank) {
            return;
        }

        match serde_json::to_value(value) {
            Ok(message) => self.state.lock().emit(&channel, rank, message),
            Err(e) => self.report(&format!("unable to encode log payload: {}", e)),
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug.as_str(), args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info.as_str(), args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn.as_str(), args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error.as_str(), args);
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    pub fn set_level(&self, level: &str) {
        let (threshold, threshold_rank) = lookup_level(level);
        let mut state = self.state.lock();
        state.threshold = threshold;
        state.threshold_rank = threshold_rank;
    }

    /// Current threshold name, upper-cased
    pub fn level(&self) -> String {
        self.state.lock().threshold.clone()
    }

    /// Switch output mode. An empty name keeps the current mode.
    pub fn set_format(&self, format: &str) {
        if format.is_empty() {
            return;
        }
        self.state.lock().format = OutputFormat::parse(format);
    }

    pub fn format(&self) -> OutputFormat {
        self.state.lock().format
    }

    // =========================================================================
    // CONTEXT
    // =========================================================================

    pub fn push_context(&self, name: impl Into<String>) {
        self.state.lock().context.push(name);
    }

    /// Remove the innermost context. The root context is never removed.
    pub fn pop_context(&self) -> LoggerResult<String> {
        self.state.lock().context.pop()
    }

    pub fn render_context(&self) -> String {
        self.state.lock().context.render()
    }

    pub fn context_depth(&self) -> usize {
        self.state.lock().context.depth()
    }

    // =========================================================================
    // BUFFER & SINK
    // =========================================================================

    /// Emit every buffered record as one JSON array, then clear the buffer.
    ///
    /// The array goes to the console once and is appended to the file once.
    /// An empty buffer produces no output.
    pub fn flush(&self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.buffer.is_empty() {
            return;
        }

        let payload = match state.buffer.serialize(state.format) {
            Ok(payload) => payload,
            Err(e) => {
                state.sink.report(&format!("unable to flush json log buffer '{}'", e));
                String::new()
            }
        };

        if !payload.is_empty() {
            state.sink.output(&payload);
            if let Err(message) = state.sink.append_file(&payload) {
                let failure = LogRecord::new(
                    LogLevel::Error.as_str(),
                    &state.context.render(),
                    message.clone(),
                );
                match failure.to_json() {
                    Ok(json) => state.sink.output(&json),
                    Err(_) => state.sink.report(&message),
                }
            }
        }

        state.buffer.clear();
    }

    /// Number of records waiting for `flush`
    pub fn pending(&self) -> usize {
        self.state.lock().buffer.len()
    }

    /// False once the file destination is missing or has failed
    pub fn can_write(&self) -> bool {
        self.state.lock().sink.can_write()
    }

    pub fn ui(&self) -> Option<Arc<dyn Ui>> {
        self.state.lock().sink.ui()
    }

    pub(crate) fn report(&self, message: &str) {
        self.state.lock().sink.report(message);
    }
}

impl LoggerState {
    /// Dispatch a formatted call. The threshold is checked again here because
    /// it may have changed since the unlocked pre-check in `Logger::log`.
    fn emit(&mut self, level: &str, rank: u8, message: Value) {
        if rank > self.threshold_rank {
            return;
        }

        let context = self.context.render();
        if self.format.is_structured() {
            self.buffer.push(LogRecord::new(level, &context, message));
        } else {
            let line = match &message {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.sink.write_text(level, &context, &line);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("level", &state.threshold)
            .field("format", &state.format)
            .field("context", &state.context.render())
            .field("pending", &state.buffer.len())
            .field("can_write", &state.sink.can_write())
            .finish()
    }
}
