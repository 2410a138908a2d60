//! Dual output destinations: UI/console and append-only file
//!
//! The two destinations are independent. A file failure trips `can_write`
//! once and is reported on the console; console output is never suppressed.

use super::format::{plain_level, text_prefix, Colorizer};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{stderr, stdout, Write};
use std::path::Path;
use std::sync::Arc;

/// Console abstraction with one method per output channel
///
/// Implementations are called while the logger's lock is held and must not
/// log back into the same logger.
pub trait Ui: Send + Sync {
    fn output(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Channel a console line was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Output,
    Info,
    Warn,
    Error,
}

impl Channel {
    /// Route a level to its console channel. `NIL` has no channel.
    pub fn for_level(level: &str) -> Option<Self> {
        match level.to_uppercase().as_str() {
            "NIL" => None,
            "ERROR" => Some(Channel::Error),
            "INFO" => Some(Channel::Info),
            "WARN" => Some(Channel::Warn),
            _ => Some(Channel::Output),
        }
    }
}

/// Terminal UI: output/info on stdout, warn/error on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn output(&self, message: &str) {
        print_stdout_safe(message);
    }

    fn info(&self, message: &str) {
        print_stdout_safe(message);
    }

    fn warn(&self, message: &str) {
        print_stderr_safe(message);
    }

    fn error(&self, message: &str) {
        print_stderr_safe(message);
    }
}

/// UI that keeps every line in memory, in arrival order
#[derive(Debug, Default)]
pub struct CaptureUi {
    lines: Mutex<Vec<(Channel, String)>>,
}

impl CaptureUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().clone()
    }

    /// Messages only, channels dropped
    pub fn messages(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    fn record(&self, channel: Channel, message: &str) {
        self.lines.lock().push((channel, message.to_string()));
    }
}

impl Ui for CaptureUi {
    fn output(&self, message: &str) {
        self.record(Channel::Output, message);
    }

    fn info(&self, message: &str) {
        self.record(Channel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Channel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Channel::Error, message);
    }
}

/// Open a log file in create+append mode (owner read/write on unix)
pub fn open_append(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

pub(crate) struct Sink {
    ui: Option<Arc<dyn Ui>>,
    file: Option<Box<dyn Write + Send>>,
    file_label: String,
    can_write: bool,
    colorize: Colorizer,
}

impl Sink {
    pub(crate) fn new(
        ui: Option<Arc<dyn Ui>>,
        file: Option<Box<dyn Write + Send>>,
        file_label: String,
        colorize: Colorizer,
    ) -> Self {
        let can_write = file.is_some();
        Self {
            ui,
            file,
            file_label,
            can_write,
            colorize,
        }
    }

    pub(crate) fn ui(&self) -> Option<Arc<dyn Ui>> {
        self.ui.clone()
    }

    pub(crate) fn can_write(&self) -> bool {
        self.can_write
    }

    /// Text mode: one console write, then one best-effort file write.
    ///
    /// Every line of a multi-line message gets its own prefix in the file.
    pub(crate) fn write_text(&mut self, level: &str, context: &str, line: &str) {
        let console_line = format!("{}{}", text_prefix(level, context, self.colorize), line);
        self.console(level, &console_line);

        let file_prefix = text_prefix(level, context, plain_level);
        let file_lines: String = line
            .split('\n')
            .map(|chunk| format!("{}{}\n", file_prefix, chunk.trim_end_matches('\r')))
            .collect();
        if let Err(message) = self.append_file(&file_lines) {
            self.report(&message);
        }
    }

    /// Route a line to the console channel matching `level`
    pub(crate) fn console(&self, level: &str, line: &str) {
        match &self.ui {
            None => print_stdout_safe(line),
            Some(ui) => match Channel::for_level(level) {
                None => {}
                Some(Channel::Error) => ui.error(line),
                Some(Channel::Info) => ui.info(line),
                Some(Channel::Warn) => ui.warn(line),
                Some(Channel::Output) => ui.output(line),
            },
        }
    }

    /// Unrouted console output, used for flushed payloads
    pub(crate) fn output(&self, text: &str) {
        match &self.ui {
            Some(ui) => ui.output(text),
            None => print_stdout_safe(text),
        }
    }

    /// Diagnostics about the logger itself
    pub(crate) fn report(&self, text: &str) {
        match &self.ui {
            Some(ui) => ui.error(text),
            None => print_stderr_safe(text),
        }
    }

    /// Append to the file destination.
    ///
    /// Returns `Err` with a description on the write that trips `can_write`;
    /// reporting it is left to the caller. Once tripped, later calls are
    /// skipped and return `Ok(false)`.
    pub(crate) fn append_file(&mut self, text: &str) -> Result<bool, String> {
        if !self.can_write {
            return Ok(false);
        }
        let Some(file) = self.file.as_mut() else {
            self.can_write = false;
            return Ok(false);
        };

        let result = file.write_all(text.as_bytes()).and_then(|_| file.flush());
        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                self.can_write = false;
                Err(format!("failed to write data to '{}', skipping: {}", self.file_label, e))
            }
        }
    }
}

/// Print to stdout, ignoring write errors such as broken pipes
fn print_stdout_safe(message: &str) {
    let mut out = stdout().lock();
    let _ = writeln!(out, "{}", message);
    let _ = out.flush();
}

fn print_stderr_safe(message: &str) {
    let _ = writeln!(stderr().lock(), "{}", message);
}


#[cfg(test)]
mod tests {
    use super::testing::{FailingWriter, SharedWriter};
    use super::*;

    fn sink_with(ui: Arc<CaptureUi>, file: Option<Box<dyn Write + Send>>) -> Sink {
        Sink::new(Some(ui as Arc<dyn Ui>), file, "test.log".to_string(), plain_level)
    }

    #[test]
    fn test_channel_routing() {
        assert_eq!(Channel::for_level("error"), Some(Channel::Error));
        assert_eq!(Channel::for_level("INFO"), Some(Channel::Info));
        assert_eq!(Channel::for_level("WARN"), Some(Channel::Warn));
        assert_eq!(Channel::for_level("DEBUG"), Some(Channel::Output));
        assert_eq!(Channel::for_level("CRIT"), Some(Channel::Output));
        assert_eq!(Channel::for_level("nil"), None);
    }

    #[test]
    fn test_text_line_reaches_console_and_file() {
        let ui = Arc::new(CaptureUi::new());
        let file = SharedWriter::default();
        let mut sink = sink_with(ui.clone(), Some(Box::new(file.clone())));

        sink.write_text("WARN", "ec2>tag", "missing tag");

        assert_eq!(
            ui.lines(),
            vec![(Channel::Warn, "[WARN:ec2>tag] missing tag".to_string())]
        );
        assert_eq!(file.contents(), "[WARN:ec2>tag] missing tag\n");
        assert_eq!(file.writes(), 1);
    }

    #[test]
    fn test_nil_is_swallowed_by_ui_but_still_persisted() {
        let ui = Arc::new(CaptureUi::new());
        let file = SharedWriter::default();
        let mut sink = sink_with(ui.clone(), Some(Box::new(file.clone())));

        sink.write_text("NIL", "root", "quiet");

        assert!(ui.lines().is_empty());
        assert_eq!(file.contents(), "[NIL:root] quiet\n");
    }

    #[test]
    fn test_file_failure_trips_once_and_console_continues() {
        let ui = Arc::new(CaptureUi::new());
        let file = FailingWriter::default();
        let mut sink = sink_with(ui.clone(), Some(Box::new(file.clone())));
        assert!(sink.can_write());

        sink.write_text("INFO", "root", "first");
        assert!(!sink.can_write());
        sink.write_text("INFO", "root", "second");

        assert_eq!(file.attempts(), 1);
        let lines = ui.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], (Channel::Info, "[INFO:root] first".to_string()));
        assert_eq!(lines[1].0, Channel::Error);
        assert!(lines[1].1.contains("failed to write data to 'test.log'"));
        assert_eq!(lines[2], (Channel::Info, "[INFO:root] second".to_string()));
    }

    #[test]
    fn test_no_file_means_cannot_write() {
        let ui = Arc::new(CaptureUi::new());
        let mut sink = sink_with(ui, None);
        assert!(!sink.can_write());
        assert_eq!(sink.append_file("x"), Ok(false));
    }

    #[test]
    fn test_open_append_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        {
            let mut f = open_append(&path).unwrap();
            f.write_all(b"one\n").unwrap();
        }
        {
            let mut f = open_append(&path).unwrap();
            f.write_all(b"two\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
