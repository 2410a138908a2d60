//! Logger configuration and construction
//!
//! `LoggerConfig` is the serializable form (TOML files, CLI flags);
//! `LoggerBuilder` adds the runtime-only pieces: UI, colorizer, custom writer.

use super::core::Logger;
use super::error::LoggerResult;
use super::format::{color_for_level, Colorizer};
use super::sink::{open_append, Ui};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial threshold (DEBUG, INFO, WARN, ERROR, CRIT, NIL)
    pub level: String,
    /// Append destination; `None` logs to the console only
    pub file: Option<PathBuf>,
    /// Root context segment
    pub context: String,
    /// text, json or pretty
    pub format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            context: "main".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn from_toml_str(input: &str) -> LoggerResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> LoggerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

enum FileTarget {
    None,
    Path(PathBuf),
    Writer(String, Box<dyn Write + Send>),
}

pub struct LoggerBuilder {
    config: LoggerConfig,
    target: FileTarget,
    ui: Option<Arc<dyn Ui>>,
    colorize: Colorizer,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::from_config(LoggerConfig::default())
    }
}

impl LoggerBuilder {
    pub fn from_config(config: LoggerConfig) -> Self {
        let target = match &config.file {
            Some(path) => FileTarget::Path(path.clone()),
            None => FileTarget::None,
        };
        Self {
            config,
            target,
            ui: None,
            colorize: color_for_level,
        }
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.config.context = context.into();
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.config.file = Some(path.clone());
        self.target = FileTarget::Path(path);
        self
    }

    /// Use an already-open destination instead of a path. `label` names it in diagnostics.
    pub fn writer(mut self, label: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        self.config.file = None;
        self.target = FileTarget::Writer(label.into(), Box::new(writer));
        self
    }

    pub fn ui(mut self, ui: Arc<dyn Ui>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn colorizer(mut self, colorize: Colorizer) -> Self {
        self.colorize = colorize;
        self
    }

    /// Build the logger. A file that cannot be opened is reported once and
    /// the logger runs console-only.
    pub fn build(self) -> Logger {
        let (label, file, open_error) = match self.target {
            FileTarget::None => (String::new(), None, None),
            FileTarget::Writer(label, writer) => (label, Some(writer), None),
            FileTarget::Path(path) => {
                let label = path.display().to_string();
                match open_append(&path) {
                    Ok(f) => (label, Some(Box::new(f) as Box<dyn Write + Send>), None),
                    Err(e) => {
                        let message = format!(
                            "failed to open {} in append mode, not writing to file: {}",
                            label, e
                        );
                        (label, None, Some(message))
                    }
                }
            }
        };

        let logger = Logger::assemble(
            &self.config.level,
            &self.config.format,
            &self.config.context,
            self.ui,
            file,
            label,
            self.colorize,
        );
        if let Some(message) = open_error {
            logger.report(&message);
        }
        logger
    }
}
