//! Structured log records and the flush buffer

use super::error::LoggerResult;
use super::format::OutputFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// One buffered entry awaiting flush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub context: String,
    pub level: String,
    pub time: DateTime<Utc>,
    pub message: Value,
}

impl LogRecord {
    pub fn new(level: &str, context: &str, message: impl Into<Value>) -> Self {
        Self {
            context: context.to_string(),
            level: level.to_string(),
            time: Utc::now(),
            message: message.into(),
        }
    }

    /// Compact JSON form of a single record
    pub fn to_json(&self) -> LoggerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match &self.message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        write!(
            f,
            "Context: {}, Level: {}, Time: {}, Msg: {}",
            self.context,
            self.level,
            self.time.to_rfc3339(),
            message
        )
    }
}

/// Records in call order, serialized as one JSON array on flush
#[derive(Debug, Default)]
pub(crate) struct RecordBuffer {
    records: Vec<LogRecord>,
}

impl RecordBuffer {
    pub(crate) fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Serialize every buffered record: indented for `Pretty`, compact otherwise
    pub(crate) fn serialize(&self, format: OutputFormat) -> LoggerResult<String> {
        match format {
            OutputFormat::Pretty => serialize_pretty(&self.records),
            OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string(&self.records)?),
        }
    }
}

fn serialize_pretty<T: Serialize + ?Sized>(value: &T) -> LoggerResult<String> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Parse a stream of back-to-back flushed arrays into one ordered list of records
pub fn parse_flushed(input: &str) -> LoggerResult<Vec<LogRecord>> {
    let mut records = Vec::new();
    for batch in serde_json::Deserializer::from_str(input).into_iter::<Vec<LogRecord>>() {
        records.extend(batch?);
    }
    Ok(records)
}
