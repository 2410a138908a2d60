//! Leveled, context-scoped logging
//!
//! This module provides one `Logger` type with two output disciplines:
//! - Text: every allowed call is written immediately as `[LEVEL:context] message`
//! - Structured (json/pretty): calls are buffered as records and written as one
//!   JSON array when `flush` is called
//!
//! Output goes to a console UI (or stdout) and, best-effort, to an append-only file.
//!
//! ## Usage
//!
//! ```rust
//! use scopelog::logger::Logger;
//! use scopelog::{infof, warnf};
//!
//! let log = Logger::builder().level("info").context("ec2").build();
//! log.push_context("tag");
//! infof!(log, "tagging {} instances", 3);   // [INFO:ec2>tag] tagging 3 instances
//! let _ = log.pop_context();
//! warnf!(log, "no tags found");             // [WARN:ec2] no tags found
//! ```
//!
//! ## Structured output
//!
//! In json/pretty mode nothing is written until `flush`. Anything still buffered
//! when the process exits is lost, so flush on every exit path:
//! ```rust
//! use scopelog::logger::Logger;
//!
//! let log = Logger::builder().format("json").context("sqs").build();
//! log.info(format_args!("received {} messages", 10));
//! log.flush();
//! ```

mod macros;

mod config;
mod context;
mod core;
mod error;
mod format;
mod global;
mod levels;
mod record;
mod sink;

// Re-export public types
pub use self::config::{LoggerBuilder, LoggerConfig};
pub use self::context::{ContextStack, CONTEXT_SEPARATOR};
pub use self::core::Logger;
pub use self::error::{LoggerError, LoggerResult};
pub use self::format::{color_for_level, plain_level, Colorizer, OutputFormat};
pub use self::global::{global, init_global};
pub use self::levels::{lookup_level, LogLevel};
pub use self::record::{parse_flushed, LogRecord};
pub use self::sink::{open_append, CaptureUi, Channel, ConsoleUi, Ui};
