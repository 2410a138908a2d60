//! Nested logical scopes rendered as a `>`-joined prefix
//!
//! The stack is seeded with exactly one segment and can never drop below it.

use super::error::{LoggerError, LoggerResult};

pub const CONTEXT_SEPARATOR: &str = ">";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStack {
    segments: Vec<String>,
}

impl ContextStack {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Remove and return the innermost segment.
    ///
    /// The root segment is never removed; trying to returns `ContextUnderflow`
    /// and leaves the stack untouched.
    pub fn pop(&mut self) -> LoggerResult<String> {
        if self.segments.len() <= 1 {
            return Err(LoggerError::ContextUnderflow);
        }
        self.segments.pop().ok_or(LoggerError::ContextUnderflow)
    }

    pub fn render(&self) -> String {
        self.segments.join(CONTEXT_SEPARATOR)
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
