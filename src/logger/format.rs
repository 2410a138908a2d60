//! Output modes, level coloring and line formatting
//!
//! Handles:
//! - The closed set of output modes (text, compact JSON, indented JSON)
//! - Level coloring as a pure function injected into the sink
//! - Console/file prefixes for text mode

use colored::*;

/// Output discipline selected for a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Immediate `[LEVEL:context] message` lines
    #[default]
    Text,
    /// Buffered records, flushed as one compact JSON array
    Json,
    /// Buffered records, flushed as one indented JSON array
    Pretty,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive). Unrecognized names fall back to `Text`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "JSON" => OutputFormat::Json,
            "PRETTY" => OutputFormat::Pretty,
            _ => OutputFormat::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
        }
    }

    /// Whether calls are buffered until `flush` instead of written immediately
    pub fn is_structured(&self) -> bool {
        match self {
            OutputFormat::Text => false,
            OutputFormat::Json | OutputFormat::Pretty => true,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Styles a level label for console display
pub type Colorizer = fn(&str) -> String;

/// Format a level label with its console color
pub fn color_for_level(level: &str) -> String {
    match level.to_uppercase().as_str() {
        "DEBUG" => level.cyan().to_string(),
        "ERROR" => level.red().bold().to_string(),
        "INFO" => level.green().to_string(),
        "WARN" => level.yellow().to_string(),
        _ => level.to_string(),
    }
}

/// Leave a level label unstyled
pub fn plain_level(level: &str) -> String {
    level.to_string()
}

/// Build the `[LEVEL:context] ` prefix
pub fn text_prefix(level: &str, context: &str, colorize: Colorizer) -> String {
    format!("[{}:{}] ", colorize(level), context)
}

/// Drop trailing line terminators so every message occupies a single line
pub fn trim_line(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("pretty"), OutputFormat::Pretty);
        assert_eq!(OutputFormat::parse("Text"), OutputFormat::Text);
    }

    #[test]
    fn test_unknown_format_defaults_to_text() {
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse(""), OutputFormat::Text);
        assert!(!OutputFormat::Text.is_structured());
        assert!(OutputFormat::Pretty.is_structured());
    }

    #[test]
    fn test_plain_prefix() {
        assert_eq!(text_prefix("WARN", "ec2>tag", plain_level), "[WARN:ec2>tag] ");
    }

    #[test]
    fn test_colored_label_keeps_level_text() {
        for level in ["DEBUG", "INFO", "WARN", "ERROR", "CRIT", "NIL"] {
            assert!(color_for_level(level).contains(level));
        }
        assert_eq!(color_for_level("CRIT"), "CRIT");
    }

    #[test]
    fn test_trim_line() {
        assert_eq!(trim_line("debug test zero=0\n"), "debug test zero=0");
        assert_eq!(trim_line("a\r\n\n"), "a");
        assert_eq!(trim_line("a\nb"), "a\nb");
    }
}
