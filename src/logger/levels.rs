/// Log level definitions and the fixed severity table
///
/// Ranks grow with verbosity (Nil < Crit < Error < Warn < Info < Debug).
/// A call is emitted when its rank is less than or equal to the threshold rank.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Nil = 0,   // Swallowed by the console, never shown
    Crit = 1,  // Unrecoverable failures
    Error = 2, // Failures the caller must see
    Warn = 3,  // Degraded but continuing
    Info = 4,  // Standard operational messages (default threshold)
    Debug = 5, // Detailed diagnostics
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Crit,
        LogLevel::Nil,
    ];

    /// Get string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Crit => "CRIT",
            LogLevel::Nil => "NIL",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Parse from string (case-insensitive). Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            "CRIT" => Some(LogLevel::Crit),
            "NIL" => Some(LogLevel::Nil),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a level name to its canonical (upper-cased) name and rank.
///
/// Never fails: unknown names resolve to rank 0, the same rank as `NIL`. A mistyped
/// threshold therefore silences everything except rank-0 calls instead of erroring.
pub fn lookup_level(name: &str) -> (String, u8) {
    let canonical = name.trim().to_uppercase();
    let rank = LogLevel::parse(&canonical).map_or(0, |level| level.rank());
    (canonical, rank)
}
