pub mod logger;

pub use logger::{
    init_global, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    OutputFormat, Ui,
};
