use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Context underflow: the root context cannot be removed")] ContextUnderflow,

    #[error("Serialization error: {0}")] Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")] Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")] Config(#[from] toml::de::Error),

    #[error("Global logger already initialized")] AlreadyInitialized,

    #[error("Another log backend is already installed")] LogBackendAlreadySet,
}

pub type LoggerResult<T> = Result<T, LoggerError>;
