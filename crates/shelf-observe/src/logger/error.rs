use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("invalid log format '{0}' (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("journald output requires linux and the `journald` feature")]
    JournaldNotSupported,
    #[error("a global logger is already installed")]
    AlreadyInitialized,
    #[error("failed to install logger: {0}")]
    InitializationFailed(String),
}
