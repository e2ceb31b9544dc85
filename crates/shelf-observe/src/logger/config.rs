use super::{format::LoggerFormat, level::LoggerLevel};

/// Logger settings, usually filled from the environment by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Print the module path of each record.
    pub with_targets: bool,
    /// ANSI colours; only honoured by the text format.
    pub use_color: bool,
}

impl LoggerConfig {
    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LoggerLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: atty::is(atty::Stream::Stdout),
        }
    }
}
