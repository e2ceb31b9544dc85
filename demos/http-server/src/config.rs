use std::env;

use anyhow::{Context, Result};
use shelf_api::ServerConfig;
use shelf_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Runtime settings read from `SHELF_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logger: LoggerConfig,
    /// Insert a few sample records at startup.
    pub seed: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut server = ServerConfig::default();
        if let Some(host) = get("SHELF_HOST") {
            server.host = host;
        }
        if let Some(port) = get("SHELF_PORT") {
            server.port = port
                .trim()
                .parse()
                .with_context(|| format!("SHELF_PORT must be a port number, got '{port}'"))?;
        }
        server.base_url = get("SHELF_BASE_URL");

        let mut logger = LoggerConfig::default();
        if let Some(level) = get("SHELF_LOG_LEVEL") {
            logger.level = LoggerLevel::new(level).context("SHELF_LOG_LEVEL")?;
        }
        if let Some(format) = get("SHELF_LOG_FORMAT") {
            logger.format = format.parse::<LoggerFormat>().context("SHELF_LOG_FORMAT")?;
        }

        let seed = get("SHELF_SEED").is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

        Ok(Self {
            server,
            logger,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.server, ServerConfig::default());
        assert_eq!(cfg.logger.format, LoggerFormat::Text);
        assert!(!cfg.seed);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SHELF_HOST", "127.0.0.1"),
            ("SHELF_PORT", "9000"),
            ("SHELF_BASE_URL", "https://shelf.example.com"),
            ("SHELF_LOG_LEVEL", "debug"),
            ("SHELF_LOG_FORMAT", "json"),
            ("SHELF_SEED", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.socket_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.server.public_base_url(), "https://shelf.example.com");
        assert_eq!(cfg.logger.level.as_str(), "debug");
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert!(cfg.seed);
    }

    #[test]
    fn bad_port_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("SHELF_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SHELF_PORT"));
    }
}
