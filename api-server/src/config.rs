//! Server configuration read from the environment.

use std::fmt;

use repo_core::client::DEFAULT_API_URL;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub port: u16,
    pub github_api_url: String,
    pub github_access_token: String,
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn new(addr: String, port: u16) -> Self {
        Self {
            addr,
            port,
            github_api_url: DEFAULT_API_URL.to_string(),
            github_access_token: String::new(),
            json_logs: false,
        }
    }

    /// Load from process environment variables. Call `crate::init_env` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// Recognized keys: `SERVER_ADDR`, `PORT`, `GITHUB_API_URL`,
    /// `GITHUB_ACCESS_TOKEN`, `LOG_FORMAT` (`json` enables JSON logs).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::new("127.0.0.1".to_string(), 3000);
        if let Some(addr) = lookup("SERVER_ADDR") {
            cfg.addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            cfg.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(url) = lookup("GITHUB_API_URL") {
            cfg.github_api_url = url;
        }
        if let Some(token) = lookup("GITHUB_ACCESS_TOKEN") {
            cfg.github_access_token = token;
        }
        cfg.json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

// Hand-written so the access token never reaches a log line.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("addr", &self.addr)
            .field("port", &self.port)
            .field("github_api_url", &self.github_api_url)
            .field("github_access_token", &"<redacted>")
            .field("json_logs", &self.json_logs)
            .finish()
    }
}
