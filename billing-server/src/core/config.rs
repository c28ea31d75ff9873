use crate::pricing::InputPolicy;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Billing server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BIND_ADDR | 0.0.0.0 | listen address |
/// | HTTP_PORT | 3030 | HTTP API port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | default filter when `RUST_LOG` is unset |
/// | LOG_JSON | true in production | JSON log lines |
/// | LOG_DIR | (unset) | enables daily rotating log files |
/// | INPUT_POLICY | strict | `strict` rejects unreadable numbers, `lenient` zeroes them |
///
/// Unparsable values fall back to the default.
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 INPUT_POLICY=lenient cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// How numeric input that is not a finite number is handled
    pub input_policy: InputPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        Self {
            bind_addr: lookup("BIND_ADDR")
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3030),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
            input_policy: lookup("INPUT_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            environment,
        }
    }

    /// Built-in defaults with the given port and input policy
    ///
    /// Ignores the process environment; mostly used by tests
    pub fn with_overrides(http_port: u16, input_policy: InputPolicy) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.http_port = http_port;
        config.input_policy = input_policy;
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
