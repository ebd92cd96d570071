use std::net::SocketAddr;

pub const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
/// Catalog exports are a few hundred MB at most
pub const DEFAULT_BODY_LIMIT: usize = 512 * 1024 * 1024;

pub const ADDR_VAR: &str = "CATALOG_ADDR";
pub const BODY_LIMIT_VAR: &str = "CATALOG_BODY_LIMIT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a socket address like 127.0.0.1:8080, got '{value}'")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be a byte count, got '{value}'")]
    InvalidBodyLimit { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    /// Maximum upload size in bytes
    pub body_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(BODY_LIMIT_VAR) {
            config.body_limit = value.trim().parse().map_err(|_| ConfigError::InvalidBodyLimit {
                var: BODY_LIMIT_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:9000"),
            (BODY_LIMIT_VAR, "1024"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.body_limit, 1024);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(BODY_LIMIT_VAR, "1GB")])),
            Err(ConfigError::InvalidBodyLimit { .. })
        ));
    }
}
