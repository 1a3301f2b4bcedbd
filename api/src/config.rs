use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins allowed to call the relay from a browser. Empty means any
    /// `http://localhost:*` origin.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ServerConfigError::InvalidPort(value))?,
            None => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let allowed_origins: Vec<String> = lookup("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if allowed_origins.is_empty() {
            info!("ALLOWED_ORIGINS not set, allowing http://localhost origins");
        }

        Ok(Self {
            port,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_origins_are_split_and_trimmed() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_string()),
            "ALLOWED_ORIGINS" => {
                Some(" https://example.com/ ,https://www.example.com,, ".to_string())
            }
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["https://example.com", "https://www.example.com"]
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "70000".to_string()))
            .unwrap_err();
        assert_eq!(err, ServerConfigError::InvalidPort("70000".to_string()));
    }
}
