use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.saajra.com/api/v1";
pub const DEFAULT_ASSET_BASE_URL: &str = "https://api.saajra.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: '{value}'")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Backend endpoints the client talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Root of the REST API, e.g. `https://host/api/v1`
    pub api_base_url: String,
    /// Host that relative property image paths are appended to
    pub asset_base_url: String,
    /// `None` leaves requests without a deadline
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    /// Point both the API and asset hosts at one server root.
    pub fn for_host(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            api_base_url: format!("{root}/api/v1"),
            asset_base_url: root.to_string(),
            request_timeout: None,
        }
    }
}

/// Process-wide settings resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = url_var(&lookup, "REALTY_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let asset_base_url = url_var(&lookup, "REALTY_ASSET_BASE_URL", DEFAULT_ASSET_BASE_URL)?;

        let request_timeout = match lookup("REALTY_REQUEST_TIMEOUT_SECS") {
            Some(value) if !value.trim().is_empty() => {
                let secs = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                    name: "REALTY_REQUEST_TIMEOUT_SECS",
                    value: value.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let log_level = lookup("REALTY_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api: ApiConfig {
                api_base_url,
                asset_base_url,
                request_timeout,
            },
            log_level,
        })
    }
}

fn url_var<F>(lookup: &F, name: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.clone(),
        source,
    })?;
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_builtin_hosts() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("defaults load");
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn overrides_strip_trailing_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("REALTY_API_BASE_URL", "http://localhost:5002/api/v1/"),
            ("REALTY_REQUEST_TIMEOUT_SECS", "15"),
        ]))
        .expect("overrides load");

        assert_eq!(config.api.api_base_url, "http://localhost:5002/api/v1");
        assert_eq!(config.api.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("REALTY_API_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("REALTY_REQUEST_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn host_config_shares_root() {
        let config = ApiConfig::for_host("http://127.0.0.1:4000/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:4000/api/v1");
        assert_eq!(config.asset_base_url, "http://127.0.0.1:4000");
    }
}
