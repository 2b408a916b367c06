#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::model::LogFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MuError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_APPLICATION_GRAPH: &str = "http://mu.semte.ch/application";
pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://database:8890/sparql";
pub const DEFAULT_LOG_DIR: &str = "/logs";

/// Service configuration read from the mu environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct MuConfig {
    pub application_graph: String,
    pub sparql_endpoint: String,
    pub sparql_updatepoint: String,
    pub sparql_timeout: Option<Duration>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub log_format: LogFormat,
}

impl Default for MuConfig {
    fn default() -> Self {
        Self {
            application_graph: DEFAULT_APPLICATION_GRAPH.to_string(),
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            sparql_updatepoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            sparql_timeout: None,
            log_level: None,
            log_dir: Some(DEFAULT_LOG_DIR.to_string()),
            log_format: LogFormat::Compact,
        }
    }
}

impl MuConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 從任意來源讀取變數 (測試時不必改動行程環境)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sparql_endpoint = lookup("MU_SPARQL_ENDPOINT").unwrap_or(defaults.sparql_endpoint);
        let sparql_updatepoint =
            lookup("MU_SPARQL_UPDATEPOINT").unwrap_or_else(|| sparql_endpoint.clone());

        let sparql_timeout = match lookup("MU_SPARQL_TIMEOUT") {
            Some(raw) if !raw.trim().is_empty() => {
                let seconds: u64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| MuError::InvalidConfigValueError {
                            field: "MU_SPARQL_TIMEOUT".to_string(),
                            value: raw.clone(),
                            reason: "Timeout must be a whole number of seconds".to_string(),
                        })?;
                validate_positive_number("MU_SPARQL_TIMEOUT", seconds, 1)?;
                Some(Duration::from_secs(seconds))
            }
            _ => None,
        };

        // 空字串代表停用檔案日誌
        let log_dir = match lookup("LOG_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(dir),
            None => defaults.log_dir,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw).ok_or_else(|| MuError::InvalidConfigValueError {
                field: "LOG_FORMAT".to_string(),
                value: raw.clone(),
                reason: "Valid formats: compact, json".to_string(),
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            application_graph: lookup("MU_APPLICATION_GRAPH").unwrap_or(defaults.application_graph),
            sparql_endpoint,
            sparql_updatepoint,
            sparql_timeout,
            log_level: lookup("LOG_LEVEL"),
            log_dir,
            log_format,
        })
    }
}

impl Validate for MuConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("MU_APPLICATION_GRAPH", &self.application_graph)?;
        validate_url("MU_SPARQL_ENDPOINT", &self.sparql_endpoint)?;
        validate_url("MU_SPARQL_UPDATEPOINT", &self.sparql_updatepoint)?;

        if let Some(timeout) = self.sparql_timeout {
            validate_positive_number("MU_SPARQL_TIMEOUT", timeout.as_secs(), 1)?;
        }

        if let Some(dir) = &self.log_dir {
            validate_path("LOG_DIR", dir)?;
        }

        Ok(())
    }
}

impl ConfigProvider for MuConfig {
    fn application_graph(&self) -> &str {
        &self.application_graph
    }

    fn query_endpoint(&self) -> &str {
        &self.sparql_endpoint
    }

    fn update_endpoint(&self) -> &str {
        &self.sparql_updatepoint
    }

    fn timeout(&self) -> Option<Duration> {
        self.sparql_timeout
    }

    fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    fn log_dir(&self) -> Option<&str> {
        self.log_dir.as_deref()
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = MuConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, MuConfig::default());
        assert_eq!(config.update_endpoint(), DEFAULT_SPARQL_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = MuConfig::from_lookup(lookup_from(&[
            ("MU_APPLICATION_GRAPH", "http://mu.semte.ch/graphs/public"),
            ("MU_SPARQL_ENDPOINT", "http://virtuoso:8890/sparql"),
            ("MU_SPARQL_UPDATEPOINT", "http://authorization/sparql"),
            ("MU_SPARQL_TIMEOUT", "60"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_DIR", ""),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.application_graph(), "http://mu.semte.ch/graphs/public");
        assert_eq!(config.query_endpoint(), "http://virtuoso:8890/sparql");
        assert_eq!(config.update_endpoint(), "http://authorization/sparql");
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.log_level(), Some("DEBUG"));
        assert_eq!(config.log_dir(), None);
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_updatepoint_falls_back_to_endpoint() {
        let config = MuConfig::from_lookup(lookup_from(&[(
            "MU_SPARQL_ENDPOINT",
            "http://triplestore:8890/sparql",
        )]))
        .unwrap();

        assert_eq!(config.update_endpoint(), "http://triplestore:8890/sparql");
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let not_a_number = MuConfig::from_lookup(lookup_from(&[("MU_SPARQL_TIMEOUT", "soon")]));
        assert!(matches!(
            not_a_number,
            Err(MuError::InvalidConfigValueError { ref field, .. }) if field == "MU_SPARQL_TIMEOUT"
        ));

        let zero = MuConfig::from_lookup(lookup_from(&[("MU_SPARQL_TIMEOUT", "0")]));
        assert!(zero.is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let config = MuConfig {
            sparql_endpoint: "database:8890".to_string(),
            ..MuConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
