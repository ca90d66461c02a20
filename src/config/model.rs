use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

pub const EVENTS_ENDPOINT_VAR: &str = "EVENTS_SERVICE_ENDPOINT";
pub const EVENTS_ACCOUNT_VAR: &str = "EVENTS_GLOBAL_ACCOUNT_NAME";
pub const EVENTS_API_KEY_VAR: &str = "EVENTS_API_KEY";
pub const CONTROLLER_HOST_VAR: &str = "CONTROLLER_HOST";
pub const CONTROLLER_PORT_VAR: &str = "CONTROLLER_PORT";
pub const CONTROLLER_ADMIN_VAR: &str = "CONTROLLER_ADMIN_USER";
pub const CONTROLLER_ACCOUNT_VAR: &str = "CONTROLLER_ACCOUNT";
pub const CONTROLLER_PASSWORD_VAR: &str = "CONTROLLER_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Destination configuration for the events service. Validated at
/// construction so a missing credential fails before any request is built.
#[derive(Clone)]
pub struct EventsConfig {
    pub endpoint: String,
    pub account_name: String,
    pub api_key: String,
    pub schema_name: String,
}

impl EventsConfig {
    pub fn new(
        endpoint: impl Into<String>,
        account_name: impl Into<String>,
        api_key: impl Into<String>,
        schema_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            endpoint: endpoint.into(),
            account_name: account_name.into(),
            api_key: api_key.into(),
            schema_name: schema_name.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from the environment for the given schema name.
    pub fn from_env(schema_name: &str) -> Result<Self, ConfigError> {
        Self::new(
            require(EVENTS_ENDPOINT_VAR)?,
            require(EVENTS_ACCOUNT_VAR)?,
            require(EVENTS_API_KEY_VAR)?,
            schema_name,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_empty(&self.endpoint, EVENTS_ENDPOINT_VAR)?;
        non_empty(&self.account_name, EVENTS_ACCOUNT_VAR)?;
        non_empty(&self.api_key, EVENTS_API_KEY_VAR)?;
        if self.schema_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "schema name",
                reason: "must not be empty".to_string(),
            });
        }
        Url::parse(&self.endpoint).map_err(|e| ConfigError::Invalid {
            var: EVENTS_ENDPOINT_VAR,
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

// The API key is a credential and must never reach the logs.
impl fmt::Debug for EventsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventsConfig")
            .field("endpoint", &self.endpoint)
            .field("account_name", &self.account_name)
            .field("api_key", &"<redacted>")
            .field("schema_name", &self.schema_name)
            .finish()
    }
}

/// Connection settings for the controller REST API.
#[derive(Clone)]
pub struct ControllerConfig {
    pub host: String,
    pub port: u16,
    pub admin_user: String,
    pub account: String,
    pub password: String,
}

impl ControllerConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        admin_user: impl Into<String>,
        account: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            host: host.into(),
            port,
            admin_user: admin_user.into(),
            account: account.into(),
            password: password.into(),
        };
        non_empty(&config.host, CONTROLLER_HOST_VAR)?;
        non_empty(&config.admin_user, CONTROLLER_ADMIN_VAR)?;
        non_empty(&config.account, CONTROLLER_ACCOUNT_VAR)?;
        non_empty(&config.password, CONTROLLER_PASSWORD_VAR)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let port = require(CONTROLLER_PORT_VAR)?;
        let port: u16 = port.parse().map_err(|_| ConfigError::Invalid {
            var: CONTROLLER_PORT_VAR,
            reason: format!("not a valid port number: {port}"),
        })?;
        Self::new(
            require(CONTROLLER_HOST_VAR)?,
            port,
            require(CONTROLLER_ADMIN_VAR)?,
            require(CONTROLLER_ACCOUNT_VAR)?,
            require(CONTROLLER_PASSWORD_VAR)?,
        )
    }

    /// Basic-auth username in the controller's `user@account` form.
    pub fn auth_user(&self) -> String {
        format!("{}@{}", self.admin_user, self.account)
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("admin_user", &self.admin_user)
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn non_empty(value: &str, var: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingVar(var))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn events_config_accepts_complete_values() {
        let config = EventsConfig::new("https://events.example.com", "acct", "key", "sch")
            .expect("complete config must validate");
        assert_eq!(config.endpoint, "https://events.example.com");
        assert_eq!(config.schema_name, "sch");
    }

    #[test]
    fn events_config_rejects_missing_key() {
        let err = EventsConfig::new("https://events.example.com", "acct", "", "sch").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(EVENTS_API_KEY_VAR)));
    }

    #[test]
    fn events_config_rejects_bad_endpoint() {
        let err = EventsConfig::new("not-an-endpoint", "acct", "key", "sch").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: EVENTS_ENDPOINT_VAR,
                ..
            }
        ));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let events = EventsConfig::new("https://events.example.com", "acct", "s3cret", "sch")
            .expect("valid config");
        let printed = format!("{events:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));

        let controller =
            ControllerConfig::new("controller.example.com", 8090, "admin", "acct", "p4ss")
                .expect("valid config");
        let printed = format!("{controller:?}");
        assert!(!printed.contains("p4ss"));
    }

    #[test]
    fn controller_auth_user_combines_user_and_account() {
        let config = ControllerConfig::new("controller.example.com", 8090, "admin", "acct", "pwd")
            .expect("valid config");
        assert_eq!(config.auth_user(), "admin@acct");
    }
}
