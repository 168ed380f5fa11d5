use std::{env, time};

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use url::{ParseError, Url};

use crate::domain::EmailAddress;

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
}

impl Settings {
    /// Get settings from configuration files and the environment
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        // Read the configuration from files and environment variables
        Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(env.as_str())).required(true))
            // Environment variables (e.g., `RELAY__APPLICATION__APP_PORT=8888`
            // would set Settings.application.app_port to 8888)
            .add_source(Environment::with_prefix("RELAY").separator("__"))
            // Hosting platforms hand out the listening port through `PORT`
            .set_override_option("application.app_port", env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }
}

/// Application settings
#[derive(Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
    pub allowed_origin: String,
}

impl ApplicationSettings {
    /// Normalize the front-end origin allowed to call the API (scheme, host and port only)
    pub fn allowed_origin(&self) -> Result<String, ParseError> {
        Url::parse(&self.allowed_origin).map(|url| url.origin().ascii_serialization())
    }
}

/// Outbound email transports
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Api,
    Smtp,
}

/// Email settings
#[derive(Clone, serde::Deserialize)]
pub struct EmailSettings {
    pub transport: TransportKind,
    pub sender_email: String,
    pub recipient_email: String,
    pub timeout_millis: u64,
    pub api: ApiSettings,
    pub smtp: SmtpSettings,
}

impl EmailSettings {
    /// Parse sender email
    pub fn sender_email(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    /// Parse the operator inbox that receives contact submissions
    pub fn recipient_email(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.recipient_email.clone())
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Transactional email API settings
#[derive(Clone, serde::Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub authorization_token: SecretString,
}

impl ApiSettings {
    /// Parse base URL
    pub fn base_url(&self) -> Result<Url, ParseError> {
        Url::parse(&self.base_url)
    }
}

/// SMTP relay settings
#[derive(Clone, serde::Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Available runtime environments
#[derive(Debug)]
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
