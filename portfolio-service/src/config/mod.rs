//! Service configuration.

use config::{Config as Cfg, File};
use serde::Deserialize;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Hours of inactivity before a session expires.
    #[serde(default = "default_idle_hours")]
    pub idle_hours: i64,
    /// Mark the session cookie Secure. On behind TLS, off for local dev.
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_idle_hours() -> i64 {
    24
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_hours: default_idle_hours(),
            secure_cookies: false,
        }
    }
}

/// Credentials the owner account is bootstrapped from at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct OwnerConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BillingPolicyConfig {
    /// Reject receipts whose amount paid exceeds the computed total. Off by
    /// default: overpayment is logged and accepted.
    #[serde(default)]
    pub reject_overpayment: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_email: String,
    pub to_email: String,
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub common: CoreConfig,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub owner: OwnerConfig,
    #[serde(default)]
    pub billing: BillingPolicyConfig,
    /// Contact-form delivery; without it the contact endpoint reports email
    /// as unconfigured.
    pub smtp: Option<SmtpConfig>,
}

fn default_service_name() -> String {
    "portfolio-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PortfolioConfig {
    /// Layered load: optional `configuration` file, then `APP__`-prefixed
    /// environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
