use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use std::fmt;

pub const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

#[derive(Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub admin_api_key: String,
    pub cors_allowed_origins: CorsOrigins,
    pub log_request_body: bool,
    /// `None` when the provider credentials are incomplete; notifications are
    /// then skipped.
    pub messaging: Option<MessagingConfig>,
    pub support_contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub sms_from: String,
    pub whatsapp_from: Option<String>,
    pub api_base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("database_url", &mask_database_url(&self.database_url))
            .field("database_max_connections", &self.database_max_connections)
            .field("admin_api_key", &mask_secret(&self.admin_api_key))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_request_body", &self.log_request_body)
            .field("messaging", &self.messaging)
            .field("support_contact", &self.support_contact)
            .finish()
    }
}

impl fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"****")
            .field("sms_from", &self.sms_from)
            .field("whatsapp_from", &self.whatsapp_from)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Config {
            server_port: var("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a port number")?,
            database_url: var("DATABASE_URL").context("DATABASE_URL is required")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            admin_api_key: var("ADMIN_API_KEY").context("ADMIN_API_KEY is required")?,
            cors_allowed_origins: parse_cors_origins(
                &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
            )?,
            log_request_body: var("LOG_REQUEST_BODY")
                .map(|value| value.parse::<bool>())
                .transpose()
                .context("LOG_REQUEST_BODY must be true or false")?
                .unwrap_or(false),
            messaging: messaging_config(
                var("TWILIO_ACCOUNT_SID"),
                var("TWILIO_AUTH_TOKEN"),
                var("TWILIO_PHONE_NUMBER"),
                var("TWILIO_WHATSAPP_FROM"),
                var("TWILIO_API_BASE_URL"),
            ),
            support_contact: var("SUPPORT_CONTACT"),
        })
    }
}

/// Replaces the password in a connection URL with `****`.
pub fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("****")).is_ok() {
                parsed.to_string()
            } else {
                url.to_string()
            }
        }
        _ => url.to_string(),
    }
}

/// Keeps at most the first two characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", secret.chars().take(2).collect::<String>())
    }
}

fn messaging_config(
    account_sid: Option<String>,
    auth_token: Option<String>,
    sms_from: Option<String>,
    whatsapp_from: Option<String>,
    api_base_url: Option<String>,
) -> Option<MessagingConfig> {
    match (account_sid, auth_token, sms_from) {
        (Some(account_sid), Some(auth_token), Some(sms_from)) => Some(MessagingConfig {
            account_sid,
            auth_token,
            sms_from,
            whatsapp_from,
            api_base_url: api_base_url.unwrap_or_else(|| DEFAULT_TWILIO_API_BASE_URL.to_string()),
        }),
        (None, None, None) => None,
        _ => {
            tracing::warn!(
                "Twilio credentials are incomplete; TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and \
                 TWILIO_PHONE_NUMBER must all be set. Notifications are disabled"
            );
            None
        }
    }
}

fn parse_cors_origins(raw: &str) -> anyhow::Result<CorsOrigins> {
    let value = raw.trim();
    if value == "*" {
        return Ok(CorsOrigins::Any);
    }

    let origins = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            url::Url::parse(entry)
                .with_context(|| format!("invalid CORS origin '{}'", entry))
                .map(|_| entry.trim_end_matches('/').to_string())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if origins.is_empty() {
        anyhow::bail!("CORS_ALLOWED_ORIGINS must be '*' or a comma-separated list of origins");
    }

    Ok(CorsOrigins::List(origins))
}
