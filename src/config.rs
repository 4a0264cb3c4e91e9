use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,

    /// Suffix every tutor/AC email must carry, e.g. `@srec.ac.in`
    pub institution_email_domain: String,

    pub admin_username: String,
    /// Admin login is disabled when unset
    pub admin_password: Option<String>,

    pub twilio: Option<TwilioOptions>,

    /// Recipient of contact-form messages
    pub admin_email: String,
    pub smtp: Option<SmtpOptions>,
}

#[derive(Clone, Debug)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// STARTTLS relay used for contact-form mail; the username is also the sender.
#[derive(Clone, Debug)]
pub struct SmtpOptions {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .parse()
        .with_context(|| format!("{key} must be a number"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let twilio = match (
            env::var("TWILIO_ACCOUNT_SID"),
            env::var("TWILIO_AUTH_TOKEN"),
            env::var("TWILIO_PHONE_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(from_number)) => Some(TwilioOptions {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };

        let smtp = match (env::var("EMAIL_ADDRESS"), env::var("EMAIL_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(SmtpOptions {
                server: var_or("SMTP_SERVER", "smtp.gmail.com"),
                port: parse_or("SMTP_PORT", "587")?,
                username,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            database_url: var_or("DATABASE_URL", "sqlite://leave.db?mode=rwc"),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_ttl: parse_or("ACCESS_TOKEN_TTL", "900")?, // default 15 min

            rate_login_per_min: parse_or("RATE_LOGIN_PER_MIN", "60")?,
            rate_register_per_min: parse_or("RATE_REGISTER_PER_MIN", "30")?,
            rate_protected_per_min: parse_or("RATE_PROTECTED_PER_MIN", "1000")?,

            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),
            institution_email_domain: var_or("INSTITUTION_EMAIL_DOMAIN", "@srec.ac.in"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            twilio,
            admin_email: var_or("ADMIN_EMAIL", "admin@srec.ac.in"),
            smtp,
        })
    }

    /// Configuration used by unit tests: in-memory database, no SMS or mail transport.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            access_token_ttl: 900,
            rate_login_per_min: 1000,
            rate_register_per_min: 1000,
            rate_protected_per_min: 1000,
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            institution_email_domain: "@srec.ac.in".to_string(),
            admin_username: "admin".to_string(),
            admin_password: Some("Admin@123".to_string()),
            twilio: None,
            admin_email: "admin@srec.ac.in".to_string(),
            smtp: None,
        }
    }
}
