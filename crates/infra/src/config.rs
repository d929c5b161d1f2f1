use secrecy::SecretBox;
use std::{fmt::Display, str::FromStr, sync::Arc};
use tracing::warn;

const DEFAULT_PORT: usize = 5000;
/// 5 minutes
const DEFAULT_REMINDER_INTERVAL_MILLIS: u64 = 1000 * 60 * 5;
const DEFAULT_MAIL_FROM_NAME: &str = "PulseBridge";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminder sweep runs.
    /// Reminder windows are hours wide so a few minutes of delay is fine.
    pub reminder_interval_millis: u64,
    /// Outgoing mail transport settings
    pub mail: Arc<MailConfig>,
}

impl Config {
    pub fn new() -> Self {
        let port = parse_setting("PORT", std::env::var("PORT").ok(), DEFAULT_PORT);
        let reminder_interval_millis = parse_setting(
            "REMINDER_INTERVAL_MS",
            std::env::var("REMINDER_INTERVAL_MS").ok(),
            DEFAULT_REMINDER_INTERVAL_MILLIS,
        );
        // The timer cannot tick with a zero period
        let reminder_interval_millis = if reminder_interval_millis == 0 {
            warn!(
                "REMINDER_INTERVAL_MS must be positive, falling back to the default: {}.",
                DEFAULT_REMINDER_INTERVAL_MILLIS
            );
            DEFAULT_REMINDER_INTERVAL_MILLIS
        } else {
            reminder_interval_millis
        };

        Self {
            port,
            reminder_interval_millis,
            mail: Arc::new(MailConfig::from_env()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// SMTP settings. Real delivery is only enabled when host, port and
/// username are all present, otherwise outgoing mails are logged.
#[derive(Debug)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretBox<String>,
    /// Display name used in the `From` header
    pub from_name: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        let port = match std::env::var("SMTP_PORT") {
            Ok(port) if !port.trim().is_empty() => parse_setting("SMTP_PORT", Some(port), 0),
            _ => 0,
        };
        let from_name = match std::env::var("MAIL_FROM_NAME") {
            Ok(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_MAIL_FROM_NAME.into(),
        };

        Self {
            host: var("SMTP_HOST"),
            port,
            username: var("SMTP_USER"),
            password: SecretBox::new(Box::new(var("SMTP_PASS"))),
            from_name,
        }
    }

    /// Mail config that never delivers anything
    pub fn unconfigured() -> Self {
        Self {
            host: String::new(),
            port: 0,
            username: String::new(),
            password: SecretBox::new(Box::new(String::new())),
            from_name: DEFAULT_MAIL_FROM_NAME.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && self.port > 0 && !self.username.trim().is_empty()
    }
}

fn parse_setting<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    match value {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
    }
}
