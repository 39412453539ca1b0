use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub payments: PaymentConfig,
}

/// Static admin credentials and token signing settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
    pub currency: String,
}

impl PaymentConfig {
    /// Both halves of the key pair, or `None` when the gateway is unconfigured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.key_id.as_deref(), self.key_secret.as_deref()) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let expires_in: String = try_load("JWT_EXPIRES_IN", "1d")?;
        let token_ttl = parse_duration(&expires_in).map_err(|reason| ConfigError::Invalid {
            key: "JWT_EXPIRES_IN",
            reason,
        })?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "8080")?,
            auth: AuthConfig {
                admin_email: required("ADMIN_EMAIL")?,
                admin_password: required("ADMIN_PASSWORD")?,
                jwt_secret: required("JWT_SECRET")?,
                token_ttl,
            },
            payments: PaymentConfig {
                key_id: optional("RAZORPAY_KEY_ID"),
                key_secret: optional("RAZORPAY_KEY_SECRET"),
                currency: try_load("PAYMENT_CURRENCY", "INR")?,
            },
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    optional(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

/// Parses token lifetimes such as `3600`, `30m`, `12h` or `7d`.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((idx, _)) => raw.split_at(idx),
        None => (raw, "s"),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("expected a number with optional s/m/h/d suffix, got {raw:?}"))?;

    let unit_secs: u64 = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 60 * 60 * 24,
        other => return Err(format!("unknown duration unit {other:?}")),
    };

    let seconds = value
        .checked_mul(unit_secs)
        .filter(|secs| i64::try_from(*secs).is_ok())
        .ok_or_else(|| format!("duration {raw:?} is too large"))?;

    if seconds == 0 {
        return Err("duration must be positive".to_string());
    }

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("3600"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("30m"), Ok(Duration::from_secs(1800)));
        assert_eq!(parse_duration("12h"), Ok(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("7d"), Ok(Duration::from_secs(604_800)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("d").is_err());
        assert!(parse_duration("10w").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("999999999999999999d").is_err());
        assert!(parse_duration("18446744073709551615").is_err());
    }

    #[test]
    fn test_payment_credentials_need_both_halves() {
        let mut config = PaymentConfig {
            key_id: Some("rzp_test".to_string()),
            key_secret: None,
            currency: "INR".to_string(),
        };
        assert!(config.credentials().is_none());

        config.key_secret = Some("secret".to_string());
        assert_eq!(config.credentials(), Some(("rzp_test", "secret")));
    }
}
