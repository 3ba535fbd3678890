use chrono_tz::Tz;

use crate::domain::cooldown::CooldownPolicy;
use crate::domain::types::PhotoUrls;

/// Scanner service configuration loaded from environment variables once at start-up.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `SCANNER_PORT`.
    pub scanner_port: u16,
    /// Minimum minutes between two exits of the same student (default 60).
    /// Env var: `EXIT_LOG_COOLDOWN_MINUTES`.
    pub cooldown_minutes: i64,
    /// IANA zone used for display and local-day boundaries (default `America/Bogota`).
    /// Env var: `SCANNER_TIMEZONE`.
    pub timezone: Tz,
    /// URL prefix under which student photos are served. Env var: `PHOTO_BASE_URL`.
    pub photo_base_url: String,
    /// Placeholder image for students without a photo. Env var: `DEFAULT_AVATAR_URL`.
    pub default_avatar_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

const DEFAULT_PORT: u16 = 3114;
const DEFAULT_COOLDOWN_MINUTES: i64 = 60;
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;
const DEFAULT_PHOTO_BASE_URL: &str = "/static/uploads/photos";
const DEFAULT_AVATAR_URL: &str = "/static/img/avatar.png";

impl ScannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let scanner_port = parse_or("SCANNER_PORT", get("SCANNER_PORT"), DEFAULT_PORT)?;
        let cooldown_minutes = parse_or(
            "EXIT_LOG_COOLDOWN_MINUTES",
            get("EXIT_LOG_COOLDOWN_MINUTES"),
            DEFAULT_COOLDOWN_MINUTES,
        )?;
        if cooldown_minutes < 0 {
            return Err(ConfigError::Invalid {
                name: "EXIT_LOG_COOLDOWN_MINUTES",
                value: cooldown_minutes.to_string(),
            });
        }
        let timezone = parse_or("SCANNER_TIMEZONE", get("SCANNER_TIMEZONE"), DEFAULT_TIMEZONE)?;

        Ok(Self {
            database_url,
            scanner_port,
            cooldown_minutes,
            timezone,
            photo_base_url: get("PHOTO_BASE_URL").unwrap_or_else(|| DEFAULT_PHOTO_BASE_URL.into()),
            default_avatar_url: get("DEFAULT_AVATAR_URL")
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.into()),
        })
    }

    pub fn cooldown_policy(&self) -> CooldownPolicy {
        CooldownPolicy::from_minutes(self.cooldown_minutes)
    }

    pub fn photo_urls(&self) -> PhotoUrls {
        PhotoUrls {
            base_url: self.photo_base_url.clone(),
            default_avatar_url: self.default_avatar_url.clone(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
