use std::env;
use std::time::Duration;

use anyhow::Context as _;

use warden_engine::{DEFAULT_GATEWAY_TIMEOUT, DEFAULT_MAX_WARNINGS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Redis,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Process configuration, read once at startup from the environment
/// (after `.env` has been loaded).
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub database_url: String,
    pub guild_id: u64,
    pub database_max_connections: u32,
    pub redis_enabled: bool,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub warning_store: StoreBackend,
    pub max_warnings: u64,
    pub gateway_timeout: Duration,
    pub auto_run_migrations: bool,
    pub welcome_enabled: bool,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let warning_store = match lookup("WARNING_STORE") {
            Some(raw) => StoreBackend::parse(&raw)
                .with_context(|| format!("unknown WARNING_STORE `{raw}`"))?,
            None => StoreBackend::Postgres,
        };

        Ok(Self {
            token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            guild_id: required("DISCORD_GUILD_ID")?
                .parse()
                .context("DISCORD_GUILD_ID must be a numeric id")?,
            database_max_connections: parse_u64(lookup("DATABASE_MAX_CONNECTIONS"), 5)
                .try_into()
                .unwrap_or(5),
            redis_enabled: parse_bool(lookup("REDIS_ENABLED"), false),
            redis_url: lookup("REDIS_URL").filter(|value| !value.trim().is_empty()),
            redis_key_prefix: lookup("REDIS_KEY_PREFIX")
                .unwrap_or_else(|| "warden:prod".to_owned()),
            warning_store,
            max_warnings: parse_u64(lookup("MAX_WARNINGS"), DEFAULT_MAX_WARNINGS).max(1),
            gateway_timeout: Duration::from_secs(
                parse_u64(
                    lookup("GATEWAY_TIMEOUT_SECONDS"),
                    DEFAULT_GATEWAY_TIMEOUT.as_secs(),
                )
                .max(1),
            ),
            auto_run_migrations: parse_bool(lookup("AUTO_RUN_MIGRATIONS"), true),
            welcome_enabled: parse_bool(lookup("WELCOME_ENABLED"), true),
        })
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
