use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

use chirpy_db::DEFAULT_REFRESH_TTL_HOURS;

const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

/// Startup configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub polka_key: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub fileroot: PathBuf,
    pub refresh_ttl: chrono::Duration,
    /// Wipe the document before serving.
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let debug = std::env::args().skip(1).any(|a| a == "--debug");
        Self::from_lookup(|key| std::env::var(key).ok(), debug)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug: bool,
    ) -> anyhow::Result<Self> {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("JWT_SECRET is unset or still a placeholder");
        }

        let polka_key = lookup("POLKA_KEY").unwrap_or_default();
        if polka_key.is_empty() {
            bail!("POLKA_KEY is unset");
        }

        let db_path = lookup("CHIRPY_DB_PATH").unwrap_or_else(|| "database.json".into());
        let host = lookup("CHIRPY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("CHIRPY_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("CHIRPY_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", host, port))?;
        let fileroot = lookup("CHIRPY_FILEROOT").unwrap_or_else(|| ".".into());

        let refresh_hours: i64 = match lookup("CHIRPY_REFRESH_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .context("CHIRPY_REFRESH_TTL_HOURS must be a whole number of hours")?,
            None => DEFAULT_REFRESH_TTL_HOURS,
        };
        if refresh_hours <= 0 {
            bail!("CHIRPY_REFRESH_TTL_HOURS must be positive");
        }

        Ok(Self {
            jwt_secret,
            polka_key,
            db_path: PathBuf::from(db_path),
            addr,
            fileroot: PathBuf::from(fileroot),
            refresh_ttl: chrono::Duration::hours(refresh_hours),
            debug,
        })
    }
}
