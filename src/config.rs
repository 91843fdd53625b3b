use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Var(#[from] dotenvy::Error),

    #[error("Invalid bind address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Locale and timezone settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct I18nSettings {
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_tz: bool,
    pub locale_paths: Vec<PathBuf>,
}

impl I18nSettings {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            language_code: "pt-BR".to_string(),
            time_zone: "America/Sao_Paulo".to_string(),
            use_i18n: true,
            use_tz: true,
            locale_paths: vec![base_dir.join("locale")],
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub i18n: I18nSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = dotenvy::var("DATABASE_URL")?;
        let bind_addr = match dotenvy::var("BIND_ADDR") {
            Ok(addr) => addr.parse()?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };
        let base_dir = std::env::current_dir()?;

        Ok(Self {
            database_url,
            bind_addr,
            i18n: I18nSettings::new(&base_dir),
        })
    }
}
