//! Centralized configuration (environment variables + defaults).

use std::env;
use std::path::PathBuf;

/// Storage backend selection. SQLite is the default; the in-process
/// document store serves deployments without a database file and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`).
    pub bind_addr: String,
    /// SQLite connection string (`DATABASE_URL`), ignored by the memory backend.
    pub database_url: String,
    /// `STORE_BACKEND`: `sqlite` (default) or `memory`.
    pub store_backend: StoreBackend,
    /// Directory uploaded audio files are written into (`UPLOAD_DIR`).
    pub upload_dir: PathBuf,
    /// Seeded admin credentials (`ADMIN_USERNAME` / `ADMIN_PASSWORD`).
    pub admin_username: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:5000"),
            database_url: var_or("DATABASE_URL", "sqlite://community.db"),
            store_backend: match var_or("STORE_BACKEND", "sqlite").as_str() {
                "memory" => StoreBackend::Memory,
                _ => StoreBackend::Sqlite,
            },
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "static/audio")),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin123"),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
