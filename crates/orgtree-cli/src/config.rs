//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use orgtree_db::DbConfig;

/// Storage backend, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// In-process store; data lives for the lifetime of the process.
    Memory,
    /// SurrealDB over WebSocket.
    Surreal,
}

#[derive(Debug, Parser)]
#[command(
    name = "orgtree",
    version,
    about = "Look up cities, departments and employees"
)]
pub struct Config {
    /// Seed snapshot, read only when the store is empty.
    #[arg(long, env = "ORGTREE_SEED", default_value = "data.json")]
    pub seed: PathBuf,

    #[arg(long, value_enum, env = "ORGTREE_BACKEND", default_value = "memory")]
    pub backend: Backend,

    /// Emit logs as JSON lines.
    #[arg(long, env = "ORGTREE_LOG_JSON")]
    pub log_json: bool,

    #[arg(long, env = "ORGTREE_DB_URL", default_value = "127.0.0.1:8000")]
    pub db_url: String,

    #[arg(long, env = "ORGTREE_DB_NAMESPACE", default_value = "orgtree")]
    pub db_namespace: String,

    #[arg(long, env = "ORGTREE_DB_DATABASE", default_value = "directory")]
    pub db_database: String,

    #[arg(long, env = "ORGTREE_DB_USERNAME", default_value = "root")]
    pub db_username: String,

    #[arg(long, env = "ORGTREE_DB_PASSWORD", default_value = "root", hide_env_values = true)]
    pub db_password: String,
}

impl Config {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}
