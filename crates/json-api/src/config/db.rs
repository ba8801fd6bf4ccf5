//! Database Config

use clap::Args;

/// Where offers and API tokens are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL`, migrated with `offerbook-app db migrate`.
    Postgres,

    /// Process memory. Everything is lost on restart.
    Memory,
}

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Storage backend (postgres, memory)
    #[arg(long, env = "STORAGE", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,

    /// `PostgreSQL` connection string, required for postgres storage
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
