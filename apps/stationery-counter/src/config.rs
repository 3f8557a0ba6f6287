//! # Counter Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags
//! 2. Environment variables (`STATIONERY_*`)
//! 3. Variant preset (`simple` / `strict`)
//! 4. Defaults (this file)
//!
//! ## Variants
//! ```text
//! ┌──────────┬──────────┬────────────────┬──────────────┬──────────────────┐
//! │ Variant  │ Catalog  │ Validate names │ Allow reduce │ Quantity prompt  │
//! ├──────────┼──────────┼────────────────┼──────────────┼──────────────────┤
//! │ simple   │ static   │ no             │ no           │ plain            │
//! │ strict   │ database │ yes            │ yes          │ spells out > 0   │
//! └──────────┴──────────┴────────────────┴──────────────┴──────────────────┘
//! ```

use clap::Parser;
use directories::ProjectDirs;
use std::path::Path;
use std::str::FromStr;

use stationery_core::DEFAULT_CURRENCY_LABEL;
use stationery_db::{DbConfig, FlushMode};

use crate::error::ConfigError;
use crate::session::SessionFeatures;

/// Database file name inside the platform data directory.
const DATABASE_FILE: &str = "stationery.db";

// =============================================================================
// Command Line
// =============================================================================

/// Stationery counter: take one customer's order at the console.
#[derive(Debug, Parser)]
#[command(name = "stationery-counter", version, about, long_about = None)]
pub struct Cli {
    /// sqlx connection URL, e.g. `sqlite://./stationery.db`
    #[arg(long, env = "STATIONERY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Behavior preset: `simple` or `strict`
    #[arg(long, env = "STATIONERY_VARIANT", default_value = "strict")]
    pub variant: String,

    /// Product source: `static` or `database` (default: from variant)
    #[arg(long, env = "STATIONERY_CATALOG")]
    pub catalog: Option<String>,

    /// Only accept letters and spaces in customer names (default: from variant)
    #[arg(long, env = "STATIONERY_VALIDATE_NAMES", value_name = "BOOL")]
    pub validate_names: Option<bool>,

    /// Offer `-2` to reduce an item's quantity (default: from variant)
    #[arg(long, env = "STATIONERY_ALLOW_REDUCE", value_name = "BOOL")]
    pub allow_reduce: Option<bool>,

    /// How the order is written: `atomic` or `per-item`
    #[arg(long, env = "STATIONERY_FLUSH_MODE", default_value = "atomic")]
    pub flush_mode: String,

    /// Label printed in front of every amount
    #[arg(long, env = "STATIONERY_CURRENCY", default_value = DEFAULT_CURRENCY_LABEL)]
    pub currency: String,

    /// Pool size
    #[arg(long, env = "STATIONERY_MAX_CONNECTIONS", default_value_t = 1)]
    pub max_connections: u32,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Behavior preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Simple,
    Strict,
}

impl Variant {
    pub fn features(self) -> SessionFeatures {
        match self {
            Variant::Simple => SessionFeatures::simple(),
            Variant::Strict => SessionFeatures::strict(),
        }
    }

    pub fn catalog(self) -> CatalogSource {
        match self {
            Variant::Simple => CatalogSource::Static,
            Variant::Strict => CatalogSource::Database,
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Variant::Simple),
            "strict" => Ok(Variant::Strict),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Where the session looks products up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// The seeded in-memory table.
    Static,
    /// The `products` table.
    Database,
}

impl FromStr for CatalogSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(CatalogSource::Static),
            "database" | "db" => Ok(CatalogSource::Database),
            _ => Err(ConfigError::UnknownCatalog(s.to_string())),
        }
    }
}

fn parse_flush_mode(s: &str) -> Result<FlushMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "atomic" => Ok(FlushMode::Atomic),
        "per-item" | "per_item" => Ok(FlushMode::PerItem),
        _ => Err(ConfigError::UnknownFlushMode(s.to_string())),
    }
}

/// Fully resolved startup configuration.
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// `None` means the platform default file.
    pub database_url: Option<String>,
    pub variant: Variant,
    pub catalog: CatalogSource,
    pub features: SessionFeatures,
    pub flush_mode: FlushMode,
    pub currency: String,
    pub max_connections: u32,
}

impl CounterConfig {
    /// Resolves flags against the variant preset.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let variant: Variant = cli.variant.parse()?;

        let catalog = match cli.catalog.as_deref() {
            Some(source) => source.parse()?,
            None => variant.catalog(),
        };

        let mut features = variant.features();
        if let Some(validate) = cli.validate_names {
            features.validate_names = validate;
        }
        if let Some(reduce) = cli.allow_reduce {
            features.allow_reduce = reduce;
        }

        if cli.max_connections == 0 {
            return Err(ConfigError::NoConnections);
        }

        Ok(CounterConfig {
            database_url: cli.database_url,
            variant,
            catalog,
            features,
            flush_mode: parse_flush_mode(&cli.flush_mode)?,
            currency: cli.currency,
            max_connections: cli.max_connections,
        })
    }

    /// Builds the pool configuration, creating the data directory when the
    /// default location is used.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        let url = match &self.database_url {
            Some(url) => url.clone(),
            None => default_database_url()?,
        };

        Ok(DbConfig::new(url)
            .max_connections(self.max_connections)
            .min_connections(1)
            .flush_mode(self.flush_mode))
    }
}

/// Platform-specific default database location.
///
/// - **macOS**: `~/Library/Application Support/com.stationery.counter/stationery.db`
/// - **Windows**: `%APPDATA%\stationery\counter\data\stationery.db`
/// - **Linux**: `~/.local/share/counter/stationery.db`
fn default_database_url() -> Result<String, ConfigError> {
    let dirs = ProjectDirs::from("com", "stationery", "counter").ok_or(ConfigError::NoDataDir)?;
    let data_dir = dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::DataDir {
        path: data_dir.display().to_string(),
        source,
    })?;

    Ok(sqlite_url(&data_dir.join(DATABASE_FILE)))
}

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.display())
}
