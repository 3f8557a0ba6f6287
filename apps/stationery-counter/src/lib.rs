//! # Stationery Counter
//!
//! Interactive order-taking console for one customer at a time.
//!
//! ## Module Organization
//! ```text
//! stationery_counter/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── config.rs       ◄─── Flags, environment, variant presets
//! ├── console.rs      ◄─── Token / line reader over BufRead + Write
//! ├── gateway.rs      ◄─── Catalog and OrderGateway seams
//! ├── session.rs      ◄─── The session state machine
//! └── error.rs        ◄─── SessionError / ConfigError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse flags + STATIONERY_* environment ──────────► exit 2 on error  │
//! │  2. Initialize logging (stderr, RUST_LOG)                               │
//! │  3. Open database, run migrations (seeds the catalog)                   │
//! │  4. Health check + migration / catalog diagnostics ──► exit 1 on fault  │
//! │  5. Pick catalog: static table or products table                        │
//! │  6. Run the session over locked stdin / stdout                          │
//! │  7. Close the pool (always) ─────────────────────────► exit 1 on fault  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod session;

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use stationery_core::{OrderSummary, StaticCatalog};
use stationery_db::migrations::migration_status;
use stationery_db::{Database, DbConfig, DbError};

use config::{CatalogSource, CounterConfig};
use console::Console;
use error::SessionResult;
use gateway::Catalog;
use session::Session;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the console protocol.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stationery_db=debug` - Show SQL-level activity only
/// - Default: WARN level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the database and hands it to [`run_with_database`].
pub async fn run<R: BufRead, W: Write>(
    config: &CounterConfig,
    db_config: DbConfig,
    console: Console<R, W>,
) -> SessionResult<OrderSummary> {
    let db = Database::new(db_config).await?;
    run_with_database(config, db, console).await
}

/// Checks an open database, runs one session, and closes the pool on
/// every path.
pub async fn run_with_database<R: BufRead, W: Write>(
    config: &CounterConfig,
    db: Database,
    console: Console<R, W>,
) -> SessionResult<OrderSummary> {
    let result = match check_database(&db).await {
        Ok(()) => {
            info!(variant = ?config.variant, catalog = ?config.catalog, "Database ready");
            run_session(config, &db, console).await
        }
        Err(err) => Err(err.into()),
    };

    db.close().await;
    result
}

/// Startup diagnostics: the pool answers, the schema is current and the
/// catalog is populated.
async fn check_database(db: &Database) -> Result<(), DbError> {
    if !db.health_check().await {
        return Err(DbError::ConnectionFailed("health check failed".to_string()));
    }

    let (total, applied) = migration_status(db.pool()).await?;
    debug!(total, applied, "Migration status");

    let products = db.products().count().await?;
    if products == 0 {
        warn!("Products table is empty");
    }
    debug!(products, "Catalog rows");

    Ok(())
}

/// Runs one session against an open database.
pub async fn run_session<R: BufRead, W: Write>(
    config: &CounterConfig,
    db: &Database,
    console: Console<R, W>,
) -> SessionResult<OrderSummary> {
    let seeded;
    let stored;
    let catalog: &dyn Catalog = match config.catalog {
        CatalogSource::Static => {
            seeded = StaticCatalog::seeded();
            &seeded
        }
        CatalogSource::Database => {
            stored = db.products();
            &stored
        }
    };

    let mut session = Session::new(console, catalog, db, config.features).currency(&config.currency);
    session.run().await
}
