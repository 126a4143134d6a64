//! Database migration command.
//!
//! Applies the SQL files in `crates/web/migrations/`, embedded at compile
//! time. This creates the `petcity` schema and the `tower_sessions.session`
//! table used by the session store.

use super::{CliError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
