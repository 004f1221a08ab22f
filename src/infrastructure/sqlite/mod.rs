pub mod account_repo;
pub mod migrations;
pub mod portfolio_repo;
pub mod stock_repo;
pub mod watchlist_repo;

use crate::domain::error::DomainError;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

/// All repositories share one connection so multi-table trade execution is
/// a single SQLite transaction and concurrent trades serialize.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub fn open_database(db_path: &str) -> Result<SharedConnection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| DomainError::Database(format!("Pragma error: {e}")))?;
    migrations::run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) fn decimal_col(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    raw.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
