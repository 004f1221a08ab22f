use crate::domain::entities::stock::Stock;
use crate::domain::entities::watch_item::WatchItem;
use crate::domain::error::DomainError;
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use crate::infrastructure::sqlite::SharedConnection;
use rusqlite::params;

pub struct SqliteWatchlistRepo {
    conn: SharedConnection,
}

impl SqliteWatchlistRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl WatchlistRepository for SqliteWatchlistRepo {
    fn add(&self, user_id: &str, stock_id: &str) -> Result<WatchItem, DomainError> {
        let candidate = WatchItem::new(user_id, stock_id);
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT OR IGNORE INTO watchlist (id, user_id, stock_id) VALUES (?1, ?2, ?3)",
            params![candidate.id, candidate.user_id, candidate.stock_id],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add watchlist entry: {e}")))?;
        // INSERT OR IGNORE keeps the original row when already watched.
        conn.query_row(
            "SELECT id, user_id, stock_id FROM watchlist WHERE user_id = ?1 AND stock_id = ?2",
            params![user_id, stock_id],
            |row| {
                Ok(WatchItem {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    stock_id: row.get(2)?,
                })
            },
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn remove(&self, user_id: &str, item_id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "DELETE FROM watchlist WHERE id = ?1 AND user_id = ?2",
                params![item_id, user_id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to remove watchlist entry: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!(
                "Watchlist entry not found: {item_id}"
            )));
        }
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<(WatchItem, Stock)>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT w.id, w.user_id, w.stock_id, s.id, s.symbol, s.name
                 FROM watchlist w JOIN stocks s ON s.id = w.stock_id
                 WHERE w.user_id = ?1
                 ORDER BY s.symbol",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                let item = WatchItem {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    stock_id: row.get(2)?,
                };
                let stock = Stock {
                    id: row.get(3)?,
                    symbol: row.get(4)?,
                    name: row.get(5)?,
                };
                Ok((item, stock))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
