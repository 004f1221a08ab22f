use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;
use crate::domain::ports::stock_repository::StockRepository;
use crate::infrastructure::sqlite::SharedConnection;
use rusqlite::{params, OptionalExtension};

pub struct SqliteStockRepo {
    conn: SharedConnection,
}

impl SqliteStockRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_stock(row: &rusqlite::Row) -> Result<Stock, rusqlite::Error> {
        Ok(Stock {
            id: row.get(0)?,
            symbol: row.get(1)?,
            name: row.get(2)?,
        })
    }
}

impl StockRepository for SqliteStockRepo {
    fn upsert(&self, symbol: &str, name: &str) -> Result<Stock, DomainError> {
        let candidate = Stock::new(symbol, name);
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO stocks (id, symbol, name) VALUES (?1, ?2, ?3)
             ON CONFLICT(symbol) DO UPDATE SET name = excluded.name",
            params![candidate.id, candidate.symbol, candidate.name],
        )
        .map_err(|e| DomainError::Database(format!("Failed to upsert stock: {e}")))?;
        conn.query_row(
            "SELECT id, symbol, name FROM stocks WHERE symbol = ?1",
            params![candidate.symbol],
            Self::row_to_stock,
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get(&self, id: &str) -> Result<Option<Stock>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT id, symbol, name FROM stocks WHERE id = ?1",
            params![id],
            Self::row_to_stock,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT id, symbol, name FROM stocks WHERE symbol = ?1",
            params![symbol.trim().to_uppercase()],
            Self::row_to_stock,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }
}
