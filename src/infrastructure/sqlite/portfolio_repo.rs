use crate::domain::entities::holding::Holding;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;
use crate::domain::ports::portfolio_repository::{PortfolioRepository, TradeReceipt};
use crate::domain::values::trade_side::TradeSide;
use crate::infrastructure::sqlite::{decimal_col, SharedConnection};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;

pub struct SqlitePortfolioRepo {
    conn: SharedConnection,
}

impl SqlitePortfolioRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_holding(row: &rusqlite::Row) -> Result<Holding, rusqlite::Error> {
        Ok(Holding {
            id: row.get(0)?,
            user_id: row.get(1)?,
            stock_id: row.get(2)?,
            quantity: row.get(3)?,
            avg_price: decimal_col(row, 4)?,
        })
    }

    fn balance_of(conn: &Connection, user_id: &str) -> Result<Decimal, DomainError> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT balance FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let raw = raw.ok_or_else(|| {
            DomainError::NotFound(format!("Profile not found for user: {user_id}"))
        })?;
        raw.parse::<Decimal>()
            .map_err(|e| DomainError::Parse(format!("Bad balance value: {e}")))
    }

    fn holding_of(
        conn: &Connection,
        user_id: &str,
        stock_id: &str,
    ) -> Result<Option<Holding>, DomainError> {
        conn.query_row(
            "SELECT id, user_id, stock_id, quantity, avg_price FROM holdings
             WHERE user_id = ?1 AND stock_id = ?2",
            params![user_id, stock_id],
            Self::row_to_holding,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn write_balance(conn: &Connection, user_id: &str, balance: Decimal) -> Result<(), DomainError> {
        conn.execute(
            "UPDATE profiles SET balance = ?1 WHERE user_id = ?2",
            params![balance.to_string(), user_id],
        )
        .map_err(|e| DomainError::Database(format!("Failed to update balance: {e}")))?;
        Ok(())
    }

    fn append_ledger(conn: &Connection, entry: &LedgerEntry) -> Result<(), DomainError> {
        conn.execute(
            "INSERT INTO transactions (id, user_id, stock_id, quantity, price, side, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.user_id,
                entry.stock_id,
                entry.quantity,
                entry.price.to_string(),
                entry.side.to_string(),
                entry.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to append ledger entry: {e}")))?;
        Ok(())
    }
}

impl PortfolioRepository for SqlitePortfolioRepo {
    fn execute_buy(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
        price: Decimal,
    ) -> Result<TradeReceipt, DomainError> {
        let total = (price * Decimal::from(quantity)).round_dp(2);
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let balance = Self::balance_of(&tx, user_id)?;
        if balance < total {
            // Dropping the transaction rolls back; nothing written yet.
            return Err(DomainError::InsufficientBalance {
                required: total,
                available: balance,
            });
        }

        let mut holding =
            Self::holding_of(&tx, user_id, stock_id)?.unwrap_or_else(|| Holding::new(user_id, stock_id));
        holding.apply_buy(quantity, price);
        let new_balance = (balance - total).round_dp(2);

        Self::write_balance(&tx, user_id, new_balance)?;
        tx.execute(
            "INSERT INTO holdings (id, user_id, stock_id, quantity, avg_price)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, stock_id)
             DO UPDATE SET quantity = excluded.quantity, avg_price = excluded.avg_price",
            params![
                holding.id,
                holding.user_id,
                holding.stock_id,
                holding.quantity,
                holding.avg_price.to_string(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to upsert holding: {e}")))?;
        Self::append_ledger(
            &tx,
            &LedgerEntry::new(user_id, stock_id, quantity, price, TradeSide::Buy),
        )?;
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(TradeReceipt {
            quantity: holding.quantity,
            avg_price: holding.avg_price,
            balance: new_balance,
            total,
        })
    }

    fn execute_sell(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
        price: Decimal,
    ) -> Result<TradeReceipt, DomainError> {
        let total = (price * Decimal::from(quantity)).round_dp(2);
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut holding =
            Self::holding_of(&tx, user_id, stock_id)?.unwrap_or_else(|| Holding::new(user_id, stock_id));
        if quantity > holding.quantity {
            return Err(DomainError::InsufficientShares {
                requested: quantity,
                held: holding.quantity,
            });
        }

        let balance = Self::balance_of(&tx, user_id)?;
        let new_balance = (balance + total).round_dp(2);
        holding.apply_sell(quantity);

        Self::write_balance(&tx, user_id, new_balance)?;
        if holding.is_empty() {
            tx.execute("DELETE FROM holdings WHERE id = ?1", params![holding.id])
                .map_err(|e| DomainError::Database(format!("Failed to delete holding: {e}")))?;
        } else {
            tx.execute(
                "UPDATE holdings SET quantity = ?1 WHERE id = ?2",
                params![holding.quantity, holding.id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update holding: {e}")))?;
        }
        Self::append_ledger(
            &tx,
            &LedgerEntry::new(user_id, stock_id, quantity, price, TradeSide::Sell),
        )?;
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(TradeReceipt {
            quantity: holding.quantity,
            avg_price: holding.avg_price,
            balance: new_balance,
            total,
        })
    }

    fn holdings_for_user(&self, user_id: &str) -> Result<Vec<(Holding, Stock)>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT h.id, h.user_id, h.stock_id, h.quantity, h.avg_price,
                        s.id, s.symbol, s.name
                 FROM holdings h JOIN stocks s ON s.id = h.stock_id
                 WHERE h.user_id = ?1 AND h.quantity > 0
                 ORDER BY s.symbol",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                let holding = Self::row_to_holding(row)?;
                let stock = Stock {
                    id: row.get(5)?,
                    symbol: row.get(6)?,
                    name: row.get(7)?,
                };
                Ok((holding, stock))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn holding(&self, user_id: &str, stock_id: &str) -> Result<Option<Holding>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Self::holding_of(&conn, user_id, stock_id)
    }

    fn ledger_for_user(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(LedgerEntry, Stock)>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = String::from(
            "SELECT t.id, t.user_id, t.stock_id, t.quantity, t.price, t.side, t.created_at,
                    s.id, s.symbol, s.name
             FROM transactions t JOIN stocks s ON s.id = t.stock_id
             WHERE t.user_id = ?1
             ORDER BY t.created_at DESC, t.rowid DESC",
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                let side_str: String = row.get(5)?;
                let created_str: String = row.get(6)?;
                let entry = LedgerEntry {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    stock_id: row.get(2)?,
                    quantity: row.get(3)?,
                    price: decimal_col(row, 4)?,
                    side: side_str.parse::<TradeSide>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            5,
                            rusqlite::types::Type::Text,
                            e.into(),
                        )
                    })?,
                    created_at: DateTime::parse_from_rfc3339(&created_str)
                        .map(|dt| dt.with_timezone(&chrono::Utc))
                        .unwrap_or_else(|_| chrono::Utc::now()),
                };
                let stock = Stock {
                    id: row.get(7)?,
                    symbol: row.get(8)?,
                    name: row.get(9)?,
                };
                Ok((entry, stock))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
