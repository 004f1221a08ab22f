use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            phone TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            full_name TEXT NOT NULL DEFAULT '',
            balance TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stocks (
            id TEXT PRIMARY KEY,
            symbol TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS holdings (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            stock_id TEXT NOT NULL REFERENCES stocks(id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL,
            avg_price TEXT NOT NULL,
            UNIQUE(user_id, stock_id)
        );

        CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            stock_id TEXT NOT NULL REFERENCES stocks(id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL,
            price TEXT NOT NULL,
            side TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS watchlist (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            stock_id TEXT NOT NULL REFERENCES stocks(id) ON DELETE CASCADE,
            UNIQUE(user_id, stock_id)
        );

        CREATE INDEX IF NOT EXISTS idx_holdings_user ON holdings(user_id);
        CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_watchlist_user ON watchlist(user_id);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
