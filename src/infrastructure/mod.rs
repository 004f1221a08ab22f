pub mod quotes;
pub mod sqlite;
