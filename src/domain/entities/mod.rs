pub mod holding;
pub mod ledger_entry;
pub mod stock;
pub mod user;
pub mod watch_item;
