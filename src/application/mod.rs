pub mod accounts;
pub mod market;
pub mod portfolio;
pub mod trading;
pub mod watchlist;
