pub mod phone;
pub mod quote;
pub mod trade_side;
pub mod valuation;
