use crate::domain::values::phone::PhoneNumber;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Starting cash balance for every new account.
pub const STARTING_BALANCE: Decimal = dec!(100000.00);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(phone: PhoneNumber, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phone,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// One-to-one with a user; holds the virtual cash balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub full_name: String,
    pub balance: Decimal,
}

impl Profile {
    pub fn new(user_id: &str, full_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            full_name: full_name.to_string(),
            balance: STARTING_BALANCE,
        }
    }
}
