use serde::{Deserialize, Serialize};

/// Catalog entry: unique ticker symbol mapped to a display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl Stock {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.trim().to_uppercase(),
            name: name.to_string(),
        }
    }
}
