//! Shared test helpers.

use std::sync::Arc;
use tradex::application::accounts::RegisterRequest;
use tradex::domain::entities::user::User;
use tradex::domain::values::phone::PhoneNumber;
use tradex::infrastructure::quotes::fixed::FixedQuotes;
use tradex::TradeX;

pub fn setup() -> TradeX {
    TradeX::with_providers(":memory:", Arc::new(FixedQuotes::default())).unwrap()
}

/// Deterministic prices chosen for trade-math tests.
pub fn setup_with_prices(prices: &[(&str, f64)]) -> TradeX {
    let mut quotes = FixedQuotes::empty();
    for (symbol, price) in prices {
        quotes = quotes.with_quote(symbol, symbol, *price, *price);
    }
    TradeX::with_providers(":memory:", Arc::new(quotes)).unwrap()
}

pub fn register_user(app: &TradeX, phone: &str) -> User {
    app.register(RegisterRequest {
        full_name: "Test User".into(),
        phone: PhoneNumber::parse(phone).unwrap(),
        password: "s3cret".into(),
    })
    .unwrap()
}
