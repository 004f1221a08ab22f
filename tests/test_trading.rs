mod common;

use common::{register_user, setup_with_prices};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tradex::application::accounts::RegisterRequest;
use tradex::domain::error::DomainError;
use tradex::domain::values::phone::PhoneNumber;
use tradex::infrastructure::quotes::fixed::FixedQuotes;
use tradex::TradeX;

#[tokio::test]
async fn test_buy_debits_balance_and_opens_position() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();

    let (_, receipt) = app.buy(&user.id, &stock.id, 10).await.unwrap();
    assert_eq!(receipt.total, dec!(1000.00));
    assert_eq!(receipt.balance, dec!(99000.00));
    assert_eq!(receipt.quantity, 10);
    assert_eq!(receipt.avg_price, dec!(100.00));

    let profile = app.profile(&user.id).unwrap();
    assert_eq!(profile.balance, dec!(99000.00));
}

#[tokio::test]
async fn test_insufficient_balance_changes_nothing() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();

    let result = app.buy(&user.id, &stock.id, 2000).await;
    assert!(matches!(
        result,
        Err(DomainError::InsufficientBalance { .. })
    ));

    assert_eq!(app.profile(&user.id).unwrap().balance, dec!(100000.00));
    assert!(app.holding(&user.id, &stock.id).unwrap().is_none());
    assert!(app.history(&user.id, None).unwrap().is_empty());
}

#[tokio::test]
async fn test_oversell_reports_held_quantity_and_changes_nothing() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();
    app.buy(&user.id, &stock.id, 5).await.unwrap();

    let result = app.sell(&user.id, &stock.id, 8).await;
    match result {
        Err(DomainError::InsufficientShares { requested, held }) => {
            assert_eq!(requested, 8);
            assert_eq!(held, 5);
        }
        other => panic!("expected InsufficientShares, got {other:?}"),
    }

    let holding = app.holding(&user.id, &stock.id).unwrap().unwrap();
    assert_eq!(holding.quantity, 5);
    assert_eq!(app.history(&user.id, None).unwrap().len(), 1);
}

#[tokio::test]
async fn test_sell_without_position_rejected() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();

    assert!(matches!(
        app.sell(&user.id, &stock.id, 1).await,
        Err(DomainError::InsufficientShares { held: 0, .. })
    ));
}

#[tokio::test]
async fn test_selling_everything_removes_the_holding() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();
    app.buy(&user.id, &stock.id, 4).await.unwrap();

    let (_, receipt) = app.sell(&user.id, &stock.id, 4).await.unwrap();
    assert_eq!(receipt.quantity, 0);
    assert_eq!(receipt.balance, dec!(100000.00));
    assert!(app.holding(&user.id, &stock.id).unwrap().is_none());

    // The ledger keeps both rows.
    assert_eq!(app.history(&user.id, None).unwrap().len(), 2);
}

#[tokio::test]
async fn test_zero_and_negative_quantity_rejected() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");
    let stock = app.resolve_stock("ALPHA").await.unwrap();

    assert!(matches!(
        app.buy(&user.id, &stock.id, 0).await,
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        app.sell(&user.id, &stock.id, -3).await,
        Err(DomainError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_unknown_stock_rejected() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let user = register_user(&app, "9876543210");

    assert!(matches!(
        app.buy(&user.id, "no-such-id", 1).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_history_is_most_recent_first_and_limited() {
    let app = setup_with_prices(&[("ALPHA", 100.0), ("BETA", 50.0)]);
    let user = register_user(&app, "9876543210");
    let alpha = app.resolve_stock("ALPHA").await.unwrap();
    let beta = app.resolve_stock("BETA").await.unwrap();

    app.buy(&user.id, &alpha.id, 1).await.unwrap();
    app.buy(&user.id, &beta.id, 2).await.unwrap();
    app.sell(&user.id, &alpha.id, 1).await.unwrap();

    let all = app.history(&user.id, None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].1.symbol, "ALPHA");
    assert_eq!(all[0].0.side.to_string(), "SELL");

    let limited = app.history(&user.id, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_ledger_is_per_user() {
    let app = setup_with_prices(&[("ALPHA", 100.0)]);
    let alice = register_user(&app, "9876543210");
    let bob = register_user(&app, "9123456780");
    let stock = app.resolve_stock("ALPHA").await.unwrap();

    app.buy(&alice.id, &stock.id, 1).await.unwrap();

    assert_eq!(app.history(&alice.id, None).unwrap().len(), 1);
    assert!(app.history(&bob.id, None).unwrap().is_empty());
    assert_eq!(app.profile(&bob.id).unwrap().balance, dec!(100000.00));
}

/// Average cost is volume-weighted on buys and untouched by sells. The
/// price changes between steps by reopening the same database with a
/// different quote table.
#[tokio::test]
async fn test_average_cost_across_price_changes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tradex.db");
    let db_path = db_path.to_str().unwrap();

    let quotes_at = |price: f64| {
        Arc::new(FixedQuotes::empty().with_quote("ALPHA", "Alpha Corp", price, price))
    };

    let app = TradeX::with_providers(db_path, quotes_at(100.0)).unwrap();
    let user = app
        .register(RegisterRequest {
            full_name: "Test User".into(),
            phone: PhoneNumber::parse("9876543210").unwrap(),
            password: "s3cret".into(),
        })
        .unwrap();
    let stock = app.resolve_stock("ALPHA").await.unwrap();
    let (_, receipt) = app.buy(&user.id, &stock.id, 10).await.unwrap();
    assert_eq!(receipt.balance, dec!(99000.00));
    assert_eq!(receipt.avg_price, dec!(100.00));

    let app = TradeX::with_providers(db_path, quotes_at(200.0)).unwrap();
    let (_, receipt) = app.buy(&user.id, &stock.id, 10).await.unwrap();
    assert_eq!(receipt.balance, dec!(97000.00));
    assert_eq!(receipt.quantity, 20);
    assert_eq!(receipt.avg_price, dec!(150.00));

    let app = TradeX::with_providers(db_path, quotes_at(300.0)).unwrap();
    let (_, receipt) = app.sell(&user.id, &stock.id, 5).await.unwrap();
    assert_eq!(receipt.balance, dec!(98500.00));
    assert_eq!(receipt.quantity, 15);
    assert_eq!(receipt.avg_price, dec!(150.00));
}
