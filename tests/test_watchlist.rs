mod common;

use common::{register_user, setup};
use rust_decimal_macros::dec;
use tradex::domain::error::DomainError;

#[tokio::test]
async fn test_watch_resolves_symbol_into_catalog() {
    let app = setup();
    let user = register_user(&app, "9876543210");

    app.watch(&user.id, "aapl").await.unwrap();

    let list = app.watchlist(&user.id).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].symbol, "AAPL");
    assert_eq!(list[0].name, "Apple Inc.");
    assert_eq!(list[0].price, Some(dec!(156.00)));
}

#[tokio::test]
async fn test_watch_is_idempotent() {
    let app = setup();
    let user = register_user(&app, "9876543210");

    let first = app.watch(&user.id, "AAPL").await.unwrap();
    let second = app.watch(&user.id, "AAPL").await.unwrap();
    assert_eq!(first.id, second.id);

    assert_eq!(app.watchlist(&user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_symbol_rejected() {
    let app = setup();
    let user = register_user(&app, "9876543210");

    assert!(matches!(
        app.watch(&user.id, "ZZZZ").await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_remove_is_owner_scoped() {
    let app = setup();
    let alice = register_user(&app, "9876543210");
    let bob = register_user(&app, "9123456780");

    let item = app.watch(&alice.id, "AAPL").await.unwrap();

    // Bob cannot remove Alice's entry.
    assert!(matches!(
        app.unwatch(&bob.id, &item.id),
        Err(DomainError::NotFound(_))
    ));
    assert_eq!(app.watchlist(&alice.id).await.unwrap().len(), 1);

    app.unwatch(&alice.id, &item.id).unwrap();
    assert!(app.watchlist(&alice.id).await.unwrap().is_empty());
}

/// A tracked symbol the provider stops quoting still lists from the
/// catalog, with no price.
#[tokio::test]
async fn test_unquoted_entry_keeps_catalog_data() {
    use std::sync::Arc;
    use tradex::infrastructure::quotes::fixed::FixedQuotes;
    use tradex::TradeX;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tradex.db");
    let db_path = db_path.to_str().unwrap();

    let app = TradeX::with_providers(
        db_path,
        Arc::new(FixedQuotes::empty().with_quote("ALPHA", "Alpha Corp", 100.0, 100.0)),
    )
    .unwrap();
    let user = register_user(&app, "9876543210");
    app.watch(&user.id, "ALPHA").await.unwrap();

    let app = TradeX::with_providers(db_path, Arc::new(FixedQuotes::empty())).unwrap();
    let list = app.watchlist(&user.id).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].symbol, "ALPHA");
    assert_eq!(list[0].name, "Alpha Corp");
    assert_eq!(list[0].price, None);
}
