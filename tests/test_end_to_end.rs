mod common;

use common::{register_user, setup_with_prices};
use rust_decimal_macros::dec;

/// Register, fund a position, track a symbol, close the position and check
/// the ledger tells the whole story.
#[tokio::test]
async fn test_full_trading_lifecycle() {
    let app = setup_with_prices(&[("ALPHA", 100.0), ("BETA", 50.0)]);
    let user = register_user(&app, "9876543210");

    let alpha = app.resolve_stock("ALPHA").await.unwrap();
    app.buy(&user.id, &alpha.id, 10).await.unwrap();
    app.watch(&user.id, "BETA").await.unwrap();

    let summary = app.portfolio_summary(&user.id).await.unwrap();
    assert_eq!(summary.total_invested, dec!(1000.00));

    let (_, receipt) = app.sell(&user.id, &alpha.id, 10).await.unwrap();
    assert_eq!(receipt.balance, dec!(100000.00));
    assert!(app.holdings(&user.id).await.unwrap().is_empty());

    let history = app.history(&user.id, None).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].0.side.to_string(), "SELL");
    assert_eq!(history[1].0.side.to_string(), "BUY");

    let watchlist = app.watchlist(&user.id).await.unwrap();
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].symbol, "BETA");
}
