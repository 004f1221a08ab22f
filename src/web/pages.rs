//! Server-rendered HTML. Pages are plain string builders over a shared
//! layout; handlers pass fully-resolved view data so nothing here touches
//! storage or the quote source.

use crate::application::watchlist::WatchView;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::entities::stock::Stock;
use crate::domain::entities::user::{Profile, User};
use crate::domain::values::quote::Quote;
use crate::domain::values::valuation::{HoldingValuation, PortfolioSummary};
use crate::web::forms::{FieldError, FlashParams, RegisterForm};
use rust_decimal::Decimal;

/// Escape text for safe interpolation into HTML.
pub fn esc(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn flash_block(flash: &FlashParams) -> String {
    let mut out = String::new();
    if let Some(msg) = &flash.msg {
        out.push_str(&format!(r#"<p class="notice ok">{}</p>"#, esc(msg)));
    }
    if let Some(err) = &flash.err {
        out.push_str(&format!(r#"<p class="notice err">{}</p>"#, esc(err)));
    }
    out
}

fn field_errors(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| format!(r#"<p class="field-error">{}</p>"#, esc(&e.message)))
        .collect()
}

fn layout(title: &str, authenticated: bool, flash: &FlashParams, body: &str) -> String {
    let nav = if authenticated {
        r#"<nav>
  <a href="/dashboard">Dashboard</a>
  <a href="/portfolio">Portfolio</a>
  <a href="/investment">Investment</a>
  <a href="/watchlist">Watchlist</a>
  <a href="/transactions">Transactions</a>
  <a href="/profile">Profile</a>
  <a href="/logout">Logout</a>
</nav>"#
    } else {
        r#"<nav>
  <a href="/login">Login</a>
  <a href="/register">Register</a>
</nav>"#
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{} - TradeX</title>
</head>
<body>
<header><h1><a href="/">TradeX</a></h1>{}</header>
<main>
{}
{}
</main>
</body>
</html>"#,
        esc(title),
        nav,
        flash_block(flash),
        body
    )
}

pub fn home_page() -> String {
    layout(
        "Home",
        false,
        &FlashParams::default(),
        r#"<h2>Trade the market with virtual cash</h2>
<p>Register with your phone number and start with a 100000.00 virtual balance.</p>
<p><a href="/register">Create an account</a> or <a href="/login">login</a>.</p>"#,
    )
}

pub fn register_page(form: &RegisterForm, errors: &[FieldError], flash: &FlashParams) -> String {
    let body = format!(
        r#"<h2>Create your account</h2>
{}
<form method="post" action="/register">
  <label>Full Name</label>
  <input name="full_name" value="{}" placeholder="Enter your full name">
  {}
  <label>Phone Number</label>
  <input name="phone_number" value="{}" placeholder="Enter mobile number">
  {}
  <label>Password</label>
  <input type="password" name="password" placeholder="Create password">
  {}
  <label>Confirm Password</label>
  <input type="password" name="confirm_password" placeholder="Confirm password">
  {}
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Login</a></p>"#,
        field_errors(errors, "form"),
        esc(&form.full_name),
        field_errors(errors, "full_name"),
        esc(&form.phone_number),
        field_errors(errors, "phone_number"),
        field_errors(errors, "password"),
        field_errors(errors, "confirm_password"),
    );
    layout("Register", false, flash, &body)
}

pub fn login_page(phone: &str, error: Option<&str>, flash: &FlashParams) -> String {
    let error_block = error
        .map(|e| format!(r#"<p class="notice err">{}</p>"#, esc(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h2>Login</h2>
{error_block}
<form method="post" action="/login">
  <label>Phone Number</label>
  <input name="phone_number" value="{}" placeholder="Enter mobile number">
  <label>Password</label>
  <input type="password" name="password" placeholder="Enter password">
  <button type="submit">Login</button>
</form>
<p>New here? <a href="/register">Create an account</a></p>"#,
        esc(phone),
    );
    layout("Login", false, flash, &body)
}

fn quote_row(stock: &Stock, quote: &Quote) -> String {
    format!(
        r#"<tr>
  <td>{}</td><td>{}</td><td>{}</td><td>{} ({}%)</td>
  <td>
    <a href="/buy/{}">Buy</a>
    <form method="post" action="/watchlist/add/{}"><button type="submit">Watch</button></form>
  </td>
</tr>"#,
        esc(&stock.symbol),
        esc(&stock.name),
        money(quote.price),
        money(quote.change),
        money(quote.change_percent),
        esc(&stock.id),
        esc(&stock.symbol),
    )
}

pub fn dashboard_page(
    profile: &Profile,
    summary: &PortfolioSummary,
    overview: &[(Stock, Quote)],
    recent: &[(LedgerEntry, Stock)],
    flash: &FlashParams,
) -> String {
    let overview_rows: String = overview.iter().map(|(s, q)| quote_row(s, q)).collect();
    let recent_rows: String = recent
        .iter()
        .map(|(entry, stock)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                entry.created_at.format("%Y-%m-%d %H:%M"),
                entry.side,
                esc(&stock.symbol),
                entry.quantity,
                money(entry.price),
            )
        })
        .collect();
    let body = format!(
        r#"<h2>Welcome{}</h2>
<section>
  <p>Wallet balance: <strong>{}</strong></p>
  <p>Invested: {} | Current value: {} | P&amp;L: {} ({}%)</p>
</section>
<section>
  <h3>Find a stock</h3>
  <form method="get" action="/buy/search">
    <input name="symbol" placeholder="Symbol, e.g. AAPL">
    <button type="submit">Search</button>
  </form>
</section>
<section>
  <h3>Market overview</h3>
  <table>
    <tr><th>Symbol</th><th>Name</th><th>Price</th><th>Change</th><th></th></tr>
    {}
  </table>
</section>
<section>
  <h3>Recent transactions</h3>
  <table>
    <tr><th>Time</th><th>Side</th><th>Symbol</th><th>Qty</th><th>Price</th></tr>
    {}
  </table>
  <p><a href="/transactions">All transactions</a></p>
</section>"#,
        if profile.full_name.is_empty() {
            String::new()
        } else {
            format!(", {}", esc(&profile.full_name))
        },
        money(profile.balance),
        money(summary.total_invested),
        money(summary.current_value),
        money(summary.profit_loss),
        money(summary.pnl_percent),
        overview_rows,
        recent_rows,
    );
    layout("Dashboard", true, flash, &body)
}

pub fn portfolio_page(holdings: &[HoldingValuation], flash: &FlashParams) -> String {
    let rows: String = holdings
        .iter()
        .map(|h| {
            format!(
                r#"<tr>
  <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} ({}%)</td>
  <td><a href="/buy/{}">Buy</a> <a href="/sell/{}">Sell</a></td>
</tr>"#,
                esc(&h.symbol),
                esc(&h.name),
                h.quantity,
                money(h.avg_price),
                h.current_price.map(money).unwrap_or_else(|| "-".into()),
                money(h.market_value),
                money(h.pnl),
                money(h.pnl_percent),
                esc(&h.stock_id),
                esc(&h.stock_id),
            )
        })
        .collect();
    let body = format!(
        r#"<h2>Your portfolio</h2>
<table>
  <tr><th>Symbol</th><th>Name</th><th>Qty</th><th>Avg Cost</th><th>Price</th><th>Value</th><th>P&amp;L</th><th></th></tr>
  {}
</table>"#,
        rows
    );
    layout("Portfolio", true, flash, &body)
}

pub fn watchlist_page(
    entries: &[WatchView],
    popular: &[(Stock, Quote)],
    flash: &FlashParams,
) -> String {
    let rows: String = entries
        .iter()
        .map(|w| {
            format!(
                r#"<tr>
  <td>{}</td><td>{}</td><td>{}</td><td>{}</td>
  <td>
    <a href="/buy/{}">Buy</a>
    <form method="post" action="/watchlist/remove/{}"><button type="submit">Remove</button></form>
  </td>
</tr>"#,
                esc(&w.symbol),
                esc(&w.name),
                w.price.map(money).unwrap_or_else(|| "-".into()),
                w.change_percent
                    .map(|c| format!("{}%", money(c)))
                    .unwrap_or_else(|| "-".into()),
                esc(&w.stock_id),
                esc(&w.item_id),
            )
        })
        .collect();
    let popular_rows: String = popular.iter().map(|(s, q)| quote_row(s, q)).collect();
    let body = format!(
        r#"<h2>Your watchlist</h2>
<table>
  <tr><th>Symbol</th><th>Name</th><th>Price</th><th>Change</th><th></th></tr>
  {}
</table>
<section>
  <h3>Popular stocks</h3>
  <table>
    <tr><th>Symbol</th><th>Name</th><th>Price</th><th>Change</th><th></th></tr>
    {}
  </table>
</section>"#,
        rows, popular_rows
    );
    layout("Watchlist", true, flash, &body)
}

pub fn buy_page(
    stock: &Stock,
    quote: Option<&Quote>,
    profile: &Profile,
    flash: &FlashParams,
) -> String {
    let price = quote
        .map(|q| money(q.price))
        .unwrap_or_else(|| "unavailable".into());
    let body = format!(
        r#"<h2>Buy {} - {}</h2>
<p>Live price: <strong>{}</strong></p>
<p>Wallet balance: {}</p>
<form method="post" action="/buy/{}">
  <label>Quantity</label>
  <input name="quantity" placeholder="How many shares?" value="1">
  <button type="submit">Buy</button>
</form>"#,
        esc(&stock.symbol),
        esc(&stock.name),
        price,
        money(profile.balance),
        esc(&stock.id),
    );
    layout("Buy", true, flash, &body)
}

pub fn sell_page(
    stock: &Stock,
    held_quantity: i64,
    avg_price: Decimal,
    quote: Option<&Quote>,
    flash: &FlashParams,
) -> String {
    let price = quote
        .map(|q| money(q.price))
        .unwrap_or_else(|| "unavailable".into());
    let body = format!(
        r#"<h2>Sell {} - {}</h2>
<p>Live price: <strong>{}</strong></p>
<p>You hold {} shares at an average cost of {}.</p>
<form method="post" action="/sell/{}">
  <label>Quantity to Sell</label>
  <input name="quantity" placeholder="Units to sell" value="1">
  <button type="submit">Sell</button>
</form>"#,
        esc(&stock.symbol),
        esc(&stock.name),
        price,
        held_quantity,
        money(avg_price),
        esc(&stock.id),
    );
    layout("Sell", true, flash, &body)
}

pub fn investment_page(
    summary: &PortfolioSummary,
    holdings: &[HoldingValuation],
    flash: &FlashParams,
) -> String {
    let rows: String = holdings
        .iter()
        .map(|h| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} ({}%)</td></tr>",
                esc(&h.symbol),
                h.quantity,
                money(h.invested),
                money(h.market_value),
                money(h.pnl),
                money(h.pnl_percent),
            )
        })
        .collect();
    let body = format!(
        r#"<h2>Investment summary</h2>
<section>
  <p>Total invested: <strong>{}</strong></p>
  <p>Current value: <strong>{}</strong></p>
  <p>P&amp;L: <strong>{} ({}%)</strong></p>
</section>
<table>
  <tr><th>Symbol</th><th>Qty</th><th>Invested</th><th>Value</th><th>P&amp;L</th></tr>
  {}
</table>
<p><a href="/portfolio">Back to portfolio</a></p>"#,
        money(summary.total_invested),
        money(summary.current_value),
        money(summary.profit_loss),
        money(summary.pnl_percent),
        rows
    );
    layout("Investment", true, flash, &body)
}

pub fn transactions_page(entries: &[(LedgerEntry, Stock)], flash: &FlashParams) -> String {
    let rows: String = entries
        .iter()
        .map(|(entry, stock)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                entry.side,
                esc(&stock.symbol),
                entry.quantity,
                money(entry.price),
                money(entry.price * Decimal::from(entry.quantity)),
            )
        })
        .collect();
    let body = format!(
        r#"<h2>Transaction history</h2>
<table>
  <tr><th>Time</th><th>Side</th><th>Symbol</th><th>Qty</th><th>Price</th><th>Total</th></tr>
  {}
</table>"#,
        rows
    );
    layout("Transactions", true, flash, &body)
}

pub fn profile_page(user: &User, profile: &Profile, flash: &FlashParams) -> String {
    let body = format!(
        r#"<h2>Your profile</h2>
<p>Full name: {}</p>
<p>Phone number: {}</p>
<p>Wallet balance: {}</p>
<p>Member since: {}</p>"#,
        esc(&profile.full_name),
        esc(user.phone.as_str()),
        money(profile.balance),
        user.created_at.format("%Y-%m-%d"),
    );
    layout("Profile", true, flash, &body)
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        false,
        &FlashParams::default(),
        &format!("<h2>Something went wrong</h2><p>{}</p>", esc(message)),
    )
}
