//! Route handlers. Every mutating flow redirects with a flash message in
//! the query string; rendering stays in `pages`.

use crate::domain::error::DomainError;
use crate::web::forms::{FieldError, FlashParams, LoginForm, QuantityForm, RegisterForm, SymbolQuery};
use crate::web::pages;
use crate::web::session::{clear_session_cookie, session_cookie, token_from_cookies};
use crate::web::AppState;
use axum::extract::{Form, FromRequestParts, Path, Query, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use log::error;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_form).post(register_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/portfolio", get(portfolio))
        .route("/watchlist", get(watchlist))
        .route("/watchlist/add/{symbol}", post(watchlist_add))
        .route("/watchlist/remove/{item_id}", post(watchlist_remove))
        .route("/buy/search", get(buy_search))
        .route("/buy/{stock_id}", get(buy_form).post(buy_submit))
        .route("/sell/{stock_id}", get(sell_form).post(sell_submit))
        .route("/investment", get(investment))
        .route("/transactions", get(transactions))
        .route("/profile", get(profile))
        .with_state(state)
}

/// The logged-in user's id, taken from a valid session cookie. Routes that
/// take this extractor redirect to the login page when there is none.
pub struct CurrentUser(pub String);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        session_user(state, &parts.headers)
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Resolve a session cookie to a live user id, if any.
fn session_user(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookies)?;
    let user_id = state.sessions.validate(&token).ok()?;
    // The cookie can outlive the account row.
    match state.app.user(&user_id) {
        Ok(Some(_)) => Some(user_id),
        _ => None,
    }
}

fn redirect_with_msg(path: &str, msg: &str) -> Redirect {
    Redirect::to(&format!("{path}?msg={}", urlencoding::encode(msg)))
}

fn redirect_with_err(path: &str, err: &str) -> Redirect {
    Redirect::to(&format!("{path}?err={}", urlencoding::encode(err)))
}

fn internal_error(err: DomainError) -> Response {
    error!("request failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::error_page("Please try again later.")),
    )
        .into_response()
}

fn with_session_cookie(redirect: Redirect, cookie: String) -> Response {
    let mut response = redirect.into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if session_user(&state, &headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(pages::home_page()).into_response()
}

async fn register_form(Query(flash): Query<FlashParams>) -> Html<String> {
    Html(pages::register_page(&RegisterForm::default(), &[], &flash))
}

async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            return Html(pages::register_page(&form, &errors, &FlashParams::default()))
                .into_response()
        }
    };
    match state.app.register(request) {
        Ok(_) => {
            redirect_with_msg("/login", "Account created successfully. Please login.").into_response()
        }
        Err(DomainError::DuplicatePhone(_)) => {
            let errors = vec![FieldError {
                field: "phone_number",
                message: "Phone number already registered.".into(),
            }];
            Html(pages::register_page(&form, &errors, &FlashParams::default())).into_response()
        }
        Err(DomainError::InvalidInput(message)) => {
            let errors = vec![FieldError {
                field: "form",
                message,
            }];
            Html(pages::register_page(&form, &errors, &FlashParams::default())).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn login_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(flash): Query<FlashParams>,
) -> Response {
    if session_user(&state, &headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(pages::login_page("", None, &flash)).into_response()
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.app.authenticate(&form.phone_number, &form.password) {
        Ok(user) => match state.sessions.issue(&user.id) {
            Ok(token) => {
                let cookie = session_cookie(&token, state.sessions.ttl());
                with_session_cookie(Redirect::to("/dashboard"), cookie)
            }
            Err(e) => internal_error(e),
        },
        Err(DomainError::Unauthorized) => Html(pages::login_page(
            &form.phone_number,
            Some("Invalid phone number or password."),
            &FlashParams::default(),
        ))
        .into_response(),
        Err(e) => internal_error(e),
    }
}

async fn logout() -> Response {
    with_session_cookie(Redirect::to("/login"), clear_session_cookie())
}

async fn dashboard(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let profile = match state.app.profile(&user_id) {
        Ok(p) => p,
        Err(e) => return internal_error(e),
    };
    let summary = match state.app.portfolio_summary(&user_id).await {
        Ok(s) => s,
        Err(e) => return internal_error(e),
    };
    let overview = match state.app.market_overview().await {
        Ok(o) => o,
        Err(e) => return internal_error(e),
    };
    let recent = match state.app.history(&user_id, Some(5)) {
        Ok(r) => r,
        Err(e) => return internal_error(e),
    };
    Html(pages::dashboard_page(
        &profile, &summary, &overview, &recent, &flash,
    ))
    .into_response()
}

async fn portfolio(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    match state.app.holdings(&user_id).await {
        Ok(holdings) => Html(pages::portfolio_page(&holdings, &flash)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn watchlist(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let entries = match state.app.watchlist(&user_id).await {
        Ok(entries) => entries,
        Err(e) => return internal_error(e),
    };
    let popular = match state.app.popular_stocks().await {
        Ok(popular) => popular,
        Err(e) => return internal_error(e),
    };
    Html(pages::watchlist_page(&entries, &popular, &flash)).into_response()
}

async fn watchlist_add(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Response {
    match state.app.watch(&user_id, &symbol).await {
        Ok(item) => {
            let stock = state.app.stock(&item.stock_id).ok().flatten();
            let symbol = stock.map(|s| s.symbol).unwrap_or(symbol);
            redirect_with_msg("/watchlist", &format!("{symbol} added to watchlist."))
                .into_response()
        }
        Err(DomainError::NotFound(_)) => {
            redirect_with_err("/watchlist", &format!("Stock not found: {symbol}")).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn watchlist_remove(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Response {
    match state.app.unwatch(&user_id, &item_id) {
        Ok(()) => redirect_with_msg("/watchlist", "Removed from watchlist.").into_response(),
        Err(DomainError::NotFound(_)) => {
            redirect_with_err("/watchlist", "Watchlist entry not found.").into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// Symbol search lands on the buy page for the resolved stock.
async fn buy_search(
    CurrentUser(_user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolQuery>,
) -> Response {
    let symbol = query.symbol.unwrap_or_default();
    if symbol.trim().is_empty() {
        return redirect_with_err("/dashboard", "Enter a symbol to search.").into_response();
    }
    match state.app.resolve_stock(&symbol).await {
        Ok(stock) => Redirect::to(&format!("/buy/{}", stock.id)).into_response(),
        Err(DomainError::NotFound(_)) => {
            redirect_with_err("/dashboard", &format!("Stock not found: {}", symbol.trim()))
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn buy_form(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(stock_id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let stock = match state.app.stock(&stock_id) {
        Ok(Some(stock)) => stock,
        Ok(None) => return redirect_with_err("/dashboard", "Stock not found.").into_response(),
        Err(e) => return internal_error(e),
    };
    let profile = match state.app.profile(&user_id) {
        Ok(p) => p,
        Err(e) => return internal_error(e),
    };
    let quote = state.app.quote(&stock.symbol).await;
    Html(pages::buy_page(&stock, quote.as_ref(), &profile, &flash)).into_response()
}

async fn buy_submit(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(stock_id): Path<String>,
    Form(form): Form<QuantityForm>,
) -> Response {
    let back = format!("/buy/{stock_id}");
    let quantity = match form.validate() {
        Ok(quantity) => quantity,
        Err(e) => return redirect_with_err(&back, &e.message).into_response(),
    };
    match state.app.buy(&user_id, &stock_id, quantity).await {
        Ok((stock, receipt)) => redirect_with_msg(
            "/portfolio",
            &format!(
                "Bought {} shares of {} for {:.2}.",
                quantity, stock.symbol, receipt.total
            ),
        )
        .into_response(),
        Err(DomainError::InsufficientBalance { .. }) => {
            redirect_with_err(&back, "Insufficient balance for this purchase.").into_response()
        }
        Err(DomainError::NotFound(_)) => {
            redirect_with_err("/dashboard", "Stock not found.").into_response()
        }
        Err(DomainError::InvalidInput(message)) => {
            redirect_with_err(&back, &message).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn sell_form(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(stock_id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let stock = match state.app.stock(&stock_id) {
        Ok(Some(stock)) => stock,
        Ok(None) => return redirect_with_err("/portfolio", "Stock not found.").into_response(),
        Err(e) => return internal_error(e),
    };
    let holding = match state.app.holding(&user_id, &stock_id) {
        Ok(Some(holding)) => holding,
        Ok(None) => {
            return redirect_with_err("/portfolio", "You do not hold this stock.").into_response()
        }
        Err(e) => return internal_error(e),
    };
    let quote = state.app.quote(&stock.symbol).await;
    Html(pages::sell_page(
        &stock,
        holding.quantity,
        holding.avg_price,
        quote.as_ref(),
        &flash,
    ))
    .into_response()
}

async fn sell_submit(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(stock_id): Path<String>,
    Form(form): Form<QuantityForm>,
) -> Response {
    let back = format!("/sell/{stock_id}");
    let quantity = match form.validate() {
        Ok(quantity) => quantity,
        Err(e) => return redirect_with_err(&back, &e.message).into_response(),
    };
    match state.app.sell(&user_id, &stock_id, quantity).await {
        Ok((stock, receipt)) => redirect_with_msg(
            "/portfolio",
            &format!(
                "Sold {} shares of {} for {:.2}.",
                quantity, stock.symbol, receipt.total
            ),
        )
        .into_response(),
        Err(DomainError::InsufficientShares { held, .. }) => {
            redirect_with_err(&back, &format!("You only hold {held} shares.")).into_response()
        }
        Err(DomainError::NotFound(_)) => {
            redirect_with_err("/portfolio", "Stock not found.").into_response()
        }
        Err(DomainError::InvalidInput(message)) => {
            redirect_with_err(&back, &message).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn investment(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let holdings = match state.app.holdings(&user_id).await {
        Ok(holdings) => holdings,
        Err(e) => return internal_error(e),
    };
    let summary = match state.app.portfolio_summary(&user_id).await {
        Ok(s) => s,
        Err(e) => return internal_error(e),
    };
    Html(pages::investment_page(&summary, &holdings, &flash)).into_response()
}

async fn transactions(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    match state.app.history(&user_id, None) {
        Ok(entries) => Html(pages::transactions_page(&entries, &flash)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn profile(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(flash): Query<FlashParams>,
) -> Response {
    let user = match state.app.user(&user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(e) => return internal_error(e),
    };
    let user_profile = match state.app.profile(&user_id) {
        Ok(p) => p,
        Err(e) => return internal_error(e),
    };
    Html(pages::profile_page(&user, &user_profile, &flash)).into_response()
}
