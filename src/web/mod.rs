pub mod forms;
pub mod handlers;
pub mod pages;
pub mod session;

use crate::TradeX;
use session::SessionManager;

pub use handlers::router;

pub struct AppState {
    pub app: TradeX,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(app: TradeX, sessions: SessionManager) -> Self {
        Self { app, sessions }
    }
}
