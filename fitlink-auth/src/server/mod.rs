mod context;
pub mod error;
pub mod handlers;
pub mod listener;
pub mod models;
pub mod services;

pub use context::AuthContext;
pub use error::ServerError;
pub use listener::CallbackListener;

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use services::TokenExchange;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

/// Notifications from the callback listener to the frontend
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    AuthorizationCompleted { obtained_at: DateTime<Utc> },
    AuthorizationFailed { error: String },
}

pub type AuthEventSender = mpsc::UnboundedSender<AuthEvent>;

#[derive(Clone)]
pub struct AppState {
    pub token_exchange: Arc<TokenExchange>,
    pub notifier: Option<AuthEventSender>,
}

impl AppState {
    /// Deliver an event if a frontend is still listening. Returns whether it was sent.
    pub fn notify(&self, event: AuthEvent) -> bool {
        match &self.notifier {
            Some(tx) if !tx.is_closed() => tx.send(event).is_ok(),
            _ => {
                tracing::debug!(?event, "No live frontend to notify");
                false
            }
        }
    }
}

pub fn router(state: AppState, callback_path: &str) -> Router {
    Router::new()
        .route(callback_path, get(handlers::oauth_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
