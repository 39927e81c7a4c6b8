// Token record shared by the store, the exchange and the frontend
pub mod common;
pub mod config;

// Browser launch and token persistence
mod client;
mod error;

// Local callback listener and token exchange
pub mod server;

pub use client::{authorization_url, launch_authorization, TokenStore, SCOPE};
pub use common::TokenRecord;
pub use config::Settings;
pub use error::AuthError;
pub use server::{AuthContext, AuthEvent};
