use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

use crate::client::{launch_authorization, TokenStore};
use crate::config::Settings;
use crate::error::AuthError;

use super::services::{OAuthClient, TokenExchange};
use super::{router, AppState, AuthEventSender, CallbackListener};

/// Owns everything one authorization flow needs: settings, the exchange, the
/// frontend notifier and the running listener.
pub struct AuthContext {
    settings: Settings,
    state: AppState,
    listener: Option<CallbackListener>,
}

impl AuthContext {
    pub fn new(settings: Settings, token_store: TokenStore) -> Result<Self, AuthError> {
        let oauth_client =
            OAuthClient::new(&settings).map_err(|e| AuthError::Configuration(e.to_string()))?;

        Ok(Self {
            settings,
            state: AppState {
                token_exchange: Arc::new(TokenExchange::new(oauth_client, token_store)),
                notifier: None,
            },
            listener: None,
        })
    }

    /// Attach the frontend that should hear about completed authorizations.
    pub fn with_notifier(mut self, notifier: AuthEventSender) -> Self {
        self.state.notifier = Some(notifier);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn token_store(&self) -> &TokenStore {
        self.state.token_exchange.token_store()
    }

    pub fn app_state(&self) -> AppState {
        self.state.clone()
    }

    pub async fn start(&mut self) -> Result<SocketAddr, AuthError> {
        if let Some(listener) = &self.listener {
            return Err(AuthError::Listener(format!(
                "Callback listener already running on {}",
                listener.local_addr()
            )));
        }

        let callback_path = self.settings.callback_path()?;
        let app = router(self.state.clone(), &callback_path);
        let listener = CallbackListener::start(&self.settings.listen_addr(), app).await?;
        let addr = listener.local_addr();

        self.listener = Some(listener);
        Ok(addr)
    }

    /// Safe to call when nothing is running.
    pub async fn stop(&mut self) -> Result<(), AuthError> {
        match self.listener.take() {
            Some(listener) => listener.shutdown().await,
            None => Ok(()),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().map(CallbackListener::local_addr)
    }

    /// Open the provider's consent page. May be called again at any time.
    pub fn begin_authorization(&self) -> Result<Url, AuthError> {
        launch_authorization(&self.settings)
    }
}
