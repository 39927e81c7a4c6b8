use crate::client::TokenStore;
use crate::common::TokenRecord;
use crate::server::error::ServerError;

use super::OAuthClient;

/// Code exchange followed by a wholesale overwrite of the stored record.
pub struct TokenExchange {
    oauth_client: OAuthClient,
    token_store: TokenStore,
}

impl TokenExchange {
    pub fn new(oauth_client: OAuthClient, token_store: TokenStore) -> Self {
        Self {
            oauth_client,
            token_store,
        }
    }

    pub async fn exchange(&self, code: &str) -> Result<TokenRecord, ServerError> {
        let record = self.oauth_client.exchange_code_for_token(code).await?;

        self.token_store.save_token(&record)?;

        tracing::info!(
            path = %self.token_store.path().display(),
            expires_at = %record.expires_at(),
            "Stored new token record"
        );

        Ok(record)
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }
}
