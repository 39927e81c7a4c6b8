use chrono::Utc;
use oauth2::{
    basic::BasicClient, AuthorizationCode, ClientId, ClientSecret, HttpRequest, HttpResponse,
    RedirectUrl, TokenResponse, TokenUrl,
};
use secrecy::ExposeSecret;

use crate::common::TokenRecord;
use crate::config::Settings;
use crate::server::error::ServerError;

// Async HTTP function for oauth2; no timeout, no retry.
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

/// Authorization-code exchange against the provider's token endpoint.
///
/// Client credentials go in an HTTP Basic `Authorization` header; the body is
/// form-encoded with `grant_type`, `code` and `redirect_uri`.
pub struct OAuthClient {
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl OAuthClient {
    pub fn new(settings: &Settings) -> Result<Self, ServerError> {
        let token_url = TokenUrl::new(settings.token_url.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(settings.redirect_uri.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        Ok(Self {
            client_id: ClientId::new(settings.client_id.clone()),
            client_secret: ClientSecret::new(settings.client_secret.expose_secret().to_string()),
            token_url,
            redirect_url,
        })
    }

    /// Exchange an authorization code, stamping the result with the local time.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenRecord, ServerError> {
        let token_result = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await?;

        let obtained_at = Utc::now();

        let access_token = token_result.access_token().secret().to_string();
        let refresh_token = token_result
            .refresh_token()
            .ok_or_else(|| ServerError::OAuthError("No refresh token in response".to_string()))?
            .secret()
            .to_string();

        let expires_in = token_result
            .expires_in()
            .ok_or_else(|| ServerError::OAuthError("No expiration time in response".to_string()))?
            .as_secs();

        let scope = token_result.scopes().map(|scopes| {
            scopes
                .iter()
                .map(|scope| scope.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });

        tracing::debug!(
            expires_in,
            obtained_at = %obtained_at,
            "Successfully exchanged code for tokens"
        );

        Ok(TokenRecord {
            access_token,
            refresh_token,
            expires_in,
            obtained_at,
            scope,
            token_type: Some(AsRef::<str>::as_ref(token_result.token_type()).to_string()),
        })
    }
}
