use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::Instrument;

use crate::server::{error::ServerError, models::CallbackParams, AppState, AuthEvent};

const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Fitbit Connected</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            margin: 0;
        }
    </style>
</head>
<body>
    <h3>Fitbit connected! Go back to the app.</h3>
</body>
</html>"#;

pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Html<&'static str>, ServerError> {
    let span = tracing::info_span!(
        "oauth_callback",
        has_code = params.code.is_some(),
        has_error = params.error.is_some()
    );

    handle_callback(state, params).instrument(span).await
}

async fn handle_callback(
    state: AppState,
    params: CallbackParams,
) -> Result<Html<&'static str>, ServerError> {
    // Provider-side denial, e.g. the user clicked "Deny"
    if let Some(error) = params.error {
        let message = match params.error_description {
            Some(description) => format!("{}: {}", error, description),
            None => error,
        };

        tracing::warn!(error = %message, "Provider returned an authorization error");
        state.notify(AuthEvent::AuthorizationFailed {
            error: message.clone(),
        });

        return Err(ServerError::BadRequest(message));
    }

    let code = params
        .code
        .ok_or_else(|| ServerError::BadRequest("Missing authorization code".to_string()))?;

    tracing::debug!(code_len = code.len(), "Exchanging authorization code");

    match state.token_exchange.exchange(&code).await {
        Ok(record) => {
            tracing::info!("OAuth callback successful");
            state.notify(AuthEvent::AuthorizationCompleted {
                obtained_at: record.obtained_at,
            });
            Ok(Html(SUCCESS_HTML))
        }
        Err(err) => {
            tracing::error!(error = %err, "Token exchange failed");
            state.notify(AuthEvent::AuthorizationFailed {
                error: err.to_string(),
            });
            Err(err)
        }
    }
}
