use url::Url;

use crate::config::Settings;
use crate::error::AuthError;

/// The only scope requested; daily step counts live under `activity`
pub const SCOPE: &str = "activity";

/// Build the provider authorization URL from configuration alone.
pub fn authorization_url(settings: &Settings) -> Result<Url, AuthError> {
    let mut url = Url::parse(&settings.authorize_url)?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &settings.client_id)
        .append_pair("redirect_uri", &settings.redirect_uri)
        .append_pair("scope", SCOPE);
    Ok(url)
}

/// Open the authorization URL in the default browser.
///
/// A browser that fails to launch is logged and otherwise ignored; the URL is
/// returned so the caller can show it for manual use.
pub fn launch_authorization(settings: &Settings) -> Result<Url, AuthError> {
    let url = authorization_url(settings)?;

    match open::that(url.as_str()) {
        Ok(()) => tracing::info!("Opened browser for authorization"),
        Err(e) => tracing::warn!(error = %e, "Failed to open browser automatically"),
    }

    Ok(url)
}
