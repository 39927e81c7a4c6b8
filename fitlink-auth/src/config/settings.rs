use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use crate::error::AuthError;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
const FITBIT_AUTHORIZE_URL: &str = "https://www.fitbit.com/oauth2/authorize";
const FITBIT_TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";
const FITBIT_API_BASE_URL: &str = "https://api.fitbit.com";

/// Application settings.
///
/// Sources, later ones winning: built-in defaults, an optional TOML file
/// (`FITLINK_CONFIG`, default `fitlink.toml`), `FITBIT_*` environment
/// variables, and finally a bare `REDIRECT_URI`.
#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "empty_secret")]
    pub client_secret: SecretString,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Overrides the token file location under the user data directory
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_listen_host() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    3000
}

fn default_authorize_url() -> String {
    FITBIT_AUTHORIZE_URL.to_string()
}

fn default_token_url() -> String {
    FITBIT_TOKEN_URL.to_string()
}

fn default_api_base_url() -> String {
    FITBIT_API_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: empty_secret(),
            redirect_uri: default_redirect_uri(),
            listen_host: default_listen_host(),
            listen_port: default_listen_port(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            api_base_url: default_api_base_url(),
            token_path: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, AuthError> {
        let config_path =
            std::env::var("FITLINK_CONFIG").unwrap_or_else(|_| "fitlink.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("FITBIT").try_parsing(true))
            .set_override_option("redirect_uri", std::env::var("REDIRECT_URI").ok())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::Configuration(
                "FITBIT_CLIENT_ID is required".to_string(),
            ));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(AuthError::Configuration(
                "FITBIT_CLIENT_SECRET is required".to_string(),
            ));
        }

        let redirect = Url::parse(&self.redirect_uri)?;
        if !matches!(redirect.scheme(), "http" | "https") {
            return Err(AuthError::Configuration(
                "REDIRECT_URI must be a valid HTTP(S) URL".to_string(),
            ));
        }

        // The provider redirects the browser here, so a local redirect has to
        // land on the port we listen on.
        let is_local = matches!(
            redirect.host_str(),
            Some("localhost") | Some("127.0.0.1") | Some("[::1]")
        );
        if is_local && redirect.port_or_known_default() != Some(self.listen_port) {
            return Err(AuthError::Configuration(format!(
                "REDIRECT_URI port does not match listen port {}",
                self.listen_port
            )));
        }

        Ok(())
    }

    /// Path component of the redirect URI, served by the callback listener
    pub fn callback_path(&self) -> Result<String, AuthError> {
        let redirect = Url::parse(&self.redirect_uri)?;
        Ok(redirect.path().to_string())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }
}
