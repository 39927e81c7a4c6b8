pub mod oauth_client;
pub mod token_exchange;

pub use oauth_client::OAuthClient;
pub use token_exchange::TokenExchange;
