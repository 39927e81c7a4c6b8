mod launcher;
mod token_storage;

pub use launcher::{authorization_url, launch_authorization, SCOPE};
pub use token_storage::TokenStore;
