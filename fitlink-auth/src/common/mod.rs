mod models;

pub use models::TokenRecord;
