mod requests;

pub use requests::CallbackParams;
