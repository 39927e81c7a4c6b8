use serde::Deserialize;

// GET /callback
//
// Every field is optional: the provider sends either `code` or `error`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
