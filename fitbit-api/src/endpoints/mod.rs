pub mod activities;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Path segment identifying whose data is requested.
///
/// Fitbit accepts `-` as "the user the access token belongs to"; explicit
/// encoded ids (e.g. `GGNJL9`) are only needed when reading shared data.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserId {
    #[default]
    #[serde(rename = "-")]
    CurrentUser,
    #[serde(untagged)]
    Encoded(String),
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentUser => f.write_str("-"),
            Self::Encoded(id) => f.write_str(id),
        }
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        match s {
            "-" | "" => UserId::CurrentUser,
            _ => UserId::Encoded(s.to_string()),
        }
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId::from(s.as_str())
    }
}
