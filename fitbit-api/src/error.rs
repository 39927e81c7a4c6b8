use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum FitbitApiError {
    /// Error response in Fitbit's `{"errors": [...]}` envelope
    Fitbit(StatusCode, Vec<ErrorDetail>),
    /// Non-2xx response whose body is not a Fitbit error envelope
    Unexpected(StatusCode, String),
    Internal(ApiError),
}

impl FitbitApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Fitbit(status, _) | Self::Unexpected(status, _) => Some(*status),
            Self::Internal(_) => None,
        }
    }

    /// True when Fitbit rejected the bearer token as expired
    pub fn is_expired_token(&self) -> bool {
        match self {
            Self::Fitbit(_, errors) => errors.iter().any(|e| e.error_type == "expired_token"),
            _ => false,
        }
    }
}

impl From<ApiError> for FitbitApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                match serde_json::from_str::<ErrorResponse>(&detail) {
                    Ok(response) => FitbitApiError::Fitbit(status, response.errors),
                    Err(_) => FitbitApiError::Unexpected(status, detail),
                }
            }
            e => FitbitApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for FitbitApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitbitApiError::Internal(e) => write!(f, "Internal error: {}", e),
            FitbitApiError::Unexpected(status, body) => write!(f, "({}) {}", status, body),
            FitbitApiError::Fitbit(status, errors) => {
                write!(f, "({})", status)?;
                for error in errors {
                    write!(f, " {}: {}", error.error_type, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FitbitApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_type: String,
    #[serde(default)]
    pub field_name: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fitbit_error_envelope() {
        let body = r#"{"errors":[{"errorType":"expired_token","message":"Access token expired: abc"}],"success":false}"#;
        let err = FitbitApiError::from(ApiError::ClientError(
            StatusCode::UNAUTHORIZED,
            body.to_string(),
        ));

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.is_expired_token());
        assert!(err.to_string().contains("expired_token"));
    }

    #[test]
    fn keeps_raw_body_when_not_an_envelope() {
        let err = FitbitApiError::from(ApiError::ServerError(
            StatusCode::BAD_GATEWAY,
            "<html>upstream down</html>".to_string(),
        ));

        match err {
            FitbitApiError::Unexpected(status, body) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "<html>upstream down</html>");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
