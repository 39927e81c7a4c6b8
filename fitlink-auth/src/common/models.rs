use chrono::{serde::ts_milliseconds, DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token set persisted after a successful code exchange.
///
/// `obtained_at` is stamped locally by the exchange, never copied from the
/// provider response. Stored as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(with = "ts_milliseconds")]
    pub obtained_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenRecord {
    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = i64::try_from(self.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        self.obtained_at
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Only used for diagnostics; nothing refreshes or gates on this.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }

    /// Short prefix of the access token, safe to log
    pub fn redacted_access_token(&self) -> String {
        let prefix: String = self.access_token.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> TokenRecord {
        TokenRecord {
            access_token: "eyJhbGciOiJIUzI1NiJ9.access".to_string(),
            refresh_token: "c643a63c072f0f05478e9d18b991db80".to_string(),
            expires_in: 28800,
            obtained_at: Utc.with_ymd_and_hms(2025, 9, 19, 8, 0, 0).unwrap(),
            scope: Some("activity".to_string()),
            token_type: Some("Bearer".to_string()),
        }
    }

    #[test]
    fn expires_at_adds_lifetime_to_obtained_at() {
        let token = record();
        assert_eq!(
            token.expires_at(),
            Utc.with_ymd_and_hms(2025, 9, 19, 16, 0, 0).unwrap()
        );
        assert!(!token.is_expired_at(Utc.with_ymd_and_hms(2025, 9, 19, 15, 59, 59).unwrap()));
        assert!(token.is_expired_at(Utc.with_ymd_and_hms(2025, 9, 19, 16, 0, 0).unwrap()));
    }

    #[test]
    fn obtained_at_is_stored_as_epoch_millis() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["obtained_at"], serde_json::json!(1758268800000_i64));

        let parsed: TokenRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let parsed: TokenRecord = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"obtained_at":1758268800000}"#,
        )
        .unwrap();
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.token_type, None);
    }

    #[test]
    fn redaction_keeps_only_a_prefix() {
        assert_eq!(record().redacted_access_token(), "eyJhbG…");
    }
}
