use crate::events::DataEvent;
use chrono::{Local, NaiveDate, Utc};
use fitbit_api::{Client, FitbitApiError, Request};
use fitlink_auth::{AuthError, TokenStore};
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum StepsError {
    TokenStore(AuthError),
    Api(FitbitApiError),
}

impl std::fmt::Display for StepsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepsError::TokenStore(e) => write!(f, "Could not read stored tokens: {}", e),
            StepsError::Api(e) if e.is_expired_token() => {
                write!(f, "Fitbit API error: {} (press c to re-connect)", e)
            }
            StepsError::Api(e) => write!(f, "Fitbit API error: {}", e),
        }
    }
}

impl std::error::Error for StepsError {}

impl From<AuthError> for StepsError {
    fn from(value: AuthError) -> Self {
        StepsError::TokenStore(value)
    }
}

impl From<FitbitApiError> for StepsError {
    fn from(value: FitbitApiError) -> Self {
        StepsError::Api(value)
    }
}

/// Reads the stored access token and asks Fitbit for a day's step count
#[derive(Clone)]
pub struct StepsLoader {
    pub token_store: TokenStore,
    pub api_base_url: String,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl StepsLoader {
    pub fn new(
        token_store: TokenStore,
        api_base_url: impl Into<String>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            token_store,
            api_base_url: api_base_url.into(),
            data_tx,
        }
    }

    /// Steps for the local calendar day
    pub async fn fetch_today_steps(&self) -> Result<u64, StepsError> {
        self.fetch_steps_on(Local::now().date_naive()).await
    }

    /// Returns 0 without calling Fitbit when no account is linked yet.
    pub async fn fetch_steps_on(&self, date: NaiveDate) -> Result<u64, StepsError> {
        Ok(self.fetch_linked_steps(date).await?.unwrap_or(0))
    }

    /// `None` when no tokens are stored, so callers can tell "not linked"
    /// apart from a genuine zero.
    async fn fetch_linked_steps(&self, date: NaiveDate) -> Result<Option<u64>, StepsError> {
        let Some(token) = self.token_store.load_token()? else {
            tracing::info!(%date, "No Fitbit tokens stored, reporting 0 steps");
            return Ok(None);
        };

        if token.is_expired_at(Utc::now()) {
            // No refresh; Fitbit will most likely answer 401
            tracing::warn!(
                access_token = %token.redacted_access_token(),
                expires_at = %token.expires_at(),
                "Access token expired"
            );
        }

        let client = Client::with_base_url(&self.api_base_url, &token.access_token);
        let req = Request::activities().daily_summary(date);

        match client.send(req).await {
            Ok(response) => {
                tracing::info!(%date, steps = response.summary.steps, "Loaded steps");
                Ok(Some(response.summary.steps))
            }
            Err(e) => {
                match &e {
                    FitbitApiError::Fitbit(status, errors) => {
                        tracing::error!(%status, ?errors, %date, "Steps request failed")
                    }
                    FitbitApiError::Unexpected(status, body) => {
                        tracing::error!(%status, %body, %date, "Steps request failed")
                    }
                    FitbitApiError::Internal(inner) => {
                        tracing::error!(error = %inner, %date, "Steps request failed")
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Background task body: fetch today's steps and report on the data channel
    pub async fn load_today_steps(&self) {
        let date = Local::now().date_naive();
        tracing::info!(%date, "Loading steps");

        let event = match self.fetch_linked_steps(date).await {
            Ok(Some(steps)) => DataEvent::StepsLoaded {
                date,
                steps,
                linked: true,
            },
            Ok(None) => DataEvent::StepsLoaded {
                date,
                steps: 0,
                linked: false,
            },
            Err(e) => DataEvent::StepsLoadFailed {
                error: e.to_string(),
            },
        };
        let _ = self.data_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use fitlink_auth::TokenRecord;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn loader(server: &MockServer, dir: &TempDir) -> (StepsLoader, mpsc::UnboundedReceiver<DataEvent>) {
        let store = TokenStore::with_path(dir.path().join("fitbit_tokens.json")).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (StepsLoader::new(store, server.uri(), tx), rx)
    }

    fn store_token(loader: &StepsLoader, obtained_ago: TimeDelta) {
        loader
            .token_store
            .save_token(&TokenRecord {
                access_token: "access-abc".to_string(),
                refresh_token: "refresh-xyz".to_string(),
                expires_in: 28800,
                obtained_at: Utc::now() - obtained_ago,
                scope: Some("activity".to_string()),
                token_type: Some("Bearer".to_string()),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn no_token_means_zero_steps_and_no_call() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (loader, _rx) = loader(&server, &dir);

        let steps = loader.fetch_today_steps().await.unwrap();

        assert_eq!(steps, 0);
    }

    #[tokio::test]
    async fn returns_summary_steps() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path("/1/user/-/activities/date/2025-09-19.json"))
            .and(header("Authorization", "Bearer access-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "activities": [],
                "goals": { "steps": 10000 },
                "summary": { "steps": 4321, "caloriesOut": 2100 }
            })))
            .expect(1)
            .mount(&server)
            .await;
        let (loader, _rx) = loader(&server, &dir);
        store_token(&loader, TimeDelta::zero());

        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();
        let steps = loader.fetch_steps_on(date).await.unwrap();

        assert_eq!(steps, 4321);
    }

    #[tokio::test]
    async fn expired_token_surfaces_api_error() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "errors": [{
                    "errorType": "expired_token",
                    "message": "Access token expired: access-abc"
                }],
                "success": false
            })))
            .expect(1)
            .mount(&server)
            .await;
        let (loader, _rx) = loader(&server, &dir);
        store_token(&loader, TimeDelta::hours(9));

        let err = loader.fetch_today_steps().await.unwrap_err();

        match err {
            StepsError::Api(api_err) => {
                assert_eq!(api_err.status().map(|s| s.as_u16()), Some(401));
                assert!(api_err.is_expired_token());
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn background_load_reports_on_channel() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path_regex(r"^/1/user/-/activities/date/\d{4}-\d{2}-\d{2}\.json$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "summary": { "steps": 12 }
            })))
            .mount(&server)
            .await;
        let (loader, mut rx) = loader(&server, &dir);
        store_token(&loader, TimeDelta::zero());

        loader.load_today_steps().await;

        assert!(matches!(
            rx.recv().await,
            Some(DataEvent::StepsLoaded {
                steps: 12,
                linked: true,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn background_load_without_token_reports_unlinked() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (loader, mut rx) = loader(&server, &dir);

        loader.load_today_steps().await;

        assert!(matches!(
            rx.recv().await,
            Some(DataEvent::StepsLoaded {
                steps: 0,
                linked: false,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn expired_token_failure_suggests_reconnect() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "errors": [{ "errorType": "expired_token", "message": "Access token expired" }],
                "success": false
            })))
            .mount(&server)
            .await;
        let (loader, mut rx) = loader(&server, &dir);
        store_token(&loader, TimeDelta::hours(9));

        loader.load_today_steps().await;

        match rx.recv().await {
            Some(DataEvent::StepsLoadFailed { error }) => {
                assert!(error.contains("re-connect"), "unexpected message: {}", error);
            }
            other => panic!("expected failure event, got {:?}", other),
        }
    }

    #[derive(Clone, Default)]
    struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_request_logs_status_and_date_fields() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;
        let (loader, _rx) = loader(&server, &dir);
        store_token(&loader, TimeDelta::zero());

        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();
        assert!(loader.fetch_steps_on(date).await.is_err());

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Steps request failed"), "logs: {}", logs);
        assert!(logs.contains("status=503"), "logs: {}", logs);
        assert!(logs.contains("date=2025-09-19"), "logs: {}", logs);
        assert!(logs.contains("body=upstream down"), "logs: {}", logs);
    }
}
