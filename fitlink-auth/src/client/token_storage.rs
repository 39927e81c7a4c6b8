use crate::common::TokenRecord;
use crate::config::Settings;
use crate::error::AuthError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const TOKEN_FILE_NAME: &str = "fitbit_tokens.json";

/// Single-slot JSON token file. Each save replaces the previous record.
#[derive(Debug, Clone)]
pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    /// Store under the per-user data directory, e.g. `~/.local/share/fitlink/`
    pub fn new() -> Result<Self, AuthError> {
        let data_dir = Self::get_data_dir()?;
        Self::with_path(data_dir.join(TOKEN_FILE_NAME))
    }

    pub fn with_path(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        if let Some(parent) = token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        Ok(Self { token_path })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        match &settings.token_path {
            Some(path) => Self::with_path(path.clone()),
            None => Self::new(),
        }
    }

    pub fn get_data_dir() -> Result<PathBuf, AuthError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find data directory".to_string()))?
            .join("fitlink");
        Ok(data_dir)
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    /// Write the record as indented JSON, atomically replacing any previous file.
    pub fn save_token(&self, token: &TokenRecord) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(token)?;
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to create temp file: {}", e)))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;
        drop(file);

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        fs::rename(&temp_path, &self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to replace token file: {}", e)))?;

        tracing::debug!(path = %self.token_path.display(), "Token record saved");
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet
    pub fn load_token(&self) -> Result<Option<TokenRecord>, AuthError> {
        let json = match fs::read_to_string(&self.token_path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AuthError::TokenStorage(format!(
                    "Failed to read token: {}",
                    e
                )))
            }
        };

        let token: TokenRecord = serde_json::from_str(&json)?;
        Ok(Some(token))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.token_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(access: &str, refresh: &str) -> TokenRecord {
        TokenRecord {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expires_in: 28800,
            obtained_at: Utc::now(),
            scope: Some("activity".to_string()),
            token_type: Some("bearer".to_string()),
        }
    }

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::with_path(dir.path().join("fitlink").join(TOKEN_FILE_NAME)).unwrap()
    }

    #[test]
    fn load_without_save_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load_token().unwrap().is_none());
    }

    #[test]
    fn with_path_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.path().parent().unwrap().is_dir());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let token = record("access-1", "refresh-1");

        store.save_token(&token).unwrap();

        let loaded = store.load_token().unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-1");
        assert_eq!(loaded.refresh_token, "refresh-1");
        assert_eq!(
            loaded.obtained_at.timestamp_millis(),
            token.obtained_at.timestamp_millis()
        );
    }

    #[test]
    fn second_save_wins() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_token(&record("first", "r1")).unwrap();
        store.save_token(&record("second", "r2")).unwrap();

        let loaded = store.load_token().unwrap().unwrap();
        assert_eq!(loaded.access_token, "second");
        assert_eq!(loaded.refresh_token, "r2");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn saved_file_is_indented_json() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_token(&record("a", "r")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"access_token\": \"a\""));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load_token(), Err(AuthError::Json(_))));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_token(&record("a", "r")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
