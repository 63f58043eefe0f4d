use std::{fs, io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::{ApiClient, ClientError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub username: String,
    pub is_authenticated: bool,
    #[serde(default)]
    pub token: Option<String>,
}

/// JSON file holding the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable data yields a logged-out state.
    pub fn load(&self) -> SessionState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return SessionState::default(),
            Err(e) => {
                log::warn!("Could not read session file {}: {}", self.path.display(), e);
                return SessionState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding corrupt session file {}: {}", self.path.display(), e);
                SessionState::default()
            }
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Authentication state of the running client, persisted on every transition.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    store: SessionStore,
}

impl Session {
    pub fn load(store: SessionStore) -> Self {
        let state = store.load();
        Self { state, store }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated && self.state.token.is_some()
    }

    pub fn username(&self) -> &str {
        &self.state.username
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn login(&mut self, username: &str, token: &str) -> Result<(), ClientError> {
        self.state = SessionState {
            username: username.to_string(),
            is_authenticated: true,
            token: Some(token.to_string()),
        };
        self.store.save(&self.state)?;
        log::info!("Logged in as {}", username);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.state = SessionState::default();
        self.store.clear()
    }

    /// Copies the current token onto `api`.
    pub fn authorize(&self, api: &mut ApiClient) {
        api.set_token(self.state.token.clone());
    }
}
