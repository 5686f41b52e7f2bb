//! # Session
//!
//! The credential the client attaches to requests and the identity that came
//! with it. One [`Session`] is created at start-up and injected into the
//! [`ApiClient`](crate::client::ApiClient); the client's 401 handling and the
//! route guard both read and clear this same object.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;

/// Everything the client remembers about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

/// Shared handle to the session credential.
///
/// Cloning is cheap and every clone sees the same state. When built with
/// [`Session::load`] each mutation is written back to disk.
#[derive(Debug, Clone)]
pub struct Session {
    data: Arc<Mutex<SessionData>>,
    path: Option<PathBuf>,
}

impl Session {
    /// A session that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            data: Arc::new(Mutex::new(SessionData::default())),
            path: None,
        }
    }

    /// An empty session that writes to `path` on its next mutation. Whatever
    /// is currently stored there is left alone until then.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            data: Arc::new(Mutex::new(SessionData::default())),
            path: Some(path.into()),
        }
    }

    /// Loads the session stored at `path`. A missing file yields an empty,
    /// file-backed session.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Session)` - The stored session, or an empty one
    /// - `Err(Error::Serialization)` - The file exists but is not a session;
    ///   [`Session::at`] starts over without touching it
    /// - `Err(Error::Storage)` - The file could not be read
    ///
    /// # Example
    ///
    /// ```
    /// let session = Session::load(config::session_path()).await?;
    /// if session.is_authenticated().await {
    ///     info!("Signed in as {}", session.username().await.unwrap_or_default());
    /// }
    /// ```
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            data: Arc::new(Mutex::new(data)),
            path: Some(path),
        })
    }

    pub async fn token(&self) -> Option<String> {
        self.data.lock().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.data.lock().await.token.is_some()
    }

    pub async fn username(&self) -> Option<String> {
        self.data.lock().await.username.clone()
    }

    pub async fn user_id(&self) -> Option<i64> {
        self.data.lock().await.user_id
    }

    pub async fn snapshot(&self) -> SessionData {
        self.data.lock().await.clone()
    }

    /// Stores a fresh credential. Username and user id are only overwritten
    /// when provided.
    ///
    /// # Arguments
    ///
    /// * `token` - The bearer token to send from now on
    /// * `username` - Display name, kept from the previous sign-in when `None`
    /// * `user_id` - Backend id, kept from the previous sign-in when `None`
    pub async fn sign_in(
        &self,
        token: String,
        username: Option<String>,
        user_id: Option<i64>,
    ) -> Result<()> {
        let mut data = self.data.lock().await;
        data.token = Some(token);
        if username.is_some() {
            data.username = username;
        }
        if user_id.is_some() {
            data.user_id = user_id;
        }
        data.logged_in_at = Some(Utc::now());
        self.persist(&data).await
    }

    /// Replaces the token only, keeping the identity fields.
    pub async fn set_token(&self, token: String) -> Result<()> {
        let mut data = self.data.lock().await;
        data.token = Some(token);
        self.persist(&data).await
    }

    /// Forgets the credential and the identity that came with it.
    pub async fn clear(&self) -> Result<()> {
        let mut data = self.data.lock().await;
        *data = SessionData::default();
        match &self.path {
            Some(path) => match async_fs::remove_file(path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            None => Ok(()),
        }
    }

    async fn persist(&self, data: &SessionData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(data)?;
        async_fs::write(path, json).await?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}
