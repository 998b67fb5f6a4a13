//! Quill server configuration

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::chat::ChatRelay;
use crate::store::{PostStore, UserStore};

/// Configuration for the Quill Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Root directory for server data
    pub root_dir: PathBuf,
    /// Directory uploaded files are stored in
    pub upload_dir: PathBuf,
    /// Port to listen on
    pub port: u16,
    /// Secret used to sign access tokens
    pub token_secret: String,
    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_base_dir("quill_data")
    }
}

impl ServerConfig {
    /// Create config with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let root_dir = base_dir.into();
        let upload_dir = root_dir.join("files");
        Self {
            root_dir,
            upload_dir,
            port: 8000,
            token_secret: "quill_dev_secret_change_me".to_string(),
            token_ttl_minutes: 15,
        }
    }

    /// Build config from environment variables, falling back to defaults.
    ///
    /// Recognized: QUILL_ROOT, QUILL_PORT, QUILL_TOKEN_SECRET,
    /// QUILL_TOKEN_TTL_MINUTES.
    pub fn from_env() -> Self {
        let base = std::env::var("QUILL_ROOT").unwrap_or_else(|_| "quill_data".to_string());
        let mut config = Self::with_base_dir(base);
        if let Ok(port) = std::env::var("QUILL_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(secret) = std::env::var("QUILL_TOKEN_SECRET") {
            if !secret.is_empty() {
                config.token_secret = secret;
            }
        }
        if let Ok(ttl) = std::env::var("QUILL_TOKEN_TTL_MINUTES") {
            if let Ok(ttl) = ttl.parse() {
                config.token_ttl_minutes = ttl;
            }
        }
        config
    }

    /// Path of the sqlite database file
    pub fn database_path(&self) -> PathBuf {
        self.root_dir.join("quill.sqlite")
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub posts: PostStore,
    pub tokens: TokenService,
    pub relay: Arc<ChatRelay>,
    pub config: ServerConfig,
}
