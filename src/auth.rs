//! Bearer token storage.
//!
//! The token is opaque: it is written by login/register, read before every
//! authenticated request, and removed on logout. It is never expired
//! client-side. When a file path is configured the token survives restarts.

use crate::constants::{APP_NAME, TOKEN_FILE_NAME};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared handle to the current bearer token.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    token: Arc<Mutex<Option<String>>>,
    path: Option<PathBuf>,
}

impl TokenStore {
    /// A store that only lives as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A store backed by `path`, preloaded with the token found there.
    pub fn persistent<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let token = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read token file: {}", path.display()))?;
            Some(content.trim().to_string()).filter(|t| !t.is_empty())
        } else {
            None
        };

        Ok(Self {
            token: Arc::new(Mutex::new(token)),
            path: Some(path),
        })
    }

    /// Default token file location in the user's data directory
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_NAME).join(TOKEN_FILE_NAME))
    }

    /// Current token, if any
    pub fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    /// Replace the token, persisting it when file-backed.
    ///
    /// The in-memory token is updated even if the file cannot be written.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create token directory: {}", parent.display()))?;
            }
            std::fs::write(path, token).with_context(|| format!("Failed to write token file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Forget the token
    pub fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        if let Some(path) = &self.path {
            if path.exists() {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove token file: {}", path.display()))?;
            }
        }
        Ok(())
    }
}
