//! Application Config Repository
//!
//! Persists `config.json`. WebDAV username and password are stored
//! obfuscated; the password is only ever decrypted for the sync client.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::cipher::{decrypt_str, encrypt_str};
use super::error::RepoResult;

/// WebDAV settings as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebDavConfig {
    pub server: String,
    /// Obfuscated
    pub username: String,
    /// Obfuscated
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub webdav: Option<WebDavConfig>,
}

/// Decrypted WebDAV login
#[derive(Clone, PartialEq, Eq)]
pub struct WebDavCredentials {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for WebDavCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDavCredentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

pub struct ConfigRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn read_unlocked(&self) -> AppConfig {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    log::warn!("Cannot read {}: {}", self.path.display(), e);
                }
                return AppConfig::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring unparsable config {}: {}", self.path.display(), e);
            AppConfig::default()
        })
    }

    async fn write_unlocked(&self, config: &AppConfig) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(config)?;
        // Write then rename so a crash never leaves a half-written config
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Current config. Missing or broken files read as the default.
    pub async fn read(&self) -> AppConfig {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    pub async fn write(&self, config: &AppConfig) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(config).await
    }

    pub async fn save_webdav(&self, server: String, username: &str, password: &str) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut config = self.read_unlocked().await;
        config.webdav = Some(WebDavConfig {
            server,
            username: encrypt_str(username),
            password: encrypt_str(password),
        });
        self.write_unlocked(&config).await?;
        log::info!("WebDAV config saved");
        Ok(())
    }

    /// `(server, username)` for display. The password is not returned.
    pub async fn load_webdav(&self) -> RepoResult<Option<(String, String)>> {
        match self.read().await.webdav {
            Some(wc) => {
                let username = decrypt_str(&wc.username)?;
                Ok(Some((wc.server, username)))
            }
            None => Ok(None),
        }
    }

    pub async fn webdav_credentials(&self) -> RepoResult<Option<WebDavCredentials>> {
        match self.read().await.webdav {
            Some(wc) => Ok(Some(WebDavCredentials {
                username: decrypt_str(&wc.username)?,
                password: decrypt_str(&wc.password)?,
                server: wc.server,
            })),
            None => Ok(None),
        }
    }

    pub async fn clear_webdav(&self) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut config = self.read_unlocked().await;
        config.webdav = None;
        self.write_unlocked(&config).await?;
        log::info!("WebDAV config cleared");
        Ok(())
    }
}
