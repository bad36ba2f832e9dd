//! WebDAV client
//!
//! The remote copy lives at `<server>/T-Countdown/data.json`. Only three
//! verbs are needed: PROPFIND to check the login, MKCOL + PUT to upload and
//! GET to download.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};

use super::error::{SyncError, SyncResult};
use crate::domain::CountdownItemData;
use crate::repository::{ConfigRepository, WebDavCredentials};

pub const REMOTE_FOLDER: &str = "T-Countdown/";
pub const REMOTE_FILE: &str = "data.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

fn dav_method(name: &str) -> SyncResult<Method> {
    Method::from_bytes(name.as_bytes()).map_err(|e| SyncError::Method(e.to_string()))
}

/// Map auth failures and other error statuses
fn check_status(response: Response) -> SyncResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::AuthFailed),
        other => Err(SyncError::Status(other.as_u16())),
    }
}

pub struct WebDavClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl WebDavClient {
    pub fn new(credentials: WebDavCredentials) -> SyncResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let mut base_url = credentials.server;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            username: credentials.username,
            password: credentials.password,
        })
    }

    /// Client for the saved credentials
    pub async fn from_config(config: &ConfigRepository) -> SyncResult<Self> {
        let credentials = config
            .webdav_credentials()
            .await?
            .ok_or(SyncError::NotConfigured)?;
        Self::new(credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn folder_url(&self) -> String {
        format!("{}{}", self.base_url, REMOTE_FOLDER)
    }

    pub fn file_url(&self) -> String {
        format!("{}{}", self.folder_url(), REMOTE_FILE)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Check that the server is reachable and accepts the login
    pub async fn test_connection(&self) -> SyncResult<()> {
        let response = self
            .request(dav_method("PROPFIND")?, &self.base_url)
            .header("Depth", "0")
            .send()
            .await?;
        check_status(response)?;
        log::info!("WebDAV connection ok: {}", self.base_url);
        Ok(())
    }

    /// Upload the full list, replacing the remote copy
    pub async fn upload(&self, items: &[CountdownItemData]) -> SyncResult<()> {
        let json = serde_json::to_string_pretty(items)?;

        // The folder usually exists already; MKCOL then answers 405
        match self.request(dav_method("MKCOL")?, &self.folder_url()).send().await {
            Ok(response) => log::debug!("MKCOL {} -> {}", self.folder_url(), response.status()),
            Err(e) => log::debug!("MKCOL {} failed: {}", self.folder_url(), e),
        }

        let response = self
            .request(Method::PUT, &self.file_url())
            .header("Content-Type", "application/json; charset=utf-8")
            .body(json)
            .send()
            .await?;
        check_status(response)?;

        log::info!("Uploaded {} items to WebDAV", items.len());
        Ok(())
    }

    /// Download the remote list. No remote file yet is an empty list.
    pub async fn download(&self) -> SyncResult<Vec<CountdownItemData>> {
        let response = self.request(Method::GET, &self.file_url()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::info!("No remote data yet");
            return Ok(Vec::new());
        }

        let body = check_status(response)?.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<CountdownItemData> = serde_json::from_str(&body)?;
        log::info!("Downloaded {} items from WebDAV", items.len());
        Ok(items)
    }
}
