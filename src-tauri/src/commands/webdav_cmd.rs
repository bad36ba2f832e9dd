//! WebDAV Sync Commands
//!
//! Tauri commands for configuring WebDAV and moving the item list to and
//! from the server.

use tauri::State;

use crate::domain::CountdownItemData;
use crate::repository::WebDavCredentials;
use crate::sync::WebDavClient;
use crate::AppState;

/// Check a login before saving it
#[tauri::command]
pub async fn test_webdav(server: String, username: String, password: String) -> Result<(), String> {
    let client = WebDavClient::new(WebDavCredentials {
        server,
        username,
        password,
    })
    .map_err(|e| e.to_string())?;
    client.test_connection().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_webdav_config(
    state: State<'_, AppState>,
    server: String,
    username: String,
    password: String,
) -> Result<(), String> {
    state
        .config
        .save_webdav(server, &username, &password)
        .await
        .map_err(|e| e.to_string())
}

/// `(server, username)` of the saved login, if any
#[tauri::command]
pub async fn load_webdav_config(
    state: State<'_, AppState>,
) -> Result<Option<(String, String)>, String> {
    state.config.load_webdav().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_webdav_config(state: State<'_, AppState>) -> Result<(), String> {
    state.config.clear_webdav().await.map_err(|e| e.to_string())
}

/// Upload the given list to the server
#[tauri::command]
pub async fn webdav_upload(
    state: State<'_, AppState>,
    items: Vec<CountdownItemData>,
) -> Result<(), String> {
    let client = WebDavClient::from_config(&state.config)
        .await
        .map_err(|e| e.to_string())?;
    client.upload(&items).await.map_err(|e| {
        log::error!("WebDAV upload failed: {}", e);
        e.to_string()
    })
}

/// Fetch the server's list. The local copy is left untouched.
#[tauri::command]
pub async fn webdav_download(
    state: State<'_, AppState>,
) -> Result<Vec<CountdownItemData>, String> {
    let client = WebDavClient::from_config(&state.config)
        .await
        .map_err(|e| e.to_string())?;
    client.download().await.map_err(|e| {
        log::error!("WebDAV download failed: {}", e);
        e.to_string()
    })
}
