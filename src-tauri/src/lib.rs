//! T-Countdown Backend
//!
//! Layered architecture:
//! - domain: Countdown items, lifecycle and color palette
//! - repository: `data.json` / `config.json` persistence
//! - sync: WebDAV backup and restore
//! - platform: OS integration (autostart)
//! - commands: Tauri command handlers (feature `desktop`)

pub mod domain;
pub mod platform;
pub mod repository;
pub mod sync;

#[cfg(feature = "desktop")]
mod commands;

use repository::{ConfigRepository, DataDir, ItemRepository};

/// Application state shared across commands
pub struct AppState {
    pub data_dir: DataDir,
    pub items: ItemRepository,
    pub config: ConfigRepository,
}

impl AppState {
    pub fn new(data_dir: DataDir) -> Self {
        Self {
            items: ItemRepository::new(data_dir.data_file()),
            config: ConfigRepository::new(data_dir.config_file()),
            data_dir,
        }
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Emitter, Manager};

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "T-Countdown")?;

            let data_dir = DataDir::in_documents(&app_handle.path().document_dir()?);
            data_dir.ensure()?;
            log::info!("Data directory: {}", data_dir.root().display());

            app.manage(AppState::new(data_dir));

            // Expire items that passed while the app was closed
            tauri::async_runtime::spawn(async move {
                let state = app_handle.state::<AppState>();
                match state.items.refresh_statuses(domain::now_millis()).await {
                    Ok(items) => {
                        if let Err(e) = app_handle.emit("items-refreshed", items) {
                            log::warn!("Failed to emit event: {}", e);
                        }
                    }
                    Err(e) => log::error!("Startup refresh failed: {}", e),
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Items
            commands::load_data,
            commands::save_data,
            commands::refresh_statuses,
            commands::dismiss_item,
            commands::purge_dismissed,
            commands::get_preset_colors,
            // WebDAV
            commands::test_webdav,
            commands::save_webdav_config,
            commands::load_webdav_config,
            commands::clear_webdav_config,
            commands::webdav_upload,
            commands::webdav_download,
            // Autostart
            commands::get_autostart,
            commands::set_autostart,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use crate::domain::{CountdownItemData, PRESET_COLORS};

    #[tokio::test]
    async fn test_state_uses_data_dir_files() {
        let docs = tempfile::TempDir::new().unwrap();
        let state = AppState::new(DataDir::in_documents(docs.path()));

        let item = CountdownItemData::new(
            "1".to_string(),
            "Launch".to_string(),
            1_700_000_000_000,
            PRESET_COLORS[0].to_string(),
        );
        state.items.create(&item).await.unwrap();
        state
            .config
            .save_webdav("https://dav.example.com".to_string(), "alice", "pw")
            .await
            .unwrap();

        assert!(state.data_dir.data_file().exists());
        assert!(state.data_dir.config_file().exists());
    }
}
