//! Autostart Commands

use crate::platform::{is_autostart_enabled, set_autostart_enabled};

#[tauri::command]
pub fn get_autostart() -> Result<bool, String> {
    is_autostart_enabled().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_autostart(enable: bool) -> Result<(), String> {
    set_autostart_enabled(enable).map_err(|e| e.to_string())
}
