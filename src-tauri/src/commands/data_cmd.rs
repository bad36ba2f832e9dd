//! Tauri Commands for the countdown list
//!
//! Exposes item persistence and lifecycle to the frontend via Tauri IPC.

use tauri::State;

use crate::domain::{now_millis, CountdownItemData, PRESET_COLORS};
use crate::AppState;

/// Load all items (empty on first start)
#[tauri::command]
pub async fn load_data(state: State<'_, AppState>) -> Result<Vec<CountdownItemData>, String> {
    state.items.load_all().await.map_err(|e| e.to_string())
}

/// Replace the stored list with the frontend's copy
#[tauri::command]
pub async fn save_data(
    state: State<'_, AppState>,
    items: Vec<CountdownItemData>,
) -> Result<(), String> {
    state.items.save_all(&items).await.map_err(|e| e.to_string())
}

/// Expire items whose target has passed
#[tauri::command]
pub async fn refresh_statuses(
    state: State<'_, AppState>,
) -> Result<Vec<CountdownItemData>, String> {
    state
        .items
        .refresh_statuses(now_millis())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn dismiss_item(
    state: State<'_, AppState>,
    id: String,
) -> Result<CountdownItemData, String> {
    state.items.dismiss(&id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn purge_dismissed(state: State<'_, AppState>) -> Result<usize, String> {
    state.items.purge_dismissed().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_preset_colors() -> Vec<&'static str> {
    PRESET_COLORS.to_vec()
}
