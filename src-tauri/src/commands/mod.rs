//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod autostart_cmd;
mod data_cmd;
mod webdav_cmd;

pub use autostart_cmd::*;
pub use data_cmd::*;
pub use webdav_cmd::*;
