//! Sync Layer
//!
//! Backup and restore of the item list on a WebDAV share.

mod error;
mod webdav;

pub use error::{SyncError, SyncResult};
pub use webdav::{WebDavClient, REMOTE_FILE, REMOTE_FOLDER};
