//! Repository Layer
//!
//! Data access abstractions and implementations.

mod cipher;
mod config_repo;
mod data_dir;
mod error;
mod item_repo;
mod traits;


pub use cipher::{decrypt_str, encrypt_str};
pub use config_repo::{AppConfig, ConfigRepository, WebDavConfig, WebDavCredentials};
pub use data_dir::{DataDir, APP_FOLDER};
pub use error::{RepoError, RepoResult};
pub use item_repo::ItemRepository;
pub use traits::Repository;
