//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO I/O (serde, chrono and thiserror only).

mod countdown;
mod entity;
mod palette;

pub use countdown::{
    ensure_unique_ids, now_millis, purge_dismissed, refresh_all, CountdownItemData, ItemStatus,
    Remaining,
};
pub use entity::{DomainError, DomainResult, Entity};
pub use palette::{default_color, is_preset, Rgba, PRESET_COLORS};
