//! Platform Layer
//!
//! OS integration that has no portable equivalent.

mod autostart;

pub use autostart::{
    is_enabled as is_autostart_enabled, set_enabled as set_autostart_enabled, AutostartError,
};
