//! Start on login
//!
//! Windows only: a value named after the app under the current user's
//! `Run` key. Other platforms report disabled and refuse to enable.

#[cfg(windows)]
const RUN_KEY: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Run";
#[cfg(windows)]
const VALUE_NAME: &str = "T-Countdown";

#[derive(Debug, thiserror::Error)]
pub enum AutostartError {
    #[error("Autostart is only supported on Windows")]
    Unsupported,

    #[error("Registry error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(windows)]
pub fn is_enabled() -> Result<bool, AutostartError> {
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    match hkcu.open_subkey(RUN_KEY) {
        Ok(key) => Ok(key.get_value::<String, _>(VALUE_NAME).is_ok()),
        Err(_) => Ok(false),
    }
}

#[cfg(windows)]
pub fn set_enabled(enable: bool) -> Result<(), AutostartError> {
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let (key, _) = hkcu.create_subkey(RUN_KEY)?;

    if enable {
        let exe = std::env::current_exe()?;
        key.set_value(VALUE_NAME, &exe.to_string_lossy().to_string())?;
        log::info!("Autostart enabled: {}", exe.display());
    } else {
        // Missing value means already disabled
        if let Err(e) = key.delete_value(VALUE_NAME) {
            log::debug!("Autostart value not removed: {}", e);
        }
        log::info!("Autostart disabled");
    }
    Ok(())
}

#[cfg(not(windows))]
pub fn is_enabled() -> Result<bool, AutostartError> {
    Ok(false)
}

#[cfg(not(windows))]
pub fn set_enabled(enable: bool) -> Result<(), AutostartError> {
    if enable {
        Err(AutostartError::Unsupported)
    } else {
        Ok(())
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform() {
        assert!(!is_enabled().unwrap());
        assert!(matches!(set_enabled(true), Err(AutostartError::Unsupported)));
        assert!(set_enabled(false).is_ok());
    }
}
