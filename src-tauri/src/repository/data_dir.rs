//! Application data directory
//!
//! Everything lives under `<Documents>/T-Countdown` so users can find and
//! back up their data by hand.

use std::io;
use std::path::{Path, PathBuf};

pub const APP_FOLDER: &str = "T-Countdown";

#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `<documents>/T-Countdown`
    pub fn in_documents(documents: &Path) -> Self {
        Self::new(documents.join(APP_FOLDER))
    }

    /// Create the directory if missing
    pub fn ensure(&self) -> io::Result<&Path> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join("data.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }
}
