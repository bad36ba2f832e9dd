//! Size-based rolling file writer
//!
//! `<app>.log` is the live file. When a write would push it past
//! `max_file_bytes`, it is renamed to `<app>.1.log`, older backups shift up
//! by one, and anything beyond `max_files` is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::recent::RecentLines;

struct FileState {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    max_file_bytes: u64,
    max_files: usize,
}

impl FileState {
    fn live_path(&self) -> PathBuf {
        live_path(&self.dir, &self.app_name)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.app_name, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files > 1 {
            let oldest = self.backup_path(self.max_files - 1);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.max_files - 1).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            fs::rename(self.live_path(), self.backup_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.live_path())?;
        self.written = 0;
        Ok(())
    }
}

fn live_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

/// Cloneable handle; every clone appends to the same file.
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<FileState>>,
    recent: Arc<RecentLines>,
}

impl RollingWriter {
    pub fn open(
        dir: &Path,
        app_name: &str,
        max_file_bytes: u64,
        max_files: usize,
        recent: Arc<RecentLines>,
    ) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = live_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            state: Arc::new(Mutex::new(FileState {
                dir: dir.to_path_buf(),
                app_name: app_name.to_string(),
                file,
                written,
                max_file_bytes,
                max_files: max_files.max(1),
            })),
            recent,
        })
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        if state.written > 0 && state.written + buf.len() as u64 > state.max_file_bytes {
            state.rotate()?;
        }

        state.file.write_all(buf)?;
        state.written += buf.len() as u64;
        drop(state);

        self.recent.push(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_appends_until_limit() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            RollingWriter::open(dir.path(), "App", 1024, 3, Arc::new(RecentLines::new(8))).unwrap();

        writer.write_all(b"hello\n").unwrap();
        writer.write_all(b"world\n").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("App.log")).unwrap();
        assert_eq!(content, "hello\nworld\n");
        assert_eq!(log_files(dir.path()), vec!["App.log"]);
    }

    #[test]
    fn test_rotates_and_bounds_backups() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            RollingWriter::open(dir.path(), "App", 10, 3, Arc::new(RecentLines::new(8))).unwrap();

        for i in 0..6 {
            writer.write_all(format!("record-{}\n", i).as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(log_files(dir.path()), vec!["App.1.log", "App.2.log", "App.log"]);
        let live = fs::read_to_string(dir.path().join("App.log")).unwrap();
        assert_eq!(live, "record-5\n");
        let newest_backup = fs::read_to_string(dir.path().join("App.1.log")).unwrap();
        assert_eq!(newest_backup, "record-4\n");
    }

    #[test]
    fn test_single_file_truncates_on_rotate() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            RollingWriter::open(dir.path(), "App", 10, 1, Arc::new(RecentLines::new(8))).unwrap();

        writer.write_all(b"first-line\n").unwrap();
        writer.write_all(b"second-line\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(log_files(dir.path()), vec!["App.log"]);
        let live = fs::read_to_string(dir.path().join("App.log")).unwrap();
        assert_eq!(live, "second-line\n");
    }

    #[test]
    fn test_feeds_recent_buffer() {
        let dir = TempDir::new().unwrap();
        let recent = Arc::new(RecentLines::new(2));
        let mut writer = RollingWriter::open(dir.path(), "App", 1024, 2, recent.clone()).unwrap();

        writer.write_all(b"a\n").unwrap();
        writer.write_all(b"b\n").unwrap();
        writer.write_all(b"c\n").unwrap();

        assert_eq!(recent.snapshot(), vec!["b", "c"]);
    }
}
