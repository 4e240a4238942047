//! Filesystem storage for generated artifacts.
//!
//! QR images land under `<MEDIA_ROOT>/qr_codes/`; the database stores the
//! path relative to the media root so the artifact stays addressable when
//! the root moves between environments.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Subdirectory of the media root holding QR images.
pub const QR_DIR: &str = "qr_codes";

#[derive(Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a QR image and return its media-relative path, creating the
    /// directory on first use. Overwrites any previous artifact for the
    /// same filename.
    pub fn store_qr(&self, filename: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.root.join(QR_DIR);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(filename), bytes)?;
        Ok(format!("{QR_DIR}/{filename}"))
    }
}
