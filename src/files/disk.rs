//! Whole-file document I/O on the local disk.

use crate::lifecycle::FileSystem;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Reads and writes documents with `std::fs`.
///
/// Content is written byte-for-byte; no newline or encoding conversion.
#[derive(Debug, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        debug!("Reading {}", path.display());
        fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        debug!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(path, content)
    }
}
