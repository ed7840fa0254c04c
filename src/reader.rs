//! Thin wrapper around reading source and image files from disk.
//!
//! File I/O sits outside the pipeline proper, so failures here are bare
//! [`io::Error`]s rather than a stage-attributed [`crate::error::ScsError`]
//! — the driver binaries fold both into [`crate::error::DriverError`].

use std::io;
use std::fs;
use std::path::Path;

/// Read a UTF-8 source file into memory.
pub fn read_source(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Read an assembled binary image into memory.
pub fn read_image(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Write bytes to disk, creating the file if it does not already exist.
pub fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}
