//! Reading and writing program files.
//!
//! A bytecode file is the raw instruction stream with no header.

use std::fs;
use std::path::Path;

use crate::DriverError;

pub fn read_source(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_program(path: &Path) -> Result<Vec<u8>, DriverError> {
    fs::read(path).map_err(|source| DriverError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_program(path: &Path, code: &[u8]) -> Result<(), DriverError> {
    fs::write(path, code).map_err(|source| DriverError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}
