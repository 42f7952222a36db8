//! Container dump loading.
//!
//! The only I/O in the crate: a dump file is read fully into memory and then
//! handed to the pure decoders as a borrowed slice.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not a regular file: {path}")]
    NotAFile { path: String },
}

/// A container dump held in memory.
#[derive(Debug, Clone)]
pub struct ContainerFile {
    bytes: Vec<u8>,
}

impl ContainerFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(SourceError::NotAFile {
                path: path.display().to_string(),
            });
        }
        let bytes = fs::read(path)?;
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for ContainerFile {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerFile, SourceError};

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("midilist_missing_dump_does_not_exist.bin");
        let err = ContainerFile::open(&path).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn directory_is_rejected() {
        let err = ContainerFile::open(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, SourceError::NotAFile { .. }));
    }

    #[test]
    fn from_vec_keeps_bytes() {
        let file = ContainerFile::from(vec![1, 2, 3]);
        assert_eq!(file.len(), 3);
        assert_eq!(file.bytes(), &[1, 2, 3]);
        assert!(!file.is_empty());
    }
}
