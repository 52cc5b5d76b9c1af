//! File loading helpers. Documents and the stylesheet are always read whole;
//! nothing is streamed.

use anyhow::{anyhow, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Opens `path`, naming the kind of file in the error message.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}

/// Reads the whole of `path` into a new buffer. The file's length is taken
/// from its metadata up front; reading fewer bytes than that is a
/// [`LoadError::ReadShortfall`].
pub fn load(path: &Path) -> std::result::Result<Vec<u8>, LoadError> {
    let mut file = File::open(path).map_err(|err| LoadError::NotFound {
        path: path.to_owned(),
        err,
    })?;
    let read_err = |err: io::Error| LoadError::Read {
        path: path.to_owned(),
        err,
    };
    let expected = file.metadata().map_err(read_err)?.len() as usize;
    let mut buf = Vec::with_capacity(expected);
    let read = file.read_to_end(&mut buf).map_err(read_err)?;
    if read < expected {
        return Err(LoadError::ReadShortfall {
            path: path.to_owned(),
            expected,
            read,
        });
    }
    Ok(buf)
}

/// Represents an error loading a file into memory.
#[derive(Debug)]
pub enum LoadError {
    /// Returned when the file can't be opened.
    NotFound { path: PathBuf, err: io::Error },

    /// Returned when fewer bytes were read than the file's reported length.
    ReadShortfall {
        path: PathBuf,
        expected: usize,
        read: usize,
    },

    /// Returned for other I/O errors while reading an opened file.
    Read { path: PathBuf, err: io::Error },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path, .. } => path.as_path(),
            LoadError::ReadShortfall { path, .. } => path.as_path(),
            LoadError::Read { path, .. } => path.as_path(),
        }
    }
}

impl fmt::Display for LoadError {
    /// Displays a [`LoadError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::NotFound { path, err } => {
                write!(f, "File '{}' not found: {}", path.display(), err)
            }
            LoadError::ReadShortfall {
                path,
                expected,
                read,
            } => write!(
                f,
                "Error reading '{}': expected {} bytes, read {}",
                path.display(),
                expected,
                read
            ),
            LoadError::Read { path, err } => {
                write!(f, "Error reading '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for LoadError {
    /// Implements the [`std::error::Error`] trait for [`LoadError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::NotFound { err, .. } => Some(err),
            LoadError::ReadShortfall { .. } => None,
            LoadError::Read { err, .. } => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_whole_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("post.txt");
        std::fs::write(&path, b"2024-01-01 | Title\n Body\n")?;
        assert_eq!(load(&path)?, b"2024-01-01 | Title\n Body\n".to_vec());
        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.txt");
        match load(&path) {
            Err(err @ LoadError::NotFound { .. }) => {
                assert_eq!(err.path(), path.as_path());
                assert!(err.to_string().starts_with("File '"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn open_names_the_kind_of_file() {
        let err = open(Path::new("/nonexistent/site.yaml"), "site").unwrap_err();
        assert!(err.to_string().starts_with("Opening site file `/nonexistent/site.yaml`"));
    }
}
