//! Filesystem access for configuration files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ConfError;

/// Abstraction over the filesystem holding the configuration directory.
///
/// # Testing
///
/// Use [`mock::MemoryFiles`] in tests to avoid filesystem dependencies.
pub trait ConfFiles {
    /// Returns `true` if `path` exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read(&self, path: &Path) -> Result<Option<String>, ConfError>;

    /// Replaces the file content, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<(), ConfError>;
}

/// Local filesystem implementation of [`ConfFiles`].
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A crash mid-write leaves the previous configuration in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl ConfFiles for LocalFiles {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<Option<String>, ConfError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), ConfError> {
        let write_error = |source| ConfError::Write {
            path: path.to_path_buf(),
            source,
        };

        // ups.conf -> ups.conf.tmp, not ups.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(write_error)?;
        std::fs::rename(&temp_path, path).map_err(write_error)?;

        Ok(())
    }
}

/// In-memory [`ConfFiles`] for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::RwLock;

    /// Map-backed files plus a set of existing directories.
    #[derive(Debug, Default)]
    pub struct MemoryFiles {
        dirs: BTreeSet<PathBuf>,
        files: RwLock<BTreeMap<PathBuf, String>>,
    }

    impl MemoryFiles {
        /// Creates an empty filesystem with a single existing directory.
        #[must_use]
        pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
            Self {
                dirs: BTreeSet::from([dir.into()]),
                files: RwLock::default(),
            }
        }

        /// Adds a file with the given content.
        #[must_use]
        pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
            self.files
                .write()
                .unwrap()
                .insert(path.into(), content.to_string());
            self
        }

        /// Returns the current content of a file, if any.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.read().unwrap().get(path.as_ref()).cloned()
        }
    }

    impl ConfFiles for MemoryFiles {
        fn exists(&self, path: &Path) -> bool {
            self.dirs.contains(path) || self.files.read().unwrap().contains_key(path)
        }

        fn read(&self, path: &Path) -> Result<Option<String>, ConfError> {
            Ok(self.content(path))
        }

        fn write(&self, path: &Path, content: &str) -> Result<(), ConfError> {
            self.files
                .write()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }
}
