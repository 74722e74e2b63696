//! Directory-backed storage
//!
//! Paths handed to [`Storage::create`] are volume-absolute (`/gauge_0.bmp`)
//! and are resolved below the root directory. Anything trying to climb out
//! of the root is refused.

use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

use embedded_io::{ErrorType, Write};
use screencap_hal::{Storage, StorageError};

/// Stand-in for the SD card: a directory on the host
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Host path for a volume path, or `None` if it escapes the root
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut components = relative.components().peekable();
        components.peek()?;
        if components.all(|c| matches!(c, Component::Normal(_))) {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

/// Open file on a [`DirStorage`]
#[derive(Debug)]
pub struct HostFile {
    file: File,
}

impl ErrorType for HostFile {
    type Error = io::Error;
}

impl Write for HostFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        match io::Write::write(&mut self.file, buf)? {
            0 if !buf.is_empty() => Err(io::ErrorKind::WriteZero.into()),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.file)?;
        self.file.sync_data()
    }
}

impl Storage for DirStorage {
    type File<'a> = HostFile;

    fn create(&mut self, path: &str) -> Result<Self::File<'_>, StorageError> {
        if !self.root.is_dir() {
            return Err(StorageError::NotMounted);
        }
        let target = self.resolve(path).ok_or(StorageError::OpenFailed)?;
        let file = File::create(&target).map_err(|e| {
            tracing::debug!("create {} failed: {}", target.display(), e);
            StorageError::OpenFailed
        })?;
        Ok(HostFile { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gauge_50.bmp"), vec![7u8; 100]).unwrap();

        let mut storage = DirStorage::new(dir.path());
        {
            let mut file = storage.create("/gauge_50.bmp").unwrap();
            file.write_all(b"BM").unwrap();
            file.flush().unwrap();
        }
        assert_eq!(fs::read(dir.path().join("gauge_50.bmp")).unwrap(), b"BM");
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(dir.path());
        assert_eq!(
            storage.create("/../outside.bmp").err(),
            Some(StorageError::OpenFailed)
        );
        assert_eq!(storage.create("/").err(), Some(StorageError::OpenFailed));
        assert!(storage.resolve("/sub/../x").is_none());
        assert_eq!(
            storage.resolve("/screen.ppm"),
            Some(dir.path().join("screen.ppm"))
        );
    }

    #[test]
    fn test_missing_root_is_not_mounted() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(dir.path().join("no-card"));
        assert_eq!(
            storage.create("/gauge_0.bmp").err(),
            Some(StorageError::NotMounted)
        );
    }

    #[test]
    fn test_missing_subdirectory_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(dir.path());
        assert_eq!(
            storage.create("/missing/gauge_0.bmp").err(),
            Some(StorageError::OpenFailed)
        );
    }
}
