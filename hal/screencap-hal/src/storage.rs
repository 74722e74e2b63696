//! Removable storage abstractions
//!
//! Files are write-only byte sinks. Dropping a file releases it; callers
//! that care about durability flush before letting it go.

use embedded_io::Write;

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No card / volume mounted
    NotMounted,
    /// The file could not be created or truncated
    OpenFailed,
    /// Low level I/O failure
    Io,
}

/// File system on removable storage
pub trait Storage {
    /// Open file handle, released on drop
    type File<'a>: Write
    where
        Self: 'a;

    /// Open `path` for writing
    ///
    /// An existing file is truncated. Paths are absolute and rooted at the
    /// volume root, e.g. `/gauge_50.bmp`.
    fn create(&mut self, path: &str) -> Result<Self::File<'_>, StorageError>;
}
