//! Read-only byte storage backing a view.
//!
//! A [`TextBuffer`] is either a read-only memory map of a file on disk or an
//! owned byte vector (for tests, scratch text and empty files, which cannot
//! be mapped on every platform). Either way the bytes never change for the
//! lifetime of the buffer, and offsets in `[0, len]` are valid, `len` itself
//! standing for end-of-file.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

enum Storage {
    Mapped {
        // Kept alive for as long as the mapping exists.
        _file: std::fs::File,
        map: memmap2::Mmap,
    },
    Owned(Vec<u8>),
}

/// Immutable bytes of one opened file.
pub struct TextBuffer {
    storage: Storage,
    path: Option<PathBuf>,
}

impl TextBuffer {
    /// Map a file read-only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, inspected or mapped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let len = file.metadata().map_err(|e| Error::io(path, e))?.len();

        let storage = if len == 0 {
            Storage::Owned(Vec::new())
        } else {
            // SAFETY:
            // - The file is opened read-only
            // - The handle lives in the same struct as the mapping
            // - Callers only ever see `&[u8]`
            #[allow(unsafe_code)]
            let map = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;
            Storage::Mapped { _file: file, map }
        };

        tracing::debug!(path = %path.display(), len, "opened text buffer");

        Ok(Self {
            storage,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            storage: Storage::Owned(bytes.into()),
            path: None,
        }
    }

    /// All bytes of the buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Mapped { map, .. } => &map[..],
            Storage::Owned(bytes) => bytes.as_slice(),
        }
    }

    /// Length in bytes; also the end-of-file offset.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `offset`, or `None` at or past end-of-file.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.as_bytes().get(offset).copied()
    }

    /// Clamp an offset into `[0, len]`.
    #[inline]
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len())
    }

    /// Bytes from `start` up to `len` bytes long, truncated at end-of-file.
    /// Out-of-range starts yield an empty slice.
    pub fn slice_clamped(&self, start: usize, len: usize) -> &[u8] {
        let bytes = self.as_bytes();
        if start >= bytes.len() {
            return &[];
        }
        let end = start.saturating_add(len).min(bytes.len());
        &bytes[start..end]
    }

    /// Path of the mapped file, if the buffer came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the bytes live in a memory map rather than on the heap.
    pub const fn is_mapped(&self) -> bool {
        matches!(self.storage, Storage::Mapped { .. })
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
