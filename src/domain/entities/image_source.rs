//! Opaque references to images handed to the pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Stable identity of an [`ImageSource`], used to build cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a `SourceId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a `SourceId` by hashing raw image bytes.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();
        Self(format!("mem:{}", hex::encode(&result[..16])))
    }

    /// Creates a `SourceId` from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self(format!("file:{}", path.display()))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An encoded image obtained from a picker, a camera or the caller.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image stored on the local filesystem.
    File(PathBuf),
    /// Image already held in memory.
    Memory {
        /// Identity derived from the content.
        id: SourceId,
        /// Encoded image bytes.
        bytes: Bytes,
    },
}

impl ImageSource {
    /// Creates a file-backed source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates an in-memory source, deriving its identity from the content.
    #[must_use]
    pub fn memory(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::Memory {
            id: SourceId::from_bytes(&bytes),
            bytes,
        }
    }

    /// Returns the identity used for cache keys.
    #[must_use]
    pub fn id(&self) -> SourceId {
        match self {
            Self::File(path) => SourceId::from_path(path),
            Self::Memory { id, .. } => id.clone(),
        }
    }

    /// Returns the encoded size in bytes.
    ///
    /// # Errors
    /// Returns error if file metadata cannot be read.
    pub fn size_bytes(&self) -> std::io::Result<u64> {
        match self {
            Self::File(path) => Ok(std::fs::metadata(path)?.len()),
            Self::Memory { bytes, .. } => Ok(bytes.len() as u64),
        }
    }

    /// Reads the full encoded content.
    ///
    /// # Errors
    /// Returns error if the file cannot be read.
    pub fn read_bytes(&self) -> std::io::Result<Bytes> {
        match self {
            Self::File(path) => std::fs::read(path).map(Bytes::from),
            Self::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory { id, bytes } => write!(f, "{id} ({} bytes)", bytes.len()),
        }
    }
}
