use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StorageError;

/// A validated object storage key of the form `{folder}/{name}.{ext}`.
///
/// Keys are a single folder segment plus a filename; parsing rejects
/// anything that could escape the folder namespace (empty segments, `..`,
/// backslashes, nested paths). Generated keys use a UUIDv4 filename so an
/// upload can never collide with or overwrite an existing object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Generate a fresh key under `folder` with the given file extension.
    pub fn generate(folder: &str, ext: &str) -> Result<Self, StorageError> {
        Self::parse(&format!("{folder}/{}.{}", Uuid::new_v4(), ext))
    }

    /// Validate a raw key string.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let mut segments = raw.split('/');
        let (folder, file) = match (segments.next(), segments.next(), segments.next()) {
            (Some(folder), Some(file), None) => (folder, file),
            _ => {
                return Err(StorageError::InvalidKey(format!(
                    "expected exactly one '/' in {raw:?}"
                )));
            }
        };

        for segment in [folder, file] {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(format!("bad segment in {raw:?}")));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(StorageError::InvalidKey(format!(
                    "unsupported character in {raw:?}"
                )));
            }
        }

        Ok(Self(raw.to_string()))
    }

    pub fn folder(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    pub fn file_name(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
