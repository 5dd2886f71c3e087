//! Path containment for the restricted file reader.
//!
//! # Responsibilities
//! - Resolve a caller-supplied name against a fixed base directory
//! - Refuse anything that lands outside the base, before and after
//!   symlink resolution
//! - Read the contained file as UTF-8 text
//!
//! # Design Decisions
//! - Both sides of the comparison are canonical paths
//! - `Path::starts_with` compares whole components, so `/srv/data2` is
//!   never inside `/srv/data`
//! - The lexical check runs first so a traversal attempt is refused
//!   without probing the file system outside the base

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::security::limits::MAX_FILENAME_LEN;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("filename is empty")]
    EmptyName,

    #[error("filename is not acceptable")]
    InvalidName,

    #[error("path escapes the base directory")]
    Escape,

    #[error("file not found")]
    NotFound,

    #[error("base directory unavailable: {0}")]
    BaseUnavailable(#[source] io::Error),

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// A directory that file reads are confined to.
#[derive(Debug, Clone)]
pub struct FileSandbox {
    base_dir: PathBuf,
}

impl FileSandbox {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `filename` to a canonical path inside the base directory.
    pub async fn resolve(&self, filename: &str) -> Result<PathBuf, SandboxError> {
        if filename.is_empty() {
            return Err(SandboxError::EmptyName);
        }
        if filename.contains('\0') || filename.len() > MAX_FILENAME_LEN {
            return Err(SandboxError::InvalidName);
        }

        let base = tokio::fs::canonicalize(&self.base_dir)
            .await
            .map_err(SandboxError::BaseUnavailable)?;

        // An absolute `filename` replaces `base` entirely here.
        let joined = base.join(filename);
        if !normalize(&joined).starts_with(&base) {
            return Err(SandboxError::Escape);
        }

        let canonical = match tokio::fs::canonicalize(&joined).await {
            Ok(path) => path,
            // Through a symlink the miss may be outside the base; don't say so.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(if passes_symlink(&base, &joined).await {
                    SandboxError::Escape
                } else {
                    SandboxError::NotFound
                });
            }
            Err(e) => return Err(SandboxError::Io(e)),
        };

        // Symlinks inside the base may still point outside it.
        if !canonical.starts_with(&base) {
            return Err(SandboxError::Escape);
        }

        Ok(canonical)
    }

    /// Resolve and read `filename` as text.
    pub async fn read_to_string(&self, filename: &str) -> Result<String, SandboxError> {
        let path = self.resolve(filename).await?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            // Removed between resolve and read.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SandboxError::NotFound),
            Err(e) => Err(SandboxError::Io(e)),
        }
    }
}

/// Whether any existing component of `joined` below `base` is a symlink.
async fn passes_symlink(base: &Path, joined: &Path) -> bool {
    let Ok(relative) = joined.strip_prefix(base) else {
        return false;
    };
    let mut current = base.to_path_buf();
    for component in relative.components() {
        current.push(component.as_os_str());
        match tokio::fs::symlink_metadata(&current).await {
            Ok(meta) if meta.file_type().is_symlink() => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
    false
}

/// Collapse `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
