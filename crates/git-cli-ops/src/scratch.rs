//! Transient files used while reconstructing a historical snapshot.
//!
//! A [`ScratchArtifacts`] value owns three paths in the scratch directory:
//! the computed patch (`.patch`), the reconstructed content (`.patched`) and
//! the reject file the patch tool may leave behind (`.rej`). All three are
//! removed when the value is dropped, on every exit path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug)]
pub struct ScratchArtifacts {
    patch_path: PathBuf,
    patched_path: PathBuf,
    reject_path: PathBuf,
}

impl ScratchArtifacts {
    /// Reserves artifact paths named `<id>-<revision>-<nonce>`.
    ///
    /// The nonce keeps concurrent reconstructions of the same
    /// `(id, revision)` pair from sharing files.
    pub fn acquire(scratch_dir: &Path, id: &str, revision: &str) -> io::Result<Self> {
        fs::create_dir_all(scratch_dir)?;
        let stem = format!("{id}-{revision}-{}", Uuid::new_v4().simple());
        Ok(Self {
            patch_path: scratch_dir.join(format!("{stem}.patch")),
            patched_path: scratch_dir.join(format!("{stem}.patched")),
            reject_path: scratch_dir.join(format!("{stem}.rej")),
        })
    }

    pub fn patch_path(&self) -> &Path {
        &self.patch_path
    }

    pub fn patched_path(&self) -> &Path {
        &self.patched_path
    }

    pub fn reject_path(&self) -> &Path {
        &self.reject_path
    }

    pub fn write_patch(&self, patch: &str) -> io::Result<()> {
        fs::write(&self.patch_path, patch)
    }

    pub fn read_patched(&self) -> io::Result<String> {
        fs::read_to_string(&self.patched_path)
    }
}

impl Drop for ScratchArtifacts {
    fn drop(&mut self) {
        for path in [&self.patch_path, &self.patched_path, &self.reject_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to remove scratch artifact"
                ),
            }
        }
    }
}
