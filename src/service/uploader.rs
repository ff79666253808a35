use std::path::PathBuf;

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::canvas::Canvas,
};

/// Destination for finished images.
pub trait Uploader: Send + Sync {
    /// Store `canvas` as PNG under `path` (no extension). Failures are [`MemeError::Upload`].
    fn upload_png(&self, path: &str, canvas: &Canvas) -> MemeResult<()>;
}

#[derive(Clone, Debug)]
/// Writes `{root}/{path}.png` to the local filesystem.
///
/// Missing directories are not created; uploading into one is an error.
pub struct LocalUploader {
    root: PathBuf,
}

impl LocalUploader {
    /// Uploader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full file path an upload to `path` is written to.
    pub fn target_path(&self, path: &str) -> PathBuf {
        self.root.join(format!("{path}.png"))
    }
}

impl Uploader for LocalUploader {
    fn upload_png(&self, path: &str, canvas: &Canvas) -> MemeResult<()> {
        let target = self.target_path(path);
        match target.parent() {
            Some(dir) if dir.as_os_str().is_empty() || dir.is_dir() => {}
            _ => {
                return Err(MemeError::upload(format!(
                    "directory for '{}' does not exist",
                    target.display()
                )));
            }
        }

        let bytes = canvas
            .encode_png()
            .map_err(|e| MemeError::upload(format!("encode '{}': {e}", target.display())))?;
        std::fs::write(&target, bytes)
            .map_err(|e| MemeError::upload(format!("write '{}': {e}", target.display())))?;
        tracing::debug!(path = %target.display(), "uploaded png");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Accepts every upload and stores nothing.
pub struct NoopUploader;

impl Uploader for NoopUploader {
    fn upload_png(&self, _path: &str, _canvas: &Canvas) -> MemeResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/uploader.rs"]
mod tests;
