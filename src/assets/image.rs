use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, decode_image},
    foundation::error::{MemeError, MemeResult},
    render::canvas::Canvas,
};

/// Lookup of background images by identifier.
pub trait ImageProvider: Send + Sync {
    /// A fresh canvas holding the background for `id`, or [`MemeError::ImageNotFound`].
    ///
    /// Every call returns a new canvas; callers own and mutate it freely.
    fn background(&self, id: &str) -> MemeResult<Canvas>;
}

#[derive(Debug, Default)]
/// Backgrounds decoded lazily from an id -> file table; decoded pixels are cached.
pub struct LocalImageRepository {
    root: PathBuf,
    paths: BTreeMap<String, PathBuf>,
    cache: Mutex<HashMap<String, PreparedImage>>,
}

impl LocalImageRepository {
    /// Paths in `paths` are resolved against `root` unless absolute.
    pub fn new(root: impl Into<PathBuf>, paths: BTreeMap<String, PathBuf>) -> Self {
        Self {
            root: root.into(),
            paths,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_lock(&self) -> MemeResult<MutexGuard<'_, HashMap<String, PreparedImage>>> {
        self.cache
            .lock()
            .map_err(|_| MemeError::Other(anyhow::anyhow!("image cache lock poisoned")))
    }

    fn prepared(&self, id: &str) -> MemeResult<PreparedImage> {
        if let Some(img) = self.cache_lock()?.get(id) {
            return Ok(img.clone());
        }

        let rel = self
            .paths
            .get(id)
            .ok_or_else(|| MemeError::image_not_found(id))?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(MemeError::image_not_found(id));
        }

        // Read and decode outside the lock.
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))?;
        let img = decode_image(&bytes)?;
        tracing::debug!(
            id,
            path = %path.display(),
            width = img.width,
            height = img.height,
            "decoded background"
        );
        Ok(self
            .cache_lock()?
            .entry(id.to_string())
            .or_insert(img)
            .clone())
    }
}

impl ImageProvider for LocalImageRepository {
    fn background(&self, id: &str) -> MemeResult<Canvas> {
        Canvas::from_prepared(&self.prepared(id)?)
    }
}

#[derive(Clone, Debug, Default)]
/// Backgrounds held in memory as canvases; each lookup hands out a copy.
pub struct InMemoryImageRepository {
    images: HashMap<String, Canvas>,
}

impl InMemoryImageRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `canvas` under `id`.
    pub fn with_image(mut self, id: impl Into<String>, canvas: Canvas) -> Self {
        self.insert(id, canvas);
        self
    }

    /// Register `canvas` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, canvas: Canvas) {
        self.images.insert(id.into(), canvas);
    }
}

impl ImageProvider for InMemoryImageRepository {
    fn background(&self, id: &str) -> MemeResult<Canvas> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| MemeError::image_not_found(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
