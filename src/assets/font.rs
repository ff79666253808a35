use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::Context;

use crate::foundation::error::{MemeError, MemeResult};

#[derive(Clone)]
/// Parsed font file, keyed by the family name templates use to request it.
///
/// Read-only once built; the compositor shares it across fields and draw calls.
pub struct FontResource {
    family: String,
    bytes: Arc<Vec<u8>>,
    paint_blob: vello_cpu::peniko::Blob<u8>,
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("family", &self.family)
            .field("font_bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontResource {
    /// Wrap raw TrueType/OpenType bytes under `family`.
    ///
    /// The bytes are checked by registering them with a scratch Parley collection.
    pub fn from_bytes(family: impl Into<String>, bytes: Vec<u8>) -> MemeResult<Self> {
        let family = family.into();
        let mut probe = parley::FontContext::default();
        let families = probe
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if families.is_empty() {
            return Err(MemeError::validation(format!(
                "font data for '{family}' contains no usable faces"
            )));
        }

        let paint_blob = vello_cpu::peniko::Blob::from(bytes.clone());
        Ok(Self {
            family,
            bytes: Arc::new(bytes),
            paint_blob,
        })
    }

    /// Read and wrap a font file.
    pub fn from_file(family: impl Into<String>, path: &Path) -> MemeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        Self::from_bytes(family, bytes)
    }

    /// Family key this font was registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Face `index` of this file as a paint font; all faces share one blob.
    pub(crate) fn paint_font(&self, index: u32) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(self.paint_blob.clone(), index)
    }
}

/// Lookup of fonts by family name.
pub trait FontProvider: Send + Sync {
    /// Return the font for `family`, or [`MemeError::FontNotFound`].
    fn font(&self, family: &str) -> MemeResult<Arc<FontResource>>;
}

#[derive(Debug, Default)]
/// Fonts loaded lazily from a family -> file table and cached after first use.
pub struct LocalFontRepository {
    root: PathBuf,
    paths: BTreeMap<String, PathBuf>,
    cache: Mutex<HashMap<String, Arc<FontResource>>>,
}

impl LocalFontRepository {
    /// Paths in `paths` are resolved against `root` unless absolute.
    pub fn new(root: impl Into<PathBuf>, paths: BTreeMap<String, PathBuf>) -> Self {
        Self {
            root: root.into(),
            paths,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_lock(&self) -> MemeResult<MutexGuard<'_, HashMap<String, Arc<FontResource>>>> {
        self.cache
            .lock()
            .map_err(|_| MemeError::Other(anyhow::anyhow!("font cache lock poisoned")))
    }

    /// Families this repository can serve.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}

impl FontProvider for LocalFontRepository {
    fn font(&self, family: &str) -> MemeResult<Arc<FontResource>> {
        if let Some(font) = self.cache_lock()?.get(family) {
            return Ok(font.clone());
        }

        let rel = self
            .paths
            .get(family)
            .ok_or_else(|| MemeError::font_not_found(family))?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(MemeError::font_not_found(family));
        }

        // Loaded without the lock held; a concurrent first load of the same family keeps
        // whichever entry landed first.
        let font = Arc::new(FontResource::from_file(family, &path)?);
        tracing::debug!(family, path = %path.display(), "loaded font");
        Ok(self
            .cache_lock()?
            .entry(family.to_string())
            .or_insert(font)
            .clone())
    }
}

#[derive(Clone, Debug, Default)]
/// Pre-loaded fonts held in memory.
pub struct InMemoryFontRepository {
    fonts: HashMap<String, Arc<FontResource>>,
}

impl InMemoryFontRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `font` under its own family key.
    pub fn with_font(mut self, font: FontResource) -> Self {
        self.insert(font);
        self
    }

    /// Register `font` under its own family key, replacing any previous entry.
    pub fn insert(&mut self, font: FontResource) {
        self.fonts.insert(font.family().to_string(), Arc::new(font));
    }
}

impl FontProvider for InMemoryFontRepository {
    fn font(&self, family: &str) -> MemeResult<Arc<FontResource>> {
        self.fonts
            .get(family)
            .cloned()
            .ok_or_else(|| MemeError::font_not_found(family))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
