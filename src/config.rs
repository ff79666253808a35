use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::{font::LocalFontRepository, image::LocalImageRepository},
    foundation::error::{MemeError, MemeResult},
    service::{
        meme::PublishSettings,
        uploader::{LocalUploader, NoopUploader, Uploader},
    },
    template::{defaults::default_templates, repository::InMemoryTemplateRepository},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which uploader [`Config::uploader`] builds.
pub enum UploaderKind {
    /// Write PNGs under `assets_root`.
    #[default]
    Local,
    /// Discard uploads.
    Noop,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Explicit configuration, loaded once and handed to the collaborators it builds.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
pub struct Config {
    /// Base directory that relative paths below resolve against.
    pub assets_root: PathBuf,
    /// Font family -> font file.
    pub fonts: BTreeMap<String, PathBuf>,
    /// Background image id -> image file.
    pub images: BTreeMap<String, PathBuf>,
    /// JSON array of templates; the built-in table is used when absent.
    pub templates_path: Option<PathBuf>,
    /// Uploader backend.
    pub uploader: UploaderKind,
    /// Upload directory for composed memes, relative to `assets_root`.
    pub memes_dir: String,
    /// Prefix of public meme URLs.
    pub public_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let publish = PublishSettings::default();
        Self {
            assets_root: PathBuf::from("."),
            fonts: BTreeMap::from([
                ("Arial".to_string(), PathBuf::from("assets/fonts/arial.ttf")),
                ("Impact".to_string(), PathBuf::from("assets/fonts/impact.ttf")),
            ]),
            images: BTreeMap::from([
                (
                    "two-buttons".to_string(),
                    PathBuf::from("assets/images/two-buttons.png"),
                ),
                (
                    "yall-got-any-more-of-them".to_string(),
                    PathBuf::from("assets/images/yall-got-any-more-of-them.png"),
                ),
            ]),
            templates_path: None,
            uploader: UploaderKind::default(),
            memes_dir: publish.memes_dir,
            public_base_url: publish.public_base_url,
        }
    }
}

impl Config {
    /// Parse a JSON configuration document.
    pub fn from_json_str(s: &str) -> MemeResult<Self> {
        serde_json::from_str(s).map_err(|e| MemeError::serde(format!("parse config: {e}")))
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> MemeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config from '{}'", path.display()))?;
        serde_json::from_str(&s)
            .map_err(|e| MemeError::serde(format!("parse config '{}': {e}", path.display())))
    }

    /// Load `{dir}/{env}.json`.
    pub fn load_env(dir: &Path, env: &str) -> MemeResult<Self> {
        if env.is_empty() || env.contains(['/', '\\']) || env == ".." {
            return Err(MemeError::validation(format!(
                "invalid environment name '{env}'"
            )));
        }
        Self::load(&dir.join(format!("{env}.json")))
    }

    /// Font repository over [`Config::fonts`].
    pub fn font_repository(&self) -> LocalFontRepository {
        LocalFontRepository::new(&self.assets_root, self.fonts.clone())
    }

    /// Background repository over [`Config::images`].
    pub fn image_repository(&self) -> LocalImageRepository {
        LocalImageRepository::new(&self.assets_root, self.images.clone())
    }

    /// Templates from [`Config::templates_path`], or the built-in table.
    pub fn template_repository(&self) -> MemeResult<InMemoryTemplateRepository> {
        match &self.templates_path {
            Some(path) => InMemoryTemplateRepository::from_json_file(&self.assets_root.join(path)),
            None => InMemoryTemplateRepository::new(default_templates()),
        }
    }

    /// Uploader selected by [`Config::uploader`].
    pub fn uploader(&self) -> Arc<dyn Uploader> {
        match self.uploader {
            UploaderKind::Local => Arc::new(LocalUploader::new(&self.assets_root)),
            UploaderKind::Noop => Arc::new(NoopUploader),
        }
    }

    /// Upload directory and URL prefix for the meme service.
    pub fn publish_settings(&self) -> PublishSettings {
        PublishSettings {
            memes_dir: self.memes_dir.clone(),
            public_base_url: self.public_base_url.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
