use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::SystemTime,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::{canvas::Canvas, compositor::Compositor},
    service::uploader::Uploader,
    template::{model::Template, repository::TemplateRepository},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Where an uploaded meme image can be fetched.
pub struct MemeImage {
    /// Public URL of the PNG.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Record of a composed and uploaded meme.
pub struct Meme {
    /// Unique identifier, also the file stem of the uploaded image.
    pub id: Uuid,
    /// Uploaded image location and size.
    pub image: MemeImage,
    /// Whether the meme is flagged as not safe for work.
    pub nsfw: bool,
    /// Creation time.
    pub created_on: SystemTime,
    /// Strings the meme was composed from, in field order.
    pub text: Vec<String>,
    /// Author identifier.
    pub user_id: Uuid,
    /// Template the meme was composed from.
    pub template_id: String,
}

/// Storage of meme records.
pub trait MemeRepository: Send + Sync {
    /// Store a new record; an existing id is a validation error.
    fn create(&self, meme: Meme) -> MemeResult<()>;
    /// Fetch a record, or [`MemeError::MemeNotFound`].
    fn get(&self, id: &Uuid) -> MemeResult<Meme>;
}

#[derive(Debug, Default)]
/// Meme records held in process memory.
pub struct InMemoryMemeRepository {
    memes: Mutex<HashMap<Uuid, Meme>>,
}

impl InMemoryMemeRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MemeResult<std::sync::MutexGuard<'_, HashMap<Uuid, Meme>>> {
        self.memes
            .lock()
            .map_err(|_| MemeError::Other(anyhow::anyhow!("meme repository lock poisoned")))
    }
}

impl MemeRepository for InMemoryMemeRepository {
    fn create(&self, meme: Meme) -> MemeResult<()> {
        let mut memes = self.lock()?;
        if memes.contains_key(&meme.id) {
            return Err(MemeError::validation(format!(
                "meme '{}' already exists",
                meme.id
            )));
        }
        memes.insert(meme.id, meme);
        Ok(())
    }

    fn get(&self, id: &Uuid) -> MemeResult<Meme> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| MemeError::meme_not_found(id.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where uploads go and how their public URLs are formed.
pub struct PublishSettings {
    /// Upload directory, relative to the uploader root.
    pub memes_dir: String,
    /// Prefix joined with `{memes_dir}/{id}.png` to build the public URL.
    pub public_base_url: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            memes_dir: "assets/memes".to_string(),
            public_base_url: "http://localhost:8080/".to_string(),
        }
    }
}

impl PublishSettings {
    fn upload_path(&self, id: &Uuid) -> String {
        format!("{}/{id}", self.memes_dir.trim_end_matches('/'))
    }

    fn public_url(&self, upload_path: &str) -> String {
        format!("{}{upload_path}.png", self.public_base_url)
    }
}

/// Composes memes from templates and publishes them.
pub struct MemeService {
    compositor: Compositor,
    templates: Arc<dyn TemplateRepository>,
    memes: Arc<dyn MemeRepository>,
    uploader: Arc<dyn Uploader>,
    publish: PublishSettings,
}

impl std::fmt::Debug for MemeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeService")
            .field("publish", &self.publish)
            .finish_non_exhaustive()
    }
}

impl MemeService {
    /// Wire the service to its collaborators.
    pub fn new(
        compositor: Compositor,
        templates: Arc<dyn TemplateRepository>,
        memes: Arc<dyn MemeRepository>,
        uploader: Arc<dyn Uploader>,
        publish: PublishSettings,
    ) -> Self {
        Self {
            compositor,
            templates,
            memes,
            uploader,
            publish,
        }
    }

    /// Template table the service resolves identifiers against.
    pub fn templates(&self) -> &dyn TemplateRepository {
        self.templates.as_ref()
    }

    /// Compose `text` onto the template's background.
    pub fn create_meme<S: AsRef<str>>(&self, template: &Template, text: &[S]) -> MemeResult<Canvas> {
        self.compositor.compose(template, text)
    }

    /// Look up `template_id` and compose `text` onto it.
    #[tracing::instrument(skip(self, text))]
    pub fn create_meme_from_template_id<S: AsRef<str>>(
        &self,
        template_id: &str,
        text: &[S],
    ) -> MemeResult<Canvas> {
        let template = self.templates.template(template_id)?;
        self.create_meme(&template, text)
    }

    /// Compose, upload under a fresh id and store the resulting record.
    #[tracing::instrument(skip(self, template, text), fields(template = %template.id))]
    pub fn create_meme_and_upload<S: AsRef<str>>(
        &self,
        template: &Template,
        text: &[S],
    ) -> MemeResult<Meme> {
        let canvas = self.create_meme(template, text)?;

        let id = Uuid::new_v4();
        let path = self.publish.upload_path(&id);
        self.uploader.upload_png(&path, &canvas)?;

        let meme = Meme {
            id,
            image: MemeImage {
                url: self.publish.public_url(&path),
                width: canvas.width(),
                height: canvas.height(),
            },
            nsfw: false,
            created_on: SystemTime::now(),
            text: text.iter().map(|s| s.as_ref().to_string()).collect(),
            user_id: Uuid::new_v4(),
            template_id: template.id.clone(),
        };
        self.memes.create(meme.clone())?;
        tracing::debug!(meme = %meme.id, url = %meme.image.url, "stored meme");
        Ok(meme)
    }

    /// Look up `template_id`, then behave like [`MemeService::create_meme_and_upload`].
    #[tracing::instrument(skip(self, text))]
    pub fn create_meme_and_upload_from_template_id<S: AsRef<str>>(
        &self,
        template_id: &str,
        text: &[S],
    ) -> MemeResult<Meme> {
        let template = self.templates.template(template_id)?;
        self.create_meme_and_upload(&template, text)
    }

    /// Fetch a stored meme record.
    pub fn meme(&self, id: &Uuid) -> MemeResult<Meme> {
        self.memes.get(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/meme.rs"]
mod tests;
