use std::{collections::BTreeMap, path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::error::{MemeError, MemeResult},
    template::model::Template,
};

/// Lookup of templates by identifier.
pub trait TemplateRepository: Send + Sync {
    /// Return the template registered under `id`, or [`MemeError::TemplateNotFound`].
    fn template(&self, id: &str) -> MemeResult<Arc<Template>>;

    /// All registered templates, ordered by identifier.
    fn templates(&self) -> Vec<Arc<Template>>;
}

#[derive(Clone, Debug, Default)]
/// Immutable, in-memory template table.
pub struct InMemoryTemplateRepository {
    by_id: BTreeMap<String, Arc<Template>>,
}

impl InMemoryTemplateRepository {
    /// Build a repository from templates; each one is validated, later duplicates replace earlier ones.
    pub fn new(templates: impl IntoIterator<Item = Template>) -> MemeResult<Self> {
        let mut by_id = BTreeMap::new();
        for t in templates {
            t.validate()?;
            by_id.insert(t.id.clone(), Arc::new(t));
        }
        Ok(Self { by_id })
    }

    /// Load a JSON array of templates from `path`.
    pub fn from_json_file(path: &Path) -> MemeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read templates from '{}'", path.display()))?;
        let templates: Vec<Template> = serde_json::from_slice(&bytes)
            .map_err(|e| MemeError::serde(format!("parse '{}': {e}", path.display())))?;
        Self::new(templates)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the repository holds no templates.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    fn template(&self, id: &str) -> MemeResult<Arc<Template>> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| MemeError::template_not_found(id))
    }

    fn templates(&self) -> Vec<Arc<Template>> {
        self.by_id.values().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/repository.rs"]
mod tests;
