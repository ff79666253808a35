/// Convenience result type used across memepen.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by compositing and service APIs.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// No template is registered under the requested identifier.
    #[error("template not found: '{id}'")]
    TemplateNotFound {
        /// Requested template identifier.
        id: String,
    },

    /// No font resource is available for the requested family.
    #[error("font not found: family '{family}'{}", field_suffix(.field))]
    FontNotFound {
        /// Requested font family name.
        family: String,
        /// Index of the text field that requested the font, when known.
        field: Option<usize>,
    },

    /// No background image is available for the requested identifier.
    #[error("image not found: '{id}'")]
    ImageNotFound {
        /// Requested image identifier.
        id: String,
    },

    /// The caller supplied a different number of strings than the template has fields.
    #[error("text count mismatch: template has {expected} field(s), got {actual} string(s)")]
    TextCountMismatch {
        /// Number of text fields in the template.
        expected: usize,
        /// Number of strings supplied by the caller.
        actual: usize,
    },

    /// No meme record is stored under the requested identifier.
    #[error("meme not found: '{id}'")]
    MemeNotFound {
        /// Requested meme identifier.
        id: String,
    },

    /// Failure reported by an uploader.
    #[error("upload error: {0}")]
    Upload(String),

    /// Invalid layout data (template, field, or canvas parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing templates and configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn field_suffix(field: &Option<usize>) -> String {
    match field {
        Some(i) => format!(" (field {i})"),
        None => String::new(),
    }
}

impl MemeError {
    /// Build a [`MemeError::TemplateNotFound`] value.
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound { id: id.into() }
    }

    /// Build a [`MemeError::FontNotFound`] value without field context.
    pub fn font_not_found(family: impl Into<String>) -> Self {
        Self::FontNotFound {
            family: family.into(),
            field: None,
        }
    }

    /// Build a [`MemeError::ImageNotFound`] value.
    pub fn image_not_found(id: impl Into<String>) -> Self {
        Self::ImageNotFound { id: id.into() }
    }

    /// Build a [`MemeError::MemeNotFound`] value.
    pub fn meme_not_found(id: impl Into<String>) -> Self {
        Self::MemeNotFound { id: id.into() }
    }

    /// Build a [`MemeError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MemeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Attach the index of the text field being processed when the error occurred.
    pub fn at_field(self, index: usize) -> Self {
        match self {
            Self::FontNotFound { family, .. } => Self::FontNotFound {
                family,
                field: Some(index),
            },
            Self::Validation(msg) => Self::Validation(format!("field {index}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
