//! memepen composites user-supplied text onto template backgrounds.
//!
//! A [`Template`] pairs a background image with an ordered list of text fields. Composition
//! takes one string per field and, for each field in order:
//!
//! 1. wraps the string to the field width using real font metrics ([`wrap_lines`]),
//! 2. computes the field anchor from the wrapped line count ([`anchor_point`]),
//! 3. draws an optional rounded outline by redrawing the block at every offset of
//!    [`stroke_offsets`],
//! 4. draws the fill on top, with every draw optionally rotated about the anchor inside a
//!    [`RotationScope`].
//!
//! All pixels live in a premultiplied RGBA8 [`Canvas`]. Fonts, backgrounds, templates and
//! uploads are capabilities injected into [`Compositor`] and [`MemeService`]; [`Config`]
//! builds the local-filesystem implementations.
//!
//! # Getting started
//!
//! - For end-user usage, see the repository README and the `memepen` binary.
//! - [`Compositor::compose`] is the core entry point.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod config;
mod foundation;
mod layout;
mod render;
mod service;
mod template;
mod text;

pub use assets::decode::{PreparedImage, decode_image, encode_png};
pub use assets::font::{FontProvider, FontResource, InMemoryFontRepository, LocalFontRepository};
pub use assets::image::{ImageProvider, InMemoryImageRepository, LocalImageRepository};
pub use config::{Config, UploaderKind};
pub use foundation::core::{Affine, Point, Rgba8, Vec2};
pub use foundation::error::{MemeError, MemeResult};
pub use layout::anchor::{LINE_SPACING, anchor_point, block_height, line_origins};
pub use render::canvas::Canvas;
pub use render::compositor::Compositor;
pub use render::stroke::{stroke_offsets, stroke_pass};
pub use render::transform::{RotationScope, Transformable, with_rotation};
pub use service::meme::{
    InMemoryMemeRepository, Meme, MemeImage, MemeRepository, MemeService, PublishSettings,
};
pub use service::uploader::{LocalUploader, NoopUploader, Uploader};
pub use template::defaults::default_templates;
pub use template::model::{
    FontSpec, ImageRef, MAX_STROKE_RADIUS, Rotation, Stroke, Template, TextStyle,
};
pub use template::repository::{InMemoryTemplateRepository, TemplateRepository};
pub use text::shaper::{FaceShaper, ShapedLine, ShapedRun, TextBlock, TextShaper};
pub use text::wrap::{TextMeasure, wrap_lines};
