//! Template store layout and placeholder substitution.
//!
//! The template store is a read-only checkout under `.stagehand` with a
//! fixed internal layout (`scene/`, `sceneproto/`, `component/`,
//! `layer/`). [`TemplateBatch`] copies template files to their
//! destinations and substitutes `{{ name }}` placeholders uniformly
//! across the whole destination set.

pub mod batch;
pub mod store;

pub use batch::{TemplateBatch, TemplateError};
pub use store::{TemplateStore, STORE_DIR};
