//! Multi-file template instantiation.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;

/// Template instantiation errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template source not found: {}", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("{sources} template source(s) but {destinations} destination(s)")]
    LengthMismatch { sources: usize, destinations: usize },

    #[error("unresolved placeholder {{{{ {name} }}}} in {}", .path.display())]
    Unresolved { name: String, path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A batch of template files rendered together.
///
/// Every `{{ name }}` placeholder is replaced with its bound value in
/// every destination file, regardless of which file it appears in.
/// Bindings with no matching placeholder are ignored; a placeholder left
/// unbound fails the whole batch before anything is written.
#[derive(Debug)]
pub struct TemplateBatch {
    pairs: Vec<(PathBuf, PathBuf)>,
    vars: BTreeMap<String, String>,
}

impl TemplateBatch {
    /// Pair up sources with destinations. The two lists must have the
    /// same length.
    pub fn new(
        sources: Vec<PathBuf>,
        destinations: Vec<PathBuf>,
    ) -> Result<Self, TemplateError> {
        if sources.len() != destinations.len() {
            return Err(TemplateError::LengthMismatch {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }
        Ok(Self {
            pairs: sources.into_iter().zip(destinations).collect(),
            vars: BTreeMap::new(),
        })
    }

    /// Bind a placeholder value. Calls chain.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Read every source, substitute all bindings, and write every
    /// destination. Nothing is written if any source is missing or any
    /// placeholder is left unresolved.
    pub fn render(self) -> Result<(), TemplateError> {
        // Match {{name}} or {{ name }}
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();

        let mut rendered = Vec::with_capacity(self.pairs.len());
        for (source, destination) in &self.pairs {
            let content =
                std::fs::read_to_string(source).map_err(|_| TemplateError::SourceMissing {
                    path: source.clone(),
                })?;

            let mut result = content.clone();
            for cap in pattern.captures_iter(&content) {
                let full_match = cap.get(0).unwrap().as_str();
                let name = &cap[1];
                match self.vars.get(name) {
                    Some(value) => {
                        result = result.replace(full_match, value);
                    }
                    None => {
                        return Err(TemplateError::Unresolved {
                            name: name.to_string(),
                            path: destination.clone(),
                        });
                    }
                }
            }
            rendered.push((destination.clone(), result));
        }

        for (destination, content) in rendered {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(|source| TemplateError::Write {
                    path: destination.clone(),
                    source,
                })?;
            }
            tracing::debug!(path = %destination.display(), "writing generated file");
            std::fs::write(&destination, content).map_err(|source| TemplateError::Write {
                path: destination.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_replaces_every_occurrence_across_all_destinations() {
        let dir = tempdir().unwrap();
        let src_a = dir.path().join("a.elm");
        let src_b = dir.path().join("b.elm");
        // Combined placeholder order across the two files: a, b, a.
        std::fs::write(&src_a, "module {{ scene }} exposing ({{ kind }})").unwrap();
        std::fs::write(&src_b, "import Scenes.{{ scene }}.Model").unwrap();

        let dst_a = dir.path().join("out/a.elm");
        let dst_b = dir.path().join("out/b.elm");
        TemplateBatch::new(
            vec![src_a, src_b],
            vec![dst_a.clone(), dst_b.clone()],
        )
        .unwrap()
        .var("scene", "Boss")
        .var("kind", "scene")
        .var("unused", "ignored")
        .render()
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&dst_a).unwrap(),
            "module Boss exposing (scene)"
        );
        assert_eq!(
            std::fs::read_to_string(&dst_b).unwrap(),
            "import Scenes.Boss.Model"
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = TemplateBatch::new(vec![PathBuf::from("a")], vec![]).unwrap_err();
        match err {
            TemplateError::LengthMismatch {
                sources,
                destinations,
            } => {
                assert_eq!(sources, 1);
                assert_eq!(destinations, 0);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_source_reported_with_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.elm");
        let err = TemplateBatch::new(vec![missing.clone()], vec![dir.path().join("out.elm")])
            .unwrap()
            .render()
            .unwrap_err();
        match err {
            TemplateError::SourceMissing { path } => assert_eq!(path, missing),
            other => panic!("expected SourceMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_placeholder_names_the_variable() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("t.elm");
        std::fs::write(&src, "hello {{ scene }} and {{ layer }}").unwrap();
        let dst = dir.path().join("out.elm");

        let err = TemplateBatch::new(vec![src], vec![dst.clone()])
            .unwrap()
            .var("scene", "Boss")
            .render()
            .unwrap_err();
        match err {
            TemplateError::Unresolved { name, path } => {
                assert_eq!(name, "layer");
                assert_eq!(path, dst);
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
        // Nothing was written.
        assert!(!dst.exists());
    }

    #[test]
    fn test_whitespace_variants_accepted() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("t.elm");
        std::fs::write(&src, "{{scene}} {{ scene }} {{  scene  }}").unwrap();
        let dst = dir.path().join("out.elm");

        TemplateBatch::new(vec![src], vec![dst.clone()])
            .unwrap()
            .var("scene", "Boss")
            .render()
            .unwrap();
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "Boss Boss Boss");
    }
}
