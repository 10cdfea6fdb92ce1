//! TOML configuration for the markdown components.
//!
//! ```toml
//! [markdown]
//! gfm = true
//! sanitize = true
//! merge_mode = "merge"
//!
//! [rehype]
//! clobber_prefix = "doc-"
//!
//! [sanitize]
//! array_merge = "concat"
//!
//! [sanitize.schema]
//! tagNames = ["iframe"]
//! ```
//!
//! Every section and key is optional; missing values take the same defaults
//! as [`MarkdownProps::default`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use vmark_pipeline::{ArrayMerge, Gfm, LoweringOptions, MarkdownPlugin, PipelineError, SanitizeOptions, Sanitizer};
use vmark_render::AttrMergeMode;

use crate::props::MarkdownProps;

/// Markdown component configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Component switches.
    pub markdown: MarkdownSection,
    /// Lowering options.
    pub rehype: LoweringOptions,
    /// Sanitizer options.
    pub sanitize: SanitizeSection,
}

/// `[markdown]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkdownSection {
    /// Enable GitHub Flavored Markdown syntax.
    pub gfm: bool,
    /// Sanitize the element tree.
    pub sanitize: bool,
    /// How attribute overrides combine with element attributes.
    pub merge_mode: AttrMergeMode,
}

/// `[sanitize]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SanitizeSection {
    /// Array combination strategy when merging `schema`.
    pub array_merge: ArrayMerge,
    /// Schema fragment merged onto the default schema.
    pub schema: Option<serde_json::Value>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured sanitizer schema is invalid.
    #[error("Configuration error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl MarkdownConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, can't be read or fails to parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a file, falling back to defaults if it is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(path)) => {
                tracing::warn!(path = %path.display(), "Configuration file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Sanitizer options described by the `[sanitize]` section.
    #[must_use]
    pub fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            schema: self.sanitize.schema.clone(),
            ..SanitizeOptions::default()
        }
        .with_array_merge(self.sanitize.array_merge)
    }

    /// Check that the configured schema builds a sanitizer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pipeline`] if sanitizing is enabled and the
    /// merged schema is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.markdown.sanitize {
            if self.sanitize.schema.is_some() {
                tracing::warn!("[sanitize.schema] is ignored because sanitizing is disabled");
            }
            return Ok(());
        }
        Sanitizer::from_options(&self.sanitize_options())?;
        Ok(())
    }

    /// Build component props rendering `markdown`.
    #[must_use]
    pub fn into_props(self, markdown: impl Into<String>) -> MarkdownProps {
        let sanitize_options = self.sanitize_options();
        let mut remark_plugins: Vec<Arc<dyn MarkdownPlugin>> = Vec::new();
        if self.markdown.gfm {
            remark_plugins.push(Arc::new(Gfm));
        }
        MarkdownProps {
            markdown: markdown.into(),
            remark_plugins,
            rehype_options: self.rehype,
            sanitize: self.markdown.sanitize,
            sanitize_options,
            ..MarkdownProps::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = MarkdownConfig::from_toml_str("").unwrap();
        assert!(!config.markdown.gfm);
        assert!(!config.markdown.sanitize);
        assert_eq!(config.markdown.merge_mode, AttrMergeMode::Replace);
        assert_eq!(config.rehype, LoweringOptions::default());
        assert_eq!(config.sanitize_options(), SanitizeOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = MarkdownConfig::from_toml_str(
            r#"
[markdown]
gfm = true
sanitize = true
merge_mode = "merge"

[rehype]
clobber_prefix = "doc-"

[sanitize]
array_merge = "concat"

[sanitize.schema]
tagNames = ["iframe"]
"#,
        )
        .unwrap();

        assert!(config.markdown.gfm);
        assert_eq!(config.markdown.merge_mode, AttrMergeMode::Merge);
        assert_eq!(config.rehype.clobber_prefix, "doc-");
        assert_eq!(config.rehype.footnote_label, "Footnotes");
        assert_eq!(
            config.sanitize_options(),
            SanitizeOptions::default()
                .with_schema(json!({ "tagNames": ["iframe"] }))
                .with_array_merge(ArrayMerge::Concat)
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_error() {
        let result = MarkdownConfig::from_toml_str("[markdown]\ngfm = \"yes\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_schema() {
        let config = MarkdownConfig::from_toml_str(
            r#"
[markdown]
sanitize = true

[sanitize.schema]
tagNames = "div"
"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Pipeline(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vmark.toml");
        assert!(matches!(MarkdownConfig::load(&path), Err(ConfigError::NotFound(_))));
        assert!(!MarkdownConfig::load_or_default(&path).unwrap().markdown.gfm);
    }

    #[test]
    fn test_load_file_into_props() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vmark.toml");
        std::fs::write(&path, "[markdown]\ngfm = true\nsanitize = true\n").unwrap();

        let props = MarkdownConfig::load(&path).unwrap().into_props("~~x~~");
        assert_eq!(props.markdown, "~~x~~");
        assert_eq!(props.remark_plugins.len(), 1);
        assert_eq!(props.remark_plugins[0].name(), "gfm");
        assert!(props.sanitize);
    }
}
