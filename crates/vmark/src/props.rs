//! Component inputs.

use std::fmt;
use std::sync::Arc;

use vmark_pipeline::{HastPlugin, LoweringOptions, MarkdownPlugin, ProcessorOptions, SanitizeOptions};
use vmark_render::CustomAttrs;

/// Inputs of [`Markdown`](crate::Markdown) and
/// [`MarkdownAsync`](crate::MarkdownAsync).
///
/// Everything except `markdown` and `custom_attrs` configures the processor;
/// the processor is rebuilt only when one of those changes.
#[derive(Clone, Default)]
pub struct MarkdownProps {
    /// Markdown source.
    pub markdown: String,
    /// Attribute overrides keyed by tag name or alias.
    pub custom_attrs: CustomAttrs,
    /// Plugins run on the intermediate markdown tree, in order.
    pub remark_plugins: Vec<Arc<dyn MarkdownPlugin>>,
    /// Plugins run on the element tree, in order.
    pub rehype_plugins: Vec<Arc<dyn HastPlugin>>,
    /// Lowering options.
    pub rehype_options: LoweringOptions,
    /// Whether to sanitize the element tree.
    pub sanitize: bool,
    /// Sanitizer schema fragment and merge strategy.
    pub sanitize_options: SanitizeOptions,
}

impl MarkdownProps {
    /// Props rendering `markdown` with every other input defaulted.
    #[must_use]
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Self::default()
        }
    }

    /// Set the attribute overrides.
    #[must_use]
    pub fn with_custom_attrs(mut self, custom_attrs: CustomAttrs) -> Self {
        self.custom_attrs = custom_attrs;
        self
    }

    /// Append a markdown plugin.
    #[must_use]
    pub fn with_remark_plugin(mut self, plugin: impl MarkdownPlugin + 'static) -> Self {
        self.remark_plugins.push(Arc::new(plugin));
        self
    }

    /// Append an element-tree plugin.
    #[must_use]
    pub fn with_rehype_plugin(mut self, plugin: impl HastPlugin + 'static) -> Self {
        self.rehype_plugins.push(Arc::new(plugin));
        self
    }

    /// Set the lowering options.
    #[must_use]
    pub fn with_rehype_options(mut self, options: LoweringOptions) -> Self {
        self.rehype_options = options;
        self
    }

    /// Enable sanitizing with `options`.
    #[must_use]
    pub fn with_sanitize(mut self, options: SanitizeOptions) -> Self {
        self.sanitize = true;
        self.sanitize_options = options;
        self
    }

    /// Processor options for these props.
    ///
    /// Plugins are shared, so two calls on unchanged props compare equal.
    #[must_use]
    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            remark_plugins: self.remark_plugins.clone(),
            rehype_plugins: self.rehype_plugins.clone(),
            rehype_options: self.rehype_options.clone(),
            sanitize: self.sanitize,
            sanitize_options: self.sanitize_options.clone(),
        }
    }
}

impl fmt::Debug for MarkdownProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownProps")
            .field("markdown", &self.markdown)
            .field("custom_attrs", &self.custom_attrs)
            .field("processor", &self.processor_options())
            .finish()
    }
}
