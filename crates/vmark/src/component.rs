//! Synchronous and asynchronous markdown components.

use std::sync::Arc;

use vmark_hast::Root;
use vmark_pipeline::{HastPlugin, LoweringOptions, MarkdownPlugin, Processor, ProcessorCache, SanitizeOptions};
use vmark_render::{AttrMergeMode, Attributes, CustomAttrs, HastRenderer, RenderBackend, Slots};

use crate::error::Error;
use crate::props::MarkdownProps;

/// State shared by both components.
struct Core<B: RenderBackend> {
    props: MarkdownProps,
    slots: Slots<B::Node>,
    attrs: Attributes,
    merge_mode: AttrMergeMode,
    cache: ProcessorCache,
}

impl<B: RenderBackend> Core<B> {
    fn new(props: MarkdownProps) -> Self {
        Self {
            props,
            slots: Slots::new(),
            attrs: Attributes::new(),
            merge_mode: AttrMergeMode::default(),
            cache: ProcessorCache::new(),
        }
    }

    fn processor(&mut self) -> Result<Arc<Processor>, Error> {
        Ok(self.cache.get(&self.props.processor_options())?)
    }

    fn render(&self, root: &Root) -> B::Node {
        HastRenderer::<B>::new()
            .with_custom_attrs(self.props.custom_attrs.clone())
            .with_slots(self.slots.clone())
            .with_merge_mode(self.merge_mode)
            .render(root, self.attrs.clone())
    }
}

/// Markdown component that renders synchronously.
///
/// Every [`render`](Self::render) parses the current markdown, runs the
/// processor synchronously and renders the resulting tree. The processor is
/// cached until a processor input changes.
///
/// # Example
///
/// ```
/// use vmark::{Markdown, MarkdownProps};
/// use vmark_render::HtmlBackend;
///
/// let mut md = Markdown::<HtmlBackend>::new(MarkdownProps::new("# Hi"));
/// assert_eq!(md.render()?, "<div><h1>Hi</h1></div>");
///
/// md.set_markdown("*there*");
/// assert_eq!(md.render()?, "<div><p><em>there</em></p></div>");
/// # Ok::<(), vmark::Error>(())
/// ```
pub struct Markdown<B: RenderBackend> {
    core: Core<B>,
}

impl<B: RenderBackend> Markdown<B> {
    /// Create a component from props.
    #[must_use]
    pub fn new(props: MarkdownProps) -> Self {
        Self { core: Core::new(props) }
    }

    /// Set the slot renderers.
    #[must_use]
    pub fn with_slots(mut self, slots: Slots<B::Node>) -> Self {
        self.core.slots = slots;
        self
    }

    /// Set the attributes of the wrapping `div`.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.core.attrs = attrs;
        self
    }

    /// Set how attribute overrides combine with element attributes.
    #[must_use]
    pub fn with_merge_mode(mut self, merge_mode: AttrMergeMode) -> Self {
        self.core.merge_mode = merge_mode;
        self
    }

    /// Current props.
    #[must_use]
    pub fn props(&self) -> &MarkdownProps {
        &self.core.props
    }

    /// Replace all props.
    pub fn set_props(&mut self, props: MarkdownProps) {
        self.core.props = props;
    }

    /// Replace the markdown source.
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.core.props.markdown = markdown.into();
    }

    /// Replace the attribute overrides.
    pub fn set_custom_attrs(&mut self, custom_attrs: CustomAttrs) {
        self.core.props.custom_attrs = custom_attrs;
    }

    /// Replace the markdown plugins.
    pub fn set_remark_plugins(&mut self, plugins: Vec<Arc<dyn MarkdownPlugin>>) {
        self.core.props.remark_plugins = plugins;
    }

    /// Replace the element-tree plugins.
    pub fn set_rehype_plugins(&mut self, plugins: Vec<Arc<dyn HastPlugin>>) {
        self.core.props.rehype_plugins = plugins;
    }

    /// Replace the lowering options.
    pub fn set_rehype_options(&mut self, options: LoweringOptions) {
        self.core.props.rehype_options = options;
    }

    /// Turn sanitizing on or off.
    pub fn set_sanitize(&mut self, sanitize: bool) {
        self.core.props.sanitize = sanitize;
    }

    /// Replace the sanitizer options.
    pub fn set_sanitize_options(&mut self, options: SanitizeOptions) {
        self.core.props.sanitize_options = options;
    }

    /// Parse, process and render the current markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the processor cannot be built or a plugin fails.
    pub fn render(&mut self) -> Result<B::Node, Error> {
        let processor = self.core.processor()?;
        let root = processor.run_sync(processor.parse(&self.core.props.markdown))?;
        Ok(self.core.render(&root))
    }
}

/// Markdown component whose processing may suspend.
///
/// The element tree is resolved by awaiting the processor and kept until the
/// next successful resolution, so [`render`](Self::render) never goes blank
/// while an update is in flight or after an update fails.
///
/// Updates take `&mut self`, so one instance never has two resolutions in
/// flight.
pub struct MarkdownAsync<B: RenderBackend> {
    core: Core<B>,
    tree: Option<Root>,
}

impl<B: RenderBackend> MarkdownAsync<B> {
    /// Create a component and resolve its first tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the processor cannot be built or a plugin fails.
    pub async fn new(props: MarkdownProps) -> Result<Self, Error> {
        let mut component = Self::pending(props);
        component.resolve().await?;
        Ok(component)
    }

    /// Create a component without resolving it.
    ///
    /// [`render`](Self::render) returns `None` until [`resolve`](Self::resolve)
    /// succeeds once.
    #[must_use]
    pub fn pending(props: MarkdownProps) -> Self {
        Self {
            core: Core::new(props),
            tree: None,
        }
    }

    /// Set the slot renderers.
    #[must_use]
    pub fn with_slots(mut self, slots: Slots<B::Node>) -> Self {
        self.core.slots = slots;
        self
    }

    /// Set the attributes of the wrapping `div`.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.core.attrs = attrs;
        self
    }

    /// Set how attribute overrides combine with element attributes.
    #[must_use]
    pub fn with_merge_mode(mut self, merge_mode: AttrMergeMode) -> Self {
        self.core.merge_mode = merge_mode;
        self
    }

    /// Whether a tree has been resolved.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.tree.is_some()
    }

    /// Current props.
    #[must_use]
    pub fn props(&self) -> &MarkdownProps {
        &self.core.props
    }

    /// Process the current markdown and keep the resulting tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the processor cannot be built or a plugin fails;
    /// the previous tree is kept.
    pub async fn resolve(&mut self) -> Result<(), Error> {
        let processor = self.core.processor()?;
        let mdast = processor.parse(&self.core.props.markdown);
        match processor.run(mdast).await {
            Ok(root) => {
                self.tree = Some(root);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, ready = self.is_ready(), "Keeping previous tree");
                Err(err.into())
            }
        }
    }

    /// Replace all props and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_props(&mut self, props: MarkdownProps) -> Result<(), Error> {
        self.core.props = props;
        self.resolve().await
    }

    /// Replace the markdown source and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_markdown(&mut self, markdown: impl Into<String>) -> Result<(), Error> {
        self.core.props.markdown = markdown.into();
        self.resolve().await
    }

    /// Replace the markdown plugins and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_remark_plugins(&mut self, plugins: Vec<Arc<dyn MarkdownPlugin>>) -> Result<(), Error> {
        self.core.props.remark_plugins = plugins;
        self.resolve().await
    }

    /// Replace the element-tree plugins and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_rehype_plugins(&mut self, plugins: Vec<Arc<dyn HastPlugin>>) -> Result<(), Error> {
        self.core.props.rehype_plugins = plugins;
        self.resolve().await
    }

    /// Replace the lowering options and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_rehype_options(&mut self, options: LoweringOptions) -> Result<(), Error> {
        self.core.props.rehype_options = options;
        self.resolve().await
    }

    /// Turn sanitizing on or off and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_sanitize(&mut self, sanitize: bool) -> Result<(), Error> {
        self.core.props.sanitize = sanitize;
        self.resolve().await
    }

    /// Replace the sanitizer options and re-resolve.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn update_sanitize_options(&mut self, options: SanitizeOptions) -> Result<(), Error> {
        self.core.props.sanitize_options = options;
        self.resolve().await
    }

    /// Replace the attribute overrides. Takes effect on the next render
    /// without re-processing.
    pub fn set_custom_attrs(&mut self, custom_attrs: CustomAttrs) {
        self.core.props.custom_attrs = custom_attrs;
    }

    /// Render the last resolved tree, or `None` before the first resolution.
    #[must_use]
    pub fn render(&self) -> Option<B::Node> {
        self.tree.as_ref().map(|root| self.core.render(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vmark_pipeline::{Gfm, PipelineError};
    use vmark_render::HtmlBackend;

    struct Reject;

    impl HastPlugin for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn transform(&self, _root: &mut Root) -> Result<(), PipelineError> {
            Err(PipelineError::plugin("reject", "always fails"))
        }
    }

    #[test]
    fn test_render_wraps_in_host_div() {
        let mut attrs = Attributes::new();
        attrs.insert("class".to_owned(), "doc".into());
        let mut md = Markdown::<HtmlBackend>::new(MarkdownProps::new("hello")).with_attrs(attrs);
        assert_eq!(md.render().unwrap(), r#"<div class="doc"><p>hello</p></div>"#);
    }

    #[test]
    fn test_render_empty_markdown() {
        let mut md = Markdown::<HtmlBackend>::new(MarkdownProps::default());
        assert_eq!(md.render().unwrap(), "<div></div>");
    }

    #[test]
    fn test_rerender_after_remark_plugin_change() {
        let mut md = Markdown::<HtmlBackend>::new(MarkdownProps::new("- [ ] todo"));
        assert!(!md.render().unwrap().contains(r#"type="checkbox""#));

        md.set_remark_plugins(vec![Arc::new(Gfm)]);
        assert!(md.render().unwrap().contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_render_propagates_plugin_error() {
        let mut md = Markdown::<HtmlBackend>::new(MarkdownProps::new("x").with_rehype_plugin(Reject));
        assert!(matches!(md.render(), Err(Error::Pipeline(PipelineError::Plugin { .. }))));
    }

    #[tokio::test]
    async fn test_async_ready_after_new() {
        let md = MarkdownAsync::<HtmlBackend>::new(MarkdownProps::new("# a")).await.unwrap();
        assert!(md.is_ready());
        assert_eq!(md.render(), Some("<div><h1>a</h1></div>".to_owned()));
    }

    #[tokio::test]
    async fn test_async_pending_renders_nothing() {
        let mut md = MarkdownAsync::<HtmlBackend>::pending(MarkdownProps::new("a"));
        assert!(!md.is_ready());
        assert_eq!(md.render(), None);

        md.resolve().await.unwrap();
        assert_eq!(md.render(), Some("<div><p>a</p></div>".to_owned()));
    }

    #[tokio::test]
    async fn test_async_failure_keeps_previous_tree() {
        let mut md = MarkdownAsync::<HtmlBackend>::new(MarkdownProps::new("old")).await.unwrap();
        let result = md.update_rehype_plugins(vec![Arc::new(Reject)]).await;
        assert!(result.is_err());
        assert_eq!(md.render(), Some("<div><p>old</p></div>".to_owned()));

        md.update_rehype_plugins(Vec::new()).await.unwrap();
        md.update_markdown("new").await.unwrap();
        assert_eq!(md.render(), Some("<div><p>new</p></div>".to_owned()));
    }
}
