//! Plugin traits for the two pipeline phases.

use std::future::Future;
use std::pin::Pin;

use pulldown_cmark::Options;
use vmark_hast::Root;

use crate::error::PipelineError;
use crate::mdast::Mdast;

/// Boxed future returned by async plugin stages.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Plugin that runs before lowering, on the intermediate markdown tree.
///
/// Plugins can extend the syntax the parser recognises through
/// [`parser_options`](Self::parser_options) and rewrite the parsed events
/// through [`transform`](Self::transform).
///
/// # Example
///
/// ```
/// use pulldown_cmark::Event;
/// use vmark_pipeline::{Mdast, MarkdownPlugin, PipelineError};
///
/// struct Shout;
///
/// impl MarkdownPlugin for Shout {
///     fn name(&self) -> &str { "shout" }
///
///     fn transform(&self, tree: &mut Mdast) -> Result<(), PipelineError> {
///         for event in &mut tree.events {
///             if let Event::Text(text) = event {
///                 *text = text.to_uppercase().into();
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait MarkdownPlugin: Send + Sync {
    /// Plugin name, used in logs and errors.
    fn name(&self) -> &str;

    /// Parser options this plugin needs enabled.
    fn parser_options(&self) -> Options {
        Options::empty()
    }

    /// Rewrite the intermediate tree.
    fn transform(&self, _tree: &mut Mdast) -> Result<(), PipelineError> {
        Ok(())
    }
}

/// Plugin that runs after lowering, on the element tree.
///
/// The async pipeline calls [`transform_async`](Self::transform_async), which
/// defaults to the synchronous transform. Plugins that need to suspend (for
/// example to call out to a highlighter service) override it.
pub trait HastPlugin: Send + Sync {
    /// Plugin name, used in logs and errors.
    fn name(&self) -> &str;

    /// Rewrite the element tree synchronously.
    fn transform(&self, root: &mut Root) -> Result<(), PipelineError>;

    /// Rewrite the element tree, possibly suspending.
    fn transform_async<'a>(
        &'a self,
        root: &'a mut Root,
    ) -> BoxFuture<'a, Result<(), PipelineError>> {
        Box::pin(async move { self.transform(root) })
    }
}

/// GitHub Flavored Markdown syntax: tables, strikethrough, task lists and footnotes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gfm;

impl MarkdownPlugin for Gfm {
    fn name(&self) -> &'static str {
        "gfm"
    }

    fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmark_hast::{Element, Node};

    struct AppendRule;

    impl HastPlugin for AppendRule {
        fn name(&self) -> &'static str {
            "append-rule"
        }

        fn transform(&self, root: &mut Root) -> Result<(), PipelineError> {
            root.children.push(Element::new("hr").into());
            Ok(())
        }
    }

    #[test]
    fn test_gfm_options() {
        let options = Gfm.parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(!options.contains(Options::ENABLE_HEADING_ATTRIBUTES));
    }

    #[tokio::test]
    async fn test_transform_async_defaults_to_sync() {
        let mut root = Root::default();
        AppendRule.transform_async(&mut root).await.unwrap();
        assert_eq!(root.children, vec![Node::from(Element::new("hr"))]);
    }
}
