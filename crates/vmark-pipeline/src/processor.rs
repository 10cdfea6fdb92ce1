//! Processor assembly and caching.

use std::fmt;
use std::sync::Arc;

use pulldown_cmark::Options;
use vmark_hast::Root;

use crate::error::PipelineError;
use crate::lower::{LoweringOptions, lower};
use crate::mdast::Mdast;
use crate::plugin::{HastPlugin, MarkdownPlugin};
use crate::sanitize::{SanitizeOptions, Sanitizer};

/// Inputs a [`Processor`] is built from.
///
/// Two option sets compare equal when their plugin lists hold the same plugin
/// instances (by `Arc` identity) in the same order and all other options are
/// equal by value.
#[derive(Clone, Default)]
pub struct ProcessorOptions {
    /// Plugins run on the intermediate tree, in order.
    pub remark_plugins: Vec<Arc<dyn MarkdownPlugin>>,
    /// Plugins run on the element tree after lowering, in order.
    pub rehype_plugins: Vec<Arc<dyn HastPlugin>>,
    /// Lowering stage options.
    pub rehype_options: LoweringOptions,
    /// Append a sanitizer stage.
    pub sanitize: bool,
    /// Sanitizer schema fragment and merge strategy.
    pub sanitize_options: SanitizeOptions,
}

impl ProcessorOptions {
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

    /// Set lowering options.
    #[must_use]
    pub fn with_rehype_options(mut self, options: LoweringOptions) -> Self {
        self.rehype_options = options;
        self
    }

    /// Enable sanitizing with the given options.
    #[must_use]
    pub fn with_sanitize(mut self, options: SanitizeOptions) -> Self {
        self.sanitize = true;
        self.sanitize_options = options;
        self
    }
}

fn same_plugins<T: ?Sized>(a: &[Arc<T>], b: &[Arc<T>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

impl PartialEq for ProcessorOptions {
    fn eq(&self, other: &Self) -> bool {
        same_plugins(&self.remark_plugins, &other.remark_plugins)
            && same_plugins(&self.rehype_plugins, &other.rehype_plugins)
            && self.rehype_options == other.rehype_options
            && self.sanitize == other.sanitize
            && self.sanitize_options == other.sanitize_options
    }
}

impl fmt::Debug for ProcessorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorOptions")
            .field(
                "remark_plugins",
                &self.remark_plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field(
                "rehype_plugins",
                &self.rehype_plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("rehype_options", &self.rehype_options)
            .field("sanitize", &self.sanitize)
            .field("sanitize_options", &self.sanitize_options)
            .finish()
    }
}

/// Assembled pipeline: parse, markdown plugins, lowering, element-tree
/// plugins and the optional sanitizer.
pub struct Processor {
    parser_options: Options,
    remark_plugins: Vec<Arc<dyn MarkdownPlugin>>,
    lowering: LoweringOptions,
    rehype_plugins: Vec<Arc<dyn HastPlugin>>,
    sanitizer: Option<Sanitizer>,
}

impl Processor {
    /// Parse markdown into the intermediate tree.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> Mdast {
        Mdast::parse(markdown, self.parser_options)
    }

    /// Run every transform stage synchronously.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a plugin.
    pub fn run_sync(&self, mut mdast: Mdast) -> Result<Root, PipelineError> {
        let mut root = self.lower(&mut mdast)?;
        for plugin in &self.rehype_plugins {
            tracing::trace!(plugin = plugin.name(), "Running element-tree plugin");
            plugin.transform(&mut root)?;
        }
        if let Some(sanitizer) = &self.sanitizer {
            sanitizer.sanitize(&mut root);
        }
        Ok(root)
    }

    /// Run every transform stage, awaiting each element-tree plugin in order.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a plugin.
    pub async fn run(&self, mut mdast: Mdast) -> Result<Root, PipelineError> {
        let mut root = self.lower(&mut mdast)?;
        for plugin in &self.rehype_plugins {
            tracing::trace!(plugin = plugin.name(), "Running element-tree plugin");
            plugin.transform_async(&mut root).await?;
        }
        if let Some(sanitizer) = &self.sanitizer {
            sanitizer.sanitize(&mut root);
        }
        Ok(root)
    }

    /// Parse and run synchronously.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a plugin.
    pub fn process_sync(&self, markdown: &str) -> Result<Root, PipelineError> {
        self.run_sync(self.parse(markdown))
    }

    /// Parse and run, awaiting async stages.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a plugin.
    pub async fn process(&self, markdown: &str) -> Result<Root, PipelineError> {
        self.run(self.parse(markdown)).await
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        let mut names = vec!["parse"];
        names.extend(self.remark_plugins.iter().map(|p| p.name()));
        names.push("lower");
        names.extend(self.rehype_plugins.iter().map(|p| p.name()));
        if let Some(sanitizer) = &self.sanitizer {
            names.push(sanitizer.name());
        }
        names
    }

    fn lower(&self, mdast: &mut Mdast) -> Result<Root, PipelineError> {
        for plugin in &self.remark_plugins {
            tracing::trace!(plugin = plugin.name(), "Running markdown plugin");
            plugin.transform(mdast)?;
        }
        Ok(lower(mdast, &self.lowering))
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("stages", &self.stage_names())
            .finish_non_exhaustive()
    }
}

/// Build a processor from options.
///
/// # Errors
///
/// Returns [`PipelineError::Schema`] if sanitizing is enabled and the merged
/// schema is invalid.
pub fn create_processor(options: &ProcessorOptions) -> Result<Processor, PipelineError> {
    let parser_options = options
        .remark_plugins
        .iter()
        .fold(Options::empty(), |acc, plugin| acc | plugin.parser_options());
    let sanitizer = if options.sanitize {
        Some(Sanitizer::from_options(&options.sanitize_options)?)
    } else {
        None
    };

    Ok(Processor {
        parser_options,
        remark_plugins: options.remark_plugins.clone(),
        lowering: options.rehype_options.clone(),
        rehype_plugins: options.rehype_plugins.clone(),
        sanitizer,
    })
}

/// Keeps the last built processor until its options change.
#[derive(Debug, Default)]
pub struct ProcessorCache {
    cached: Option<(ProcessorOptions, Arc<Processor>)>,
}

impl ProcessorCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached processor for `options`, building it if the options
    /// differ from the cached ones.
    ///
    /// # Errors
    ///
    /// Returns the [`create_processor`] error; the previous processor stays
    /// cached in that case.
    pub fn get(&mut self, options: &ProcessorOptions) -> Result<Arc<Processor>, PipelineError> {
        if let Some((cached_options, processor)) = &self.cached
            && cached_options == options
        {
            tracing::trace!("Reusing cached processor");
            return Ok(Arc::clone(processor));
        }

        let processor = Arc::new(create_processor(options)?);
        tracing::debug!(stages = ?processor.stage_names(), "Built markdown processor");
        self.cached = Some((options.clone(), Arc::clone(&processor)));
        Ok(processor)
    }

    /// Drop the cached processor.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
