//! Markdown processing pipeline for vmark.
//!
//! Turns markdown text into the element tree consumed by `vmark-render`:
//!
//! 1. **Parse**: pulldown-cmark produces the intermediate tree ([`Mdast`]),
//!    with parser options contributed by [`MarkdownPlugin`]s
//! 2. **Transform**: markdown plugins rewrite the intermediate tree
//! 3. **Lower**: [`lower`] converts it into a [`Root`](vmark_hast::Root)
//!    following the mdast-to-hast conventions ([`LoweringOptions`])
//! 4. **Post-lowering**: [`HastPlugin`]s rewrite the element tree, sync or async
//! 5. **Sanitize** (optional): [`Sanitizer`] strips what the [`Schema`] disallows
//!
//! [`create_processor`] assembles the stages from [`ProcessorOptions`];
//! [`ProcessorCache`] keeps the built [`Processor`] until the options change.
//!
//! # Example
//!
//! ```
//! use vmark_pipeline::{ProcessorOptions, create_processor};
//!
//! let processor = create_processor(&ProcessorOptions::default())?;
//! let mdast = processor.parse("# Hello");
//! let root = processor.run_sync(mdast)?;
//! assert!(root.children[0].is_element("h1"));
//! # Ok::<(), vmark_pipeline::PipelineError>(())
//! ```

mod error;
mod lower;
mod mdast;
mod plugin;
mod processor;
pub mod sanitize;

pub use error::PipelineError;
pub use lower::{LoweringOptions, lower};
pub use mdast::Mdast;
pub use plugin::{BoxFuture, Gfm, HastPlugin, MarkdownPlugin};
pub use processor::{Processor, ProcessorCache, ProcessorOptions, create_processor};
pub use sanitize::{ArrayMerge, MergeOptions, SanitizeOptions, Sanitizer, Schema};
