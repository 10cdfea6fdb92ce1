//! Markdown components rendering through a pluggable node backend.
//!
//! [`Markdown`] renders synchronously on every call. [`MarkdownAsync`] awaits
//! its processor and keeps the last resolved tree until a newer one is ready.
//! Both take [`MarkdownProps`], wrap the output in a `div` carrying the host
//! attributes, and accept [`Slots`](vmark_render::Slots) and
//! [`CustomAttrs`](vmark_render::CustomAttrs) keyed by tag name or alias
//! (`heading`, `list`, `list-item`, `inline-code`, `block-code`, `s-<name>`).
//!
//! # Example
//!
//! ```
//! use vmark::{Markdown, MarkdownProps};
//! use vmark_pipeline::Gfm;
//! use vmark_render::{Attributes, CustomAttrs, VNodeBackend};
//!
//! let custom = CustomAttrs::new().with_fn("list-item", |_, combined| {
//!     let mut attrs = Attributes::new();
//!     attrs.insert("data-index".to_owned(), combined["index"].clone());
//!     attrs
//! });
//! let props = MarkdownProps::new("- a\n- b")
//!     .with_remark_plugin(Gfm)
//!     .with_custom_attrs(custom);
//!
//! let tree = Markdown::<VNodeBackend>::new(props).render()?;
//! let indexes: Vec<String> = tree
//!     .find_all("li")
//!     .iter()
//!     .map(|li| li.attrs["data-index"].to_string())
//!     .collect();
//! assert_eq!(indexes, ["0", "1"]);
//! # Ok::<(), vmark::Error>(())
//! ```
//!
//! Configuration can also come from TOML through [`MarkdownConfig`].

mod component;
pub mod config;
mod error;
mod props;

pub use component::{Markdown, MarkdownAsync};
pub use config::{ConfigError, MarkdownConfig};
pub use error::Error;
pub use props::MarkdownProps;
