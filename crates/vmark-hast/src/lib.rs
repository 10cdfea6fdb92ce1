//! Element tree model for vmark.
//!
//! This crate provides the markup-shaped tree that the lowering stage produces
//! and the renderer consumes:
//!
//! - [`Node`]: tagged union over root, element, text, raw and the node kinds the
//!   renderer ignores (comments, doctypes, unknown kinds)
//! - [`PropertyValue`]: values stored in an element's property bag
//! - [`info`]: attribute-information lookup mapping a generic property name to
//!   the attribute name used in HTML or SVG markup
//!
//! # Example
//!
//! ```
//! use vmark_hast::{Element, Node, Root};
//!
//! let root = Root::new(vec![
//!     Element::new("h1")
//!         .with_children(vec![Node::text("Hello")])
//!         .into(),
//! ]);
//! assert_eq!(root.children[0].text_content(), "Hello");
//! ```
//!
//! With the `serde` feature enabled, trees (de)serialize in the hast JSON shape
//! (`{"type": "element", "tagName": "p", ...}`).

pub mod info;
mod node;
mod value;

pub use info::{AttributeInfo, Space, find};
pub use node::{Comment, Element, Node, Raw, Root, Text};
pub use value::{Properties, PropertyValue};
