//! Element tree renderer for vmark.
//!
//! Walks a [`Root`](vmark_hast::Root) and constructs nodes through a
//! [`RenderBackend`], threading a [`Context`] from parents to children.
//! Every element gets:
//!
//! - a sibling key (`li-0`, `li-1`, ...) from a [`KeyCounter`]
//! - attributes resolved from its property bag ([`resolve_attributes`]),
//!   in the SVG space once inside an `svg`
//! - derived semantic properties ([`DerivedProps`]): heading level, code
//!   language, list depth and index, table header flag
//! - an [`AliasList`] used to look up [`CustomAttrs`] and [`Slots`]
//!
//! Two backends ship with the crate: [`VNodeBackend`] builds an owned
//! [`VNode`] tree, [`HtmlBackend`] serializes to HTML.
//!
//! # Example
//!
//! ```
//! use vmark_hast::{Element, Node, Root};
//! use vmark_render::{Attributes, CustomAttrs, HastRenderer, HtmlBackend, Rendered, SlotScope, Slots};
//!
//! let root = Root::new(vec![
//!     Element::new("h2").with_children(vec![Node::text("Intro")]).into(),
//!     Element::new("p").with_children(vec![Node::text("Body")]).into(),
//! ]);
//!
//! let mut class = Attributes::new();
//! class.insert("class".to_owned(), "lead".into());
//! let slots = Slots::new().with("heading", |scope: &SlotScope<'_, String>| {
//!     Rendered::Text(format!("[{}]", scope.element().tag_name))
//! });
//!
//! let html = HastRenderer::<HtmlBackend>::new()
//!     .with_custom_attrs(CustomAttrs::new().with_static("p", class))
//!     .with_slots(slots)
//!     .render(&root, Attributes::new());
//! assert_eq!(html, r#"<div>[h2]<p class="lead">Body</p></div>"#);
//! ```

mod alias;
mod attributes;
mod backend;
mod context;
mod custom;
mod html;
mod props;
mod renderer;
mod slots;
mod vnode;

pub use alias::{AliasList, SLOT_NAME_PROPERTY, SLOT_TAG, slot_name};
pub use attributes::{Attributes, resolve_attributes};
pub use backend::{RenderBackend, Rendered};
pub use context::{Context, TableSection};
pub use custom::{AttrMergeMode, CustomAttr, CustomAttrFn, CustomAttrs};
pub use html::{HtmlBackend, escape_html, to_html};
pub use props::DerivedProps;
pub use renderer::{ElementInfo, HastRenderer, KeyCounter};
pub use slots::{SlotFn, SlotScope, Slots};
pub use vnode::{VElement, VNode, VNodeBackend};
