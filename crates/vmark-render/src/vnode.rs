//! Owned virtual node tree backend.

use crate::attributes::Attributes;
use crate::backend::{RenderBackend, Rendered};

/// Virtual node produced by [`VNodeBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum VNode {
    /// Element node.
    Element(VElement),
    /// Text node.
    Text(String),
    /// Trusted markup passed through unchanged.
    Raw(String),
}

/// Virtual element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VElement {
    /// Tag name.
    pub tag: String,
    /// Sibling disambiguation key.
    pub key: Option<String>,
    /// Final attributes.
    pub attrs: Attributes,
    /// Children, with fragments already spliced in.
    pub children: Vec<VNode>,
}

impl VNode {
    /// Borrow the element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) | Self::Raw(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements with `tag` in this subtree, in document order.
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Vec<&VElement> {
        let mut out = Vec::new();
        self.collect_elements(tag, &mut out);
        out
    }

    fn collect_elements<'a>(&'a self, tag: &str, out: &mut Vec<&'a VElement>) {
        if let Self::Element(el) = self {
            if el.tag == tag {
                out.push(el);
            }
            for child in &el.children {
                child.collect_elements(tag, out);
            }
        }
    }
}

impl VElement {
    /// Child elements, skipping text and raw nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &VElement> {
        self.children.iter().filter_map(VNode::as_element)
    }
}

/// Backend building an owned [`VNode`] tree.
pub struct VNodeBackend;

impl RenderBackend for VNodeBackend {
    type Node = VNode;

    fn element(tag: &str, key: Option<&str>, attrs: Attributes, children: Vec<Rendered<VNode>>) -> VNode {
        let children = Rendered::flatten(children)
            .into_iter()
            .filter_map(|child| match child {
                Rendered::Node(node) => Some(node),
                Rendered::Text(text) => Some(VNode::Text(text)),
                Rendered::Raw(raw) => Some(VNode::Raw(raw)),
                Rendered::Fragment(_) | Rendered::Empty => None,
            })
            .collect();
        VNode::Element(VElement {
            tag: tag.to_owned(),
            key: key.map(str::to_owned),
            attrs,
            children,
        })
    }
}
