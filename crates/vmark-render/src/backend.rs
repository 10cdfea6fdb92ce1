//! Node construction backends.

use crate::attributes::Attributes;

/// Output of rendering one tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered<N> {
    /// A node built by the backend.
    Node(N),
    /// Text, escaped by the backend as needed.
    Text(String),
    /// Trusted markup, emitted verbatim.
    Raw(String),
    /// Several nodes spliced in place (nested roots, slot output).
    Fragment(Vec<Rendered<N>>),
    /// Nothing (unknown node kinds).
    Empty,
}

impl<N> Rendered<N> {
    /// Flatten fragments and drop empties, appending to `out`.
    pub fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::Fragment(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            Self::Empty => {}
            other => out.push(other),
        }
    }

    /// Flatten a list of rendered children.
    #[must_use]
    pub fn flatten(items: Vec<Self>) -> Vec<Self> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            item.flatten_into(&mut out);
        }
        out
    }
}

impl<N> From<N> for Rendered<N> {
    fn from(node: N) -> Self {
        Self::Node(node)
    }
}

/// Target framework's node-construction primitive.
///
/// Implementations decide how elements are represented: an owned virtual
/// node tree ([`VNodeBackend`](crate::VNodeBackend)) or serialized markup
/// ([`HtmlBackend`](crate::HtmlBackend)).
pub trait RenderBackend {
    /// Constructed node type.
    type Node;

    /// Build an element node.
    ///
    /// `key` disambiguates siblings with the same tag (`li-0`, `li-1`); the
    /// wrapper element has none.
    fn element(tag: &str, key: Option<&str>, attrs: Attributes, children: Vec<Rendered<Self::Node>>) -> Self::Node;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten() {
        let items: Vec<Rendered<u8>> = vec![
            Rendered::Text("a".to_owned()),
            Rendered::Fragment(vec![
                Rendered::Node(1),
                Rendered::Empty,
                Rendered::Fragment(vec![Rendered::Raw("<b>".to_owned())]),
            ]),
            Rendered::Empty,
        ];
        assert_eq!(
            Rendered::flatten(items),
            vec![
                Rendered::Text("a".to_owned()),
                Rendered::Node(1),
                Rendered::Raw("<b>".to_owned()),
            ]
        );
    }
}
