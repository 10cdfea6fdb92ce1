//! Tree node types.

use crate::value::{Properties, PropertyValue};

/// Node in the element tree.
///
/// Children order is rendering order. Consumers must preserve it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Node {
    /// Nested root. Some transform plugins return a sub-root in place of an element.
    Root(Root),
    /// Element with tag name, properties and children.
    Element(Element),
    /// Text leaf.
    Text(Text),
    /// Trusted markup passed through without escaping.
    Raw(Raw),
    /// Markup comment.
    Comment(Comment),
    /// Document type declaration.
    Doctype,
    /// Node kind this crate does not know about.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Text {
            value: value.into(),
        })
    }

    /// Create a raw markup node.
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw(Raw {
            value: value.into(),
        })
    }

    /// Create a comment node.
    #[must_use]
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment(Comment {
            value: value.into(),
        })
    }

    /// Borrow as element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutably borrow as element, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whether this node is an element with the given tag name.
    #[must_use]
    pub fn is_element(&self, tag_name: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag_name == tag_name)
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&text.value),
            Self::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            Self::Root(root) => root.children.iter().for_each(|c| c.collect_text(out)),
            Self::Raw(_) | Self::Comment(_) | Self::Doctype | Self::Unknown => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<Root> for Node {
    fn from(root: Root) -> Self {
        Self::Root(root)
    }
}

/// Top-level node of an element tree.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Root {
    /// Top-level nodes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Node>,
}

impl Root {
    /// Create a root with the given children.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// Element node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Element {
    /// Tag name (`h1`, `code`, `svg`).
    pub tag_name: String,
    /// Property bag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
    /// Child nodes in rendering order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no properties and no children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Look up a property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Token list of `className`, empty if absent.
    #[must_use]
    pub fn class_names(&self) -> &[String] {
        self.property("className")
            .and_then(PropertyValue::as_list)
            .unwrap_or_default()
    }
}

/// Text leaf.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    /// Text payload.
    pub value: String,
}

/// Raw markup leaf.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Raw {
    /// Markup payload.
    pub value: String,
}

/// Comment leaf.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Comment body.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_nested() {
        let node: Node = Element::new("p")
            .with_children(vec![
                Node::text("Hello "),
                Element::new("strong")
                    .with_children(vec![Node::text("World")])
                    .into(),
                Node::raw("<br>"),
            ])
            .into();
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_is_element() {
        let node: Node = Element::new("pre").into();
        assert!(node.is_element("pre"));
        assert!(!node.is_element("code"));
        assert!(!Node::text("pre").is_element("pre"));
    }

    #[test]
    fn test_class_names() {
        let el = Element::new("code").with_property("className", vec!["language-rust"]);
        assert_eq!(el.class_names(), ["language-rust".to_owned()]);
        assert!(Element::new("code").class_names().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_hast_json() {
        use pretty_assertions::assert_eq;

        let json = r#"{
            "children": [
                {"type": "element", "tagName": "p", "properties": {"className": ["lead"]},
                 "children": [{"type": "text", "value": "hi"}]},
                {"type": "comment", "value": "note"},
                {"type": "mdxJsxFlowElement"}
            ]
        }"#;
        let root: Root = serde_json::from_str(json).unwrap();
        assert_eq!(
            root,
            Root::new(vec![
                Element::new("p")
                    .with_property("className", vec!["lead"])
                    .with_children(vec![Node::text("hi")])
                    .into(),
                Node::comment("note"),
                Node::Unknown,
            ])
        );
    }
}
