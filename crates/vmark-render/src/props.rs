//! Semantic properties derived per element.

use vmark_hast::{Element, Node, PropertyValue};

use crate::attributes::Attributes;
use crate::context::Context;

/// Properties computed from an element's tag, position and content.
///
/// They are merged into the combined attributes handed to customization
/// functions and slot renderers under the keys `level`, `depth`, `ordered`,
/// `index`, `language`, `languageOriginal`, `content`, `inline` and `isHead`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DerivedProps {
    /// No semantic properties for this tag.
    #[default]
    None,
    /// `h1`..`h6`.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
    },
    /// `code`.
    Code {
        /// Class token carrying the language (`language-js`), or empty.
        language_original: String,
        /// Language name (`js`), or empty.
        language: String,
        /// Code is inline, i.e. not the direct child of a `pre`.
        inline: bool,
        /// Text of the first child.
        content: String,
    },
    /// `ul` and `ol`.
    List {
        /// Nesting depth, 0 for a top-level list.
        depth: i32,
        /// Ordered list.
        ordered: bool,
    },
    /// `li`.
    ListItem {
        /// Depth of the containing list.
        depth: i32,
        /// Containing list is ordered.
        ordered: bool,
        /// Position among the list's items, starting at 0.
        index: i32,
    },
    /// `td`, `th` and `tr`.
    TableCell {
        /// Inside the table header.
        is_head: bool,
    },
}

impl DerivedProps {
    /// Derive properties for `element`.
    ///
    /// `incoming` is the context the element was reached with; `child` is
    /// the context it passes to its children.
    #[must_use]
    pub fn derive(element: &Element, parent: Option<&Element>, incoming: &Context, child: &Context) -> Self {
        match element.tag_name.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading {
                level: heading_level(&element.tag_name),
            },
            "code" => {
                let language_original = element
                    .class_names()
                    .iter()
                    .find(|class| class.starts_with("language-"))
                    .cloned()
                    .unwrap_or_default();
                let language = language_original
                    .strip_prefix("language-")
                    .unwrap_or_default()
                    .to_owned();
                // Text of the first child; empty when the element has none.
                let content = element
                    .children
                    .first()
                    .map(Node::text_content)
                    .unwrap_or_default();
                Self::Code {
                    language_original,
                    language,
                    inline: parent.is_none_or(|p| p.tag_name != "pre"),
                    content,
                }
            }
            "td" | "th" | "tr" => Self::TableCell {
                is_head: incoming.is_table_head(),
            },
            "ul" | "ol" => Self::List {
                depth: child.list_depth,
                ordered: child.list_ordered,
            },
            "li" => Self::ListItem {
                depth: child.list_depth,
                ordered: child.list_ordered,
                index: child.list_item_index,
            },
            _ => Self::None,
        }
    }

    /// Semantic alias for this element, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            Self::Heading { .. } => Some("heading"),
            Self::Code { inline: true, .. } => Some("inline-code"),
            Self::Code { inline: false, .. } => Some("block-code"),
            Self::List { .. } => Some("list"),
            Self::ListItem { .. } => Some("list-item"),
            Self::TableCell { .. } | Self::None => None,
        }
    }

    /// Insert the properties into `out` under their camelCase keys.
    pub fn write_into(&self, out: &mut Attributes) {
        let mut set = |key: &str, value: PropertyValue| {
            out.insert(key.to_owned(), value);
        };
        match self {
            Self::None => {}
            Self::Heading { level } => set("level", f64::from(*level).into()),
            Self::Code {
                language_original,
                language,
                inline,
                content,
            } => {
                set("languageOriginal", language_original.as_str().into());
                set("language", language.as_str().into());
                set("inline", (*inline).into());
                set("content", content.as_str().into());
            }
            Self::List { depth, ordered } => {
                set("depth", f64::from(*depth).into());
                set("ordered", (*ordered).into());
            }
            Self::ListItem {
                depth,
                ordered,
                index,
            } => {
                set("depth", f64::from(*depth).into());
                set("ordered", (*ordered).into());
                set("index", f64::from(*index).into());
            }
            Self::TableCell { is_head } => set("isHead", (*is_head).into()),
        }
    }

    /// Properties as a fresh attribute map.
    #[must_use]
    pub fn to_attributes(&self) -> Attributes {
        let mut out = Attributes::new();
        self.write_into(&mut out);
        out
    }
}

fn heading_level(tag: &str) -> u8 {
    tag.as_bytes()
        .get(1)
        .map_or(1, |digit| digit.saturating_sub(b'0'))
}
