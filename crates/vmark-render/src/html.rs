//! HTML string backend.
//!
//! Serializes straight to HTML5, for server-side output and snapshot tests.

use std::fmt::Write;

use vmark_hast::PropertyValue;

use crate::attributes::Attributes;
use crate::backend::{RenderBackend, Rendered};

/// Elements without closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// HTML render backend.
///
/// - Text is escaped, raw nodes are emitted verbatim
/// - List values are space-joined (`class="a b"`)
/// - `true` renders as a bare attribute, `false` omits it
/// - Keys are not serialized
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    type Node = String;

    fn element(tag: &str, _key: Option<&str>, attrs: Attributes, children: Vec<Rendered<String>>) -> String {
        let mut out = String::with_capacity(64);
        out.push('<');
        out.push_str(tag);
        for (name, value) in &attrs {
            write_attribute(name, value, &mut out);
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag) {
            return out;
        }
        for child in children {
            write_rendered(child, &mut out);
        }
        let _ = write!(out, "</{tag}>");
        out
    }
}

/// Serialize rendered output that is not wrapped in an element.
#[must_use]
pub fn to_html(items: Vec<Rendered<String>>) -> String {
    let mut out = String::new();
    for item in items {
        write_rendered(item, &mut out);
    }
    out
}

fn write_rendered(item: Rendered<String>, out: &mut String) {
    match item {
        Rendered::Node(html) | Rendered::Raw(html) => out.push_str(&html),
        Rendered::Text(text) => out.push_str(&escape_html(&text)),
        Rendered::Fragment(items) => {
            for item in items {
                write_rendered(item, out);
            }
        }
        Rendered::Empty => {}
    }
}

fn write_attribute(name: &str, value: &PropertyValue, out: &mut String) {
    match value {
        PropertyValue::Bool(false) => {}
        PropertyValue::Bool(true) => {
            out.push(' ');
            out.push_str(name);
        }
        value => {
            let _ = write!(out, r#" {name}="{}""#, escape_html(&value.to_string()));
        }
    }
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
