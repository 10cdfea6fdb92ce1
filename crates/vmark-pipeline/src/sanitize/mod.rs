//! Schema-based sanitizer for element trees.
//!
//! Mirrors `hast-util-sanitize`: elements outside [`Schema::tag_names`] are
//! replaced by their children, [`Schema::strip`] elements disappear with
//! their content, and properties are filtered against per-tag and `*` rules.
//! Raw HTML nodes never survive.
//!
//! Sanitizing is idempotent: clobber prefixes are only added to values that
//! do not carry them yet.

mod merge;
mod schema;

use std::mem;

use vmark_hast::{Element, Node, Properties, PropertyValue, Root};

use crate::error::PipelineError;
use crate::plugin::HastPlugin;

pub use merge::{ArrayMerge, MergeOptions, SanitizeOptions, deep_merge};
pub use schema::{AttributeRule, Schema, ValueRule};

/// Post-lowering stage that strips what the schema disallows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sanitizer {
    schema: Schema,
}

impl Sanitizer {
    /// Create a sanitizer with an explicit schema.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Create a sanitizer from the default schema merged with the fragment in
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Schema`] if the merged schema does not
    /// deserialize (for example a malformed attribute rule).
    pub fn from_options(options: &SanitizeOptions) -> Result<Self, PipelineError> {
        let Some(fragment) = &options.schema else {
            return Ok(Self::default());
        };
        let base = serde_json::to_value(Schema::default())?;
        let merged = deep_merge(base, fragment.clone(), options.merge);
        Ok(Self::new(serde_json::from_value(merged)?))
    }

    /// The effective schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Sanitize a tree in place.
    pub fn sanitize(&self, root: &mut Root) {
        let mut ancestors = Vec::new();
        root.children = self.children(mem::take(&mut root.children), &mut ancestors);
    }

    fn children(&self, children: Vec<Node>, ancestors: &mut Vec<String>) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            self.node(child, ancestors, &mut out);
        }
        out
    }

    fn node(&self, node: Node, ancestors: &mut Vec<String>, out: &mut Vec<Node>) {
        match node {
            Node::Text(_) => out.push(node),
            Node::Root(root) => out.push(Root::new(self.children(root.children, ancestors)).into()),
            Node::Element(element) => self.element(element, ancestors, out),
            Node::Comment(_) if self.schema.allow_comments => out.push(node),
            Node::Doctype if self.schema.allow_doctypes => out.push(node),
            Node::Raw(_) | Node::Comment(_) | Node::Doctype | Node::Unknown => {
                tracing::trace!(node = ?node, "Sanitizer removed node");
            }
        }
    }

    fn element(&self, mut element: Element, ancestors: &mut Vec<String>, out: &mut Vec<Node>) {
        let tag = element.tag_name.as_str();
        let allowed = self.schema.tag_names.iter().any(|t| t == tag)
            && self.ancestors_allowed(tag, ancestors);

        if !allowed {
            if self.schema.strip.iter().any(|t| t == tag) {
                tracing::trace!(tag, "Sanitizer stripped element");
                return;
            }
            tracing::trace!(tag, "Sanitizer unwrapped element");
            out.extend(self.children(element.children, ancestors));
            return;
        }

        element.properties = self.properties(tag, mem::take(&mut element.properties));
        ancestors.push(element.tag_name.clone());
        element.children = self.children(mem::take(&mut element.children), ancestors);
        ancestors.pop();
        out.push(element.into());
    }

    fn ancestors_allowed(&self, tag: &str, ancestors: &[String]) -> bool {
        self.schema
            .ancestors
            .get(tag)
            .is_none_or(|required| ancestors.iter().any(|a| required.contains(a)))
    }

    fn properties(&self, tag: &str, properties: Properties) -> Properties {
        let specific = self.schema.attributes.get(tag);
        let global = self.schema.attributes.get("*");
        let mut out = Properties::new();

        for (key, value) in properties {
            let rule = find_rule(specific, &key).or_else(|| find_rule(global, &key));
            let Some(rule) = rule else {
                tracing::trace!(tag, property = %key, "Sanitizer dropped property");
                continue;
            };
            match self.value(&key, value, rule) {
                Some(value) => {
                    out.insert(key, value);
                }
                None => tracing::trace!(tag, property = %key, "Sanitizer dropped property value"),
            }
        }

        if let Some(required) = self.schema.required.get(tag) {
            for (key, value) in required {
                if out.contains_key(key) {
                    continue;
                }
                if let Some(value) = schema::property_from_json(value) {
                    out.insert(key.clone(), value);
                }
            }
        }
        out
    }

    fn value(&self, key: &str, value: PropertyValue, rule: &AttributeRule) -> Option<PropertyValue> {
        match value {
            PropertyValue::List(items) => {
                let items: Vec<String> = items
                    .into_iter()
                    .filter_map(|item| match self.primitive(key, PropertyValue::Str(item), rule) {
                        Some(PropertyValue::Str(item)) => Some(item),
                        _ => None,
                    })
                    .collect();
                (!items.is_empty()).then_some(PropertyValue::List(items))
            }
            value => self.primitive(key, value, rule),
        }
    }

    fn primitive(&self, key: &str, value: PropertyValue, rule: &AttributeRule) -> Option<PropertyValue> {
        if let PropertyValue::Str(s) = &value
            && !self.safe_protocol(key, s)
        {
            return None;
        }
        if let Some(values) = &rule.values
            && !values.iter().any(|allowed| allowed.matches(&value))
        {
            return None;
        }
        match value {
            PropertyValue::Str(s) if self.schema.clobber.iter().any(|c| c == key) => {
                let prefix = &self.schema.clobber_prefix;
                if s.starts_with(prefix.as_str()) {
                    Some(PropertyValue::Str(s))
                } else {
                    Some(PropertyValue::Str(format!("{prefix}{s}")))
                }
            }
            value => Some(value),
        }
    }

    /// Relative URLs are always safe; absolute ones need an allowed protocol.
    fn safe_protocol(&self, key: &str, url: &str) -> bool {
        let Some(protocols) = self.schema.protocols.get(key) else {
            return true;
        };
        let Some(colon) = url.find(':') else {
            return true;
        };
        let before = |c: char| url.find(c).is_some_and(|index| index < colon);
        if before('/') || before('?') || before('#') {
            return true;
        }
        let scheme = &url[..colon];
        protocols.iter().any(|protocol| protocol == scheme)
    }
}

fn find_rule<'a>(rules: Option<&'a Vec<AttributeRule>>, key: &str) -> Option<&'a AttributeRule> {
    rules?.iter().find(|rule| rule.covers(key))
}

impl HastPlugin for Sanitizer {
    fn name(&self) -> &'static str {
        "sanitize"
    }

    fn transform(&self, root: &mut Root) -> Result<(), PipelineError> {
        self.sanitize(root);
        Ok(())
    }
}
