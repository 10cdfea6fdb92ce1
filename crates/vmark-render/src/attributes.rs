//! Mapping of property bags to markup attributes.

use std::collections::BTreeMap;

use vmark_hast::{Properties, PropertyValue, Space, find};

/// Attributes keyed by markup attribute name (`class`, `for`, `data-x`).
///
/// Also used for customization results and combined attributes, which may
/// carry non-markup keys such as `level`.
pub type Attributes = BTreeMap<String, PropertyValue>;

/// Convert a property bag into attributes for `space`.
///
/// Properties named in `skip` are left out.
#[must_use]
pub fn resolve_attributes(properties: &Properties, space: Space, skip: &[&str]) -> Attributes {
    properties
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .map(|(key, value)| (find(space, key).attribute.into_owned(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_html_names() {
        let mut properties = Properties::new();
        properties.insert("className".to_owned(), vec!["a", "b"].into());
        properties.insert("dataFootnoteRef".to_owned(), true.into());
        properties.insert("href".to_owned(), "/x".into());

        let attrs = resolve_attributes(&properties, Space::Html, &[]);
        assert_eq!(
            attrs.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["class", "data-footnote-ref", "href"]
        );
        assert_eq!(attrs["class"], PropertyValue::from(vec!["a", "b"]));
    }

    #[test]
    fn test_svg_names() {
        let mut properties = Properties::new();
        properties.insert("strokeWidth".to_owned(), "2".into());
        properties.insert("viewBox".to_owned(), "0 0 10 10".into());

        let attrs = resolve_attributes(&properties, Space::Svg, &[]);
        assert!(attrs.contains_key("stroke-width"));
        assert!(attrs.contains_key("viewBox"));
    }

    #[test]
    fn test_skip() {
        let mut properties = Properties::new();
        properties.insert("slot-name".to_owned(), "x".into());
        properties.insert("id".to_owned(), "y".into());

        let attrs = resolve_attributes(&properties, Space::Html, &["slot-name"]);
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains_key("id"));
    }
}
