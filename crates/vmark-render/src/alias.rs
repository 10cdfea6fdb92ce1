//! Lookup keys used to find customizations and slots for an element.

use vmark_hast::Element;

use crate::props::DerivedProps;

/// Tag of pass-through marker elements.
pub const SLOT_TAG: &str = "slot";

/// Property naming the slot a marker element resolves to.
pub const SLOT_NAME_PROPERTY: &str = "slot-name";

/// Ordered lookup keys of one element.
///
/// Keys are pushed from least to most specific: the tag name, then the
/// semantic alias (`heading`, `list`, ...) or the explicit `s-<name>` of a
/// slot marker. [`by_priority`](Self::by_priority) walks them the other way,
/// so the first match is the most specific one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasList(Vec<String>);

impl AliasList {
    /// Build the alias list for `element`.
    #[must_use]
    pub fn build(element: &Element, props: &DerivedProps) -> Self {
        let mut aliases = vec![element.tag_name.clone()];
        if let Some(alias) = props.alias() {
            aliases.push(alias.to_owned());
        }
        if let Some(name) = slot_name(element) {
            aliases.push(format!("s-{name}"));
        }
        Self(aliases)
    }

    /// Aliases from most to least specific.
    pub fn by_priority(&self) -> impl Iterator<Item = &str> {
        self.0.iter().rev().map(String::as_str)
    }

    /// Aliases in push order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// First entry of `lookup` that yields a value, by priority.
    pub fn resolve<'a, T>(&self, lookup: impl Fn(&str) -> Option<&'a T>) -> Option<(&str, &'a T)>
    where
        T: ?Sized + 'a,
    {
        self.by_priority()
            .find_map(|alias| lookup(alias).map(|value| (alias, value)))
    }
}

/// Slot name of a marker element: a `slot` element whose `slot-name` is a
/// string.
#[must_use]
pub fn slot_name(element: &Element) -> Option<&str> {
    if element.tag_name != SLOT_TAG {
        return None;
    }
    element.property(SLOT_NAME_PROPERTY)?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_tag_only() {
        let aliases = AliasList::build(&Element::new("p"), &DerivedProps::None);
        assert_eq!(aliases.as_slice(), ["p".to_owned()]);
    }

    #[test]
    fn test_semantic_alias_has_priority() {
        let aliases = AliasList::build(&Element::new("h2"), &DerivedProps::Heading { level: 2 });
        assert_eq!(aliases.by_priority().collect::<Vec<_>>(), vec!["heading", "h2"]);
    }

    #[test]
    fn test_slot_marker() {
        let marker = Element::new("slot").with_property("slot-name", "x");
        let aliases = AliasList::build(&marker, &DerivedProps::None);
        assert_eq!(aliases.by_priority().collect::<Vec<_>>(), vec!["s-x", "slot"]);
    }

    #[test]
    fn test_non_string_slot_name_ignored() {
        let marker = Element::new("slot").with_property("slot-name", true);
        assert_eq!(slot_name(&marker), None);
        let other = Element::new("div").with_property("slot-name", "x");
        assert_eq!(slot_name(&other), None);
    }

    #[test]
    fn test_resolve_first_match() {
        let registry: HashMap<&str, u8> = HashMap::from([("h2", 1), ("heading", 2)]);
        let aliases = AliasList::build(&Element::new("h2"), &DerivedProps::Heading { level: 2 });
        assert_eq!(aliases.resolve(|alias| registry.get(alias)), Some(("heading", &2)));

        let registry: HashMap<&str, u8> = HashMap::from([("h2", 1)]);
        assert_eq!(aliases.resolve(|alias| registry.get(alias)), Some(("h2", &1)));
    }
}
