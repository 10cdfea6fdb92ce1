//! Named render overrides.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vmark_hast::{Element, PropertyValue};

use crate::attributes::Attributes;
use crate::backend::Rendered;

/// Arguments handed to a slot renderer.
///
/// Holds the element's derived properties, its key and its final attributes
/// (attributes win on conflict), plus a lazy producer of the default-rendered
/// children. The slot decides whether to call it.
pub struct SlotScope<'s, N> {
    element: &'s Element,
    attrs: Attributes,
    children: &'s dyn Fn() -> Vec<Rendered<N>>,
}

impl<'s, N> SlotScope<'s, N> {
    pub(crate) fn new(element: &'s Element, attrs: Attributes, children: &'s dyn Fn() -> Vec<Rendered<N>>) -> Self {
        Self {
            element,
            attrs,
            children,
        }
    }

    /// Element being rendered.
    #[must_use]
    pub fn element(&self) -> &Element {
        self.element
    }

    /// Scope attributes: derived properties, `key` and final attributes.
    #[must_use]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Look up one scope attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.attrs.get(key)
    }

    /// Render the element's children with the default pipeline.
    #[must_use]
    pub fn children(&self) -> Vec<Rendered<N>> {
        (self.children)()
    }
}

/// Slot renderer.
pub type SlotFn<N> = dyn Fn(&SlotScope<'_, N>) -> Rendered<N> + Send + Sync;

/// Registry of slot renderers keyed by alias.
pub struct Slots<N> {
    entries: HashMap<String, Arc<SlotFn<N>>>,
}

impl<N> Slots<N> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a slot renderer for `alias`.
    #[must_use]
    pub fn with(
        mut self,
        alias: impl Into<String>,
        f: impl Fn(&SlotScope<'_, N>) -> Rendered<N> + Send + Sync + 'static,
    ) -> Self {
        self.insert(alias, f);
        self
    }

    /// Register a slot renderer, replacing any previous one for `alias`.
    pub fn insert(
        &mut self,
        alias: impl Into<String>,
        f: impl Fn(&SlotScope<'_, N>) -> Rendered<N> + Send + Sync + 'static,
    ) {
        self.entries.insert(alias.into(), Arc::new(f));
    }

    /// Slot registered for `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&SlotFn<N>> {
        self.entries.get(alias).map(Arc::as_ref)
    }

    /// Whether no slots are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N> Default for Slots<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for Slots<N> {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(alias, f)| (alias.clone(), Arc::clone(f)))
                .collect(),
        }
    }
}

impl<N> fmt::Debug for Slots<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Slots").field("names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_children_are_lazy() {
        let element = Element::new("p");
        let calls = std::cell::Cell::new(0);
        let produce = || {
            calls.set(calls.get() + 1);
            vec![Rendered::<()>::Text("x".to_owned())]
        };
        let scope = SlotScope::new(&element, Attributes::new(), &produce);
        assert_eq!(calls.get(), 0);
        assert_eq!(scope.children(), vec![Rendered::Text("x".to_owned())]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_registry() {
        let slots: Slots<()> = Slots::new().with("h1", |scope| Rendered::Text(scope.element().tag_name.clone()));
        assert!(slots.get("h1").is_some());
        assert!(slots.get("h2").is_none());
        assert!(!slots.is_empty());
        assert_eq!(format!("{slots:?}"), r#"Slots { names: ["h1"] }"#);
    }
}
