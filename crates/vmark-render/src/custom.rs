//! Caller-supplied attribute overrides.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vmark_hast::Element;

use crate::alias::AliasList;
use crate::attributes::Attributes;

/// Function computing override attributes from an element and its combined
/// attributes.
pub type CustomAttrFn = dyn Fn(&Element, &Attributes) -> Attributes + Send + Sync;

/// One registered override.
#[derive(Clone)]
pub enum CustomAttr {
    /// Fixed attributes.
    Static(Attributes),
    /// Attributes computed per element.
    Computed(Arc<CustomAttrFn>),
}

impl CustomAttr {
    /// Wrap a function as a computed override.
    pub fn computed(f: impl Fn(&Element, &Attributes) -> Attributes + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    fn evaluate(&self, element: &Element, combined: &Attributes) -> Attributes {
        match self {
            Self::Static(attrs) => attrs.clone(),
            Self::Computed(f) => f(element, combined),
        }
    }
}

impl From<Attributes> for CustomAttr {
    fn from(attrs: Attributes) -> Self {
        Self::Static(attrs)
    }
}

impl fmt::Debug for CustomAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(attrs) => f.debug_tuple("Static").field(attrs).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// How a matched override combines with the element's own attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttrMergeMode {
    /// Override result replaces the element's attributes.
    #[default]
    Replace,
    /// Override result is merged over the element's attributes.
    Merge,
}

/// Registry of overrides keyed by alias (tag name, `heading`, `s-<name>`, ...).
#[derive(Clone, Debug, Default)]
pub struct CustomAttrs {
    entries: HashMap<String, CustomAttr>,
}

impl CustomAttrs {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register static attributes for `alias`.
    #[must_use]
    pub fn with_static(mut self, alias: impl Into<String>, attrs: Attributes) -> Self {
        self.insert(alias, CustomAttr::Static(attrs));
        self
    }

    /// Register a computed override for `alias`.
    #[must_use]
    pub fn with_fn(
        mut self,
        alias: impl Into<String>,
        f: impl Fn(&Element, &Attributes) -> Attributes + Send + Sync + 'static,
    ) -> Self {
        self.insert(alias, CustomAttr::computed(f));
        self
    }

    /// Register an override, replacing any previous one for `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, attr: CustomAttr) {
        self.entries.insert(alias.into(), attr);
    }

    /// Override registered for `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&CustomAttr> {
        self.entries.get(alias)
    }

    /// Whether no overrides are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Final attributes of an element.
    ///
    /// The most specific alias with a registered override wins; its result
    /// replaces or is merged over `attrs` according to `mode`. Without a
    /// match, `attrs` is returned unchanged.
    #[must_use]
    pub fn apply(
        &self,
        element: &Element,
        aliases: &AliasList,
        combined: &Attributes,
        attrs: Attributes,
        mode: AttrMergeMode,
    ) -> Attributes {
        let Some((alias, custom)) = aliases.resolve(|alias| self.get(alias)) else {
            return attrs;
        };
        tracing::trace!(alias, tag = %element.tag_name, "Applying custom attributes");

        let result = custom.evaluate(element, combined);
        match mode {
            AttrMergeMode::Replace => result,
            AttrMergeMode::Merge => {
                let mut merged = attrs;
                merged.extend(result);
                merged
            }
        }
    }
}
