//! Element tree renderer with pluggable backend.

use std::borrow::Cow;
use std::collections::HashMap;
use std::marker::PhantomData;

use vmark_hast::{Element, Node, Root, Space};

use crate::alias::{AliasList, SLOT_NAME_PROPERTY, slot_name};
use crate::attributes::{Attributes, resolve_attributes};
use crate::backend::{RenderBackend, Rendered};
use crate::context::Context;
use crate::custom::{AttrMergeMode, CustomAttrs};
use crate::props::DerivedProps;
use crate::slots::{SlotScope, Slots};

/// Per-sibling-list counter producing `tag-N` keys.
#[derive(Debug, Default)]
pub struct KeyCounter {
    counts: HashMap<String, usize>,
}

impl KeyCounter {
    /// Create a counter for a new sibling list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next key for `tag`: `tag-0`, `tag-1`, ...
    pub fn next(&mut self, tag: &str) -> String {
        let count = self.counts.entry(tag.to_owned()).or_insert(0);
        let key = format!("{tag}-{count}");
        *count += 1;
        key
    }
}

/// Resolution of one element before construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementInfo<'n> {
    /// Element as seen by customizations and slots; slot markers lose
    /// their `slot-name` property.
    pub element: Cow<'n, Element>,
    /// Final attributes after customization.
    pub attrs: Attributes,
    /// Context passed to the element's children.
    pub context: Context,
    /// Lookup keys of the element.
    pub aliases: AliasList,
    /// Derived semantic properties.
    pub props: DerivedProps,
    /// Sibling disambiguation key.
    pub key: String,
}

impl ElementInfo<'_> {
    /// Derived properties plus `key`.
    #[must_use]
    pub fn node_props(&self) -> Attributes {
        let mut out = self.props.to_attributes();
        out.insert("key".to_owned(), self.key.as_str().into());
        out
    }
}

/// Renders element trees through a [`RenderBackend`].
///
/// Holds the customization and slot registries; a single renderer can render
/// any number of trees.
///
/// # Example
///
/// ```
/// use vmark_hast::{Element, Node, Root};
/// use vmark_render::{Attributes, HastRenderer, HtmlBackend};
///
/// let root = Root::new(vec![
///     Element::new("h1").with_children(vec![Node::text("Hello")]).into(),
/// ]);
/// let html = HastRenderer::<HtmlBackend>::new().render(&root, Attributes::new());
/// assert_eq!(html, "<div><h1>Hello</h1></div>");
/// ```
pub struct HastRenderer<B: RenderBackend> {
    custom_attrs: CustomAttrs,
    slots: Slots<B::Node>,
    merge_mode: AttrMergeMode,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> HastRenderer<B> {
    /// Create a renderer without customizations or slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom_attrs: CustomAttrs::default(),
            slots: Slots::default(),
            merge_mode: AttrMergeMode::default(),
            _backend: PhantomData,
        }
    }

    /// Set the attribute override registry.
    #[must_use]
    pub fn with_custom_attrs(mut self, custom_attrs: CustomAttrs) -> Self {
        self.custom_attrs = custom_attrs;
        self
    }

    /// Set the slot registry.
    #[must_use]
    pub fn with_slots(mut self, slots: Slots<B::Node>) -> Self {
        self.slots = slots;
        self
    }

    /// Set how override results combine with element attributes.
    #[must_use]
    pub fn with_merge_mode(mut self, merge_mode: AttrMergeMode) -> Self {
        self.merge_mode = merge_mode;
        self
    }

    /// Render a tree wrapped in a `div` carrying `host_attrs`.
    pub fn render(&self, root: &Root, host_attrs: Attributes) -> B::Node {
        let children = self.render_children(&root.children, Context::root(), None);
        B::element("div", None, host_attrs, children)
    }

    /// Render a sibling list.
    ///
    /// `context` is the parent's child context and `parent` the element the
    /// nodes belong to (`None` at the root).
    pub fn render_children(&self, nodes: &[Node], context: Context, parent: Option<&Element>) -> Vec<Rendered<B::Node>> {
        let mut keys = KeyCounter::new();
        let mut sibling = context;
        self.render_sequence(nodes, &mut sibling, parent, &mut keys)
    }

    /// Render nodes into the sibling list tracked by `sibling` and `keys`.
    ///
    /// Nested roots are spliced into the surrounding list, so they share its
    /// key counter and list-item index.
    fn render_sequence(
        &self,
        nodes: &[Node],
        sibling: &mut Context,
        parent: Option<&Element>,
        keys: &mut KeyCounter,
    ) -> Vec<Rendered<B::Node>> {
        nodes
            .iter()
            .map(|node| self.render_node(node, sibling, parent, keys))
            .collect()
    }

    fn render_node(
        &self,
        node: &Node,
        sibling: &mut Context,
        parent: Option<&Element>,
        keys: &mut KeyCounter,
    ) -> Rendered<B::Node> {
        match node {
            Node::Text(text) => Rendered::Text(text.value.clone()),
            Node::Raw(raw) => Rendered::Raw(raw.value.clone()),
            Node::Root(root) => Rendered::Fragment(self.render_sequence(&root.children, sibling, parent, keys)),
            Node::Element(element) => {
                let info = self.element_info(element, parent, sibling, keys);
                if element.tag_name == "li" {
                    sibling.list_item_index = info.context.list_item_index;
                }
                self.render_element(element, info)
            }
            Node::Comment(_) | Node::Doctype | Node::Unknown => Rendered::Empty,
        }
    }

    fn render_element(&self, element: &Element, info: ElementInfo<'_>) -> Rendered<B::Node> {
        let context = info.context;
        let children = || self.render_children(&element.children, context, Some(element));

        if let Some((alias, slot)) = info.aliases.resolve(|alias| self.slots.get(alias)) {
            tracing::trace!(alias, key = %info.key, "Dispatching to slot");
            let mut scope_attrs = info.node_props();
            scope_attrs.extend(info.attrs.clone());
            return slot(&SlotScope::new(&info.element, scope_attrs, &children));
        }

        Rendered::Node(B::element(&element.tag_name, Some(&info.key), info.attrs, children()))
    }

    /// Resolve attributes, context, aliases and derived properties of one
    /// element reached with `context`.
    pub fn element_info<'n>(
        &self,
        element: &'n Element,
        parent: Option<&Element>,
        context: &Context,
        keys: &mut KeyCounter,
    ) -> ElementInfo<'n> {
        let key = keys.next(&element.tag_name);
        let child_context = context.derive(&element.tag_name);
        // An `svg` element's own attributes stay in the incoming space.
        let space = if context.in_svg { Space::Svg } else { Space::Html };

        let is_slot_marker = slot_name(element).is_some();
        let skip: &[&str] = if is_slot_marker { &[SLOT_NAME_PROPERTY] } else { &[] };
        let raw_attrs = resolve_attributes(&element.properties, space, skip);

        let props = DerivedProps::derive(element, parent, context, &child_context);
        let aliases = AliasList::build(element, &props);

        let element: Cow<'n, Element> = if is_slot_marker {
            let mut stripped = element.clone();
            stripped.properties.remove(SLOT_NAME_PROPERTY);
            Cow::Owned(stripped)
        } else {
            Cow::Borrowed(element)
        };

        let mut info = ElementInfo {
            element,
            attrs: Attributes::new(),
            context: child_context,
            aliases,
            props,
            key,
        };
        let mut combined = raw_attrs.clone();
        combined.extend(info.node_props());
        info.attrs = self
            .custom_attrs
            .apply(&info.element, &info.aliases, &combined, raw_attrs, self.merge_mode);
        info
    }
}

impl<B: RenderBackend> Default for HastRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
