//! Traversal context threaded from parents to children.

/// Table section an element sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSection {
    /// Inside `thead`.
    Head,
    /// Inside `tbody`.
    Body,
}

/// Ambient traversal state.
///
/// A value type: every element derives a fresh context for its children with
/// [`derive`](Self::derive); siblings never see each other's context except
/// for the list-item index, which the renderer carries across literal
/// siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    /// Nesting depth of the enclosing list, `-1` outside any list.
    pub list_depth: i32,
    /// Whether the enclosing list is ordered.
    pub list_ordered: bool,
    /// Index of the current list item, `-1` before the first item.
    pub list_item_index: i32,
    /// Enclosing table section.
    pub table_section: Option<TableSection>,
    /// Inside an `svg` element. Once set, it stays set for all descendants.
    pub in_svg: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            list_depth: -1,
            list_ordered: false,
            list_item_index: -1,
            table_section: None,
            in_svg: false,
        }
    }
}

impl Context {
    /// Context at the root of a tree.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Context that an element with `tag` passes to its children.
    #[must_use]
    pub fn derive(&self, tag: &str) -> Self {
        let mut next = *self;
        match tag {
            "svg" => next.in_svg = true,
            "ul" | "ol" => {
                next.list_depth = self.list_depth + 1;
                next.list_ordered = tag == "ol";
                next.list_item_index = -1;
            }
            "li" => next.list_item_index = self.list_item_index + 1,
            "thead" => next.table_section = Some(TableSection::Head),
            "tbody" => next.table_section = Some(TableSection::Body),
            _ => {}
        }
        next
    }

    /// Whether table cells and rows in this context belong to the header.
    #[must_use]
    pub fn is_table_head(&self) -> bool {
        self.table_section == Some(TableSection::Head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_context() {
        let ctx = Context::root();
        assert_eq!(ctx.list_depth, -1);
        assert_eq!(ctx.list_item_index, -1);
        assert!(!ctx.list_ordered);
        assert!(!ctx.in_svg);
        assert_eq!(ctx.table_section, None);
    }

    #[test]
    fn test_list_resets_index_and_increments_depth() {
        let outer = Context::root().derive("ul");
        assert_eq!(outer.list_depth, 0);
        assert!(!outer.list_ordered);

        let item = outer.derive("li");
        assert_eq!(item.list_item_index, 0);

        let inner = item.derive("ol");
        assert_eq!(inner.list_depth, 1);
        assert!(inner.list_ordered);
        assert_eq!(inner.list_item_index, -1);
    }

    #[test]
    fn test_svg_is_sticky() {
        let ctx = Context::root().derive("svg").derive("g").derive("ul");
        assert!(ctx.in_svg);
    }

    #[test]
    fn test_table_sections() {
        let head = Context::root().derive("table").derive("thead");
        assert!(head.derive("tr").is_table_head());
        let body = head.derive("tbody");
        assert_eq!(body.table_section, Some(TableSection::Body));
        assert!(!body.is_table_head());
    }

    #[test]
    fn test_other_tags_copy_context() {
        let ctx = Context::root().derive("ul");
        assert_eq!(ctx.derive("p"), ctx);
    }
}
