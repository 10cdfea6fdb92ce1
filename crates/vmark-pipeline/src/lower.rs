//! Lowering from the intermediate markdown tree to the element tree.
//!
//! Output follows the mdast-to-hast conventions so that element trees look the
//! same whichever toolchain produced them:
//!
//! - Block children are separated by `"\n"` text nodes (root: between children;
//!   blockquotes, lists and tables: also before the first and after the last)
//! - Fenced code becomes `pre > code.language-{lang}` with a single text child
//! - Tight list items unwrap their paragraphs
//! - Footnote definitions move to a trailing `section.footnotes`

use std::collections::HashMap;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag};
use serde::Deserialize;
use vmark_hast::{Element, Node, PropertyValue, Root};

use crate::mdast::Mdast;

/// Options for the lowering stage.
///
/// Every option is pass-through configuration of the lowering itself; the
/// source file of the document is never part of it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoweringOptions {
    /// Keep raw HTML from the markdown source as [`Node::Raw`].
    ///
    /// When `false`, raw HTML is dropped during lowering.
    pub allow_dangerous_html: bool,
    /// Prefix for generated ids (footnotes) to avoid clobbering page ids.
    pub clobber_prefix: String,
    /// Text of the footnote section heading.
    pub footnote_label: String,
    /// Tag name of the footnote section heading.
    pub footnote_label_tag_name: String,
    /// Content of footnote back references.
    pub footnote_back_content: String,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            allow_dangerous_html: true,
            clobber_prefix: "user-content-".to_owned(),
            footnote_label: "Footnotes".to_owned(),
            footnote_label_tag_name: "h2".to_owned(),
            footnote_back_content: "↩".to_owned(),
        }
    }
}

/// Lower the intermediate tree into an element tree.
#[must_use]
pub fn lower(mdast: &Mdast, options: &LoweringOptions) -> Root {
    let mut lowerer = Lowerer::new(options);
    for event in &mdast.events {
        lowerer.event(event);
    }
    lowerer.finish()
}

/// Tags that end an inline run inside a tight list item.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
}

enum FrameKind {
    Root,
    Element(Element),
    /// Element whose children are wrapped with leading and trailing newlines.
    Loose(Element),
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    HtmlBlock(String),
    List {
        start: Option<u64>,
        items: Vec<PendingItem>,
    },
    Item {
        task: Option<bool>,
    },
    Table {
        alignments: Vec<Alignment>,
        head: Option<Node>,
        rows: Vec<Node>,
    },
    TableHead {
        cells: usize,
    },
    TableRow {
        cells: usize,
    },
    Image {
        src: String,
        title: String,
    },
    FootnoteDefinition(String),
    Skip,
}

/// List item whose shape depends on the looseness of the whole list.
struct PendingItem {
    children: Vec<Node>,
    task: Option<bool>,
}

struct Lowerer<'o> {
    options: &'o LoweringOptions,
    stack: Vec<Frame>,
    definitions: HashMap<String, Vec<Node>>,
    /// Footnote ids in first-reference order.
    footnote_order: Vec<String>,
    /// Number of references per footnote id.
    footnote_refs: HashMap<String, usize>,
}

impl<'o> Lowerer<'o> {
    fn new(options: &'o LoweringOptions) -> Self {
        Self {
            options,
            stack: vec![Frame {
                kind: FrameKind::Root,
                children: Vec::new(),
            }],
            definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnote_refs: HashMap::new(),
        }
    }

    fn event(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(text),
            Event::Code(code) => self.push(
                Element::new("code")
                    .with_children(vec![Node::text(code.to_string())])
                    .into(),
            ),
            Event::InlineMath(math) => self.push(math_code(math, "math-inline")),
            Event::DisplayMath(math) => {
                let code = math_code(math, "math-display");
                self.push(Element::new("pre").with_children(vec![code]).into());
            }
            Event::Html(html) | Event::InlineHtml(html) => self.html(html),
            Event::FootnoteReference(label) => self.footnote_reference(label),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => {
                self.push(Element::new("br").into());
                self.push(Node::text("\n"));
            }
            Event::Rule => self.push(Element::new("hr").into()),
            Event::TaskListMarker(checked) => self.task_marker(*checked),
        }
    }

    fn start(&mut self, tag: &Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Element(Element::new("p")),
            Tag::Heading {
                level,
                id,
                classes,
                attrs,
            } => {
                let mut heading = Element::new(format!("h{}", heading_level_to_num(*level)));
                if let Some(id) = id {
                    heading = heading.with_property("id", id.to_string());
                }
                if !classes.is_empty() {
                    let classes: Vec<String> = classes.iter().map(ToString::to_string).collect();
                    heading = heading.with_property("className", classes);
                }
                for (key, value) in attrs {
                    let value = value.as_deref().unwrap_or_default();
                    heading = heading.with_property(key.to_string(), value);
                }
                FrameKind::Element(heading)
            }
            Tag::BlockQuote(_) => FrameKind::Loose(Element::new("blockquote")),
            Tag::CodeBlock(kind) => FrameKind::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                },
                content: String::new(),
            },
            Tag::HtmlBlock => FrameKind::HtmlBlock(String::new()),
            Tag::List(start) => FrameKind::List {
                start: *start,
                items: Vec::new(),
            },
            Tag::Item => FrameKind::Item { task: None },
            Tag::FootnoteDefinition(label) => FrameKind::FootnoteDefinition(footnote_id(label)),
            Tag::DefinitionList => FrameKind::Loose(Element::new("dl")),
            Tag::DefinitionListTitle => FrameKind::Element(Element::new("dt")),
            Tag::DefinitionListDefinition => FrameKind::Element(Element::new("dd")),
            Tag::Table(alignments) => FrameKind::Table {
                alignments: alignments.clone(),
                head: None,
                rows: Vec::new(),
            },
            Tag::TableHead => FrameKind::TableHead { cells: 0 },
            Tag::TableRow => FrameKind::TableRow { cells: 0 },
            Tag::TableCell => FrameKind::Element(self.table_cell()),
            Tag::Emphasis => FrameKind::Element(Element::new("em")),
            Tag::Strong => FrameKind::Element(Element::new("strong")),
            Tag::Strikethrough => FrameKind::Element(Element::new("del")),
            Tag::Superscript => FrameKind::Element(Element::new("sup")),
            Tag::Subscript => FrameKind::Element(Element::new("sub")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Element::new("a").with_property("href", dest_url.to_string());
                if !title.is_empty() {
                    link = link.with_property("title", title.to_string());
                }
                FrameKind::Element(link)
            }
            Tag::Image {
                dest_url, title, ..
            } => FrameKind::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
            },
            Tag::MetadataBlock(_) => FrameKind::Skip,
        };
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn end(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(Frame { kind, children }) = self.stack.pop() else {
            return;
        };
        match kind {
            FrameKind::Root => {}
            FrameKind::Element(element) => self.push(element.with_children(children).into()),
            FrameKind::Loose(element) => {
                self.push(element.with_children(wrap(children, true)).into());
            }
            FrameKind::CodeBlock { language, content } => {
                self.push(code_block(language, content));
            }
            FrameKind::HtmlBlock(html) => self.raw(html.trim_end_matches('\n')),
            FrameKind::List { start, items } => self.push(list(start, items)),
            FrameKind::Item { task } => self.push_item(PendingItem { children, task }),
            FrameKind::Table { head, rows, .. } => self.push(table(head, rows)),
            FrameKind::TableHead { .. } => {
                let thead = Element::new("thead").with_children(wrap(vec![table_row(children)], true));
                match self.stack.last_mut().map(|f| &mut f.kind) {
                    Some(FrameKind::Table { head, .. }) => *head = Some(thead.into()),
                    _ => self.push(thead.into()),
                }
            }
            FrameKind::TableRow { .. } => {
                let row = table_row(children);
                match self.stack.last_mut().map(|f| &mut f.kind) {
                    Some(FrameKind::Table { rows, .. }) => rows.push(row),
                    _ => self.push(row),
                }
            }
            FrameKind::Image { src, title } => {
                let alt = Node::from(Root::new(children)).text_content();
                let mut image = Element::new("img")
                    .with_property("src", src)
                    .with_property("alt", alt);
                if !title.is_empty() {
                    image = image.with_property("title", title);
                }
                self.push(image.into());
            }
            FrameKind::FootnoteDefinition(id) => {
                self.definitions.insert(id, children);
            }
            FrameKind::Skip => {}
        }
    }

    fn text(&mut self, text: &str) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match &mut frame.kind {
            FrameKind::CodeBlock { content, .. } => content.push_str(text),
            FrameKind::HtmlBlock(html) => html.push_str(text),
            FrameKind::Skip => {}
            _ => self.push(Node::text(text)),
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(Frame {
            kind: FrameKind::HtmlBlock(buffer),
            ..
        }) = self.stack.last_mut()
        {
            buffer.push_str(html);
        } else {
            self.raw(html);
        }
    }

    fn raw(&mut self, html: &str) {
        if self.options.allow_dangerous_html {
            self.push(Node::raw(html));
        }
    }

    fn task_marker(&mut self, checked: bool) {
        let item = self.stack.iter_mut().rev().find_map(|frame| match &mut frame.kind {
            FrameKind::Item { task } => Some(task),
            _ => None,
        });
        if let Some(task) = item {
            *task = Some(checked);
        }
    }

    fn table_cell(&mut self) -> Element {
        let (in_head, index) = match self.stack.last_mut().map(|f| &mut f.kind) {
            Some(FrameKind::TableHead { cells }) => {
                *cells += 1;
                (true, *cells - 1)
            }
            Some(FrameKind::TableRow { cells }) => {
                *cells += 1;
                (false, *cells - 1)
            }
            _ => (false, 0),
        };
        let align = self.stack.iter().rev().find_map(|frame| match &frame.kind {
            FrameKind::Table { alignments, .. } => alignments.get(index).copied(),
            _ => None,
        });

        let cell = Element::new(if in_head { "th" } else { "td" });
        match align.and_then(alignment_name) {
            Some(align) => cell.with_property("align", align),
            None => cell,
        }
    }

    fn footnote_reference(&mut self, label: &str) {
        let id = footnote_id(label);
        let counter = match self.footnote_order.iter().position(|known| *known == id) {
            Some(position) => position + 1,
            None => {
                self.footnote_order.push(id.clone());
                self.footnote_order.len()
            }
        };
        let refs = self.footnote_refs.entry(id.clone()).or_insert(0);
        *refs += 1;

        let prefix = &self.options.clobber_prefix;
        let mut ref_id = format!("{prefix}fnref-{id}");
        if *refs > 1 {
            ref_id = format!("{ref_id}-{refs}");
        }
        let link = Element::new("a")
            .with_property("href", format!("#{prefix}fn-{id}"))
            .with_property("id", ref_id)
            .with_property("dataFootnoteRef", true)
            .with_property("ariaDescribedBy", vec!["footnote-label"])
            .with_children(vec![Node::text(counter.to_string())]);
        self.push(Element::new("sup").with_children(vec![link.into()]).into());
    }

    fn push_item(&mut self, item: PendingItem) {
        if let Some(Frame {
            kind: FrameKind::List { items, .. },
            ..
        }) = self.stack.last_mut()
        {
            items.push(item);
        } else {
            self.push(list_item(item, false));
        }
    }

    fn push(&mut self, node: Node) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match (frame.children.last_mut(), node) {
            (Some(Node::Text(last)), Node::Text(next)) => last.value.push_str(&next.value),
            (_, node) => frame.children.push(node),
        }
    }

    fn finish(mut self) -> Root {
        while self.stack.len() > 1 {
            self.end();
        }
        let children = self.stack.pop().map(|f| f.children).unwrap_or_default();
        let mut children = wrap(children, false);
        if let Some(footer) = self.footer() {
            children.push(Node::text("\n"));
            children.push(footer);
        }
        Root::new(children)
    }

    fn footer(&mut self) -> Option<Node> {
        let prefix = &self.options.clobber_prefix;
        let mut items = Vec::new();

        for (index, id) in self.footnote_order.iter().enumerate() {
            let Some(mut content) = self.definitions.remove(id) else {
                continue;
            };
            let refs = self.footnote_refs.get(id).copied().unwrap_or(1);

            let mut backrefs = Vec::new();
            for n in 1..=refs {
                let suffix = if n > 1 { format!("-{n}") } else { String::new() };
                let mut children = vec![Node::text(self.options.footnote_back_content.as_str())];
                if n > 1 {
                    backrefs.push(Node::text(" "));
                    children.push(
                        Element::new("sup")
                            .with_children(vec![Node::text(n.to_string())])
                            .into(),
                    );
                }
                backrefs.push(
                    Element::new("a")
                        .with_property("href", format!("#{prefix}fnref-{id}{suffix}"))
                        .with_property("dataFootnoteBackref", "")
                        .with_property("ariaLabel", format!("Back to reference {}{suffix}", index + 1))
                        .with_property("className", vec!["data-footnote-backref"])
                        .with_children(children)
                        .into(),
                );
            }

            match content.last_mut() {
                Some(Node::Element(paragraph)) if paragraph.tag_name == "p" => {
                    paragraph.children.push(Node::text(" "));
                    paragraph.children.extend(backrefs);
                }
                _ => content.extend(backrefs),
            }
            items.push(
                Element::new("li")
                    .with_property("id", format!("{prefix}fn-{id}"))
                    .with_children(wrap(content, true))
                    .into(),
            );
        }

        if items.is_empty() {
            return None;
        }

        let label = Element::new(self.options.footnote_label_tag_name.as_str())
            .with_property("id", "footnote-label")
            .with_property("className", vec!["sr-only"])
            .with_children(vec![Node::text(self.options.footnote_label.as_str())]);
        let section = Element::new("section")
            .with_property("dataFootnotes", true)
            .with_property("className", vec!["footnotes"])
            .with_children(vec![
                label.into(),
                Node::text("\n"),
                Element::new("ol").with_children(wrap(items, true)).into(),
                Node::text("\n"),
            ]);
        Some(section.into())
    }
}

/// Join nodes with newline text nodes; `loose` also adds one before and after.
fn wrap(nodes: Vec<Node>, loose: bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len() * 2 + 1);
    let empty = nodes.is_empty();
    if loose {
        out.push(Node::text("\n"));
    }
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            out.push(Node::text("\n"));
        }
        out.push(node);
    }
    if loose && !empty {
        out.push(Node::text("\n"));
    }
    out
}

fn code_block(language: Option<String>, content: String) -> Node {
    let mut code = Element::new("code");
    if let Some(language) = language {
        code = code.with_property("className", vec![format!("language-{language}")]);
    }
    let code = code.with_children(vec![Node::text(content)]);
    Element::new("pre").with_children(vec![code.into()]).into()
}

fn math_code(math: &str, class: &str) -> Node {
    Element::new("code")
        .with_property("className", vec!["language-math", class])
        .with_children(vec![Node::text(math)])
        .into()
}

#[allow(clippy::cast_precision_loss)]
fn list(start: Option<u64>, items: Vec<PendingItem>) -> Node {
    let loose = items
        .iter()
        .any(|item| item.children.iter().any(|child| child.is_element("p")));
    let has_tasks = items.iter().any(|item| item.task.is_some());

    let mut list = Element::new(if start.is_some() { "ol" } else { "ul" });
    if let Some(start) = start.filter(|n| *n != 1) {
        list = list.with_property("start", PropertyValue::Number(start as f64));
    }
    if has_tasks {
        list = list.with_property("className", vec!["contains-task-list"]);
    }

    let items = items.into_iter().map(|item| list_item(item, loose)).collect();
    list.with_children(wrap(items, true)).into()
}

/// Block of a list item: a paragraph (explicit, or an inline run in tight
/// lists) or any other node.
enum Block {
    Paragraph(Vec<Node>),
    Other(Node),
}

fn list_item(item: PendingItem, loose: bool) -> Node {
    let mut blocks = group_blocks(item.children);
    let mut li = Element::new("li");

    if let Some(checked) = item.task {
        let input: Node = Element::new("input")
            .with_property("type", "checkbox")
            .with_property("checked", checked)
            .with_property("disabled", true)
            .into();
        match blocks.first_mut() {
            Some(Block::Paragraph(children)) => {
                if !children.is_empty() {
                    children.insert(0, Node::text(" "));
                }
                children.insert(0, input);
            }
            _ => blocks.insert(0, Block::Paragraph(vec![input])),
        }
        li = li.with_property("className", vec!["task-list-item"]);
    }

    let tail_is_paragraph = matches!(blocks.last(), Some(Block::Paragraph(_)));
    let has_blocks = !blocks.is_empty();
    let mut children = Vec::new();
    for (index, block) in blocks.into_iter().enumerate() {
        let is_paragraph = matches!(block, Block::Paragraph(_));
        if loose || index != 0 || !is_paragraph {
            children.push(Node::text("\n"));
        }
        match block {
            Block::Paragraph(inline) if !loose => children.extend(inline),
            Block::Paragraph(inline) => children.push(Element::new("p").with_children(inline).into()),
            Block::Other(node) => children.push(node),
        }
    }
    if has_blocks && (loose || !tail_is_paragraph) {
        children.push(Node::text("\n"));
    }

    li.with_children(children).into()
}

fn group_blocks(children: Vec<Node>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut run = Vec::new();
    for child in children {
        match child {
            Node::Element(el) if el.tag_name == "p" => {
                flush_run(&mut run, &mut blocks);
                blocks.push(Block::Paragraph(el.children));
            }
            Node::Element(el) if BLOCK_TAGS.contains(&el.tag_name.as_str()) => {
                flush_run(&mut run, &mut blocks);
                blocks.push(Block::Other(el.into()));
            }
            inline => run.push(inline),
        }
    }
    flush_run(&mut run, &mut blocks);
    blocks
}

fn flush_run(run: &mut Vec<Node>, blocks: &mut Vec<Block>) {
    if !run.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(run)));
    }
}

fn table(head: Option<Node>, rows: Vec<Node>) -> Node {
    let mut sections: Vec<Node> = head.into_iter().collect();
    if !rows.is_empty() {
        sections.push(Element::new("tbody").with_children(wrap(rows, true)).into());
    }
    Element::new("table").with_children(wrap(sections, true)).into()
}

fn table_row(cells: Vec<Node>) -> Node {
    Element::new("tr").with_children(wrap(cells, true)).into()
}

fn alignment_name(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

fn footnote_id(label: &str) -> String {
    label.to_lowercase()
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{Gfm, MarkdownPlugin};
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Options;

    fn lower_md(markdown: &str) -> Root {
        lower(&Mdast::parse(markdown, Options::empty()), &LoweringOptions::default())
    }

    fn lower_gfm(markdown: &str) -> Root {
        lower(&Mdast::parse(markdown, Gfm.parser_options()), &LoweringOptions::default())
    }

    fn el(tag: &str, children: Vec<Node>) -> Node {
        Element::new(tag).with_children(children).into()
    }

    fn nl() -> Node {
        Node::text("\n")
    }

    #[test]
    fn test_heading_and_paragraph_separated_by_newline() {
        assert_eq!(
            lower_md("# title\n\nhello"),
            Root::new(vec![
                el("h1", vec![Node::text("title")]),
                nl(),
                el("p", vec![Node::text("hello")]),
            ])
        );
    }

    #[test]
    fn test_fenced_code_keeps_trailing_newline() {
        let code: Node = Element::new("code")
            .with_property("className", vec!["language-js"])
            .with_children(vec![Node::text("const hello = 'world'\n")])
            .into();
        assert_eq!(
            lower_md("```js\nconst hello = 'world'\n```"),
            Root::new(vec![el("pre", vec![code])])
        );
    }

    #[test]
    fn test_fence_info_uses_first_word() {
        let root = lower_md("```rust ignore\nfn main() {}\n```");
        let pre = root.children[0].as_element().unwrap();
        let code = pre.children[0].as_element().unwrap();
        assert_eq!(code.class_names(), ["language-rust".to_owned()]);
    }

    #[test]
    fn test_indented_code_has_no_class() {
        let root = lower_md("    plain\n");
        let code = root.children[0].as_element().unwrap().children[0]
            .as_element()
            .unwrap();
        assert!(code.properties.is_empty());
        assert_eq!(code.children, vec![Node::text("plain\n")]);
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            lower_md("`x`"),
            Root::new(vec![el("p", vec![el("code", vec![Node::text("x")])])])
        );
    }

    #[test]
    fn test_tight_list_unwraps_paragraphs() {
        assert_eq!(
            lower_md("- item1\n- item2"),
            Root::new(vec![el(
                "ul",
                vec![
                    nl(),
                    el("li", vec![Node::text("item1")]),
                    nl(),
                    el("li", vec![Node::text("item2")]),
                    nl(),
                ]
            )])
        );
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        assert_eq!(
            lower_md("- a\n\n- b"),
            Root::new(vec![el(
                "ul",
                vec![
                    nl(),
                    el("li", vec![nl(), el("p", vec![Node::text("a")]), nl()]),
                    nl(),
                    el("li", vec![nl(), el("p", vec![Node::text("b")]), nl()]),
                    nl(),
                ]
            )])
        );
    }

    #[test]
    fn test_nested_list_inside_tight_item() {
        assert_eq!(
            lower_md("- a\n  - b"),
            Root::new(vec![el(
                "ul",
                vec![
                    nl(),
                    el(
                        "li",
                        vec![
                            Node::text("a"),
                            nl(),
                            el("ul", vec![nl(), el("li", vec![Node::text("b")]), nl()]),
                            nl(),
                        ]
                    ),
                    nl(),
                ]
            )])
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let root = lower_md("3. a\n4. b");
        let ol = root.children[0].as_element().unwrap();
        assert_eq!(ol.tag_name, "ol");
        assert_eq!(ol.property("start"), Some(&PropertyValue::Number(3.0)));

        let root = lower_md("1. a");
        assert_eq!(root.children[0].as_element().unwrap().property("start"), None);
    }

    #[test]
    fn test_task_list() {
        let root = lower_gfm("- [ ] todo\n- [x] done");
        let ul = root.children[0].as_element().unwrap();
        assert_eq!(ul.class_names(), ["contains-task-list".to_owned()]);

        let first = ul.children[1].as_element().unwrap();
        assert_eq!(first.class_names(), ["task-list-item".to_owned()]);
        let input = first.children[0].as_element().unwrap();
        assert_eq!(input.tag_name, "input");
        assert_eq!(input.property("checked"), Some(&PropertyValue::Bool(false)));
        assert_eq!(input.property("disabled"), Some(&PropertyValue::Bool(true)));
        assert_eq!(Node::from(first.clone()).text_content().trim(), "todo");

        let second = ul.children[3].as_element().unwrap();
        let input = second.children[0].as_element().unwrap();
        assert_eq!(input.property("checked"), Some(&PropertyValue::Bool(true)));
    }

    #[test]
    fn test_table_sections() {
        let root = lower_gfm("| a | b |\n|---|:-:|\n| 1 | 2 |");
        let th = |text: &str, align: Option<&str>| -> Node {
            let cell = Element::new("th").with_children(vec![Node::text(text)]);
            match align {
                Some(a) => cell.with_property("align", a).into(),
                None => cell.into(),
            }
        };
        let td = |text: &str, align: Option<&str>| -> Node {
            let cell = Element::new("td").with_children(vec![Node::text(text)]);
            match align {
                Some(a) => cell.with_property("align", a).into(),
                None => cell.into(),
            }
        };
        assert_eq!(
            root,
            Root::new(vec![el(
                "table",
                vec![
                    nl(),
                    el(
                        "thead",
                        vec![
                            nl(),
                            el("tr", vec![nl(), th("a", None), nl(), th("b", Some("center")), nl()]),
                            nl(),
                        ]
                    ),
                    nl(),
                    el(
                        "tbody",
                        vec![
                            nl(),
                            el("tr", vec![nl(), td("1", None), nl(), td("2", Some("center")), nl()]),
                            nl(),
                        ]
                    ),
                    nl(),
                ]
            )])
        );
    }

    #[test]
    fn test_table_without_body_rows() {
        let root = lower_gfm("| a |\n|---|");
        let table = root.children[0].as_element().unwrap();
        assert!(table.children.iter().all(|c| !c.is_element("tbody")));
        assert!(table.children.iter().any(|c| c.is_element("thead")));
    }

    #[test]
    fn test_raw_html_kept_when_allowed() {
        assert_eq!(
            lower_md("<div>test</div>"),
            Root::new(vec![Node::raw("<div>test</div>")])
        );
    }

    #[test]
    fn test_raw_html_dropped_when_not_allowed() {
        let options = LoweringOptions {
            allow_dangerous_html: false,
            ..Default::default()
        };
        let root = lower(&Mdast::parse("<div>test</div>\n\ntext <b>x</b>", Options::empty()), &options);
        assert_eq!(
            root,
            Root::new(vec![el("p", vec![Node::text("text x")])])
        );
    }

    #[test]
    fn test_strikethrough_is_del() {
        let root = lower_gfm("~~gone~~");
        assert_eq!(
            root,
            Root::new(vec![el("p", vec![el("del", vec![Node::text("gone")])])])
        );
    }

    #[test]
    fn test_link_and_image() {
        let root = lower_md("[a](/x \"T\") ![alt *text*](/i.png)");
        let p = root.children[0].as_element().unwrap();
        let link = p.children[0].as_element().unwrap();
        assert_eq!(link.property("href"), Some(&PropertyValue::from("/x")));
        assert_eq!(link.property("title"), Some(&PropertyValue::from("T")));
        let image = p.children[2].as_element().unwrap();
        assert_eq!(image.tag_name, "img");
        assert_eq!(image.property("alt"), Some(&PropertyValue::from("alt text")));
        assert_eq!(image.property("title"), None);
    }

    #[test]
    fn test_hard_break() {
        let root = lower_md("a  \nb");
        assert_eq!(
            root,
            Root::new(vec![el(
                "p",
                vec![Node::text("a"), Element::new("br").into(), Node::text("\nb")]
            )])
        );
    }

    #[test]
    fn test_footnotes_use_clobber_prefix() {
        let options = LoweringOptions {
            clobber_prefix: "test-".to_owned(),
            ..Default::default()
        };
        let root = lower(
            &Mdast::parse("A note[^1]\n\n[^1]: Big note.", Gfm.parser_options()),
            &options,
        );

        let p = root.children[0].as_element().unwrap();
        let sup = p.children[1].as_element().unwrap();
        let link = sup.children[0].as_element().unwrap();
        assert_eq!(link.property("href"), Some(&PropertyValue::from("#test-fn-1")));
        assert_eq!(link.property("id"), Some(&PropertyValue::from("test-fnref-1")));
        assert_eq!(sup.children[0].text_content(), "1");

        let section = root.children.last().unwrap().as_element().unwrap();
        assert_eq!(section.tag_name, "section");
        assert_eq!(section.class_names(), ["footnotes".to_owned()]);
        let ol = section.children[2].as_element().unwrap();
        let li = ol.children[1].as_element().unwrap();
        assert_eq!(li.property("id"), Some(&PropertyValue::from("test-fn-1")));
        let text = Node::from(li.clone()).text_content();
        assert!(text.contains("Big note."));
        assert!(text.ends_with('↩'));
    }

    #[test]
    fn test_no_footer_without_references() {
        let root = lower_gfm("plain");
        assert_eq!(root, Root::new(vec![el("p", vec![Node::text("plain")])]));
    }

    #[test]
    fn test_blockquote_is_loose() {
        assert_eq!(
            lower_md("> quote"),
            Root::new(vec![el(
                "blockquote",
                vec![nl(), el("p", vec![Node::text("quote")]), nl()]
            )])
        );
    }
}
