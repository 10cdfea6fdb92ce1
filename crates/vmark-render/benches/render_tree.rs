//! Benchmarks for element tree rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use vmark_hast::Root;
use vmark_pipeline::{ProcessorOptions, create_processor};
use vmark_render::{Attributes, CustomAttrs, HastRenderer, HtmlBackend, VNodeBackend};

/// Generate markdown with headings, paragraphs and a list per section.
fn generate_markdown(sections: usize, items_per_list: usize) -> String {
    let mut md = String::with_capacity(sections * (120 + items_per_list * 30));
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!("Paragraph in section {i} with **bold** and `code`.\n\n"));
        for j in 0..items_per_list {
            md.push_str(&format!("- item {j}\n"));
        }
        md.push_str("\n```rust\nfn main() {}\n```\n\n");
    }
    md
}

fn tree(markdown: &str) -> Root {
    let processor = create_processor(&ProcessorOptions::default()).unwrap();
    processor.process_sync(markdown).unwrap()
}

fn bench_render_vnode(c: &mut Criterion) {
    let root = tree(&generate_markdown(10, 5));
    let renderer = HastRenderer::<VNodeBackend>::new();

    c.bench_function("render_vnode_10_sections", |b| {
        b.iter(|| renderer.render(&root, Attributes::new()));
    });
}

fn bench_render_with_custom_attrs(c: &mut Criterion) {
    let root = tree(&generate_markdown(10, 5));
    let custom = CustomAttrs::new()
        .with_fn("heading", |_, combined| {
            let mut attrs = Attributes::new();
            if let Some(level) = combined.get("level") {
                attrs.insert("data-level".to_owned(), level.clone());
            }
            attrs
        })
        .with_fn("list-item", |_, combined| combined.clone());
    let renderer = HastRenderer::<VNodeBackend>::new().with_custom_attrs(custom);

    c.bench_function("render_custom_attrs_10_sections", |b| {
        b.iter(|| renderer.render(&root, Attributes::new()));
    });
}

fn bench_render_html_by_size(c: &mut Criterion) {
    let renderer = HastRenderer::<HtmlBackend>::new();
    let mut group = c.benchmark_group("render_html_by_size");

    for (sections, items) in [(5, 3), (20, 5), (50, 10)] {
        let markdown = generate_markdown(sections, items);
        let root = tree(&markdown);

        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("html", format!("{sections}s_{items}i")),
            &root,
            |b, root| b.iter(|| renderer.render(root, Attributes::new())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_vnode,
    bench_render_with_custom_attrs,
    bench_render_html_by_size
);
criterion_main!(benches);
