// Benchmarks for parsing and serializing HTML trees.

use criterion::{criterion_group, criterion_main, Criterion};
use htmltree::{format, format_with, parse, HtmlNode, Options};

fn sample_document(rows: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><title>Bench</title></head><body><table>");
    for i in 0..rows {
        html.push_str(&format!(
            "<tr class=\"row\" data-i=\"{i}\"><td>{i}</td><td><a href=\"/item/{i}\">item</a></td><!-- {i} --></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let html = sample_document(500);
    c.bench_function("parse_500_rows", |b| {
        b.iter(|| parse(&html).unwrap());
    });
}

fn bench_format(c: &mut Criterion) {
    let html = sample_document(500);
    let compact = Options::new().with_formatted(false);
    c.bench_function("format_500_rows", |b| {
        b.iter(|| format(&html).unwrap());
    });
    c.bench_function("compact_500_rows", |b| {
        b.iter(|| format_with(&html, &compact).unwrap());
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_and_serialize_tree", |b| {
        b.iter(|| {
            let ul = HtmlNode::new("ul").unwrap();
            for i in 0..200 {
                let li = HtmlNode::new("li").unwrap();
                li.set_attribute("data-i", &i.to_string());
                li.add_text("entry", true);
                ul.add_child(&li);
            }
            ul.to_html(true)
        });
    });
}

criterion_group!(benches, bench_parse, bench_format, bench_build);
criterion_main!(benches);
