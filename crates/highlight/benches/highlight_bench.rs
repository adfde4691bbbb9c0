use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use highlight::{HighlightOptions, MatchOptions, Pattern, highlight_text, remove_highlight};
use html::parse_document;

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 5_000;

fn make_results(blocks: usize) -> String {
    let mut out = String::with_capacity(blocks * 96 + 32);
    out.push_str(r#"<div class="results">"#);
    for i in 0..blocks {
        out.push_str("<article><h3>Result ");
        out.push_str(&i.to_string());
        out.push_str("</h3><p>The quick brown <em>fox</em> jumps over the lazy dog.</p></article>");
    }
    out.push_str("</div>");
    out
}

fn bench_pattern_build(c: &mut Criterion) {
    let options = MatchOptions::default();
    c.bench_function("bench_pattern_build_per_word", |b| {
        b.iter(|| {
            let pattern = Pattern::build(black_box("quick brown fox (lazy) dog.*"), &options);
            black_box(pattern.is_ok());
        });
    });
}

fn bench_highlight(c: &mut Criterion, name: &str, blocks: usize, options: HighlightOptions) {
    let input = make_results(blocks);
    let dom = parse_document(&input);
    c.bench_function(name, |b| {
        b.iter_batched(
            || dom.clone(),
            |mut dom| {
                highlight_text(&mut dom, black_box(&options));
                black_box(dom);
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_highlight_small(c: &mut Criterion) {
    bench_highlight(
        c,
        "bench_highlight_small",
        SMALL_BLOCKS,
        HighlightOptions::new("fox", "results"),
    );
}

fn bench_highlight_large_per_word(c: &mut Criterion) {
    bench_highlight(
        c,
        "bench_highlight_large_per_word",
        LARGE_BLOCKS,
        HighlightOptions::new("quick lazy dog", "results").per_word(),
    );
}

fn bench_clear_large(c: &mut Criterion) {
    let input = make_results(LARGE_BLOCKS);
    let mut highlighted = parse_document(&input);
    highlight_text(&mut highlighted, &HighlightOptions::new("the", "results"));
    c.bench_function("bench_clear_large", |b| {
        b.iter_batched(
            || highlighted.clone(),
            |mut dom| {
                remove_highlight(&mut dom, black_box("results"));
                black_box(dom);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_pattern_build,
    bench_highlight_small,
    bench_highlight_large_per_word,
    bench_clear_large
);
criterion_main!(benches);
