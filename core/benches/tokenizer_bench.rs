use criterion::{criterion_group, criterion_main, Criterion};
use sitesearch_core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let paragraph = "The quick brown fox jumps over the lazy dog, 42 times, \
        with Unicode guests: café, Grüße, 東京. Markdown leftovers *like* \
        `this` and [links](https://example.com) get split on punctuation. ";
    let text = paragraph.repeat(200);
    c.bench_function("tokenize_10k_words", |b| b.iter(|| tokenize(&text, 2)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
