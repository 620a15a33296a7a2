use cinematch_core::tokenizer::normalize;
use cinematch_core::{Corpus, CorpusIndex, Document, IndexConfig};
use criterion::{criterion_group, criterion_main, Criterion};

const PLOT: &str = "A retired detective returns to the city after 20 years to track a cunning thief \
                    who steals paintings from museums, leaving riddles for the police at every scene.";

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_plot", |b| b.iter(|| normalize(Some(PLOT))));
}

fn bench_index_build(c: &mut Criterion) {
    let docs = (0..1000)
        .map(|i| Document::new(Some(format!("Movie {i}")), Some(format!("{PLOT} variant{} sequel{}", i % 37, i % 11))))
        .collect();
    let corpus = Corpus::new(docs);
    c.bench_function("index_build_1000", |b| b.iter(|| CorpusIndex::build(&corpus, &IndexConfig::default())));
}

criterion_group!(benches, bench_normalize, bench_index_build);
criterion_main!(benches);
