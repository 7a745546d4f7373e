use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sentiment_pipeline::pipelines::sentiment::Featurizer;

fn bench_transform(c: &mut Criterion) {
    let texts: Vec<String> = (0..500)
        .map(|i| format!("review number {i} said the food was good and the service was bad"))
        .collect();
    let featurizer = Featurizer::fit(&texts);

    c.bench_function("transform", |b| {
        b.iter(|| featurizer.transform(black_box("the pizza was amazing but the crust is not good")))
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
