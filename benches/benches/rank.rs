// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_media_catalog::{Catalog, ContentItem};
use understory_semantic_search::{DEFAULT_TOP_K, cosine_similarity, rank};

fn unit_vector(rng: &mut StdRng, dims: usize) -> Vec<f32> {
    let v: Vec<f32> = (0..dims).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    v.into_iter().map(|x| x / norm).collect()
}

fn embedded_catalog(len: usize, dims: usize) -> Catalog {
    let mut rng = StdRng::seed_from_u64(42);
    Catalog::from_items((0..len).map(|i| {
        ContentItem::new(format!("{i}.webp"))
            .expect("image url")
            .with_embedding(unit_vector(&mut rng, dims))
    }))
}

fn bench_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("semantic_search/cosine");
    let mut rng = StdRng::seed_from_u64(1);
    for dims in [64usize, 384, 1_536] {
        let a = unit_vector(&mut rng, dims);
        let b = unit_vector(&mut rng, dims);
        group.throughput(Throughput::Elements(dims as u64));
        group.bench_function(BenchmarkId::from_parameter(dims), |bench| {
            bench.iter(|| black_box(cosine_similarity(black_box(&a), black_box(&b))));
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("semantic_search/rank");
    group.sample_size(30);

    // Catalogs the size of a typical gallery feed, with sentence-embedding width.
    for len in [200usize, 1_000, 5_000] {
        let catalog = embedded_catalog(len, 384);
        let query = unit_vector(&mut StdRng::seed_from_u64(9), 384);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("top_60", len), &catalog, |b, catalog| {
            b.iter(|| black_box(rank(&query, catalog, DEFAULT_TOP_K)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cosine, bench_rank);
criterion_main!(benches);
