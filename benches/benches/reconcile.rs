// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size, Vec2};
use std::sync::Arc;
use understory_camera::Camera;
use understory_media_catalog::{Catalog, ContentItem, SpatialHash, UniformRandom};
use understory_tile_grid::{BufferPolicy, GridSpec, needed_range};
use understory_tile_lifecycle::{LazyLoadGate, TileManager, TileRenderer};

/// Renderer that does no work, so only bookkeeping is measured.
struct Null;

impl TileRenderer for Null {
    type Handle = Rect;
    fn create(&mut self, rect: Rect, _content: &ContentItem) -> Rect {
        rect
    }
    fn destroy(&mut self, handle: Rect) {
        black_box(handle);
    }
    fn attach_payload(&mut self, _handle: &mut Rect, _content: &ContentItem) {}
    fn detach_payload(&mut self, _handle: &mut Rect) {}
    fn set_screen_rect(&mut self, handle: &mut Rect, rect: Rect) {
        *handle = rect;
    }
}

fn catalog(n: usize) -> Arc<Catalog> {
    Arc::new(Catalog::from_items((0..n).map(|i| {
        ContentItem::new(format!("https://cdn.example.com/{i}.jpg")).expect("image url")
    })))
}

fn bench_pan_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_lifecycle/pan_sweep");
    let catalog = catalog(500);

    // Steady-state pan: each step scrolls a fraction of a tile, so most frames
    // reconcile a single column or nothing at all.
    for (label, screen) in [
        ("800x600", Size::new(800.0, 600.0)),
        ("1920x1080", Size::new(1920.0, 1080.0)),
        ("3840x2160", Size::new(3840.0, 2160.0)),
    ] {
        let spec = GridSpec::new(150.0, 1);
        let steps = 240_u64;
        group.throughput(Throughput::Elements(steps));
        group.bench_with_input(BenchmarkId::new("spatial_hash", label), &screen, |b, &screen| {
            b.iter_batched(
                || (TileManager::new(), Camera::new(), SpatialHash::new(catalog.clone())),
                |(mut tiles, mut camera, mut provider)| {
                    for _ in 0..steps {
                        camera.pan_by_screen(Vec2::new(37.0, 11.0));
                        let range = needed_range(&camera, screen, &spec);
                        black_box(tiles.reconcile(&range, &camera, &spec, &mut provider, &mut Null));
                        tiles.reposition(&camera, &spec, &mut Null);
                    }
                    black_box(tiles.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_zoom_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_lifecycle/zoom_out");
    let catalog = catalog(500);
    let screen = Size::new(1920.0, 1080.0);

    // Zooming out grows the needed set every frame; scale-with-zoom buffers
    // shrink it again, which stresses spawn and destroy together.
    for buffer in [BufferPolicy::Fixed(1), BufferPolicy::ScaleWithZoom(1)] {
        let spec = GridSpec {
            tile_size: 150.0,
            buffer,
        };
        group.bench_with_input(
            BenchmarkId::new("random", format!("{buffer:?}")),
            &spec,
            |b, spec| {
                b.iter_batched(
                    || {
                        let mut camera = Camera::new();
                        camera.set_scale(3.0);
                        (TileManager::new(), camera, UniformRandom::new(catalog.clone(), 7))
                    },
                    |(mut tiles, mut camera, mut provider)| {
                        while camera.scale() > camera.limits().min {
                            camera.zoom_about_screen_point(Point::new(960.0, 540.0), 0.95);
                            let range = needed_range(&camera, screen, spec);
                            black_box(tiles.reconcile(&range, &camera, spec, &mut provider, &mut Null));
                        }
                        black_box(tiles.len());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_lazy_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_lifecycle/lazy_gate");
    let catalog = catalog(500);
    let screen = Size::new(1920.0, 1080.0);
    let spec = GridSpec::new(150.0, 2);

    for margin in [0.0, 150.0, 600.0] {
        let mut camera = Camera::new();
        let mut tiles = TileManager::new();
        let mut provider = SpatialHash::new(catalog.clone());
        let range = needed_range(&camera, screen, &spec);
        tiles.reconcile(&range, &camera, &spec, &mut provider, &mut Null);
        let gate = LazyLoadGate::new(margin);
        group.throughput(Throughput::Elements(tiles.len() as u64));
        group.bench_function(BenchmarkId::new("run", margin), |b| {
            b.iter(|| {
                camera.pan_by_screen(Vec2::new(5.0, 0.0));
                tiles.reposition(&camera, &spec, &mut Null);
                black_box(gate.run(&mut tiles, &camera, &spec, screen, &mut Null));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pan_sweep, bench_zoom_out, bench_lazy_gate);
criterion_main!(benches);
