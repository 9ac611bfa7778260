// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless gallery session.
//!
//! Drives a [`GalleryEngine`] through a scripted session without a window:
//! load a catalog, drag and coast, zoom with the wheel, pinch, type a query and
//! clear it again. Every frame's reconcile and load counts are printed.
//!
//! Set `RUST_LOG=trace` to see each tile being created, loaded and destroyed.
//!
//! Run:
//! - `cargo run -p understory_gallery_demos --example gallery_headless`

use std::sync::Arc;
use std::time::Duration;

use kurbo::{Point, Size, Vec2};
use smallvec::smallvec;
use understory_gallery::{ArrowKey, GalleryConfig, GalleryEngine, InputEvent, TickStats};
use understory_gallery_demos::{LoggingRenderer, SAMPLE_CATALOG};
use understory_media_catalog::Catalog;
use understory_semantic_search::SearchError;

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let config = GalleryConfig::from_json_str(
        r#"{ "strategy": "spatial_hash", "lazy_load_margin": 75 }"#,
    )
    .expect("valid config");
    let mut gallery =
        GalleryEngine::new(config, LoggingRenderer::default(), Size::new(800.0, 600.0))
            .expect("engine");
    println!("status before catalog: {:?}", gallery.status().message());

    let catalog = Catalog::from_json_str(SAMPLE_CATALOG, Some("https://cdn.example.com/media/"))
        .expect("sample catalog parses");
    println!("catalog: {} items, {} skipped", catalog.len(), catalog.skipped());
    gallery.set_catalog(catalog);

    // A toy embedding: "sea"-ish words point one way, everything else the other.
    gallery
        .connect_embedding_service(Arc::new(|query: &str| -> Result<Vec<f32>, SearchError> {
            if query.contains("sea") || query.contains("surf") {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }))
        .expect("spawn search worker");

    report("first frame", gallery.tick(FRAME), &gallery);

    println!("\n== drag left and let go ==");
    gallery.handle_input(InputEvent::PointerDown(Point::new(400.0, 300.0)));
    for step in 1..=6 {
        let x = 400.0 - 40.0 * f64::from(step);
        gallery.handle_input(InputEvent::PointerMove(Point::new(x, 310.0)));
        gallery.tick(FRAME);
    }
    gallery.handle_input(InputEvent::PointerUp);
    let mut frames = 0;
    while gallery.tick(FRAME).coasted {
        frames += 1;
    }
    println!("coasted {frames} frames to {:?}", gallery.camera().position());
    report("after coast", gallery.tick(FRAME), &gallery);

    println!("\n== wheel zoom in at the cursor, then arrow keys ==");
    for _ in 0..4 {
        gallery.handle_input(InputEvent::Wheel {
            delta: Vec2::new(0.0, -1.0),
            position: Point::new(200.0, 150.0),
            zoom_modifier: true,
        });
    }
    gallery.handle_input(InputEvent::Key(ArrowKey::Down));
    gallery.handle_input(InputEvent::Key(ArrowKey::Right));
    report("zoomed", gallery.tick(FRAME), &gallery);

    println!("\n== pinch out ==");
    gallery.handle_input(InputEvent::TouchStart(smallvec![
        Point::new(350.0, 300.0),
        Point::new(450.0, 300.0)
    ]));
    gallery.handle_input(InputEvent::TouchMove(smallvec![
        Point::new(250.0, 300.0),
        Point::new(550.0, 300.0)
    ]));
    gallery.handle_input(InputEvent::TouchEnd(smallvec![]));
    report("pinched", gallery.tick(FRAME), &gallery);

    println!("\n== search ==");
    gallery.handle_input(InputEvent::TextInput("seaside".into()));
    // Let the debounce window pass, then wait for the worker.
    for _ in 0..20 {
        gallery.tick(FRAME);
    }
    if gallery.wait_for_search(Duration::from_secs(1)) {
        gallery.tick(FRAME);
    }
    println!("search status: {:?}", gallery.search_status());
    if let Some(item) = gallery.content_at(Point::new(400.0, 300.0)) {
        println!("tile under the cursor: {}", item.url());
    }
    report("ranked", gallery.tick(FRAME), &gallery);

    gallery.handle_input(InputEvent::TextInput(String::new()));
    for _ in 0..20 {
        gallery.tick(FRAME);
    }
    println!("search status after clearing: {:?}", gallery.search_status());

    let renderer = gallery.renderer();
    println!(
        "\ntotals: created={} live={} loads={} loaded={}",
        renderer.created, renderer.live, renderer.loads, renderer.loaded
    );
    println!("{:#?}", gallery.debug_info());
}

fn report(label: &str, stats: TickStats, gallery: &GalleryEngine<LoggingRenderer>) {
    println!(
        "{label}: +{} -{} live={} loaded={} (attached {}, detached {}) scale={:.2}",
        stats.reconcile.spawned,
        stats.reconcile.destroyed,
        gallery.tiles().len(),
        gallery.renderer().loaded,
        stats.loads.attached,
        stats.loads.detached,
        gallery.camera().scale(),
    );
}
