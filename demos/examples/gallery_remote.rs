// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery backed by real endpoints.
//!
//! Reads a JSON [`GalleryConfig`], fetches the catalog from
//! `catalog.endpoint` on a background thread while the engine keeps ticking,
//! and, when `search.endpoint` is set, embeds the query given on the command
//! line through it.
//!
//! ```json
//! {
//!   "catalog": { "endpoint": "https://example.com/catalog.json", "base_url": "https://cdn.example.com/" },
//!   "search": { "endpoint": "https://example.com/embed" }
//! }
//! ```
//!
//! Run:
//! - `cargo run -p understory_gallery_demos --example gallery_remote -- gallery.json "red bicycles"`

use std::sync::Arc;
use std::time::Duration;

use kurbo::Size;
use understory_gallery::{GalleryConfig, GalleryEngine, InputEvent};
use understory_gallery_demos::LoggingRenderer;
use understory_media_catalog::{
    Catalog, CatalogError, agent_with_timeout, fetch_catalog_with_retries,
};
use understory_semantic_search::HttpEmbeddingClient;

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GalleryConfig::from_path(&path).unwrap_or_else(|err| {
            eprintln!("cannot load {path}: {err}");
            std::process::exit(2);
        }),
        None => GalleryConfig::default(),
    };
    let query = args.next();

    let catalog_source = config.catalog.clone();
    let fetch = std::thread::spawn(move || -> Result<Catalog, CatalogError> {
        let Some(endpoint) = catalog_source.endpoint else {
            return Ok(Catalog::empty());
        };
        let agent = agent_with_timeout(Duration::from_secs(10));
        fetch_catalog_with_retries(&agent, &endpoint, catalog_source.base_url.as_deref(), 3)
    });

    let search_endpoint = config.search.endpoint.clone();
    let search_timeout = config.search.timeout();
    let mut gallery =
        GalleryEngine::new(config, LoggingRenderer::default(), Size::new(1280.0, 800.0))
            .expect("config validated on load");

    if let Some(endpoint) = search_endpoint {
        let client = HttpEmbeddingClient::new(endpoint, search_timeout);
        if let Err(err) = gallery.connect_embedding_service(Arc::new(client)) {
            log::warn!("search disabled: {err}");
        }
    }

    // The engine shows its loading state until the fetch lands.
    while !fetch.is_finished() {
        gallery.tick(FRAME);
        std::thread::sleep(FRAME);
    }
    let result = fetch
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("catalog fetch panicked").into()));
    gallery.load_catalog(result);
    gallery.tick(FRAME);
    log::info!(
        "status {:?}: {} tiles live, {} loaded",
        gallery.status(),
        gallery.tiles().len(),
        gallery.renderer().loaded
    );
    if let Some(message) = gallery.status().message() {
        println!("{message}");
        return;
    }

    if let Some(query) = query {
        gallery.handle_input(InputEvent::TextInput(query));
        let deadline = gallery.clock() + Duration::from_millis(gallery.config().search.debounce_ms);
        while gallery.clock() <= deadline {
            gallery.tick(FRAME);
        }
        if gallery.wait_for_search(search_timeout) {
            gallery.tick(FRAME);
        }
        log::info!("search: {:?}", gallery.search_status());
    }

    for tile in gallery.tiles().iter().take(8) {
        let content = tile.content();
        println!("{:?} -> {}", tile.coord(), content.url());
    }
}
