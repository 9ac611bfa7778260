// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the gallery demos.
//!
//! Run:
//! - `cargo run -p understory_gallery_demos --example gallery_headless`
//! - `cargo run -p understory_gallery_demos --example gallery_remote -- gallery.json`

use kurbo::Rect;
use understory_media_catalog::{ContentItem, MediaKind, Tier};
use understory_tile_lifecycle::TileRenderer;

/// Per-tile state of the [`LoggingRenderer`].
#[derive(Debug)]
pub struct LoggedTile {
    /// Sequential id.
    pub id: u64,
    /// Where the tile was last placed.
    pub rect: Rect,
    /// Whether the media payload is loaded.
    pub loaded: bool,
}

/// A renderer that draws nothing and logs every lifecycle call.
///
/// Keeps running totals so demos can print a summary at the end.
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    next_id: u64,
    /// Tiles currently alive.
    pub live: usize,
    /// Tiles currently holding a payload.
    pub loaded: usize,
    /// Tiles ever created.
    pub created: usize,
    /// Payload loads ever started.
    pub loads: usize,
}

impl TileRenderer for LoggingRenderer {
    type Handle = LoggedTile;

    fn create(&mut self, rect: Rect, content: &ContentItem) -> LoggedTile {
        self.next_id += 1;
        self.live += 1;
        self.created += 1;
        let badge = match content.tier() {
            Tier::Standard => "",
            Tier::Featured => " [featured]",
            Tier::Paid => " [paid]",
        };
        log::trace!("create #{} {}{badge} at {rect:?}", self.next_id, content.url());
        LoggedTile {
            id: self.next_id,
            rect,
            loaded: false,
        }
    }

    fn destroy(&mut self, handle: LoggedTile) {
        log::trace!("destroy #{}", handle.id);
        self.live -= 1;
    }

    fn attach_payload(&mut self, handle: &mut LoggedTile, content: &ContentItem) {
        let verb = match content.kind() {
            MediaKind::Image => "decode",
            MediaKind::Video => "play",
        };
        log::trace!("{verb} #{} {}", handle.id, content.url());
        handle.loaded = true;
        self.loaded += 1;
        self.loads += 1;
    }

    fn detach_payload(&mut self, handle: &mut LoggedTile) {
        log::trace!("unload #{}", handle.id);
        handle.loaded = false;
        self.loaded -= 1;
    }

    fn set_screen_rect(&mut self, handle: &mut LoggedTile, rect: Rect) {
        handle.rect = rect;
    }

    fn enter(&mut self, handle: &mut LoggedTile) {
        log::trace!("fade in #{}", handle.id);
    }
}

/// A small built-in catalog with two-dimensional toy embeddings.
pub const SAMPLE_CATALOG: &str = r#"[
    "harbor.jpg",
    "alley.webp",
    { "url": "surf.mp4", "tier": "featured", "embedding": [0.95, 0.1] },
    { "url": "reef.png", "embedding": [0.8, 0.3] },
    { "url": "pines.jpg", "embedding": [0.1, 0.9] },
    { "url": "fern.gif", "embedding": [0.3, 0.7] },
    { "url": "store.jpg", "tier": "paid", "link": "https://example.com/store" },
    { "url": "notes.txt" }
]"#;
