// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gallery --heading-base-level=0

//! Understory Gallery: an infinite, pannable and zoomable wall of media tiles.
//!
//! This crate ties the Understory gallery building blocks together behind a
//! single host-driven object, [`GalleryEngine`]:
//!
//! - camera and pinch from `understory_camera`,
//! - drag inertia from `understory_momentum`,
//! - the needed cell range from `understory_tile_grid`,
//! - content strategies from `understory_media_catalog`,
//! - tile reconciliation and lazy payload loading from `understory_tile_lifecycle`,
//! - debounced, last-query-wins semantic search from `understory_semantic_search`.
//!
//! The engine never schedules itself and never draws. A host:
//!
//! 1. implements [`understory_tile_lifecycle::TileRenderer`] for its drawing surface,
//! 2. forwards input as [`InputEvent`]s,
//! 3. calls [`GalleryEngine::tick`] once per frame,
//! 4. loads the catalog off-thread and hands it over with [`GalleryEngine::set_catalog`].
//!
//! [`GalleryConfig`] carries every tunable and deserializes from JSON with
//! defaults for anything left out.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect, Size};
//! use understory_gallery::{GalleryConfig, GalleryEngine, InputEvent};
//! use understory_media_catalog::{Catalog, ContentItem};
//! use understory_tile_lifecycle::TileRenderer;
//!
//! #[derive(Default)]
//! struct Headless {
//!     live: usize,
//! }
//!
//! impl TileRenderer for Headless {
//!     type Handle = ();
//!     fn create(&mut self, _rect: Rect, _content: &ContentItem) {
//!         self.live += 1;
//!     }
//!     fn destroy(&mut self, _handle: ()) {
//!         self.live -= 1;
//!     }
//!     fn attach_payload(&mut self, _handle: &mut (), _content: &ContentItem) {}
//!     fn detach_payload(&mut self, _handle: &mut ()) {}
//!     fn set_screen_rect(&mut self, _handle: &mut (), _rect: Rect) {}
//! }
//!
//! let mut gallery = GalleryEngine::new(
//!     GalleryConfig::default(),
//!     Headless::default(),
//!     Size::new(800.0, 600.0),
//! )
//! .unwrap();
//! gallery.set_catalog(Catalog::from_json_str(r#"["a.jpg", "b.mp4"]"#, None).unwrap());
//!
//! let frame = Duration::from_millis(16);
//! gallery.tick(frame);
//! assert_eq!(gallery.renderer().live, 56);
//!
//! // Drag left by one tile and let go; the camera coasts.
//! gallery.handle_input(InputEvent::PointerDown(Point::new(400.0, 300.0)));
//! gallery.handle_input(InputEvent::PointerMove(Point::new(250.0, 300.0)));
//! gallery.handle_input(InputEvent::PointerUp);
//! gallery.tick(frame);
//! assert!(gallery.camera().position().x > 150.0);
//! assert_eq!(gallery.renderer().live, gallery.tiles().len());
//! ```

mod config;
mod engine;
mod error;
mod input;
mod status;

pub use config::{BufferConfig, CatalogConfig, GalleryConfig, MomentumSettings, SearchConfig};
pub use engine::{GalleryDebugInfo, GalleryEngine, TickStats};
pub use error::ConfigError;
pub use input::{ArrowKey, InputEvent, Touches};
pub use status::{GalleryStatus, SearchStatus};
