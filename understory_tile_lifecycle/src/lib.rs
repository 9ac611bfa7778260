// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tile_lifecycle --heading-base-level=0

//! Understory Tile Lifecycle: keep a set of live tiles in step with a needed grid range.
//!
//! [`understory_tile_grid::needed_range`] says which cells should exist. This
//! crate owns the tiles for those cells and drives a host renderer through
//! their lifecycle:
//!
//! - [`TileRenderer`]: the render-handle contract a host implements
//!   (create, destroy, attach/detach payload, reposition, enter transition).
//! - [`TileManager`]: a coordinate-keyed map of live [`Tile`]s.
//!   [`TileManager::reconcile`] spawns missing cells in row-major order and
//!   destroys everything outside the range, so no tile is ever orphaned.
//! - [`LazyLoadGate`]: attaches heavy payloads only to tiles whose screen rect
//!   meets the viewport, and detaches them again when they leave.
//!
//! Content for new tiles comes from any
//! [`understory_media_catalog::ContentProvider`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//! use kurbo::{Rect, Size};
//! use understory_camera::Camera;
//! use understory_media_catalog::{Catalog, ContentItem, SpatialHash};
//! use understory_tile_grid::{GridSpec, needed_range};
//! use understory_tile_lifecycle::{LazyLoadGate, TileManager, TileRenderer};
//!
//! #[derive(Default)]
//! struct Counter {
//!     live: usize,
//! }
//!
//! impl TileRenderer for Counter {
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
//! let catalog = Arc::new(Catalog::from_items([ContentItem::new("a.jpg").unwrap()]));
//! let mut provider = SpatialHash::new(catalog);
//! let mut renderer = Counter::default();
//! let mut tiles = TileManager::new();
//!
//! let camera = Camera::new();
//! let screen = Size::new(800.0, 600.0);
//! let spec = GridSpec::default();
//! let range = needed_range(&camera, screen, &spec);
//!
//! let stats = tiles.reconcile(&range, &camera, &spec, &mut provider, &mut renderer);
//! assert_eq!(stats.spawned, range.len());
//! assert_eq!(renderer.live, tiles.len());
//!
//! let loads = LazyLoadGate::default().run(&mut tiles, &camera, &spec, screen, &mut renderer);
//! assert!(loads.attached > 0);
//! ```

mod lazy;
mod manager;
mod renderer;

pub use lazy::{LazyLoadGate, LoadStats};
pub use manager::{ReconcileStats, Tile, TileManager, TileManagerDebugInfo};
pub use renderer::TileRenderer;
