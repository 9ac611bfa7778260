// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_media_catalog --heading-base-level=0

//! Understory Media Catalog: content model and content providers for tile galleries.
//!
//! A gallery shows items from a flat catalog of media descriptors. This crate
//! owns that model and the strategies that decide which item a freshly
//! materialized tile shows:
//!
//! - [`ContentItem`]: an immutable media descriptor (url, [`MediaKind`],
//!   [`Tier`], optional link and embedding). Shared as `Arc<ContentItem>`.
//! - [`Catalog`]: the parsed, filtered list of items. Built from JSON with
//!   [`Catalog::from_json_str`] or fetched with [`fetch_catalog`] (feature `http`).
//! - [`ContentProvider`]: strategy trait mapping a [`SpawnRequest`] to an item.
//!   Four implementations ship with the crate:
//!   - [`UniformRandom`]: a fresh uniform draw on every spawn.
//!   - [`SpatialHash`]: a stable item per grid coordinate.
//!   - [`Pooled`]: a shuffled, finite pool consumed without repeats.
//!   - [`Ranked`]: an ordered result list consumed one item per spawn.
//!
//! ## Catalog format
//!
//! The catalog is a JSON array. Entries are either plain file names, joined to
//! a base URL, or descriptor objects:
//!
//! ```rust
//! use understory_media_catalog::{Catalog, MediaKind, Tier};
//!
//! let json = r#"[
//!     "sunrise.jpg",
//!     { "url": "https://cdn.example.com/loop.mp4", "tier": "featured" },
//!     { "url": "notes.txt" }
//! ]"#;
//! let catalog = Catalog::from_json_str(json, Some("https://cdn.example.com/media/")).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.skipped(), 1);
//! assert_eq!(catalog.items()[0].url(), "https://cdn.example.com/media/sunrise.jpg");
//! assert_eq!(catalog.items()[1].kind(), MediaKind::Video);
//! assert_eq!(catalog.items()[1].tier(), Tier::Featured);
//! ```
//!
//! Entries that cannot be used (unknown extension, wrong shape) are skipped
//! individually and counted; they never abort the batch.
//!
//! ## Choosing a provider
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_media_catalog::{Catalog, ContentItem, SpawnRequest, StrategyKind, build_provider};
//! use understory_tile_grid::GridCoord;
//!
//! let catalog = Arc::new(Catalog::from_items([
//!     ContentItem::new("a.jpg").unwrap(),
//!     ContentItem::new("b.webp").unwrap(),
//! ]));
//! let mut provider = build_provider(StrategyKind::SpatialHash, catalog, 7);
//!
//! let request = SpawnRequest::new(GridCoord::new(3, -2), 0);
//! let first = provider.content_for(request).unwrap();
//! let again = provider.content_for(request).unwrap();
//! assert!(Arc::ptr_eq(&first, &again));
//! ```

mod catalog;
mod error;
#[cfg(feature = "http")]
mod fetch;
mod item;
mod provider;

pub use catalog::Catalog;
pub use error::CatalogError;
#[cfg(feature = "http")]
pub use fetch::{agent_with_timeout, fetch_catalog, fetch_catalog_with_retries};
pub use item::{ContentItem, MediaKind, Tier};
pub use provider::{
    ContentProvider, Pooled, Ranked, RankedItem, SpatialHash, SpawnRequest, StrategyKind,
    UniformRandom, build_provider,
};
