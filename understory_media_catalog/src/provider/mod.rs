// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content provider strategies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use understory_tile_grid::GridCoord;

use crate::{Catalog, ContentItem};

mod hash;
mod pooled;
mod random;
mod ranked;

pub use hash::SpatialHash;
pub use pooled::Pooled;
pub use random::UniformRandom;
pub use ranked::{Ranked, RankedItem};

/// A request for the content of a tile about to be materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Cell being materialized.
    pub coord: GridCoord,
    /// Row-major position of `coord` in the current needed range.
    ///
    /// Only meaningful within one reconciliation: after a pan the same
    /// ordinal names a different cell.
    pub ordinal: usize,
}

impl SpawnRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(coord: GridCoord, ordinal: usize) -> Self {
        Self { coord, ordinal }
    }
}

/// Decides which item a new tile shows.
///
/// Returning `None` leaves the cell empty; it is asked again on the next
/// reconciliation.
pub trait ContentProvider {
    /// Content for the tile described by `request`.
    fn content_for(&mut self, request: SpawnRequest) -> Option<Arc<ContentItem>>;

    /// Short name used in logs and status reporting.
    fn name(&self) -> &'static str;

    /// Called after every live tile was destroyed. Providers that consume
    /// their items start over.
    fn reset(&mut self) {}
}

impl<P: ContentProvider + ?Sized> ContentProvider for Box<P> {
    fn content_for(&mut self, request: SpawnRequest) -> Option<Arc<ContentItem>> {
        (**self).content_for(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Unranked strategy selected by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// [`UniformRandom`]: content may change when a cell is revisited.
    #[default]
    Random,
    /// [`SpatialHash`]: content is pinned per cell.
    SpatialHash,
    /// [`Pooled`]: no repeats until the pool is refilled.
    Pooled,
}

/// Builds the provider for `kind` over `catalog`.
///
/// `seed` feeds the random and pooled strategies and is ignored by the
/// spatial hash.
#[must_use]
pub fn build_provider(
    kind: StrategyKind,
    catalog: Arc<Catalog>,
    seed: u64,
) -> Box<dyn ContentProvider> {
    match kind {
        StrategyKind::Random => Box::new(UniformRandom::new(catalog, seed)),
        StrategyKind::SpatialHash => Box::new(SpatialHash::new(catalog)),
        StrategyKind::Pooled => Box::new(Pooled::new(catalog, seed)),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::catalog_of;
    use super::{SpawnRequest, StrategyKind, build_provider};
    use understory_tile_grid::GridCoord;

    #[test]
    fn build_provider_names() {
        let catalog = catalog_of(3);
        for (kind, name) in [
            (StrategyKind::Random, "random"),
            (StrategyKind::SpatialHash, "spatial_hash"),
            (StrategyKind::Pooled, "pooled"),
        ] {
            let mut provider = build_provider(kind, catalog.clone(), 1);
            assert_eq!(provider.name(), name);
            assert!(provider.content_for(SpawnRequest::new(GridCoord::new(0, 0), 0)).is_some());
        }
    }

    #[test]
    fn strategy_kind_serde_names() {
        let kind: StrategyKind = serde_json::from_str("\"spatial_hash\"").unwrap();
        assert_eq!(kind, StrategyKind::SpatialHash);
        assert_eq!(serde_json::to_string(&StrategyKind::Pooled).unwrap(), "\"pooled\"");
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let catalog = catalog_of(0);
        for kind in [StrategyKind::Random, StrategyKind::SpatialHash, StrategyKind::Pooled] {
            let mut provider = build_provider(kind, catalog.clone(), 1);
            assert!(provider.content_for(SpawnRequest::new(GridCoord::new(4, 4), 0)).is_none());
        }
    }
}
