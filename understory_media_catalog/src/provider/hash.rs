// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use understory_tile_grid::GridCoord;

use crate::{Catalog, ContentItem, ContentProvider, SpawnRequest};

const COL_PRIME: u64 = 73_856_093;
const ROW_PRIME: u64 = 19_349_663;

/// Pins one item to each grid coordinate.
///
/// `index = mix(col * P1 ^ row * P2) mod len`, so a region renders the same
/// regardless of traversal order or how often it was rebuilt, as long as the
/// catalog is unchanged.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    catalog: Arc<Catalog>,
}

impl SpatialHash {
    /// Creates the provider.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Catalog index for `coord`, or `None` for an empty catalog.
    #[must_use]
    pub fn index_for(&self, coord: GridCoord) -> Option<usize> {
        let len = self.catalog.len();
        if len == 0 {
            return None;
        }
        let hash = mix64(
            (coord.col as u64).wrapping_mul(COL_PRIME) ^ (coord.row as u64).wrapping_mul(ROW_PRIME),
        );
        usize::try_from(hash % len as u64).ok()
    }
}

/// 64-bit avalanche finalizer (SplitMix64's output stage).
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl ContentProvider for SpatialHash {
    fn content_for(&mut self, request: SpawnRequest) -> Option<Arc<ContentItem>> {
        let index = self.index_for(request.coord)?;
        self.catalog.get(index).cloned()
    }

    fn name(&self) -> &'static str {
        "spatial_hash"
    }
}
