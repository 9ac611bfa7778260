// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Catalog, ContentItem, ContentProvider, SpawnRequest};

/// Draws a uniformly random item on every spawn.
///
/// Revisiting a cell after its tile was evicted draws again, so the same
/// coordinate may show different content over time.
#[derive(Clone, Debug)]
pub struct UniformRandom {
    catalog: Arc<Catalog>,
    rng: StdRng,
}

impl UniformRandom {
    /// Creates the provider with a seeded generator.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ContentProvider for UniformRandom {
    fn content_for(&mut self, _request: SpawnRequest) -> Option<Arc<ContentItem>> {
        if self.catalog.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.catalog.len());
        self.catalog.get(index).cloned()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
