// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{Catalog, ContentItem, ContentProvider, SpawnRequest};

/// Consumes a shuffled copy of the catalog, one item per spawn.
///
/// Nothing repeats within a pool. Once the pool is empty every spawn yields
/// `None` until [`Pooled::refill`] is called.
#[derive(Clone, Debug)]
pub struct Pooled {
    catalog: Arc<Catalog>,
    queue: Vec<Arc<ContentItem>>,
    rng: StdRng,
}

impl Pooled {
    /// Creates a full, shuffled pool.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, seed: u64) -> Self {
        let mut pooled = Self {
            catalog,
            queue: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        pooled.refill();
        pooled
    }

    /// Discards what is left and reshuffles the whole catalog into the pool.
    pub fn refill(&mut self) {
        self.queue.clear();
        self.queue.extend(self.catalog.iter().cloned());
        self.queue.shuffle(&mut self.rng);
    }

    /// Items left before the pool runs dry.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ContentProvider for Pooled {
    fn content_for(&mut self, _request: SpawnRequest) -> Option<Arc<ContentItem>> {
        self.queue.pop()
    }

    fn name(&self) -> &'static str {
        "pooled"
    }

    fn reset(&mut self) {
        self.refill();
    }
}
