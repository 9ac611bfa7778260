// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::{ContentItem, ContentProvider, SpawnRequest};

/// An item paired with its similarity to a search query.
#[derive(Clone, Debug)]
pub struct RankedItem {
    /// The matched item.
    pub item: Arc<ContentItem>,
    /// Cosine similarity to the query, higher is better.
    pub similarity: f32,
}

/// Serves ranked results one per spawn, best first.
///
/// A full rebuild spawns in row-major order, so the best match lands in the
/// top-left cell of the needed range and the viewport fills in rank order.
/// Cells revealed later by panning take the next unused results. Nothing is
/// shown twice; once the list runs dry new cells stay empty until
/// [`ContentProvider::reset`].
#[derive(Clone, Debug, Default)]
pub struct Ranked {
    results: Arc<[RankedItem]>,
    next: usize,
}

impl Ranked {
    /// Creates the provider over an ordered result list.
    #[must_use]
    pub fn new(results: impl Into<Arc<[RankedItem]>>) -> Self {
        Self {
            results: results.into(),
            next: 0,
        }
    }

    /// The ordered results.
    #[must_use]
    pub fn results(&self) -> &[RankedItem] {
        &self.results
    }

    /// Results not handed out yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.results.len().saturating_sub(self.next)
    }
}

impl ContentProvider for Ranked {
    fn content_for(&mut self, _request: SpawnRequest) -> Option<Arc<ContentItem>> {
        let ranked = self.results.get(self.next)?;
        self.next += 1;
        Some(ranked.item.clone())
    }

    fn name(&self) -> &'static str {
        "ranked"
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}
