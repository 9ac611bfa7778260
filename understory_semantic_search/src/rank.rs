// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_media_catalog::{Catalog, Ranked, RankedItem};

/// Default number of results kept by [`rank`].
pub const DEFAULT_TOP_K: usize = 60;

/// Cosine similarity of two vectors, accumulated in `f64`.
///
/// Returns `None` when either vector is empty, the lengths differ, either
/// norm is zero, or the result is not finite.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cosine similarity lies in [-1, 1]; f32 keeps ample precision for ordering"
    )]
    let similarity = similarity.clamp(-1.0, 1.0) as f32;
    similarity.is_finite().then_some(similarity)
}

/// Ranked matches for one query.
#[derive(Clone, Debug, Default)]
pub struct SearchResults {
    /// Matches, best first.
    pub items: Vec<RankedItem>,
    /// Catalog items left out for lacking a usable embedding.
    pub excluded: usize,
}

impl SearchResults {
    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<SearchResults> for Ranked {
    fn from(results: SearchResults) -> Self {
        Self::new(results.items)
    }
}

/// Ranks `catalog` against `query` by cosine similarity, best first.
///
/// Items without an embedding, or whose embedding has a different dimension
/// than the query, are excluded. Equal scores keep catalog order. At most
/// `top_k` results are returned.
#[must_use]
pub fn rank(query: &[f32], catalog: &Catalog, top_k: usize) -> SearchResults {
    let mut results = SearchResults::default();
    for item in catalog.iter() {
        let similarity = item
            .embedding()
            .and_then(|embedding| cosine_similarity(query, embedding));
        match similarity {
            Some(similarity) => results.items.push(RankedItem {
                item: item.clone(),
                similarity,
            }),
            None => results.excluded += 1,
        }
    }
    results
        .items
        .sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.items.truncate(top_k);
    if results.excluded > 0 {
        log::debug!(
            "ranking excluded {} of {} items without a usable embedding",
            results.excluded,
            catalog.len()
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use understory_media_catalog::{Catalog, ContentItem};

    use super::{cosine_similarity, rank};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn cosine_basics() {
        let a = [1.0, 2.0, 3.0];
        let b = [-2.0, 0.5, 4.0];
        assert!(approx(cosine_similarity(&a, &a).unwrap(), 1.0));
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
        assert!(approx(
            cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(),
            -1.0
        ));
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).unwrap(), 0.0));
    }

    #[test]
    fn cosine_rejects_degenerate_input() {
        assert_eq!(cosine_similarity(&[], &[]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), None);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), None);
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn cosine_is_scale_invariant() {
        let a = [0.3, -0.7, 0.2];
        let b = [3.0, -7.0, 2.0];
        assert!(approx(cosine_similarity(&a, &b).unwrap(), 1.0));
    }

    fn catalog() -> Catalog {
        Catalog::from_items([
            ContentItem::new("east.jpg").unwrap().with_embedding(vec![1.0, 0.0]),
            ContentItem::new("none.jpg").unwrap(),
            ContentItem::new("north.jpg").unwrap().with_embedding(vec![0.0, 1.0]),
            ContentItem::new("northeast.jpg").unwrap().with_embedding(vec![1.0, 1.0]),
            ContentItem::new("east-again.jpg").unwrap().with_embedding(vec![2.0, 0.0]),
            ContentItem::new("wrong-dim.jpg").unwrap().with_embedding(vec![1.0, 0.0, 0.0]),
        ])
    }

    #[test]
    fn rank_orders_best_first_and_keeps_ties_stable() {
        let results = rank(&[1.0, 0.0], &catalog(), 60);
        let urls: Vec<_> = results.items.iter().map(|r| r.item.url()).collect();
        assert_eq!(urls, ["east.jpg", "east-again.jpg", "northeast.jpg", "north.jpg"]);
        assert_eq!(results.excluded, 2);
        assert!(
            results
                .items
                .windows(2)
                .all(|w| w[0].similarity >= w[1].similarity)
        );
    }

    #[test]
    fn rank_truncates_to_top_k() {
        let results = rank(&[0.0, 1.0], &catalog(), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results.items[0].item.url(), "north.jpg");
        assert!(rank(&[0.0, 1.0], &catalog(), 0).is_empty());
    }

    #[test]
    fn rank_of_empty_catalog_is_empty() {
        let results = rank(&[1.0], &Catalog::empty(), 60);
        assert!(results.is_empty());
        assert_eq!(results.excluded, 0);
    }
}
