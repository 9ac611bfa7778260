// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_semantic_search --heading-base-level=0

//! Understory Semantic Search: rank a media catalog against a text query.
//!
//! Search is split into pieces that can each be driven and tested alone:
//!
//! - [`QueryGate`]: debounces raw text input, enforces a minimum query length
//!   and hands out generation [`SearchTicket`]s so only the latest query's
//!   results are ever applied.
//! - [`EmbeddingService`]: turns query text into a vector.
//!   [`HttpEmbeddingClient`] (feature `http`) talks to a JSON endpoint; any
//!   `Fn(&str) -> Result<Vec<f32>, SearchError>` works too.
//! - [`SearchWorker`]: runs embedding requests on background threads and
//!   returns [`SearchResponse`]s over a channel, so the caller never blocks.
//! - [`rank`]: cosine similarity of the query against every item embedding,
//!   best first, truncated to `top_k`. The result converts into an
//!   [`understory_media_catalog::Ranked`] provider.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_media_catalog::{Catalog, ContentItem};
//! use understory_semantic_search::{QueryAction, QueryGate, rank};
//!
//! let catalog = Catalog::from_items([
//!     ContentItem::new("beach.jpg").unwrap().with_embedding(vec![0.9, 0.1]),
//!     ContentItem::new("forest.jpg").unwrap().with_embedding(vec![0.1, 0.9]),
//! ]);
//!
//! let mut gate = QueryGate::default();
//! gate.input("trees", Duration::ZERO);
//! assert_eq!(gate.poll(Duration::from_millis(100)), None);
//! let Some(QueryAction::Submit(request)) = gate.poll(Duration::from_millis(300)) else {
//!     unreachable!()
//! };
//! assert_eq!(request.text, "trees");
//!
//! // Pretend the embedding service answered for `request.ticket`.
//! assert!(gate.accept(request.ticket));
//! let results = rank(&[0.0, 1.0], &catalog, 60);
//! assert_eq!(results.items[0].item.url(), "forest.jpg");
//! ```

mod error;
mod gate;
mod rank;
mod service;
mod worker;

pub use error::SearchError;
pub use gate::{
    DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN, QueryAction, QueryGate, SearchOutcome, SearchRequest,
    SearchTicket,
};
pub use rank::{DEFAULT_TOP_K, SearchResults, cosine_similarity, rank};
pub use service::EmbeddingService;
#[cfg(feature = "http")]
pub use service::{DEFAULT_EMBED_TIMEOUT, HttpEmbeddingClient};
pub use worker::{SearchResponse, SearchWorker};
