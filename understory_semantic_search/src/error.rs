// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors produced while turning a query into an embedding.
///
/// All of them are recoverable: a gallery falls back to its unranked view.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The embedding endpoint could not be reached or returned an error status.
    #[cfg(feature = "http")]
    #[error("embedding request failed: {0}")]
    Http(#[from] ureq::Error),
    /// A worker thread could not be started.
    #[error("search worker i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The embedding response was not the expected JSON.
    #[error("embedding response is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The service answered with an empty vector.
    #[error("embedding service returned an empty vector")]
    EmptyEmbedding,
    /// A custom [`EmbeddingService`](crate::EmbeddingService) failed.
    #[error("embedding service failed: {0}")]
    Service(String),
    /// Every worker thread has exited.
    #[error("search worker is gone")]
    WorkerGone,
}
