// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors produced while building or fetching a [`Catalog`](crate::Catalog).
///
/// Whole-catalog failures ([`CatalogError::Json`], [`CatalogError::Io`],
/// [`CatalogError::NotAnArray`], `Http`) leave the caller with no catalog. Per-entry
/// problems ([`CatalogError::UnsupportedMedia`]) are reported by
/// [`ContentItem::new`](crate::ContentItem::new) and skipped during parsing.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The response was not valid JSON.
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A local catalog file could not be read.
    #[error("catalog file could not be read: {0}")]
    Io(#[from] std::io::Error),
    /// The JSON document was valid but not an array.
    #[error("catalog must be a JSON array")]
    NotAnArray,
    /// The URL does not end in a recognized image or video extension.
    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),
    /// The catalog endpoint could not be reached or returned an error status.
    #[cfg(feature = "http")]
    #[error("catalog request failed: {0}")]
    Http(#[from] ureq::Error),
}
