// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What the gallery as a whole is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GalleryStatus {
    /// No catalog has been supplied yet.
    #[default]
    Loading,
    /// Tiles are being drawn from a non-empty catalog.
    Ready,
    /// The catalog loaded but had nothing usable.
    Empty,
    /// The catalog could not be fetched or parsed.
    CatalogUnavailable(String),
}

impl GalleryStatus {
    /// User-facing message for states that show no tiles.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some("loading"),
            Self::Ready => None,
            Self::Empty | Self::CatalogUnavailable(_) => Some("no content available"),
        }
    }

    /// Returns `true` when the gallery has nothing to show.
    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::Empty | Self::CatalogUnavailable(_))
    }
}

/// State of the search overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query in effect; tiles come from the unranked strategy.
    #[default]
    Inactive,
    /// A query was submitted and its embedding is outstanding.
    Pending,
    /// Tiles are filled from ranked results.
    Ranked {
        /// Number of ranked results.
        matches: usize,
    },
    /// The query ranked nothing; the unranked view is shown.
    NoMatches,
    /// The embedding service failed; the unranked view is shown.
    Unavailable(String),
}
