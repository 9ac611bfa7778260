// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::Deserialize;

use crate::CatalogError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "webp", "png", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// What kind of payload a tile attaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A muted, looping video.
    Video,
}

impl MediaKind {
    /// Classifies a URL by its file extension, ignoring query and fragment.
    ///
    /// Returns `None` for anything that is not a recognized image or video.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// Presentation tier of an item; renderers decorate featured and paid tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Highlighted tile.
    Featured,
    /// Paid placement.
    Paid,
    /// Plain tile; unrecognized tier names land here.
    #[default]
    #[serde(other)]
    Standard,
}

/// An immutable media descriptor from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    url: String,
    kind: MediaKind,
    tier: Tier,
    link: Option<String>,
    embedding: Option<Vec<f32>>,
}

impl ContentItem {
    /// Creates a standard-tier item, deriving its kind from the extension.
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let url = url.into();
        let Some(kind) = MediaKind::from_url(&url) else {
            return Err(CatalogError::UnsupportedMedia(url));
        };
        Ok(Self {
            url,
            kind,
            tier: Tier::Standard,
            link: None,
            embedding: None,
        })
    }

    /// Sets the tier.
    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Sets the click-through link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the precomputed embedding. An empty vector clears it.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = (!embedding.is_empty()).then_some(embedding);
        self
    }

    /// Media URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Image or video.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Presentation tier.
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Click-through link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Precomputed embedding, if any.
    #[must_use]
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }
}
