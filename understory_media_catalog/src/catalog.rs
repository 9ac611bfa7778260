// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use serde::Deserialize;

use crate::{CatalogError, ContentItem, Tier};

/// One entry of the catalog JSON array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    /// A file name relative to the base URL.
    Path(String),
    Descriptor(RawDescriptor),
}

#[derive(Deserialize)]
struct RawDescriptor {
    url: String,
    #[serde(default)]
    tier: Option<Tier>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

/// The filtered list of items a gallery draws from.
///
/// Items are shared, so providers and tiles hold `Arc` clones rather than
/// copies. A catalog is replaced wholesale, never edited in place.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<Arc<ContentItem>>,
    skipped: usize,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from already validated items.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
            skipped: 0,
        }
    }

    /// Parses a catalog JSON array.
    ///
    /// Plain string entries are joined to `base_url` when given. Entries with
    /// an unsupported extension or an unexpected shape are skipped and
    /// counted in [`Catalog::skipped`].
    pub fn from_json_str(json: &str, base_url: Option<&str>) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(entries) = value else {
            return Err(CatalogError::NotAnArray);
        };

        let mut items = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for (index, entry) in entries.into_iter().enumerate() {
            match parse_entry(entry, base_url) {
                Ok(item) => items.push(Arc::new(item)),
                Err(err) => {
                    log::warn!("skipping catalog entry {index}: {err}");
                    skipped += 1;
                }
            }
        }
        log::info!(
            "parsed catalog: {} items, {} skipped",
            items.len(),
            skipped
        );
        Ok(Self { items, skipped })
    }

    /// Reads and parses a catalog file, as [`Catalog::from_json_str`] does.
    pub fn from_path(
        path: impl AsRef<std::path::Path>,
        base_url: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json, base_url)
    }

    /// Number of usable items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries dropped while parsing.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// All items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[Arc<ContentItem>] {
        &self.items
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<ContentItem>> {
        self.items.get(index)
    }

    /// Iterates over items in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'_, Arc<ContentItem>> {
        self.items.iter()
    }
}

fn parse_entry(entry: serde_json::Value, base_url: Option<&str>) -> Result<ContentItem, CatalogError> {
    match serde_json::from_value(entry)? {
        RawEntry::Path(name) => ContentItem::new(join_url(base_url, &name)),
        RawEntry::Descriptor(raw) => {
            let mut item = ContentItem::new(raw.url)?.with_tier(raw.tier.unwrap_or_default());
            if let Some(link) = raw.link {
                item = item.with_link(link);
            }
            if let Some(embedding) = raw.embedding {
                item = item.with_embedding(embedding);
            }
            Ok(item)
        }
    }
}

fn join_url(base_url: Option<&str>, name: &str) -> String {
    match base_url {
        Some(base) if !base.is_empty() && !name.contains("://") => {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                name.trim_start_matches('/')
            )
        }
        _ => name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, join_url};
    use crate::{CatalogError, MediaKind, Tier};

    #[test]
    fn parses_mixed_entries() {
        let json = r#"[
            "one.jpg",
            {"url": "two.mp4", "tier": "paid", "link": "https://example.com/buy"},
            {"url": "three.webp", "tier": "sparkly", "embedding": [0.1, 0.2]},
            {"url": "four.jpeg", "tier": "featured"}
        ]"#;
        let catalog = Catalog::from_json_str(json, None).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.skipped(), 0);

        let items = catalog.items();
        assert_eq!(items[0].url(), "one.jpg");
        assert_eq!(items[1].kind(), MediaKind::Video);
        assert_eq!(items[1].tier(), Tier::Paid);
        assert_eq!(items[1].link(), Some("https://example.com/buy"));
        assert_eq!(items[2].tier(), Tier::Standard);
        assert_eq!(items[2].embedding().map(<[f32]>::len), Some(2));
        assert_eq!(items[3].tier(), Tier::Featured);
    }

    #[test]
    fn unknown_tier_name_is_standard() {
        let json = r#"[{"url": "a.jpg", "tier": "gold"}, {"url": "b.jpg", "tier": "paid"}]"#;
        let catalog = Catalog::from_json_str(json, None).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 0);
        assert_eq!(catalog.items()[0].tier(), Tier::Standard);
        assert_eq!(catalog.items()[1].tier(), Tier::Paid);
    }

    #[test]
    fn malformed_entries_are_skipped_individually() {
        let json = r#"["ok.png", 42, {"nourl": true}, "bad.txt", null, {"url": "fine.mov"}]"#;
        let catalog = Catalog::from_json_str(json, None).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 4);
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let catalog = Catalog::from_json_str("[]", None).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.skipped(), 0);
    }

    #[test]
    fn whole_document_failures_are_errors() {
        assert!(matches!(
            Catalog::from_json_str("{\"url\": \"a.jpg\"}", None),
            Err(CatalogError::NotAnArray)
        ));
        assert!(matches!(
            Catalog::from_json_str("not json", None),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            Catalog::from_path("/definitely/not/here/catalog.json", None),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn plain_names_join_base_url() {
        assert_eq!(join_url(Some("https://cdn/x/"), "/a.jpg"), "https://cdn/x/a.jpg");
        assert_eq!(join_url(Some("https://cdn/x"), "a.jpg"), "https://cdn/x/a.jpg");
        assert_eq!(join_url(Some("https://cdn/x"), "https://o/a.jpg"), "https://o/a.jpg");
        assert_eq!(join_url(None, "a.jpg"), "a.jpg");
        assert_eq!(join_url(Some(""), "a.jpg"), "a.jpg");
    }
}
