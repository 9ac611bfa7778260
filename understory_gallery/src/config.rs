// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;
use std::path::Path;

use serde::{Deserialize, Serialize};
use understory_camera::ScaleLimits;
use understory_media_catalog::StrategyKind;
use understory_momentum::MomentumConfig;
use understory_semantic_search::QueryGate;
use understory_tile_grid::{BufferPolicy, GridSpec};
use understory_tile_lifecycle::LazyLoadGate;

use crate::ConfigError;

/// How many rings of tiles to keep beyond the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferConfig {
    /// A fixed number of rings.
    Fixed(u32),
    /// Rings grow with zoom-in.
    ScaleWithZoom(u32),
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl From<BufferConfig> for BufferPolicy {
    fn from(buffer: BufferConfig) -> Self {
        match buffer {
            BufferConfig::Fixed(n) => Self::Fixed(n),
            BufferConfig::ScaleWithZoom(n) => Self::ScaleWithZoom(n),
        }
    }
}

/// Inertia tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumSettings {
    /// Fraction of velocity kept per reference frame, in `(0, 1)`.
    pub damping: f64,
    /// Speed below which coasting stops, in screen pixels per reference frame.
    pub epsilon: f64,
    /// Reference frame length in milliseconds.
    pub reference_frame_ms: f64,
}

impl Default for MomentumSettings {
    fn default() -> Self {
        let config = MomentumConfig::default();
        Self {
            damping: config.damping,
            epsilon: config.epsilon,
            reference_frame_ms: config.reference_frame.as_secs_f64() * 1000.0,
        }
    }
}

/// Search tuning and the embedding endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) clear the search.
    pub min_query_len: usize,
    /// Quiet period after the last keystroke.
    pub debounce_ms: u64,
    /// Maximum number of ranked results.
    pub top_k: usize,
    /// Total timeout for one embedding request.
    pub timeout_ms: u64,
    /// Embedding endpoint; search is unavailable without one.
    pub endpoint: Option<String>,
    /// Background threads for embedding requests.
    pub worker_threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: understory_semantic_search::DEFAULT_MIN_QUERY_LEN,
            debounce_ms: 300,
            top_k: understory_semantic_search::DEFAULT_TOP_K,
            timeout_ms: 8_000,
            endpoint: None,
            worker_threads: 1,
        }
    }
}

impl SearchConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Where the catalog comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog endpoint (`GET`, JSON array).
    pub endpoint: Option<String>,
    /// Base URL plain file names are joined to.
    pub base_url: Option<String>,
}

/// Every tunable of a gallery.
///
/// All fields have defaults, so an empty JSON object is a valid config:
///
/// ```rust
/// use understory_gallery::GalleryConfig;
///
/// let config = GalleryConfig::from_json_str(r#"{ "tile_size": 200, "strategy": "spatial_hash" }"#).unwrap();
/// assert_eq!(config.tile_size, 200.0);
/// assert_eq!(config.search.top_k, 60);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Tile edge length in world units.
    pub tile_size: f64,
    /// Prefetch rings beyond the viewport.
    pub buffer: BufferConfig,
    /// Smallest zoom factor.
    pub min_scale: f64,
    /// Largest zoom factor.
    pub max_scale: f64,
    /// Inertia tuning.
    pub momentum: MomentumSettings,
    /// Screen pixels beyond the viewport that still load payloads.
    pub lazy_load_margin: f64,
    /// Arrow key pan step in screen pixels.
    pub keyboard_step: f64,
    /// Zoom factor for a modifier wheel step towards the user.
    pub wheel_zoom_in: f64,
    /// Zoom factor for a modifier wheel step away from the user.
    pub wheel_zoom_out: f64,
    /// Unranked content strategy.
    pub strategy: StrategyKind,
    /// Seed for the random and pooled strategies.
    pub seed: u64,
    /// Search tuning.
    pub search: SearchConfig,
    /// Catalog source.
    pub catalog: CatalogConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            tile_size: 150.0,
            buffer: BufferConfig::default(),
            min_scale: 0.5,
            max_scale: 3.0,
            momentum: MomentumSettings::default(),
            lazy_load_margin: 0.0,
            keyboard_step: 20.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            strategy: StrategyKind::default(),
            seed: 0x5EED,
            search: SearchConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(message: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(message.into()))
        }

        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return invalid(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return invalid(format!("min_scale must be positive, got {}", self.min_scale));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return invalid(format!(
                "scale limits are inverted: {}..{}",
                self.min_scale, self.max_scale
            ));
        }
        let momentum = &self.momentum;
        if !(momentum.damping > 0.0 && momentum.damping < 1.0) {
            return invalid(format!("damping must be in (0, 1), got {}", momentum.damping));
        }
        if !(momentum.epsilon.is_finite() && momentum.epsilon >= 0.0) {
            return invalid(format!("epsilon must be non-negative, got {}", momentum.epsilon));
        }
        if !(momentum.reference_frame_ms.is_finite() && momentum.reference_frame_ms > 0.0) {
            return invalid("reference_frame_ms must be positive");
        }
        if !(self.lazy_load_margin.is_finite() && self.lazy_load_margin >= 0.0) {
            return invalid("lazy_load_margin must be non-negative");
        }
        if !self.keyboard_step.is_finite() {
            return invalid("keyboard_step must be finite");
        }
        for factor in [self.wheel_zoom_in, self.wheel_zoom_out] {
            if !(factor.is_finite() && factor > 0.0) {
                return invalid(format!("wheel zoom factors must be positive, got {factor}"));
            }
        }
        if self.search.top_k == 0 {
            return invalid("search.top_k must be at least 1");
        }
        Ok(())
    }

    /// Grid geometry.
    #[must_use]
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            tile_size: self.tile_size,
            buffer: self.buffer.into(),
        }
    }

    /// Zoom limits.
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }

    /// Inertia tuning for the integrator.
    #[must_use]
    pub fn momentum_config(&self) -> MomentumConfig {
        MomentumConfig {
            damping: self.momentum.damping,
            epsilon: self.momentum.epsilon,
            reference_frame: Duration::from_secs_f64(self.momentum.reference_frame_ms / 1000.0),
        }
    }

    /// Payload gate.
    #[must_use]
    pub fn lazy_load_gate(&self) -> LazyLoadGate {
        LazyLoadGate::new(self.lazy_load_margin)
    }

    /// Search input debouncer.
    #[must_use]
    pub fn query_gate(&self) -> QueryGate {
        QueryGate::new(
            Duration::from_millis(self.search.debounce_ms),
            self.search.min_query_len,
        )
    }
}
