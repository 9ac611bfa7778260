// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors produced while loading or validating a [`GalleryConfig`](crate::GalleryConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config file could not be read: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON or has fields of the wrong type.
    #[error("config is not valid: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
