// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blocking catalog fetch over HTTP.
//!
//! These helpers block the calling thread. Hosts run them off the render
//! loop and hand the finished [`Catalog`] to the engine.

use std::time::Duration;

use crate::{Catalog, CatalogError};

/// Builds an agent whose requests fail after `timeout` in total.
#[must_use]
pub fn agent_with_timeout(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Fetches and parses the catalog at `endpoint`.
///
/// Non-success status codes, transport failures and malformed documents are
/// all reported as [`CatalogError`].
pub fn fetch_catalog(
    agent: &ureq::Agent,
    endpoint: &str,
    base_url: Option<&str>,
) -> Result<Catalog, CatalogError> {
    log::debug!("fetching catalog from {endpoint}");
    let mut response = agent.get(endpoint).call()?;
    let body = response.body_mut().read_to_string()?;
    Catalog::from_json_str(&body, base_url)
}

/// Like [`fetch_catalog`], retrying transport failures up to `attempts` times.
///
/// Parse failures are not retried: the same document would fail again.
pub fn fetch_catalog_with_retries(
    agent: &ureq::Agent,
    endpoint: &str,
    base_url: Option<&str>,
    attempts: u32,
) -> Result<Catalog, CatalogError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch_catalog(agent, endpoint, base_url) {
            Err(CatalogError::Http(err)) if attempt < attempts => {
                log::warn!("catalog fetch attempt {attempt}/{attempts} failed: {err}");
                attempt += 1;
            }
            result => return result,
        }
    }
}
