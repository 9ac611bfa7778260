// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tile_grid --heading-base-level=0

//! Understory Tile Grid: 2D virtualization over an unbounded square grid.
//!
//! Where a virtual list answers "which indices of a 1D strip are visible",
//! this crate answers the same question for an infinite 2D grid of square
//! tiles viewed through an [`understory_camera::Camera`]:
//!
//! - [`GridCoord`]: a `(col, row)` cell. Hashable and ordered, suitable as a map key.
//! - [`GridRange`]: an inclusive rectangle of cells, iterated in row-major order.
//! - [`GridSpec`]: tile size plus a [`BufferPolicy`] for prefetch rings.
//! - [`needed_range`]: the cells a camera needs materialized for a given
//!   screen size, including buffer rings.
//!
//! The crate does not own any tiles. Hosts diff the returned range against
//! what they currently have and create/destroy accordingly (see
//! `understory_tile_lifecycle`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_camera::Camera;
//! use understory_tile_grid::{GridSpec, needed_range};
//!
//! let camera = Camera::new();
//! let spec = GridSpec::new(150.0, 1);
//!
//! let range = needed_range(&camera, Size::new(800.0, 600.0), &spec);
//! assert_eq!(range.cols(), -1..=6);
//! assert_eq!(range.rows(), -1..=5);
//! assert_eq!(range.len(), 56);
//! ```
//!
//! Cell `(col, row)` covers the world rectangle
//! `[col * tile, (col + 1) * tile) x [row * tile, (row + 1) * tile)`.

mod coord;
mod needed;
mod spec;

pub use coord::{GridCoord, GridRange, GridRangeIter};
pub use needed::{needed_coords, needed_range};
pub use spec::{BufferPolicy, GridSpec};
