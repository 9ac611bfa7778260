// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use understory_camera::Camera;

use crate::spec::floor_index;
use crate::{GridCoord, GridRange, GridSpec};

/// Cells that must be materialized for `camera` looking at a screen of
/// `screen` pixels.
///
/// The visible world rectangle is grown by the buffer rings on every side:
/// `[x - b*t, x + w/scale + b*t] x [y - b*t, y + h/scale + b*t]`, and each
/// edge is floored to a cell index. Must be recomputed after every camera
/// mutation and resize.
///
/// An invalid spec or a non-finite camera yields [`GridRange::EMPTY`].
#[must_use]
pub fn needed_range(camera: &Camera, screen: Size, spec: &GridSpec) -> GridRange {
    if !spec.is_valid() {
        return GridRange::EMPTY;
    }
    let tile = spec.tile_size;
    let buffer = f64::from(spec.buffer.rings(camera.scale())) * tile;
    let visible = camera.visible_world_rect(screen).inflate(buffer, buffer);
    if !visible.is_finite() {
        return GridRange::EMPTY;
    }
    GridRange::new(
        floor_index(visible.x0 / tile)..=floor_index(visible.x1 / tile),
        floor_index(visible.y0 / tile)..=floor_index(visible.y1 / tile),
    )
}

/// Like [`needed_range`], collected into row-major coordinates.
#[must_use]
pub fn needed_coords(camera: &Camera, screen: Size, spec: &GridSpec) -> Vec<GridCoord> {
    needed_range(camera, screen, spec).iter().collect()
}
