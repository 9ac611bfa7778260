// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::GridCoord;

/// How many rings of extra tiles to materialize around the visible area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferPolicy {
    /// Always `n` rings.
    Fixed(u32),
    /// `ceil(n * max(scale, 1))` rings, so prefetch distance in world units
    /// keeps pace with the tile size on screen at high zoom.
    ScaleWithZoom(u32),
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl BufferPolicy {
    /// Number of buffer rings at the given camera scale.
    #[must_use]
    pub fn rings(self, scale: f64) -> u32 {
        match self {
            Self::Fixed(n) => n,
            Self::ScaleWithZoom(n) => {
                let rings = (f64::from(n) * scale.max(1.0)).ceil();
                if rings.is_finite() && rings < f64::from(u32::MAX) {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "Checked finite, non-negative and below u32::MAX above"
                    )]
                    {
                        rings as u32
                    }
                } else {
                    n
                }
            }
        }
    }
}

/// Geometry of the tile grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Edge length of a square tile in world units.
    pub tile_size: f64,
    /// Prefetch rings beyond the visible area.
    pub buffer: BufferPolicy,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(150.0, 1)
    }
}

impl GridSpec {
    /// Creates a spec with a fixed number of buffer rings.
    #[must_use]
    pub fn new(tile_size: f64, buffer_tiles: u32) -> Self {
        Self {
            tile_size,
            buffer: BufferPolicy::Fixed(buffer_tiles),
        }
    }

    /// Returns `true` if the tile size is finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.tile_size.is_finite() && self.tile_size > 0.0
    }

    /// Cell containing the world point `world`.
    ///
    /// Returns `None` for an invalid spec or a non-finite point.
    #[must_use]
    pub fn coord_at(&self, world: Point) -> Option<GridCoord> {
        if !self.is_valid() || !world.is_finite() {
            return None;
        }
        Some(GridCoord::new(
            floor_index(world.x / self.tile_size),
            floor_index(world.y / self.tile_size),
        ))
    }
}

/// Floors `value` and converts it to a cell index.
pub(crate) fn floor_index(value: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Saturating conversion; callers only pass finite values"
    )]
    {
        value.floor() as i64
    }
}
