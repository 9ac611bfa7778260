// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use understory_camera::Camera;
use understory_tile_grid::GridSpec;

use crate::{TileManager, TileRenderer};

/// Counts from one [`LazyLoadGate::run`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Payloads attached in this pass.
    pub attached: usize,
    /// Payloads detached in this pass.
    pub detached: usize,
    /// Tiles whose payload is attached after the pass.
    pub visible: usize,
}

/// Attaches media payloads only for tiles on screen.
///
/// A tile counts as visible when its screen rect touches the viewport grown
/// by `margin` pixels on every side; edges are inclusive, so a tile sharing
/// only a border with the viewport is visible. A margin of `0.0` is the
/// strict viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LazyLoadGate {
    /// Extra screen pixels around the viewport that still count as visible.
    pub margin: f64,
}

impl LazyLoadGate {
    /// Creates a gate with the given margin. Negative margins clamp to `0.0`.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        Self {
            margin: margin.max(0.0),
        }
    }

    /// The viewport rect tested against, in screen space.
    #[must_use]
    pub fn viewport(&self, screen: Size) -> Rect {
        Rect::new(
            -self.margin,
            -self.margin,
            screen.width + self.margin,
            screen.height + self.margin,
        )
    }

    /// Attaches payloads for tiles that became visible and detaches those that
    /// left. Running it twice without a camera change does nothing the second time.
    pub fn run<H, R>(
        &self,
        tiles: &mut TileManager<H>,
        camera: &Camera,
        spec: &GridSpec,
        screen: Size,
        renderer: &mut R,
    ) -> LoadStats
    where
        R: TileRenderer<Handle = H>,
    {
        let viewport = self.viewport(screen);
        let mut stats = LoadStats::default();
        for tile in tiles.tiles_mut() {
            let rect = camera.to_screen_rect(tile.coord().world_rect(spec.tile_size));
            let visible = touches(rect, viewport);
            if visible && !tile.attached {
                let content = tile.content().clone();
                renderer.attach_payload(&mut tile.handle, &content);
                tile.attached = true;
                stats.attached += 1;
            } else if !visible && tile.attached {
                renderer.detach_payload(&mut tile.handle);
                tile.attached = false;
                stats.detached += 1;
            }
            if tile.attached {
                stats.visible += 1;
            }
        }
        if stats.attached + stats.detached > 0 {
            log::trace!(
                "lazy load: +{} -{}, {} attached",
                stats.attached,
                stats.detached,
                stats.visible
            );
        }
        stats
    }
}

fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}
