// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_tile_lifecycle` crate.
//!
//! These drive a camera through long pan/zoom sequences and check that the
//! live tile set never drifts from the needed range and that every created
//! handle is destroyed exactly once.

use std::collections::BTreeSet;
use std::sync::Arc;

use kurbo::{Point, Rect, Size, Vec2};
use understory_camera::Camera;
use understory_media_catalog::{Catalog, ContentItem, SpatialHash, UniformRandom};
use understory_tile_grid::{GridCoord, GridSpec, needed_range};
use understory_tile_lifecycle::{LazyLoadGate, TileManager, TileRenderer};

/// Tracks which handles are alive and which hold a payload.
#[derive(Debug, Default)]
struct Ledger {
    next: u64,
    alive: BTreeSet<u64>,
    attached: BTreeSet<u64>,
    created: usize,
    destroyed: usize,
}

impl TileRenderer for Ledger {
    type Handle = u64;

    fn create(&mut self, _rect: Rect, _content: &ContentItem) -> u64 {
        self.next += 1;
        self.created += 1;
        assert!(self.alive.insert(self.next), "handle reused");
        self.next
    }

    fn destroy(&mut self, handle: u64) {
        assert!(self.alive.remove(&handle), "double destroy of {handle}");
        assert!(!self.attached.contains(&handle), "destroyed while attached");
        self.destroyed += 1;
    }

    fn attach_payload(&mut self, handle: &mut u64, _content: &ContentItem) {
        assert!(self.attached.insert(*handle), "double attach of {handle}");
    }

    fn detach_payload(&mut self, handle: &mut u64) {
        assert!(self.attached.remove(handle), "detach without attach");
    }

    fn set_screen_rect(&mut self, handle: &mut u64, _rect: Rect) {
        assert!(self.alive.contains(handle), "moved a dead handle");
    }
}

fn catalog(n: usize) -> Arc<Catalog> {
    Arc::new(Catalog::from_items(
        (0..n).map(|i| ContentItem::new(format!("https://cdn.test/{i}.mp4")).unwrap()),
    ))
}

/// Deterministic pan/zoom script: mixes long pans, reversals and zoom steps.
fn script() -> Vec<(Vec2, f64)> {
    let mut steps = Vec::new();
    for i in 0..200_i32 {
        let angle = f64::from(i) * 0.37;
        let speed = 40.0 + f64::from(i % 7) * 35.0;
        let zoom = match i % 23 {
            0 => 1.1,
            11 => 0.9,
            17 => 0.8,
            _ => 1.0,
        };
        steps.push((Vec2::new(angle.cos() * speed, angle.sin() * speed), zoom));
    }
    steps
}

#[test]
fn live_keys_track_needed_range_through_a_sweep() {
    let screen = Size::new(1024.0, 768.0);
    let spec = GridSpec::new(150.0, 1);
    let gate = LazyLoadGate::new(100.0);
    let mut camera = Camera::new();
    let mut provider = SpatialHash::new(catalog(17));
    let mut renderer = Ledger::default();
    let mut tiles = TileManager::new();

    for (pan, zoom) in script() {
        tiles.flush_enter_transitions(&mut renderer);
        camera.pan_by_screen(pan);
        if zoom != 1.0 {
            camera.zoom_about_screen_point(Point::new(512.0, 384.0), zoom);
        }
        let range = needed_range(&camera, screen, &spec);
        tiles.reconcile(&range, &camera, &spec, &mut provider, &mut renderer);
        tiles.reposition(&camera, &spec, &mut renderer);
        gate.run(&mut tiles, &camera, &spec, screen, &mut renderer);

        let live: BTreeSet<GridCoord> = tiles.coords().collect();
        let needed: BTreeSet<GridCoord> = range.iter().collect();
        assert_eq!(live, needed);
        assert_eq!(renderer.alive.len(), tiles.len());
    }

    let remaining = tiles.len();
    assert_eq!(renderer.created - renderer.destroyed, remaining);
    tiles.invalidate_all(&mut renderer);
    assert!(renderer.alive.is_empty());
    assert!(renderer.attached.is_empty());
}

#[test]
fn spatial_hash_restores_content_after_a_round_trip() {
    let screen = Size::new(800.0, 600.0);
    let spec = GridSpec::default();
    let mut camera = Camera::new();
    let mut provider = SpatialHash::new(catalog(9));
    let mut renderer = Ledger::default();
    let mut tiles = TileManager::new();

    let range = needed_range(&camera, screen, &spec);
    tiles.reconcile(&range, &camera, &spec, &mut provider, &mut renderer);
    let before: Vec<(GridCoord, String)> = range
        .iter()
        .map(|c| (c, tiles.tile_at(c).unwrap().content().url().to_owned()))
        .collect();

    // Far enough that nothing survives, then back.
    camera.pan_by_screen(Vec2::new(5_000.0, -3_000.0));
    let away = needed_range(&camera, screen, &spec);
    tiles.reconcile(&away, &camera, &spec, &mut provider, &mut renderer);
    assert!(range.iter().all(|c| tiles.tile_at(c).is_none()));

    camera.pan_by_screen(Vec2::new(-5_000.0, 3_000.0));
    tiles.reconcile(&range, &camera, &spec, &mut provider, &mut renderer);
    for (coord, url) in before {
        assert_eq!(tiles.tile_at(coord).unwrap().content().url(), url);
    }
}

#[test]
fn random_provider_fills_every_cell() {
    let screen = Size::new(640.0, 480.0);
    let spec = GridSpec::new(100.0, 2);
    let camera = Camera::new();
    let mut provider = UniformRandom::new(catalog(3), 5);
    let mut renderer = Ledger::default();
    let mut tiles = TileManager::new();

    let range = needed_range(&camera, screen, &spec);
    let stats = tiles.reconcile(&range, &camera, &spec, &mut provider, &mut renderer);
    assert_eq!(stats.spawned, range.len());
    assert_eq!(stats.unfilled, 0);
}
