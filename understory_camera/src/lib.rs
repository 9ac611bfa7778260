// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_camera --heading-base-level=0

//! Understory Camera: camera state for infinite, pannable 2D surfaces.
//!
//! This crate provides a small, headless model of a camera looking at an
//! unbounded world plane. Unlike a viewport that fits a bounded document, the
//! camera here has no world bounds: it is a position (the world point shown at
//! the top-left corner of the screen) plus a uniform zoom `scale`.
//!
//! - [`Camera`]: position + clamped scale, with world/screen conversions.
//! - [`ScaleLimits`]: the inclusive zoom range the camera clamps into.
//! - [`PinchGesture`]: two-finger pinch bookkeeping that drives
//!   [`Camera::set_scale_about_screen_point`].
//!
//! The transforms are:
//!
//! - `to_screen(world) = (world - position) * scale`
//! - `to_world(screen) = screen / scale + position`
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_camera::Camera;
//!
//! let mut camera = Camera::new();
//!
//! // Zoom in around the cursor; the world point under it stays put.
//! let cursor = Point::new(400.0, 300.0);
//! let before = camera.to_world(cursor);
//! camera.zoom_about_screen_point(cursor, 2.0);
//! let after = camera.to_world(cursor);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Which part of the world is on screen?
//! let visible = camera.visible_world_rect(Size::new(800.0, 600.0));
//! assert_eq!(visible.width(), 400.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom changes are clamped **before** the new position is solved, so the
//!   anchor invariant also holds when a gesture runs into the clamp.
//! - The camera does not own input state. Drag tracking and inertia live in
//!   `understory_momentum`; this crate only exposes the mutations.

mod camera;
mod pinch;

pub use camera::{Camera, CameraDebugInfo, ScaleLimits};
pub use pinch::PinchGesture;
