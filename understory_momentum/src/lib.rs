// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_momentum --heading-base-level=0

//! Understory Momentum: drag tracking and inertia for camera panning.
//!
//! Pointer and touch input arrive as discrete samples. This crate turns them
//! into camera motion in two phases:
//!
//! - **Dragging**: every pointer sample pans the camera by the sample delta
//!   and records that delta as the current velocity.
//! - **Coasting**: after release, each tick moves the camera by the velocity
//!   and multiplies the velocity by a damping factor. Once the speed falls
//!   below `epsilon` it snaps to exactly zero.
//!
//! Tick durations are normalized by a reference frame (1/60 s by default) so
//! that coasting covers the same distance regardless of the host refresh
//! rate.
//!
//! - [`DragTracker`]: start/update/end bookkeeping for raw pointer positions.
//! - [`MomentumIntegrator`]: the two-phase state machine above.
//! - [`MomentumConfig`]: damping, epsilon and reference frame duration.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_camera::Camera;
//! use understory_momentum::{MomentumConfig, MomentumIntegrator, MomentumPhase};
//!
//! let mut camera = Camera::new();
//! let mut momentum = MomentumIntegrator::new(MomentumConfig::default());
//!
//! momentum.press(Point::new(100.0, 100.0));
//! momentum.drag_to(Point::new(80.0, 100.0), &mut camera);
//! momentum.release();
//! assert_eq!(momentum.phase(), MomentumPhase::Coasting);
//!
//! // The host calls tick once per frame.
//! while momentum.tick(Duration::from_millis(16), &mut camera) {}
//! assert_eq!(momentum.phase(), MomentumPhase::Idle);
//! assert!(camera.position().x > 20.0);
//! ```

mod drag;
mod integrator;

pub use drag::DragTracker;
pub use integrator::{MomentumConfig, MomentumIntegrator, MomentumPhase};
