// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Point, Vec2};
use understory_camera::Camera;

use crate::DragTracker;

/// Tuning for [`MomentumIntegrator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    /// Fraction of velocity kept per reference frame, in `(0, 1)`.
    pub damping: f64,
    /// Speed (screen pixels per reference frame) below which coasting stops.
    pub epsilon: f64,
    /// Frame duration the velocity is expressed against.
    pub reference_frame: Duration,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            damping: 0.95,
            epsilon: 0.1,
            reference_frame: Duration::from_nanos(16_666_667),
        }
    }
}

/// Phase of the momentum state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MomentumPhase {
    /// No pointer is down and the camera is at rest.
    #[default]
    Idle,
    /// A pointer is down; samples move the camera directly.
    Dragging,
    /// The pointer was released; velocity decays every tick.
    Coasting,
}

/// Converts pointer samples into camera motion with inertia.
///
/// Velocity is stored as camera motion in screen pixels per reference
/// frame. Dragging the pointer left moves the camera right, so content
/// follows the pointer.
#[derive(Clone, Debug, Default)]
pub struct MomentumIntegrator {
    config: MomentumConfig,
    phase: MomentumPhase,
    velocity: Vec2,
    drag: DragTracker,
}

impl MomentumIntegrator {
    /// Creates an idle integrator.
    #[must_use]
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            config,
            phase: MomentumPhase::Idle,
            velocity: Vec2::ZERO,
            drag: DragTracker::default(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> MomentumConfig {
        self.config
    }

    /// Replaces the configuration. Does not affect the current velocity.
    pub fn set_config(&mut self, config: MomentumConfig) {
        self.config = config;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MomentumPhase {
        self.phase
    }

    /// Current velocity in screen pixels per reference frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Pointer pressed at `pos`.
    ///
    /// Any in-flight coast is cancelled immediately and the velocity reset.
    pub fn press(&mut self, pos: Point) {
        self.drag.start(pos);
        self.velocity = Vec2::ZERO;
        self.phase = MomentumPhase::Dragging;
    }

    /// Pointer moved to `pos` while pressed.
    ///
    /// Pans `camera` opposite to the pointer delta and records that motion as
    /// the velocity. Returns `true` if the camera moved.
    pub fn drag_to(&mut self, pos: Point, camera: &mut Camera) -> bool {
        if self.phase != MomentumPhase::Dragging {
            return false;
        }
        let Some(delta) = self.drag.update(pos) else {
            return false;
        };
        let motion = -delta;
        self.velocity = motion;
        camera.pan_by_screen(motion);
        motion != Vec2::ZERO
    }

    /// Pointer released. Starts coasting if there is enough velocity.
    pub fn release(&mut self) {
        if self.phase != MomentumPhase::Dragging {
            return;
        }
        self.drag.end();
        if self.velocity.hypot() < self.config.epsilon {
            self.stop();
        } else {
            self.phase = MomentumPhase::Coasting;
        }
    }

    /// Drops all motion and returns to [`MomentumPhase::Idle`].
    pub fn stop(&mut self) {
        self.drag.end();
        self.velocity = Vec2::ZERO;
        self.phase = MomentumPhase::Idle;
    }

    /// Advances coasting by `dt`.
    ///
    /// Moves the camera by `velocity * dt / reference_frame` (converted to
    /// world units by the camera scale) and decays the velocity by
    /// `damping ^ (dt / reference_frame)`. Returns `true` if the camera moved.
    pub fn tick(&mut self, dt: Duration, camera: &mut Camera) -> bool {
        if self.phase != MomentumPhase::Coasting {
            return false;
        }
        let frames = self.frames(dt);
        if frames <= 0.0 {
            return false;
        }
        camera.pan_by_screen(self.velocity * frames);
        self.velocity *= self.config.damping.powf(frames);
        if self.velocity.hypot() < self.config.epsilon {
            self.velocity = Vec2::ZERO;
            self.phase = MomentumPhase::Idle;
        }
        true
    }

    fn frames(&self, dt: Duration) -> f64 {
        let reference = self.config.reference_frame.as_secs_f64();
        if reference <= 0.0 {
            return 1.0;
        }
        dt.as_secs_f64() / reference
    }
}
