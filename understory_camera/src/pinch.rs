// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch tracking.
//!
//! A pinch remembers the finger distance and camera scale at the moment the
//! second finger lands. Every later sample maps the distance ratio onto a new
//! scale, which is applied about the midpoint of the two fingers:
//!
//! ```
//! use kurbo::Point;
//! use understory_camera::{Camera, PinchGesture};
//!
//! let mut camera = Camera::new();
//! let mut pinch = PinchGesture::default();
//!
//! pinch.begin(Point::new(350.0, 300.0), Point::new(450.0, 300.0), camera.scale());
//! pinch.update(Point::new(300.0, 300.0), Point::new(500.0, 300.0), &mut camera);
//! assert_eq!(camera.scale(), 2.0);
//! ```

use kurbo::Point;

use crate::Camera;

/// Distances below this are treated as a degenerate pinch.
const MIN_PINCH_DISTANCE: f64 = 1e-6;

/// Bookkeeping for an active two-finger pinch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchGesture {
    start: Option<PinchStart>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinchStart {
    distance: f64,
    scale: f64,
}

impl PinchGesture {
    /// Starts a pinch with the two touch points and the current camera scale.
    ///
    /// Returns `false` (and stays inactive) if the fingers are on top of each
    /// other.
    pub fn begin(&mut self, a: Point, b: Point, scale: f64) -> bool {
        let distance = a.distance(b);
        if distance < MIN_PINCH_DISTANCE {
            self.start = None;
            return false;
        }
        self.start = Some(PinchStart { distance, scale });
        true
    }

    /// Feeds new touch positions, zooming `camera` about their midpoint.
    ///
    /// Returns `true` if the camera scale changed.
    pub fn update(&mut self, a: Point, b: Point, camera: &mut Camera) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let distance = a.distance(b);
        if distance < MIN_PINCH_DISTANCE {
            return false;
        }
        let target = start.scale * distance / start.distance;
        camera.set_scale_about_screen_point(a.midpoint(b), target)
    }

    /// Ends the pinch.
    pub fn end(&mut self) {
        self.start = None;
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::PinchGesture;
    use crate::Camera;

    #[test]
    fn pinch_doubles_scale_and_keeps_midpoint() {
        let mut camera = Camera::new();
        let mut pinch = PinchGesture::default();

        let a0 = Point::new(350.0, 250.0);
        let b0 = Point::new(450.0, 250.0);
        assert!(pinch.begin(a0, b0, camera.scale()));

        let midpoint = Point::new(400.0, 250.0);
        let world_before = camera.to_world(midpoint);

        // Distance goes from 100 to 200 around the same midpoint.
        let a1 = Point::new(300.0, 250.0);
        let b1 = Point::new(500.0, 250.0);
        assert!(pinch.update(a1, b1, &mut camera));

        assert_eq!(camera.scale(), 2.0);
        let world_after = camera.to_world(midpoint);
        assert!((world_after - world_before).hypot() < 1e-9);
    }

    #[test]
    fn pinch_is_clamped() {
        let mut camera = Camera::new();
        let mut pinch = PinchGesture::default();
        pinch.begin(Point::new(0.0, 0.0), Point::new(10.0, 0.0), camera.scale());
        pinch.update(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), &mut camera);
        assert_eq!(camera.scale(), 3.0);
    }

    #[test]
    fn degenerate_start_is_ignored() {
        let mut camera = Camera::new();
        let mut pinch = PinchGesture::default();
        let p = Point::new(5.0, 5.0);
        assert!(!pinch.begin(p, p, camera.scale()));
        assert!(!pinch.is_active());
        assert!(!pinch.update(p, Point::new(50.0, 5.0), &mut camera));
        assert_eq!(camera.scale(), 1.0);
    }

    #[test]
    fn end_deactivates() {
        let mut pinch = PinchGesture::default();
        pinch.begin(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0);
        assert!(pinch.is_active());
        pinch.end();
        assert!(!pinch.is_active());
    }
}
