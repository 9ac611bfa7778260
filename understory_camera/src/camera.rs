// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// Inclusive range of zoom factors a [`Camera`] may use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    /// Smallest allowed scale (most zoomed out).
    pub min: f64,
    /// Largest allowed scale (most zoomed in).
    pub max: f64,
}

impl ScaleLimits {
    /// Creates a range, swapping the bounds if they are given in reverse.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps `scale` into the range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.5, max: 3.0 }
    }
}

/// Camera over an unbounded world plane.
///
/// `position` is the world point drawn at the screen origin and `scale` is
/// the number of screen pixels per world unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Point,
    scale: f64,
    limits: ScaleLimits,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera at the world origin with scale `1.0` and the default
    /// `[0.5, 3.0]` limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: 1.0,
            limits: ScaleLimits::default(),
        }
    }

    /// Creates a camera with explicit limits. The initial scale is `1.0`
    /// clamped into `limits`.
    #[must_use]
    pub fn with_limits(limits: ScaleLimits) -> Self {
        Self {
            position: Point::ORIGIN,
            scale: limits.clamp(1.0),
            limits,
        }
    }

    /// World point shown at the screen origin.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current zoom limits.
    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Moves the camera so that `position` is shown at the screen origin.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Replaces the zoom limits and re-clamps the current scale.
    ///
    /// The scale is clamped about the screen origin, which keeps `position`
    /// unchanged.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        self.limits = ScaleLimits::new(min, max);
        self.scale = self.limits.clamp(self.scale);
    }

    /// Sets the scale about the screen origin, clamping into the limits.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.scale = self.limits.clamp(scale);
    }

    /// Converts a world point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        ((world - self.position) * self.scale).to_point()
    }

    /// Converts a screen point to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        self.position + screen.to_vec2() / self.scale
    }

    /// Converts a world rectangle to screen coordinates.
    #[must_use]
    pub fn to_screen_rect(&self, world: Rect) -> Rect {
        Rect::from_points(
            self.to_screen(Point::new(world.x0, world.y0)),
            self.to_screen(Point::new(world.x1, world.y1)),
        )
    }

    /// Converts a screen rectangle to world coordinates.
    #[must_use]
    pub fn to_world_rect(&self, screen: Rect) -> Rect {
        Rect::from_points(
            self.to_world(Point::new(screen.x0, screen.y0)),
            self.to_world(Point::new(screen.x1, screen.y1)),
        )
    }

    /// World rectangle covered by a screen of the given size.
    #[must_use]
    pub fn visible_world_rect(&self, screen: Size) -> Rect {
        self.to_world_rect(screen.to_rect())
    }

    /// Pans by a delta expressed in screen pixels.
    ///
    /// A positive delta moves the camera towards positive world coordinates,
    /// so content on screen moves the opposite way.
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.position += delta / self.scale;
    }

    /// Pans by a delta expressed in world units.
    pub fn pan_by_world(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Multiplies the scale by `factor`, keeping the world point under
    /// `anchor` fixed on screen.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.set_scale_about_screen_point(anchor, self.scale * factor);
    }

    /// Sets the scale to `scale` (clamped), keeping the world point under
    /// `anchor` fixed on screen.
    ///
    /// Returns `true` if the scale changed.
    pub fn set_scale_about_screen_point(&mut self, anchor: Point, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        let new_scale = self.limits.clamp(scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        let world = self.to_world(anchor);
        self.scale = new_scale;
        self.position = world - anchor.to_vec2() / new_scale;
        true
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self, screen: Size) -> CameraDebugInfo {
        CameraDebugInfo {
            position: self.position,
            scale: self.scale,
            limits: self.limits,
            visible_world_rect: self.visible_world_rect(screen),
        }
    }
}

/// Debug snapshot of a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraDebugInfo {
    /// World point at the screen origin.
    pub position: Point,
    /// Current zoom factor.
    pub scale: f64,
    /// Zoom limits.
    pub limits: ScaleLimits,
    /// World rectangle visible for the screen size passed to `debug_info`.
    pub visible_world_rect: Rect,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{Camera, ScaleLimits};

    fn assert_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn world_screen_roundtrip() {
        let mut camera = Camera::new();
        camera.set_position(Point::new(-120.0, 35.5));
        camera.set_scale(1.7);

        let world = Point::new(10.0, -5.0);
        assert_close(camera.to_world(camera.to_screen(world)), world);
    }

    #[test]
    fn to_screen_matches_contract() {
        let mut camera = Camera::new();
        camera.set_position(Point::new(100.0, 50.0));
        camera.set_scale(2.0);

        assert_close(
            camera.to_screen(Point::new(110.0, 60.0)),
            Point::new(20.0, 20.0),
        );
        assert_close(
            camera.to_world(Point::new(20.0, 20.0)),
            Point::new(110.0, 60.0),
        );
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        camera.set_position(Point::new(37.0, -12.0));
        let anchor = Point::new(613.0, 211.0);

        for factor in [1.1, 0.9, 1.5, 0.7, 2.0] {
            let before = camera.to_world(anchor);
            camera.zoom_about_screen_point(anchor, factor);
            assert_close(camera.to_world(anchor), before);
        }
    }

    #[test]
    fn clamped_zoom_still_preserves_anchor() {
        let mut camera = Camera::new();
        let anchor = Point::new(300.0, 200.0);
        let before = camera.to_world(anchor);

        // Way past the upper clamp.
        camera.zoom_about_screen_point(anchor, 50.0);
        assert_eq!(camera.scale(), 3.0);
        assert_close(camera.to_world(anchor), before);

        // And below the lower clamp.
        camera.zoom_about_screen_point(anchor, 0.001);
        assert_eq!(camera.scale(), 0.5);
        assert_close(camera.to_world(anchor), before);
    }

    #[test]
    fn zoom_at_limit_is_a_no_op() {
        let mut camera = Camera::new();
        camera.set_scale(3.0);
        let position = camera.position();
        assert!(!camera.set_scale_about_screen_point(Point::new(10.0, 10.0), 4.0));
        assert_eq!(camera.position(), position);
    }

    #[test]
    fn invalid_factors_are_ignored() {
        let mut camera = Camera::new();
        camera.zoom_about_screen_point(Point::ORIGIN, 0.0);
        camera.zoom_about_screen_point(Point::ORIGIN, -2.0);
        camera.zoom_about_screen_point(Point::ORIGIN, f64::NAN);
        assert_eq!(camera.scale(), 1.0);
    }

    #[test]
    fn pan_is_divided_by_scale() {
        let mut camera = Camera::new();
        camera.set_scale(2.0);
        camera.pan_by_screen(Vec2::new(100.0, -50.0));
        assert_close(camera.position(), Point::new(50.0, -25.0));
    }

    #[test]
    fn visible_world_rect_shrinks_with_zoom() {
        let mut camera = Camera::new();
        camera.set_position(Point::new(10.0, 20.0));
        let screen = Size::new(800.0, 600.0);
        assert_eq!(
            camera.visible_world_rect(screen),
            Rect::new(10.0, 20.0, 810.0, 620.0)
        );

        camera.set_scale(2.0);
        assert_eq!(
            camera.visible_world_rect(screen),
            Rect::new(10.0, 20.0, 410.0, 320.0)
        );
    }

    #[test]
    fn limits_are_normalized_and_reclamp() {
        let mut camera = Camera::new();
        camera.set_scale(2.5);
        camera.set_scale_limits(2.0, 0.25);
        assert_eq!(camera.limits(), ScaleLimits::new(0.25, 2.0));
        assert_eq!(camera.scale(), 2.0);

        let info = camera.debug_info(Size::new(100.0, 100.0));
        assert!(info.limits.min <= info.limits.max);
        assert_eq!(info.scale, 2.0);
    }
}
