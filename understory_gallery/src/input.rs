// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Active touch points, in screen space. Only the first two are used.
pub type Touches = SmallVec<[Point; 2]>;

/// Arrow keys that pan the camera by a fixed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    /// Pan towards negative x.
    Left,
    /// Pan towards positive x.
    Right,
    /// Pan towards negative y.
    Up,
    /// Pan towards positive y.
    Down,
}

impl ArrowKey {
    /// Unit direction of the camera motion.
    #[must_use]
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Host input, already translated into screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed.
    PointerDown(Point),
    /// Pointer moved; ignored unless pressed.
    PointerMove(Point),
    /// Primary pointer released.
    PointerUp,
    /// Touches after a finger landed.
    TouchStart(Touches),
    /// Touches after a finger moved.
    TouchMove(Touches),
    /// Touches remaining after a finger lifted.
    TouchEnd(Touches),
    /// Wheel or trackpad scroll.
    Wheel {
        /// Scroll delta in screen pixels.
        delta: Vec2,
        /// Cursor position.
        position: Point,
        /// Ctrl/meta held: zoom about `position` instead of panning.
        zoom_modifier: bool,
    },
    /// Arrow key pressed.
    Key(ArrowKey),
    /// Full contents of the search field after an edit.
    TextInput(String),
}
