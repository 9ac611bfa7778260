// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracker: per-sample pointer deltas.

use kurbo::{Point, Vec2};

/// Tracks the pointer positions of an active drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragTracker {
    /// Position where the drag began.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position.
    pub last_pos: Option<Point>,
}

impl DragTracker {
    /// Starts a new drag at `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the delta since the previous sample.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
