// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use understory_media_catalog::ContentItem;

/// Host side of a tile: whatever actually draws it.
///
/// A handle is created once per spawned tile and handed back exactly once to
/// [`TileRenderer::destroy`]. Payload calls arrive in strict attach/detach
/// alternation, starting detached.
pub trait TileRenderer {
    /// Opaque per-tile render state.
    type Handle;

    /// Creates the lightweight placeholder for a tile at `rect` (screen space).
    ///
    /// No heavy payload is loaded yet.
    fn create(&mut self, rect: Rect, content: &ContentItem) -> Self::Handle;

    /// Releases a tile. The handle is not used again.
    fn destroy(&mut self, handle: Self::Handle);

    /// Starts loading the media payload (image pixels, video playback).
    fn attach_payload(&mut self, handle: &mut Self::Handle, content: &ContentItem);

    /// Releases the media payload, keeping the placeholder.
    fn detach_payload(&mut self, handle: &mut Self::Handle);

    /// Moves the tile to a new screen rect after the camera changed.
    fn set_screen_rect(&mut self, handle: &mut Self::Handle, rect: Rect);

    /// Starts the enter (fade-in) transition. Called once, one tick after creation.
    fn enter(&mut self, handle: &mut Self::Handle) {
        let _ = handle;
    }
}
