// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::Rect;
use understory_camera::Camera;
use understory_media_catalog::{ContentItem, ContentProvider, SpawnRequest};
use understory_tile_grid::{GridCoord, GridRange, GridSpec};

use crate::TileRenderer;

/// A live tile: one grid cell with content and a render handle.
#[derive(Debug)]
pub struct Tile<H> {
    coord: GridCoord,
    content: Arc<ContentItem>,
    pub(crate) handle: H,
    pub(crate) attached: bool,
    pub(crate) screen_rect: Rect,
}

impl<H> Tile<H> {
    /// The cell this tile occupies.
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// The content shown by this tile.
    #[must_use]
    pub fn content(&self) -> &Arc<ContentItem> {
        &self.content
    }

    /// The host render handle.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Whether the media payload is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Screen rect as of the last spawn or reposition.
    #[must_use]
    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }
}

/// Counts from one [`TileManager::reconcile`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Tiles created.
    pub spawned: usize,
    /// Tiles destroyed because they left the range.
    pub destroyed: usize,
    /// Cells left empty because the provider had nothing to give.
    pub unfilled: usize,
    /// Live tiles after the pass.
    pub live: usize,
}

impl ReconcileStats {
    /// Whether the pass changed anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.spawned == 0 && self.destroyed == 0
    }
}

/// Snapshot of manager state for overlays and logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileManagerDebugInfo {
    /// Live tiles.
    pub live: usize,
    /// Live tiles with an attached payload.
    pub attached: usize,
    /// Tiles waiting for their enter transition.
    pub pending_enter: usize,
}

/// Owns the live tiles, keyed by grid coordinate.
///
/// At most one tile exists per coordinate. After [`TileManager::reconcile`]
/// every live coordinate lies inside the range passed in, and every cell of
/// the range is live unless the provider returned nothing for it.
#[derive(Debug)]
pub struct TileManager<H> {
    tiles: HashMap<GridCoord, Tile<H>>,
    pending_enter: Vec<GridCoord>,
}

impl<H> Default for TileManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TileManager<H> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            pending_enter: Vec::new(),
        }
    }

    /// Number of live tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile at `coord`, if live.
    #[must_use]
    pub fn tile_at(&self, coord: GridCoord) -> Option<&Tile<H>> {
        self.tiles.get(&coord)
    }

    /// Live coordinates in arbitrary order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.tiles.keys().copied()
    }

    /// Live tiles in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile<H>> + '_ {
        self.tiles.values()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile<H>> + '_ {
        self.tiles.values_mut()
    }

    /// Brings the live set in line with `range`.
    ///
    /// Missing cells are spawned in row-major order; each asks `provider` for
    /// content with the cell's ordinal in `range`. A `None` leaves the cell
    /// empty until the next pass. Spawned tiles start detached and get their
    /// enter transition on the next [`TileManager::flush_enter_transitions`].
    /// Every live tile outside `range` is then destroyed.
    pub fn reconcile<P, R>(
        &mut self,
        range: &GridRange,
        camera: &Camera,
        spec: &GridSpec,
        provider: &mut P,
        renderer: &mut R,
    ) -> ReconcileStats
    where
        P: ContentProvider + ?Sized,
        R: TileRenderer<Handle = H>,
    {
        let mut stats = ReconcileStats::default();

        for (ordinal, coord) in range.iter().enumerate() {
            if self.tiles.contains_key(&coord) {
                continue;
            }
            let Some(content) = provider.content_for(SpawnRequest::new(coord, ordinal)) else {
                stats.unfilled += 1;
                continue;
            };
            let screen_rect = camera.to_screen_rect(coord.world_rect(spec.tile_size));
            let handle = renderer.create(screen_rect, &content);
            log::trace!("spawn {coord:?} -> {}", content.url());
            self.tiles.insert(
                coord,
                Tile {
                    coord,
                    content,
                    handle,
                    attached: false,
                    screen_rect,
                },
            );
            self.pending_enter.push(coord);
            stats.spawned += 1;
        }

        let stale: Vec<GridCoord> = self
            .tiles
            .keys()
            .copied()
            .filter(|coord| !range.contains(*coord))
            .collect();
        for coord in stale {
            if let Some(tile) = self.tiles.remove(&coord) {
                Self::release(tile, renderer);
                stats.destroyed += 1;
            }
        }

        stats.live = self.tiles.len();
        if !stats.is_noop() {
            log::debug!(
                "reconcile via {}: +{} -{} (unfilled {}), live {}",
                provider.name(),
                stats.spawned,
                stats.destroyed,
                stats.unfilled,
                stats.live
            );
        }
        stats
    }

    /// Runs the enter transition for tiles spawned since the last flush.
    ///
    /// Tiles destroyed in the meantime are skipped. Returns how many entered.
    pub fn flush_enter_transitions<R>(&mut self, renderer: &mut R) -> usize
    where
        R: TileRenderer<Handle = H>,
    {
        let mut entered = 0;
        for coord in self.pending_enter.drain(..) {
            if let Some(tile) = self.tiles.get_mut(&coord) {
                renderer.enter(&mut tile.handle);
                entered += 1;
            }
        }
        entered
    }

    /// Pushes fresh screen rects for every live tile after a camera change.
    pub fn reposition<R>(&mut self, camera: &Camera, spec: &GridSpec, renderer: &mut R)
    where
        R: TileRenderer<Handle = H>,
    {
        for tile in self.tiles.values_mut() {
            let rect = camera.to_screen_rect(tile.coord.world_rect(spec.tile_size));
            tile.screen_rect = rect;
            renderer.set_screen_rect(&mut tile.handle, rect);
        }
    }

    /// Destroys every live tile. Returns how many were destroyed.
    ///
    /// Used when cached layout or content no longer holds: viewport resize,
    /// strategy switch, catalog swap.
    pub fn invalidate_all<R>(&mut self, renderer: &mut R) -> usize
    where
        R: TileRenderer<Handle = H>,
    {
        let count = self.tiles.len();
        for (_, tile) in self.tiles.drain() {
            Self::release(tile, renderer);
        }
        self.pending_enter.clear();
        if count > 0 {
            log::debug!("invalidated {count} tiles");
        }
        count
    }

    /// Snapshot of counts.
    #[must_use]
    pub fn debug_info(&self) -> TileManagerDebugInfo {
        TileManagerDebugInfo {
            live: self.tiles.len(),
            attached: self.tiles.values().filter(|t| t.attached).count(),
            pending_enter: self.pending_enter.len(),
        }
    }

    fn release<R>(mut tile: Tile<H>, renderer: &mut R)
    where
        R: TileRenderer<Handle = H>,
    {
        if tile.attached {
            renderer.detach_payload(&mut tile.handle);
        }
        renderer.destroy(tile.handle);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use kurbo::Rect;
    use understory_media_catalog::{Catalog, ContentItem};

    use crate::TileRenderer;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Call {
        Create(u32, String),
        Destroy(u32),
        Attach(u32),
        Detach(u32),
        Move(u32, Rect),
        Enter(u32),
    }

    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        next: u32,
        pub(crate) calls: Vec<Call>,
    }

    impl Recorder {
        pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    impl TileRenderer for Recorder {
        type Handle = u32;

        fn create(&mut self, _rect: Rect, content: &ContentItem) -> u32 {
            self.next += 1;
            self.calls.push(Call::Create(self.next, content.url().to_owned()));
            self.next
        }

        fn destroy(&mut self, handle: u32) {
            self.calls.push(Call::Destroy(handle));
        }

        fn attach_payload(&mut self, handle: &mut u32, _content: &ContentItem) {
            self.calls.push(Call::Attach(*handle));
        }

        fn detach_payload(&mut self, handle: &mut u32) {
            self.calls.push(Call::Detach(*handle));
        }

        fn set_screen_rect(&mut self, handle: &mut u32, rect: Rect) {
            self.calls.push(Call::Move(*handle, rect));
        }

        fn enter(&mut self, handle: &mut u32) {
            self.calls.push(Call::Enter(*handle));
        }
    }

    pub(crate) fn catalog_of(n: usize) -> Arc<Catalog> {
        Arc::new(Catalog::from_items(
            (0..n).map(|i| ContentItem::new(format!("{i}.webp")).unwrap()),
        ))
    }
}
