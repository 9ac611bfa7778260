// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;
use std::sync::Arc;

use kurbo::{Point, Size};
use understory_camera::{Camera, CameraDebugInfo, PinchGesture};
use understory_media_catalog::{
    Catalog, CatalogError, ContentItem, ContentProvider, Ranked, StrategyKind, build_provider,
};
use understory_momentum::{MomentumIntegrator, MomentumPhase};
use understory_semantic_search::{
    EmbeddingService, QueryAction, QueryGate, SearchError, SearchOutcome, SearchResponse,
    SearchTicket, SearchWorker, rank,
};
use understory_tile_grid::{GridRange, GridSpec, needed_range};
use understory_tile_lifecycle::{
    LazyLoadGate, LoadStats, ReconcileStats, TileManager, TileManagerDebugInfo, TileRenderer,
};

use crate::{ConfigError, GalleryConfig, GalleryStatus, InputEvent, SearchStatus, Touches};

/// What one [`GalleryEngine::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Enter transitions started for tiles spawned last tick.
    pub entered: usize,
    /// Whether momentum moved the camera.
    pub coasted: bool,
    /// Whether the needed range was recomputed and reconciled.
    pub rebuilt: bool,
    /// Reconciliation counts (zero when not rebuilt).
    pub reconcile: ReconcileStats,
    /// Payload gate counts.
    pub loads: LoadStats,
}

/// Snapshot of engine state for overlays and logs.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryDebugInfo {
    /// Camera state.
    pub camera: CameraDebugInfo,
    /// Needed range at the current camera.
    pub needed: GridRange,
    /// Tile counts.
    pub tiles: TileManagerDebugInfo,
    /// Momentum phase.
    pub momentum: MomentumPhase,
    /// Name of the active content provider.
    pub provider: &'static str,
    /// Gallery status.
    pub status: GalleryStatus,
    /// Search status.
    pub search: SearchStatus,
    /// Engine clock.
    pub clock: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TouchMode {
    None,
    Pan,
    Pinch,
}

/// The gallery: one owner for camera, tiles, content and search state.
///
/// Hosts forward input through [`GalleryEngine::handle_input`] and call
/// [`GalleryEngine::tick`] once per frame. Each tick runs, in order: pending
/// enter transitions, the engine clock, the search debouncer and worker
/// responses, momentum, grid recompute and reconciliation when anything
/// changed, repositioning, and the lazy-load gate.
///
/// Catalog loading and embedding happen elsewhere; their results come back
/// through [`GalleryEngine::set_catalog`] and the search worker, and are
/// picked up on the next tick.
pub struct GalleryEngine<R: TileRenderer> {
    config: GalleryConfig,
    spec: GridSpec,
    screen: Size,
    camera: Camera,
    momentum: MomentumIntegrator,
    pinch: PinchGesture,
    touch: TouchMode,
    catalog: Arc<Catalog>,
    provider: Box<dyn ContentProvider>,
    ranked: bool,
    query_embedding: Option<Vec<f32>>,
    tiles: TileManager<R::Handle>,
    lazy: LazyLoadGate,
    gate: QueryGate,
    worker: Option<SearchWorker>,
    renderer: R,
    clock: Duration,
    dirty: bool,
    status: GalleryStatus,
    search: SearchStatus,
}

impl<R: TileRenderer> fmt::Debug for GalleryEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryEngine")
            .field("screen", &self.screen)
            .field("camera", &self.camera)
            .field("provider", &self.provider.name())
            .field("tiles", &self.tiles.len())
            .field("status", &self.status)
            .field("search", &self.search)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<R: TileRenderer> GalleryEngine<R> {
    /// Creates an engine with no catalog yet ([`GalleryStatus::Loading`]).
    pub fn new(config: GalleryConfig, renderer: R, screen: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = Arc::new(Catalog::empty());
        Ok(Self {
            spec: config.grid_spec(),
            screen,
            camera: Camera::with_limits(config.scale_limits()),
            momentum: MomentumIntegrator::new(config.momentum_config()),
            pinch: PinchGesture::default(),
            touch: TouchMode::None,
            provider: build_provider(config.strategy, catalog.clone(), config.seed),
            catalog,
            ranked: false,
            query_embedding: None,
            tiles: TileManager::new(),
            lazy: config.lazy_load_gate(),
            gate: config.query_gate(),
            worker: None,
            renderer,
            clock: Duration::ZERO,
            dirty: true,
            status: GalleryStatus::Loading,
            search: SearchStatus::Inactive,
            config,
        })
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access. Marks the view dirty.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.dirty = true;
        &mut self.camera
    }

    /// Viewport size in screen pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Live tiles.
    #[must_use]
    pub fn tiles(&self) -> &TileManager<R::Handle> {
        &self.tiles
    }

    /// The host renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the host renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The current catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Gallery status.
    #[must_use]
    pub fn status(&self) -> &GalleryStatus {
        &self.status
    }

    /// Search status.
    #[must_use]
    pub fn search_status(&self) -> &SearchStatus {
        &self.search
    }

    /// The search debouncer.
    #[must_use]
    pub fn query_gate(&self) -> &QueryGate {
        &self.gate
    }

    /// Ticket of the most recently issued search action.
    #[must_use]
    pub fn latest_search_ticket(&self) -> Option<SearchTicket> {
        self.gate.latest_ticket()
    }

    /// Engine clock: the sum of every `dt` passed to [`GalleryEngine::tick`].
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Momentum phase.
    #[must_use]
    pub fn momentum_phase(&self) -> MomentumPhase {
        self.momentum.phase()
    }

    /// Cells the current camera needs.
    #[must_use]
    pub fn needed_range(&self) -> GridRange {
        needed_range(&self.camera, self.screen, &self.spec)
    }

    /// Replaces the catalog.
    ///
    /// Every live tile is destroyed and the gallery is rebuilt on the next
    /// tick. An active search is ranked again against the new items.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Arc::new(catalog);
        self.status = if self.catalog.is_empty() {
            GalleryStatus::Empty
        } else {
            GalleryStatus::Ready
        };
        log::info!(
            "catalog set: {} items ({} skipped)",
            self.catalog.len(),
            self.catalog.skipped()
        );
        match self.query_embedding.take() {
            Some(embedding) => self.apply_embedding(embedding),
            None => self.use_unranked(),
        }
    }

    /// Records a failed catalog load: the gallery empties and reports why.
    pub fn set_catalog_error(&mut self, error: &CatalogError) {
        log::warn!("catalog unavailable: {error}");
        self.catalog = Arc::new(Catalog::empty());
        self.query_embedding = None;
        self.status = GalleryStatus::CatalogUnavailable(error.to_string());
        self.use_unranked();
    }

    /// Feeds the result of a catalog load.
    pub fn load_catalog(&mut self, result: Result<Catalog, CatalogError>) {
        match result {
            Ok(catalog) => self.set_catalog(catalog),
            Err(err) => self.set_catalog_error(&err),
        }
    }

    /// Switches the unranked strategy.
    ///
    /// Takes effect immediately unless ranked results are shown, in which
    /// case it applies when the search is cleared.
    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        if self.config.strategy == strategy {
            return;
        }
        self.config.strategy = strategy;
        if !self.ranked {
            self.use_unranked();
        }
    }

    /// Installs the background worker that embeds submitted queries.
    pub fn set_search_worker(&mut self, worker: SearchWorker) {
        self.worker = Some(worker);
    }

    /// Starts a [`SearchWorker`] for `service` with the configured thread count.
    pub fn connect_embedding_service(
        &mut self,
        service: Arc<dyn EmbeddingService>,
    ) -> Result<(), SearchError> {
        let worker = SearchWorker::spawn(service, self.config.search.worker_threads)?;
        self.set_search_worker(worker);
        Ok(())
    }

    /// Changes the viewport size. Every live tile is rebuilt.
    pub fn resize(&mut self, screen: Size) {
        if self.screen == screen {
            return;
        }
        log::debug!("resize {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        self.rebuild();
    }

    /// Starts the pooled strategy over with a fresh shuffle.
    ///
    /// Live tiles keep their content; cells left empty by an exhausted pool
    /// fill on the next tick. Does nothing while ranked results are shown.
    pub fn refill_pool(&mut self) {
        if self.ranked {
            return;
        }
        self.provider.reset();
        self.dirty = true;
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(pos) => self.momentum.press(pos),
            InputEvent::PointerMove(pos) => {
                if self.momentum.drag_to(pos, &mut self.camera) {
                    self.dirty = true;
                }
            }
            InputEvent::PointerUp => self.momentum.release(),
            InputEvent::TouchStart(touches) => self.touch_start(&touches),
            InputEvent::TouchMove(touches) => self.touch_move(&touches),
            InputEvent::TouchEnd(remaining) => self.touch_end(&remaining),
            InputEvent::Wheel {
                delta,
                position,
                zoom_modifier,
            } => {
                if zoom_modifier {
                    let factor = if delta.y < 0.0 {
                        self.config.wheel_zoom_in
                    } else {
                        self.config.wheel_zoom_out
                    };
                    self.camera.zoom_about_screen_point(position, factor);
                } else {
                    self.camera.pan_by_screen(delta);
                }
                self.dirty = true;
            }
            InputEvent::Key(key) => {
                self.camera
                    .pan_by_screen(key.direction() * self.config.keyboard_step);
                self.dirty = true;
            }
            InputEvent::TextInput(text) => self.gate.input(&text, self.clock),
        }
    }

    fn touch_start(&mut self, touches: &Touches) {
        match touches.as_slice() {
            [] => {}
            [only] => {
                self.pinch.end();
                self.momentum.press(*only);
                self.touch = TouchMode::Pan;
            }
            [a, b, ..] => {
                self.momentum.stop();
                self.touch = if self.pinch.begin(*a, *b, self.camera.scale()) {
                    TouchMode::Pinch
                } else {
                    TouchMode::None
                };
            }
        }
    }

    fn touch_move(&mut self, touches: &Touches) {
        let moved = match (self.touch, touches.as_slice()) {
            (TouchMode::Pan, [only]) => self.momentum.drag_to(*only, &mut self.camera),
            (TouchMode::Pinch, [a, b, ..]) => self.pinch.update(*a, *b, &mut self.camera),
            _ => false,
        };
        if moved {
            self.dirty = true;
        }
    }

    fn touch_end(&mut self, remaining: &Touches) {
        match (self.touch, remaining.as_slice()) {
            (TouchMode::Pinch, [only]) => {
                // Pinch down to one finger: continue as a pan without a fling.
                self.pinch.end();
                self.momentum.press(*only);
                self.touch = TouchMode::Pan;
            }
            (TouchMode::Pinch, []) => {
                self.pinch.end();
                self.touch = TouchMode::None;
            }
            (TouchMode::Pan, []) => {
                self.momentum.release();
                self.touch = TouchMode::None;
            }
            _ => {}
        }
    }

    /// Advances the engine by `dt`.
    pub fn tick(&mut self, dt: Duration) -> TickStats {
        let mut stats = TickStats {
            entered: self.tiles.flush_enter_transitions(&mut self.renderer),
            ..TickStats::default()
        };
        self.clock += dt;

        if let Some(action) = self.gate.poll(self.clock) {
            self.dispatch(action);
        }
        self.drain_worker();

        if self.momentum.tick(dt, &mut self.camera) {
            stats.coasted = true;
            self.dirty = true;
        }

        if self.dirty {
            self.dirty = false;
            let range = needed_range(&self.camera, self.screen, &self.spec);
            stats.reconcile = self.tiles.reconcile(
                &range,
                &self.camera,
                &self.spec,
                self.provider.as_mut(),
                &mut self.renderer,
            );
            self.tiles
                .reposition(&self.camera, &self.spec, &mut self.renderer);
            stats.rebuilt = true;
        }

        stats.loads = self.lazy.run(
            &mut self.tiles,
            &self.camera,
            &self.spec,
            self.screen,
            &mut self.renderer,
        );
        stats
    }

    fn dispatch(&mut self, action: QueryAction) {
        match action {
            QueryAction::Clear => {
                log::info!("search cleared");
                self.query_embedding = None;
                self.search = SearchStatus::Inactive;
                if self.ranked {
                    self.use_unranked();
                }
            }
            QueryAction::Submit(request) => {
                let Some(worker) = &self.worker else {
                    self.search_unavailable("no embedding service configured".to_owned());
                    return;
                };
                log::info!("search submitted: {:?}", request.text);
                match worker.submit(request) {
                    Ok(()) => self.search = SearchStatus::Pending,
                    Err(err) => self.search_failed(err.to_string()),
                }
            }
        }
    }

    fn drain_worker(&mut self) {
        while let Some(response) = self.worker.as_ref().and_then(SearchWorker::try_recv) {
            self.apply_search_response(response);
        }
    }

    /// Blocks up to `timeout` for one search response and applies it.
    ///
    /// Returns `true` if a response arrived. Meant for headless hosts and
    /// tests; interactive hosts let [`GalleryEngine::tick`] drain responses.
    pub fn wait_for_search(&mut self, timeout: Duration) -> bool {
        let Some(worker) = &self.worker else {
            return false;
        };
        match worker.recv_timeout(timeout) {
            Ok(Some(response)) => {
                self.apply_search_response(response);
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.search_failed(err.to_string());
                false
            }
        }
    }

    /// Applies a finished embedding request.
    ///
    /// Responses to superseded queries are discarded and `false` is
    /// returned. A failure falls back to the unranked view with
    /// [`SearchStatus::Unavailable`]. An embedding is ranked against the
    /// current catalog; the ranked view replaces every live tile.
    pub fn apply_search_response(&mut self, response: SearchResponse) -> bool {
        match self.gate.resolve(response) {
            SearchOutcome::Stale => false,
            SearchOutcome::Failed(err) => {
                self.search_failed(err.to_string());
                true
            }
            SearchOutcome::Embedding(embedding) => {
                self.apply_embedding(embedding);
                true
            }
        }
    }

    fn apply_embedding(&mut self, embedding: Vec<f32>) {
        let results = rank(&embedding, &self.catalog, self.config.search.top_k);
        self.query_embedding = Some(embedding);
        if results.is_empty() {
            log::info!("search ranked nothing; showing the unranked view");
            self.search = SearchStatus::NoMatches;
            self.use_unranked();
            return;
        }
        log::info!(
            "search ranked {} items ({} without embeddings)",
            results.len(),
            results.excluded
        );
        self.search = SearchStatus::Ranked {
            matches: results.len(),
        };
        self.ranked = true;
        self.provider = Box::new(Ranked::from(results));
        self.rebuild();
    }

    /// The embedding service failed for the active query. Settling on the
    /// same text again retries it.
    fn search_failed(&mut self, reason: String) {
        self.gate.forget_active();
        self.search_unavailable(reason);
    }

    /// Falls back to the unranked view. The active query and its ticket are
    /// kept, so a host embedding queries itself can still answer through
    /// [`GalleryEngine::apply_search_response`].
    fn search_unavailable(&mut self, reason: String) {
        log::warn!("search unavailable: {reason}");
        self.query_embedding = None;
        self.search = SearchStatus::Unavailable(reason);
        self.use_unranked();
    }

    /// Rebuilds the unranked provider over the current catalog.
    fn use_unranked(&mut self) {
        self.ranked = false;
        self.provider = build_provider(self.config.strategy, self.catalog.clone(), self.config.seed);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.tiles.invalidate_all(&mut self.renderer);
        self.provider.reset();
        self.dirty = true;
    }

    /// The content of the live tile under a screen point.
    #[must_use]
    pub fn content_at(&self, screen: Point) -> Option<&Arc<ContentItem>> {
        let coord = self.spec.coord_at(self.camera.to_world(screen))?;
        self.tiles.tile_at(coord).map(|tile| tile.content())
    }

    /// The click-through link of the live tile under a screen point.
    #[must_use]
    pub fn link_at(&self, screen: Point) -> Option<&str> {
        self.content_at(screen)?.link()
    }

    /// Snapshot for overlays and logs.
    #[must_use]
    pub fn debug_info(&self) -> GalleryDebugInfo {
        GalleryDebugInfo {
            camera: self.camera.debug_info(self.screen),
            needed: self.needed_range(),
            tiles: self.tiles.debug_info(),
            momentum: self.momentum.phase(),
            provider: self.provider.name(),
            status: self.status.clone(),
            search: self.search.clone(),
            clock: self.clock,
        }
    }
}
