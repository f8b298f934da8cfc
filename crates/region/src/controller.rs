//! Region-selection controller.
//!
//! Owns the bounds registry and reconciles three inputs against it: map
//! gestures (`handle_event`), explicit API calls (`start_drawing`,
//! `draw_bounds`) and store changes (`on_state_changed`). All entry points
//! are synchronous and run on the host's event loop.
//!
//! A store dispatch issued by the controller runs `on_state_changed` before
//! the dispatching handler returns, so every handler leaves the registry
//! consistent before it dispatches.

use foundation::LatLngBounds;
use runtime::Metrics;
use store::{Action, AppState, BoundsPayload, StateStore};
use tracing::{debug, info};

use crate::appearance;
use crate::config::RegionConfig;
use crate::events::MapEvent;
use crate::geometry::{ratio_exceeds_threshold, region_viewport_ratio};
use crate::lookup::DateRangeLookup;
use crate::map::{MapWidget, OverlayId, ShapeId};
use crate::registry::{BoundsRegistry, Evicted, Rectangle, RegionId};

pub const METRIC_DRAW_COMMITS: &str = "region.draw_commits";
pub const METRIC_EDITS: &str = "region.edits";
pub const METRIC_EVICTED: &str = "region.evicted";
pub const METRIC_DISABLED: &str = "region.disabled";
pub const METRIC_ENABLED: &str = "region.enabled";
pub const METRIC_LOOKUPS: &str = "region.lookups";
pub const METRIC_IGNORED_EVENTS: &str = "region.ignored_events";
pub const GAUGE_REGISTRY_LEN: &str = "region.registry_len";

pub struct RegionController<M, L> {
    map: M,
    lookup: L,
    config: RegionConfig,
    registry: BoundsRegistry,
    handlers_bound: bool,
    shade: Option<OverlayId>,
    metrics: Metrics,
}

impl<M, L> RegionController<M, L>
where
    M: MapWidget,
    L: DateRangeLookup,
{
    pub fn new(map: M, lookup: L, config: RegionConfig) -> Self {
        Self {
            map,
            lookup,
            config,
            registry: BoundsRegistry::new(),
            handlers_bound: false,
            shade: None,
            metrics: Metrics::new(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn registry(&self) -> &BoundsRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn handlers_bound(&self) -> bool {
        self.handlers_bound
    }

    /// Whether the widget is in rectangle draw mode. Read from the map so a
    /// draw the user cancels natively is seen immediately.
    pub fn is_drawing(&self) -> bool {
        self.map.is_drawing()
    }

    pub fn shade(&self) -> Option<OverlayId> {
        self.shade
    }

    /// Current region/viewport ratio of the current rectangle.
    pub fn current_ratio(&self) -> Option<f64> {
        self.registry
            .current()
            .map(|rect| region_viewport_ratio(&rect.bounds, self.map.viewport()))
    }

    /// Starts listening to map events. Returns `false` if already bound.
    pub fn bind_handlers(&mut self) -> bool {
        if self.handlers_bound {
            return false;
        }
        self.handlers_bound = true;
        debug!("region handlers bound");
        true
    }

    /// Enters rectangle draw mode.
    ///
    /// Existing rectangles stay on the map as disabled ghosts. The next
    /// store change or map move settles them like any other rectangle.
    pub fn start_drawing(&mut self) {
        self.bind_handlers();
        for id in self.registry.ids() {
            self.set_disabled(id);
        }
        self.map.start_rectangle();
        self.replace_shade(None);
        info!(ghosts = self.registry.len(), "region drawing started");
    }

    /// Materializes a rectangle from explicit corners, e.g. a restored
    /// selection.
    pub fn draw_bounds<S: StateStore>(&mut self, bounds: LatLngBounds, store: &mut S) -> RegionId {
        let shape = self.map.add_rectangle(bounds);
        self.map.enable_editing(shape);
        self.replace_shade(Some(bounds));
        self.bind_handlers();

        let id = self.register(Rectangle::new(bounds), shape);
        self.persist(&bounds, store);
        self.gate_on_size(id);
        info!(region = %id.0, "region restored from bounds");
        id
    }

    /// Routes a map event. Ignored until handlers are bound.
    pub fn handle_event<S: StateStore>(&mut self, event: MapEvent, store: &mut S) {
        if !self.handlers_bound {
            self.metrics.incr(METRIC_IGNORED_EVENTS);
            debug!(event = event.name(), "map event before handlers were bound");
            return;
        }
        match event {
            MapEvent::DrawingCommit { shape } => self.on_drawing_commit(shape, store),
            MapEvent::VertexDragEnd { shape } | MapEvent::DragEnd { shape } => {
                self.on_shape_edited(shape, store)
            }
            MapEvent::MoveEnd => self.on_map_moved(store.state()),
        }
    }

    fn on_drawing_commit<S: StateStore>(&mut self, shape: ShapeId, store: &mut S) {
        let Some(bounds) = self.map.shape_bounds(shape) else {
            debug!(shape = shape.0.get(), "committed shape is gone");
            return;
        };
        self.metrics.incr(METRIC_DRAW_COMMITS);
        self.request_date_range(&bounds);

        let id = self.register(Rectangle::new(bounds), shape);
        self.persist(&bounds, store);
        self.gate_on_size(id);
        info!(region = %id.0, "region drawn");
    }

    fn on_shape_edited<S: StateStore>(&mut self, shape: ShapeId, store: &mut S) {
        let Some(id) = self.registry.find_by_shape(shape) else {
            debug!(shape = shape.0.get(), "edit on unregistered shape");
            return;
        };
        let Some(bounds) = self.map.shape_bounds(shape) else {
            return;
        };
        if let Some(rect) = self.registry.get_mut(id) {
            rect.bounds = bounds;
        }
        self.metrics.incr(METRIC_EDITS);
        self.persist(&bounds, store);
        self.request_date_range(&bounds);
    }

    /// Size gate after pan/zoom/resize.
    ///
    /// Re-enabling here also requires loading to be finished. When loading
    /// ends later, the store reaction loop does the re-enabling.
    fn on_map_moved(&mut self, state: &AppState) {
        let Some(id) = self.registry.current_id() else {
            return;
        };
        let Some(rect) = self.registry.get(id) else {
            return;
        };
        if self.exceeds_ratio(&rect.bounds) {
            self.set_disabled(id);
        } else if !state.is_loading() {
            self.set_enabled(id);
        }
    }

    /// Store reaction loop. Call on every store change.
    pub fn on_state_changed(&mut self, prev: &AppState, next: &AppState) {
        if prev.is_loading() != next.is_loading() {
            debug!(loading = next.is_loading(), "loading changed");
        }

        // Runs first so a halted draw drops its shade before the appearance pass.
        if !next.in_region_mode() {
            self.halt_drawing();
        }

        if !next.has_region() && !self.registry.is_empty() {
            info!("region cleared from store");
            let evicted = self.registry.remove_all();
            for e in evicted {
                self.detach(e);
            }
            self.update_len_gauge();
        }

        if self.registry.is_empty() {
            return;
        }
        if next.is_loading() {
            for id in self.registry.ids() {
                self.set_disabled(id);
            }
        } else {
            // Oversized rectangles are left as they are.
            for id in self.registry.ids() {
                let fits = self
                    .registry
                    .get(id)
                    .is_some_and(|rect| !self.exceeds_ratio(&rect.bounds));
                if fits {
                    self.set_enabled(id);
                }
            }
        }
    }

    /// Stops native drawing and drops the overlay. No-op when idle.
    fn halt_drawing(&mut self) {
        if self.map.is_drawing() {
            self.map.stop_drawing();
            debug!("region drawing halted");
        }
        if let Some(overlay) = self.shade.take() {
            self.map.remove_overlay(overlay);
        }
    }

    /// Keeps at most one dimming overlay on the map.
    fn replace_shade(&mut self, frame: Option<LatLngBounds>) {
        if let Some(old) = self.shade.take() {
            self.map.remove_overlay(old);
        }
        self.shade = Some(self.map.add_overlay(frame));
    }

    fn register(&mut self, rect: Rectangle, shape: ShapeId) -> RegionId {
        let (id, evicted) = self.registry.add(rect, shape);
        if let Some(e) = evicted {
            self.detach(e);
        }
        self.update_len_gauge();
        id
    }

    fn detach(&mut self, evicted: Evicted) {
        self.map.remove_shape(evicted.shape);
        self.metrics.incr(METRIC_EVICTED);
        debug!(region = %evicted.id.0, "region evicted");
    }

    fn persist<S: StateStore>(&mut self, bounds: &LatLngBounds, store: &mut S) {
        let prev = store.state().clone();
        store.dispatch(Action::SetBounds(BoundsPayload::from_bounds(bounds)));
        self.on_state_changed(&prev, store.state());
    }

    fn request_date_range(&mut self, bounds: &LatLngBounds) {
        self.lookup
            .lookup_date_range(bounds.north_east, bounds.south_west);
        self.metrics.incr(METRIC_LOOKUPS);
    }

    /// Disables a freshly registered rectangle that is already too large.
    fn gate_on_size(&mut self, id: RegionId) {
        let oversized = self
            .registry
            .get(id)
            .is_some_and(|rect| self.exceeds_ratio(&rect.bounds));
        if oversized {
            self.set_disabled(id);
        }
    }

    fn exceeds_ratio(&self, bounds: &LatLngBounds) -> bool {
        ratio_exceeds_threshold(bounds, self.map.viewport(), self.config.pan_map_ratio)
    }

    fn set_disabled(&mut self, id: RegionId) {
        let Some((rect, shape)) = self.registry.entry_mut(id) else {
            return;
        };
        if appearance::disable(&mut self.map, shape, rect) {
            self.metrics.incr(METRIC_DISABLED);
        }
    }

    fn set_enabled(&mut self, id: RegionId) {
        let Some((rect, shape)) = self.registry.entry_mut(id) else {
            return;
        };
        if appearance::enable(&mut self.map, shape, rect) {
            self.metrics.incr(METRIC_ENABLED);
        }
    }

    fn update_len_gauge(&mut self) {
        self.metrics
            .set_gauge(GAUGE_REGISTRY_LEN, self.registry.len() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::{GAUGE_REGISTRY_LEN, METRIC_EVICTED, METRIC_IGNORED_EVENTS, RegionController};
    use crate::appearance::{Appearance, DISABLED_CLASS};
    use crate::config::RegionConfig;
    use crate::events::MapEvent;
    use crate::lookup::RecordingLookup;
    use crate::map::{HeadlessMap, MapWidget, ShapeId};
    use foundation::math::{PixelPoint, PixelSize, Viewport};
    use foundation::{Corner, GeoPoint, LatLngBounds};
    use pretty_assertions::assert_eq;
    use store::{Action, AnalysisMode, AppState, BoundsPayload, StateStore, Store};

    type Controller = RegionController<HeadlessMap, RecordingLookup>;

    fn viewport() -> Viewport {
        Viewport::new(GeoPoint::new(5.0, 5.0), 2.0, PixelSize::new(1024.0, 768.0))
    }

    fn setup() -> (Controller, Store) {
        let controller = RegionController::new(
            HeadlessMap::new(viewport()),
            RecordingLookup::default(),
            RegionConfig::default(),
        );
        let mut store = Store::new();
        store.dispatch(Action::SetAnalysisMode(AnalysisMode::Region));
        (controller, store)
    }

    /// Host-side dispatch: reduce, then run the reaction loop.
    fn host_dispatch(c: &mut Controller, store: &mut Store, action: Action) {
        let prev = store.state().clone();
        store.dispatch(action);
        c.on_state_changed(&prev, store.state());
    }

    fn draw(c: &mut Controller, store: &mut Store, ne: (f64, f64), sw: (f64, f64)) -> ShapeId {
        c.start_drawing();
        let event = c
            .map_mut()
            .complete_rectangle(GeoPoint::new(ne.0, ne.1), GeoPoint::new(sw.0, sw.1))
            .expect("draw mode active");
        let shape = event.shape().expect("commit carries a shape");
        c.handle_event(event, store);
        shape
    }

    fn payload(n: &str, s: &str, e: &str, w: &str) -> BoundsPayload {
        BoundsPayload {
            north: n.to_string(),
            south: s.to_string(),
            east: e.to_string(),
            west: w.to_string(),
        }
    }

    fn current_appearance(c: &Controller) -> Appearance {
        c.registry().current().expect("a current region").appearance
    }

    fn marker_present(c: &Controller) -> bool {
        let id = c.registry().current_id().unwrap();
        let shape = c.registry().shape(id).unwrap();
        c.map()
            .shape(shape)
            .unwrap()
            .classes
            .iter()
            .any(|cl| cl == DISABLED_CLASS)
    }

    /// Bounds covering the given pixel box of the current viewport.
    fn pixel_bounds(c: &Controller, a: (f64, f64), b: (f64, f64)) -> LatLngBounds {
        let vp = c.map().viewport();
        LatLngBounds::from_corners(
            vp.unproject(PixelPoint::new(a.0, a.1)),
            vp.unproject(PixelPoint::new(b.0, b.1)),
        )
    }

    #[test]
    fn drawing_a_region_enables_it_and_persists_six_digits() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        assert_eq!(current_appearance(&c), Appearance::Enabled);
        assert!(!marker_present(&c));
        assert_eq!(
            store.state().view.bounds,
            Some(payload("10.000000", "0.000000", "10.000000", "0.000000"))
        );
        assert_eq!(
            c.lookup().requests,
            vec![(GeoPoint::new(10.0, 10.0), GeoPoint::new(0.0, 0.0))]
        );
    }

    #[test]
    fn persisted_edges_keep_orientation() {
        let (mut c, mut store) = setup();
        // Corners given south-east / north-west, with long fractions.
        draw(&mut c, &mut store, (-3.123_456_789, 12.5), (4.999_999_7, -7.000_000_4));

        let p = store.state().view.bounds.clone().unwrap();
        assert_eq!(p, payload("5.000000", "-3.123457", "12.500000", "-7.000000"));
        let north: f64 = p.north.parse().unwrap();
        let south: f64 = p.south.parse().unwrap();
        assert!(north >= south);
        for v in [&p.north, &p.south, &p.east, &p.west] {
            assert_eq!(v.split('.').nth(1).map(str::len), Some(6), "{v}");
        }
    }

    #[test]
    fn loading_disables_then_reenables() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        assert_eq!(current_appearance(&c), Appearance::Disabled);
        assert!(marker_present(&c));

        host_dispatch(&mut c, &mut store, Action::SetLoading(false));
        assert_eq!(current_appearance(&c), Appearance::Enabled);
        assert!(!marker_present(&c));
    }

    #[test]
    fn repeated_loading_changes_do_not_reapply_disabled_state() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        let before = c.map().calls().disable_editing;

        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));

        assert_eq!(c.map().calls().disable_editing, before + 1);
        let id = c.registry().current_id().unwrap();
        let shape = c.registry().shape(id).unwrap();
        assert_eq!(c.map().shape(shape).unwrap().classes, vec![DISABLED_CLASS.to_string()]);
    }

    #[test]
    fn second_draw_ghosts_then_replaces_the_first() {
        let (mut c, mut store) = setup();
        let a = draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        c.start_drawing();
        // While B is being drawn, A is still registered but ghosted.
        assert_eq!(c.registry().len(), 1);
        assert_eq!(current_appearance(&c), Appearance::Disabled);
        assert!(!c.map().shape(a).unwrap().editable);

        let event = c
            .map_mut()
            .complete_rectangle(GeoPoint::new(20.0, 20.0), GeoPoint::new(15.0, 15.0))
            .unwrap();
        let b = event.shape().unwrap();
        // Both rectangles are on the map until the commit is handled.
        assert_eq!(c.map().shape_count(), 2);

        c.handle_event(event, &mut store);
        assert_eq!(c.registry().len(), 1);
        assert_eq!(c.registry().shape(c.registry().current_id().unwrap()), Some(b));
        assert_eq!(c.map().shape_ids(), vec![b]);
        assert_eq!(c.metrics().counter(METRIC_EVICTED), 1);
        assert_eq!(c.metrics().gauge(GAUGE_REGISTRY_LEN), Some(1));
        assert_eq!(current_appearance(&c), Appearance::Enabled);
    }

    #[test]
    fn ghost_is_settled_by_store_changes_mid_draw() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        c.start_drawing();
        assert_eq!(current_appearance(&c), Appearance::Disabled);

        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        assert_eq!(current_appearance(&c), Appearance::Disabled);
        host_dispatch(&mut c, &mut store, Action::SetLoading(false));
        assert_eq!(current_appearance(&c), Appearance::Enabled);
        assert!(c.is_drawing());

        // A move while still drawing re-checks only size and loading.
        c.start_drawing();
        let moved = c.map_mut().set_view(GeoPoint::new(4.0, 4.0), 2.0);
        c.handle_event(moved, &mut store);
        assert_eq!(current_appearance(&c), Appearance::Enabled);
    }

    #[test]
    fn native_cancel_is_seen_without_a_commit() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        c.start_drawing();

        // The user backs out of draw mode in the widget itself.
        c.map_mut().stop_drawing();
        assert!(!c.is_drawing());

        host_dispatch(&mut c, &mut store, Action::SetLoading(false));
        assert_eq!(current_appearance(&c), Appearance::Enabled);

        // Nothing left to halt when the mode changes.
        host_dispatch(&mut c, &mut store, Action::SetAnalysisMode(AnalysisMode::Point));
        assert_eq!(c.map().calls().stop_drawing, 1);
        assert_eq!(c.shade(), None);
    }

    #[test]
    fn clearing_store_bounds_empties_the_registry() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        host_dispatch(&mut c, &mut store, Action::ClearBounds);
        assert_eq!(c.registry().len(), 0);
        assert_eq!(c.map().shape_count(), 0);

        // Already empty: still fine.
        host_dispatch(&mut c, &mut store, Action::ClearBounds);
        assert!(c.registry().is_empty());
    }

    #[test]
    fn zooming_in_disables_and_zooming_out_reenables() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        // At zoom 7 the 10 x 10 degree box fills far more than the viewport.
        let zoom_in = c.map_mut().set_view(GeoPoint::new(5.0, 5.0), 7.0);
        c.handle_event(zoom_in, &mut store);
        assert_eq!(current_appearance(&c), Appearance::Disabled);
        assert!(marker_present(&c));
        assert!(c.current_ratio().unwrap() > 0.75);

        let zoom_out = c.map_mut().set_view(GeoPoint::new(5.0, 5.0), 2.0);
        c.handle_event(zoom_out, &mut store);
        assert_eq!(current_appearance(&c), Appearance::Enabled);
    }

    #[test]
    fn moving_while_loading_defers_reenable_to_the_store() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        let zoom_in = c.map_mut().set_view(GeoPoint::new(5.0, 5.0), 7.0);
        c.handle_event(zoom_in, &mut store);
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));

        // Small again, but loading: the move handler leaves it disabled.
        let zoom_out = c.map_mut().set_view(GeoPoint::new(5.0, 5.0), 2.0);
        c.handle_event(zoom_out, &mut store);
        assert_eq!(current_appearance(&c), Appearance::Disabled);

        host_dispatch(&mut c, &mut store, Action::SetLoading(false));
        assert_eq!(current_appearance(&c), Appearance::Enabled);
    }

    #[test]
    fn finishing_loading_keeps_oversized_region_disabled() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        let zoom_in = c.map_mut().set_view(GeoPoint::new(5.0, 5.0), 7.0);
        c.handle_event(zoom_in, &mut store);

        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        host_dispatch(&mut c, &mut store, Action::SetLoading(false));
        assert_eq!(current_appearance(&c), Appearance::Disabled);
    }

    #[test]
    fn edits_persist_and_refire_lookup() {
        let (mut c, mut store) = setup();
        let shape = draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));

        let ev = c
            .map_mut()
            .drag_vertex(shape, Corner::NorthEast, GeoPoint::new(12.345_678_9, 11.0))
            .unwrap();
        c.handle_event(ev, &mut store);
        assert_eq!(
            store.state().view.bounds,
            Some(payload("12.345679", "0.000000", "11.000000", "0.000000"))
        );

        let ev = c.map_mut().drag_shape(shape, -1.0, 2.0).unwrap();
        c.handle_event(ev, &mut store);
        assert_eq!(
            store.state().view.bounds,
            Some(payload("11.345679", "-1.000000", "13.000000", "2.000000"))
        );
        assert_eq!(c.lookup().requests.len(), 3);
        assert_eq!(c.registry().current().unwrap().bounds.west(), 2.0);
    }

    #[test]
    fn disabled_region_rejects_edit_gestures() {
        let (mut c, mut store) = setup();
        let shape = draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        assert!(c.map_mut().drag_shape(shape, 1.0, 1.0).is_none());
    }

    #[test]
    fn edits_on_unknown_shapes_are_ignored() {
        let (mut c, mut store) = setup();
        c.bind_handlers();
        let stray = c.map_mut().add_rectangle(LatLngBounds::from_edges(1.0, 0.0, 1.0, 0.0));
        c.handle_event(MapEvent::DragEnd { shape: stray }, &mut store);
        assert!(store.state().view.bounds.is_none());
        assert!(c.lookup().requests.is_empty());
    }

    #[test]
    fn events_before_binding_are_ignored_and_binding_is_idempotent() {
        let (mut c, mut store) = setup();
        c.handle_event(MapEvent::MoveEnd, &mut store);
        assert_eq!(c.metrics().counter(METRIC_IGNORED_EVENTS), 1);

        assert!(c.bind_handlers());
        assert!(!c.bind_handlers());
        c.start_drawing();
        assert!(c.handlers_bound());
        c.handle_event(MapEvent::MoveEnd, &mut store);
        assert_eq!(c.metrics().counter(METRIC_IGNORED_EVENTS), 1);
    }

    #[test]
    fn leaving_region_mode_halts_drawing_and_removes_shade() {
        let (mut c, mut store) = setup();
        c.start_drawing();
        assert!(c.map().is_drawing());
        assert!(c.shade().is_some());

        host_dispatch(&mut c, &mut store, Action::SetAnalysisMode(AnalysisMode::Point));
        assert!(!c.map().is_drawing());
        assert!(!c.is_drawing());
        assert_eq!(c.shade(), None);
        assert_eq!(c.map().overlay_count(), 0);
        assert_eq!(c.map().calls().stop_drawing, 1);

        // Nothing in progress any more: repeated changes are no-ops.
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        assert_eq!(c.map().calls().stop_drawing, 1);
        assert_eq!(c.map().calls().overlays_removed, 1);
    }

    #[test]
    fn halting_a_redraw_releases_the_ghost() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        c.start_drawing();
        assert_eq!(current_appearance(&c), Appearance::Disabled);

        host_dispatch(&mut c, &mut store, Action::SetAnalysisMode(AnalysisMode::Point));
        assert_eq!(current_appearance(&c), Appearance::Enabled);
    }

    #[test]
    fn starting_to_draw_keeps_a_single_shade() {
        let (mut c, _store) = setup();
        c.start_drawing();
        c.start_drawing();
        assert_eq!(c.map().overlay_count(), 1);
        assert_eq!(c.map().calls().overlays_added, 2);
    }

    #[test]
    fn draw_bounds_registers_persists_and_frames_the_shade() {
        let (mut c, mut store) = setup();
        let bounds = LatLngBounds::from_edges(10.0, 0.0, 10.0, 0.0);
        let id = c.draw_bounds(bounds, &mut store);

        assert!(c.handlers_bound());
        assert_eq!(c.registry().current_id(), Some(id));
        let shape = c.registry().shape(id).unwrap();
        assert!(c.map().shape(shape).unwrap().editable);
        assert_eq!(c.map().overlays().map(|(_, f)| f).collect::<Vec<_>>(), vec![Some(bounds)]);
        assert_eq!(
            store.state().view.bounds,
            Some(payload("10.000000", "0.000000", "10.000000", "0.000000"))
        );
        assert_eq!(current_appearance(&c), Appearance::Enabled);
        // Restoring does not ask for a date range.
        assert!(c.lookup().requests.is_empty());
    }

    #[test]
    fn draw_bounds_replaces_previous_region() {
        let (mut c, mut store) = setup();
        let first = draw(&mut c, &mut store, (10.0, 10.0), (0.0, 0.0));
        c.draw_bounds(LatLngBounds::from_edges(-5.0, -10.0, 40.0, 30.0), &mut store);

        assert_eq!(c.registry().len(), 1);
        assert!(c.map().shape(first).is_none());
        assert_eq!(
            store.state().view.bounds,
            Some(payload("-5.000000", "-10.000000", "40.000000", "30.000000"))
        );
    }

    #[test]
    fn oversized_restored_region_starts_disabled() {
        let (mut c, mut store) = setup();
        let huge = pixel_bounds(&c, (0.0, 0.0), (1024.0, 768.0));
        c.draw_bounds(huge, &mut store);
        assert_eq!(current_appearance(&c), Appearance::Disabled);
        assert!(marker_present(&c));
    }

    #[test]
    fn restoring_while_loading_starts_disabled() {
        let (mut c, mut store) = setup();
        host_dispatch(&mut c, &mut store, Action::SetLoading(true));
        c.draw_bounds(LatLngBounds::from_edges(10.0, 0.0, 10.0, 0.0), &mut store);
        assert_eq!(current_appearance(&c), Appearance::Disabled);
    }

    #[test]
    fn point_click_region_is_allowed() {
        let (mut c, mut store) = setup();
        draw(&mut c, &mut store, (3.0, 4.0), (3.0, 4.0));
        assert_eq!(c.registry().len(), 1);
        assert_eq!(current_appearance(&c), Appearance::Enabled);
        assert_eq!(c.current_ratio(), Some(0.0));
    }

    #[test]
    fn reaction_loop_is_safe_without_any_region() {
        let (mut c, _store) = setup();
        let idle = AppState::default();
        let mut loading = idle.clone();
        loading.loading.is_loading = true;
        c.on_state_changed(&idle, &loading);
        c.on_state_changed(&loading, &idle);
        assert!(c.registry().is_empty());
        assert_eq!(c.map().calls().stop_drawing, 0);
    }
}
