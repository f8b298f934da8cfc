use foundation::LatLngBounds;
use runtime::EventBus;
use store::{Action, AppState, StateStore, Store};
use tracing::debug;

use crate::controller::RegionController;
use crate::events::MapEvent;
use crate::lookup::DateRangeLookup;
use crate::map::MapWidget;
use crate::registry::RegionId;

/// Host wiring for one map viewport: a store, a controller and the queue
/// of map events waiting to be routed.
///
/// Host dispatches go through `dispatch` so the controller sees every
/// store change.
pub struct Session<M, L> {
    store: Store,
    controller: RegionController<M, L>,
    events: EventBus<MapEvent>,
}

impl<M, L> Session<M, L>
where
    M: MapWidget,
    L: DateRangeLookup,
{
    pub fn new(controller: RegionController<M, L>, store: Store) -> Self {
        Self {
            store,
            controller,
            events: EventBus::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn controller(&self) -> &RegionController<M, L> {
        &self.controller
    }

    pub fn map(&self) -> &M {
        self.controller.map()
    }

    pub fn map_mut(&mut self) -> &mut M {
        self.controller.map_mut()
    }

    /// Applies `action` and runs the controller's reaction loop.
    pub fn dispatch(&mut self, action: Action) {
        let prev = self.store.state().clone();
        self.store.dispatch(action);
        self.controller.on_state_changed(&prev, self.store.state());
    }

    /// Queues a map event; returns its sequence number.
    pub fn post(&mut self, event: MapEvent) -> u64 {
        self.events.emit(event)
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Routes queued events in order. Returns how many were routed.
    pub fn pump(&mut self) -> usize {
        let mut routed = 0;
        while let Some(queued) = self.events.pop() {
            debug!(seq = queued.seq, event = queued.event.name(), "routing map event");
            self.controller.handle_event(queued.event, &mut self.store);
            routed += 1;
        }
        routed
    }

    pub fn start_drawing(&mut self) {
        self.controller.start_drawing();
    }

    pub fn draw_bounds(&mut self, bounds: LatLngBounds) -> RegionId {
        self.controller.draw_bounds(bounds, &mut self.store)
    }
}
