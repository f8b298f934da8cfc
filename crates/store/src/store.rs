use foundation::{Id, IdAllocator};
use tracing::debug;

use crate::state::{Action, AppState, reduce};

/// Read/dispatch surface the region controller needs from a store.
pub trait StateStore {
    fn state(&self) -> &AppState;
    fn dispatch(&mut self, action: Action);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub Id);

type Listener = Box<dyn FnMut(&AppState, &AppState)>;

/// Reducer-backed store with synchronous listeners.
///
/// Listeners run in subscription order, inside `dispatch`, with the state
/// before and after the action.
#[derive(Default)]
pub struct Store {
    state: AppState,
    ids: IdAllocator,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&AppState, &AppState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.ids.next_id());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

impl StateStore for Store {
    fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "store dispatch");
        let prev = std::mem::replace(&mut self.state, AppState::default());
        self.state = reduce(&prev, &action);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&prev, &self.state);
        }
    }
}
