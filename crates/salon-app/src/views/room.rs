//! # Room View State
//!
//! One [`RoomViewStore`] holds the UI state of a single open room. Each
//! store subscribes to its own private [`Dispatcher`] for its entire
//! lifetime, so its reducer needs no routing awareness: every action it
//! sees is addressed to it. The open-rooms store decides which store's
//! dispatcher receives which action.

use crate::core::{Action, OobRoomData, RoomEvent, ViewRoomPayload};
use crate::dispatch::{DispatchToken, Dispatcher};
use futures_signals::signal::{Mutable, MutableSignalCloned};
use parking_lot::Mutex;
use salon_core::{EventId, RoomAlias, RoomId, SalonError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// UI state of a single open room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomViewState {
    /// Room shown by this store, once known
    pub room_id: Option<RoomId>,
    /// Alias the room was addressed by, if any
    pub room_alias: Option<RoomAlias>,
    /// Event to scroll to after the room renders
    pub initial_event_id: Option<EventId>,
    /// Whether to highlight the initial event
    pub initial_event_highlighted: bool,
    /// Join the room as part of viewing it
    pub auto_join: bool,
    /// Out-of-band metadata for a not-yet-joined room
    pub oob_data: Option<OobRoomData>,
    /// A join is in progress
    pub joining: bool,
    /// The last join failure, until the next join attempt
    pub join_error: Option<SalonError>,
    /// The room could not be loaded (alias resolution or peek failure)
    pub load_error: Option<SalonError>,
    /// Event a reply is being composed to
    pub replying_to: Option<RoomEvent>,
    /// The room settings view is open
    pub settings_open: bool,
    /// Settings tab to open on
    pub settings_initial_tab: Option<String>,
}

/// Per-room UI store wrapped around one private dispatcher.
///
/// Store and dispatcher are 1:1 for the store's whole lifetime; the
/// open-rooms store tears the pair down together.
pub struct RoomViewStore {
    dispatcher: Arc<Dispatcher>,
    token: Mutex<Option<DispatchToken>>,
    state: Mutable<RoomViewState>,
}

impl RoomViewStore {
    /// Open a store on the given private dispatcher and subscribe it.
    pub fn open(dispatcher: Arc<Dispatcher>) -> Arc<Self> {
        let store = Arc::new(Self {
            dispatcher: dispatcher.clone(),
            token: Mutex::new(None),
            state: Mutable::new(RoomViewState::default()),
        });
        let weak = Arc::downgrade(&store);
        let token = dispatcher.register(move |action| {
            if let Some(store) = weak.upgrade() {
                store.on_action(action);
            }
        });
        *store.token.lock() = Some(token);
        store
    }

    /// The store's private dispatcher
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RoomViewState {
        self.state.get_cloned()
    }

    /// Signal observers subscribe to; fires after every mutation
    pub fn signal(&self) -> MutableSignalCloned<RoomViewState> {
        self.state.signal_cloned()
    }

    /// Room shown by this store, once known
    pub fn room_id(&self) -> Option<RoomId> {
        self.state.lock_ref().room_id.clone()
    }

    /// Alias the room was addressed by, if any
    pub fn room_alias(&self) -> Option<RoomAlias> {
        self.state.lock_ref().room_alias.clone()
    }

    /// Unsubscribe from the private dispatcher.
    ///
    /// Called by the open-rooms store during teardown; after this the
    /// store receives nothing and the entry is considered dead.
    pub fn unregister(&self) {
        if let Some(token) = self.token.lock().take() {
            self.dispatcher.unregister(token);
        }
    }

    fn apply(&self, mutate: impl FnOnce(&mut RoomViewState)) {
        let mut state = self.state.lock_mut();
        mutate(&mut state);
        // Observers are notified when the lock guard drops.
    }

    fn on_action(&self, action: &Action) {
        match action {
            Action::ViewRoom(payload) => self.view_room(payload),
            Action::ViewRoomError {
                room_id,
                room_alias,
                error,
            } => self.apply(|state| {
                state.room_id = room_id.clone();
                state.room_alias = room_alias.clone();
                state.load_error = Some(error.clone());
            }),
            Action::WillJoin { .. } => self.apply(|state| {
                state.joining = true;
                state.join_error = None;
            }),
            Action::CancelJoin { .. } => self.apply(|state| {
                state.joining = false;
            }),
            Action::JoinRoom { .. } => self.apply(|state| {
                state.joining = true;
                state.join_error = None;
            }),
            Action::JoinRoomError { error, .. } => self.apply(|state| {
                state.joining = false;
                state.join_error = Some(error.clone());
            }),
            Action::OnLoggedOut => self.apply(|state| {
                *state = RoomViewState::default();
            }),
            Action::ReplyToEvent { event } => self.apply(|state| {
                state.replying_to = event.clone();
            }),
            Action::OpenRoomSettings { initial_tab } => self.apply(|state| {
                state.settings_open = true;
                state.settings_initial_tab = initial_tab.clone();
            }),
            Action::CloseSettings => self.apply(|state| {
                state.settings_open = false;
                state.settings_initial_tab = None;
            }),
            // Routing and workflow actions are not room view state.
            Action::ViewMyGroups
            | Action::ViewGroup { .. }
            | Action::ViewGroupGrid { .. }
            | Action::ForwardEvent { .. }
            | Action::SendEvent { .. }
            | Action::StartChat { .. } => {}
        }
    }

    fn view_room(&self, payload: &ViewRoomPayload) {
        self.apply(|state| {
            let room_changed =
                payload.room_id.is_some() && payload.room_id != state.room_id;
            if room_changed {
                // A different room resets everything scoped to the old one.
                *state = RoomViewState::default();
            }
            if payload.room_id.is_some() {
                state.room_id = payload.room_id.clone();
            }
            if payload.room_alias.is_some() {
                state.room_alias = payload.room_alias.clone();
            }
            state.initial_event_id = payload.event_id.clone();
            state.initial_event_highlighted = payload.highlighted;
            state.auto_join = payload.auto_join;
            if payload.oob_data.is_some() {
                state.oob_data = payload.oob_data.clone();
            }
            state.load_error = None;
        });
    }
}
