//! # Open Rooms Store
//!
//! Routing store over the set of currently open room views. It owns an
//! ordered list of [`RoomViewEntry`]s, each pairing a per-room store
//! with its own private dispatcher, and routes every incoming action
//! either to the single current entry or (for grid views) across the
//! whole set's lifecycle.
//!
//! The store's only inbound interface is the shared dispatcher it
//! registers on at [`init`](OpenRoomsStore::init); outward it exposes
//! read accessors for the open stores and a summary signal that fires
//! after every state change.

use crate::client::BoxedClientBridge;
use crate::core::{Action, RoomEvent, ViewRoomPayload};
use crate::dispatch::{DispatchToken, Dispatcher};
use crate::services::AppServices;
use crate::views::room::RoomViewStore;
use futures_signals::signal::{Mutable, MutableSignalCloned};
use parking_lot::Mutex;
use salon_core::{GroupId, RoomAlias, RoomId};
use std::sync::Arc;
use tracing::{debug, warn};

/// A per-room view store paired with its private dispatch channel.
///
/// The pair is created and torn down together; two entries never share
/// a channel.
pub struct RoomViewEntry {
    /// The room's view store
    pub store: Arc<RoomViewStore>,
    /// The store's private dispatcher
    pub dispatcher: Arc<Dispatcher>,
}

impl RoomViewEntry {
    fn open() -> Self {
        let dispatcher = Dispatcher::new();
        let store = RoomViewStore::open(dispatcher.clone());
        Self { store, dispatcher }
    }

    fn matches(&self, payload: &ViewRoomPayload) -> bool {
        // Alias payloads compare by alias, everything else by id.
        if let Some(alias) = &payload.room_alias {
            self.store.room_alias().as_ref() == Some(alias)
        } else {
            payload.room_id.is_some() && self.store.room_id() == payload.room_id
        }
    }
}

#[derive(Default)]
struct RouterState {
    rooms: Vec<RoomViewEntry>,
    current_index: Option<usize>,
    group_id: Option<GroupId>,
    forwarding_event: Option<RoomEvent>,
}

impl RouterState {
    fn current(&self) -> Option<&RoomViewEntry> {
        self.current_index.and_then(|index| self.rooms.get(index))
    }

    fn matches_current(&self, payload: &ViewRoomPayload) -> bool {
        self.current()
            .map(|entry| entry.matches(payload))
            .unwrap_or(false)
    }

    fn open_room_index(&self, payload: &ViewRoomPayload) -> Option<usize> {
        self.rooms.iter().position(|entry| entry.matches(payload))
    }
}

/// Cloneable snapshot of the routing state, published to observers
/// after every mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenRoomsSummary {
    /// Room ids of the open entries, in order (`None` while unresolved)
    pub room_ids: Vec<Option<RoomId>>,
    /// Index of the current entry
    pub current_index: Option<usize>,
    /// The active grid grouping, if the view is a grid
    pub group_id: Option<GroupId>,
}

/// The room view router
pub struct OpenRoomsStore {
    bridge: BoxedClientBridge,
    dispatcher: Arc<Dispatcher>,
    state: Mutex<RouterState>,
    summary: Mutable<OpenRoomsSummary>,
    token: Mutex<Option<DispatchToken>>,
}

impl OpenRoomsStore {
    /// Construct the router and register it on the shared dispatcher.
    ///
    /// Must run inside a Tokio runtime: alias resolution is performed on
    /// spawned tasks that re-enter through the dispatcher.
    pub fn init(services: &AppServices) -> Arc<Self> {
        Self::with_parts(services.bridge.clone(), services.dispatcher.clone())
    }

    /// Construct from bare parts; `init` is the usual entry point
    pub fn with_parts(bridge: BoxedClientBridge, dispatcher: Arc<Dispatcher>) -> Arc<Self> {
        let store = Arc::new(Self {
            bridge,
            dispatcher: dispatcher.clone(),
            state: Mutex::new(RouterState::default()),
            summary: Mutable::new(OpenRoomsSummary::default()),
            token: Mutex::new(None),
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

    /// The currently open room stores, in order
    pub fn room_stores(&self) -> Vec<Arc<RoomViewStore>> {
        self.state
            .lock()
            .rooms
            .iter()
            .map(|entry| entry.store.clone())
            .collect()
    }

    /// The current room's store, if a room is open
    pub fn current_store(&self) -> Option<Arc<RoomViewStore>> {
        self.state.lock().current().map(|entry| entry.store.clone())
    }

    /// The active grid grouping, if the view is a grid
    pub fn group_id(&self) -> Option<GroupId> {
        self.state.lock().group_id.clone()
    }

    /// Snapshot of the routing state
    pub fn summary(&self) -> OpenRoomsSummary {
        self.summary.get_cloned()
    }

    /// Signal observers subscribe to; fires after every state change
    pub fn summary_signal(&self) -> MutableSignalCloned<OpenRoomsSummary> {
        self.summary.signal_cloned()
    }

    /// Tear down every entry and remove the router from the shared
    /// dispatcher. For embedder shutdown.
    pub fn unregister(&self) {
        self.cleanup_rooms();
        if let Some(token) = self.token.lock().take() {
            self.dispatcher.unregister(token);
        }
    }

    fn publish(&self) {
        let snapshot = {
            let state = self.state.lock();
            OpenRoomsSummary {
                room_ids: state
                    .rooms
                    .iter()
                    .map(|entry| entry.store.room_id())
                    .collect(),
                current_index: state.current_index,
                group_id: state.group_id.clone(),
            }
        };
        self.summary.set(snapshot);
    }

    fn on_action(self: &Arc<Self>, action: &Action) {
        match action {
            Action::ViewRoom(payload) => self.view_room(payload),
            Action::ViewGroupGrid { group_id } => self.view_group_grid(group_id),
            Action::ViewMyGroups | Action::ViewGroup { .. } => {
                self.forward_to_current(action);
                self.cleanup_rooms();
            }
            Action::ForwardEvent { event } => {
                self.state.lock().forwarding_event = Some(event.clone());
                self.publish();
            }
            Action::WillJoin { .. }
            | Action::CancelJoin { .. }
            | Action::JoinRoom { .. }
            | Action::JoinRoomError { .. }
            | Action::OnLoggedOut
            | Action::ReplyToEvent { .. }
            | Action::OpenRoomSettings { .. }
            | Action::CloseSettings => self.forward_to_current(action),
            // Consumed by room stores and the embedding frontend.
            Action::ViewRoomError { .. }
            | Action::SendEvent { .. }
            | Action::StartChat { .. } => {}
        }
    }

    /// Forward an action into the current entry's private dispatcher.
    ///
    /// The router lock is released before forwarding so entry handlers
    /// may dispatch freely.
    fn forward_to_current(&self, action: &Action) {
        let target = {
            let state = self.state.lock();
            state.current().map(|entry| entry.dispatcher.clone())
        };
        if let Some(dispatcher) = target {
            dispatcher.dispatch(action.clone());
        }
    }

    /// Tear down every entry and reset to the empty router.
    fn cleanup_rooms(&self) {
        let stale = {
            let mut state = self.state.lock();
            state.current_index = None;
            state.group_id = None;
            std::mem::take(&mut state.rooms)
        };
        for entry in &stale {
            entry.store.unregister();
        }
        debug!(torn_down = stale.len(), "open rooms cleaned up");
        self.publish();
    }

    fn view_room(self: &Arc<Self>, payload: &ViewRoomPayload) {
        let Some(room_id) = payload.room_id.clone() else {
            match payload.room_alias.clone() {
                Some(alias) => self.resolve_room_alias(alias, payload.clone()),
                None => warn!("view_room carried neither id nor alias"),
            }
            return;
        };
        debug!(room = %room_id, "view_room");

        let mut stale = Vec::new();
        let (target, pending) = {
            let mut state = self.state.lock();
            if !state.matches_current(payload) {
                if let Some(index) = state.open_room_index(payload) {
                    // Another open entry already shows this room.
                    state.current_index = Some(index);
                } else {
                    state.current_index = None;
                    state.group_id = None;
                    stale = std::mem::take(&mut state.rooms);
                }
            }
            if state.rooms.is_empty() {
                state.rooms.push(RoomViewEntry::open());
                state.current_index = Some(0);
            }
            let target = state.current().map(|entry| entry.dispatcher.clone());
            let pending = state.forwarding_event.take();
            (target, pending)
        };
        for entry in &stale {
            entry.store.unregister();
        }

        if let Some(dispatcher) = target {
            dispatcher.dispatch(Action::ViewRoom(payload.clone()));
        }
        // Snapshot once the current entry knows its room.
        self.publish();
        if let Some(event) = pending {
            self.dispatcher.dispatch(Action::SendEvent { room_id, event });
        }
    }

    /// Resolve an alias off the dispatch thread and re-enter by
    /// dispatching again.
    ///
    /// A later `view_room` does not cancel an in-flight resolution; a
    /// stale success still re-dispatches. Failures go to whichever entry
    /// is current at completion time and leave routing state untouched.
    fn resolve_room_alias(self: &Arc<Self>, alias: RoomAlias, payload: ViewRoomPayload) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            match store.bridge.resolve_alias(&alias).await {
                Ok(room_id) => {
                    debug!(%alias, room = %room_id, "room alias resolved");
                    store
                        .dispatcher
                        .dispatch(Action::ViewRoom(payload.with_resolved_id(room_id)));
                }
                Err(error) => {
                    warn!(%alias, %error, "room alias resolution failed");
                    let target = {
                        let state = store.state.lock();
                        state.current().map(|entry| entry.dispatcher.clone())
                    };
                    if let Some(dispatcher) = target {
                        dispatcher.dispatch(Action::ViewRoomError {
                            room_id: None,
                            room_alias: Some(alias),
                            error,
                        });
                    }
                }
            }
        });
    }

    fn view_group_grid(&self, group_id: &GroupId) {
        let already_shown = self.state.lock().group_id.as_ref() == Some(group_id);
        if already_shown {
            // The grid for this group is already on screen.
            return;
        }
        self.cleanup_rooms();

        let member_rooms = self.bridge.group_rooms(group_id);
        debug!(group = %group_id, rooms = member_rooms.len(), "view_group_grid");

        let mut entries = Vec::with_capacity(member_rooms.len());
        for room_id in member_rooms {
            let entry = RoomViewEntry::open();
            // Preload the store before the entry joins the set.
            entry
                .dispatcher
                .dispatch(Action::ViewRoom(ViewRoomPayload::for_room(room_id)));
            entries.push(entry);
        }

        {
            let mut state = self.state.lock();
            state.current_index = if entries.is_empty() { None } else { Some(0) };
            state.group_id = Some(group_id.clone());
            state.rooms = entries;
        }
        self.publish();
    }
}
