//! Routing behavior of the open-rooms store.

use crate::core::{Action, RoomEvent, ViewRoomPayload};
use crate::dispatch::Dispatcher;
use crate::stores::open_rooms::OpenRoomsStore;
use crate::test_support::{record_actions, settle, StubBridge};
use assert_matches::assert_matches;
use salon_core::{EventId, GroupId, RoomAlias, RoomId, SalonError};
use std::sync::Arc;

fn setup() -> (Arc<StubBridge>, Arc<Dispatcher>, Arc<OpenRoomsStore>) {
    let bridge = Arc::new(StubBridge::default());
    let dispatcher = Dispatcher::new();
    let store = OpenRoomsStore::with_parts(bridge.clone(), dispatcher.clone());
    (bridge, dispatcher, store)
}

fn view(id: &str) -> Action {
    Action::ViewRoom(ViewRoomPayload::for_room(RoomId::new(id)))
}

fn grid(group: &GroupId) -> Action {
    Action::ViewGroupGrid {
        group_id: group.clone(),
    }
}

#[test]
fn view_room_with_new_id_creates_sole_current_entry() {
    let (_bridge, dispatcher, store) = setup();

    dispatcher.dispatch(view("!r1"));

    let stores = store.room_stores();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].room_id(), Some(RoomId::new("!r1")));
    let current = store.current_store().unwrap();
    assert!(Arc::ptr_eq(&current, &stores[0]));

    let summary = store.summary();
    assert_eq!(summary.room_ids, vec![Some(RoomId::new("!r1"))]);
    assert_eq!(summary.current_index, Some(0));
    assert_eq!(summary.group_id, None);
}

#[test]
fn view_room_for_current_room_never_recreates() {
    let (_bridge, dispatcher, store) = setup();

    dispatcher.dispatch(view("!r1"));
    let first = store.current_store().unwrap();

    dispatcher.dispatch(view("!r1"));

    assert_eq!(store.room_stores().len(), 1);
    assert!(Arc::ptr_eq(&store.current_store().unwrap(), &first));
}

#[test]
fn view_room_for_other_room_replaces_entry() {
    let (_bridge, dispatcher, store) = setup();

    dispatcher.dispatch(view("!r1"));
    let first = store.current_store().unwrap();
    let first_dispatcher = first.dispatcher().clone();

    dispatcher.dispatch(view("!r2"));

    let current = store.current_store().unwrap();
    assert!(!Arc::ptr_eq(&current, &first));
    assert_eq!(current.room_id(), Some(RoomId::new("!r2")));
    assert_eq!(store.room_stores().len(), 1);

    // The old entry was unregistered: its private channel is dead.
    first_dispatcher.dispatch(Action::WillJoin {
        room_id: RoomId::new("!r1"),
    });
    assert!(!first.state().joining);
}

#[test]
fn group_grid_replaces_rooms_in_group_order() {
    let (bridge, dispatcher, store) = setup();
    let group = GroupId::new("+games:example.org");
    let member_rooms = vec![
        RoomId::new("!g1"),
        RoomId::new("!g2"),
        RoomId::new("!g3"),
    ];
    bridge.groups.lock().insert(group.clone(), member_rooms.clone());

    dispatcher.dispatch(view("!solo"));
    dispatcher.dispatch(grid(&group));

    let stores = store.room_stores();
    assert_eq!(stores.len(), 3);
    for (room_store, room_id) in stores.iter().zip(&member_rooms) {
        assert_eq!(room_store.room_id().as_ref(), Some(room_id));
    }
    let summary = store.summary();
    assert_eq!(summary.current_index, Some(0));
    assert_eq!(summary.group_id, Some(group));
}

#[test]
fn group_grid_is_idempotent_for_same_group() {
    let (bridge, dispatcher, store) = setup();
    let group = GroupId::new("+games:example.org");
    bridge
        .groups
        .lock()
        .insert(group.clone(), vec![RoomId::new("!g1"), RoomId::new("!g2")]);

    dispatcher.dispatch(grid(&group));
    let before = store.room_stores();
    let summary_before = store.summary();

    dispatcher.dispatch(grid(&group));

    let after = store.room_stores();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
    assert_eq!(store.summary(), summary_before);
}

#[test]
fn view_room_switches_within_grid_without_teardown() {
    let (bridge, dispatcher, store) = setup();
    let group = GroupId::new("+games:example.org");
    bridge
        .groups
        .lock()
        .insert(group.clone(), vec![RoomId::new("!g1"), RoomId::new("!g2")]);

    dispatcher.dispatch(grid(&group));
    let before = store.room_stores();

    dispatcher.dispatch(view("!g2"));

    let summary = store.summary();
    assert_eq!(summary.current_index, Some(1));
    assert_eq!(summary.group_id, Some(group));
    let after = store.room_stores();
    for (a, b) in before.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn view_room_outside_grid_tears_grid_down() {
    let (bridge, dispatcher, store) = setup();
    let group = GroupId::new("+games:example.org");
    bridge
        .groups
        .lock()
        .insert(group.clone(), vec![RoomId::new("!g1"), RoomId::new("!g2")]);

    dispatcher.dispatch(grid(&group));
    dispatcher.dispatch(view("!elsewhere"));

    let summary = store.summary();
    assert_eq!(summary.room_ids, vec![Some(RoomId::new("!elsewhere"))]);
    assert_eq!(summary.current_index, Some(0));
    assert_eq!(summary.group_id, None);
}

#[test]
fn empty_group_grid_leaves_router_empty_but_grouped() {
    let (_bridge, dispatcher, store) = setup();
    let group = GroupId::new("+empty:example.org");

    dispatcher.dispatch(grid(&group));

    let summary = store.summary();
    assert!(summary.room_ids.is_empty());
    assert_eq!(summary.current_index, None);
    assert_eq!(summary.group_id, Some(group.clone()));

    // Still a no-op the second time.
    dispatcher.dispatch(grid(&group));
    assert_eq!(store.summary().group_id, Some(group));
}

#[test]
fn lifecycle_actions_reach_only_the_current_entry() {
    let (bridge, dispatcher, store) = setup();
    let group = GroupId::new("+games:example.org");
    bridge
        .groups
        .lock()
        .insert(group.clone(), vec![RoomId::new("!g1"), RoomId::new("!g2")]);

    dispatcher.dispatch(grid(&group));
    dispatcher.dispatch(Action::WillJoin {
        room_id: RoomId::new("!g1"),
    });

    let stores = store.room_stores();
    assert!(stores[0].state().joining);
    assert!(!stores[1].state().joining);
}

#[test]
fn group_navigation_forwards_then_tears_down() {
    let (_bridge, dispatcher, store) = setup();

    dispatcher.dispatch(view("!r1"));
    let room_store = store.current_store().unwrap();

    dispatcher.dispatch(Action::ViewMyGroups);

    assert!(store.room_stores().is_empty());
    assert_eq!(store.summary(), Default::default());

    // The torn-down store no longer listens on its old channel.
    room_store.dispatcher().dispatch(Action::WillJoin {
        room_id: RoomId::new("!r1"),
    });
    assert!(!room_store.state().joining);
}

#[test]
fn forward_event_is_sent_to_the_next_viewed_room() {
    let (_bridge, dispatcher, _store) = setup();
    let log = record_actions(&dispatcher);

    let event = RoomEvent::new("m.room.message", serde_json::json!({"body": "fwd"}))
        .with_room(RoomId::new("!origin"))
        .with_event_id(EventId::generate());
    dispatcher.dispatch(Action::ForwardEvent {
        event: event.clone(),
    });
    dispatcher.dispatch(view("!dest"));

    let send_events: Vec<Action> = log
        .lock()
        .iter()
        .filter(|action| matches!(action, Action::SendEvent { .. }))
        .cloned()
        .collect();
    assert_eq!(send_events.len(), 1);
    assert_matches!(
        &send_events[0],
        Action::SendEvent { room_id, event: sent }
            if *room_id == RoomId::new("!dest") && *sent == event
    );

    // The pending event was cleared; viewing again sends nothing.
    dispatcher.dispatch(view("!dest"));
    let count = log
        .lock()
        .iter()
        .filter(|action| matches!(action, Action::SendEvent { .. }))
        .count();
    assert_eq!(count, 1);
}

#[test]
fn unregistered_router_ignores_the_shared_channel() {
    let (_bridge, dispatcher, store) = setup();

    dispatcher.dispatch(view("!r1"));
    store.unregister();

    assert!(store.room_stores().is_empty());
    dispatcher.dispatch(view("!r2"));
    assert!(store.room_stores().is_empty());
}

#[tokio::test]
async fn alias_resolution_redispatches_with_carried_metadata() {
    let (bridge, dispatcher, store) = setup();
    let alias = RoomAlias::new("#lobby:example.org");
    bridge
        .aliases
        .lock()
        .insert(alias.clone(), Ok(RoomId::new("!resolved")));

    dispatcher.dispatch(Action::ViewRoom(ViewRoomPayload {
        room_alias: Some(alias.clone()),
        highlighted: true,
        auto_join: true,
        ..ViewRoomPayload::default()
    }));

    // Nothing opens until the resolution lands.
    assert!(store.room_stores().is_empty());

    settle().await;

    let current = store.current_store().unwrap();
    let state = current.state();
    assert_eq!(state.room_id, Some(RoomId::new("!resolved")));
    assert_eq!(state.room_alias, Some(alias));
    assert!(state.initial_event_highlighted);
    assert!(state.auto_join);
}

#[tokio::test]
async fn alias_resolution_failure_reaches_current_room_only() {
    let (bridge, dispatcher, store) = setup();
    let alias = RoomAlias::new("#nowhere:example.org");
    bridge.aliases.lock().insert(
        alias.clone(),
        Err(SalonError::not_found("no such alias")),
    );

    dispatcher.dispatch(view("!r1"));
    let current_before = store.current_store().unwrap();
    let summary_before = store.summary();

    dispatcher.dispatch(Action::ViewRoom(ViewRoomPayload::for_alias(alias.clone())));
    settle().await;

    // Routing state is untouched; the error landed in the current store.
    assert_eq!(store.summary(), summary_before);
    assert!(Arc::ptr_eq(&store.current_store().unwrap(), &current_before));
    let state = current_before.state();
    assert_eq!(state.load_error, Some(SalonError::not_found("no such alias")));
    assert_eq!(state.room_alias, Some(alias));
}

#[tokio::test]
async fn alias_resolution_failure_with_no_room_open_is_silent() {
    let (bridge, dispatcher, store) = setup();
    let alias = RoomAlias::new("#nowhere:example.org");
    bridge.aliases.lock().insert(
        alias.clone(),
        Err(SalonError::not_found("no such alias")),
    );

    dispatcher.dispatch(Action::ViewRoom(ViewRoomPayload::for_alias(alias)));
    settle().await;

    assert!(store.room_stores().is_empty());
    assert_eq!(store.summary(), Default::default());
}
