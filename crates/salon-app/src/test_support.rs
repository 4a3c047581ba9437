//! Hand-rolled stub collaborators shared by store and workflow tests.

use crate::client::{ClientBridge, CreateRoomConfig, Membership};
use crate::core::Action;
use crate::dialogs::{
    AddressPickerPrompt, DirectRoomChoice, DirectRoomPrompt, ErrorReport, ModalPresenter,
};
use crate::dispatch::Dispatcher;
use crate::services::AppServices;
use async_trait::async_trait;
use parking_lot::Mutex;
use salon_core::{Address, GroupId, RoomAlias, RoomId, SalonError, UserId};
use std::collections::HashMap;
use std::sync::Arc;

/// Scriptable in-memory client bridge
#[derive(Default)]
pub(crate) struct StubBridge {
    pub session: Option<UserId>,
    pub aliases: Mutex<HashMap<RoomAlias, Result<RoomId, SalonError>>>,
    pub memberships: Mutex<HashMap<RoomId, Membership>>,
    pub direct_rooms: Mutex<HashMap<UserId, Vec<RoomId>>>,
    pub groups: Mutex<HashMap<GroupId, Vec<RoomId>>>,
    /// Address string to forced invite failure; absent means success
    pub invite_failures: Mutex<HashMap<String, SalonError>>,
    pub create_room_error: Mutex<Option<SalonError>>,
    pub created: Mutex<Vec<(RoomId, CreateRoomConfig)>>,
    pub invited: Mutex<Vec<(RoomId, Address)>>,
}

#[async_trait]
impl ClientBridge for StubBridge {
    fn session_user(&self) -> Option<UserId> {
        self.session.clone()
    }

    async fn resolve_alias(&self, alias: &RoomAlias) -> Result<RoomId, SalonError> {
        self.aliases
            .lock()
            .get(alias)
            .cloned()
            .unwrap_or_else(|| Err(SalonError::not_found(format!("unknown alias {alias}"))))
    }

    fn membership(&self, room_id: &RoomId) -> Membership {
        self.memberships
            .lock()
            .get(room_id)
            .copied()
            .unwrap_or_default()
    }

    async fn create_room(&self, config: CreateRoomConfig) -> Result<RoomId, SalonError> {
        if let Some(error) = self.create_room_error.lock().clone() {
            return Err(error);
        }
        let room_id = RoomId::generate();
        self.created.lock().push((room_id.clone(), config));
        Ok(room_id)
    }

    async fn invite(&self, room_id: &RoomId, address: &Address) -> Result<(), SalonError> {
        self.invited.lock().push((room_id.clone(), address.clone()));
        match self.invite_failures.lock().get(address.as_str()) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn direct_rooms(&self, user_id: &UserId) -> Vec<RoomId> {
        self.direct_rooms
            .lock()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn group_rooms(&self, group_id: &GroupId) -> Vec<RoomId> {
        self.groups.lock().get(group_id).cloned().unwrap_or_default()
    }
}

/// Presenter that records reports and answers prompts from a script
#[derive(Default)]
pub(crate) struct RecordingPresenter {
    pub reports: Mutex<Vec<ErrorReport>>,
    pub direct_choice: Mutex<Option<DirectRoomChoice>>,
    pub direct_prompts: Mutex<Vec<DirectRoomPrompt>>,
    pub picked: Mutex<Option<Vec<Address>>>,
    pub picker_prompts: Mutex<Vec<AddressPickerPrompt>>,
}

#[async_trait]
impl ModalPresenter for RecordingPresenter {
    fn error_report(&self, report: ErrorReport) {
        self.reports.lock().push(report);
    }

    async fn choose_direct_room(&self, prompt: DirectRoomPrompt) -> Option<DirectRoomChoice> {
        self.direct_prompts.lock().push(prompt);
        self.direct_choice.lock().clone()
    }

    async fn pick_addresses(&self, prompt: AddressPickerPrompt) -> Option<Vec<Address>> {
        self.picker_prompts.lock().push(prompt);
        self.picked.lock().clone()
    }
}

/// Assemble services over the stub collaborators
pub(crate) fn stub_services(
    bridge: Arc<StubBridge>,
    presenter: Arc<RecordingPresenter>,
) -> AppServices {
    AppServices::new(bridge, presenter)
}

/// Record every action crossing a dispatcher
pub(crate) fn record_actions(dispatcher: &Dispatcher) -> Arc<Mutex<Vec<Action>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    dispatcher.register(move |action| sink.lock().push(action.clone()));
    log
}

/// Let spawned tasks on the current-thread test runtime run to completion
pub(crate) async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
