//! Invite Workflow - Portable Business Logic
//!
//! Given a room (or none, meaning "create one") and a list of invitee
//! addresses, this module resolves whether the request is a one-to-one
//! chat, a reuse of an existing direct-message room, or a multi-user
//! invite; performs the invites; and surfaces failures through the modal
//! presenter.
//!
//! Per-address failures are data, not errors: every invite batch returns
//! an [`InviteResults`] describing each address's outcome. Only room
//! creation failing is terminal for an operation.

use crate::client::{BoxedClientBridge, CreateRoomConfig, Membership};
use crate::core::{Action, ViewRoomPayload};
use crate::dialogs::{AddressPickerPrompt, DirectRoomChoice, DirectRoomPrompt, ErrorReport};
use crate::services::AppServices;
use futures::future::join_all;
use indexmap::IndexMap;
use salon_core::{Address, AddressKind, RoomId, SalonError};
use tracing::{debug, warn};

/// Outcome of one address's invite within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InviteOutcome {
    /// Not resolved yet (or never attempted by an aborting inviter)
    #[default]
    Pending,
    /// The invite succeeded
    Success,
    /// The invite failed
    Error,
}

#[derive(Debug, Clone, Default)]
struct AddressRecord {
    outcome: InviteOutcome,
    error_text: Option<String>,
}

/// The result set of one invite operation: an insertion-ordered mapping
/// from address to outcome, with per-address error text and a batch-level
/// fatal flag.
///
/// Owned by the operation that produced it and returned unchanged as the
/// operation's final output, whether or not anything was reported.
#[derive(Debug, Clone, Default)]
pub struct InviteResults {
    records: IndexMap<String, AddressRecord>,
    fatal: bool,
}

impl InviteResults {
    /// The outcome recorded for an address
    pub fn outcome(&self, address: &Address) -> InviteOutcome {
        self.records
            .get(address.as_str())
            .map(|record| record.outcome)
            .unwrap_or_default()
    }

    /// The error text recorded for an address, if its invite failed
    pub fn error_text(&self, address: &Address) -> Option<&str> {
        self.records
            .get(address.as_str())
            .and_then(|record| record.error_text.as_deref())
    }

    /// Whether the batch failed in a way that made attempting the other
    /// addresses pointless
    pub fn fatal(&self) -> bool {
        self.fatal
    }

    /// Addresses whose outcome is `Error`, with their error text, in
    /// insertion order
    pub fn failures(&self) -> Vec<(&str, Option<&str>)> {
        self.records
            .iter()
            .filter(|(_, record)| record.outcome == InviteOutcome::Error)
            .map(|(address, record)| (address.as_str(), record.error_text.as_deref()))
            .collect()
    }

    /// Number of addresses with the given outcome
    pub fn count(&self, outcome: InviteOutcome) -> usize {
        self.records
            .values()
            .filter(|record| record.outcome == outcome)
            .count()
    }

    fn mark_pending(&mut self, address: &Address) {
        self.records
            .entry(address.as_str().to_string())
            .or_default();
    }

    fn mark_success(&mut self, address: &Address) {
        let record = self
            .records
            .entry(address.as_str().to_string())
            .or_default();
        record.outcome = InviteOutcome::Success;
        record.error_text = None;
    }

    fn mark_error(&mut self, address: &Address, text: String) {
        let record = self
            .records
            .entry(address.as_str().to_string())
            .or_default();
        record.outcome = InviteOutcome::Error;
        record.error_text = Some(text);
    }
}

/// Multi-address inviter over the client bridge's single-address invite.
///
/// All invites of a batch are launched concurrently; there is no
/// batching, bounding or cancellation, and aggregation waits for every
/// call before the result set is produced.
pub struct MultiInviter {
    bridge: BoxedClientBridge,
    room_id: RoomId,
}

impl MultiInviter {
    /// Create an inviter targeting one room
    pub fn new(bridge: BoxedClientBridge, room_id: RoomId) -> Self {
        Self { bridge, room_id }
    }

    /// Invite every address, recording each outcome as it resolves
    pub async fn invite_addresses(&self, addresses: &[Address]) -> InviteResults {
        let mut results = InviteResults::default();
        for address in addresses {
            results.mark_pending(address);
        }

        let invites = addresses.iter().map(|address| {
            let bridge = self.bridge.clone();
            let room_id = self.room_id.clone();
            async move { (address, bridge.invite(&room_id, address).await) }
        });

        for (address, outcome) in join_all(invites).await {
            match outcome {
                Ok(()) => results.mark_success(address),
                Err(error) => {
                    warn!(address = %address, room = %self.room_id, %error, "invite failed");
                    if invite_error_is_fatal(&error) {
                        results.fatal = true;
                    }
                    results.mark_error(address, error.to_string());
                }
            }
        }
        results
    }
}

/// Errors under which no invite in the batch could have succeeded.
fn invite_error_is_fatal(error: &SalonError) -> bool {
    matches!(
        error,
        SalonError::PermissionDenied { .. } | SalonError::Client { .. }
    )
}

/// Invite every address to an existing room.
///
/// Failures are surfaced through one modal error report; success is
/// silent. The result set is returned unchanged either way.
pub async fn invite_to_room(
    services: &AppServices,
    room_id: &RoomId,
    addresses: &[Address],
) -> Result<InviteResults, SalonError> {
    if addresses.is_empty() {
        return Err(SalonError::invalid("no addresses to invite"));
    }
    debug!(room = %room_id, count = addresses.len(), "inviting to room");

    let inviter = MultiInviter::new(services.bridge.clone(), room_id.clone());
    let results = inviter.invite_addresses(addresses).await;
    report_invite_failures(services, room_id.as_str(), &results);
    Ok(results)
}

/// Start a chat with the given addresses.
///
/// - one account address with joined direct-message room(s): offer reuse;
/// - one address of either kind otherwise: create a direct chat;
/// - several addresses: create a room, then invite all of them.
///
/// Returns the invite result set for the multi-address path, `None` for
/// the single-address paths (nothing was batch-invited).
pub async fn start_chat(
    services: &AppServices,
    addresses: Vec<Address>,
) -> Result<Option<InviteResults>, SalonError> {
    match addresses.as_slice() {
        [] => Err(SalonError::invalid("no addresses given")),
        [address] => {
            start_single_chat(services, address).await?;
            Ok(None)
        }
        _ => {
            let room_id = create_room_or_report(services, CreateRoomConfig::default()).await?;
            let results = invite_to_room(services, &room_id, &addresses).await?;
            Ok(Some(results))
        }
    }
}

async fn start_single_chat(services: &AppServices, address: &Address) -> Result<(), SalonError> {
    debug!(kind = address.kind().label(), "starting single chat");
    match address.kind() {
        AddressKind::Account => {
            let user_id = address
                .user_id()
                .ok_or_else(|| SalonError::internal("account address without user id"))?;
            let joined: Vec<RoomId> = services
                .bridge
                .direct_rooms(&user_id)
                .into_iter()
                .filter(|room_id| services.bridge.membership(room_id) == Membership::Joined)
                .collect();

            if joined.is_empty() {
                create_direct_chat(services, address).await?;
                return Ok(());
            }

            let prompt = DirectRoomPrompt {
                user_id: user_id.clone(),
                rooms: joined,
            };
            match services.presenter.choose_direct_room(prompt).await {
                Some(DirectRoomChoice::Existing(room_id)) => {
                    services
                        .dispatcher
                        .dispatch(Action::ViewRoom(ViewRoomPayload::for_room(room_id)));
                }
                Some(DirectRoomChoice::NewChat) => {
                    services.dispatcher.dispatch(Action::StartChat { user_id });
                }
                // Dismissed: an expected no-op, not an error.
                None => {}
            }
            Ok(())
        }
        AddressKind::Email => {
            create_direct_chat(services, address).await?;
            Ok(())
        }
    }
}

/// Create a direct-message room seeded with the given address.
///
/// This is also the consumer side of the `start_chat` action dispatched
/// by the direct-room chooser.
pub async fn create_direct_chat(
    services: &AppServices,
    address: &Address,
) -> Result<RoomId, SalonError> {
    let config = match address.kind() {
        AddressKind::Account => {
            let user_id = address
                .user_id()
                .ok_or_else(|| SalonError::internal("account address without user id"))?;
            CreateRoomConfig::direct_to_user(user_id)
        }
        AddressKind::Email => CreateRoomConfig::direct_to_third_party(address.clone()),
    };
    create_room_or_report(services, config).await
}

/// Create a room, viewing it per configuration.
///
/// Creation failure is terminal: reported once through the presenter,
/// then returned. No retry.
async fn create_room_or_report(
    services: &AppServices,
    mut config: CreateRoomConfig,
) -> Result<RoomId, SalonError> {
    config.guests_can_join = services.config.guests_can_join;
    match services.bridge.create_room(config).await {
        Ok(room_id) => {
            debug!(room = %room_id, "room created");
            if services.config.view_created_rooms {
                services
                    .dispatcher
                    .dispatch(Action::ViewRoom(ViewRoomPayload::for_room(room_id.clone())));
            }
            Ok(room_id)
        }
        Err(error) => {
            warn!(%error, "room creation failed");
            let message = error.message();
            let description = if message.is_empty() {
                services.catalog.lookup("operation_failed").to_string()
            } else {
                message.to_string()
            };
            services.presenter.error_report(ErrorReport::new(
                services.catalog.lookup("failed_to_invite"),
                description,
            ));
            Err(error)
        }
    }
}

/// Surface an invite batch's failures as one modal error report.
fn report_invite_failures(services: &AppServices, room_label: &str, results: &InviteResults) {
    let failures = results.failures();
    if failures.is_empty() {
        return;
    }

    let catalog = &services.catalog;
    if failures.len() == 1 && results.fatal() {
        // The batch stopped at the first failure; the other addresses
        // were never genuinely attempted, so listing them would mislead.
        let (_, text) = failures[0];
        services.presenter.error_report(ErrorReport::new(
            catalog.lookup("failed_to_invite"),
            text.unwrap_or_else(|| catalog.lookup("operation_failed")),
        ));
        return;
    }

    let description = failures
        .iter()
        .map(|(address, text)| {
            format!(
                "{}: {}",
                address,
                text.unwrap_or_else(|| catalog.lookup("operation_failed"))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    services.presenter.error_report(ErrorReport::new(
        catalog.render("failed_to_invite_users_to_room", &[("room", room_label)]),
        description,
    ));
}

/// Open the address picker for starting a new chat, then run
/// [`start_chat`] on the selection.
pub async fn show_start_chat_dialog(
    services: &AppServices,
) -> Result<Option<InviteResults>, SalonError> {
    if services.bridge.session_user().is_none() {
        return Err(SalonError::permission_denied("no client session"));
    }
    let prompt = AddressPickerPrompt {
        title: services.catalog.lookup("start_chat_title").to_string(),
        description: services
            .catalog
            .lookup("start_chat_description")
            .to_string(),
        button_label: services.catalog.lookup("start_chat_button").to_string(),
        allowed_kinds: vec![AddressKind::Account, AddressKind::Email],
        room_id: None,
    };
    let Some(addresses) = services.presenter.pick_addresses(prompt).await else {
        return Ok(None);
    };
    if addresses.is_empty() {
        return Ok(None);
    }
    match start_chat(services, addresses).await {
        Ok(results) => Ok(results),
        // Already surfaced through the modal; the dialog flow ends here.
        Err(_) => Ok(None),
    }
}

/// Open the address picker for an existing room, then run
/// [`invite_to_room`] on the selection.
pub async fn show_room_invite_dialog(
    services: &AppServices,
    room_id: &RoomId,
) -> Result<Option<InviteResults>, SalonError> {
    if services.bridge.session_user().is_none() {
        return Err(SalonError::permission_denied("no client session"));
    }
    let prompt = AddressPickerPrompt {
        title: services.catalog.lookup("invite_room_title").to_string(),
        description: services
            .catalog
            .lookup("invite_room_description")
            .to_string(),
        button_label: services.catalog.lookup("invite_room_button").to_string(),
        allowed_kinds: vec![AddressKind::Account, AddressKind::Email],
        room_id: Some(room_id.clone()),
    };
    let Some(addresses) = services.presenter.pick_addresses(prompt).await else {
        return Ok(None);
    };
    if addresses.is_empty() {
        return Ok(None);
    }
    invite_to_room(services, room_id, &addresses).await.map(Some)
}
