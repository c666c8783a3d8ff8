// Action gateway: mediates start/pick/ban requests against the draft
// authority.
//
// Every request runs the same discipline: local precondition checks that
// never touch the network, a confirmation seam before anything irreversible,
// a single-flight guard around the dispatch, and settlement through a
// `NetEvent` so the guard is cleared on every exit path (success, rejection,
// transport failure).

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::draft::roster::RosterStore;
use crate::draft::session::{DraftSession, Phase, Team};
use crate::net::DraftAuthority;
use crate::protocol::NetEvent;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Local precondition rejections. None of these issue a network call; the
/// authority's own refusals arrive separately as `ApiError::Rejected` on the
/// settle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no active draft; start one first")]
    NoActiveDraft,

    /// The hero is already picked or banned in the current snapshot. Callers
    /// treat this as a silent no-op, not an error dialog.
    #[error("hero is already picked or banned")]
    AlreadyResolved,

    #[error("the draft is complete")]
    DraftComplete,

    /// Another start/pick/ban is still outstanding for this session.
    #[error("another action is still in flight")]
    ActionInProgress,
}

// ---------------------------------------------------------------------------
// PendingAction
// ---------------------------------------------------------------------------

/// A validated action, exposed to the caller before dispatch so an
/// irreversible pick/ban can be confirmed (or aborted with no side effects).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub draft_id: i64,
    pub hero_id: i64,
    /// Resolved display name for the confirmation prompt ("Unknown" when the
    /// id is not in the catalog).
    pub hero_name: String,
    pub team: Team,
    pub phase: Phase,
}

/// What `request_action` did after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The caller confirmed; the request is on its way to the authority.
    Dispatched,
    /// The caller declined at the confirmation seam; nothing was sent.
    Aborted,
}

// ---------------------------------------------------------------------------
// ActionGateway
// ---------------------------------------------------------------------------

/// Gateway for draft actions. Owns the single-flight guard and the handle to
/// the authority; never mutates the session itself — the orchestrator applies
/// the authoritative snapshot when the settle event arrives.
pub struct ActionGateway<A> {
    authority: Arc<A>,
    events_tx: mpsc::Sender<NetEvent>,
    in_flight: bool,
}

impl<A: DraftAuthority> ActionGateway<A> {
    pub fn new(authority: Arc<A>, events_tx: mpsc::Sender<NetEvent>) -> Self {
        ActionGateway {
            authority,
            events_tx,
            in_flight: false,
        }
    }

    /// Whether a start/pick/ban is currently outstanding.
    pub fn action_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Clear the single-flight guard. Called by the orchestrator when the
    /// matching `StartSettled`/`ActionSettled` event arrives, regardless of
    /// outcome.
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    /// Validate a hero click against the current snapshot without side
    /// effects and compute the intent that would be dispatched.
    pub fn prepare_action(
        &self,
        session: &DraftSession,
        roster: &RosterStore,
        hero_id: i64,
    ) -> Result<PendingAction, ActionError> {
        if self.in_flight {
            return Err(ActionError::ActionInProgress);
        }
        let draft = session.current().ok_or(ActionError::NoActiveDraft)?;
        if draft.complete {
            return Err(ActionError::DraftComplete);
        }
        if draft.is_picked(hero_id) || draft.is_banned(hero_id) {
            return Err(ActionError::AlreadyResolved);
        }

        let team = if draft.radiant_turn { Team::Radiant } else { Team::Dire };
        let phase = if draft.pick_phase { Phase::Pick } else { Phase::Ban };

        Ok(PendingAction {
            draft_id: draft.id,
            hero_id,
            hero_name: roster.display_name(hero_id).to_string(),
            team,
            phase,
        })
    }

    /// Dispatch a previously confirmed action to the authority.
    ///
    /// Preconditions are re-checked against the session: the snapshot may
    /// have been replaced between the prompt and the answer. Sets the
    /// in-flight guard before spawning; the guard stays set until the
    /// orchestrator observes the settle event.
    pub fn dispatch(
        &mut self,
        session: &DraftSession,
        pending: &PendingAction,
    ) -> Result<(), ActionError> {
        if self.in_flight {
            return Err(ActionError::ActionInProgress);
        }
        let draft = session.current().ok_or(ActionError::NoActiveDraft)?;
        if draft.id != pending.draft_id {
            // The prompt referred to a draft that has since been replaced.
            return Err(ActionError::NoActiveDraft);
        }
        if draft.complete {
            return Err(ActionError::DraftComplete);
        }
        if draft.is_picked(pending.hero_id) || draft.is_banned(pending.hero_id) {
            return Err(ActionError::AlreadyResolved);
        }

        self.in_flight = true;
        info!(
            draft_id = pending.draft_id,
            hero_id = pending.hero_id,
            phase = %pending.phase,
            team = %pending.team,
            "dispatching draft action"
        );

        let authority = Arc::clone(&self.authority);
        let events_tx = self.events_tx.clone();
        let draft_id = pending.draft_id;
        let hero_id = pending.hero_id;
        let phase = pending.phase;
        tokio::spawn(async move {
            let result = match phase {
                Phase::Pick => authority.pick_hero(draft_id, hero_id).await,
                Phase::Ban => authority.ban_hero(draft_id, hero_id).await,
            };
            if events_tx
                .send(NetEvent::ActionSettled { hero_id, phase, result })
                .await
                .is_err()
            {
                warn!("orchestrator gone; dropping action settle event");
            }
        });

        Ok(())
    }

    /// The composite "click a hero" operation: validate, expose the intent to
    /// the confirmation seam, and dispatch unless the caller aborts.
    pub fn request_action(
        &mut self,
        session: &DraftSession,
        roster: &RosterStore,
        hero_id: i64,
        confirm: impl FnOnce(&PendingAction) -> bool,
    ) -> Result<RequestOutcome, ActionError> {
        let pending = self.prepare_action(session, roster, hero_id)?;
        if !confirm(&pending) {
            return Ok(RequestOutcome::Aborted);
        }
        self.dispatch(session, &pending)?;
        Ok(RequestOutcome::Dispatched)
    }

    /// Request creation of a new draft.
    ///
    /// Shares the single-flight guard with pick/ban so a start cannot race an
    /// outstanding action. The existing session (if any) is only replaced
    /// when the settle event carries a success.
    pub fn start_draft(&mut self) -> Result<(), ActionError> {
        if self.in_flight {
            return Err(ActionError::ActionInProgress);
        }
        self.in_flight = true;
        info!("requesting new draft");

        let authority = Arc::clone(&self.authority);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = authority.start_draft().await;
            if events_tx.send(NetEvent::StartSettled(result)).await.is_err() {
                warn!("orchestrator gone; dropping start settle event");
            }
        });

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::draft::hero::{Hero, HeroAttribute};
    use crate::draft::session::DraftSnapshot;
    use crate::net::ApiError;

    /// In-process authority fake: records calls, answers from a canned
    /// script, and can hold a response open behind a `Notify` gate.
    struct FakeAuthority {
        calls: Mutex<Vec<String>>,
        reject_with: Option<String>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeAuthority {
        fn accepting() -> Self {
            FakeAuthority { calls: Mutex::new(Vec::new()), reject_with: None, gate: None }
        }

        fn rejecting(message: &str) -> Self {
            FakeAuthority {
                calls: Mutex::new(Vec::new()),
                reject_with: Some(message.to_string()),
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            FakeAuthority {
                calls: Mutex::new(Vec::new()),
                reject_with: None,
                gate: Some(gate),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn respond(&self, call: String, draft_id: i64) -> Result<DraftSnapshot, ApiError> {
            self.calls.lock().unwrap().push(call);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reject_with {
                Some(message) => Err(ApiError::Rejected { message: message.clone() }),
                None => Ok(empty_snapshot(draft_id)),
            }
        }
    }

    #[async_trait]
    impl DraftAuthority for FakeAuthority {
        async fn fetch_heroes(&self) -> Result<Vec<Hero>, ApiError> {
            self.calls.lock().unwrap().push("fetch".to_string());
            Ok(Vec::new())
        }

        async fn sync_heroes(&self) -> Result<String, ApiError> {
            self.calls.lock().unwrap().push("sync".to_string());
            Ok("synced".to_string())
        }

        async fn start_draft(&self) -> Result<DraftSnapshot, ApiError> {
            self.respond("start".to_string(), 7).await
        }

        async fn pick_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError> {
            self.respond(format!("pick {} {}", draft_id, hero_id), draft_id).await
        }

        async fn ban_hero(&self, draft_id: i64, hero_id: i64) -> Result<DraftSnapshot, ApiError> {
            self.respond(format!("ban {} {}", draft_id, hero_id), draft_id).await
        }
    }

    fn empty_snapshot(id: i64) -> DraftSnapshot {
        DraftSnapshot {
            id,
            start_time: None,
            radiant_picks: Vec::new(),
            dire_picks: Vec::new(),
            radiant_bans: Vec::new(),
            dire_bans: Vec::new(),
            radiant_turn: true,
            pick_phase: false,
            complete: false,
        }
    }

    fn hero(id: i64, name: &str) -> Hero {
        Hero {
            id,
            name: name.to_string(),
            primary_attribute: HeroAttribute::Strength,
            image_url: String::new(),
        }
    }

    fn roster() -> RosterStore {
        let mut store = RosterStore::new();
        store.replace_all(vec![hero(1, "Axe"), hero(2, "Mirana")]);
        store
    }

    fn setup(
        authority: FakeAuthority,
    ) -> (Arc<FakeAuthority>, ActionGateway<FakeAuthority>, mpsc::Receiver<NetEvent>) {
        let authority = Arc::new(authority);
        let (tx, rx) = mpsc::channel(16);
        let gateway = ActionGateway::new(Arc::clone(&authority), tx);
        (authority, gateway, rx)
    }

    #[tokio::test]
    async fn no_active_draft_rejects_without_network_call() {
        let (authority, mut gateway, _rx) = setup(FakeAuthority::accepting());
        let session = DraftSession::new();
        let result = gateway.request_action(&session, &roster(), 1, |_| true);
        assert_eq!(result, Err(ActionError::NoActiveDraft));
        assert!(authority.calls().is_empty());
    }

    #[tokio::test]
    async fn resolved_hero_rejects_without_network_call() {
        let (authority, mut gateway, _rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        let mut snap = empty_snapshot(7);
        snap.radiant_bans.push(hero(1, "Axe"));
        snap.dire_picks.push(hero(2, "Mirana"));
        session.replace(snap);

        for id in [1, 2] {
            let result = gateway.request_action(&session, &roster(), id, |_| true);
            assert_eq!(result, Err(ActionError::AlreadyResolved));
        }
        assert!(authority.calls().is_empty());
    }

    #[tokio::test]
    async fn complete_draft_rejects_without_network_call() {
        let (authority, mut gateway, _rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        let mut snap = empty_snapshot(7);
        snap.complete = true;
        session.replace(snap);

        let result = gateway.request_action(&session, &roster(), 1, |_| true);
        assert_eq!(result, Err(ActionError::DraftComplete));
        assert!(authority.calls().is_empty());
    }

    #[tokio::test]
    async fn ban_phase_intent_dispatches_ban_for_acting_team() {
        let (authority, mut gateway, mut rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        // radiant_turn: true, pick_phase: false -> Radiant bans next.
        session.replace(empty_snapshot(7));

        let mut seen = None;
        let outcome = gateway
            .request_action(&session, &roster(), 1, |pending| {
                seen = Some(pending.clone());
                true
            })
            .unwrap();
        assert_eq!(outcome, RequestOutcome::Dispatched);

        let pending = seen.unwrap();
        assert_eq!(pending.team, Team::Radiant);
        assert_eq!(pending.phase, Phase::Ban);
        assert_eq!(pending.hero_name, "Axe");
        assert_eq!(pending.draft_id, 7);

        match rx.recv().await.unwrap() {
            NetEvent::ActionSettled { hero_id, phase, result } => {
                assert_eq!(hero_id, 1);
                assert_eq!(phase, Phase::Ban);
                assert!(result.is_ok());
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(authority.calls(), vec!["ban 7 1".to_string()]);
    }

    #[tokio::test]
    async fn pick_phase_intent_dispatches_pick() {
        let (authority, mut gateway, mut rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        let mut snap = empty_snapshot(9);
        snap.radiant_turn = false;
        snap.pick_phase = true;
        session.replace(snap);

        let outcome = gateway
            .request_action(&session, &roster(), 2, |pending| {
                assert_eq!(pending.team, Team::Dire);
                assert_eq!(pending.phase, Phase::Pick);
                true
            })
            .unwrap();
        assert_eq!(outcome, RequestOutcome::Dispatched);

        let _ = rx.recv().await.unwrap();
        assert_eq!(authority.calls(), vec!["pick 9 2".to_string()]);
    }

    #[tokio::test]
    async fn aborting_at_the_confirmation_seam_has_no_side_effects() {
        let (authority, mut gateway, _rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        session.replace(empty_snapshot(7));

        let outcome = gateway.request_action(&session, &roster(), 1, |_| false).unwrap();
        assert_eq!(outcome, RequestOutcome::Aborted);
        assert!(authority.calls().is_empty());
        assert!(!gateway.action_in_flight());
    }

    #[tokio::test]
    async fn unknown_hero_name_falls_back_to_unknown() {
        let (_authority, gateway, _rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        session.replace(empty_snapshot(7));

        let pending = gateway.prepare_action(&session, &roster(), 999).unwrap();
        assert_eq!(pending.hero_name, "Unknown");
    }

    #[tokio::test]
    async fn second_request_while_in_flight_is_rejected_locally() {
        let gate = Arc::new(Notify::new());
        let (authority, mut gateway, mut rx) = setup(FakeAuthority::gated(Arc::clone(&gate)));
        let mut session = DraftSession::new();
        session.replace(empty_snapshot(7));

        let first = gateway.request_action(&session, &roster(), 1, |_| true).unwrap();
        assert_eq!(first, RequestOutcome::Dispatched);
        assert!(gateway.action_in_flight());

        // The double-click: the first request has not settled yet.
        let second = gateway.request_action(&session, &roster(), 2, |_| true);
        assert_eq!(second, Err(ActionError::ActionInProgress));

        // Release the held response; exactly one call reached the authority.
        gate.notify_one();
        let _ = rx.recv().await.unwrap();
        assert_eq!(authority.calls().len(), 1);
    }

    #[tokio::test]
    async fn guard_clears_after_rejection_settle() {
        let (authority, mut gateway, mut rx) = setup(FakeAuthority::rejecting("Not your turn"));
        let mut session = DraftSession::new();
        session.replace(empty_snapshot(7));

        gateway.request_action(&session, &roster(), 1, |_| true).unwrap();
        let event = rx.recv().await.unwrap();
        match event {
            NetEvent::ActionSettled { result, .. } => {
                let err = result.unwrap_err();
                assert_eq!(err.to_string(), "Not your turn");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        // The orchestrator clears the guard on settle; a retry then reaches
        // the authority again.
        gateway.settle();
        gateway.request_action(&session, &roster(), 2, |_| true).unwrap();
        let _ = rx.recv().await.unwrap();
        assert_eq!(authority.calls().len(), 2);
    }

    #[tokio::test]
    async fn start_draft_shares_the_single_flight_guard() {
        let gate = Arc::new(Notify::new());
        let (authority, mut gateway, mut rx) = setup(FakeAuthority::gated(Arc::clone(&gate)));

        gateway.start_draft().unwrap();
        assert_eq!(gateway.start_draft(), Err(ActionError::ActionInProgress));

        gate.notify_one();
        match rx.recv().await.unwrap() {
            NetEvent::StartSettled(result) => assert_eq!(result.unwrap().id, 7),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(authority.calls(), vec!["start".to_string()]);
    }

    #[tokio::test]
    async fn dispatch_rejects_stale_pending_for_replaced_draft() {
        let (_authority, mut gateway, _rx) = setup(FakeAuthority::accepting());
        let mut session = DraftSession::new();
        session.replace(empty_snapshot(7));
        let pending = gateway.prepare_action(&session, &roster(), 1).unwrap();

        // A new draft replaced the one the prompt was about.
        session.replace(empty_snapshot(8));
        assert_eq!(
            gateway.dispatch(&session, &pending),
            Err(ActionError::NoActiveDraft)
        );
    }
}
