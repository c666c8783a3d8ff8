// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// settle events from spawned network tasks. Owns the roster store, the draft
// session, and the action gateway as one explicit session object; nothing is
// ambient or global. Pushes incremental UI updates to the TUI render loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::draft::gateway::{ActionError, ActionGateway, PendingAction};
use crate::draft::roster::RosterStore;
use crate::draft::session::DraftSession;
use crate::net::{ApiError, DraftAuthority};
use crate::protocol::{BusyState, ConfirmPrompt, NetEvent, UiUpdate, UserCommand};
use crate::view::{self, FilterState, PanelSlots, RosterView};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state: every stateful component of the client,
/// owned in one place and injected where needed.
pub struct AppState<A> {
    pub config: Config,
    authority: Arc<A>,
    pub store: RosterStore,
    pub session: DraftSession,
    pub gateway: ActionGateway<A>,
    pub filter: FilterState,
    /// The canonical rendered roster; the TUI holds a replica kept in step
    /// via full `Roster` updates and status-only patches.
    pub roster_view: RosterView,
    /// A validated action waiting on the user's confirmation.
    pending: Option<PendingAction>,
    /// Set while the upstream refresh step of a sync is outstanding.
    sync_in_flight: bool,
    /// Set while a catalog fetch is outstanding.
    load_in_flight: bool,
    net_tx: mpsc::Sender<NetEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
}

impl<A: DraftAuthority> AppState<A> {
    pub fn new(
        config: Config,
        authority: Arc<A>,
        net_tx: mpsc::Sender<NetEvent>,
        ui_tx: mpsc::Sender<UiUpdate>,
    ) -> Self {
        let gateway = ActionGateway::new(Arc::clone(&authority), net_tx.clone());
        AppState {
            config,
            authority,
            store: RosterStore::new(),
            session: DraftSession::new(),
            gateway,
            filter: FilterState::default(),
            roster_view: RosterView::default(),
            pending: None,
            sync_in_flight: false,
            load_in_flight: false,
            net_tx,
            ui_tx,
        }
    }

    fn panel_slots(&self) -> PanelSlots {
        PanelSlots {
            picks: self.config.draft.pick_slots,
            bans: self.config.draft.ban_slots,
        }
    }

    fn busy(&self) -> BusyState {
        BusyState {
            sync: self.sync_in_flight || self.load_in_flight,
            action: self.gateway.action_in_flight(),
        }
    }

    /// Whether the sync trigger is currently disabled.
    pub fn sync_busy(&self) -> bool {
        self.sync_in_flight || self.load_in_flight
    }

    async fn push(&self, update: UiUpdate) {
        // The TUI dropping its receiver means we are shutting down; updates
        // can be discarded.
        let _ = self.ui_tx.send(update).await;
    }

    async fn push_busy(&self) {
        self.push(UiUpdate::Busy(self.busy())).await;
    }

    /// Rebuild the roster view in full and push it to the TUI. Used when the
    /// catalog or the filter changes; draft transitions use the cheaper
    /// status-only path.
    async fn rebuild_roster(&mut self) {
        self.roster_view = view::build_roster_view(&self.store, &self.filter, &self.session);
        self.push(UiUpdate::Roster(self.roster_view.clone())).await;
    }

    /// Push the draft-derived fragments after a snapshot replacement: status
    /// patches for affected roster entries, the turn banner, and the panels.
    async fn refresh_draft_fragments(&mut self) {
        let patches = view::refresh_statuses(&mut self.roster_view, &self.session);
        if !patches.is_empty() {
            self.push(UiUpdate::Statuses(patches)).await;
        }
        self.push(UiUpdate::TurnBanner(view::turn_banner(&self.session))).await;
        self.push(UiUpdate::TeamPanels(view::team_panels(&self.session, self.panel_slots())))
            .await;
    }

    /// Kick off a catalog fetch unless one is already outstanding.
    pub async fn spawn_load(&mut self) {
        if self.load_in_flight {
            debug!("catalog load already in flight; ignoring");
            return;
        }
        self.load_in_flight = true;
        self.push_busy().await;

        let authority = Arc::clone(&self.authority);
        let net_tx = self.net_tx.clone();
        tokio::spawn(async move {
            let result = authority.fetch_heroes().await;
            let _ = net_tx.send(NetEvent::RosterLoaded(result)).await;
        });
    }

    /// Kick off the upstream refresh followed by a reload. No-op while a
    /// sync or load is outstanding (the UI trigger is disabled too).
    async fn spawn_sync(&mut self) {
        if self.sync_busy() {
            debug!("sync already in flight; ignoring trigger");
            return;
        }
        self.sync_in_flight = true;
        self.push_busy().await;

        let authority = Arc::clone(&self.authority);
        let net_tx = self.net_tx.clone();
        tokio::spawn(async move {
            let sync_result = authority.sync_heroes().await;
            let succeeded = sync_result.is_ok();
            let _ = net_tx.send(NetEvent::SyncSettled(sync_result)).await;
            if succeeded {
                let result = authority.fetch_heroes().await;
                let _ = net_tx.send(NetEvent::RosterLoaded(result)).await;
            }
        });
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    /// Handle one user command. `Quit` is handled by the run loop, not here.
    pub async fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::SyncRoster => self.spawn_sync().await,
            UserCommand::ReloadRoster => self.spawn_load().await,
            UserCommand::StartDraft => self.handle_start_draft().await,
            UserCommand::HeroClicked(hero_id) => self.handle_hero_clicked(hero_id).await,
            UserCommand::ConfirmAction(accepted) => self.handle_confirm(accepted).await,
            UserCommand::FilterChanged { search, attribute } => {
                self.filter = FilterState { search, attribute };
                self.rebuild_roster().await;
            }
            UserCommand::Quit => {}
        }
    }

    async fn handle_start_draft(&mut self) {
        match self.gateway.start_draft() {
            Ok(()) => self.push_busy().await,
            Err(err) => self.push(UiUpdate::Notice(err.to_string())).await,
        }
    }

    async fn handle_hero_clicked(&mut self, hero_id: i64) {
        match self.gateway.prepare_action(&self.session, &self.store, hero_id) {
            Ok(pending) => {
                let prompt = ConfirmPrompt {
                    hero_name: pending.hero_name.clone(),
                    team: pending.team,
                    phase: pending.phase,
                };
                self.pending = Some(pending);
                self.push(UiUpdate::Confirm(prompt)).await;
            }
            // A click on an already picked/banned card is a no-op, not an
            // error dialog.
            Err(ActionError::AlreadyResolved) => {
                debug!(hero_id, "click on resolved hero ignored");
            }
            Err(err) => self.push(UiUpdate::Notice(err.to_string())).await,
        }
    }

    async fn handle_confirm(&mut self, accepted: bool) {
        let Some(pending) = self.pending.take() else {
            debug!("confirmation answer with no pending action; ignoring");
            return;
        };
        if !accepted {
            debug!(hero_id = pending.hero_id, "action aborted at confirmation");
            return;
        }
        match self.gateway.dispatch(&self.session, &pending) {
            Ok(()) => self.push_busy().await,
            Err(ActionError::AlreadyResolved) => {
                debug!(hero_id = pending.hero_id, "hero resolved while prompt was open");
            }
            Err(err) => self.push(UiUpdate::Notice(err.to_string())).await,
        }
    }

    // -----------------------------------------------------------------------
    // Network settle handling
    // -----------------------------------------------------------------------

    /// Handle one settle event from a spawned network task. Every branch
    /// clears the relevant in-flight guard before anything else.
    pub async fn handle_net_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::RosterLoaded(Ok(heroes)) => {
                self.load_in_flight = false;
                self.sync_in_flight = false;
                info!(count = heroes.len(), "hero catalog replaced");
                self.store.replace_all(heroes);
                self.rebuild_roster().await;
                self.push_busy().await;
            }
            NetEvent::RosterLoaded(Err(err)) => {
                self.load_in_flight = false;
                self.sync_in_flight = false;
                warn!(error = %err, "hero catalog load failed");
                self.push(UiUpdate::RosterError(format!(
                    "Failed to load heroes ({}). Sync the roster and retry.",
                    err
                )))
                .await;
                self.push_busy().await;
            }
            NetEvent::SyncSettled(Ok(message)) => {
                // The source's own status message, verbatim. The follow-up
                // catalog fetch is already on its way.
                info!("roster sync accepted");
                self.push(UiUpdate::Notice(message)).await;
            }
            NetEvent::SyncSettled(Err(err)) => {
                self.sync_in_flight = false;
                warn!(error = %err, "roster sync failed");
                self.push(UiUpdate::Notice(format!("Failed to sync heroes: {}", err))).await;
                self.push_busy().await;
            }
            NetEvent::StartSettled(result) => {
                self.gateway.settle();
                match result {
                    Ok(snapshot) => {
                        info!(draft_id = snapshot.id, "draft started");
                        // Starting a new draft abandons the previous one; a
                        // stale confirmation prompt goes with it.
                        self.pending = None;
                        self.session.replace(snapshot);
                        self.refresh_draft_fragments().await;
                    }
                    Err(err) => {
                        // The existing draft (if any) stays usable.
                        warn!(error = %err, "draft start failed");
                        self.push(UiUpdate::Notice(start_failure_text(&err))).await;
                    }
                }
                self.push_busy().await;
            }
            NetEvent::ActionSettled { hero_id, phase, result } => {
                self.gateway.settle();
                match result {
                    Ok(snapshot) => {
                        info!(hero_id, phase = %phase, "action accepted");
                        self.session.replace(snapshot);
                        self.refresh_draft_fragments().await;
                    }
                    Err(err) => {
                        // The authority refused or the transport failed;
                        // local state must not advance on a guess.
                        warn!(hero_id, error = %err, "action not accepted");
                        self.push(UiUpdate::Notice(action_failure_text(&err))).await;
                    }
                }
                self.push_busy().await;
            }
        }
    }
}

/// User-facing text for a failed start: the authority's refusal verbatim,
/// otherwise a transport-level description.
fn start_failure_text(err: &ApiError) -> String {
    if err.is_rejection() {
        err.to_string()
    } else {
        format!("Failed to start draft: {}", err)
    }
}

/// User-facing text for a failed pick/ban.
fn action_failure_text(err: &ApiError) -> String {
    if err.is_rejection() {
        err.to_string()
    } else {
        format!("Action failed: {}", err)
    }
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

/// Run the orchestrator event loop until the TUI sends `Quit` or both
/// channels close.
pub async fn run<A: DraftAuthority>(
    mut state: AppState<A>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut net_rx: mpsc::Receiver<NetEvent>,
) -> anyhow::Result<()> {
    // Initial load and the empty-state fragments so the first frame has
    // content.
    state.spawn_load().await;
    state
        .push(UiUpdate::TurnBanner(view::turn_banner(&state.session)))
        .await;
    state
        .push(UiUpdate::TeamPanels(view::team_panels(
            &state.session,
            state.panel_slots(),
        )))
        .await;

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                match command {
                    Some(UserCommand::Quit) | None => {
                        info!("orchestrator shutting down");
                        break;
                    }
                    Some(command) => state.handle_command(command).await,
                }
            }
            event = net_rx.recv() => {
                match event {
                    Some(event) => state.handle_net_event(event).await,
                    // All senders gone: nothing can settle anymore.
                    None => break,
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
