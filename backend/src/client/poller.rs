use super::service::LobbyService;
use super::session::SessionState;
use super::timer::RepeatingTimer;
use super::view::{LobbyView, present_main_menu, present_room};
use crate::lobby::QueryFilter;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_ROOM_REFRESH: Duration = Duration::from_secs(2);
pub const DEFAULT_LIST_REFRESH: Duration = Duration::from_secs(2);
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Period between fetches of the held lobby
    pub room_refresh: Duration,
    /// Period between public lobby list queries
    pub list_refresh: Duration,
    /// Period between heartbeats while hosting
    pub heartbeat: Duration,
    pub list_filter: QueryFilter,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            room_refresh: DEFAULT_ROOM_REFRESH,
            list_refresh: DEFAULT_LIST_REFRESH,
            heartbeat: DEFAULT_HEARTBEAT,
            list_filter: QueryFilter::default(),
        }
    }
}

/// What one poll step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub list_fetched: bool,
    pub heartbeat_sent: bool,
    pub room_fetched: bool,
    /// The step concluded we are no longer in the held lobby
    pub left_room: bool,
}

/// Timer-gated refresh of the lobby list and the held lobby, plus host heartbeats
pub struct Poller {
    room_timer: RepeatingTimer,
    list_timer: RepeatingTimer,
    heartbeat_timer: RepeatingTimer,
    list_filter: QueryFilter,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        Self {
            room_timer: RepeatingTimer::new(config.room_refresh),
            list_timer: RepeatingTimer::new(config.list_refresh),
            heartbeat_timer: RepeatingTimer::new(config.heartbeat),
            list_filter: config.list_filter,
        }
    }

    pub fn list_filter(&self) -> &QueryFilter {
        &self.list_filter
    }

    /// Advance all timers by `elapsed` and issue whatever calls came due
    pub async fn step<S: LobbyService, V: LobbyView>(
        &mut self,
        service: &S,
        state: &mut SessionState,
        view: &mut V,
        elapsed: Duration,
    ) -> PollReport {
        let mut report = PollReport::default();
        self.refresh_list(service, view, elapsed, &mut report).await;
        self.send_heartbeat(service, state, elapsed, &mut report).await;
        self.refresh_room(service, state, view, elapsed, &mut report).await;
        report
    }

    async fn refresh_list<S: LobbyService, V: LobbyView>(
        &mut self,
        service: &S,
        view: &mut V,
        elapsed: Duration,
        report: &mut PollReport,
    ) {
        if !self.list_timer.tick(elapsed) {
            return;
        }
        report.list_fetched = true;

        match service.query_lobbies(self.list_filter.clone()).await {
            Ok(lobbies) => {
                debug!(count = lobbies.len(), "Lobby list refreshed");
                view.show_lobby_list(&lobbies);
            }
            Err(err) => warn!(%err, "Failed to query lobbies"),
        }
    }

    async fn send_heartbeat<S: LobbyService>(
        &mut self,
        service: &S,
        state: &SessionState,
        elapsed: Duration,
        report: &mut PollReport,
    ) {
        if !state.is_host() {
            return;
        }
        let Some(lobby_id) = state.lobby().map(|l| l.id.clone()) else {
            return;
        };
        if !self.heartbeat_timer.tick(elapsed) {
            return;
        }
        report.heartbeat_sent = true;

        match service.send_heartbeat(&lobby_id).await {
            Ok(()) => debug!(lobby_id, "Heartbeat sent"),
            Err(err) => warn!(lobby_id, %err, "Heartbeat failed"),
        }
    }

    async fn refresh_room<S: LobbyService, V: LobbyView>(
        &mut self,
        service: &S,
        state: &mut SessionState,
        view: &mut V,
        elapsed: Duration,
        report: &mut PollReport,
    ) {
        let Some(lobby_id) = state.lobby().map(|l| l.id.clone()) else {
            return;
        };
        if !self.room_timer.tick(elapsed) {
            return;
        }

        if !state.is_member() {
            info!(lobby_id, "No longer listed as a member, leaving room");
            present_main_menu(state, view);
            report.left_room = true;
            return;
        }

        report.room_fetched = true;
        match service.get_lobby(&lobby_id).await {
            Ok(snapshot) => {
                state.apply_snapshot(snapshot);
                present_room(state, view);
                report.left_room = state.lobby().is_none();
            }
            Err(err) if err.means_membership_lost() => {
                info!(lobby_id, %err, "Lost access to lobby, leaving room");
                present_main_menu(state, view);
                report.left_room = true;
            }
            Err(err) => warn!(lobby_id, %err, "Failed to refresh lobby"),
        }
    }
}
