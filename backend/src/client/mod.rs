//! Client side of the lobby service: a signed-in transport, the session it
//! tracks, and the timers that keep that session fresh.

mod actions;
pub mod http;
pub mod local;
pub mod poller;
pub mod service;
pub mod session;
pub mod timer;
pub mod view;

pub use http::HttpLobbyService;
pub use local::DirectoryService;
pub use poller::{PollReport, Poller, PollerConfig};
pub use service::{CreateLobbyOptions, LobbyService};
pub use session::{Screen, SessionState};
pub use timer::RepeatingTimer;
pub use view::{LobbyView, MemberRow, RoomAction, RoomPresentation};

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

/// A lobby service together with the poller driving it
pub struct LobbyClient<S> {
    service: S,
    poller: Poller,
}

impl<S: LobbyService> LobbyClient<S> {
    pub fn new(service: S, config: PollerConfig) -> Self {
        Self {
            service,
            poller: Poller::new(config),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fresh session state for the signed-in player
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.service.player_id())
    }

    /// One poll step with `elapsed` time since the previous one
    pub async fn poll<V: LobbyView>(
        &mut self,
        state: &mut SessionState,
        view: &mut V,
        elapsed: Duration,
    ) -> PollReport {
        self.poller.step(&self.service, state, view, elapsed).await
    }

    /// Poll every `tick` of wall-clock time until `shutdown` resolves
    pub async fn run_until<V, F>(
        &mut self,
        state: &mut SessionState,
        view: &mut V,
        tick: Duration,
        shutdown: F,
    ) where
        V: LobbyView,
        F: Future<Output = ()>,
    {
        info!(?tick, "Starting poll loop");
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last);
                    last = now;
                    self.poll(state, view, elapsed).await;
                }
            }
        }

        info!("Poll loop stopped");
    }
}
