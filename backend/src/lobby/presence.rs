use super::directory::SessionDirectory;
use super::identity::PlayerRegistry;
use super::rate_limit::RateLimiter;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically reclaims lobbies whose host stopped heartbeating
/// and forgets idle identities and rate limit windows.
pub fn spawn_presence_monitor(
    directory: Arc<SessionDirectory>,
    players: Arc<PlayerRegistry>,
    limiter: Arc<RateLimiter>,
    sweep_interval: Duration,
) -> JoinHandle<()> {
    info!(
        ?sweep_interval,
        lobby_timeout = ?directory.lobby_timeout(),
        "Starting presence monitor"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            sweep(&directory, &players, &limiter, Instant::now());
        }
    })
}

fn sweep(
    directory: &SessionDirectory,
    players: &PlayerRegistry,
    limiter: &RateLimiter,
    now: Instant,
) {
    let reaped = directory.reap_expired(now);
    let forgotten = players.prune(now);
    limiter.prune(now);
    debug!(
        reaped = reaped.len(),
        forgotten,
        live = directory.len(),
        players = players.len(),
        "Presence sweep"
    );
}
