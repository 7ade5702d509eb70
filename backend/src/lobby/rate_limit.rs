use crate::error::{LobbyError, Result};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::warn;

const WINDOW: Duration = Duration::from_secs(1);

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed one-second request budget per player. A limit of zero disables limiting.
pub struct RateLimiter {
    limit: u32,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(limit_per_second: u32) -> Self {
        Self {
            limit: limit_per_second,
            windows: DashMap::new(),
        }
    }

    pub fn check(&self, player_id: &str) -> Result<()> {
        self.check_at(player_id, Instant::now())
    }

    pub(crate) fn check_at(&self, player_id: &str, now: Instant) -> Result<()> {
        if self.limit == 0 {
            return Ok(());
        }

        let mut window = self
            .windows
            .entry(player_id.to_string())
            .or_insert(Window { started: now, count: 0 });

        if now.saturating_duration_since(window.started) >= WINDOW {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.limit {
            warn!(player_id, limit = self.limit, "Rate limit exceeded");
            return Err(LobbyError::RateLimited);
        }

        window.count += 1;
        Ok(())
    }

    /// Drop windows that have been idle for a full period
    pub fn prune(&self, now: Instant) {
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < WINDOW);
    }

    pub fn tracked_players(&self) -> usize {
        self.windows.len()
    }
}
