use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Identities unused for this long are forgotten by the presence sweep
pub const DEFAULT_PLAYER_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Player ids handed out by anonymous sign-in, with when each was last seen
pub struct PlayerRegistry {
    players: DashMap<String, Instant>,
    idle_timeout: Duration,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_PLAYER_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            players: DashMap::new(),
            idle_timeout,
        }
    }

    pub fn sign_in_anonymously(&self) -> String {
        let player_id = uuid::Uuid::new_v4().to_string();
        self.players.insert(player_id.clone(), Instant::now());
        info!(player_id, "Player signed in");
        player_id
    }

    pub fn is_known(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }

    /// Record activity for a known player. Returns false for unknown ids.
    pub fn mark_seen(&self, player_id: &str) -> bool {
        self.mark_seen_at(player_id, Instant::now())
    }

    pub(crate) fn mark_seen_at(&self, player_id: &str, now: Instant) -> bool {
        match self.players.get_mut(player_id) {
            Some(mut last_seen) => {
                *last_seen = now;
                true
            }
            None => false,
        }
    }

    /// Forget identities idle for longer than the timeout
    pub fn prune(&self, now: Instant) -> usize {
        let before = self.players.len();
        self.players
            .retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= self.idle_timeout);
        let pruned = before.saturating_sub(self.players.len());
        if pruned > 0 {
            debug!(pruned, "Forgot idle players");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
