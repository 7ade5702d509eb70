use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::lobby::directory::DEFAULT_LOBBY_TIMEOUT;
use crate::lobby::presence::DEFAULT_SWEEP_INTERVAL;

pub const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// How long a lobby survives without a host heartbeat
    pub lobby_timeout: Duration,
    pub sweep_interval: Duration,
    /// Requests per player per second, 0 disables limiting
    pub rate_limit_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            lobby_timeout: DEFAULT_LOBBY_TIMEOUT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            rate_limit_per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            lobby_timeout: parse_var("LOBBY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.lobby_timeout),
            sweep_interval: parse_var("PRESENCE_SWEEP_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND")
                .unwrap_or(defaults.rate_limit_per_second),
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
