// Purpose: runtime configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

pub const LISTEN_ADDR_VAR: &str = "FLOWLINE_LISTEN_ADDR";
pub const BROADCAST_INTERVAL_VAR: &str = "FLOWLINE_BROADCAST_INTERVAL_SECS";
pub const BROADCAST_BACKOFF_VAR: &str = "FLOWLINE_BROADCAST_BACKOFF_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub broadcast_interval: Duration,
    pub broadcast_backoff: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::build(
            std::env::var(LISTEN_ADDR_VAR).ok(),
            std::env::var(BROADCAST_INTERVAL_VAR).ok(),
            std::env::var(BROADCAST_BACKOFF_VAR).ok(),
        )
    }

    fn build(
        listen_addr: Option<String>,
        interval_secs: Option<String>,
        backoff_secs: Option<String>,
    ) -> anyhow::Result<Self> {
        let listen_addr = listen_addr
            .unwrap_or_else(|| "0.0.0.0:4000".to_string())
            .parse()
            .with_context(|| format!("{LISTEN_ADDR_VAR} is not a socket address"))?;
        let broadcast_interval = parse_secs(interval_secs, 30, BROADCAST_INTERVAL_VAR)?;
        let broadcast_backoff = parse_secs(backoff_secs, 5, BROADCAST_BACKOFF_VAR)?;

        Ok(Self {
            listen_addr,
            broadcast_interval,
            broadcast_backoff,
        })
    }
}

fn parse_secs(value: Option<String>, default: u64, var: &str) -> anyhow::Result<Duration> {
    let secs = match value {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{var} is not a number of seconds"))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
