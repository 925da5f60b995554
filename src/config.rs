use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::anilist::ANILIST_ENDPOINT;
use crate::franchise::{ListStatus, Vocabulary};

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub anilist_endpoint: String,
    pub anilist_timeout: Duration,
    pub vocabulary: Vocabulary,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{}'", v))?,
            None => DEFAULT_PORT,
        };
        let ip = match get("BIND_ADDR") {
            Some(v) => v
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("BIND_ADDR must be an IP address, got '{}'", v))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let timeout_secs = match get("ANILIST_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("ANILIST_TIMEOUT_SECS must be an integer, got '{}'", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut vocabulary = Vocabulary::default();
        if get("WATCHTALLY_INCLUDE_REPEATING").is_some_and(|v| is_truthy(&v)) {
            vocabulary = vocabulary.with_status(ListStatus::Repeating);
        }

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            anilist_endpoint: get("ANILIST_ENDPOINT")
                .unwrap_or_else(|| ANILIST_ENDPOINT.to_string()),
            anilist_timeout: Duration::from_secs(timeout_secs),
            vocabulary,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
