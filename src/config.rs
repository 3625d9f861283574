use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use crate::poller::DEFAULT_POLL_INTERVAL;

pub const PRIVATE_KEY_KEY: &'static str = "PRIVATE_KEY";
pub const RELAYER_URL_KEY: &'static str = "RELAYER_URL";
pub const CHAIN_NAME_KEY: &'static str = "CHAIN_NAME";
pub const RPC_URL_KEY: &'static str = "RPC_URL";
pub const CHAIN_ID_KEY: &'static str = "CHAIN_ID";
pub const POLL_INTERVAL_MS_KEY: &'static str = "POLL_INTERVAL_MS";

#[derive(Clone)]
pub struct Config {
    pub private_key: String,
    pub relayer_url: String,
    pub chain_name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub poll_interval: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &"<redacted>")
            .field("relayer_url", &self.relayer_url)
            .field("chain_name", &self.chain_name)
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment, after loading
    /// an optional `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} is not defined"));
        let poll_interval = match lookup(POLL_INTERVAL_MS_KEY) {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("{POLL_INTERVAL_MS_KEY} must be a number"))?,
            ),
            None => DEFAULT_POLL_INTERVAL,
        };
        Ok(Self {
            private_key: required(PRIVATE_KEY_KEY)?,
            relayer_url: required(RELAYER_URL_KEY)?,
            chain_name: required(CHAIN_NAME_KEY)?,
            rpc_url: required(RPC_URL_KEY)?,
            chain_id: required(CHAIN_ID_KEY)?
                .parse()
                .with_context(|| format!("{CHAIN_ID_KEY} must be a number"))?,
            poll_interval,
        })
    }
}
