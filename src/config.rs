//! Optional JSON configuration (`--config`).
//!
//! JSON shape (every key optional):
//! {
//!   "discounts": {
//!     "intra_pf": 0.9,
//!     "inter_pf_flush": 0.0,
//!     "inter_pf_no_flush": 0.5
//!   }
//! }

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub discounts: Discounts,
}

/// Share of proactive-flush persists credited against critical write-backs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Discounts {
    /// Applied to visibility and eviction proactive flushes, any model.
    pub intra_pf: f64,
    /// Applied to inter-thread proactive flushes under the flush model.
    pub inter_pf_flush: f64,
    /// Applied to inter-thread proactive flushes otherwise.
    pub inter_pf_no_flush: f64,
}

impl Default for Discounts {
    fn default() -> Self {
        Self {
            intra_pf: 0.9,
            inter_pf_flush: 0.0,
            inter_pf_no_flush: 0.5,
        }
    }
}

impl Config {
    pub fn load(path: Option<&str>) -> anyhow::Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text =
            fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
        let config: Config =
            serde_json::from_str(&text).with_context(|| format!("parse config file {}", path))?;
        tracing::debug!(?config, "loaded config");
        Ok(config)
    }
}
