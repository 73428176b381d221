// src/config.rs

use crate::book::ChainOrder;
use crate::constants::{
    DEFAULT_BUDGET_BYTES, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_PLY, DEFAULT_TABLE_SIZE, MAX_MOVES_PER_POSITION,
};
use crate::error::ConfigError;
use crate::zobrist::PrngVariant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// How the facts were produced. Each source targets a different engine
/// build, so it also picks the PRNG variant and chain order when the
/// configuration leaves them open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Lines,
    Graph,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub table_size: usize,
    pub max_entries: usize,
    pub max_ply: u32,
    pub max_moves_per_position: usize,
    pub budget_bytes: usize,
    pub prng: Option<PrngVariant>,
    pub chain_order: Option<ChainOrder>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            max_entries: DEFAULT_MAX_ENTRIES,
            max_ply: DEFAULT_MAX_PLY,
            max_moves_per_position: MAX_MOVES_PER_POSITION,
            budget_bytes: DEFAULT_BUDGET_BYTES,
            prng: None,
            chain_order: None,
        }
    }
}

impl BuildConfig {
    pub fn prng_for(&self, variant: Variant) -> PrngVariant {
        self.prng.unwrap_or(match variant {
            Variant::Lines => PrngVariant::Direct,
            Variant::Graph => PrngVariant::Mixed,
        })
    }

    pub fn chain_order_for(&self, variant: Variant) -> ChainOrder {
        self.chain_order.unwrap_or(match variant {
            Variant::Lines => ChainOrder::FirstIsHead,
            Variant::Graph => ChainOrder::LastIsHead,
        })
    }
}

pub fn save_config(path: &Path, config: &BuildConfig) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)?;
    fs::File::create(path)?.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
