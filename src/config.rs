//! Runtime configuration for a [`Library`](crate::Library).
//!
//! Big constants travel as decimal strings so a JSON round-trip through
//! JavaScript never rounds them.

use anyhow::{anyhow, Context, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_MODULUS: &str = "340282366920938463463374607431768211297";
pub const DEFAULT_MULTIPLIER: &str = "2862933555777941757";
pub const DEFAULT_INCREMENT: &str = "3037000493";
pub const DEFAULT_MAX_SEARCH_ITERATIONS: u64 = 50_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    pub modulus: String,
    pub multiplier: String,
    pub increment: String,
    pub max_search_iterations: u64,
    pub verbose: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            modulus: DEFAULT_MODULUS.to_string(),
            multiplier: DEFAULT_MULTIPLIER.to_string(),
            increment: DEFAULT_INCREMENT.to_string(),
            max_search_iterations: DEFAULT_MAX_SEARCH_ITERATIONS,
            verbose: false,
        }
    }
}

/// The three generator constants, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineParams {
    pub modulus: BigUint,
    pub multiplier: BigUint,
    pub increment: BigUint,
}

impl LibraryConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LibraryConfig =
            serde_json::from_str(json).context("Invalid library configuration")?;
        // surface bad constants now rather than on first page request
        crate::engine::LcgEngine::new(config.engine_params()?)?;
        Ok(config)
    }

    pub fn engine_params(&self) -> Result<EngineParams> {
        Ok(EngineParams {
            modulus: parse_constant("modulus", &self.modulus)?,
            multiplier: parse_constant("multiplier", &self.multiplier)?,
            increment: parse_constant("increment", &self.increment)?,
        })
    }
}

fn parse_constant(name: &str, value: &str) -> Result<BigUint> {
    BigUint::from_str(value.trim())
        .map_err(|e| anyhow!("Invalid {} '{}': {}", name, value, e))
}
