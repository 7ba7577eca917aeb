//! Reverse search: find a state whose forward expansion starts with a query.
//!
//! Candidates for the state of the query's last symbol are `last + 29*i`,
//! the states in ascending order that map to that symbol. Each candidate is
//! walked backward through the rest of the query, one `backward` step per
//! symbol, and dropped at the first mismatch. The walk is cheap to abandon,
//! so most candidates cost a single modular step.
//!
//! The search space is the whole cycle, far larger than any budget, so an
//! exhausted search only means "not within budget".

use crate::charset;
use crate::config::DEFAULT_MAX_SEARCH_ITERATIONS;
use crate::engine::LcgEngine;
use anyhow::{anyhow, Result};
use num_bigint::BigUint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SearchBudget {
    pub max_iterations: u64,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn new(max_iterations: u64) -> Self {
        SearchBudget {
            max_iterations,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::new(DEFAULT_MAX_SEARCH_ITERATIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `state` is the state of the query's first symbol.
    Found { state: BigUint, candidates: u64 },
    Exhausted { candidates: u64 },
    Cancelled { candidates: u64 },
}

impl SearchOutcome {
    pub fn state(&self) -> Option<&BigUint> {
        match self {
            SearchOutcome::Found { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn candidates(&self) -> u64 {
        match self {
            SearchOutcome::Found { candidates, .. }
            | SearchOutcome::Exhausted { candidates }
            | SearchOutcome::Cancelled { candidates } => *candidates,
        }
    }
}

/// Errors only on symbols outside the alphabet. An empty query is simply
/// not found.
pub fn search_state(engine: &LcgEngine, query: &str, budget: &SearchBudget) -> Result<SearchOutcome> {
    let sequence = query
        .chars()
        .enumerate()
        .map(|(pos, ch)| {
            charset::index_of(ch)
                .ok_or_else(|| anyhow!("Character '{}' at pos {} not in char set.", ch, pos))
        })
        .collect::<Result<Vec<usize>>>()?;

    let (last, rest) = match sequence.split_last() {
        Some(split) => split,
        None => return Ok(SearchOutcome::Exhausted { candidates: 0 }),
    };

    let step = BigUint::from(charset::char_count());
    let mut candidate = BigUint::from(*last);
    let mut tried = 0u64;

    while tried < budget.max_iterations {
        if budget.is_cancelled() {
            return Ok(SearchOutcome::Cancelled { candidates: tried });
        }
        if &candidate >= engine.modulus() {
            break;
        }
        tried += 1;

        if let Some(state) = walk_back(engine, &candidate, rest) {
            return Ok(SearchOutcome::Found {
                state,
                candidates: tried,
            });
        }
        candidate += &step;
    }

    Ok(SearchOutcome::Exhausted { candidates: tried })
}

/// Steps backward from `state` through `expected` (last to first), returning
/// the earliest state when every symbol matches.
fn walk_back(engine: &LcgEngine, state: &BigUint, expected: &[usize]) -> Option<BigUint> {
    let mut current = state.clone();
    for &want in expected.iter().rev() {
        let previous = engine.backward(&current);
        if charset::residue(&previous) != want {
            return None;
        }
        current = previous;
    }
    Some(current)
}
