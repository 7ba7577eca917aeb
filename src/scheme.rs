//! The two page schemes behind one interface: the LCG library, where pages
//! are pseudorandom walks, and the "perfect" library, where a page id is its
//! own text in base 29.

use crate::address::{address_to_state, state_to_address, Address, CHARS_PER_PAGE};
use crate::engine::LcgEngine;
use crate::generator;
use crate::perfect::{self, PageId, PERFECT_PAGE_LENGTH};
use crate::search::{search_state, SearchBudget, SearchOutcome};
use anyhow::Result;
use num_bigint::BigUint;
use std::sync::Arc;

pub trait PageScheme {
    type Address;

    fn page_length(&self) -> usize;

    fn page_content(&self, address: &Self::Address) -> Result<String>;

    /// `Ok(None)` means "not found", never a failure.
    fn search_text(&self, query: &str) -> Result<Option<Self::Address>>;
}

#[derive(Debug, Clone)]
pub struct LcgScheme {
    engine: Arc<LcgEngine>,
    budget: SearchBudget,
}

impl LcgScheme {
    pub fn new(engine: Arc<LcgEngine>, budget: SearchBudget) -> Self {
        LcgScheme { engine, budget }
    }

    pub fn engine(&self) -> &LcgEngine {
        &self.engine
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    pub fn set_max_iterations(&mut self, max_iterations: u64) {
        self.budget.max_iterations = max_iterations;
    }

    pub fn state_of(&self, address: &Address) -> BigUint {
        address_to_state(address, &self.engine)
    }

    /// Full search result, for callers that care why nothing was found.
    pub fn search_outcome(&self, query: &str) -> Result<SearchOutcome> {
        let outcome = search_state(&self.engine, query, &self.budget)?;
        match &outcome {
            SearchOutcome::Found { candidates, .. } => {
                log!("search"; "'{}' found after {} candidates", query, candidates)
            }
            SearchOutcome::Exhausted { candidates } => {
                log!("search"; "'{}' not found within {} candidates", query, candidates)
            }
            SearchOutcome::Cancelled { candidates } => {
                warn!("search"; "'{}' cancelled after {} candidates", query, candidates)
            }
        }
        Ok(outcome)
    }
}

impl Default for LcgScheme {
    fn default() -> Self {
        LcgScheme::new(LcgEngine::standard(), SearchBudget::default())
    }
}

impl PageScheme for LcgScheme {
    type Address = Address;

    fn page_length(&self) -> usize {
        CHARS_PER_PAGE
    }

    fn page_content(&self, address: &Address) -> Result<String> {
        Ok(generator::page_content(&self.engine, address))
    }

    fn search_text(&self, query: &str) -> Result<Option<Address>> {
        let outcome = self.search_outcome(query)?;
        Ok(outcome.state().map(state_to_address))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectScheme;

impl PageScheme for PerfectScheme {
    type Address = PageId;

    fn page_length(&self) -> usize {
        PERFECT_PAGE_LENGTH
    }

    fn page_content(&self, address: &PageId) -> Result<String> {
        perfect::index_to_text(&address.id)
    }

    fn search_text(&self, query: &str) -> Result<Option<PageId>> {
        Ok(perfect::search_text(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_budget_scheme() -> LcgScheme {
        LcgScheme::new(LcgEngine::standard(), SearchBudget::new(200_000))
    }

    fn content_len<S: PageScheme>(scheme: &S, address: &S::Address) -> usize {
        scheme.page_content(address).unwrap().chars().count()
    }

    #[test]
    fn page_lengths_per_scheme() {
        let lcg = LcgScheme::default();
        assert_eq!(content_len(&lcg, &Address::first()), lcg.page_length());
        assert_eq!(lcg.page_length(), 3200);

        let perfect = PerfectScheme;
        let id = PageId::new(BigUint::from(123_456u32));
        assert_eq!(content_len(&perfect, &id), perfect.page_length());
        assert_eq!(perfect.page_length(), 300);
    }

    #[test]
    fn lcg_search_result_page_starts_with_query() {
        let scheme = small_budget_scheme();
        let address = scheme.search_text("the").unwrap().unwrap();
        assert!(address.is_in_range());
        assert!(scheme.page_content(&address).unwrap().starts_with("the"));
    }

    #[test]
    fn lcg_search_known_address() {
        let scheme = small_budget_scheme();
        let address = scheme.search_text("the").unwrap().unwrap();
        assert_eq!(address.hex.to_string(), "1285848269056235095621601403295862");
        assert_eq!((address.wall, address.shelf, address.book, address.page), (4, 3, 28, 66));
    }

    #[test]
    fn lcg_search_empty_is_none() {
        assert_eq!(small_budget_scheme().search_text("").unwrap(), None);
    }

    #[test]
    fn lcg_budget_is_adjustable() {
        let mut scheme = small_budget_scheme();
        scheme.set_max_iterations(3);
        assert_eq!(scheme.budget().max_iterations, 3);
        assert_eq!(scheme.search_text("zzzzzzzzzzzz").unwrap(), None);
    }

    #[test]
    fn perfect_search_then_page_starts_with_query() {
        let scheme = PerfectScheme;
        let id = scheme.search_text("hello world").unwrap().unwrap();
        assert!(scheme.page_content(&id).unwrap().starts_with("hello world"));
    }

    #[test]
    fn state_of_matches_codec() {
        let scheme = LcgScheme::default();
        let address = Address::new(BigUint::from(5u32), 2, 2, 2, 2).unwrap();
        assert_eq!(state_to_address(&scheme.state_of(&address)), address);
    }
}
