//! Request handling for both schemes: parameter parsing with defaults,
//! response bodies, and collapsing every internal error into a generic
//! message.

use crate::address::Address;
use crate::perfect::PageId;
use crate::scheme::PageScheme;
use anyhow::{anyhow, bail, Context, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const PAGE_FAILURE: &str = "Failed to generate page.";
pub const SEARCH_FAILURE: &str = "Search failed.";

/// A request parameter as a browser sends it: text from a form or query
/// string, or a plain number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Text(String),
    Number(f64),
}

impl Param {
    fn as_text(&self) -> Result<Option<String>> {
        match self {
            Param::Text(text) if text.trim().is_empty() => Ok(None),
            Param::Text(text) => Ok(Some(text.trim().to_string())),
            Param::Number(n) if n.fract() != 0.0 || *n < 0.0 || !n.is_finite() => {
                bail!("Expected a non-negative integer, got {}.", n)
            }
            Param::Number(n) => Ok(Some(format!("{:.0}", n))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LcgPageRequest {
    pub hex: Option<Param>,
    pub wall: Option<Param>,
    pub shelf: Option<Param>,
    pub book: Option<Param>,
    pub page: Option<Param>,
}

impl LcgPageRequest {
    pub fn to_address(&self) -> Result<Address> {
        let hex = match text_of(&self.hex)? {
            Some(raw) => digits_only(&raw),
            None => BigUint::default(),
        };
        Address::new(
            hex,
            small_field("wall", &self.wall)?,
            small_field("shelf", &self.shelf)?,
            small_field("book", &self.book)?,
            small_field("page", &self.page)?,
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerfectPageRequest {
    pub id: Option<Param>,
}

impl PerfectPageRequest {
    pub fn to_page_id(&self) -> Result<PageId> {
        let id = match text_of(&self.id)? {
            Some(raw) => BigUint::from_str(&raw).map_err(|e| anyhow!("Invalid page id '{}': {}", raw, e))?,
            None => BigUint::default(),
        };
        Ok(PageId::new(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResponse<A> {
    pub address: A,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse<A> {
    pub success: bool,
    pub address: Option<A>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub error: &'static str,
}

pub fn page<S: PageScheme>(scheme: &S, address: S::Address) -> Result<PageResponse<S::Address>, Failure> {
    match scheme.page_content(&address) {
        Ok(content) => Ok(PageResponse { address, content }),
        Err(e) => Err(fail(PAGE_FAILURE, e)),
    }
}

/// Lowercases `query` and searches. A missing query is the empty query.
pub fn search<S: PageScheme>(scheme: &S, query: Option<&str>) -> Result<SearchResponse<S::Address>, Failure> {
    let query = query.unwrap_or_default().to_lowercase();
    match scheme.search_text(&query) {
        Ok(address) => Ok(SearchResponse {
            success: address.is_some(),
            address,
        }),
        Err(e) => Err(fail(SEARCH_FAILURE, e)),
    }
}

pub fn lcg_page<S: PageScheme<Address = Address>>(
    scheme: &S,
    request: &LcgPageRequest,
) -> Result<PageResponse<Address>, Failure> {
    let address = request
        .to_address()
        .context("Bad page request")
        .map_err(|e| fail(PAGE_FAILURE, e))?;
    page(scheme, address)
}

pub fn perfect_page<S: PageScheme<Address = PageId>>(
    scheme: &S,
    request: &PerfectPageRequest,
) -> Result<PageResponse<PageId>, Failure> {
    let id = request
        .to_page_id()
        .context("Bad page request")
        .map_err(|e| fail(PAGE_FAILURE, e))?;
    page(scheme, id)
}

fn fail(message: &'static str, error: anyhow::Error) -> Failure {
    warn!("api"; "{}: {:#}", message, error);
    Failure { error: message }
}

fn text_of(param: &Option<Param>) -> Result<Option<String>> {
    match param {
        Some(p) => p.as_text(),
        None => Ok(None),
    }
}

/// Keeps only the ASCII digits; nothing left means zero.
fn digits_only(raw: &str) -> BigUint {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    BigUint::from_str(&digits).unwrap_or_default()
}

fn small_field(name: &str, param: &Option<Param>) -> Result<u32> {
    match text_of(param)? {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|e| anyhow!("Invalid {} '{}': {}", name, raw, e)),
        None => Ok(1),
    }
}
