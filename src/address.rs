//! Hierarchical page addresses and their mixed-radix state encoding.
//!
//! Innermost first: page (410 per book), book (32 per shelf), shelf (5 per
//! wall), wall (4 per hex). The hex number is unbounded.

use crate::engine::LcgEngine;
use anyhow::{bail, Result};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const CHARS_PER_LINE: usize = 80;
pub const LINES_PER_PAGE: usize = 40;
pub const CHARS_PER_PAGE: usize = CHARS_PER_LINE * LINES_PER_PAGE;
pub const PAGES_PER_BOOK: u32 = 410;
pub const BOOKS_PER_SHELF: u32 = 32;
pub const SHELVES_PER_WALL: u32 = 5;
pub const WALLS_PER_HEX: u32 = 4;

lazy_static! {
    static ref FACTOR_PAGE: BigUint = BigUint::from(1u32);
    static ref FACTOR_BOOK: BigUint = &*FACTOR_PAGE * PAGES_PER_BOOK;
    static ref FACTOR_SHELF: BigUint = &*FACTOR_BOOK * BOOKS_PER_SHELF;
    static ref FACTOR_WALL: BigUint = &*FACTOR_SHELF * SHELVES_PER_WALL;
    static ref FACTOR_HEX: BigUint = &*FACTOR_WALL * WALLS_PER_HEX;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    #[serde(serialize_with = "to_decimal", deserialize_with = "from_decimal")]
    pub hex: BigUint,
    pub wall: u32,
    pub shelf: u32,
    pub book: u32,
    pub page: u32,
}

impl Address {
    /// Builds an address, rejecting bounded fields outside their 1-based ranges.
    pub fn new(hex: BigUint, wall: u32, shelf: u32, book: u32, page: u32) -> Result<Self> {
        check_range("wall", wall, WALLS_PER_HEX)?;
        check_range("shelf", shelf, SHELVES_PER_WALL)?;
        check_range("book", book, BOOKS_PER_SHELF)?;
        check_range("page", page, PAGES_PER_BOOK)?;
        Ok(Address {
            hex,
            wall,
            shelf,
            book,
            page,
        })
    }

    pub fn first() -> Self {
        Address {
            hex: BigUint::zero(),
            wall: 1,
            shelf: 1,
            book: 1,
            page: 1,
        }
    }

    pub fn is_in_range(&self) -> bool {
        (1..=WALLS_PER_HEX).contains(&self.wall)
            && (1..=SHELVES_PER_WALL).contains(&self.shelf)
            && (1..=BOOKS_PER_SHELF).contains(&self.book)
            && (1..=PAGES_PER_BOOK).contains(&self.page)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-w{}-s{}-v{}:{}",
            self.hex, self.wall, self.shelf, self.book, self.page
        )
    }
}

fn check_range(name: &str, value: u32, max: u32) -> Result<()> {
    if value == 0 || value > max {
        bail!("{} must be between 1 and {}, got {}.", name, max, value);
    }
    Ok(())
}

/// Address to generator state. Bounded fields are not checked here: values
/// outside their ranges silently alias some other address.
pub fn address_to_state(address: &Address, engine: &LcgEngine) -> BigUint {
    let lower = |v: u32| v.saturating_sub(1);
    let state = &address.hex * &*FACTOR_HEX
        + &*FACTOR_WALL * lower(address.wall)
        + &*FACTOR_SHELF * lower(address.shelf)
        + &*FACTOR_BOOK * lower(address.book)
        + &*FACTOR_PAGE * lower(address.page);
    state % engine.modulus()
}

pub fn state_to_address(state: &BigUint) -> Address {
    let hex = state / &*FACTOR_HEX;
    let mut rest = state % &*FACTOR_HEX;
    let mut take = |factor: &BigUint| {
        let digit = &rest / factor;
        rest = &rest % factor;
        // each digit is below its radix, so it fits in u32
        digit.to_u32().unwrap_or(0) + 1
    };
    let wall = take(&*FACTOR_WALL);
    let shelf = take(&*FACTOR_SHELF);
    let book = take(&*FACTOR_BOOK);
    let page = take(&*FACTOR_PAGE);
    Address {
        hex,
        wall,
        shelf,
        book,
        page,
    }
}

pub(crate) fn to_decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

pub(crate) fn from_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
    let text = String::deserialize(deserializer)?;
    BigUint::from_str(&text).map_err(serde::de::Error::custom)
}
