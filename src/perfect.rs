//! Direct base-29 codec: a page id *is* its 300 symbols written in base 29,
//! most significant digit first. No generator involved.

use crate::charset::{self, CHAR_SET_ARRAY, CHAR_SET_BASE};
use anyhow::{anyhow, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

pub const PERFECT_PAGE_LENGTH: usize = 300;
pub const PAD_CHAR: char = 'a';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId {
    #[serde(
        serialize_with = "crate::address::to_decimal",
        deserialize_with = "crate::address::from_decimal"
    )]
    pub id: BigUint,
}

impl PageId {
    pub fn new(id: BigUint) -> Self {
        PageId { id }
    }
}

/// Writes the low 300 base-29 digits of `page_id`. Ids of 29^300 and above
/// lose their high digits.
pub fn index_to_text(page_id: &BigUint) -> Result<String> {
    let mut digits = Vec::with_capacity(PERFECT_PAGE_LENGTH);
    let mut temp_index = page_id.clone();
    for _ in 0..PERFECT_PAGE_LENGTH {
        let remainder = (&temp_index % &*CHAR_SET_BASE)
            .to_usize()
            .ok_or_else(|| anyhow!("Character set index remainder too large for usize."))?;
        digits.push(CHAR_SET_ARRAY[remainder]);
        temp_index /= &*CHAR_SET_BASE;
    }
    Ok(digits.into_iter().rev().collect())
}

/// Reads `text` as base-29 digits. Characters outside the alphabet are
/// skipped, not rejected.
pub fn text_to_index(text: &str) -> BigUint {
    let mut index = BigUint::zero();
    for ch in text.chars() {
        if let Some(char_val) = charset::index_of(ch) {
            index = index * &*CHAR_SET_BASE + BigUint::from(char_val);
        }
    }
    index
}

/// Pads `query` with `'a'` up to the page length and decodes it. Empty or
/// over-long queries have no page.
pub fn search_text(query: &str) -> Option<PageId> {
    let len = query.chars().count();
    if len == 0 || len > PERFECT_PAGE_LENGTH {
        return None;
    }
    let padded: String = query
        .chars()
        .chain(std::iter::repeat(PAD_CHAR).take(PERFECT_PAGE_LENGTH - len))
        .collect();
    Some(PageId::new(text_to_index(&padded)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn zero_is_all_a() {
        let text = index_to_text(&BigUint::zero()).unwrap();
        assert_eq!(text.len(), PERFECT_PAGE_LENGTH);
        assert!(text.chars().all(|c| c == 'a'));
    }

    #[test]
    fn low_digits_are_at_the_end() {
        assert!(index_to_text(&BigUint::from(28u32)).unwrap().ends_with("aa."));
        assert!(index_to_text(&BigUint::from(29u32)).unwrap().ends_with("aba"));
    }

    #[test]
    fn text_round_trips_through_index() {
        let page = "the quick brown fox, jumped. ".repeat(11);
        let page: String = page.chars().take(PERFECT_PAGE_LENGTH).collect();
        let id = text_to_index(&page);
        assert_eq!(index_to_text(&id).unwrap(), page);
    }

    #[test]
    fn oversized_id_keeps_low_digits() {
        let base = BigUint::from(29u32);
        let wrap: BigUint = base.pow(300u32);
        let id = &wrap + BigUint::one();
        assert_eq!(index_to_text(&id).unwrap(), index_to_text(&BigUint::one()).unwrap());
    }

    #[test]
    fn decoding_skips_unknown_characters() {
        assert_eq!(text_to_index("ba"), BigUint::from(29u32));
        assert_eq!(text_to_index("b!a"), BigUint::from(29u32));
        assert_eq!(text_to_index("B"), BigUint::zero());
    }

    #[test]
    fn search_pads_with_a() {
        let hit = search_text("b").unwrap();
        assert_eq!(hit.id, BigUint::from(29u32).pow(299u32));
        let page = index_to_text(&hit.id).unwrap();
        assert!(page.starts_with('b'));
    }

    #[test]
    fn search_rejects_empty_and_overlong() {
        assert!(search_text("").is_none());
        assert!(search_text(&"a".repeat(PERFECT_PAGE_LENGTH + 1)).is_none());
        assert!(search_text(&"z".repeat(PERFECT_PAGE_LENGTH)).is_some());
    }

    #[test]
    fn page_id_serializes_as_string() {
        let json = serde_json::to_string(&PageId::new(BigUint::from(77u32))).unwrap();
        assert_eq!(json, r#"{"id":"77"}"#);
    }
}
