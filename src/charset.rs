use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// The 29 symbols every page is written in, in index order.
pub const CHAR_SET_STRING: &str = "abcdefghijklmnopqrstuvwxyz, .";

lazy_static! {
    pub static ref CHAR_SET_ARRAY: Vec<char> = CHAR_SET_STRING.chars().collect();
    pub static ref CHAR_SET_BASE: BigUint = BigUint::from(CHAR_SET_ARRAY.len());
}

pub fn char_count() -> usize {
    CHAR_SET_ARRAY.len()
}

pub fn index_of(ch: char) -> Option<usize> {
    CHAR_SET_ARRAY.iter().position(|&c| c == ch)
}

pub fn symbol_at(index: usize) -> Option<char> {
    CHAR_SET_ARRAY.get(index).copied()
}

/// Residue of `value` modulo the alphabet size.
pub fn residue(value: &BigUint) -> usize {
    // always < 29, fits
    (value % &*CHAR_SET_BASE).to_usize().unwrap_or(0)
}

/// Maps a big integer onto a symbol by its residue. Total, many-to-one.
pub fn symbol_for(value: &BigUint) -> char {
    CHAR_SET_ARRAY[residue(value)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_29_distinct_symbols() {
        assert_eq!(char_count(), 29);
        let mut sorted = CHAR_SET_ARRAY.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 29);
    }

    #[test]
    fn index_and_symbol_are_inverse() {
        for (i, &c) in CHAR_SET_ARRAY.iter().enumerate() {
            assert_eq!(index_of(c), Some(i));
            assert_eq!(symbol_at(i), Some(c));
        }
        assert_eq!(index_of('A'), None);
        assert_eq!(index_of('!'), None);
        assert_eq!(symbol_at(29), None);
    }

    #[test]
    fn symbol_for_uses_residue() {
        assert_eq!(symbol_for(&BigUint::from(0u32)), 'a');
        assert_eq!(symbol_for(&BigUint::from(26u32)), ',');
        assert_eq!(symbol_for(&BigUint::from(28u32)), '.');
        assert_eq!(symbol_for(&BigUint::from(29u32 + 27)), ' ');
    }
}
