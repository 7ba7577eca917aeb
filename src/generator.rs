use crate::address::{address_to_state, Address, CHARS_PER_PAGE};
use crate::engine::LcgEngine;
use num_bigint::BigUint;

/// Expands `state` into `length` symbols: emit the symbol of the current
/// state, then step forward.
pub fn content_from_state(engine: &LcgEngine, state: &BigUint, length: usize) -> String {
    let mut content = String::with_capacity(length);
    let mut current = state.clone();
    for _ in 0..length {
        content.push(engine.state_to_symbol(&current));
        current = engine.forward(&current);
    }
    content
}

pub fn page_content(engine: &LcgEngine, address: &Address) -> String {
    let state = address_to_state(address, engine);
    content_from_state(engine, &state, CHARS_PER_PAGE)
}
