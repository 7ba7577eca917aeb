//! Full-period linear congruential engine over a big prime modulus.
//!
//! `forward` is `s -> (A*s + C) mod M`. Because `A` is invertible modulo `M`
//! the step is a bijection, and `backward` undoes it in closed form with the
//! precomputed inverse of `A`.

use crate::charset;
use crate::config::{EngineParams, LibraryConfig};
use anyhow::{bail, Result};
use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use std::sync::Arc;

lazy_static! {
    /// Engine built from the default constants. Construction failure is fatal.
    pub static ref STANDARD_ENGINE: Arc<LcgEngine> = Arc::new(
        LcgEngine::new(
            LibraryConfig::default()
                .engine_params()
                .expect("default engine constants must parse"),
        )
        .expect("default multiplier must be invertible modulo the default modulus"),
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcgEngine {
    modulus: BigUint,
    multiplier: BigUint,
    increment: BigUint,
    multiplier_inverse: BigUint,
}

impl LcgEngine {
    pub fn new(params: EngineParams) -> Result<Self> {
        let EngineParams {
            modulus,
            multiplier,
            increment,
        } = params;

        if modulus <= BigUint::one() {
            bail!("Modulus must be greater than 1, got {}.", modulus);
        }
        let multiplier_inverse = match mod_inverse(&multiplier, &modulus) {
            Some(inv) => inv,
            None => bail!(
                "Multiplier {} has no inverse modulo {}; the generator cannot be reversed.",
                multiplier,
                modulus
            ),
        };

        log!("engine"; "modulus of {} bits, multiplier inverse ready", modulus.bits());
        Ok(LcgEngine {
            increment: increment % &modulus,
            multiplier: multiplier % &modulus,
            multiplier_inverse,
            modulus,
        })
    }

    pub fn standard() -> Arc<LcgEngine> {
        Arc::clone(&STANDARD_ENGINE)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }

    pub fn increment(&self) -> &BigUint {
        &self.increment
    }

    pub fn multiplier_inverse(&self) -> &BigUint {
        &self.multiplier_inverse
    }

    pub fn forward(&self, state: &BigUint) -> BigUint {
        (&self.multiplier * state + &self.increment) % &self.modulus
    }

    pub fn backward(&self, state: &BigUint) -> BigUint {
        // (s - C) mod M without going negative
        let shifted = (state % &self.modulus + &self.modulus - &self.increment) % &self.modulus;
        (shifted * &self.multiplier_inverse) % &self.modulus
    }

    pub fn state_to_symbol(&self, state: &BigUint) -> char {
        charset::symbol_for(state)
    }
}

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm, `None` when
/// `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let modulus = BigInt::from(m.clone());
    let (mut old_r, mut r) = (modulus.clone(), BigInt::from(a % m));
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    if !old_r.is_one() {
        return None;
    }
    if old_t.is_negative() {
        old_t += &modulus;
    }
    old_t.to_biguint()
}
