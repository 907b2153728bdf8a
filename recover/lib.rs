//! Known-plaintext key-recovery engine for the Hohha Dynamic XOR cipher.
//!
//! Given several `(plaintext, ciphertext, salt-pair)` samples produced
//! under one unknown key, [`order::attack`] reconstructs the key body and
//! its derived value `v`: a bit-level backtracking search
//! ([`branch::brut`]) over a constraint model ([`constraint`]) driven by
//! a deterministic forward simulation ([`advance`]), with iterative
//! deepening and weight-learned branch ordering ([`order`]) and a bounded
//! snapshot pool ([`pool`]) to keep the recursion allocation-free.

mod advance;
mod branch;
mod constraint;
mod order;
mod pool;
mod progress;
mod vectors;

pub use advance::{AdvanceReport, Position, RunningState, StepOutcome};
pub use branch::brut;
pub use constraint::{Mask, Orig, SearchContext};
pub use order::{attack, AttackReport, NullPolicy, OrderingParams, SearchPolicy, Solution};
pub use pool::{SnapshotPool, DEFAULT_POOL_CAPACITY};
pub use progress::ProgressFlag;
pub use vectors::{read_samples, Sample};

use thiserror::Error;


/// Errors surfaced past the search itself. `InconsistentBranch` — the
/// normal negative result of `advance`/`brut` — is deliberately not a
/// variant here: it unwinds one recursion frame and never reaches this
/// level.
#[derive(Error, Debug)]
pub enum RecoverError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[inline]
pub(crate) fn rol32(word: u32, shift: u32) -> u32 {
    word.rotate_left(shift)
}

#[inline]
pub(crate) fn ror32(word: u32, shift: u32) -> u32 {
    word.rotate_right(shift)
}

#[inline]
pub(crate) fn low8(word: u32) -> u8 {
    word as u8
}

/// Enumerate the submasks of `mask` in strictly increasing order: given
/// the previous submask `word` (or 0 to start), return the next one.
/// Wraps back to 0 once `word == mask`.
pub fn incr32_mask(word: u32, mask: u32) -> u32 {
    (word | !mask).wrapping_add(1) & mask
}
