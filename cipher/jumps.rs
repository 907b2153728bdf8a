//! Dispatch on `key_jumps`: a tagged variant per common jump count, plus a
//! general loop for anything else. Every variant must produce the same
//! state transitions as [`General`](Jumps::General) run with the same
//! count — this is checked in `tests/jump_equivalence.rs`.

/// Number of jumps taken per output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jumps {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    General(u32),
}

impl Jumps {
    /// Build the dispatch tag for a jump count. Counts 2..=8 get a
    /// dedicated unrolled variant; anything else (including values below
    /// 2, which the cipher treats as a caller error handled by
    /// `State::new`) falls back to the general loop.
    pub fn from_count(count: u32) -> Jumps {
        match count {
            2 => Jumps::Two,
            3 => Jumps::Three,
            4 => Jumps::Four,
            5 => Jumps::Five,
            6 => Jumps::Six,
            7 => Jumps::Seven,
            8 => Jumps::Eight,
            n => Jumps::General(n),
        }
    }

    /// Number of jumps this variant performs per output byte.
    pub fn count(&self) -> u32 {
        match self {
            Jumps::Two => 2,
            Jumps::Three => 3,
            Jumps::Four => 4,
            Jumps::Five => 5,
            Jumps::Six => 6,
            Jumps::Seven => 7,
            Jumps::Eight => 8,
            Jumps::General(n) => *n,
        }
    }
}
