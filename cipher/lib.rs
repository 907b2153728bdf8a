//! The Hohha Dynamic XOR stream cipher.
//!
//! A keyed, salted, byte-at-a-time cipher whose internal state walks a
//! secret byte array via a sequence of "jump" mutations driven by two
//! 32-bit salts, a key-derived value, and the running CRC32 of the
//! plaintext. It is not a cryptographically vetted design — see the
//! crate-level Non-goals in the workspace's top-level documentation —
//! this crate exists to reproduce its semantics bit-for-bit so that
//! `hohha-recover` has an exact oracle to attack.

mod blob;
mod jumps;
mod packet;

pub use blob::KeyBlob;
pub use jumps::Jumps;
pub use packet::{PacketHeader, HEADER_LEN};

use thiserror::Error;


/// Errors produced while constructing or parsing Hohha cipher state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CipherError {
    #[error("key length {0} is not a power of two")]
    KeyLengthNotPowerOfTwo(usize),
    #[error("unsupported opt value {0} (only opt = 0 is defined)")]
    UnsupportedOption(u32),
    #[error("key blob too short: {0} bytes")]
    KeyBlobTooShort(usize),
    #[error("packet header too short: {0} bytes")]
    PacketHeaderTooShort(usize),
}

#[inline]
fn rol32(word: u32, shift: u32) -> u32 {
    word.rotate_left(shift)
}

#[inline]
fn ror32(word: u32, shift: u32) -> u32 {
    word.rotate_right(shift)
}

#[inline]
fn low8(word: u32) -> u8 {
    word as u8
}

/// Hohha Dynamic XOR cipher state.
///
/// `key.len()` is always a power of two; `key_mask` is `key.len() - 1`.
/// `m` is kept reduced modulo `key.len()` after every mutation.
#[derive(Debug, Clone)]
pub struct State {
    key: Vec<u8>,
    key_mask: u32,
    jumps: Jumps,
    s1: u32,
    s2: u32,
    m: u32,
    v: u32,
    cs: u32,
    opt: u32,
}

impl State {
    /// Initialize cipher state from a key body, jump count, salts, and
    /// algorithm options.
    ///
    /// `opt` must be zero; no other algorithm variants are defined by
    /// this implementation (see the Open Question in the design notes).
    pub fn new(
        key: &[u8],
        key_jumps: u32,
        s1: u32,
        s2: u32,
        opt: u32,
    ) -> Result<State, CipherError> {
        if key.is_empty() || !key.len().is_power_of_two() {
            return Err(CipherError::KeyLengthNotPowerOfTwo(key.len()));
        }
        if opt != 0 {
            return Err(CipherError::UnsupportedOption(opt));
        }

        let key_mask = (key.len() - 1) as u32;
        let v = hohha_crc::crc32(key);
        let m = ((s1 >> 24) * (s2 >> 24)) & key_mask;

        Ok(State {
            key: key.to_vec(),
            key_mask,
            jumps: Jumps::from_count(key_jumps),
            s1,
            s2,
            m,
            v,
            cs: !0,
            opt,
        })
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn key_mask(&self) -> u32 {
        self.key_mask
    }

    pub fn jumps(&self) -> Jumps {
        self.jumps
    }

    pub fn s1(&self) -> u32 {
        self.s1
    }

    pub fn s2(&self) -> u32 {
        self.s2
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn v(&self) -> u32 {
        self.v
    }

    pub fn opt(&self) -> u32 {
        self.opt
    }

    pub fn cs(&self) -> u32 {
        self.cs
    }

    /// Override the jump-dispatch tag, keeping every other field. Used to
    /// compare a tagged unrolled variant against the general loop for the
    /// same jump count.
    pub fn with_jumps(mut self, jumps: Jumps) -> State {
        self.jumps = jumps;
        self
    }

    /// Jump variant 0: mix `key[m]` into `s1`, advance `m` by `s2`.
    #[inline]
    pub fn jump0(&mut self) {
        let m = self.m as usize;
        self.s1 ^= u32::from(self.key[m]);
        self.key[m] = low8(self.s2);
        self.m = (self.m ^ self.s2) & self.key_mask;
        self.s2 = rol32(self.s2, 1);
    }

    /// Jump variant 1: mix `key[m]` into `s2`, advance `m` by `v`.
    #[inline]
    pub fn jump1(&mut self) {
        let m = self.m as usize;
        self.s2 ^= u32::from(self.key[m]);
        self.key[m] = low8(self.s1);
        self.m = (self.m ^ self.v) & self.key_mask;
        self.s1 = ror32(self.s1, 1);
    }

    /// Jump variant 2: mix `key[m]` into `s1`, advance `m` by `v`.
    #[inline]
    pub fn jump2(&mut self) {
        let m = self.m as usize;
        self.s1 ^= u32::from(self.key[m]);
        self.key[m] = low8(self.s2);
        self.m = (self.m ^ self.v) & self.key_mask;
        self.s2 = rol32(self.s2, 1);
    }

    /// Jump variant 3: mix `key[m]` into `s2`, advance `m` by `s1`.
    #[inline]
    pub fn jump3(&mut self) {
        let m = self.m as usize;
        self.s2 ^= u32::from(self.key[m]);
        self.key[m] = low8(self.s1);
        self.m = (self.m ^ self.s1) & self.key_mask;
        self.s1 = ror32(self.s1, 1);
    }

    /// General jump loop: jump0, jump1, then jump2/jump3 alternating
    /// until `jumps.count()` jumps have been taken.
    fn jump_general(&mut self, count: u32) {
        self.jump0();
        self.jump1();

        let mut taken = 2;
        loop {
            if taken == count {
                return;
            }
            self.jump2();
            taken += 1;

            if taken == count {
                return;
            }
            self.jump3();
            taken += 1;
        }
    }

    /// Perform the full per-output-byte jump sequence for the cipher's
    /// configured `key_jumps`.
    pub fn jump(&mut self) {
        match self.jumps {
            Jumps::Two => {
                self.jump0();
                self.jump1();
            }
            Jumps::Three => {
                self.jump0();
                self.jump1();
                self.jump2();
            }
            Jumps::Four => {
                self.jump0();
                self.jump1();
                self.jump2();
                self.jump3();
            }
            Jumps::Five => {
                self.jump0();
                self.jump1();
                self.jump2();
                self.jump3();
                self.jump2();
            }
            Jumps::Six => {
                self.jump0();
                self.jump1();
                self.jump2();
                self.jump3();
                self.jump2();
                self.jump3();
            }
            Jumps::Seven => {
                self.jump0();
                self.jump1();
                self.jump2();
                self.jump3();
                self.jump2();
                self.jump3();
                self.jump2();
            }
            Jumps::Eight => {
                self.jump0();
                self.jump1();
                self.jump2();
                self.jump3();
                self.jump2();
                self.jump3();
                self.jump2();
                self.jump3();
            }
            Jumps::General(n) => self.jump_general(n),
        }
    }

    /// XOR byte for the current step: `low8(v ^ s1 ^ s2)`.
    #[inline]
    pub fn step_xor(&self) -> u8 {
        low8(self.v ^ self.s1 ^ self.s2)
    }

    /// Fold one plaintext byte into the running CRC and mix it into `v`.
    #[inline]
    pub fn step_crc(&mut self, word: u8) {
        self.cs = hohha_crc::fold_byte(self.cs, word);
        self.v = rol32(self.v ^ self.cs, 1);
    }

    /// CRC32 of the plaintext processed so far.
    #[inline]
    pub fn text_crc(&self) -> u32 {
        !self.cs
    }

    /// Encrypt `data` in place: for each byte, jump, compute the xor
    /// byte, fold the *plaintext* (input) byte into the CRC, then xor.
    pub fn encrypt(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.jump();
            let x = self.step_xor();
            let plain = *byte;
            self.step_crc(plain);
            *byte = plain ^ x;
        }
    }

    /// Decrypt `data` in place: for each byte, jump, compute the xor
    /// byte, xor to recover plaintext, then fold the *plaintext*
    /// (output) byte into the CRC.
    pub fn decrypt(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.jump();
            let x = self.step_xor();
            let plain = *byte ^ x;
            *byte = plain;
            self.step_crc(plain);
        }
    }
}
