//! The external "Hohha key blob" encoding (spec §6): a self-describing
//! byte sequence carrying the jump count, key length, default salts, and
//! key body, so a key can be handed around as a single opaque value.

use crate::CipherError;

const JUMPS_OFF: usize = 0;
const LENGTH_OFF: usize = 1;
const S1_OFF: usize = 3;
const S2_OFF: usize = 7;
const BODY_OFF: usize = 11;

/// A parsed Hohha key blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBlob {
    pub key_jumps: u8,
    pub s1: u32,
    pub s2: u32,
    pub body: Vec<u8>,
}

impl KeyBlob {
    /// Encode to the wire format: `jumps(1) | length(2 LE) | s1(4 LE) |
    /// s2(4 LE) | body`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BODY_OFF + self.body.len());
        out.push(self.key_jumps);
        out.extend_from_slice(&(self.body.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.s1.to_le_bytes());
        out.extend_from_slice(&self.s2.to_le_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    /// Decode from the wire format. Errs if the buffer is shorter than
    /// the fixed header or than the declared key length requires.
    pub fn decode(data: &[u8]) -> Result<KeyBlob, CipherError> {
        if data.len() < BODY_OFF {
            return Err(CipherError::KeyBlobTooShort(data.len()));
        }

        let key_jumps = data[JUMPS_OFF];
        let key_length =
            u16::from_le_bytes([data[LENGTH_OFF], data[LENGTH_OFF + 1]]) as usize;
        let s1 = u32::from_le_bytes(data[S1_OFF..S1_OFF + 4].try_into().unwrap());
        let s2 = u32::from_le_bytes(data[S2_OFF..S2_OFF + 4].try_into().unwrap());

        if data.len() < BODY_OFF + key_length {
            return Err(CipherError::KeyBlobTooShort(data.len()));
        }

        let body = data[BODY_OFF..BODY_OFF + key_length].to_vec();

        Ok(KeyBlob {
            key_jumps,
            s1,
            s2,
            body,
        })
    }
}
