//! The wire header a single-message `encrypt`/`decrypt` front end prepends
//! to a ciphertext so that `decrypt` does not need the salts passed
//! separately out of band. Layout taken from the original tooling's
//! packet framing: algorithm id, a reserved byte, the two salts, the
//! plaintext CRC32, and a pad byte.

use crate::CipherError;

const ALGORITHM_OFF: usize = 0;
const S1_OFF: usize = 2;
const S2_OFF: usize = 6;
const CRC_OFF: usize = 10;
/// Total header size, including the trailing pad byte.
pub const HEADER_LEN: usize = 15;

/// Header prepended to a packaged ciphertext message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub algorithm_id: u8,
    pub s1: u32,
    pub s2: u32,
    pub plaintext_crc: u32,
}

impl PacketHeader {
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[ALGORITHM_OFF] = self.algorithm_id;
        out[S1_OFF..S1_OFF + 4].copy_from_slice(&self.s1.to_le_bytes());
        out[S2_OFF..S2_OFF + 4].copy_from_slice(&self.s2.to_le_bytes());
        out[CRC_OFF..CRC_OFF + 4].copy_from_slice(&self.plaintext_crc.to_le_bytes());
        out
    }

    pub fn decode(data: &[u8]) -> Result<PacketHeader, CipherError> {
        if data.len() < HEADER_LEN {
            return Err(CipherError::PacketHeaderTooShort(data.len()));
        }

        Ok(PacketHeader {
            algorithm_id: data[ALGORITHM_OFF],
            s1: u32::from_le_bytes(data[S1_OFF..S1_OFF + 4].try_into().unwrap()),
            s2: u32::from_le_bytes(data[S2_OFF..S2_OFF + 4].try_into().unwrap()),
            plaintext_crc: u32::from_le_bytes(data[CRC_OFF..CRC_OFF + 4].try_into().unwrap()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let header = PacketHeader {
            algorithm_id: 1,
            s1: 0xdeadbeef,
            s2: 0x0badf00d,
            plaintext_crc: 0x12345678,
        };
        let encoded = header.encode();
        assert_eq!(encoded.len(), HEADER_LEN);
        assert_eq!(PacketHeader::decode(&encoded).unwrap(), header);
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            PacketHeader::decode(&[0u8; 4]),
            Err(CipherError::PacketHeaderTooShort(4))
        ));
    }
}
