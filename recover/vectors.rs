//! Test-vector reader: whitespace-separated records of
//! `(s1 bytes, s2 bytes, base64 plaintext, base64 ciphertext)`.

use std::io::{BufRead, BufReader, Read};

/// One known `(plaintext, ciphertext, salts)` sample, produced under the
/// unknown key being attacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub s1: u32,
    pub s2: u32,
    pub plaintext: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Read every complete record from `reader`. A record is ten
/// whitespace-separated tokens: four decimal salt-1 bytes, four decimal
/// salt-2 bytes (little-endian within the word), a base64 plaintext, and
/// a base64 ciphertext. Malformed or truncated trailing tokens are
/// dropped rather than treated as an error — the engine proceeds with
/// whatever complete samples it has.
pub fn read_samples<R: Read>(reader: R) -> Vec<Sample> {
    let mut tokens = Vec::new();
    for line in BufReader::new(reader).lines().map_while(Result::ok) {
        tokens.extend(line.split_whitespace().map(str::to_owned));
    }

    let mut samples = Vec::new();
    for chunk in tokens.chunks(10) {
        if chunk.len() < 10 {
            break;
        }
        if let Some(sample) = parse_record(chunk) {
            samples.push(sample);
        }
    }
    samples
}

fn parse_record(tokens: &[String]) -> Option<Sample> {
    let mut salt_bytes = [0u8; 8];
    for (i, slot) in salt_bytes.iter_mut().enumerate() {
        *slot = tokens[i].parse::<u8>().ok()?;
    }
    let s1 = u32::from_le_bytes(salt_bytes[0..4].try_into().ok()?);
    let s2 = u32::from_le_bytes(salt_bytes[4..8].try_into().ok()?);

    let plaintext = hohha_base64::decode(&tokens[8]).ok()?;
    let ciphertext = hohha_base64::decode(&tokens[9]).ok()?;

    Some(Sample {
        s1,
        s2,
        plaintext,
        ciphertext,
    })
}
