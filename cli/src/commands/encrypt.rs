use std::path::PathBuf;

use hohha_cipher::{KeyBlob, PacketHeader, State};

use crate::error::CliError;
use crate::io_util::{read_input, write_output};

/// Packet-framed single-message encrypt: `hohha encrypt` reads plaintext,
/// prepends a [`PacketHeader`] carrying the salts and plaintext CRC so
/// `hohha decrypt` never needs them passed out of band.
pub fn encrypt(key: &str, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), CliError> {
    let blob = KeyBlob::decode(&hohha_base64::decode(key)?)?;

    let plaintext = read_input(input.as_deref())?;
    let mut state = State::new(&blob.body, blob.key_jumps as u32, blob.s1, blob.s2, 0)?;

    let mut ciphertext = plaintext;
    state.encrypt(&mut ciphertext);

    let header = PacketHeader {
        algorithm_id: 1,
        s1: blob.s1,
        s2: blob.s2,
        plaintext_crc: state.text_crc(),
    };

    let mut packet = header.encode().to_vec();
    packet.extend_from_slice(&ciphertext);

    write_output(output.as_deref(), &packet)?;
    Ok(())
}
