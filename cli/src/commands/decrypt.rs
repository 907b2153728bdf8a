use std::path::PathBuf;

use hohha_cipher::{KeyBlob, PacketHeader, State, HEADER_LEN};

use crate::error::CliError;
use crate::io_util::{read_input, write_output};

/// Inverse of `hohha encrypt`: strips the [`PacketHeader`], decrypts with
/// the salts carried in the header (not the key blob's defaults, in case
/// the packet was produced with an overridden salt pair), and rejects
/// the packet if the recovered plaintext's CRC does not match the one
/// the header carries.
pub fn decrypt(key: &str, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), CliError> {
    let blob = KeyBlob::decode(&hohha_base64::decode(key)?)?;

    let packet = read_input(input.as_deref())?;
    let header = PacketHeader::decode(&packet)?;
    let mut ciphertext = packet[HEADER_LEN..].to_vec();

    let mut state = State::new(&blob.body, blob.key_jumps as u32, header.s1, header.s2, 0)?;
    state.decrypt(&mut ciphertext);

    if state.text_crc() != header.plaintext_crc {
        return Err(CliError::InvalidArgument(
            "packet failed its plaintext CRC check".to_string(),
        ));
    }

    write_output(output.as_deref(), &ciphertext)?;
    Ok(())
}
