use rand::RngCore;

use hohha_cipher::KeyBlob;

use crate::error::CliError;

/// Produce a fresh random key blob and print it base64-encoded.
pub fn keygen(length: usize, jumps: u8) -> Result<(), CliError> {
    if length == 0 || !length.is_power_of_two() {
        return Err(CliError::InvalidArgument(format!(
            "key length {length} is not a power of two"
        )));
    }

    let mut rng = rand::thread_rng();

    let mut body = vec![0u8; length];
    rng.fill_bytes(&mut body);

    let mut salts = [0u8; 8];
    rng.fill_bytes(&mut salts);
    let s1 = u32::from_le_bytes(salts[0..4].try_into().unwrap());
    let s2 = u32::from_le_bytes(salts[4..8].try_into().unwrap());

    let blob = KeyBlob {
        key_jumps: jumps,
        s1,
        s2,
        body,
    };

    println!("{}", hohha_base64::encode(&blob.encode()));
    Ok(())
}
