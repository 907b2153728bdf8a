use crate::error::CliError;
use hohha_cipher::KeyBlob;

/// `hohha crc`: print the CRC32 of a message or a key body, matching the
/// original tool's `-M/-m/-K/-k` options — exactly one source must be
/// given.
pub fn crc(
    message: Option<String>,
    message_base64: Option<String>,
    key_blob: Option<String>,
    key_body: Option<String>,
) -> Result<(), CliError> {
    let sources = [&message, &message_base64, &key_blob, &key_body]
        .iter()
        .filter(|v| v.is_some())
        .count();

    if sources != 1 {
        return Err(CliError::InvalidArgument(
            "exactly one of --message, --message-base64, --key-blob, --key-body is required"
                .to_string(),
        ));
    }

    let data = if let Some(msg) = message {
        msg.into_bytes()
    } else if let Some(msg) = message_base64 {
        hohha_base64::decode(&msg)?
    } else if let Some(blob) = key_blob {
        KeyBlob::decode(&hohha_base64::decode(&blob)?)?.body
    } else if let Some(body) = key_body {
        hohha_base64::decode(&body)?
    } else {
        unreachable!("argument-count check above guarantees one source is present")
    };

    let crc = hohha_crc::crc32(&data);
    println!("{crc:#010x} ({crc})");
    Ok(())
}
