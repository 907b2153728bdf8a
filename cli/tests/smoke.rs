//! CLI smoke tests: `hohha encrypt` piped into `hohha decrypt` recovers
//! the original message, `keygen` produces a blob `encrypt`/`decrypt`
//! accept, and `crc` agrees with the library function on the same bytes.

use assert_cmd::Command;
use predicates::prelude::*;

fn sample_key() -> String {
    let blob = hohha_cipher::KeyBlob {
        key_jumps: 2,
        s1: 0x01020304,
        s2: 0x05060708,
        body: vec![0x11, 0x22, 0x33, 0x44],
    };
    hohha_base64::encode(&blob.encode())
}

#[test]
fn encrypt_then_decrypt_recovers_the_message() {
    let key = sample_key();
    let message = b"the quick brown fox jumps over the lazy dog";

    let encrypted = Command::cargo_bin("hohha")
        .unwrap()
        .args(["encrypt", "--key", &key])
        .write_stdin(message.to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let decrypted = Command::cargo_bin("hohha")
        .unwrap()
        .args(["decrypt", "--key", &key])
        .write_stdin(encrypted)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(decrypted, message);
}

#[test]
fn keygen_produces_a_usable_blob() {
    let output = Command::cargo_bin("hohha")
        .unwrap()
        .args(["keygen", "--length", "8", "--jumps", "3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let key = String::from_utf8(output).unwrap().trim().to_string();

    Command::cargo_bin("hohha")
        .unwrap()
        .args(["encrypt", "--key", &key])
        .write_stdin(b"hi".to_vec())
        .assert()
        .success();
}

#[test]
fn crc_of_plain_message_matches_the_library() {
    let message = "hohha";
    let expected = hohha_crc::crc32(message.as_bytes());

    Command::cargo_bin("hohha")
        .unwrap()
        .args(["crc", "--message", message])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{expected:#010x}")));
}

#[test]
fn decrypt_rejects_truncated_packet() {
    let key = sample_key();

    Command::cargo_bin("hohha")
        .unwrap()
        .args(["decrypt", "--key", &key])
        .write_stdin(vec![0u8; 4])
        .assert()
        .failure();
}
