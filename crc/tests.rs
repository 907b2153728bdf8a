use super::*;

#[test]
fn check_value() {
    // Standard Castagnoli CRC32 check value for the ASCII digits "123456789".
    assert_eq!(crc32(b"123456789"), 0xE3069283);
}

#[test]
fn empty_input() {
    assert_eq!(crc32(b""), 0);
}

#[test]
fn fold_byte_matches_crc32() {
    let data = b"the quick brown fox";
    let mut crc = !0u32;
    for &byte in data {
        crc = fold_byte(crc, byte);
    }
    assert_eq!(!crc, crc32(data));
}

#[test]
fn differs_on_single_bit_flip() {
    let a = crc32(b"hohha dynamic xor");
    let b = crc32(b"hohha dynamic xos");
    assert_ne!(a, b);
}
