use super::*;
use rand::Rng;

#[test]
fn encoded_len_matches_rfc4648() {
    assert_eq!(encoded_len(0), 0);
    assert_eq!(encoded_len(1), 4);
    assert_eq!(encoded_len(2), 4);
    assert_eq!(encoded_len(3), 4);
    assert_eq!(encoded_len(4), 8);
}

#[test]
fn encode_known_vectors() {
    assert_eq!(encode(b""), "");
    assert_eq!(encode(b"f"), "Zg==");
    assert_eq!(encode(b"fo"), "Zm8=");
    assert_eq!(encode(b"foo"), "Zm9v");
    assert_eq!(encode(b"foob"), "Zm9vYg==");
    assert_eq!(encode(b"fooba"), "Zm9vYmE=");
    assert_eq!(encode(b"foobar"), "Zm9vYmFy");
}

#[test]
fn decode_known_vectors() {
    assert_eq!(decode("Zg==").unwrap(), b"f");
    assert_eq!(decode("Zm8=").unwrap(), b"fo");
    assert_eq!(decode("Zm9v").unwrap(), b"foo");
    assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
}

#[test]
fn decode_tolerates_whitespace() {
    assert_eq!(decode("Zm9v\nYmFy\n").unwrap(), b"foobar");
    assert_eq!(decode(" Zg == ").unwrap(), b"f");
}

#[test]
fn decode_rejects_invalid_character() {
    assert_eq!(decode("Zg!="), Err(Error::InvalidCharacter(b'!')));
}

#[test]
fn decode_truncates_dangling_character() {
    assert_eq!(decode("Z").unwrap(), Vec::<u8>::new());
    assert_eq!(decode("Zm9vZ").unwrap(), b"foo");
}

#[test]
fn roundtrip_random_buffers() {
    let mut rng = rand::thread_rng();
    for len in 0..200 {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let encoded = encode(&data);
        assert_eq!(decode(&encoded).unwrap(), data, "len {len}");
    }
}
