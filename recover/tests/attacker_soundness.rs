//! End-to-end attacker soundness: for a planted key, a handful of
//! known-plaintext samples, and a small iterative-deepening cutoff, the
//! engine must emit at least one solution, and every emitted `(key, v)`
//! must reproduce each sample's ciphertext exactly when used to encrypt
//! its plaintext under that sample's salts.

use hohha_cipher::State;
use hohha_recover::{attack, OrderingParams, ProgressFlag, Sample};

fn make_samples(key: &[u8], jumps: u32, specs: &[(u32, u32, &[u8])]) -> Vec<Sample> {
    specs
        .iter()
        .map(|&(s1, s2, plaintext)| {
            let mut state = State::new(key, jumps, s1, s2, 0).unwrap();
            let mut ciphertext = plaintext.to_vec();
            state.encrypt(&mut ciphertext);
            Sample {
                s1,
                s2,
                plaintext: plaintext.to_vec(),
                ciphertext,
            }
        })
        .collect()
}

fn assert_solutions_reproduce_samples(solutions: &[hohha_recover::Solution], samples: &[Sample]) {
    assert!(!solutions.is_empty(), "expected at least one solution");

    for solution in solutions {
        for sample in samples {
            let mut state = State::new(&solution.key, 2, sample.s1, sample.s2, 0).unwrap();
            let mut data = sample.plaintext.clone();
            state.encrypt(&mut data);
            assert_eq!(data, sample.ciphertext);
        }
    }
}

#[test]
fn recovers_length_four_key_from_three_samples() {
    let key = [0x11, 0x22, 0x33, 0x44];
    let samples = make_samples(
        &key,
        2,
        &[
            (0x01020304, 0x05060708, b"the quick brown fox jumps ov"),
            (0xAABBCCDD, 0x11223344, b"er the lazy dog while nobody"),
            (0xCAFEBABE, 0x0BADF00D, b"was watching very carefully!"),
        ],
    );

    let params = OrderingParams {
        cutoff: Some(2),
        ..OrderingParams::default()
    };

    let report = attack(
        samples.clone(),
        key.len(),
        2,
        &params,
        &ProgressFlag::new(),
        Some(&key),
    )
    .unwrap();

    assert_solutions_reproduce_samples(&report.solutions, &samples);
}

#[test]
fn recovers_length_eight_key_from_four_samples() {
    let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
    let samples = make_samples(
        &key,
        2,
        &[
            (0x01020304, 0x05060708, b"sphinx of black quartz, judge"),
            (0xDEADBEEF, 0xFEEDFACE, b" my vow. pack my box with fiv"),
            (0x0BADF00D, 0xCAFEBABE, b"e dozen liquor jugs, please!!"),
            (0x13579BDF, 0x2468ACE0, b"the five boxing wizards jump!"),
        ],
    );

    let params = OrderingParams {
        cutoff: Some(1),
        ..OrderingParams::default()
    };

    let report = attack(
        samples.clone(),
        key.len(),
        2,
        &params,
        &ProgressFlag::new(),
        None,
    )
    .unwrap();

    assert_solutions_reproduce_samples(&report.solutions, &samples);
}
