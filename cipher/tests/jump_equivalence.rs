//! For every key_jumps in 2..=8, the unrolled dispatch in `State::jump`
//! and the general loop must land on bitwise-identical state.

use hohha_cipher::{Jumps, State};

fn post_jump_fields(mut state: State) -> (Vec<u8>, u32, u32, u32, u32) {
    state.jump();
    (
        state.key().to_vec(),
        state.s1(),
        state.s2(),
        state.m(),
        state.v(),
    )
}

#[test]
fn unrolled_matches_general_loop() {
    let key = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
    let s1 = 0xCAFEBABEu32;
    let s2 = 0x0DDBA11u32;

    for count in 2..=8u32 {
        let tagged = State::new(&key, count, s1, s2, 0).unwrap();
        let general = State::new(&key, count, s1, s2, 0)
            .unwrap()
            .with_jumps(Jumps::General(count));

        assert_eq!(tagged.jumps().count(), count);
        assert_eq!(general.jumps(), Jumps::General(count));

        let tagged_after = post_jump_fields(tagged);
        let general_after = post_jump_fields(general);

        assert_eq!(
            tagged_after, general_after,
            "mismatch between unrolled and general jump for count {count}"
        );
    }
}
