//! The recursive search `brut`: advance, then branch on whichever
//! unknown blocks progress, snapshotting and restoring the constraint
//! model around every branch.

use crate::advance::advance_all;
use crate::constraint::SearchContext;
use crate::incr32_mask;
use crate::order::SearchPolicy;
use crate::pool::SnapshotPool;
use crate::progress::ProgressFlag;
use crate::ror32;

/// Depth-first search over the space of key bytes and `v` bits
/// consistent with every sample.
///
/// `depth_budget` counts only key-index branches (per spec.md §4.5, `v`
/// bit guesses are not part of the iterative-deepening depth); `None`
/// means unrestricted. `policy` supplies candidate ordering, leaf/solution
/// callbacks for weight learning, and owns nothing of the search state
/// itself.
pub fn brut(
    ctx: &mut SearchContext,
    pool: &mut SnapshotPool,
    depth_budget: Option<u32>,
    policy: &mut dyn SearchPolicy,
    progress: &ProgressFlag,
) {
    if progress.poll() {
        tracing::info!(
            max_progress = max_progress(ctx),
            samples = ctx.samples.len(),
            "progress report requested"
        );
    }

    let report = advance_all(&mut ctx.positions, &ctx.mask, ctx.key_jumps, &ctx.samples);
    if report.inconsistent {
        return;
    }

    if report.all_done {
        policy.on_solution(&ctx.orig, &ctx.mask);
        policy.on_leaf(max_progress(ctx));
        return;
    }

    if !report.v_need.is_empty() {
        let mut need = 0u32;
        for &(pos_i, local_need) in &report.v_need {
            let idx = ctx.positions[pos_i].idx;
            need |= ror32(local_need, (idx % 32) as u32);
        }

        let mut guess = 0u32;
        loop {
            let snap = pool.take(ctx);
            ctx.commit_v_bits(0, need, guess);
            brut(ctx, pool, depth_budget, policy, progress);
            pool.restore(ctx, snap);

            if guess == need {
                break;
            }
            guess = incr32_mask(guess, need);
        }
        return;
    }

    if depth_budget == Some(0) {
        policy.on_leaf(max_progress(ctx));
        return;
    }

    let m = policy.choose(&report.key_need);
    for byte in policy.candidates(m) {
        let snap = pool.take(ctx);
        ctx.commit_key_byte(m, byte);
        policy.enter_key(m, byte);
        brut(ctx, pool, depth_budget.map(|d| d - 1), policy, progress);
        policy.exit_key();
        pool.restore(ctx, snap);
    }
}

fn max_progress(ctx: &SearchContext) -> usize {
    ctx.positions.iter().map(|p| p.idx).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Mask, Orig};
    use crate::order::NullPolicy;
    use crate::vectors::Sample;
    use hohha_cipher::State;

    fn encrypted_sample(key: &[u8], jumps: u32, s1: u32, s2: u32, plaintext: &[u8]) -> Sample {
        let mut state = State::new(key, jumps, s1, s2, 0).unwrap();
        let mut ciphertext = plaintext.to_vec();
        state.encrypt(&mut ciphertext);
        Sample {
            s1,
            s2,
            plaintext: plaintext.to_vec(),
            ciphertext,
        }
    }

    #[test]
    fn unrestricted_search_finds_the_planted_key() {
        let key = [0x11, 0x22, 0x33, 0x44];
        let samples = vec![
            encrypted_sample(&key, 2, 0x01020304, 0x05060708, b"the quick brown fox"),
            encrypted_sample(&key, 2, 0xAABBCCDD, 0x11223344, b"jumps over the lazy"),
            encrypted_sample(&key, 2, 0xCAFEBABE, 0x0BADF00D, b"dog while nobody was"),
        ];

        let mut ctx = SearchContext::new(samples.clone(), key.len(), 2);
        let mut pool = SnapshotPool::new(1 << 10);
        let mut policy = NullPolicy::default();
        let progress = ProgressFlag::new();

        brut(&mut ctx, &mut pool, None, &mut policy, &progress);

        assert!(!policy.solutions.is_empty());
        let (orig, mask) = &policy.solutions[0];
        assert_found_key_matches(&key, orig, mask, &samples);
    }

    fn assert_found_key_matches(key: &[u8], orig: &Orig, mask: &Mask, samples: &[Sample]) {
        for i in 0..key.len() {
            assert_eq!(mask.key[i], 0xff);
            assert_eq!(orig.key[i], key[i]);
        }
        for sample in samples {
            let mut state = State::new(&orig.key, 2, sample.s1, sample.s2, 0).unwrap();
            let mut data = sample.plaintext.clone();
            state.encrypt(&mut data);
            assert_eq!(data, sample.ciphertext);
        }
    }
}
