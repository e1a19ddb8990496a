// Test random sources
//
// `ScriptedRng` replays fixed 64-bit words; `pick` computes the word that makes
// `gen_range` over `n` values land on index `i`. `BudgetRng` panics once a fixed
// number of words has been drawn, turning a spinning loop into a test failure.

use rand::RngCore;
use std::collections::VecDeque;

/// Word that `gen_range` maps to offset `i` in a range of `n` values
pub fn pick(i: u64, n: u64) -> u64 {
    assert!(i < n, "pick: index {i} out of range {n}");
    let numerator = (u128::from(i) << 64) + u128::from(n) - 1;
    (numerator / u128::from(n)) as u64
}

/// Replays scripted words, then zeros
#[derive(Debug, Default)]
pub struct ScriptedRng {
    script: VecDeque<u64>,
    drawn: usize,
}

impl ScriptedRng {
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: script.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Scripted words not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Words drawn so far, scripted or not
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.drawn += 1;
        self.script.pop_front().unwrap_or(0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Wraps a source and panics after `budget` words
#[derive(Debug)]
pub struct BudgetRng<R> {
    inner: R,
    budget: usize,
}

impl<R: RngCore> BudgetRng<R> {
    pub fn new(inner: R, budget: usize) -> Self {
        Self { inner, budget }
    }

    fn spend(&mut self) {
        assert!(self.budget > 0, "entropy budget exhausted");
        self.budget -= 1;
    }
}

impl<R: RngCore> RngCore for BudgetRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.spend();
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.spend();
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.spend();
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.spend();
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_pick_lands_on_index() {
        for n in [1u64, 2, 3, 7, 52] {
            for i in 0..n {
                let mut rng = ScriptedRng::new([pick(i, n)]);
                assert_eq!(rng.gen_range(0..n as usize), i as usize);
            }
        }
    }

    #[test]
    fn test_pick_inclusive_range_with_offset() {
        let mut rng = ScriptedRng::new([pick(1, 3)]);
        assert_eq!(rng.gen_range(1..=3usize), 2);
    }

    #[test]
    fn test_scripted_falls_back_to_zero() {
        let mut rng = ScriptedRng::new([5]);
        assert_eq!(rng.next_u64(), 5);
        assert_eq!(rng.next_u64(), 0);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    #[should_panic(expected = "entropy budget exhausted")]
    fn test_budget_panics_when_spent() {
        let mut rng = BudgetRng::new(ScriptedRng::default(), 2);
        rng.next_u64();
        rng.next_u64();
        rng.next_u64();
    }
}
