// Small helpers shared by the trainers.

/// Wraps `index` into `[0, total)`. Negative values count back from the end.
pub fn normalize_index(index: i64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    index.rem_euclid(total as i64) as usize
}

/// SplitMix64: one u64 of state, good enough for shuffling letter tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the browser's `Math.random` (wasm only).
    pub fn from_browser() -> Self {
        let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::new((hi << 32) | lo)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in `[0, n)`; `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

/// Fisher-Yates shuffle into a fresh vector.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut SplitMix64) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.below(i + 1);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_index_wraps_both_directions() {
        assert_eq!(normalize_index(0, 3), 0);
        assert_eq!(normalize_index(3, 3), 0);
        assert_eq!(normalize_index(7, 3), 1);
        assert_eq!(normalize_index(-1, 3), 2);
        assert_eq!(normalize_index(-4, 3), 2);
        assert_eq!(normalize_index(5, 0), 0);
    }

    #[test]
    fn splitmix_is_deterministic() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SplitMix64::new(7);
        for n in 1..20 {
            for _ in 0..200 {
                assert!(rng.below(n) < n);
            }
        }
    }

    #[test]
    fn shuffle_keeps_the_multiset() {
        let mut rng = SplitMix64::new(99);
        let letters = vec!["H", "a", "u", "s", "o", "a"];
        let mut shuffled = shuffle(&letters, &mut rng);
        assert_eq!(shuffled.len(), letters.len());
        shuffled.sort();
        let mut sorted = letters.clone();
        sorted.sort();
        assert_eq!(shuffled, sorted);
    }
}
