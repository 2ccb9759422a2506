/// Width of the ARC4 state and the radix used when assembling draws.
const WIDTH: f64 = 256.0;
/// Bytes taken for the initial numerator of every draw (48 bits).
const CHUNKS: usize = 6;
/// 2^48
const START_DENOM: f64 = 281_474_976_710_656.0;
/// 2^52
const SIGNIFICANCE: f64 = 4_503_599_627_370_496.0;
/// 2^53
const OVERFLOW: f64 = 9_007_199_254_740_992.0;

/// Seeded pseudo-random source producing the same stream as the `seedrandom`
/// ARC4 generator for a given seed string.
///
/// Every dataset in the playground is drawn from one of these, so a seed and
/// a call sequence pin the generated points bit for bit. The instance is an
/// ordinary value: each session owns its own and threads it through every
/// call that must be reproducible.
#[derive(Debug, Clone)]
pub struct SeedRandom {
    seed: String,
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl SeedRandom {
    /// Keys the generator with `seed` and discards the first 256 bytes of
    /// keystream.
    pub fn new(seed: &str) -> SeedRandom {
        let key = mix_key(seed);

        let mut s = [0u8; 256];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut j: u8 = 0;
        for i in 0..256 {
            let t = s[i];
            j = j.wrapping_add(key[i % key.len()]).wrapping_add(t);
            s[i] = s[j as usize];
            s[j as usize] = t;
        }

        let mut rng = SeedRandom { seed: seed.to_owned(), s, i: 0, j: 0 };
        for _ in 0..256 {
            rng.next_byte();
        }
        rng
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[self.i as usize];
        self.j = self.j.wrapping_add(t);
        self.s[self.i as usize] = self.s[self.j as usize];
        self.s[self.j as usize] = t;
        let idx = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[idx as usize]
    }

    /// Big-endian accumulation of `count` keystream bytes. Exact as long as
    /// the result stays below 2^53, which holds for `count <= 6`.
    fn next_bytes(&mut self, count: usize) -> f64 {
        let mut r = 0.0;
        for _ in 0..count {
            r = r * WIDTH + self.next_byte() as f64;
        }
        r
    }

    /// Uniform draw in [0, 1) with 53 significant bits.
    pub fn uniform(&mut self) -> f64 {
        let mut n = self.next_bytes(CHUNKS);
        let mut d = START_DENOM;
        let mut x: u32 = 0;
        while n < SIGNIFICANCE {
            n = (n + x as f64) * WIDTH;
            d *= WIDTH;
            x = self.next_byte() as u32;
        }
        while n >= OVERFLOW {
            n /= 2.0;
            d /= 2.0;
            x >>= 1;
        }
        (n + x as f64) / d
    }

    /// Uniform draw in [a, b).
    pub fn uniform_range(&mut self, a: f64, b: f64) -> f64 {
        self.uniform() * (b - a) + a
    }

    /// Normal draw via the polar Box-Muller method. Rejection-samples a point
    /// in the unit disc; expected ~1.27 attempts per call.
    pub fn normal(&mut self, mean: f64, variance: f64) -> f64 {
        let (v1, s) = loop {
            let v1 = 2.0 * self.uniform() - 1.0;
            let v2 = 2.0 * self.uniform() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if in_open_unit_disc(s) {
                break (v1, s);
            }
        };
        let result = (-2.0 * s.ln() / s).sqrt() * v1;
        mean + variance.sqrt() * result
    }

    /// In-place Fisher-Yates shuffle, walking the counter down from the end.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut counter = items.len();
        while counter > 0 {
            let index = (self.uniform() * counter as f64).floor() as usize;
            counter -= 1;
            items.swap(counter, index);
        }
    }
}

/// Accepts a squared radius in (0, 1]; the origin would make `ln(s) / s` NaN.
fn in_open_unit_disc(s: f64) -> bool {
    s > 0.0 && s <= 1.0
}

/// Folds the seed's UTF-16 code units into an ARC4 key of at most 256 bytes.
fn mix_key(seed: &str) -> Vec<u8> {
    let mut key: Vec<u8> = Vec::new();
    let mut smear: u32 = 0;
    for (j, unit) in seed.encode_utf16().enumerate() {
        let slot = j & 255;
        let prev = key.get(slot).copied().unwrap_or(0) as u32;
        smear ^= prev * 19;
        let byte = (smear.wrapping_add(unit as u32) & 255) as u8;
        if slot < key.len() {
            key[slot] = byte;
        } else {
            key.push(byte);
        }
    }
    if key.is_empty() {
        key.push(0);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeedRandom::new("nn-viz");
        let mut b = SeedRandom::new("nn-viz");
        for _ in 0..100 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeedRandom::new("nn-viz");
        let mut b = SeedRandom::new("nn-viz2");
        let same = (0..20).filter(|_| a.uniform() == b.uniform()).count();
        assert!(same < 20);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = SeedRandom::new("bounds");
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn uniform_range_respects_bounds() {
        let mut rng = SeedRandom::new("range");
        for _ in 0..1_000 {
            let v = rng.uniform_range(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&v));
        }
    }

    #[test]
    fn empty_seed_is_usable() {
        let mut rng = SeedRandom::new("");
        let u = rng.uniform();
        assert!((0.0..1.0).contains(&u));
    }

    #[test]
    fn polar_sampler_rejects_the_origin() {
        assert!(!in_open_unit_disc(0.0));
        assert!(in_open_unit_disc(f64::MIN_POSITIVE));
        assert!(in_open_unit_disc(1.0));
        assert!(!in_open_unit_disc(1.0 + f64::EPSILON));
    }

    #[test]
    fn normal_draws_are_finite() {
        let mut rng = SeedRandom::new("finite");
        assert!((0..10_000).all(|_| rng.normal(0.0, 1.0).is_finite()));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeedRandom::new("perm");
        let mut items: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn normal_has_roughly_the_requested_moments() {
        let mut rng = SeedRandom::new("moments");
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.normal(3.0, 4.0)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean = {mean}");
        assert!((var - 4.0).abs() < 0.3, "variance = {var}");
    }
}
