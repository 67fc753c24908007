//! Exploding ("acing") die.
//!
//! Whenever the die shows its highest face it is rolled again and the new
//! result added, without limit. Totals that are a positive multiple of the
//! die size can therefore never occur: a d6 showing 6 always keeps going.

use rand::Rng;

use super::{clamp_probability, StochasticObject};
use crate::value_objects::DieSides;

/// A single exploding die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcingDie {
    sides: DieSides,
}

impl AcingDie {
    pub fn new(sides: DieSides) -> Self {
        Self { sides }
    }

    /// Roll the die, re-rolling and summing while it shows its highest face.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let sides = self.sides.get();
        let mut total = 0u32;
        loop {
            let face = rng.gen_range(1..=sides);
            total = total.saturating_add(face);
            if face != sides {
                return total;
            }
        }
    }
}

impl StochasticObject for AcingDie {
    /// With `n = floor(x) = q * sides + r` (`0 <= r < sides`), every one of
    /// the `q` explosions multiplies the remaining mass by `1 / sides`:
    /// `P(X <= n) = 1 - (sides - r) / sides^(q + 1)`.
    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        let n = x.floor();
        if n < 1.0 {
            return 0.0;
        }

        let sides = f64::from(self.sides.get());
        let explosions = (n / sides).floor();
        let face = n - explosions * sides;
        let exponent = explosions + 1.0;
        if exponent > f64::from(i32::MAX) {
            return 1.0;
        }
        let scale = sides.powi(exponent as i32);
        if !scale.is_finite() {
            return 1.0;
        }
        clamp_probability((scale - (sides - face)) / scale)
    }

    fn minimum(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn die(sides: u32) -> AcingDie {
        AcingDie::new(DieSides::new(sides).expect("valid die size"))
    }

    #[test]
    fn minimum_is_one() {
        assert_eq!(die(4).minimum(), 1.0);
        assert_eq!(die(12).minimum(), 1.0);
    }

    #[test]
    fn natural_one_probability() {
        assert_eq!(die(8).cdf(1.0), 0.125);
        assert!((die(6).cdf(1.0) - 1.0 / 6.0).abs() < 1e-15);
        assert!((die(12).cdf(1.5) - 1.0 / 12.0).abs() < 1e-15);
    }

    #[test]
    fn below_support_is_zero() {
        assert_eq!(die(6).cdf(0.999), 0.0);
        assert_eq!(die(6).cdf(-3.0), 0.0);
        assert_eq!(die(6).cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(die(6).cdf(f64::NAN), 0.0);
    }

    #[test]
    fn faces_below_the_maximum_are_uniform() {
        let d6 = die(6);
        for face in 1..6 {
            let expected = f64::from(face) / 6.0;
            assert!((d6.cdf(f64::from(face)) - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn multiples_of_the_die_size_are_unreachable() {
        let d6 = die(6);
        assert_eq!(d6.cdf(6.0), d6.cdf(5.0));
        assert_eq!(d6.cdf(12.0), d6.cdf(11.0));
        let d4 = die(4);
        assert_eq!(d4.cdf(8.0), d4.cdf(7.0));
    }

    #[test]
    fn one_explosion() {
        // 7 on a d6 is 6 then 1
        let expected = 5.0 / 6.0 + 1.0 / 36.0;
        assert!((die(6).cdf(7.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn approaches_one() {
        assert!(die(6).cdf(100.0) > 1.0 - 1e-12);
        assert_eq!(die(6).cdf(1e300), 1.0);
        assert_eq!(die(6).cdf(f64::INFINITY), 1.0);
    }

    #[test]
    fn roll_never_lands_on_a_multiple_of_the_size() {
        let d4 = die(4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let total = d4.roll(&mut rng);
            assert!(total >= 1);
            assert_ne!(total % 4, 0, "rolled {}", total);
        }
    }

    #[test]
    fn roll_frequencies_match_cdf() {
        let d6 = die(6);
        let mut rng = StdRng::seed_from_u64(42);
        let samples = 20_000;
        let rolls: Vec<u32> = (0..samples).map(|_| d6.roll(&mut rng)).collect();

        for threshold in [1u32, 3, 5, 7, 11, 13] {
            let hits = rolls.iter().filter(|&&r| r <= threshold).count();
            let empirical = hits as f64 / f64::from(samples);
            let expected = d6.cdf(f64::from(threshold));
            assert!(
                (empirical - expected).abs() < 0.02,
                "threshold {}: empirical {} expected {}",
                threshold,
                empirical,
                expected
            );
        }
    }
}
