use super::{SharedStochastic, StochasticObject};

/// `X + modifier` for a wrapped variable `X`.
#[derive(Clone)]
pub struct FlatMod {
    underlying: SharedStochastic,
    modifier: f64,
}

impl FlatMod {
    pub fn new(underlying: SharedStochastic, modifier: f64) -> Self {
        Self {
            underlying,
            modifier,
        }
    }

    pub fn modifier(&self) -> f64 {
        self.modifier
    }
}

impl StochasticObject for FlatMod {
    fn cdf(&self, x: f64) -> f64 {
        self.underlying.cdf(x - self.modifier)
    }

    fn minimum(&self) -> f64 {
        self.underlying.minimum() + self.modifier
    }
}

impl std::fmt::Debug for FlatMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMod")
            .field("modifier", &self.modifier)
            .field("minimum", &self.minimum())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stochastic::{AcingDie, MockStochasticObject};
    use crate::value_objects::DieSides;
    use mockall::predicate::eq;
    use std::sync::Arc;

    #[test]
    fn cdf_queries_the_shifted_point() {
        let mut inner = MockStochasticObject::new();
        inner.expect_cdf().with(eq(1.5)).times(1).return_const(0.4);

        let shifted = FlatMod::new(Arc::new(inner), 2.0);
        assert_eq!(shifted.cdf(3.5), 0.4);
    }

    #[test]
    fn negative_modifier_shifts_down() {
        let mut inner = MockStochasticObject::new();
        inner.expect_cdf().with(eq(5.0)).times(1).return_const(0.75);
        inner.expect_minimum().return_const(1.0);

        let shifted = FlatMod::new(Arc::new(inner), -2.0);
        assert_eq!(shifted.cdf(3.0), 0.75);
        assert_eq!(shifted.minimum(), -1.0);
    }

    #[test]
    fn minimum_moves_with_the_modifier() {
        let die: SharedStochastic = Arc::new(AcingDie::new(DieSides::D8));
        let shifted = FlatMod::new(die, 3.0);
        assert_eq!(shifted.minimum(), 4.0);
        assert_eq!(shifted.modifier(), 3.0);
    }

    #[test]
    fn shift_law_on_a_die() {
        let die: SharedStochastic = Arc::new(AcingDie::new(DieSides::D6));
        for m in [-3.0, -0.5, 0.0, 1.0, 4.0] {
            let shifted = FlatMod::new(die.clone(), m);
            for x in [-2.0, 0.0, 1.0, 2.5, 6.0, 9.0, 14.0] {
                assert_eq!(shifted.cdf(x), die.cdf(x - m));
            }
        }
    }

    #[test]
    fn nested_shifts_compose() {
        let die: SharedStochastic = Arc::new(AcingDie::new(DieSides::D4));
        let once: SharedStochastic = Arc::new(FlatMod::new(die.clone(), 1.0));
        let twice = FlatMod::new(once, 2.0);
        assert_eq!(twice.minimum(), 4.0);
        assert_eq!(twice.cdf(6.0), die.cdf(3.0));
    }
}
