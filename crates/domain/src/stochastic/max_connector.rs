use super::{SharedStochastic, StochasticObject};

/// `max(X1, X2)` for two independent variables.
#[derive(Clone)]
pub struct MaxConnector {
    first: SharedStochastic,
    second: SharedStochastic,
}

impl MaxConnector {
    pub fn new(first: SharedStochastic, second: SharedStochastic) -> Self {
        Self { first, second }
    }
}

impl StochasticObject for MaxConnector {
    // Independence: P(max <= x) = P(X1 <= x) * P(X2 <= x)
    fn cdf(&self, x: f64) -> f64 {
        self.first.cdf(x) * self.second.cdf(x)
    }

    fn minimum(&self) -> f64 {
        self.first.minimum().max(self.second.minimum())
    }
}

impl std::fmt::Debug for MaxConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxConnector")
            .field("minimum", &self.minimum())
            .finish_non_exhaustive()
    }
}
