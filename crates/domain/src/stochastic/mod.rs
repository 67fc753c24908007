//! Probability algebra over real-valued random variables.
//!
//! Every variable is exposed only through its cumulative distribution
//! function and the lower bound of its support. Variables compose into a
//! DAG: decorators and combinators hold their operands behind an [`Arc`],
//! so one leaf may feed several combinators at once.
//!
//! # Variants
//!
//! - [`AcingDie`] - single exploding die (leaf)
//! - [`FlatMod`] - shifts a variable by a constant
//! - [`MaxConnector`] - maximum of two independent variables
//! - [`SwTraitRoll`](crate::game_systems::SwTraitRoll) - composite trait roll

mod acing_die;
mod flat_mod;
mod max_connector;

pub use acing_die::AcingDie;
pub use flat_mod::FlatMod;
pub use max_connector::MaxConnector;

use std::sync::Arc;

/// A random variable queried through its distribution function.
#[cfg_attr(test, mockall::automock)]
pub trait StochasticObject: Send + Sync {
    /// `P(X <= x)`. Non-decreasing in `x` and within `[0, 1]`.
    fn cdf(&self, x: f64) -> f64;

    /// Smallest value the variable can take.
    fn minimum(&self) -> f64;
}

/// Shared handle to a variable used as an operand.
pub type SharedStochastic = Arc<dyn StochasticObject>;

/// Map a computed probability back into `[0, 1]`. NaN becomes 0.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
