//! Probability engine for Savage Worlds trait rolls.
//!
//! Exploding dice, the max-of-two-dice trait roll, flat modifiers and
//! rerolls, expressed as composable cumulative distribution functions.

pub mod error;
pub mod game_systems;
pub mod stochastic;
pub mod value_objects;

pub use error::DomainError;
pub use game_systems::{SwTraitRoll, TraitOutcome, TraitRollResult};
pub use stochastic::{
    clamp_probability, AcingDie, FlatMod, MaxConnector, SharedStochastic, StochasticObject,
};
pub use value_objects::{DiceParseError, DieSides, OutcomeBar, OutcomeChart, TraitRollFormula};
