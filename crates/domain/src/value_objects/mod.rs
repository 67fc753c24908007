//! Value objects - Immutable objects defined by their attributes

mod dice;
mod outcome_chart;

pub use dice::{DiceParseError, DieSides, TraitRollFormula};
pub use outcome_chart::{OutcomeBar, OutcomeChart};
