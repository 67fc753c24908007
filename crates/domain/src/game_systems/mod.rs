//! Game system implementations.
//!
//! Each system turns its dice mechanic into distributions from the
//! [`stochastic`](crate::stochastic) algebra.
//!
//! # Supported Systems
//!
//! - Savage Worlds (`savage_worlds`)

mod savage_worlds;

// Savage Worlds exports
pub use savage_worlds::{SwTraitRoll, TraitOutcome, TraitRollResult, RAISE_STEP, TARGET_NUMBER};
