//! Savage Worlds trait rolls.
//!
//! A Wild Card rolls a trait die and a wild die together and keeps the
//! higher one. Both dice ace. Key features:
//! - Target number 4, each further 4 points is a raise
//! - Double natural 1 is a critical failure regardless of modifiers
//! - Rerolls (bennies) allow another attempt at the roll

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::stochastic::{
    clamp_probability, AcingDie, MaxConnector, SharedStochastic, StochasticObject,
};
use crate::value_objects::{DiceParseError, DieSides, TraitRollFormula};

/// Target number for a plain success.
pub const TARGET_NUMBER: i32 = 4;

/// Points above the target number needed per raise.
pub const RAISE_STEP: i32 = 4;

/// Outcome tier of a trait roll.
///
/// Tiers are indexed as the distribution functions see them:
/// critical failure `-1`, failure `0`, success `1`, `n` raises `1 + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRepr", into = "OutcomeRepr")]
pub enum TraitOutcome {
    /// Trait die and wild die both show a natural 1
    CriticalFailure,
    /// Total below the target number
    Failure,
    /// Target number reached, no raise
    Success,
    /// Success with this many raises (at least 1)
    Raises(u32),
}

impl TraitOutcome {
    /// Outcome for a modified total of a roll that did not critically fail.
    pub fn from_total(total: i32) -> Self {
        if total < TARGET_NUMBER {
            return TraitOutcome::Failure;
        }
        match (total - TARGET_NUMBER) / RAISE_STEP {
            0 => TraitOutcome::Success,
            raises => TraitOutcome::Raises(raises.unsigned_abs()),
        }
    }

    pub fn from_tier(tier: i64) -> Option<Self> {
        match tier {
            -1 => Some(TraitOutcome::CriticalFailure),
            0 => Some(TraitOutcome::Failure),
            1 => Some(TraitOutcome::Success),
            t if t > 1 => u32::try_from(t - 1).ok().map(TraitOutcome::Raises),
            _ => None,
        }
    }

    pub fn tier(&self) -> i64 {
        match self {
            TraitOutcome::CriticalFailure => -1,
            TraitOutcome::Failure => 0,
            TraitOutcome::Success => 1,
            TraitOutcome::Raises(n) => 1 + i64::from(*n),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TraitOutcome::Success | TraitOutcome::Raises(_))
    }

    /// Short label as used on outcome charts.
    pub fn label(&self) -> String {
        match self {
            TraitOutcome::CriticalFailure => "Crit. Fail".to_string(),
            TraitOutcome::Failure => "Fail".to_string(),
            TraitOutcome::Success => "Success".to_string(),
            TraitOutcome::Raises(n) => format!("S+{} Raise", n),
        }
    }
}

/// Wire form of [`TraitOutcome`], checked on the way in
#[derive(Serialize, Deserialize)]
#[serde(tag = "tier", content = "raises", rename_all = "camelCase")]
enum OutcomeRepr {
    CriticalFailure,
    Failure,
    Success,
    Raises(u32),
}

impl From<TraitOutcome> for OutcomeRepr {
    fn from(outcome: TraitOutcome) -> Self {
        match outcome {
            TraitOutcome::CriticalFailure => OutcomeRepr::CriticalFailure,
            TraitOutcome::Failure => OutcomeRepr::Failure,
            TraitOutcome::Success => OutcomeRepr::Success,
            TraitOutcome::Raises(n) => OutcomeRepr::Raises(n),
        }
    }
}

impl TryFrom<OutcomeRepr> for TraitOutcome {
    type Error = String;

    fn try_from(repr: OutcomeRepr) -> Result<Self, Self::Error> {
        match repr {
            OutcomeRepr::CriticalFailure => Ok(TraitOutcome::CriticalFailure),
            OutcomeRepr::Failure => Ok(TraitOutcome::Failure),
            OutcomeRepr::Success => Ok(TraitOutcome::Success),
            OutcomeRepr::Raises(0) => Err("Raise count must be at least 1".to_string()),
            OutcomeRepr::Raises(n) => Ok(TraitOutcome::Raises(n)),
        }
    }
}

impl fmt::Display for TraitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a single trait roll attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRollResult {
    pub trait_die: DieSides,
    pub wild_die: DieSides,
    /// Aced total of the trait die
    pub trait_roll: u32,
    /// Aced total of the wild die
    pub wild_roll: u32,
    pub modifier: i32,
    /// Higher die plus modifier
    pub total: i32,
    pub outcome: TraitOutcome,
}

impl TraitRollResult {
    /// Format as a breakdown string (e.g., "d8(9) d6(3) + 1 = 10: S+1 Raise")
    pub fn breakdown(&self) -> String {
        let dice = format!(
            "{}({}) {}({})",
            self.trait_die, self.trait_roll, self.wild_die, self.wild_roll
        );
        let modifier = match self.modifier {
            0 => String::new(),
            m if m > 0 => format!(" + {}", m),
            m => format!(" - {}", m.unsigned_abs()),
        };
        format!("{}{} = {}: {}", dice, modifier, self.total, self.outcome)
    }
}

/// Trait roll of a Wild Card: trait die and wild die, keep the higher.
///
/// Evaluating the distribution rebuilds the dice every time, so changes made
/// through [`set_modifier`](Self::set_modifier) and
/// [`set_rerolls`](Self::set_rerolls) show up on the next query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwTraitRoll {
    trait_die: DieSides,
    wild_die: DieSides,
    modifier: i32,
    rerolls: u32,
}

impl SwTraitRoll {
    /// Create a trait roll, validating both die sizes.
    pub fn new(
        trait_sides: u32,
        wild_sides: u32,
        modifier: i32,
        rerolls: u32,
    ) -> Result<Self, DiceParseError> {
        Ok(Self::from_dice(
            DieSides::new(trait_sides)?,
            DieSides::new(wild_sides)?,
            modifier,
            rerolls,
        ))
    }

    /// Trait die with a d6 wild die, no modifier and no rerolls.
    pub fn with_trait_die(trait_sides: u32) -> Result<Self, DiceParseError> {
        Self::new(trait_sides, DieSides::D6.get(), 0, 0)
    }

    pub fn from_dice(trait_die: DieSides, wild_die: DieSides, modifier: i32, rerolls: u32) -> Self {
        Self {
            trait_die,
            wild_die,
            modifier,
            rerolls,
        }
    }

    pub fn trait_die(&self) -> DieSides {
        self.trait_die
    }

    pub fn wild_die(&self) -> DieSides {
        self.wild_die
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn set_modifier(&mut self, modifier: i32) {
        tracing::debug!(old = self.modifier, new = modifier, "trait roll modifier changed");
        self.modifier = modifier;
    }

    pub fn rerolls(&self) -> u32 {
        self.rerolls
    }

    pub fn set_rerolls(&mut self, rerolls: u32) {
        tracing::debug!(old = self.rerolls, new = rerolls, "trait roll rerolls changed");
        self.rerolls = rerolls;
    }

    /// Probability of at least one critical failure over the initial roll
    /// and all rerolls.
    pub fn critical_failure_probability(&self) -> f64 {
        let natural_ones = self.unmodified().cdf(1.0);
        clamp_probability(Self::any_critical_failure(natural_ones, self.rerolls))
    }

    /// Roll once, without spending rerolls.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> TraitRollResult {
        let trait_roll = AcingDie::new(self.trait_die).roll(rng);
        let wild_roll = AcingDie::new(self.wild_die).roll(rng);
        let best = i32::try_from(trait_roll.max(wild_roll)).unwrap_or(i32::MAX);
        let total = best.saturating_add(self.modifier);

        let outcome = if trait_roll == 1 && wild_roll == 1 {
            TraitOutcome::CriticalFailure
        } else {
            TraitOutcome::from_total(total)
        };

        TraitRollResult {
            trait_die: self.trait_die,
            wild_die: self.wild_die,
            trait_roll,
            wild_roll,
            modifier: self.modifier,
            total,
            outcome,
        }
    }

    /// Better of the two unmodified dice.
    fn unmodified(&self) -> MaxConnector {
        let trait_die: SharedStochastic = Arc::new(AcingDie::new(self.trait_die));
        let wild_die: SharedStochastic = Arc::new(AcingDie::new(self.wild_die));
        MaxConnector::new(trait_die, wild_die)
    }

    fn any_critical_failure(natural_ones: f64, rerolls: u32) -> f64 {
        1.0 - (1.0 - natural_ones).powf(f64::from(rerolls) + 1.0)
    }
}

impl From<TraitRollFormula> for SwTraitRoll {
    fn from(formula: TraitRollFormula) -> Self {
        Self::from_dice(
            formula.trait_die,
            formula.wild_die,
            formula.modifier,
            formula.rerolls,
        )
    }
}

impl StochasticObject for SwTraitRoll {
    /// `x` is an outcome tier (see [`TraitOutcome`]); the result is the
    /// probability of ending at that tier or below after all rerolls.
    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() || x < -1.0 {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }

        let roll = self.unmodified();
        let natural_ones = roll.cdf(1.0);
        let crit_fail_all = Self::any_critical_failure(natural_ones, self.rerolls);

        // A modifier of 2 or more lifts every non-critical roll to a success.
        if x < 0.0 || (x < 1.0 && self.modifier >= 2) {
            return clamp_probability(crit_fail_all);
        }

        let tier = x.floor();
        let roll_limit =
            f64::from(RAISE_STEP) * tier - f64::from(self.modifier) + f64::from(TARGET_NUMBER - 1);
        if roll_limit < 2.0 {
            tracing::trace!(x, roll_limit, "tier threshold below every non-critical roll");
            return clamp_probability(crit_fail_all);
        }

        let below_tier = roll.cdf(roll_limit) - natural_ones;
        let above_tier = 1.0 - below_tier - natural_ones;

        let mut probability = 1.0;
        for attempt in 0..=self.rerolls {
            let crit_fail_so_far = 1.0 - (1.0 - natural_ones).powf(f64::from(attempt));
            probability =
                natural_ones + below_tier * probability + above_tier * crit_fail_so_far;
        }
        clamp_probability(probability)
    }

    fn minimum(&self) -> f64 {
        -1.0
    }
}
