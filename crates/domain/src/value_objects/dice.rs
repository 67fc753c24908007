//! Die sizes and trait roll formulas
//!
//! Supports formulas like "d8", "d8+2", "d10/d8-1", "d12+1 r2".
//! The part after `/` is the wild die (d6 when omitted), the trailing
//! `rN` is the number of rerolls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::game_systems::SwTraitRoll;

/// Error when parsing a dice formula or validating a die size
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected dX, dX/dY, dX+Z, dX rN
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// Number of faces of a single die.
///
/// Always at least 2: a one-sided die would ace forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DieSides(u32);

impl DieSides {
    pub const D4: Self = Self(4);
    pub const D6: Self = Self(6);
    pub const D8: Self = Self(8);
    pub const D10: Self = Self(10);
    pub const D12: Self = Self(12);

    /// Validate a die size
    pub fn new(sides: u32) -> Result<Self, DiceParseError> {
        if sides < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self(sides))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// The wild die is a d6 unless stated otherwise.
impl Default for DieSides {
    fn default() -> Self {
        Self::D6
    }
}

impl TryFrom<u32> for DieSides {
    type Error = DiceParseError;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        Self::new(sides)
    }
}

impl From<DieSides> for u32 {
    fn from(sides: DieSides) -> Self {
        sides.0
    }
}

impl fmt::Display for DieSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// A parsed trait roll formula like "d8/d6+2 r1"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRollFormula {
    /// The trait die (d4 to d12 in play, any size >= 2 accepted)
    pub trait_die: DieSides,
    /// The wild die, rolled alongside the trait die
    #[serde(default)]
    pub wild_die: DieSides,
    /// Flat modifier added to the better of the two dice
    #[serde(default)]
    pub modifier: i32,
    /// Number of rerolls available (bennies)
    #[serde(default)]
    pub rerolls: u32,
}

impl TraitRollFormula {
    /// Create a formula with a d6 wild die, no modifier and no rerolls
    pub fn new(trait_die: DieSides) -> Self {
        Self {
            trait_die,
            wild_die: DieSides::D6,
            modifier: 0,
            rerolls: 0,
        }
    }

    /// Parse a formula string like "d8", "d8+2", "d10/d8-1", "d12+1 r2"
    ///
    /// Supported formats:
    /// - "dX" - trait die X, d6 wild die
    /// - "dX/dY" - trait die X, wild die Y
    /// - "dX+Z" / "dX-Z" - add or subtract Z from the result
    /// - "dX rN" - N rerolls (whitespace before `r` is optional)
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        // Split off the reroll suffix
        let (dice_part, rerolls) = match input.find('r') {
            Some(r_pos) => {
                let rerolls_str = &input[r_pos + 1..];
                let rerolls: u32 = unsigned(rerolls_str).ok_or_else(|| {
                    DiceParseError::InvalidFormat(format!("Invalid reroll count: '{}'", rerolls_str))
                })?;
                (&input[..r_pos], rerolls)
            }
            None => (input.as_str(), 0),
        };

        // Find modifier separator (+ or -)
        let (dice_str, modifier) = if let Some(plus_pos) = dice_part.find('+') {
            let mod_str = &dice_part[plus_pos + 1..];
            let modifier: i32 = unsigned(mod_str).ok_or_else(|| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '+{}'", mod_str))
            })?;
            (&dice_part[..plus_pos], modifier)
        } else if let Some(minus_pos) = dice_part.rfind('-') {
            if minus_pos == 0 {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Missing trait die in '{}'",
                    dice_part
                )));
            }
            let mod_str = &dice_part[minus_pos + 1..];
            let modifier: i32 = unsigned(mod_str).ok_or_else(|| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '-{}'", mod_str))
            })?;
            (&dice_part[..minus_pos], -modifier)
        } else {
            (dice_part, 0)
        };

        let (trait_str, wild_str) = match dice_str.split_once('/') {
            Some((trait_str, wild_str)) => (trait_str, Some(wild_str)),
            None => (dice_str, None),
        };

        let trait_die = parse_die(trait_str)?;
        let wild_die = match wild_str {
            Some(wild_str) => parse_die(wild_str)?,
            None => DieSides::D6,
        };

        Ok(Self {
            trait_die,
            wild_die,
            modifier,
            rerolls,
        })
    }

    /// Build the trait roll this formula describes
    pub fn build(&self) -> SwTraitRoll {
        SwTraitRoll::from(*self)
    }

    /// Format as a display string (e.g., "d8/d10+1 r2")
    pub fn display(&self) -> String {
        let mut out = self.trait_die.to_string();
        if self.wild_die != DieSides::D6 {
            out.push('/');
            out.push_str(&self.wild_die.to_string());
        }
        if self.modifier > 0 {
            out.push_str(&format!("+{}", self.modifier));
        } else if self.modifier < 0 {
            out.push_str(&self.modifier.to_string());
        }
        if self.rerolls > 0 {
            out.push_str(&format!(" r{}", self.rerolls));
        }
        out
    }
}

fn parse_die(input: &str) -> Result<DieSides, DiceParseError> {
    let sides_str = input.strip_prefix('d').ok_or_else(|| {
        DiceParseError::InvalidFormat(format!("Missing 'd' prefix in '{}'", input))
    })?;
    let sides: u32 = unsigned(sides_str).ok_or_else(|| {
        DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", sides_str))
    })?;
    DieSides::new(sides)
}

/// Plain decimal digits, no sign.
fn unsigned<T: FromStr>(input: &str) -> Option<T> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

impl FromStr for TraitRollFormula {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TraitRollFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
