//! Outcome charts
//!
//! Turns a tier distribution into one bar per outcome: critical failure,
//! failure, success, each raise up to a limit, and an open-ended bar for
//! everything above the limit. Bar `k` is `cdf(k) - cdf(k - 1)`, the last
//! bar is `1 - cdf(max_tier)`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::game_systems::TraitOutcome;
use crate::stochastic::{clamp_probability, StochasticObject};

/// One bar of an outcome chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeBar {
    pub outcome: TraitOutcome,
    /// True for the tail bar (this outcome or better)
    pub open_ended: bool,
    pub probability: f64,
}

impl OutcomeBar {
    pub fn label(&self) -> String {
        match (self.outcome, self.open_ended) {
            (TraitOutcome::Raises(n), true) => format!("S+>={} Raise", n),
            (outcome, true) => format!("{} or better", outcome.label()),
            (outcome, false) => outcome.label(),
        }
    }

    pub fn percent(&self) -> f64 {
        100.0 * self.probability
    }
}

/// Probability of each outcome tier of a roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeChart {
    max_tier: u32,
    bars: Vec<OutcomeBar>,
}

impl OutcomeChart {
    /// Critical failure, failure, success and up to three raises.
    pub const DEFAULT_MAX_TIER: u32 = 4;

    /// Highest `max_tier` accepted
    pub const MAX_TIER_LIMIT: u32 = 1000;

    /// Sample `object` at every tier from critical failure up to `max_tier`.
    pub fn from_stochastic(
        object: &dyn StochasticObject,
        max_tier: u32,
    ) -> Result<Self, DomainError> {
        if max_tier < 1 {
            return Err(DomainError::validation(
                "Outcome chart needs at least the success tier",
            ));
        }
        if max_tier > Self::MAX_TIER_LIMIT {
            return Err(DomainError::validation(format!(
                "Outcome chart supports at most {} tiers, got {}",
                Self::MAX_TIER_LIMIT,
                max_tier
            )));
        }
        let last_tier = i64::from(max_tier);
        let first_tier = TraitOutcome::CriticalFailure.tier();

        let mut bars = Vec::with_capacity(max_tier as usize + 3);
        let mut previous = object.cdf((first_tier - 1) as f64);
        for tier in first_tier..=last_tier {
            let outcome = TraitOutcome::from_tier(tier).ok_or_else(|| {
                DomainError::validation(format!("Tier {} is out of range", tier))
            })?;
            let current = object.cdf(tier as f64);
            bars.push(OutcomeBar {
                outcome,
                open_ended: false,
                probability: (current - previous).max(0.0),
            });
            previous = current;
        }

        let tail = TraitOutcome::from_tier(last_tier + 1).ok_or_else(|| {
            DomainError::validation(format!("Tier {} is out of range", last_tier + 1))
        })?;
        bars.push(OutcomeBar {
            outcome: tail,
            open_ended: true,
            probability: clamp_probability(1.0 - previous),
        });

        tracing::trace!(max_tier, bars = bars.len(), "outcome chart built");
        Ok(Self { max_tier, bars })
    }

    pub fn max_tier(&self) -> u32 {
        self.max_tier
    }

    pub fn bars(&self) -> &[OutcomeBar] {
        &self.bars
    }

    /// Probability of a success, with or without raises
    pub fn success_probability(&self) -> f64 {
        self.bars
            .iter()
            .filter(|bar| bar.outcome.is_success())
            .map(|bar| bar.probability)
            .sum()
    }

    /// Sum of all bars. 1 up to rounding.
    pub fn total(&self) -> f64 {
        self.bars.iter().map(|bar| bar.probability).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_systems::SwTraitRoll;
    use crate::stochastic::MockStochasticObject;

    const EPS: f64 = 1e-12;

    fn probability_of(chart: &OutcomeChart, outcome: TraitOutcome) -> Option<f64> {
        chart
            .bars()
            .iter()
            .find(|bar| bar.outcome == outcome && !bar.open_ended)
            .map(|bar| bar.probability)
    }

    fn d8_chart(modifier: i32, rerolls: u32) -> (SwTraitRoll, OutcomeChart) {
        let roll = SwTraitRoll::new(8, 6, modifier, rerolls).expect("valid dice");
        let chart = OutcomeChart::from_stochastic(&roll, OutcomeChart::DEFAULT_MAX_TIER)
            .expect("chart should build");
        (roll, chart)
    }

    #[test]
    fn default_chart_layout() {
        let (_, chart) = d8_chart(0, 0);
        let labels: Vec<String> = chart.bars().iter().map(OutcomeBar::label).collect();
        assert_eq!(
            labels,
            vec![
                "Crit. Fail",
                "Fail",
                "Success",
                "S+1 Raise",
                "S+2 Raise",
                "S+3 Raise",
                "S+>=4 Raise",
            ]
        );
        assert_eq!(chart.max_tier(), 4);
    }

    #[test]
    fn bars_are_cdf_differences() {
        let (roll, chart) = d8_chart(1, 1);
        let bars = chart.bars();
        for (index, bar) in bars.iter().take(bars.len() - 1).enumerate() {
            let tier = index as f64 - 1.0;
            let expected = roll.cdf(tier) - roll.cdf(tier - 1.0);
            assert!((bar.probability - expected).abs() < EPS);
        }
        let tail = bars.last().expect("tail bar");
        assert!(tail.open_ended);
        assert!((tail.probability - (1.0 - roll.cdf(4.0))).abs() < EPS);
    }

    #[test]
    fn bars_sum_to_one() {
        for (modifier, rerolls) in [(0, 0), (2, 0), (-3, 1), (1, 3)] {
            let (_, chart) = d8_chart(modifier, rerolls);
            assert!((chart.total() - 1.0).abs() < 1e-9);
            assert!(chart.bars().iter().all(|bar| bar.probability >= 0.0));
        }
    }

    #[test]
    fn critical_failure_bar() {
        let (roll, chart) = d8_chart(0, 0);
        let crit = probability_of(&chart, TraitOutcome::CriticalFailure).expect("crit bar");
        assert!((crit - roll.critical_failure_probability()).abs() < EPS);
    }

    #[test]
    fn large_modifier_leaves_failure_empty() {
        let (_, chart) = d8_chart(2, 0);
        assert_eq!(probability_of(&chart, TraitOutcome::Failure), Some(0.0));
    }

    #[test]
    fn success_probability_and_percent() {
        let (roll, chart) = d8_chart(1, 1);
        let expected = 1.0 - roll.cdf(0.0);
        assert!((chart.success_probability() - expected).abs() < 1e-9);
        let success = chart.bars()[2];
        assert!((success.percent() - 100.0 * success.probability).abs() < EPS);
    }

    #[test]
    fn decreasing_input_is_clamped() {
        let mut broken = MockStochasticObject::new();
        broken
            .expect_cdf()
            .returning(|x| if x >= 0.0 { 0.2 } else { 0.3 });
        let chart = OutcomeChart::from_stochastic(&broken, 2).expect("chart should build");
        assert!(chart.bars().iter().all(|bar| bar.probability >= 0.0));
        assert_eq!(probability_of(&chart, TraitOutcome::Failure), Some(0.0));
    }

    #[test]
    fn rejects_zero_tiers() {
        let roll = SwTraitRoll::with_trait_die(6).expect("valid dice");
        let err = OutcomeChart::from_stochastic(&roll, 0).expect_err("zero tiers");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_excessive_tiers() {
        let roll = SwTraitRoll::with_trait_die(6).expect("valid dice");
        for max_tier in [OutcomeChart::MAX_TIER_LIMIT + 1, u32::MAX] {
            let err = OutcomeChart::from_stochastic(&roll, max_tier).expect_err("too many tiers");
            assert!(matches!(err, DomainError::Validation(_)));
        }
        let chart = OutcomeChart::from_stochastic(&roll, OutcomeChart::MAX_TIER_LIMIT)
            .expect("limit is inclusive");
        assert_eq!(chart.bars().len(), OutcomeChart::MAX_TIER_LIMIT as usize + 3);
    }

    #[test]
    fn smallest_chart_ends_with_success_or_better() {
        let roll = SwTraitRoll::with_trait_die(6).expect("valid dice");
        let chart = OutcomeChart::from_stochastic(&roll, 1).expect("chart should build");
        let labels: Vec<String> = chart.bars().iter().map(OutcomeBar::label).collect();
        assert_eq!(labels, vec!["Crit. Fail", "Fail", "Success", "S+>=1 Raise"]);
    }

    #[test]
    fn serializes_to_camel_case() {
        let (_, chart) = d8_chart(0, 0);
        let json = serde_json::to_value(&chart).expect("serialize");
        assert_eq!(json["maxTier"], 4);
        assert_eq!(json["bars"][0]["outcome"]["tier"], "criticalFailure");
        assert_eq!(json["bars"][6]["openEnded"], true);
        assert_eq!(json["bars"][3]["outcome"]["raises"], 1);
    }
}
