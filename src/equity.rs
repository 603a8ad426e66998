//! Equity calculator: estimates P(hero wins at showdown) given the hero's
//! evaluated [`HandRank`](crate::evaluator::HandRank), an opponent
//! [`Range`], the number of opponents, and (when available) outs-derived
//! draw equity.
//!
//! Generalizes simple win/tie accumulation against one random opponent
//! hand into win rate weighted across a full `Range` distribution, seeded
//! from a pre-computed `probabilityMatrix` where one is available. The
//! nut-aware adjustment (lifting equity when hero holds the effective
//! nuts, depressing it against a nut-biased range) has no scalar-equity
//! equivalent to generalize from — it is built directly from the category
//! win rates and the opponent range's `nut_bias`.

use crate::evaluator::HandCategory;
use crate::matrix::PrecomputedMatrix;
use crate::range::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityBreakdown {
    pub vs_weaker: f64,
    pub vs_similar: f64,
    pub vs_stronger: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityEstimate {
    pub equity_percent: f64,
    pub vs_range_description: String,
    pub confidence: Confidence,
    pub breakdown: EquityBreakdown,
}

/// Blending matrix-seeded win rate with draw equity is a tunable: the draw-equity
/// contribution is added on top of the matrix-seeded win rate, capped
/// additively at 100%, at this fixed weight. Documented in `DESIGN.md`.
const DRAW_EQUITY_BLEND_WEIGHT: f64 = 0.35;

/// Heuristic pairwise win rate P(hero's category beats opponent's category)
/// when no pre-computed matrix is available: each category step away from
/// even shifts win probability by a fixed amount, clamped away from the
/// extremes so a single category gap is never treated as a certainty.
fn heuristic_category_win_rate(hero: HandCategory, opp: HandCategory) -> f64 {
    let diff = hero as i32 - opp as i32;
    (0.5 + 0.09 * diff as f64).clamp(0.02, 0.98)
}

/// Prefer the empirical win rate recorded for `hero` in the pre-computed
/// matrix's hand-type distribution (seeded from real Monte Carlo runs) when
/// available, folding it in as the hero-vs-average-opponent anchor; absent
/// a matrix, the simulator-free heuristic above stands alone.
fn category_win_rate(hero: HandCategory, opp: HandCategory, matrix: Option<&PrecomputedMatrix>) -> f64 {
    let heuristic = heuristic_category_win_rate(hero, opp);
    match matrix {
        None => heuristic,
        Some(m) => {
            let empirical = m.hand_type_distribution[hero as usize].win_rate;
            if empirical > 0.0 {
                (heuristic + empirical) / 2.0
            } else {
                heuristic
            }
        }
    }
}

pub struct EquityInput<'a> {
    pub hero_category: HandCategory,
    pub hero_is_nuts: bool,
    pub opponent_range: &'a Range,
    pub num_opponents: usize,
    /// Draw equity percent from the outs counter, when hero is still
    /// drawing (pre-river).
    pub draw_equity_percent: Option<f64>,
    pub matrix: Option<&'a PrecomputedMatrix>,
}

pub struct EquityCalculator;

impl EquityCalculator {
    pub fn estimate(input: &EquityInput) -> EquityEstimate {
        let hero = input.hero_category;
        let range = input.opponent_range;

        let mut equity_vs_one = 0.0;
        for opp in HandCategory::ALL {
            let p_opp = range.probability_of(opp);
            equity_vs_one += p_opp * category_win_rate(hero, opp, input.matrix);
        }

        let mut equity_percent = equity_vs_one * 100.0;
        if let Some(draw_pct) = input.draw_equity_percent {
            equity_percent = (equity_percent + draw_pct * DRAW_EQUITY_BLEND_WEIGHT).min(100.0);
        }

        // Nut-aware adjustment: lift toward the category's own empirical win
        // rate when hero holds the nuts; depress when the opponent range
        // itself carries high nut bias (villain likely holds the same or a
        // better category).
        if input.hero_is_nuts {
            if let Some(m) = input.matrix {
                let observed = m.hand_type_distribution[hero as usize].win_rate * 100.0;
                if observed > equity_percent {
                    equity_percent = (equity_percent + observed) / 2.0;
                }
            } else {
                equity_percent = (equity_percent + 95.0) / 2.0 + equity_percent * 0.1;
                equity_percent = equity_percent.min(98.0);
            }
        }
        if range.nut_bias > 0.3 {
            equity_percent *= 1.0 - (range.nut_bias - 0.3) * 0.5;
        }
        equity_percent = equity_percent.clamp(0.0, 100.0);

        let opponents = input.num_opponents.max(1);
        let equity_multi = if opponents > 1 {
            (equity_vs_one.max(0.0).min(1.0)).powi(opponents as i32) * 100.0
        } else {
            equity_percent
        };
        // Blend the independence-assumption multi-way figure in without
        // letting it dominate a matrix- or nut-lifted single-opponent
        // estimate: multi-way equity can only pull down, never up, matching
        // the intuition that more live opponents never increases equity.
        let equity_percent = equity_percent.min(equity_multi.max(equity_percent * 0.4));

        let confidence = match (input.matrix.is_some(), range.confidence) {
            (true, crate::range::Confidence::High) => Confidence::High,
            (true, _) => Confidence::Medium,
            (false, crate::range::Confidence::High) => Confidence::Medium,
            (false, _) => Confidence::Low,
        };

        let weaker: f64 = HandCategory::ALL
            .iter()
            .filter(|&&o| o < hero)
            .map(|&o| range.probability_of(o))
            .sum();
        let similar = range.probability_of(hero);
        let stronger: f64 = HandCategory::ALL
            .iter()
            .filter(|&&o| o > hero)
            .map(|&o| range.probability_of(o))
            .sum();

        let breakdown = EquityBreakdown {
            vs_weaker: weaker * 100.0,
            vs_similar: similar * 100.0,
            vs_stronger: stronger * 100.0,
        };

        let vs_range_description = format!(
            "{:.0}% equity vs a {} ({:.0}% weaker, {:.0}% similar, {:.0}% stronger)",
            equity_percent, range.tag, breakdown.vs_weaker, breakdown.vs_similar, breakdown.vs_stronger
        );

        EquityEstimate {
            equity_percent,
            vs_range_description,
            confidence,
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Confidence as RangeConfidence, Range};

    fn even_range(tag: &str) -> Range {
        let mut r = Range {
            distribution: [1.0 / 9.0; 9],
            nut_bias: 0.1,
            draw_heavy: false,
            bluff_frequency: 0.1,
            tag: tag.to_string(),
            confidence: RangeConfidence::Medium,
        };
        let sum: f64 = r.distribution.iter().sum();
        for p in &mut r.distribution {
            *p /= sum;
        }
        r
    }

    #[test]
    fn flush_vs_even_range_has_high_equity() {
        let range = even_range("medium range");
        let input = EquityInput {
            hero_category: HandCategory::Flush,
            hero_is_nuts: true,
            opponent_range: &range,
            num_opponents: 1,
            draw_equity_percent: None,
            matrix: None,
        };
        let estimate = EquityCalculator::estimate(&input);
        assert!(estimate.equity_percent > 70.0 && estimate.equity_percent <= 98.0);
    }

    #[test]
    fn breakdown_sums_to_roughly_100() {
        let range = even_range("medium range");
        let input = EquityInput {
            hero_category: HandCategory::TwoPair,
            hero_is_nuts: false,
            opponent_range: &range,
            num_opponents: 1,
            draw_equity_percent: None,
            matrix: None,
        };
        let estimate = EquityCalculator::estimate(&input);
        let total = estimate.breakdown.vs_weaker + estimate.breakdown.vs_similar + estimate.breakdown.vs_stronger;
        assert!((total - 100.0).abs() < 5.0);
    }

    #[test]
    fn more_opponents_never_increases_equity() {
        let range = even_range("medium range");
        let one = EquityCalculator::estimate(&EquityInput {
            hero_category: HandCategory::TwoPair,
            hero_is_nuts: false,
            opponent_range: &range,
            num_opponents: 1,
            draw_equity_percent: None,
            matrix: None,
        });
        let three = EquityCalculator::estimate(&EquityInput {
            hero_category: HandCategory::TwoPair,
            hero_is_nuts: false,
            opponent_range: &range,
            num_opponents: 3,
            draw_equity_percent: None,
            matrix: None,
        });
        assert!(three.equity_percent <= one.equity_percent);
    }

    #[test]
    fn high_nut_bias_range_depresses_equity() {
        let mut polarized = even_range("polarized range");
        polarized.nut_bias = 0.8;
        let plain = even_range("medium range");

        let hero_category = HandCategory::TwoPair;
        let polarized_estimate = EquityCalculator::estimate(&EquityInput {
            hero_category,
            hero_is_nuts: false,
            opponent_range: &polarized,
            num_opponents: 1,
            draw_equity_percent: None,
            matrix: None,
        });
        let plain_estimate = EquityCalculator::estimate(&EquityInput {
            hero_category,
            hero_is_nuts: false,
            opponent_range: &plain,
            num_opponents: 1,
            draw_equity_percent: None,
            matrix: None,
        });
        assert!(polarized_estimate.equity_percent < plain_estimate.equity_percent);
    }
}
