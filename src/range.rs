//! Opponent range estimation: a probability distribution over hand
//! categories plus descriptive metadata, built up in rule-based stages.
//!
//! Threads "position category + street + texture" into a frequency vector
//! the way a rule-based strategy table would, but produces a `Range`
//! instead of an action directly — position, preflop aggression, board
//! texture, and villain street actions each apply as a successive
//! adjustment stage over the base distribution.

use crate::evaluator::HandCategory;
use crate::error::{EngineError, Result};
use crate::texture::FlopTexture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A probability distribution over the 9 hand categories, always
/// normalized to sum to 1, plus descriptive metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub distribution: [f64; 9],
    pub nut_bias: f64,
    pub draw_heavy: bool,
    pub bluff_frequency: f64,
    pub tag: String,
    pub confidence: Confidence,
}

impl Range {
    pub fn probability_of(&self, category: HandCategory) -> f64 {
        self.distribution[category as usize]
    }

    fn normalize(&mut self) {
        let sum: f64 = self.distribution.iter().sum();
        if sum > 0.0 {
            for p in &mut self.distribution {
                *p /= sum;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionCategory {
    EarlyOrMiddle,
    CutoffOrButton,
    BlindDefense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreflopAction {
    Open,
    ThreeBet,
    BlindDefend,
    PostflopBigBet,
    CheckRaise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionSize {
    Small,
    Medium,
    Large,
}

impl ActionSize {
    pub fn from_pot_fraction(fraction: f64) -> ActionSize {
        if fraction < 0.4 {
            ActionSize::Small
        } else if fraction <= 0.75 {
            ActionSize::Medium
        } else {
            ActionSize::Large
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VillainActionType {
    Check,
    Call,
    Bet,
    Raise,
    CheckRaise,
}

#[derive(Debug, Clone, Copy)]
pub struct StreetAction {
    pub action_type: VillainActionType,
    pub size: ActionSize,
}

/// A single adjustment a street action applies to the running distribution.
struct Adjustment {
    strength_shift: f64,
    narrowing: f64,
    polarize: bool,
    capped: bool,
}

fn adjustment_for(action: StreetAction) -> Adjustment {
    match (action.action_type, action.size) {
        (VillainActionType::Check, _) => Adjustment {
            strength_shift: -0.05,
            narrowing: 0.0,
            polarize: false,
            capped: true,
        },
        (VillainActionType::Call, _) => Adjustment {
            strength_shift: 0.0,
            narrowing: 0.05,
            polarize: false,
            capped: false,
        },
        (VillainActionType::Bet, ActionSize::Small) => Adjustment {
            strength_shift: 0.05,
            narrowing: 0.10,
            polarize: false,
            capped: false,
        },
        (VillainActionType::Bet, ActionSize::Medium) => Adjustment {
            strength_shift: 0.10,
            narrowing: 0.15,
            polarize: false,
            capped: false,
        },
        (VillainActionType::Bet, ActionSize::Large) => Adjustment {
            strength_shift: 0.20,
            narrowing: 0.25,
            polarize: true,
            capped: false,
        },
        (VillainActionType::Raise, _) => Adjustment {
            strength_shift: 0.25,
            narrowing: 0.30,
            polarize: true,
            capped: false,
        },
        (VillainActionType::CheckRaise, _) => Adjustment {
            strength_shift: 0.30,
            narrowing: 0.35,
            polarize: true,
            capped: false,
        },
    }
}

/// Base distribution templates, keyed by position category and preflop
/// action. Weighted toward weak categories for loose/wide templates, toward
/// strong categories for tight/polarized ones. Expressed as unnormalized
/// weights; `Range::normalize` scales them to sum to 1.
fn base_template(position: PositionCategory, action: PreflopAction) -> [f64; 9] {
    match (position, action) {
        (PositionCategory::EarlyOrMiddle, PreflopAction::Open)
        | (_, PreflopAction::ThreeBet) => {
            // Tight: premium-weighted.
            [0.10, 0.20, 0.20, 0.18, 0.12, 0.08, 0.07, 0.03, 0.02]
        }
        (PositionCategory::CutoffOrButton, PreflopAction::Open) => {
            // Medium: fairly even, slight lean toward made-hand categories.
            [0.18, 0.22, 0.18, 0.14, 0.10, 0.08, 0.06, 0.03, 0.01]
        }
        (PositionCategory::BlindDefense, PreflopAction::BlindDefend) => {
            // Wide: heavy on weak categories.
            [0.30, 0.24, 0.16, 0.11, 0.08, 0.06, 0.04, 0.01, 0.00]
        }
        (_, PreflopAction::PostflopBigBet) | (_, PreflopAction::CheckRaise) => {
            // Polarized: bimodal, mass on both extremes.
            [0.22, 0.10, 0.08, 0.08, 0.10, 0.12, 0.14, 0.09, 0.07]
        }
    }
}

fn apply_street_action(dist: &mut [f64; 9], action: StreetAction) {
    let adj = adjustment_for(action);

    for (i, p) in dist.iter_mut().enumerate() {
        let weight = i as f64 / 8.0; // 0 (HighCard) .. 1 (StraightFlush)
        *p *= 1.0 + adj.strength_shift * weight - adj.strength_shift * (1.0 - weight) * 0.5;
    }

    if adj.narrowing > 0.0 {
        for (i, p) in dist.iter_mut().enumerate() {
            let weight = i as f64 / 8.0;
            *p *= 1.0 - adj.narrowing * (1.0 - weight);
        }
    }

    if adj.polarize {
        dist[0] *= 1.2;
        dist[8] *= 1.3;
        dist[7] *= 1.2;
        for p in dist.iter_mut().take(6).skip(1) {
            *p *= 0.85;
        }
    }

    if adj.capped {
        dist[8] *= 0.5;
        dist[7] *= 0.6;
        dist[6] *= 0.7;
    }

    for p in dist.iter_mut() {
        if *p < 0.0 {
            *p = 0.0;
        }
    }
}

fn apply_texture_adjustment(dist: &mut [f64; 9], texture: &FlopTexture) {
    use crate::texture::Suitedness;

    if texture.suitedness == Suitedness::Monotone {
        dist[HandCategory::Flush as usize] *= 1.6;
        dist[HandCategory::StraightFlush as usize] *= 1.8;
        dist[HandCategory::HighCard as usize] *= 0.7;
        dist[HandCategory::Pair as usize] *= 0.8;
    }
    if texture.straight_draw_possible() {
        dist[HandCategory::Straight as usize] *= 1.3;
    }
    if texture.is_paired || texture.is_triplet {
        dist[HandCategory::FullHouse as usize] *= 1.5;
        dist[HandCategory::Quads as usize] *= 1.8;
        dist[HandCategory::Trips as usize] *= 1.3;
    }
}

fn apply_multiway_adjustment(dist: &mut [f64; 9], players_in_hand: usize) {
    if players_in_hand < 3 {
        return;
    }
    let factor = 1.0 + 0.15 * (players_in_hand as f64 - 2.0);
    for (i, p) in dist.iter_mut().enumerate() {
        if i <= 2 {
            *p /= factor;
        } else {
            *p *= factor;
        }
    }
}

pub struct RangeEstimateInput<'a> {
    pub position: PositionCategory,
    pub preflop_action: PreflopAction,
    pub street_actions: &'a [StreetAction],
    pub texture: Option<&'a FlopTexture>,
    pub players_in_hand: usize,
}

pub struct RangeEstimator;

impl RangeEstimator {
    pub fn estimate(input: &RangeEstimateInput) -> Result<Range> {
        if input.players_in_hand < 2 {
            return Err(EngineError::InvalidInput(
                "playersInHand must be at least 2".to_string(),
            ));
        }

        let mut dist = base_template(input.position, input.preflop_action);

        for &action in input.street_actions {
            apply_street_action(&mut dist, action);
        }

        if let Some(texture) = input.texture {
            apply_texture_adjustment(&mut dist, texture);
        }

        apply_multiway_adjustment(&mut dist, input.players_in_hand);

        let confidence = match input.street_actions.len() {
            0 => Confidence::Low,
            1 | 2 => Confidence::Medium,
            _ => Confidence::High,
        };

        let nut_bias = dist[HandCategory::Quads as usize]
            + dist[HandCategory::StraightFlush as usize]
            + dist[HandCategory::FullHouse as usize];
        let draw_heavy = input
            .texture
            .map(|t| t.flush_draw_possible() || t.straight_draw_possible())
            .unwrap_or(false);
        let bluff_frequency = input
            .street_actions
            .iter()
            .filter(|a| {
                matches!(
                    a.action_type,
                    VillainActionType::Bet | VillainActionType::Raise
                ) && a.size == ActionSize::Large
            })
            .count() as f64
            * 0.05;

        let tag = describe_tag(input.position, input.preflop_action);

        let mut range = Range {
            distribution: dist,
            nut_bias: nut_bias.min(1.0),
            draw_heavy,
            bluff_frequency: bluff_frequency.min(1.0),
            tag,
            confidence,
        };
        range.normalize();
        Ok(range)
    }
}

fn describe_tag(position: PositionCategory, action: PreflopAction) -> String {
    let pos = match position {
        PositionCategory::EarlyOrMiddle => "EP/MP",
        PositionCategory::CutoffOrButton => "CO/BTN",
        PositionCategory::BlindDefense => "blind defense",
    };
    let act = match action {
        PreflopAction::Open => "open",
        PreflopAction::ThreeBet => "3-bet",
        PreflopAction::BlindDefend => "defend",
        PreflopAction::PostflopBigBet => "big bet",
        PreflopAction::CheckRaise => "check-raise",
    };
    format!("{pos} {act} range")
}
