//! Action recommender: the decision tree that turns equity, pot odds,
//! outs, SPR, board texture, and a [`StyleProfile`](crate::style::StyleProfile)
//! into a fold/check/call/bet/raise recommendation with structured
//! reasoning.
//!
//! The decision-region *shape* — equity bucketed into a ladder of
//! frequency/action zones, with an SPR-commitment override below a
//! threshold — drives the buckets by `equityGap` (equity vs. pot odds,
//! not equity alone) keyed per-`StyleProfile` margins, rather than fixed
//! equity thresholds and stringly-typed style switches.

use crate::outs::OutsResult;
use crate::potodds::{ImpliedOdds, SprZone};
use crate::style::StyleProfile;
use crate::texture::{FlopTexture, NutDanger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet => "bet",
            Action::Raise => "raise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionReason {
    ClearFold,
    MarginalCall,
    DrawCall,
    ValueRaise,
    StrongValue,
    SemiBluff,
    ValueBet,
    CheckBack,
    Committed,
}

impl DecisionReason {
    pub fn tag(self) -> &'static str {
        match self {
            DecisionReason::ClearFold => "clear_fold",
            DecisionReason::MarginalCall => "marginal_call",
            DecisionReason::DrawCall => "draw_call",
            DecisionReason::ValueRaise => "value_raise",
            DecisionReason::StrongValue => "strong_value",
            DecisionReason::SemiBluff => "semi_bluff",
            DecisionReason::ValueBet => "value_bet",
            DecisionReason::CheckBack => "check_back",
            DecisionReason::Committed => "committed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reasoning {
    pub primary: String,
    pub math: String,
    pub strategic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub action: Action,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub action: Action,
    pub confidence: f64,
    pub reasoning: Reasoning,
    pub alternatives: Vec<Alternative>,
    pub warnings: Vec<String>,
    pub decision_reason: DecisionReason,
}

pub struct RecommenderInput<'a> {
    pub equity_percent: f64,
    pub pot_odds_percent: f64,
    pub implied_odds: ImpliedOdds,
    pub hero_hand_label: String,
    pub hero_is_nuts: bool,
    pub outs: &'a OutsResult,
    pub spr_zone: SprZone,
    pub in_position: bool,
    pub board_texture: Option<&'a FlopTexture>,
    pub facing_bet: bool,
    pub to_call: f64,
    pub pot_size: f64,
    pub effective_stack: f64,
    pub style: StyleProfile,
}

const SEMI_BLUFF_MIN_OUTS: usize = 8;

/// How many equity-gap points of semi-bluff eligibility one point of
/// `bluff_freq` buys, when carving the semi-bluff window out of the gap
/// below a style's `raise_margin` (see `facing_bet_decision`). `bluff_freq`
/// runs 0.02 (nit) to 0.22 (lag), so this scales it back to the same
/// percentage-point units as `equity_gap`.
const SEMI_BLUFF_GAP_SCALE: f64 = 100.0;

const CONFIDENCE_SCALE_POINTS: f64 = 30.0;

fn confidence_bounds(style: &StyleProfile) -> (f64, f64) {
    use crate::style::Style::*;
    match style.style {
        Nit | Rock => (0.35, 0.95),
        Reg | Tag | Lag => (0.30, 0.95),
        Fish => (0.20, 0.75),
    }
}

fn confidence_for(equity_gap: f64, threshold: f64, style: &StyleProfile) -> f64 {
    let (floor, ceiling) = confidence_bounds(style);
    let distance = (equity_gap - threshold).abs();
    let raw = (distance / CONFIDENCE_SCALE_POINTS).clamp(0.0, 1.0);
    (raw * (ceiling - floor) + floor).clamp(0.0, 1.0)
}

fn board_warnings(texture: Option<&FlopTexture>, hero_category_is_boat_plus: bool) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(t) = texture else {
        return warnings;
    };
    if (t.is_paired || t.is_triplet) && !hero_category_is_boat_plus {
        warnings.push("board may pair further — boats beat flushes and sets".to_string());
    }
    if t.flush_draw_possible() && !hero_category_is_boat_plus {
        warnings.push("flush draw is live on this board".to_string());
    }
    if matches!(t.nut_danger, NutDanger::High | NutDanger::VeryHigh | NutDanger::Extreme) {
        warnings.push("dangerous, draw-heavy texture — hero's hand may not hold up".to_string());
    }
    warnings
}

pub struct ActionRecommender;

impl ActionRecommender {
    pub fn recommend(input: &RecommenderInput) -> Recommendation {
        let style = &input.style;
        let position_adjustment = if input.in_position { 5.0 } else { -5.0 };
        let adjusted_equity = (input.equity_percent + position_adjustment).clamp(0.0, 100.0);
        let equity_gap = adjusted_equity - input.pot_odds_percent;

        let hero_category_is_boat_plus = input.hero_hand_label == "Full House"
            || input.hero_hand_label == "Four of a Kind"
            || input.hero_hand_label == "Straight Flush"
            || input.hero_hand_label == "Royal Flush";
        let warnings = board_warnings(input.board_texture, hero_category_is_boat_plus);

        let math = format!(
            "equity {:.0}% vs. pot odds {:.0}%; gap {:+.0} pts",
            adjusted_equity, input.pot_odds_percent, equity_gap
        );

        // Commitment override: a large enough fraction of the stack is
        // already committed at a low SPR, and equity clears break-even —
        // push the chips in regardless of the marginal zone.
        let committed = input.effective_stack > 0.0
            && input.to_call / input.effective_stack > style.commit_threshold
            && matches!(input.spr_zone, SprZone::Micro | SprZone::Short)
            && adjusted_equity > input.pot_odds_percent;

        if committed {
            let action = if input.facing_bet { Action::Call } else { Action::Raise };
            return Recommendation {
                action,
                confidence: confidence_for(equity_gap, style.raise_margin, style),
                reasoning: Reasoning {
                    primary: format!(
                        "{}: stack is already committed at this SPR with a clear equity edge",
                        action.label()
                    ),
                    math,
                    strategic: format!("{}: low SPR means commit or fold, no middle ground", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Fold,
                    rationale: "fold: give up the equity edge rather than commit".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::Committed,
            };
        }

        if input.facing_bet {
            Self::facing_bet_decision(input, adjusted_equity, equity_gap, math, warnings)
        } else {
            Self::no_bet_decision(input, adjusted_equity, equity_gap, math, warnings)
        }
    }

    fn facing_bet_decision(
        input: &RecommenderInput,
        adjusted_equity: f64,
        equity_gap: f64,
        math: String,
        warnings: Vec<String>,
    ) -> Recommendation {
        let style = &input.style;

        if equity_gap < -style.fold_margin {
            return Recommendation {
                action: Action::Fold,
                confidence: confidence_for(equity_gap, -style.fold_margin, style),
                reasoning: Reasoning {
                    primary: "fold: equity falls well short of the price being offered".to_string(),
                    math,
                    strategic: format!("{}", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Call,
                    rationale: "call: only if outs or implied odds change the math".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::ClearFold,
            };
        }

        if equity_gap >= style.strong_value_margin {
            return Recommendation {
                action: Action::Raise,
                confidence: confidence_for(equity_gap, style.strong_value_margin, style),
                reasoning: Reasoning {
                    primary: "raise: hand is well ahead of the range, build the pot for value".to_string(),
                    math,
                    strategic: format!("{}: press the advantage", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Call,
                    rationale: "call: slow-play to keep weaker hands in".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::StrongValue,
            };
        }

        if equity_gap >= style.raise_margin {
            return Recommendation {
                action: Action::Raise,
                confidence: confidence_for(equity_gap, style.raise_margin, style),
                reasoning: Reasoning {
                    primary: "raise: equity edge clears the raise threshold for value".to_string(),
                    math,
                    strategic: format!("{}: apply pressure with the better range", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Call,
                    rationale: "call: keep the pot smaller and let draws catch up".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::ValueRaise,
            };
        }

        // Semi-bluff raise candidate: equity alone doesn't clear the value
        // bar, but enough outs and position make a raise profitable through
        // fold equity. The window is carved out of the gap just below this
        // style's raise margin, and its width scales directly with
        // `bluff_freq` — a nit's window is a sliver (2-ish points wide), a
        // lag's spans the whole marginal zone, so nits essentially never
        // take this branch and lags often do at the same literal equity.
        let semi_bluff_gap_floor = style.raise_margin - style.bluff_freq * SEMI_BLUFF_GAP_SCALE;
        if equity_gap >= semi_bluff_gap_floor
            && input.outs.to_improve >= SEMI_BLUFF_MIN_OUTS
            && input.in_position
        {
            return Recommendation {
                action: Action::Raise,
                confidence: confidence_for(equity_gap, style.raise_margin, style),
                reasoning: Reasoning {
                    primary: "raise: semi-bluff — not ahead yet, but outs and position carry fold equity".to_string(),
                    math,
                    strategic: format!("{}: applies pressure on wet boards from position", style.description),
                },
                alternatives: vec![
                    Alternative {
                        action: Action::Call,
                        rationale: "call: realize equity for less without raising".to_string(),
                    },
                    Alternative {
                        action: Action::Fold,
                        rationale: "fold: if villain's range looks too strong to fold out".to_string(),
                    },
                ],
                warnings,
                decision_reason: DecisionReason::SemiBluff,
            };
        }

        // Marginal zone: call, flagged as a draw-call when outs and implied
        // odds support continuing on a draw rather than on made-hand value.
        let is_draw_call = input.outs.to_improve > 0 && input.implied_odds.is_at_least_moderate();
        Recommendation {
            action: Action::Call,
            confidence: confidence_for(equity_gap, style.raise_margin, style),
            reasoning: Reasoning {
                primary: if is_draw_call {
                    "call: drawing hand with enough outs and implied odds to continue".to_string()
                } else {
                    "call: marginal equity edge, not enough to raise".to_string()
                },
                math,
                strategic: format!("{}", style.description),
            },
            alternatives: vec![Alternative {
                action: Action::Fold,
                rationale: "fold: if the price gets worse on a later street".to_string(),
            }],
            warnings,
            decision_reason: if is_draw_call { DecisionReason::DrawCall } else { DecisionReason::MarginalCall },
        }
    }

    fn no_bet_decision(
        input: &RecommenderInput,
        adjusted_equity: f64,
        equity_gap: f64,
        math: String,
        warnings: Vec<String>,
    ) -> Recommendation {
        let style = &input.style;

        if adjusted_equity >= 55.0 {
            return Recommendation {
                action: Action::Bet,
                confidence: confidence_for(equity_gap, style.raise_margin, style),
                reasoning: Reasoning {
                    primary: "bet: hand is ahead of the range, charge draws and build the pot".to_string(),
                    math,
                    strategic: format!("{}: value bet", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Check,
                    rationale: "check: induce a bluff from a weaker range instead".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::ValueBet,
            };
        }

        if adjusted_equity < 30.0
            && input.outs.to_improve >= SEMI_BLUFF_MIN_OUTS
            && input.in_position
            && style.bluff_freq >= 0.10
        {
            return Recommendation {
                action: Action::Bet,
                confidence: confidence_for(equity_gap, 0.0, style),
                reasoning: Reasoning {
                    primary: "bet: semi-bluff with outs and position to pick up fold equity".to_string(),
                    math,
                    strategic: format!("{}: applies pressure on wet boards from position", style.description),
                },
                alternatives: vec![Alternative {
                    action: Action::Check,
                    rationale: "check: take a free card if villain looks sticky".to_string(),
                }],
                warnings,
                decision_reason: DecisionReason::SemiBluff,
            };
        }

        Recommendation {
            action: Action::Check,
            confidence: confidence_for(equity_gap, 0.0, style),
            reasoning: Reasoning {
                primary: "check: not enough equity or fold equity to bet profitably".to_string(),
                math,
                strategic: format!("{}", style.description),
            },
            alternatives: vec![Alternative {
                action: Action::Bet,
                rationale: "bet: small sizing as a bluff if villain folds too often".to_string(),
            }],
            warnings,
            decision_reason: DecisionReason::CheckBack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outs::DrawKind;
    use crate::style::Style;

    fn outs(n: usize) -> OutsResult {
        OutsResult {
            improving_cards: Vec::new(),
            to_improve: n,
            has_flush_draw: n > 0,
            has_straight_draw: false,
            draw_kind: if n > 0 { DrawKind::FlushDraw } else { DrawKind::None },
            draw_equity_percent: if n > 0 { 35.0 } else { 0.0 },
        }
    }

    #[test]
    fn nut_flush_facing_small_bet_raises_or_bets_confidently() {
        let o = outs(0);
        let input = RecommenderInput {
            equity_percent: 85.0,
            pot_odds_percent: 25.0,
            implied_odds: ImpliedOdds::Good,
            hero_hand_label: "Flush".to_string(),
            hero_is_nuts: true,
            outs: &o,
            spr_zone: SprZone::Medium,
            in_position: true,
            board_texture: None,
            facing_bet: true,
            to_call: 50.0,
            pot_size: 100.0,
            effective_stack: 500.0,
            style: Style::Tag.profile(),
        };
        let rec = ActionRecommender::recommend(&input);
        assert!(matches!(rec.action, Action::Raise));
        assert!(rec.confidence >= 0.7);
    }

    #[test]
    fn large_bet_with_low_equity_and_no_draw_is_clear_fold() {
        let o = outs(0);
        let input = RecommenderInput {
            equity_percent: 20.0,
            pot_odds_percent: 40.0,
            implied_odds: ImpliedOdds::Poor,
            hero_hand_label: "High Card".to_string(),
            hero_is_nuts: false,
            outs: &o,
            spr_zone: SprZone::Deep,
            in_position: false,
            board_texture: None,
            facing_bet: true,
            to_call: 100.0,
            pot_size: 100.0,
            effective_stack: 1000.0,
            style: Style::Reg.profile(),
        };
        let rec = ActionRecommender::recommend(&input);
        assert_eq!(rec.action, Action::Fold);
        assert_eq!(rec.decision_reason, DecisionReason::ClearFold);
    }

    #[test]
    fn combo_draw_vs_large_bet_never_raises() {
        let o = outs(12);
        let input = RecommenderInput {
            equity_percent: 45.0,
            pot_odds_percent: 50.0,
            implied_odds: ImpliedOdds::Good,
            hero_hand_label: "High Card".to_string(),
            hero_is_nuts: false,
            outs: &o,
            spr_zone: SprZone::Medium,
            in_position: false,
            board_texture: None,
            facing_bet: true,
            to_call: 100.0,
            pot_size: 100.0,
            effective_stack: 500.0,
            style: Style::Reg.profile(),
        };
        let rec = ActionRecommender::recommend(&input);
        assert!(matches!(rec.action, Action::Call | Action::Fold));
    }

    #[test]
    fn style_differentiation_on_marginal_spot() {
        // Same marginal spot as spec.md §8 Scenario 5 (equity 24%, pot odds
        // 32%) but in position with enough outs (9 >= SEMI_BLUFF_MIN_OUTS)
        // for the semi-bluff branch to be reachable at all; position lifts
        // equity to 29%, so `equity_gap` is -8 for every style here.
        let o = outs(9);
        let mut by_style = std::collections::HashMap::new();
        for style in [Style::Nit, Style::Rock, Style::Reg, Style::Tag, Style::Lag, Style::Fish] {
            let input = RecommenderInput {
                equity_percent: 24.0,
                pot_odds_percent: 32.0,
                implied_odds: ImpliedOdds::Moderate,
                hero_hand_label: "Pair".to_string(),
                hero_is_nuts: false,
                outs: &o,
                spr_zone: SprZone::Medium,
                in_position: true,
                board_texture: None,
                facing_bet: true,
                to_call: 50.0,
                pot_size: 100.0,
                effective_stack: 500.0,
                style: style.profile(),
            };
            by_style.insert(style, ActionRecommender::recommend(&input));
        }

        // nit and rock have the tightest fold margin (5 pts) — an 8-point
        // equity-gap deficit clears it, so both fold.
        assert_eq!(by_style[&Style::Nit].action, Action::Fold);
        assert_eq!(by_style[&Style::Nit].decision_reason, DecisionReason::ClearFold);
        assert_eq!(by_style[&Style::Rock].action, Action::Fold);
        assert_eq!(by_style[&Style::Rock].decision_reason, DecisionReason::ClearFold);

        // reg and tag's wider fold margin (10 pts) isn't cleared, and their
        // raise margins (15/13) aren't either, so both continue with a
        // draw-call — outs are live and implied odds are at least moderate.
        assert_eq!(by_style[&Style::Reg].action, Action::Call);
        assert_eq!(by_style[&Style::Reg].decision_reason, DecisionReason::DrawCall);
        assert_eq!(by_style[&Style::Tag].action, Action::Call);
        assert_eq!(by_style[&Style::Tag].decision_reason, DecisionReason::DrawCall);

        // fish never folds here (margin 15 pts) and isn't bluffy enough to
        // raise, so it also draw-calls, but at a different confidence than
        // reg/tag since its confidence bounds and raise margin differ.
        assert_eq!(by_style[&Style::Fish].action, Action::Call);
        assert_eq!(by_style[&Style::Fish].decision_reason, DecisionReason::DrawCall);

        // lag is the one style whose semi-bluff window (scaled off its
        // 0.22 bluff frequency) reaches down to an 8-point deficit — it
        // raises as a semi-bluff instead of calling.
        assert_eq!(by_style[&Style::Lag].action, Action::Raise);
        assert_eq!(by_style[&Style::Lag].decision_reason, DecisionReason::SemiBluff);

        // The three styles sharing a (Call, DrawCall) outcome still don't
        // collapse to one indistinguishable number — fish's confidence
        // bounds are narrower than reg/tag's, so it reads as the least
        // confident of the three, matching "fish calls with lower
        // confidence" from spec.md §8 Scenario 5.
        let reg_conf = by_style[&Style::Reg].confidence;
        let tag_conf = by_style[&Style::Tag].confidence;
        let fish_conf = by_style[&Style::Fish].confidence;
        assert!(fish_conf < reg_conf && fish_conf < tag_conf, "fish should be least confident of the three callers");
        assert_ne!(reg_conf, tag_conf, "reg and tag should not land on an identical confidence");

        let distinct: std::collections::HashSet<_> = by_style
            .values()
            .map(|r| (r.action, r.decision_reason))
            .collect();
        assert!(distinct.len() >= 3, "expected at least three distinct (action, reason) tuples across styles");
    }

    #[test]
    fn value_hand_with_no_bet_facing_checks_value_bet() {
        let o = outs(0);
        let input = RecommenderInput {
            equity_percent: 70.0,
            pot_odds_percent: 0.0,
            implied_odds: ImpliedOdds::Good,
            hero_hand_label: "Three of a Kind".to_string(),
            hero_is_nuts: false,
            outs: &o,
            spr_zone: SprZone::Medium,
            in_position: true,
            board_texture: None,
            facing_bet: false,
            to_call: 0.0,
            pot_size: 100.0,
            effective_stack: 500.0,
            style: Style::Tag.profile(),
        };
        let rec = ActionRecommender::recommend(&input);
        assert_eq!(rec.action, Action::Bet);
        assert_eq!(rec.decision_reason, DecisionReason::ValueBet);
    }
}
