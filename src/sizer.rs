//! Bet sizer: turns an [`Action`](crate::recommender::Action) (bet or raise)
//! into a concrete chip amount, SPR-zoned and style-scaled.
//!
//! Replaces a flat `potSize * 0.75` constant with an SPR-zone table, then
//! scales by `StyleProfile::sizing_multiplier`, then clamps to the
//! pot-limit max a PLO table actually allows.

use crate::error::{EngineError, Result};
use crate::potodds::SprZone;
use crate::style::StyleProfile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingRecommendation {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
    pub percent_pot: f64,
}

/// Base fraction-of-pot sizing per SPR zone, before the style multiplier.
/// Deeper stacks support a smaller percentage bet building the same
/// number of future streets of pressure; shallower stacks call for larger,
/// more committing sizes. Mirrors the ladder already established in
/// [`crate::potodds::SprZone`].
fn base_fraction(zone: SprZone) -> (f64, f64, f64) {
    match zone {
        SprZone::Micro => (0.75, 1.00, 1.00),
        SprZone::Short => (0.60, 0.85, 1.00),
        SprZone::Medium => (0.50, 0.70, 1.00),
        SprZone::Deep => (0.40, 0.60, 0.85),
        SprZone::VeryDeep => (0.33, 0.50, 0.75),
    }
}

/// Pot-limit max raise: the largest legal raise is the pot after a call —
/// `pot_after_call = pot_size + to_call + to_call` for a first raise, and
/// a same-size call is added once per the standard pot-limit formula. When
/// not facing a bet (`to_call == 0`), the pot-limit max is simply the pot.
fn pot_limit_max(pot_size: f64, to_call: f64) -> f64 {
    pot_size + 2.0 * to_call
}

/// Compute a sizing recommendation for a bet or raise.
///
/// `pot_size` is the pot before hero acts; `to_call` is 0 when hero is not
/// facing a bet (computing a bet size rather than a raise size).
/// `effective_stack` bounds every figure from above — no sizing can exceed
/// what hero can actually put in.
pub fn compute_sizing(
    pot_size: f64,
    to_call: f64,
    effective_stack: f64,
    spr_zone: SprZone,
    style: &StyleProfile,
) -> Result<SizingRecommendation> {
    if pot_size < 0.0 || to_call < 0.0 || effective_stack < 0.0 {
        return Err(EngineError::InvalidInput(
            "pot_size, to_call, and effective_stack must be non-negative".to_string(),
        ));
    }
    if effective_stack == 0.0 {
        return Err(EngineError::InvalidInput(
            "effective_stack must be positive to size a bet".to_string(),
        ));
    }

    let (min_fraction, optimal_fraction, max_fraction) = base_fraction(spr_zone);
    let scale = style.sizing_multiplier;

    let pot_limit_cap = pot_limit_max(pot_size, to_call);
    let stack_cap = effective_stack;
    let cap = pot_limit_cap.min(stack_cap);

    let raw_min = pot_size * min_fraction * scale;
    let raw_optimal = pot_size * optimal_fraction * scale;
    let raw_max = pot_size * max_fraction * scale;

    let min = raw_min.min(cap).max(0.0);
    let max = raw_max.min(cap).max(min);
    let optimal = raw_optimal.min(cap).max(min).min(max);

    let percent_pot = if pot_size > 0.0 { optimal / pot_size * 100.0 } else { 0.0 };

    Ok(SizingRecommendation { min, optimal, max, percent_pot })
}
