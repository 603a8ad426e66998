//! Pot-odds and stack-to-pot-ratio math.
//!
//! The SPR zone ladder is its own named type rather than an inline
//! `if spr < 2.0` check, so every caller that needs a zone label shares one
//! set of breakpoints.

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprZone {
    Micro,
    Short,
    Medium,
    Deep,
    VeryDeep,
}

impl SprZone {
    /// MICRO < 2, SHORT 2-4, MEDIUM 4-8, DEEP 8-15, VERY_DEEP > 15.
    pub fn from_spr(spr: f64) -> SprZone {
        if spr < 2.0 {
            SprZone::Micro
        } else if spr < 4.0 {
            SprZone::Short
        } else if spr < 8.0 {
            SprZone::Medium
        } else if spr <= 15.0 {
            SprZone::Deep
        } else {
            SprZone::VeryDeep
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SprZone::Micro => "micro",
            SprZone::Short => "short",
            SprZone::Medium => "medium",
            SprZone::Deep => "deep",
            SprZone::VeryDeep => "very_deep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotOdds {
    /// `toCall / (potSize + toCall)`, reported as a percentage.
    pub call_cost_percent: f64,
    /// Minimum equity required to make the call break even — identical to
    /// `call_cost_percent`, named separately because callers read it as a
    /// distinct concept (the break-even line) from the raw cost fraction.
    pub required_equity_percent: f64,
    pub stack_to_pot_ratio: f64,
    pub spr_zone: SprZone,
    pub implied_odds: ImpliedOdds,
}

/// Stack/pot ratio buckets for implied-odds quality (distinct from the SPR
/// zone ladder, which uses different breakpoints for a different purpose:
/// sizing, not call justification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpliedOdds {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl ImpliedOdds {
    /// stack/pot ≥ 8 → excellent; 4-8 → good; 2-4 → moderate; < 2 → poor.
    pub fn from_ratio(stack_to_pot: f64) -> ImpliedOdds {
        if stack_to_pot >= 8.0 {
            ImpliedOdds::Excellent
        } else if stack_to_pot >= 4.0 {
            ImpliedOdds::Good
        } else if stack_to_pot >= 2.0 {
            ImpliedOdds::Moderate
        } else {
            ImpliedOdds::Poor
        }
    }

    pub fn is_at_least_moderate(self) -> bool {
        matches!(self, ImpliedOdds::Moderate | ImpliedOdds::Good | ImpliedOdds::Excellent)
    }
}

/// Compute pot odds for facing a bet of `to_call` into a pot of `pot_size`,
/// with `effective_stack` remaining behind for the caller.
pub fn compute_pot_odds(pot_size: f64, to_call: f64, effective_stack: f64) -> Result<PotOdds> {
    if pot_size < 0.0 || to_call < 0.0 || effective_stack < 0.0 {
        return Err(EngineError::InvalidInput(
            "pot_size, to_call, and effective_stack must be non-negative".to_string(),
        ));
    }
    if to_call == 0.0 {
        return Err(EngineError::InvalidInput(
            "to_call must be positive; use compute_spr when not facing a bet".to_string(),
        ));
    }

    let resulting_pot = pot_size + to_call;
    let call_cost_percent = to_call / resulting_pot * 100.0;

    let spr = if pot_size > 0.0 {
        effective_stack / pot_size
    } else {
        f64::INFINITY
    };

    Ok(PotOdds {
        call_cost_percent,
        required_equity_percent: call_cost_percent,
        stack_to_pot_ratio: spr,
        spr_zone: SprZone::from_spr(spr),
        implied_odds: ImpliedOdds::from_ratio(spr),
    })
}

/// SPR alone, for situations with no bet to call (e.g. deciding whether to
/// open-raise or check a made hand).
pub fn compute_spr(pot_size: f64, effective_stack: f64) -> Result<(f64, SprZone)> {
    if pot_size < 0.0 || effective_stack < 0.0 {
        return Err(EngineError::InvalidInput(
            "pot_size and effective_stack must be non-negative".to_string(),
        ));
    }
    let spr = if pot_size > 0.0 {
        effective_stack / pot_size
    } else {
        f64::INFINITY
    };
    Ok((spr, SprZone::from_spr(spr)))
}
