//! Omaha best-hand evaluation: the hero must use exactly 2 hole cards and
//! exactly 3 board cards.
//!
//! Enumerates every `C(hole,2) × C(board,3)` combination through the
//! 5-card ranker and keeps the maximum `HandRank`, with variant and
//! duplicate-card validation ahead of the enumeration.

use crate::card::Card;
use crate::error::{EngineError, Result};
use crate::evaluator::{self, HandCategory, HandRank};
use std::collections::HashSet;

/// Number of hole cards dealt per player for a given Omaha format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Plo4,
    Plo5,
    Plo6,
}

impl Variant {
    pub fn hole_count(self) -> usize {
        match self {
            Variant::Plo4 => 4,
            Variant::Plo5 => 5,
            Variant::Plo6 => 6,
        }
    }

    /// Maximum players the variant's deck budget supports with a full
    /// board: `(52 - 5) / hole_count`.
    pub fn max_players(self) -> usize {
        47 / self.hole_count()
    }
}

fn combinations_2(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

fn combinations_3(n: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..n).flat_map(move |a| ((a + 1)..n).flat_map(move |b| ((b + 1)..n).map(move |c| (a, b, c))))
}

fn check_no_duplicates(hole: &[Card], board: &[Card]) -> Result<()> {
    let mut seen = HashSet::with_capacity(hole.len() + board.len());
    for &c in hole.iter().chain(board.iter()) {
        if !seen.insert(c) {
            return Err(EngineError::DuplicateCard(c.to_string()));
        }
    }
    Ok(())
}

fn check_variant(variant: Variant, hole: &[Card]) -> Result<()> {
    if hole.len() != variant.hole_count() {
        return Err(EngineError::VariantMismatch {
            expected: variant.hole_count(),
            actual: hole.len(),
        });
    }
    Ok(())
}

/// Evaluate the best 5-card hand for `hole` (4, 5, or 6 cards) given `board`
/// (3, 4, or 5 cards), enumerating every valid `C(hole,2) × C(board,3)`
/// combination. Boards shorter than 3 cards return `InsufficientData` —
/// callers route preflop requests through a different path.
pub fn evaluate_omaha(variant: Variant, hole: &[Card], board: &[Card]) -> Result<HandRank> {
    check_variant(variant, hole)?;
    check_no_duplicates(hole, board)?;

    if board.len() < 3 {
        return Err(EngineError::InsufficientData);
    }
    if board.len() > 5 {
        return Err(EngineError::InvalidInput(format!(
            "board must have at most 5 cards, got {}",
            board.len()
        )));
    }

    let mut best: Option<HandRank> = None;
    for (i, j) in combinations_2(hole.len()) {
        for (a, b, c) in combinations_3(board.len()) {
            let five = [hole[i], hole[j], board[a], board[b], board[c]];
            let rank = evaluator::evaluate_5(&five);
            best = Some(match best {
                Some(b) if b >= rank => b,
                _ => rank,
            });
        }
    }

    // Guaranteed: board.len() >= 3 and hole.len() >= 4 means at least one
    // combination was enumerated.
    Ok(best.expect("at least one 2-hole/3-board combination always exists"))
}

/// Number of `C(hole,2) × C(board,3)` combinations evaluated for a given
/// hole/board length pair — exposed for brute-force-enumeration property
/// tests.
pub fn combination_count(hole_len: usize, board_len: usize) -> usize {
    fn choose(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }
    choose(hole_len, 2) * choose(board_len, 3)
}

/// Heuristic nut detection: true iff no unseen 4-card combination of hole
/// cards exists that would out-rank the hero's current best hand on this
/// board. A full nut-detector accounting for every straight flush or quad the
/// hero's own hole cards block is deliberately out of scope; this is a
/// category-level heuristic instead: the hero is "the nuts" if no unseen pair
/// of cards combined with hero's own off-cards reaches a strictly better
/// `HandRank` on this board.
pub fn is_nuts(
    variant: Variant,
    hole: &[Card],
    board: &[Card],
    hero_rank: HandRank,
    unseen: &[Card],
) -> Result<bool> {
    if board.len() < 3 {
        return Err(EngineError::InsufficientData);
    }
    let hole_count = variant.hole_count();

    for (i, j) in combinations_2(unseen.len()) {
        let mut candidate_hole: Vec<Card> = Vec::with_capacity(hole_count);
        candidate_hole.push(unseen[i]);
        candidate_hole.push(unseen[j]);
        // Fill the remaining hole slots with hero's own off-cards so the
        // candidate hand is a legal alternative holding of the same
        // variant; this is a heuristic stand-in, not an opponent model.
        for &c in hole.iter().take(hole_count.saturating_sub(2)) {
            candidate_hole.push(c);
        }
        if candidate_hole.len() != hole_count {
            continue;
        }
        if check_no_duplicates(&candidate_hole, board).is_err() {
            continue;
        }
        if let Ok(candidate_rank) = evaluate_omaha(variant, &candidate_hole, board) {
            if candidate_rank > hero_rank {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn plo4_enumerates_60_combinations() {
        assert_eq!(combination_count(4, 5), 60);
    }

    #[test]
    fn plo5_enumerates_100_combinations() {
        assert_eq!(combination_count(5, 5), 100);
    }

    #[test]
    fn plo6_enumerates_150_combinations() {
        assert_eq!(combination_count(6, 5), 150);
    }

    #[test]
    fn nut_flush_on_monotone_board() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let board = Card::parse_many("Ts 9s 2s").unwrap();
        let rank = evaluate_omaha(Variant::Plo4, &hole, &board).unwrap();
        assert_eq!(rank.category, HandCategory::Flush);
    }

    #[test]
    fn top_set_on_wet_board() {
        let hole = Card::parse_many("As Ah Kd Qc").unwrap();
        let board = Card::parse_many("Ac 9h 2d").unwrap();
        let rank = evaluate_omaha(Variant::Plo4, &hole, &board).unwrap();
        assert_eq!(rank.category, HandCategory::Trips);
    }

    #[test]
    fn rejects_wrong_hole_count() {
        let hole = Card::parse_many("As Ks Qh").unwrap();
        let board = Card::parse_many("Ts 9s 2s").unwrap();
        let result = evaluate_omaha(Variant::Plo4, &hole, &board);
        assert!(matches!(result, Err(EngineError::VariantMismatch { .. })));
    }

    #[test]
    fn rejects_duplicate_cards() {
        let hole = Card::parse_many("As Ks Qh As").unwrap();
        let board = Card::parse_many("Ts 9s 2s").unwrap();
        let result = evaluate_omaha(Variant::Plo4, &hole, &board);
        assert!(matches!(result, Err(EngineError::DuplicateCard(_))));
    }

    #[test]
    fn preflop_is_insufficient_data() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let result = evaluate_omaha(Variant::Plo4, &hole, &[]);
        assert!(matches!(result, Err(EngineError::InsufficientData)));
    }

    #[test]
    fn best_hand_never_uses_one_or_three_hole_cards() {
        // Hero holds quads in hole (AAAA) but the board has nothing
        // matching — the best hand must still use exactly 2 hole + 3
        // board cards, so the result cannot be quads.
        let hole = Card::parse_many("As Ah Ad Ac").unwrap();
        let board = Card::parse_many("Kh Qd 2c").unwrap();
        let rank = evaluate_omaha(Variant::Plo4, &hole, &board).unwrap();
        assert_ne!(rank.category, HandCategory::Quads);
        assert_eq!(rank.category, HandCategory::Pair);
    }

    #[test]
    fn brute_force_matches_manual_max() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let board = Card::parse_many("Ts 9s 2s").unwrap();

        let mut manual_best: Option<HandRank> = None;
        for i in 0..4 {
            for j in (i + 1)..4 {
                for a in 0..3 {
                    for b in (a + 1)..3 {
                        for c in (b + 1)..3 {
                            let five = [hole[i], hole[j], board[a], board[b], board[c]];
                            let r = evaluator::evaluate_5(&five);
                            manual_best = Some(match manual_best {
                                Some(best) if best >= r => best,
                                _ => r,
                            });
                        }
                    }
                }
            }
        }

        let rank = evaluate_omaha(Variant::Plo4, &hole, &board).unwrap();
        assert_eq!(rank, manual_best.unwrap());
    }
}
