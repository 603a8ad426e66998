//! Outs counter: unseen cards that improve the hero's Omaha hand.
//!
//! Draws are classified as flush draw / open-ended straight draw / gutshot,
//! with combo draws flagged when more than one kind is live. Counting itself
//! is direct enumeration: walk the unseen cards, keep the ones that strictly
//! improve the hero's `HandCategory`.

use crate::card::{Card, Deck};
use crate::error::Result;
use crate::omaha::{self, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    None,
    Gutshot,
    OpenEnded,
    FlushDraw,
    Combo,
}

#[derive(Debug, Clone)]
pub struct OutsResult {
    /// Unseen cards that strictly improve the hero's hand category (or,
    /// on a full board, none — there are no more cards to come).
    pub improving_cards: Vec<Card>,
    pub to_improve: usize,
    pub has_flush_draw: bool,
    pub has_straight_draw: bool,
    pub draw_kind: DrawKind,
    /// Approximated probability of improving by the next street's end,
    /// computed exactly from the remaining-card combinatorics rather than
    /// the flat "rule of 4/2" shorthand — the two coincide for common cases
    /// (9 outs ⇒ ≈35% on the flop, ≈20% on the turn) while staying accurate
    /// for other out counts.
    pub draw_equity_percent: f64,
}

fn choose2(n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        (n * (n - 1)) as f64 / 2.0
    }
}

/// Count outs and estimate draw equity for `hole` against `board` (3 or 4
/// cards — the flop or the turn). `dead_cards` are cards known to be out of
/// play beyond hero's hole and the board (folded hands, burn cards).
pub fn count_outs(
    variant: Variant,
    hole: &[Card],
    board: &[Card],
    dead_cards: &[Card],
) -> Result<OutsResult> {
    let current = omaha::evaluate_omaha(variant, hole, board)?;

    let cards_to_come = 5usize.saturating_sub(board.len());
    if cards_to_come == 0 {
        return Ok(OutsResult {
            improving_cards: Vec::new(),
            to_improve: 0,
            has_flush_draw: false,
            has_straight_draw: false,
            draw_kind: DrawKind::None,
            draw_equity_percent: 0.0,
        });
    }

    let deck = Deck::new();
    let mut excluded: Vec<Card> = Vec::with_capacity(hole.len() + board.len() + dead_cards.len());
    excluded.extend_from_slice(hole);
    excluded.extend_from_slice(board);
    excluded.extend_from_slice(dead_cards);
    let unseen = deck.excluding(&excluded);

    let mut improving = Vec::new();
    let mut improves_to_straight = 0usize;
    for &card in unseen.cards() {
        let mut new_board = board.to_vec();
        new_board.push(card);
        if let Ok(new_rank) = omaha::evaluate_omaha(variant, hole, &new_board) {
            if new_rank.category > current.category {
                improving.push(card);
                if new_rank.category == crate::evaluator::HandCategory::Straight {
                    improves_to_straight += 1;
                }
            }
        }
    }

    let has_flush_draw = has_flush_draw(hole, board);
    let has_straight_draw = improves_to_straight > 0;

    let draw_kind = match (has_flush_draw, has_straight_draw) {
        (true, true) => DrawKind::Combo,
        (true, false) => DrawKind::FlushDraw,
        (false, true) if improves_to_straight >= 7 => DrawKind::OpenEnded,
        (false, true) => DrawKind::Gutshot,
        (false, false) => DrawKind::None,
    };

    let unseen_count = unseen.len();
    let to_improve = improving.len();

    let draw_equity_percent = match cards_to_come {
        2 => {
            let total = choose2(unseen_count);
            let miss = choose2(unseen_count.saturating_sub(to_improve));
            if total > 0.0 {
                (1.0 - miss / total) * 100.0
            } else {
                0.0
            }
        }
        1 => {
            if unseen_count > 0 {
                to_improve as f64 / unseen_count as f64 * 100.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    Ok(OutsResult {
        improving_cards: improving,
        to_improve,
        has_flush_draw,
        has_straight_draw,
        draw_kind,
        draw_equity_percent,
    })
}

/// Omaha-aware flush-draw detection: exactly the 2-hole + 3-board rule
/// means a flush draw requires at least 2 hole cards of one suit *and* at
/// least 2 board cards of that same suit (so hero can reach 4 of 5 using
/// exactly 2 hole cards).
fn has_flush_draw(hole: &[Card], board: &[Card]) -> bool {
    for suit_idx in 0..4 {
        let hole_count = hole.iter().filter(|c| c.suit.index() == suit_idx).count();
        let board_count = board.iter().filter(|c| c.suit.index() == suit_idx).count();
        if hole_count >= 2 && board_count >= 2 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn flush_and_straight_combo_draw_on_flop() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let board = Card::parse_many("Ts 9s 2d").unwrap();
        let outs = count_outs(Variant::Plo4, &hole, &board, &[]).unwrap();
        assert!(outs.to_improve >= 9);
        assert!(outs.has_flush_draw);
    }

    #[test]
    fn river_has_no_outs() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let board = Card::parse_many("Ts 9s 2d 3c 4h").unwrap();
        let outs = count_outs(Variant::Plo4, &hole, &board, &[]).unwrap();
        assert_eq!(outs.to_improve, 0);
        assert_eq!(outs.draw_equity_percent, 0.0);
    }

    #[test]
    fn draw_equity_roughly_matches_rule_of_four_and_two() {
        let hole = Card::parse_many("As Ks Qh Jh").unwrap();
        let flop = Card::parse_many("Ts 9s 2d").unwrap();
        let flop_outs = count_outs(Variant::Plo4, &hole, &flop, &[]).unwrap();
        assert!(flop_outs.draw_equity_percent > 25.0 && flop_outs.draw_equity_percent < 45.0);

        let turn = Card::parse_many("Ts 9s 2d 4c").unwrap();
        let turn_outs = count_outs(Variant::Plo4, &hole, &turn, &[]).unwrap();
        assert!(turn_outs.draw_equity_percent > 10.0 && turn_outs.draw_equity_percent < 30.0);
    }

    #[test]
    fn no_flush_draw_without_two_hole_cards_of_suit() {
        let hole = Card::parse_many("As Kd Qh Jh").unwrap();
        let board = Card::parse_many("Ts 9s 2d").unwrap();
        assert!(!has_flush_draw(&hole, &board));
    }
}
