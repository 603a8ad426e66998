//! Flop-texture classification.
//!
//! The "wetness" scoring shape — suit concentration, rank-gap connectivity,
//! pairing — generalizes a single 3-way `Dry/Medium/Wet` enum into a full
//! typed `FlopTexture` record carrying each contributing signal separately.

use crate::card::{Card, Suit};
use crate::error::{EngineError, Result};
use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suitedness {
    Monotone,
    TwoTone,
    Rainbow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connectivity {
    Connected,
    SemiConnected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureCategory {
    MonotoneConnected,
    MonotoneUnconnected,
    TwoToneConnected,
    TwoToneUnconnected,
    RainbowConnected,
    RainbowUnconnected,
    /// Any paired flop, regardless of suitedness/connectivity — pairing
    /// dominates the category because it introduces full-house/quads
    /// outs that suitedness/connectivity alone don't capture.
    Paired,
    /// Three of a kind on the flop.
    TripletBoard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NutDanger {
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawFlags: u8 {
        const STRAIGHT_DRAW_POSSIBLE = 0b0000_0001;
        const FLUSH_DRAW_POSSIBLE    = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlopTexture {
    pub category: TextureCategory,
    pub suitedness: Suitedness,
    pub connectivity: Connectivity,
    pub is_paired: bool,
    pub is_triplet: bool,
    pub draws: DrawFlags,
    pub nut_danger: NutDanger,
}

impl FlopTexture {
    pub fn straight_draw_possible(&self) -> bool {
        self.draws.contains(DrawFlags::STRAIGHT_DRAW_POSSIBLE)
    }

    pub fn flush_draw_possible(&self) -> bool {
        self.draws.contains(DrawFlags::FLUSH_DRAW_POSSIBLE)
    }
}

fn suitedness_of(flop: &[Card; 3]) -> Suitedness {
    let all_same = flop[0].suit == flop[1].suit && flop[1].suit == flop[2].suit;
    if all_same {
        return Suitedness::Monotone;
    }
    let any_shared = flop[0].suit == flop[1].suit
        || flop[1].suit == flop[2].suit
        || flop[0].suit == flop[2].suit;
    if any_shared {
        Suitedness::TwoTone
    } else {
        Suitedness::Rainbow
    }
}

/// True iff any 5-rank window (ace counted low for the wheel too) contains
/// all 3 flop ranks.
fn straight_draw_possible(ranks: &[u8; 3]) -> bool {
    let mut marks = [false; 15]; // ranks 1..=14, 1 = ace-low
    for &r in ranks {
        marks[r as usize] = true;
        if r == 14 {
            marks[1] = true;
        }
    }
    for low in 1..=10u8 {
        let window = &marks[(low as usize)..(low as usize + 5)];
        if window.iter().filter(|&&m| m).count() >= 3 {
            return true;
        }
    }
    false
}

fn connectivity_of(ranks_sorted: &[u8; 3]) -> Connectivity {
    let gaps = [
        ranks_sorted[1].abs_diff(ranks_sorted[0]),
        ranks_sorted[2].abs_diff(ranks_sorted[1]),
    ];
    let max_gap = gaps.iter().copied().max().unwrap_or(0);

    if max_gap <= 1 {
        Connectivity::Connected
    } else if gaps.contains(&2) || is_one_gapper(ranks_sorted) {
        Connectivity::SemiConnected
    } else {
        Connectivity::Disconnected
    }
}

/// A "one-gapper" pattern: the two widest ranks span exactly 3 (e.g.
/// T-8-7 spans 3 between T and 7) with the middle rank not adjacent to
/// both — exactly one gap of size 2 somewhere in the sorted triple.
fn is_one_gapper(ranks_sorted: &[u8; 3]) -> bool {
    let span = ranks_sorted[2].abs_diff(ranks_sorted[0]);
    span == 3
}

fn nut_danger_of(
    is_paired: bool,
    is_triplet: bool,
    suitedness: Suitedness,
    connectivity: Connectivity,
) -> NutDanger {
    if is_triplet {
        return NutDanger::Medium;
    }
    if is_paired {
        return match suitedness {
            Suitedness::Monotone => NutDanger::VeryHigh,
            Suitedness::TwoTone => NutDanger::High,
            Suitedness::Rainbow => NutDanger::Medium,
        };
    }
    match (suitedness, connectivity) {
        (Suitedness::Monotone, Connectivity::Connected) => NutDanger::Extreme,
        (Suitedness::Monotone, Connectivity::SemiConnected) => NutDanger::VeryHigh,
        (Suitedness::Monotone, Connectivity::Disconnected) => NutDanger::High,
        (Suitedness::TwoTone, Connectivity::Connected) => NutDanger::High,
        (Suitedness::TwoTone, Connectivity::SemiConnected) => NutDanger::Medium,
        (Suitedness::TwoTone, Connectivity::Disconnected) => NutDanger::Medium,
        (Suitedness::Rainbow, Connectivity::Connected) => NutDanger::Medium,
        (Suitedness::Rainbow, Connectivity::SemiConnected) => NutDanger::Low,
        (Suitedness::Rainbow, Connectivity::Disconnected) => NutDanger::Low,
    }
}

fn category_of(
    is_paired: bool,
    is_triplet: bool,
    suitedness: Suitedness,
    connectivity: Connectivity,
) -> TextureCategory {
    if is_triplet {
        return TextureCategory::TripletBoard;
    }
    if is_paired {
        return TextureCategory::Paired;
    }
    let connected = connectivity == Connectivity::Connected;
    match (suitedness, connected) {
        (Suitedness::Monotone, true) => TextureCategory::MonotoneConnected,
        (Suitedness::Monotone, false) => TextureCategory::MonotoneUnconnected,
        (Suitedness::TwoTone, true) => TextureCategory::TwoToneConnected,
        (Suitedness::TwoTone, false) => TextureCategory::TwoToneUnconnected,
        (Suitedness::Rainbow, true) => TextureCategory::RainbowConnected,
        (Suitedness::Rainbow, false) => TextureCategory::RainbowUnconnected,
    }
}

/// Classify exactly 3 board cards. Any other length fails with
/// `InvalidBoardLength`.
pub fn analyze_flop(flop: &[Card]) -> Result<FlopTexture> {
    if flop.len() != 3 {
        return Err(EngineError::InvalidBoardLength(flop.len()));
    }
    let flop: [Card; 3] = [flop[0], flop[1], flop[2]];

    let mut ranks = [flop[0].rank, flop[1].rank, flop[2].rank];
    ranks.sort_unstable();

    let is_paired = ranks[0] == ranks[1] || ranks[1] == ranks[2];
    let is_triplet = ranks[0] == ranks[1] && ranks[1] == ranks[2];

    let suitedness = suitedness_of(&flop);
    let connectivity = connectivity_of(&ranks);

    let mut draws = DrawFlags::empty();
    if straight_draw_possible(&ranks) {
        draws |= DrawFlags::STRAIGHT_DRAW_POSSIBLE;
    }
    let suit_counts = {
        let mut counts = [0u8; 4];
        for c in &flop {
            counts[c.suit.index() as usize] += 1;
        }
        counts
    };
    if suit_counts.iter().any(|&n| n >= 2) {
        draws |= DrawFlags::FLUSH_DRAW_POSSIBLE;
    }

    Ok(FlopTexture {
        category: category_of(is_paired, is_triplet, suitedness, connectivity),
        suitedness,
        connectivity,
        is_paired,
        is_triplet,
        draws,
        nut_danger: nut_danger_of(is_paired, is_triplet, suitedness, connectivity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn flop(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    #[test]
    fn monotone_connected_is_extreme_danger() {
        let t = analyze_flop(&flop("Jh Th 9h")).unwrap();
        assert_eq!(t.suitedness, Suitedness::Monotone);
        assert_eq!(t.connectivity, Connectivity::Connected);
        assert_eq!(t.category, TextureCategory::MonotoneConnected);
        assert_eq!(t.nut_danger, NutDanger::Extreme);
        assert!(t.flush_draw_possible());
        assert!(t.straight_draw_possible());
    }

    #[test]
    fn rainbow_disconnected_unpaired_is_low_danger() {
        let t = analyze_flop(&flop("Ks 7h 2d")).unwrap();
        assert_eq!(t.suitedness, Suitedness::Rainbow);
        assert_eq!(t.connectivity, Connectivity::Disconnected);
        assert!(!t.is_paired);
        assert_eq!(t.nut_danger, NutDanger::Low);
        assert!(!t.flush_draw_possible());
    }

    #[test]
    fn paired_board_sets_is_paired() {
        let t = analyze_flop(&flop("Ac Kh 5d")).unwrap();
        assert!(!t.is_paired);
        let t2 = analyze_flop(&flop("Ac Ah 5d")).unwrap();
        assert!(t2.is_paired);
        assert_eq!(t2.category, TextureCategory::Paired);
    }

    #[test]
    fn triplet_board_detected() {
        let t = analyze_flop(&flop("9c 9h 9d")).unwrap();
        assert!(t.is_triplet);
        assert!(t.is_paired);
        assert_eq!(t.category, TextureCategory::TripletBoard);
    }

    #[test]
    fn two_tone_suitedness_requires_exactly_two_shared_suit() {
        let t = analyze_flop(&flop("Ah Kh 2c")).unwrap();
        assert_eq!(t.suitedness, Suitedness::TwoTone);
        assert!(t.flush_draw_possible());
    }

    #[test]
    fn wheel_wraps_for_straight_draw() {
        // A-2-3: within a 5-rank low-ace window (A,2,3,4,5).
        let t = analyze_flop(&flop("Ac 2d 3h")).unwrap();
        assert!(t.straight_draw_possible());
    }

    #[test]
    fn wrong_length_is_invalid_board_length() {
        let result = analyze_flop(&flop("Ac 2d"));
        assert!(matches!(result, Err(EngineError::InvalidBoardLength(2))));
    }

    #[test]
    fn suitedness_and_booleans_match_independent_recomputation() {
        let t = analyze_flop(&flop("Th 9h 8c")).unwrap();
        let flop_cards = flop("Th 9h 8c");
        let mut suit_counts = [0u8; 4];
        for c in &flop_cards {
            suit_counts[c.suit.index() as usize] += 1;
        }
        let max_suit = *suit_counts.iter().max().unwrap();
        let expected_suitedness = match max_suit {
            3 => Suitedness::Monotone,
            2 => Suitedness::TwoTone,
            _ => Suitedness::Rainbow,
        };
        assert_eq!(t.suitedness, expected_suitedness);
        assert_eq!(t.flush_draw_possible(), max_suit >= 2);
    }
}
