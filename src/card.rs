//! Card, suit, and deck primitives.
//!
//! Cards are value-typed, immutable, and totally ordered by rank (suit only
//! matters for flush detection downstream). Parsing accepts the usual
//! 2-character notation (`As`, `Td`, with `10x` also accepted for rank ten).

use crate::error::{EngineError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the four suits. Only used by the evaluator to detect flushes —
/// suit carries no rank weight of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    fn from_char(c: char) -> Option<Suit> {
        match c {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    /// 2-bit index used by the bit-packed card representation.
    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// A playing card. `rank` is 2..=14 (14 = Ace). Totally ordered by rank,
/// suit is a tiebreak only so that `Card` can live in an ordered `Vec`/`BTreeSet`
/// without surprising behavior; poker hand strength never compares suits
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!((2..=14).contains(&rank), "rank out of range: {rank}");
        Card { rank, suit }
    }

    /// Parse a 2-character card string such as `As` or `Td`. Also accepts
    /// the 3-character `10x` spelling of rank ten. Rank is case-insensitive;
    /// suit is matched after lowercasing.
    pub fn parse(s: &str) -> Result<Card> {
        let trimmed = s.trim();
        let (rank_part, suit_char) = if let Some(stripped) = trimmed.strip_prefix("10") {
            (
                "10".to_string(),
                stripped
                    .chars()
                    .next()
                    .ok_or_else(|| EngineError::ParseError(s.to_string()))?,
            )
        } else {
            if trimmed.chars().count() != 2 {
                return Err(EngineError::ParseError(s.to_string()));
            }
            let mut chars = trimmed.chars();
            let rank_char = chars.next().unwrap();
            let suit_char = chars.next().unwrap();
            (rank_char.to_string(), suit_char)
        };

        let rank = if rank_part == "10" {
            10
        } else {
            let c = rank_part
                .chars()
                .next()
                .ok_or_else(|| EngineError::ParseError(s.to_string()))?
                .to_ascii_uppercase();
            match c {
                '2'..='9' => c.to_digit(10).unwrap() as u8,
                'T' => 10,
                'J' => 11,
                'Q' => 12,
                'K' => 13,
                'A' => 14,
                _ => return Err(EngineError::ParseError(s.to_string())),
            }
        };

        let suit = Suit::from_char(suit_char.to_ascii_lowercase())
            .ok_or_else(|| EngineError::ParseError(s.to_string()))?;

        Ok(Card::new(rank, suit))
    }

    /// Parse a whitespace-separated list of cards, e.g. `"As Ks Qh"`.
    pub fn parse_many(s: &str) -> Result<Vec<Card>> {
        s.split_whitespace().map(Card::parse).collect()
    }

    /// Bit-packed representation: `rank_index << 2 | suit_index`, where
    /// `rank_index = rank - 2`. Fits in a `u8` (0..=51) and is what the
    /// evaluator's lookup tables are keyed on.
    pub fn packed(self) -> u8 {
        ((self.rank - 2) << 2) | self.suit.index()
    }

    pub fn from_packed(id: u8) -> Card {
        let rank = (id >> 2) + 2;
        let suit = match id & 0b11 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        };
        Card::new(rank, suit)
    }

    fn rank_char(self) -> char {
        RANK_CHARS[(self.rank - 2) as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit.to_char())
    }
}

/// Cards cross the wire as their 2-character notation, not as a
/// `{rank, suit}` object — `serde_json::to_string`/`from_str` on a `Card`
/// round-trips through exactly the same text `Card::parse`/`Display` do.
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A 52-card deck. Materialized once and dealt from without replacement.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh, full 52-card deck in a fixed canonical order.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in 2..=14u8 {
            for &suit in &[Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// A deck with the given cards removed, preserving relative order.
    pub fn excluding(&self, excluded: &[Card]) -> Deck {
        let cards = self
            .cards
            .iter()
            .filter(|c| !excluded.contains(c))
            .copied()
            .collect();
        Deck { cards }
    }

    /// Deal `k` cards from this deck without replacement using the given
    /// RNG. Determinism is the caller's responsibility: the same RNG state
    /// (e.g. the same seed, freshly constructed) and the same deck always
    /// produce the same draw, regardless of what else has happened in the
    /// process — there is no hidden global state here.
    pub fn deal_without_replacement<R: Rng + ?Sized>(
        &self,
        excluded: &[Card],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>> {
        let remaining = self.excluding(excluded);
        if remaining.len() < k {
            return Err(EngineError::OutOfCards {
                requested: k,
                available: remaining.len(),
            });
        }
        let mut pool = remaining.cards;
        let (dealt, _rest) = pool.partial_shuffle(rng, k);
        Ok(dealt.to_vec())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn parse_basic_cards() {
        assert_eq!(Card::parse("As").unwrap(), Card::new(14, Suit::Spades));
        assert_eq!(Card::parse("Td").unwrap(), Card::new(10, Suit::Diamonds));
        assert_eq!(Card::parse("10d").unwrap(), Card::new(10, Suit::Diamonds));
        assert_eq!(Card::parse("2c").unwrap(), Card::new(2, Suit::Clubs));
        assert_eq!(Card::parse("ah").unwrap(), Card::new(14, Suit::Hearts));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Card::parse("Zz").is_err());
        assert!(Card::parse("A").is_err());
        assert!(Card::parse("Asx").is_err());
        assert!(Card::parse("").is_err());
    }

    #[test]
    fn parse_format_round_trip() {
        let deck = Deck::new();
        for &card in deck.cards() {
            let formatted = card.to_string();
            let parsed = Card::parse(&formatted).unwrap();
            assert_eq!(parsed, card);
        }
    }

    #[test]
    fn packed_round_trip() {
        let deck = Deck::new();
        for &card in deck.cards() {
            assert_eq!(Card::from_packed(card.packed()), card);
        }
    }

    #[test]
    fn deck_has_52_unique_cards() {
        let deck = Deck::new();
        assert_eq!(deck.len(), 52);
        let mut seen = std::collections::HashSet::new();
        for &c in deck.cards() {
            assert!(seen.insert(c), "duplicate card in fresh deck: {c}");
        }
    }

    #[test]
    fn deal_without_replacement_excludes_given_cards() {
        let deck = Deck::new();
        let excluded = Card::parse_many("As Ks").unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let dealt = deck.deal_without_replacement(&excluded, 5, &mut rng).unwrap();
        assert_eq!(dealt.len(), 5);
        for c in &dealt {
            assert!(!excluded.contains(c));
        }
    }

    #[test]
    fn deal_is_deterministic_for_same_seed() {
        let deck = Deck::new();
        let excluded = Card::parse_many("As Ks").unwrap();

        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(99);
        let dealt1 = deck.deal_without_replacement(&excluded, 6, &mut rng1).unwrap();

        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(99);
        let dealt2 = deck.deal_without_replacement(&excluded, 6, &mut rng2).unwrap();

        assert_eq!(dealt1, dealt2);
    }

    #[test]
    fn serializes_as_two_character_notation() {
        let card = Card::new(14, Suit::Spades);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"As\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn deal_fails_when_not_enough_cards() {
        let deck = Deck::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let result = deck.deal_without_replacement(&[], 53, &mut rng);
        assert!(matches!(result, Err(EngineError::OutOfCards { .. })));
    }
}
