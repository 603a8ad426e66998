//! Starting-hand query DSL: `pair:TT+:ds:conn`, `run:J+:ds`, `bway`, `any`.
//!
//! A small string-keyed dispatch (match on a handful of known tokens, reject
//! anything else with a precise message) built as a recursive-descent-style
//! tokenizer rather than a single `match` arm, since the grammar needs
//! compositional modifiers chained after a colon.

use crate::card::Card;
use crate::error::{EngineError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Pair,
    DoublePair,
    Run,
    Broadway,
    Any,
}

impl QueryKind {
    fn from_str(s: &str) -> Result<QueryKind> {
        match s {
            "pair" => Ok(QueryKind::Pair),
            "dpair" => Ok(QueryKind::DoublePair),
            "run" => Ok(QueryKind::Run),
            "bway" => Ok(QueryKind::Broadway),
            "any" => Ok(QueryKind::Any),
            other => Err(EngineError::InvalidQuery {
                query: other.to_string(),
                reason: "unknown query kind".to_string(),
            }),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            QueryKind::Pair => "pair",
            QueryKind::DoublePair => "dpair",
            QueryKind::Run => "run",
            QueryKind::Broadway => "bway",
            QueryKind::Any => "any",
        }
    }

    /// Pair-like kinds spell rank constraints as a doubled rank code
    /// (`TT`, `TT+`, `88-QQ`); rundown-like kinds spell them as a single
    /// rank code (`J`, `J+`, `8-J`) naming the rundown's low card.
    fn doubled_rank_notation(self) -> bool {
        matches!(self, QueryKind::Pair | QueryKind::DoublePair)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuitedConstraint {
    None,
    SingleSuited,
    DoubleSuited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankConstraint {
    Exact(u8),
    Threshold(u8),
    Range(u8, u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub kind: QueryKind,
    pub rank: Option<RankConstraint>,
    pub suited: SuitedConstraint,
    pub connected: bool,
}

fn rank_from_char(c: char) -> Result<u8> {
    match c.to_ascii_uppercase() {
        '2'..='9' => Ok(c.to_digit(10).unwrap() as u8),
        'T' => Ok(10),
        'J' => Ok(11),
        'Q' => Ok(12),
        'K' => Ok(13),
        'A' => Ok(14),
        _ => Err(EngineError::InvalidQuery {
            query: c.to_string(),
            reason: "malformed rank constraint".to_string(),
        }),
    }
}

fn rank_to_char(rank: u8) -> char {
    match rank {
        2..=9 => (b'0' + rank) as char,
        10 => 'T',
        11 => 'J',
        12 => 'Q',
        13 => 'K',
        14 => 'A',
        _ => '?',
    }
}

/// Parse one rank "code": either a single rank char (`J`) or a doubled
/// rank char (`TT`), both meaning the same rank.
fn parse_rank_code(s: &str) -> Result<u8> {
    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        [a] => rank_from_char(*a),
        [a, b] if a.eq_ignore_ascii_case(b) => rank_from_char(*a),
        _ => Err(EngineError::InvalidQuery {
            query: s.to_string(),
            reason: "malformed rank constraint".to_string(),
        }),
    }
}

fn parse_rank_constraint(token: &str) -> Result<RankConstraint> {
    if let Some((lo, hi)) = token.split_once('-') {
        let lo_rank = parse_rank_code(lo)?;
        let hi_rank = parse_rank_code(hi)?;
        if lo_rank > hi_rank {
            return Err(EngineError::InvalidQuery {
                query: token.to_string(),
                reason: "range lower bound exceeds upper bound".to_string(),
            });
        }
        return Ok(RankConstraint::Range(lo_rank, hi_rank));
    }
    if let Some(base) = token.strip_suffix('+') {
        return Ok(RankConstraint::Threshold(parse_rank_code(base)?));
    }
    Ok(RankConstraint::Exact(parse_rank_code(token)?))
}

/// True iff `token` parses as a rank constraint (used to distinguish rank
/// tokens from modifier keywords while scanning).
fn looks_like_rank_token(token: &str) -> bool {
    parse_rank_constraint(token).is_ok()
}

impl Query {
    /// Parse a query string such as `pair:TT+:ds:conn`.
    pub fn parse(s: &str) -> Result<Query> {
        let mut parts = s.split(':');
        let kind_str = parts.next().ok_or_else(|| EngineError::InvalidQuery {
            query: s.to_string(),
            reason: "empty query".to_string(),
        })?;
        let kind = QueryKind::from_str(kind_str)?;

        let mut rank = None;
        let mut suited = SuitedConstraint::None;
        let mut connected = false;

        for token in parts {
            match token {
                "ds" => suited = SuitedConstraint::DoubleSuited,
                "ss" => suited = SuitedConstraint::SingleSuited,
                "conn" => connected = true,
                _ if looks_like_rank_token(token) => {
                    if rank.is_some() {
                        return Err(EngineError::InvalidQuery {
                            query: s.to_string(),
                            reason: "multiple rank constraints given".to_string(),
                        });
                    }
                    rank = Some(parse_rank_constraint(token)?);
                }
                other => {
                    return Err(EngineError::InvalidQuery {
                        query: s.to_string(),
                        reason: format!("unknown modifier {other:?}"),
                    })
                }
            }
        }

        Ok(Query { kind, rank, suited, connected })
    }

    fn rank_token(&self, r: RankConstraint) -> String {
        let fmt_rank = |rank: u8| -> String {
            if self.kind.doubled_rank_notation() {
                let c = rank_to_char(rank);
                format!("{c}{c}")
            } else {
                rank_to_char(rank).to_string()
            }
        };
        match r {
            RankConstraint::Exact(rank) => fmt_rank(rank),
            RankConstraint::Threshold(rank) => format!("{}+", fmt_rank(rank)),
            RankConstraint::Range(lo, hi) => format!("{}-{}", fmt_rank(lo), fmt_rank(hi)),
        }
    }

    /// Canonical string form. `describe(parse(q))` reparses to a
    /// structurally identical `Query` for every valid `q`.
    pub fn describe(&self) -> String {
        let mut out = self.kind.as_str().to_string();
        if let Some(r) = self.rank {
            out.push(':');
            out.push_str(&self.rank_token(r));
        }
        if self.suited == SuitedConstraint::DoubleSuited {
            out.push_str(":ds");
        } else if self.suited == SuitedConstraint::SingleSuited {
            out.push_str(":ss");
        }
        if self.connected {
            out.push_str(":conn");
        }
        out
    }

    /// Test whether a concrete 4/5/6-card hole set matches this query.
    pub fn matches(&self, hole: &[Card]) -> bool {
        let kind_ok = match self.kind {
            QueryKind::Any => true,
            QueryKind::Pair => matches_pair(hole, self.rank),
            QueryKind::DoublePair => matches_double_pair(hole, self.rank),
            QueryKind::Run => matches_run(hole, self.rank),
            QueryKind::Broadway => matches_broadway(hole),
        };
        if !kind_ok {
            return false;
        }
        if self.connected && !is_rundown_shaped(hole) {
            return false;
        }
        match self.suited {
            SuitedConstraint::None => true,
            SuitedConstraint::SingleSuited => has_suited_pair(hole),
            SuitedConstraint::DoubleSuited => has_double_suited(hole),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

fn satisfies(rank: u8, constraint: Option<RankConstraint>) -> bool {
    match constraint {
        None => true,
        Some(RankConstraint::Exact(r)) => rank == r,
        Some(RankConstraint::Threshold(r)) => rank >= r,
        Some(RankConstraint::Range(lo, hi)) => rank >= lo && rank <= hi,
    }
}

fn rank_counts(hole: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in hole {
        counts[c.rank as usize] += 1;
    }
    counts
}

fn matches_pair(hole: &[Card], constraint: Option<RankConstraint>) -> bool {
    let counts = rank_counts(hole);
    (2..=14u8).any(|r| counts[r as usize] >= 2 && satisfies(r, constraint))
}

fn matches_double_pair(hole: &[Card], constraint: Option<RankConstraint>) -> bool {
    let counts = rank_counts(hole);
    let pair_ranks: Vec<u8> = (2..=14u8).filter(|&r| counts[r as usize] >= 2).collect();
    if pair_ranks.len() < 2 {
        return false;
    }
    match constraint {
        None => true,
        Some(_) => pair_ranks.iter().any(|&r| satisfies(r, constraint)),
    }
}

fn unique_ranks(hole: &[Card]) -> Vec<u8> {
    let mut ranks: Vec<u8> = hole.iter().map(|c| c.rank).collect();
    ranks.sort_unstable();
    ranks.dedup();
    ranks
}

/// Lowest card of the tightest rundown window the hole cards fit in,
/// trying the ace-low alias (ace counted as rank 1) when it yields a
/// tighter fit than ace-high.
fn rundown_low(hole: &[Card]) -> Option<u8> {
    let ranks = unique_ranks(hole);
    if ranks.is_empty() {
        return None;
    }
    let high_span = ranks.last().unwrap() - ranks.first().unwrap();

    let mut low_aliased: Vec<u8> = ranks.iter().map(|&r| if r == 14 { 1 } else { r }).collect();
    low_aliased.sort_unstable();
    low_aliased.dedup();
    let low_span = low_aliased.last().unwrap() - low_aliased.first().unwrap();

    if low_span < high_span {
        Some(*low_aliased.first().unwrap())
    } else {
        Some(*ranks.first().unwrap())
    }
}

fn is_rundown_shaped(hole: &[Card]) -> bool {
    let ranks = unique_ranks(hole);
    if ranks.len() < 2 {
        return false;
    }
    let high_span = ranks.last().unwrap() - ranks.first().unwrap();
    let mut low_aliased: Vec<u8> = ranks.iter().map(|&r| if r == 14 { 1 } else { r }).collect();
    low_aliased.sort_unstable();
    low_aliased.dedup();
    let low_span = low_aliased.last().unwrap() - low_aliased.first().unwrap();
    high_span <= 4 || low_span <= 4
}

fn matches_run(hole: &[Card], constraint: Option<RankConstraint>) -> bool {
    if !is_rundown_shaped(hole) {
        return false;
    }
    match rundown_low(hole) {
        Some(low) => satisfies(low, constraint),
        None => false,
    }
}

fn matches_broadway(hole: &[Card]) -> bool {
    hole.iter().all(|c| c.rank >= 10)
}

fn has_suited_pair(hole: &[Card]) -> bool {
    for suit_idx in 0..4 {
        if hole.iter().filter(|c| c.suit.index() == suit_idx).count() >= 2 {
            return true;
        }
    }
    false
}

/// Double-suited: two disjoint pairs of same-suited cards, e.g. 2 spades
/// and 2 hearts among the hole cards (covering 4 of the hole's cards).
fn has_double_suited(hole: &[Card]) -> bool {
    let mut suits_with_pair = 0;
    for suit_idx in 0..4 {
        if hole.iter().filter(|c| c.suit.index() == suit_idx).count() >= 2 {
            suits_with_pair += 1;
        }
    }
    suits_with_pair >= 2
}
