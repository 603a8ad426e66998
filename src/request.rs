//! Typed request/response boundary for the recommender.
//!
//! Every field the wire schema names gets a typed slot here instead of a
//! dynamic object with free-form fields, and internal subcomponents never
//! see this struct directly — `lib.rs::recommend` unpacks it into the
//! narrow typed inputs each subcomponent already expects.

use crate::card::Card;
use crate::omaha::Variant;
use crate::outs::{DrawKind, OutsResult};
use crate::potodds::{ImpliedOdds, PotOdds};
use crate::range::Range;
use crate::recommender::{Action, Alternative, DecisionReason, Reasoning, Recommendation};
use crate::sizer::SizingRecommendation;
use crate::style::Style;
use crate::texture::{Connectivity, FlopTexture, NutDanger, Suitedness, TextureCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    Omaha4,
    Omaha5,
    Omaha6,
}

impl From<GameVariant> for Variant {
    fn from(g: GameVariant) -> Self {
        match g {
            GameVariant::Omaha4 => Variant::Plo4,
            GameVariant::Omaha5 => Variant::Plo5,
            GameVariant::Omaha6 => Variant::Plo6,
        }
    }
}

impl From<Variant> for GameVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Plo4 => GameVariant::Omaha4,
            Variant::Plo5 => GameVariant::Omaha5,
            Variant::Plo6 => GameVariant::Omaha6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Derive from board length when the caller omits an explicit street.
    pub fn from_board_len(len: usize) -> Street {
        match len {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    MP,
    HJ,
    CO,
    BTN,
    SB,
    BB,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Default for Position {
    fn default() -> Self {
        Position::MP
    }
}

impl Position {
    pub fn is_in_position(self, opponent: Position) -> bool {
        // Crude ordinal ordering around the table; the exact seat graph is
        // out of scope — what matters to the recommender is whether hero
        // acts after the last aggressor, approximated here by table order.
        self.seat_order() > opponent.seat_order()
    }

    fn seat_order(self) -> u8 {
        match self {
            Position::UTG => 0,
            Position::MP => 1,
            Position::HJ => 2,
            Position::CO => 3,
            Position::BTN => 4,
            Position::SB => 5,
            Position::BB => 6,
            Position::Unknown => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VillainAction {
    Check,
    Call,
    Bet,
    Raise,
    #[serde(rename = "3bet")]
    ThreeBet,
    CheckRaise,
}

/// Serde-facing mirror of [`Style`] — kept separate so the core style
/// module has no serde dependency of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroStyle {
    Nit,
    Rock,
    Reg,
    Tag,
    Lag,
    Fish,
}

impl Default for HeroStyle {
    fn default() -> Self {
        HeroStyle::Reg
    }
}

impl From<HeroStyle> for Style {
    fn from(h: HeroStyle) -> Self {
        match h {
            HeroStyle::Nit => Style::Nit,
            HeroStyle::Rock => Style::Rock,
            HeroStyle::Reg => Style::Reg,
            HeroStyle::Tag => Style::Tag,
            HeroStyle::Lag => Style::Lag,
            HeroStyle::Fish => Style::Fish,
        }
    }
}

impl From<Style> for HeroStyle {
    fn from(s: Style) -> Self {
        match s {
            Style::Nit => HeroStyle::Nit,
            Style::Rock => HeroStyle::Rock,
            Style::Reg => HeroStyle::Reg,
            Style::Tag => HeroStyle::Tag,
            Style::Lag => HeroStyle::Lag,
            Style::Fish => HeroStyle::Fish,
        }
    }
}

fn default_players_in_hand() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub game_variant: GameVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<Street>,
    pub hole_cards: Vec<Card>,
    #[serde(default)]
    pub board: Vec<Card>,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_players_in_hand")]
    pub players_in_hand: usize,
    #[serde(default)]
    pub pot_size: f64,
    #[serde(default)]
    pub to_call: f64,
    #[serde(default)]
    pub stack_size: f64,
    #[serde(default)]
    pub villain_actions: Vec<VillainAction>,
    #[serde(default)]
    pub hero_style: HeroStyle,
}

impl RecommendRequest {
    pub fn resolved_street(&self) -> Street {
        self.street.unwrap_or_else(|| Street::from_board_len(self.board.len()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentHandDto {
    pub made_hand: String,
    pub is_nuts: bool,
    pub rank_value: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTextureDto {
    pub category: TextureCategoryDto,
    pub suitedness: SuitednessDto,
    pub connectivity: ConnectivityDto,
    pub is_paired: bool,
    pub is_triplet: bool,
    pub flush_draw_possible: bool,
    pub straight_draw_possible: bool,
    pub nut_danger: NutDangerDto,
}

impl From<FlopTexture> for BoardTextureDto {
    fn from(t: FlopTexture) -> Self {
        BoardTextureDto {
            category: t.category.into(),
            suitedness: t.suitedness.into(),
            connectivity: t.connectivity.into(),
            is_paired: t.is_paired,
            is_triplet: t.is_triplet,
            flush_draw_possible: t.flush_draw_possible(),
            straight_draw_possible: t.straight_draw_possible(),
            nut_danger: t.nut_danger.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureCategoryDto {
    MonotoneConnected,
    MonotoneUnconnected,
    TwoToneConnected,
    TwoToneUnconnected,
    RainbowConnected,
    RainbowUnconnected,
    Paired,
    TripletBoard,
}

impl From<TextureCategory> for TextureCategoryDto {
    fn from(c: TextureCategory) -> Self {
        match c {
            TextureCategory::MonotoneConnected => TextureCategoryDto::MonotoneConnected,
            TextureCategory::MonotoneUnconnected => TextureCategoryDto::MonotoneUnconnected,
            TextureCategory::TwoToneConnected => TextureCategoryDto::TwoToneConnected,
            TextureCategory::TwoToneUnconnected => TextureCategoryDto::TwoToneUnconnected,
            TextureCategory::RainbowConnected => TextureCategoryDto::RainbowConnected,
            TextureCategory::RainbowUnconnected => TextureCategoryDto::RainbowUnconnected,
            TextureCategory::Paired => TextureCategoryDto::Paired,
            TextureCategory::TripletBoard => TextureCategoryDto::TripletBoard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitednessDto {
    Monotone,
    TwoTone,
    Rainbow,
}

impl From<Suitedness> for SuitednessDto {
    fn from(s: Suitedness) -> Self {
        match s {
            Suitedness::Monotone => SuitednessDto::Monotone,
            Suitedness::TwoTone => SuitednessDto::TwoTone,
            Suitedness::Rainbow => SuitednessDto::Rainbow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityDto {
    Connected,
    SemiConnected,
    Disconnected,
}

impl From<Connectivity> for ConnectivityDto {
    fn from(c: Connectivity) -> Self {
        match c {
            Connectivity::Connected => ConnectivityDto::Connected,
            Connectivity::SemiConnected => ConnectivityDto::SemiConnected,
            Connectivity::Disconnected => ConnectivityDto::Disconnected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutDangerDto {
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

impl From<NutDanger> for NutDangerDto {
    fn from(n: NutDanger) -> Self {
        match n {
            NutDanger::Low => NutDangerDto::Low,
            NutDanger::Medium => NutDangerDto::Medium,
            NutDanger::High => NutDangerDto::High,
            NutDanger::VeryHigh => NutDangerDto::VeryHigh,
            NutDanger::Extreme => NutDangerDto::Extreme,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityDto {
    pub equity_percent: f64,
    pub vs_range_description: String,
    pub confidence: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutsDto {
    pub to_improve: usize,
    pub has_flush_draw: bool,
    pub has_straight_draw: bool,
    pub draw_kind: String,
    pub draw_equity_percent: f64,
}

impl From<&OutsResult> for OutsDto {
    fn from(o: &OutsResult) -> Self {
        OutsDto {
            to_improve: o.to_improve,
            has_flush_draw: o.has_flush_draw,
            has_straight_draw: o.has_straight_draw,
            draw_kind: match o.draw_kind {
                DrawKind::None => "none",
                DrawKind::Gutshot => "gutshot",
                DrawKind::OpenEnded => "open_ended",
                DrawKind::FlushDraw => "flush_draw",
                DrawKind::Combo => "combo",
            }
            .to_string(),
            draw_equity_percent: o.draw_equity_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotOddsDto {
    pub call_cost_percent: f64,
    pub required_equity_percent: f64,
    pub stack_to_pot_ratio: f64,
    pub spr_zone: String,
    pub implied_odds: String,
}

impl From<PotOdds> for PotOddsDto {
    fn from(p: PotOdds) -> Self {
        PotOddsDto {
            call_cost_percent: p.call_cost_percent,
            required_equity_percent: p.required_equity_percent,
            stack_to_pot_ratio: p.stack_to_pot_ratio,
            spr_zone: p.spr_zone.label().to_string(),
            implied_odds: match p.implied_odds {
                ImpliedOdds::Poor => "poor",
                ImpliedOdds::Moderate => "moderate",
                ImpliedOdds::Good => "good",
                ImpliedOdds::Excellent => "excellent",
            }
            .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hand: Option<CurrentHandDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_texture: Option<BoardTextureDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<EquityDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outs: Option<OutsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pot_odds: Option<PotOddsDto>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentRangeDto {
    pub distribution: [f64; 9],
    pub nut_bias: f64,
    pub draw_heavy: bool,
    pub bluff_frequency: f64,
    pub tag: String,
    pub confidence: String,
}

impl From<&Range> for OpponentRangeDto {
    fn from(r: &Range) -> Self {
        OpponentRangeDto {
            distribution: r.distribution,
            nut_bias: r.nut_bias,
            draw_heavy: r.draw_heavy,
            bluff_frequency: r.bluff_frequency,
            tag: r.tag.clone(),
            confidence: match r.confidence {
                crate::range::Confidence::Low => "low",
                crate::range::Confidence::Medium => "medium",
                crate::range::Confidence::High => "high",
            }
            .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingDto {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
    pub percent_pot: f64,
}

impl From<SizingRecommendation> for SizingDto {
    fn from(s: SizingRecommendation) -> Self {
        SizingDto {
            min: s.min,
            optimal: s.optimal,
            max: s.max,
            percent_pot: s.percent_pot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMetadataDto {
    pub hero_style: HeroStyle,
    pub decision_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeDto {
    pub action: String,
    pub rationale: String,
}

impl From<&Alternative> for AlternativeDto {
    fn from(a: &Alternative) -> Self {
        AlternativeDto {
            action: a.action.label().to_string(),
            rationale: a.rationale.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningDto {
    pub primary: String,
    pub math: String,
    pub strategic: String,
}

impl From<&Reasoning> for ReasoningDto {
    fn from(r: &Reasoning) -> Self {
        ReasoningDto {
            primary: r.primary.clone(),
            math: r.math.clone(),
            strategic: r.strategic.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub action: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingDto>,
    pub reasoning: ReasoningDto,
    pub alternatives: Vec<AlternativeDto>,
    pub warnings: Vec<String>,
    pub metadata: RecommendationMetadataDto,
}

impl RecommendationDto {
    pub fn from_recommendation(rec: &Recommendation, sizing: Option<SizingRecommendation>, hero_style: HeroStyle) -> Self {
        RecommendationDto {
            action: rec.action.label().to_string(),
            confidence: rec.confidence,
            sizing: sizing.map(SizingDto::from),
            reasoning: ReasoningDto::from(&rec.reasoning),
            alternatives: rec.alternatives.iter().map(AlternativeDto::from).collect(),
            warnings: rec.warnings.clone(),
            metadata: RecommendationMetadataDto {
                hero_style,
                decision_reason: rec.decision_reason.tag().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceDto {
    pub hand_eval: &'static str,
    pub board_texture: &'static str,
    pub equity_estimate: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub game_variant: GameVariant,
    pub street: Street,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
    pub hero_style: HeroStyle,
    pub analysis: AnalysisDto,
    pub opponent_range: OpponentRangeDto,
    pub recommendation: RecommendationDto,
    pub data_source: DataSourceDto,
    pub latency_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_round_trips_through_json_with_defaults() {
        let json = r#"{
            "gameVariant": "omaha4",
            "holeCards": ["As", "Ks", "Qh", "Jh"],
            "board": ["Ts", "9s", "2s"],
            "playersInHand": 2
        }"#;
        let request: RecommendRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.game_variant, GameVariant::Omaha4);
        assert_eq!(request.position, Position::MP);
        assert_eq!(request.hero_style, HeroStyle::Reg);
        assert_eq!(request.resolved_street(), Street::Flop);
    }

    #[test]
    fn explicit_street_overrides_board_derived_street() {
        let json = r#"{
            "gameVariant": "omaha4",
            "street": "turn",
            "holeCards": ["As", "Ks", "Qh", "Jh"],
            "board": ["Ts", "9s", "2s"],
            "playersInHand": 2
        }"#;
        let request: RecommendRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.resolved_street(), Street::Turn);
    }

    #[test]
    fn villain_actions_parse_three_bet_token() {
        let json = r#"{
            "gameVariant": "omaha4",
            "holeCards": ["As", "Ks", "Qh", "Jh"],
            "playersInHand": 2,
            "villainActions": ["bet", "3bet"]
        }"#;
        let request: RecommendRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.villain_actions, vec![VillainAction::Bet, VillainAction::ThreeBet]);
    }
}
