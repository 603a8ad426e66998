//! Omaha decision engine: hand evaluator, flop-texture analyzer, Monte
//! Carlo simulator, opponent-range estimator, equity calculator, outs
//! counter, pot-odds/SPR math, and a style-parameterized action
//! recommender for PLO4/PLO5/PLO6.
//!
//! [`recommend`] is the single entry point a transport layer (HTTP, CLI,
//! whatever) calls per request: it wires the typed subcomponents below
//! into the data flow described at the crate's design boundary — hand
//! evaluation and texture analysis feed the range estimator and equity
//! calculator, which combine with pot-odds/outs/SPR into an action, which
//! the bet sizer then turns into a chip amount when the action is bet or
//! raise. Every subcomponent is pure and synchronous; the only shared
//! mutable state is the equity cache, which is fully optional and
//! injected rather than owned by this crate (see [`cache`], [`matrix`]).

pub mod cache;
pub mod card;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod omaha;
pub mod outs;
pub mod potodds;
pub mod query;
pub mod range;
pub mod recommender;
pub mod request;
pub mod simulator;
pub mod sizer;
pub mod style;
pub mod texture;

use std::time::Instant;

use cache::{CacheKey, EquityCache};
use card::{Card, Deck};
use error::{EngineError, Result};
use evaluator::HandCategory;
use matrix::MatrixProvider;
use omaha::Variant;
use potodds::ImpliedOdds;
use range::{
    ActionSize, PositionCategory, PreflopAction, RangeEstimateInput, RangeEstimator, StreetAction,
    VillainActionType,
};
use recommender::ActionRecommender;
use request::{
    AnalysisDto, BoardTextureDto, CurrentHandDto, DataSourceDto, EquityDto, GameVariant,
    OpponentRangeDto, OutsDto, Position, PotOddsDto, RecommendRequest, RecommendResponse,
    RecommendationDto, Street, VillainAction,
};
use sizer::compute_sizing;
use style::Style;
use texture::FlopTexture;

/// Fallback effective stack used when a caller omits `stackSize` (or sends
/// `0`) — deep enough that SPR-zoned sizing and commitment logic behave as
/// "stacks are not a constraint" rather than erroring out. Documented as an
/// implementer's choice in `DESIGN.md`; the wire schema marks `stackSize`
/// optional without specifying a default.
const DEFAULT_EFFECTIVE_STACK: f64 = 100_000.0;

/// Minimum pot size used for SPR/sizing math when a caller omits `potSize`
/// — avoids a division by zero rather than implying "the pot is empty".
const MIN_POT_SIZE: f64 = 1.0;

/// Injectable collaborators the recommender may consult. Both are
/// optional — a caller with neither simply runs the heuristic-only equity
/// path and recomputes every call.
#[derive(Default)]
pub struct Engine<'a> {
    pub matrix_provider: Option<&'a dyn MatrixProvider>,
    pub equity_cache: Option<&'a dyn EquityCache>,
}

impl<'a> Engine<'a> {
    pub fn new() -> Self {
        Engine {
            matrix_provider: None,
            equity_cache: None,
        }
    }

    pub fn with_matrix_provider(mut self, provider: &'a dyn MatrixProvider) -> Self {
        self.matrix_provider = Some(provider);
        self
    }

    pub fn with_equity_cache(mut self, cache: &'a dyn EquityCache) -> Self {
        self.equity_cache = Some(cache);
        self
    }

    /// Produce a full recommendation for one request. Postflop only — a
    /// caller sending a preflop request (empty board) gets
    /// [`EngineError::InsufficientData`]: preflop equity is not computed
    /// here, and callers route it through a separate preflop-specific path.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let start = Instant::now();
        let variant: Variant = request.game_variant.into();
        log::debug!(
            "recommend: {:?}, street {:?}, {} players, style {:?}",
            variant, request.street, request.players_in_hand, request.hero_style
        );

        if request.hole_cards.len() != variant.hole_count() {
            return Err(EngineError::VariantMismatch {
                expected: variant.hole_count(),
                actual: request.hole_cards.len(),
            });
        }
        if request.players_in_hand < 2 || request.players_in_hand > variant.max_players() {
            return Err(EngineError::InvalidInput(format!(
                "playersInHand must be between 2 and {} for this variant",
                variant.max_players()
            )));
        }
        if request.board.is_empty() {
            return Err(EngineError::InsufficientData);
        }
        if request.pot_size < 0.0 || request.to_call < 0.0 || request.stack_size < 0.0 {
            return Err(EngineError::InvalidInput(
                "potSize, toCall, and stackSize must be non-negative".to_string(),
            ));
        }

        let street = request.resolved_street();
        let hole = &request.hole_cards;
        let board = &request.board;

        let hero_rank = omaha::evaluate_omaha(variant, hole, board)?;
        let hero_category = hero_rank.category;

        let excluded: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
        let unseen = Deck::new().excluding(&excluded).cards().to_vec();
        let hero_is_nuts = omaha::is_nuts(variant, hole, board, hero_rank, &unseen)?;

        let flop_texture: Option<FlopTexture> = if board.len() >= 3 {
            Some(texture::analyze_flop(&board[0..3])?)
        } else {
            None
        };

        let outs_result = outs::count_outs(variant, hole, board, &[])?;

        let style_profile = Style::from(request.hero_style).profile();

        let facing_bet = request.to_call > 0.0;
        let effective_stack = if request.stack_size > 0.0 {
            request.stack_size
        } else {
            DEFAULT_EFFECTIVE_STACK
        };
        let pot_size = if request.pot_size > 0.0 {
            request.pot_size
        } else {
            MIN_POT_SIZE
        };

        let (pot_odds_percent, spr_zone, implied_odds, pot_odds_dto) = if facing_bet {
            let odds = potodds::compute_pot_odds(pot_size, request.to_call, effective_stack)?;
            (
                odds.required_equity_percent,
                odds.spr_zone,
                odds.implied_odds,
                PotOddsDto::from(odds),
            )
        } else {
            let (spr, zone) = potodds::compute_spr(pot_size, effective_stack)?;
            let implied = ImpliedOdds::from_ratio(spr);
            let dto = PotOddsDto {
                call_cost_percent: 0.0,
                required_equity_percent: 0.0,
                stack_to_pot_ratio: spr,
                spr_zone: zone.label().to_string(),
                implied_odds: implied_odds_label(implied).to_string(),
            };
            (0.0, zone, implied, dto)
        };

        let range = self.estimate_range(request, street, flop_texture.as_ref())?;

        let num_opponents = request.players_in_hand - 1;
        let matrix = self
            .matrix_provider
            .and_then(|p| p.get(variant, request.players_in_hand));
        let matrix_version = matrix.as_ref().map(|m| m.metadata.seed).unwrap_or(0);

        let draw_equity_percent = if street == Street::River {
            None
        } else {
            Some(outs_result.draw_equity_percent)
        };

        let cache_key = CacheKey {
            hero_category,
            board_texture_key: flop_texture
                .as_ref()
                .map(|t| format!("{:?}", t.category))
                .unwrap_or_else(|| "preflop".to_string()),
            range_descriptor_key: range.tag.clone(),
            num_opponents,
            matrix_version,
        };

        let equity_estimate = match self.equity_cache.and_then(|c| c.get(&cache_key)) {
            Some(cached) => cached,
            None => {
                let input = equity::EquityInput {
                    hero_category,
                    hero_is_nuts,
                    opponent_range: &range,
                    num_opponents,
                    draw_equity_percent,
                    matrix: matrix.as_ref(),
                };
                let estimate = equity::EquityCalculator::estimate(&input);
                if let Some(cache) = self.equity_cache {
                    cache.put(cache_key, estimate.clone());
                }
                estimate
            }
        };

        let in_position = matches!(request.position, Position::BTN | Position::CO);

        let recommender_input = recommender::RecommenderInput {
            equity_percent: equity_estimate.equity_percent,
            pot_odds_percent,
            implied_odds,
            hero_hand_label: hero_rank.label(),
            hero_is_nuts,
            outs: &outs_result,
            spr_zone,
            in_position,
            board_texture: flop_texture.as_ref(),
            facing_bet,
            to_call: request.to_call,
            pot_size,
            effective_stack,
            style: style_profile,
        };
        let recommendation = ActionRecommender::recommend(&recommender_input);

        let sizing = if matches!(
            recommendation.action,
            recommender::Action::Bet | recommender::Action::Raise
        ) {
            compute_sizing(pot_size, request.to_call, effective_stack, spr_zone, &style_profile).ok()
        } else {
            None
        };

        let threats = board_threats(flop_texture.as_ref());

        let response = RecommendResponse {
            game_variant: GameVariant::from(variant),
            street,
            hole_cards: hole.clone(),
            board: board.clone(),
            hero_style: request.hero_style,
            analysis: AnalysisDto {
                current_hand: Some(CurrentHandDto {
                    made_hand: hero_rank.label(),
                    is_nuts: hero_is_nuts,
                    rank_value: hero_rank.as_u32(),
                }),
                board_texture: flop_texture.map(BoardTextureDto::from),
                equity: Some(EquityDto {
                    equity_percent: equity_estimate.equity_percent,
                    vs_range_description: equity_estimate.vs_range_description.clone(),
                    confidence: equity_confidence_label(equity_estimate.confidence).to_string(),
                }),
                outs: Some(OutsDto::from(&outs_result)),
                pot_odds: Some(pot_odds_dto),
                threats,
            },
            opponent_range: OpponentRangeDto::from(&range),
            recommendation: RecommendationDto::from_recommendation(
                &recommendation,
                sizing,
                request.hero_style,
            ),
            data_source: DataSourceDto {
                hand_eval: "omaha 2-hole x 3-board combinatorial enumeration over a fixed 5-card lookup ranker",
                board_texture: "rule-based suitedness/connectivity/pairing classifier over the flop",
                equity_estimate: "range-weighted pairwise category win rate blended with draw equity",
            },
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        log::info!(
            "recommend: {} in {:.2}ms (confidence {:.2})",
            response.recommendation.action, response.latency_ms, response.recommendation.confidence
        );

        Ok(response)
    }

    /// Build the [`RangeEstimateInput`] from the request's position and
    /// observed villain actions, and delegate to [`RangeEstimator`].
    ///
    /// The wire schema carries villain actions as bare type tokens
    /// with no associated pot-relative size, so every bet/raise/check-raise
    /// is sized from the live `toCall`/`potSize` fraction when the request
    /// is currently facing a bet, and as [`ActionSize::Medium`] otherwise —
    /// a reasonable stand-in given the schema has no richer per-action
    /// sizing field.
    fn estimate_range(
        &self,
        request: &RecommendRequest,
        street: Street,
        texture: Option<&FlopTexture>,
    ) -> Result<range::Range> {
        let position = position_category(request.position);
        let preflop_action = classify_preflop_action(request.position, &request.villain_actions, street);

        let action_size = if request.to_call > 0.0 && request.pot_size > 0.0 {
            ActionSize::from_pot_fraction(request.to_call / request.pot_size)
        } else {
            ActionSize::Medium
        };

        let street_actions: Vec<StreetAction> = request
            .villain_actions
            .iter()
            .map(|a| StreetAction {
                action_type: villain_action_type(*a),
                size: action_size,
            })
            .collect();

        let input = RangeEstimateInput {
            position,
            preflop_action,
            street_actions: &street_actions,
            texture,
            players_in_hand: request.players_in_hand,
        };
        RangeEstimator::estimate(&input)
    }
}

fn position_category(position: Position) -> PositionCategory {
    match position {
        Position::UTG | Position::MP | Position::Unknown => PositionCategory::EarlyOrMiddle,
        Position::HJ | Position::CO | Position::BTN => PositionCategory::CutoffOrButton,
        Position::SB | Position::BB => PositionCategory::BlindDefense,
    }
}

fn classify_preflop_action(
    position: Position,
    actions: &[VillainAction],
    street: Street,
) -> PreflopAction {
    if actions.contains(&VillainAction::ThreeBet) {
        return PreflopAction::ThreeBet;
    }
    if actions.contains(&VillainAction::CheckRaise) {
        return PreflopAction::CheckRaise;
    }
    if street != Street::Preflop && street != Street::Flop && actions.contains(&VillainAction::Bet) {
        return PreflopAction::PostflopBigBet;
    }
    if matches!(position, Position::SB | Position::BB) {
        return PreflopAction::BlindDefend;
    }
    PreflopAction::Open
}

fn villain_action_type(action: VillainAction) -> VillainActionType {
    match action {
        VillainAction::Check => VillainActionType::Check,
        VillainAction::Call => VillainActionType::Call,
        VillainAction::Bet => VillainActionType::Bet,
        VillainAction::Raise | VillainAction::ThreeBet => VillainActionType::Raise,
        VillainAction::CheckRaise => VillainActionType::CheckRaise,
    }
}

fn implied_odds_label(implied: ImpliedOdds) -> &'static str {
    match implied {
        ImpliedOdds::Poor => "poor",
        ImpliedOdds::Moderate => "moderate",
        ImpliedOdds::Good => "good",
        ImpliedOdds::Excellent => "excellent",
    }
}

fn equity_confidence_label(confidence: equity::Confidence) -> &'static str {
    match confidence {
        equity::Confidence::Low => "low",
        equity::Confidence::Medium => "medium",
        equity::Confidence::High => "high",
    }
}

/// Board-level cautions, independent of hero's specific holding — distinct
/// from `recommendation.warnings`, which are phrased relative to hero's
/// hand category.
fn board_threats(texture: Option<&FlopTexture>) -> Vec<String> {
    let Some(t) = texture else {
        return Vec::new();
    };
    let mut threats = Vec::new();
    if t.is_paired {
        threats.push("board is paired — full houses and quads are live".to_string());
    }
    if t.is_triplet {
        threats.push("board is trips — any pocket pair makes a full house".to_string());
    }
    if t.flush_draw_possible() {
        threats.push("flush draw is live on this board".to_string());
    }
    if t.straight_draw_possible() {
        threats.push("straight draw is live on this board".to_string());
    }
    if matches!(
        t.nut_danger,
        texture::NutDanger::High | texture::NutDanger::VeryHigh | texture::NutDanger::Extreme
    ) {
        threats.push(format!("{:?} texture carries elevated nut danger", t.category));
    }
    threats
}

/// Backstop so `HandCategory::ALL` stays reachable from the crate root for
/// callers iterating every category (e.g. building a custom matrix
/// provider) without depending on an internal module's re-export path.
pub fn all_hand_categories() -> [HandCategory; 9] {
    HandCategory::ALL
}
