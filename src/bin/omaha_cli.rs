//! Thin command-line surface over the `omaha_engine` library: a `simulate`
//! subcommand exercising the Monte Carlo engine directly, and a `recommend`
//! subcommand exercising the full `Engine::recommend` pipeline. No
//! persistence happens here — every result is printed as JSON to stdout.

use clap::{Parser, Subcommand, ValueEnum};
use omaha_engine::card::Card;
use omaha_engine::matrix::PrecomputedMatrix;
use omaha_engine::omaha::Variant;
use omaha_engine::request::{GameVariant, HeroStyle, Position, RecommendRequest, VillainAction};
use omaha_engine::simulator::{self, SimulationConfig};
use omaha_engine::Engine;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "omaha-cli", version, about = "Omaha (PLO4/5/6) decision engine command-line interface")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum CliVariant {
    Omaha4,
    Omaha5,
    Omaha6,
}

impl From<CliVariant> for GameVariant {
    fn from(v: CliVariant) -> Self {
        match v {
            CliVariant::Omaha4 => GameVariant::Omaha4,
            CliVariant::Omaha5 => GameVariant::Omaha5,
            CliVariant::Omaha6 => GameVariant::Omaha6,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum CliStyle {
    Nit,
    Rock,
    Reg,
    Tag,
    Lag,
    Fish,
}

impl From<CliStyle> for HeroStyle {
    fn from(s: CliStyle) -> Self {
        match s {
            CliStyle::Nit => HeroStyle::Nit,
            CliStyle::Rock => HeroStyle::Rock,
            CliStyle::Reg => HeroStyle::Reg,
            CliStyle::Tag => HeroStyle::Tag,
            CliStyle::Lag => HeroStyle::Lag,
            CliStyle::Fish => HeroStyle::Fish,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum CliPosition {
    Utg,
    Mp,
    Hj,
    Co,
    Btn,
    Sb,
    Bb,
    Unknown,
}

impl From<CliPosition> for Position {
    fn from(p: CliPosition) -> Self {
        match p {
            CliPosition::Utg => Position::UTG,
            CliPosition::Mp => Position::MP,
            CliPosition::Hj => Position::HJ,
            CliPosition::Co => Position::CO,
            CliPosition::Btn => Position::BTN,
            CliPosition::Sb => Position::SB,
            CliPosition::Bb => Position::BB,
            CliPosition::Unknown => Position::Unknown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum CliVillainAction {
    Check,
    Call,
    Bet,
    Raise,
    Threebet,
    CheckRaise,
}

impl From<CliVillainAction> for VillainAction {
    fn from(a: CliVillainAction) -> Self {
        match a {
            CliVillainAction::Check => VillainAction::Check,
            CliVillainAction::Call => VillainAction::Call,
            CliVillainAction::Bet => VillainAction::Bet,
            CliVillainAction::Raise => VillainAction::Raise,
            CliVillainAction::Threebet => VillainAction::ThreeBet,
            CliVillainAction::CheckRaise => VillainAction::CheckRaise,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a Monte Carlo simulation and print the aggregated result as JSON.
    Simulate {
        #[arg(long, value_enum)]
        variant: CliVariant,
        /// Hero's hole cards, e.g. "As Ks Qh Jh".
        #[arg(long)]
        hole: String,
        /// Board cards fixed for every iteration; may be empty, 3, 4, or 5 cards.
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long)]
        players: usize,
        #[arg(long, default_value_t = 50_000)]
        iterations: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the bundled matrix-format JSON alongside the raw result.
        #[arg(long, default_value_t = false)]
        emit_matrix: bool,
    },
    /// Produce a full action recommendation and print it as JSON.
    Recommend {
        #[arg(long, value_enum)]
        variant: CliVariant,
        #[arg(long)]
        hole: String,
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, value_enum, default_value = "mp")]
        position: CliPosition,
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long, default_value_t = 0.0)]
        pot: f64,
        #[arg(long, default_value_t = 0.0)]
        to_call: f64,
        #[arg(long, default_value_t = 0.0)]
        stack: f64,
        /// May be repeated, e.g. `--villain-action bet --villain-action raise`.
        #[arg(long, value_enum)]
        villain_action: Vec<CliVillainAction>,
        #[arg(long, value_enum, default_value = "reg")]
        style: CliStyle,
    },
}

fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    Card::parse_many(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::try_init().ok();
    log::info!("omaha-cli starting, command: {:?}", cli.command);

    let result = match cli.command {
        Command::Simulate {
            variant,
            hole,
            board,
            players,
            iterations,
            seed,
            emit_matrix,
        } => run_simulate(variant, &hole, &board, players, iterations, seed, emit_matrix),
        Command::Recommend {
            variant,
            hole,
            board,
            position,
            players,
            pot,
            to_call,
            stack,
            villain_action,
            style,
        } => run_recommend(variant, &hole, &board, position, players, pot, to_call, stack, villain_action, style),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", serde_json::json!({ "error": message }));
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    variant: CliVariant,
    hole: &str,
    board: &str,
    players: usize,
    iterations: u64,
    seed: Option<u64>,
    emit_matrix: bool,
) -> Result<(), String> {
    let game_variant: GameVariant = variant.into();
    let engine_variant: Variant = game_variant.into();
    let hero_hole = parse_cards(hole)?;
    let board_cards = parse_cards(board)?;

    let config = SimulationConfig {
        variant: engine_variant,
        player_count: players,
        iterations,
        seed,
        hero_hole,
        board: board_cards,
    };

    let result = simulator::run(&config, None).map_err(|e| e.to_string())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&SimulationResultView::from(&result)).unwrap()
    );

    if emit_matrix {
        let matrix = PrecomputedMatrix::from_simulation_result(seed.unwrap_or(0), &result);
        println!("{}", serde_json::to_string_pretty(&matrix).unwrap());
    }

    Ok(())
}

/// Serializable mirror of [`simulator::SimulationResult`] — the simulator's
/// in-process type carries no `serde` derives of its own, matching the
/// pattern in [`omaha_engine::matrix`].
#[derive(serde::Serialize)]
struct SimulationResultView {
    iterations_completed: u64,
    truncated: bool,
    overall_win_rate: f64,
    hand_type_distribution: Vec<CategoryStatsView>,
}

#[derive(serde::Serialize)]
struct CategoryStatsView {
    category: &'static str,
    count: u64,
    percentage: f64,
    win_rate: f64,
}

impl From<&simulator::SimulationResult> for SimulationResultView {
    fn from(r: &simulator::SimulationResult) -> Self {
        SimulationResultView {
            iterations_completed: r.iterations_completed,
            truncated: r.truncated,
            overall_win_rate: r.overall_win_rate,
            hand_type_distribution: omaha_engine::all_hand_categories()
                .iter()
                .map(|&cat| CategoryStatsView {
                    category: cat.label(),
                    count: r.hand_type_distribution[cat as usize].count,
                    percentage: r.hand_type_distribution[cat as usize].percentage,
                    win_rate: r.hand_type_distribution[cat as usize].win_rate,
                })
                .collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_recommend(
    variant: CliVariant,
    hole: &str,
    board: &str,
    position: CliPosition,
    players: usize,
    pot: f64,
    to_call: f64,
    stack: f64,
    villain_action: Vec<CliVillainAction>,
    style: CliStyle,
) -> Result<(), String> {
    let request = RecommendRequest {
        game_variant: variant.into(),
        street: None,
        hole_cards: parse_cards(hole)?,
        board: parse_cards(board)?,
        position: position.into(),
        players_in_hand: players,
        pot_size: pot,
        to_call,
        stack_size: stack,
        villain_actions: villain_action.into_iter().map(VillainAction::from).collect(),
        hero_style: style.into(),
    };

    let engine = Engine::new();
    let response = engine.recommend(&request).map_err(|e| e.to_string())?;
    println!("{}", serde_json::to_string_pretty(&response).unwrap());
    Ok(())
}
