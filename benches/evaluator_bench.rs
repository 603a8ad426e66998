//! Benchmarks for the hand evaluator and the Monte Carlo simulator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use omaha_engine::card::Card;
use omaha_engine::evaluator::evaluate_5;
use omaha_engine::omaha::{evaluate_omaha, Variant};
use omaha_engine::simulator::{self, SimulationConfig};

fn five_card_evaluate_benchmark(c: &mut Criterion) {
    let hand: [Card; 5] = Card::parse_many("Ah Kh Qh Jh Th").unwrap().try_into().unwrap();

    c.bench_function("evaluate_5_straight_flush", |b| {
        b.iter(|| evaluate_5(black_box(&hand)))
    });
}

fn omaha_four_card_evaluate_benchmark(c: &mut Criterion) {
    let hole = Card::parse_many("Ah Kh 2c 3d").unwrap();
    let board = Card::parse_many("Qh Jh 5c").unwrap();

    c.bench_function("evaluate_omaha_plo4_flop", |b| {
        b.iter(|| evaluate_omaha(black_box(Variant::Plo4), black_box(&hole), black_box(&board)).unwrap())
    });
}

fn omaha_five_card_evaluate_benchmark(c: &mut Criterion) {
    let hole = Card::parse_many("Ah Kh 2c 3d 4s").unwrap();
    let board = Card::parse_many("Qh Jh 5c Tc 9c").unwrap();

    c.bench_function("evaluate_omaha_plo5_river", |b| {
        b.iter(|| evaluate_omaha(black_box(Variant::Plo5), black_box(&hole), black_box(&board)).unwrap())
    });
}

fn simulation_1000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("simulate_plo4_1000_iterations_6max", |b| {
        b.iter(|| {
            let config = SimulationConfig {
                variant: Variant::Plo4,
                player_count: 6,
                iterations: 1_000,
                seed: Some(42),
                hero_hole: Card::parse_many("Ah Kh 2c 3d").unwrap(),
                board: Vec::new(),
            };
            simulator::run(black_box(&config), None).unwrap()
        })
    });
}

criterion_group!(
    benches,
    five_card_evaluate_benchmark,
    omaha_four_card_evaluate_benchmark,
    omaha_five_card_evaluate_benchmark,
    simulation_1000_iterations_benchmark,
);
criterion_main!(benches);
