//! The pre-computed probability-matrix resource consumed by the equity
//! calculator, modeled as an injected collaborator rather than something
//! the core loads itself.
//!
//! A bundled `InMemoryMatrixProvider` is the one default implementation,
//! constructible directly from a [`crate::simulator::SimulationResult`] or
//! via `serde_json` from a stored matrix file — whether the resource is a
//! bundled asset, a blob-store fetch, or a live simulation is isolated
//! behind this trait so the decision code never depends on which.

use crate::omaha::Variant;
use crate::simulator::{CategoryStats, SimulationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixMetadata {
    pub iterations: u64,
    pub seed: u64,
}

/// A (gameVariant, playerCount)-keyed resource: metadata, hand-type
/// distribution, pairwise probability matrix, overall win rate. Exact
/// serialization is a collaborator's concern; this struct is the shared
/// typed shape both the bundled in-memory provider and any JSON loader
/// produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecomputedMatrix {
    pub metadata: MatrixMetadata,
    pub hand_type_distribution: [CategoryStatsDto; 9],
    pub probability_matrix: [[f64; 9]; 9],
    pub overall_win_rate: f64,
}

/// Serializable mirror of [`CategoryStats`] — kept separate so the
/// simulator's in-process type doesn't need to carry `serde` derives on a
/// hot-path struct it never serializes itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryStatsDto {
    pub count: u64,
    pub percentage: f64,
    pub win_rate: f64,
}

impl From<CategoryStats> for CategoryStatsDto {
    fn from(s: CategoryStats) -> Self {
        CategoryStatsDto {
            count: s.count,
            percentage: s.percentage,
            win_rate: s.win_rate,
        }
    }
}

impl PrecomputedMatrix {
    pub fn from_simulation_result(seed: u64, result: &SimulationResult) -> Self {
        let mut hand_type_distribution = [CategoryStatsDto {
            count: 0,
            percentage: 0.0,
            win_rate: 0.0,
        }; 9];
        for (i, stats) in result.hand_type_distribution.iter().enumerate() {
            hand_type_distribution[i] = (*stats).into();
        }
        PrecomputedMatrix {
            metadata: MatrixMetadata {
                iterations: result.iterations_completed,
                seed,
            },
            hand_type_distribution,
            probability_matrix: result.probability_matrix,
            overall_win_rate: result.overall_win_rate,
        }
    }
}

/// Abstract reader the equity calculator pulls pre-computed matrices
/// through. Nothing downstream assumes one is present — callers that skip
/// wiring a provider simply fall back to the matrix-free heuristic path in
/// [`crate::equity`].
pub trait MatrixProvider: Send + Sync {
    fn get(&self, variant: Variant, player_count: usize) -> Option<PrecomputedMatrix>;
}

/// Default concurrent-map-backed provider. A `last writer wins` `put` is
/// sufficient since entries are functionally determined by key.
#[derive(Debug, Default)]
pub struct InMemoryMatrixProvider {
    entries: HashMap<(VariantKey, usize), PrecomputedMatrix>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VariantKey {
    Plo4,
    Plo5,
    Plo6,
}

fn key_of(variant: Variant) -> VariantKey {
    match variant {
        Variant::Plo4 => VariantKey::Plo4,
        Variant::Plo5 => VariantKey::Plo5,
        Variant::Plo6 => VariantKey::Plo6,
    }
}

impl InMemoryMatrixProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, variant: Variant, player_count: usize, matrix: PrecomputedMatrix) {
        self.entries.insert((key_of(variant), player_count), matrix);
    }
}

impl MatrixProvider for InMemoryMatrixProvider {
    fn get(&self, variant: Variant, player_count: usize) -> Option<PrecomputedMatrix> {
        self.entries.get(&(key_of(variant), player_count)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::simulator::{self, SimulationConfig};

    #[test]
    fn in_memory_provider_roundtrips_a_simulation_result() {
        let config = SimulationConfig {
            variant: Variant::Plo4,
            player_count: 3,
            iterations: 500,
            seed: Some(42),
            hero_hole: Card::parse_many("As Ks Qh Jh").unwrap(),
            board: vec![],
        };
        let result = simulator::run(&config, None).unwrap();
        let matrix = PrecomputedMatrix::from_simulation_result(42, &result);

        let mut provider = InMemoryMatrixProvider::new();
        provider.put(Variant::Plo4, 3, matrix);

        let fetched = provider.get(Variant::Plo4, 3).unwrap();
        assert_eq!(fetched.metadata.seed, 42);
        assert!(provider.get(Variant::Plo4, 4).is_none());
    }

    #[test]
    fn serializes_to_json_and_back() {
        let matrix = PrecomputedMatrix {
            metadata: MatrixMetadata { iterations: 100, seed: 7 },
            hand_type_distribution: [CategoryStatsDto { count: 0, percentage: 0.0, win_rate: 0.0 }; 9],
            probability_matrix: [[0.0; 9]; 9],
            overall_win_rate: 0.2,
        };
        let json = serde_json::to_string(&matrix).unwrap();
        let back: PrecomputedMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metadata.seed, 7);
        assert!((back.overall_win_rate - 0.2).abs() < 1e-9);
    }
}
