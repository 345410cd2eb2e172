use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::engine::GameSimulation;
use crate::types::{CellKind, Direction};

/// Seeded intent chooser for headless runs. Plays the role of the human:
/// it only writes pending intents and never touches the simulation state.
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Scores the four neighbors of the player's tile and returns the best
    /// one as the next intent. Between alignments the result just replaces
    /// the pending intent.
    pub fn choose_intent(&mut self, sim: &GameSimulation) -> Direction {
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let (row, col) = sim.player().tile();
        let nearest_pellet = sim
            .grid()
            .pellet_tiles()
            .into_iter()
            .min_by_key(|tile| manhattan((row, col), *tile));
        let adversary_tiles: Vec<(i32, i32)> = sim
            .adversaries()
            .iter()
            .map(|adversary| adversary.tile())
            .collect();
        let adversary_before = adversary_tiles
            .iter()
            .map(|tile| manhattan((row, col), *tile))
            .min();

        let mut best = Direction::None;
        let mut best_score = f32::NEG_INFINITY;
        for dir in dirs {
            let (dx, dy) = dir.delta();
            let next = (row + dy, col + dx);
            if !sim.grid().is_walkable(next.0, next.1) {
                continue;
            }
            let mut score = 0.0;
            if matches!(
                sim.grid().cell_kind(next.0, next.1),
                CellKind::Pellet | CellKind::PowerPellet
            ) {
                score += 14.0;
            }
            if let Some(pellet) = nearest_pellet {
                let before = manhattan((row, col), pellet);
                let after = manhattan(next, pellet);
                score += (before - after) as f32;
            }
            if let Some(after) = adversary_tiles
                .iter()
                .map(|tile| manhattan(next, *tile))
                .min()
            {
                if sim.power_active() {
                    let before = adversary_before.unwrap_or(after);
                    score += (before - after) as f32 * 1.2;
                } else {
                    score += after as f32 * 0.65;
                    if after <= 2 {
                        score -= 7.0;
                    }
                }
            }
            score += self.rng.random::<f32>() * 0.25;

            if score > best_score {
                best_score = score;
                best = dir;
            }
        }
        best
    }
}

fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}
