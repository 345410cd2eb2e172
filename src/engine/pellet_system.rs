use super::*;

impl GameSimulation {
    /// Eats whatever sits under the player's center tile. Runs every tick;
    /// already-emptied cells are no-ops.
    pub(super) fn resolve_consumption(&mut self) {
        let (row, col) = self.player.center_tile();
        let result = self.grid.consume(row, col);
        match result.kind {
            CellKind::Pellet => {
                self.score += result.score_delta;
                self.events.push(RuntimeEvent::PelletEaten { row, col });
            }
            CellKind::PowerPellet => {
                self.score += result.score_delta;
                self.events.push(RuntimeEvent::PowerPelletEaten { row, col });
            }
            _ => {}
        }
        if result.triggers_power {
            self.activate_power();
        }
        if self.grid.pellets_remaining() == 0 {
            self.ended = true;
            self.running = false;
            self.events.push(RuntimeEvent::MazeCleared);
        }
    }

    /// Eating another power pellet while powered restarts the full window.
    pub(super) fn activate_power(&mut self) {
        self.power_active = true;
        self.power_ticks_remaining = self.config.power_mode_ticks;
        self.events.push(RuntimeEvent::PowerStarted);
    }

    /// Ticks down after consumption, so the activation tick itself counts
    /// against the window.
    pub(super) fn advance_power_timer(&mut self) {
        if !self.power_active {
            return;
        }
        self.power_ticks_remaining = self.power_ticks_remaining.saturating_sub(1);
        if self.power_ticks_remaining == 0 {
            self.power_active = false;
            self.events.push(RuntimeEvent::PowerEnded);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::PLAYER_COLOR;
    use crate::engine::GameSimulation;
    use crate::types::{Direction, EntitySpawn, RuntimeEvent, SimConfig};

    fn scenario(layout: &[&str], player: (i32, i32)) -> SimConfig {
        let mut config = SimConfig::default();
        config.layout = layout.iter().map(|row| row.to_string()).collect();
        config.player = EntitySpawn {
            row: player.0,
            col: player.1,
            color: PLAYER_COLOR.to_string(),
        };
        config.adversaries.clear();
        config
    }

    #[test]
    fn single_pellet_is_scored_and_emptied_in_one_tick() {
        let mut config = scenario(&["###", " . ", "###"], (1, 0));
        config.player_speed = 32;
        let mut sim = GameSimulation::new(config).expect("scenario should build");

        sim.set_player_intent(Direction::Right);
        sim.tick();

        assert_eq!(sim.score(), 10);
        let snapshot = sim.build_snapshot(true);
        assert_eq!(snapshot.grid[1], "   ");
        assert_eq!(snapshot.pellets_remaining, 0);
        assert!(snapshot
            .events
            .contains(&RuntimeEvent::PelletEaten { row: 1, col: 1 }));
        assert!(snapshot.events.contains(&RuntimeEvent::MazeCleared));
        assert!(snapshot.ended);
        assert!(!snapshot.running);
    }

    #[test]
    fn emptied_cells_are_not_scored_twice() {
        let mut config = scenario(&["####", " .. ", "####"], (1, 0));
        config.player_speed = 32;
        let mut sim = GameSimulation::new(config).expect("scenario should build");

        sim.set_player_intent(Direction::Right);
        sim.tick();
        assert_eq!(sim.score(), 10);

        // Standing on the emptied cell must not earn again.
        sim.set_player_intent(Direction::None);
        sim.tick();
        sim.tick();
        assert_eq!(sim.score(), 10);
        assert_eq!(sim.grid().pellets_remaining(), 1);

        sim.set_player_intent(Direction::Right);
        sim.tick();
        assert_eq!(sim.score(), 20);
        assert!(sim.is_ended());
    }

    #[test]
    fn power_timer_runs_for_the_configured_tick_count() {
        let config = scenario(&["#####", "o....", "#####"], (1, 0));
        let mut sim = GameSimulation::new(config).expect("scenario should build");

        sim.tick();
        assert!(sim.power_active());
        assert_eq!(sim.power_ticks_remaining(), 399);
        assert_eq!(sim.score(), 50);

        for _ in 1..399 {
            sim.tick();
        }
        assert!(sim.power_active());
        assert_eq!(sim.power_ticks_remaining(), 1);

        sim.tick();
        assert!(!sim.power_active());
        assert_eq!(sim.power_ticks_remaining(), 0);
        assert_eq!(sim.tick_count(), 400);
        let events = sim.build_snapshot(true).events;
        assert!(events.contains(&RuntimeEvent::PowerEnded));
    }

    #[test]
    fn retriggered_power_resets_the_timer() {
        let config = scenario(&["#####", "oo...", "#####"], (1, 0));
        let mut sim = GameSimulation::new(config).expect("scenario should build");

        sim.set_player_intent(Direction::Right);
        sim.tick();
        assert_eq!(sim.power_ticks_remaining(), 399);

        // The center tile reaches the second power pellet on tick 8.
        for _ in 1..7 {
            sim.tick();
        }
        assert_eq!(sim.power_ticks_remaining(), 393);

        sim.tick();
        assert_eq!(sim.power_ticks_remaining(), 399);
        assert_eq!(sim.score(), 100);
        let events = sim.build_snapshot(true).events;
        let starts = events
            .iter()
            .filter(|event| matches!(event, RuntimeEvent::PowerStarted))
            .count();
        assert_eq!(starts, 2);
    }
}
