use super::*;

impl GameSimulation {
    pub(super) fn advance_player(&mut self) {
        self.player.update(&self.grid);
    }

    /// Adversaries re-decide only at tile alignment, then advance with the
    /// same commit rules as the player.
    pub(super) fn advance_adversaries(&mut self) {
        for idx in 0..self.adversaries.len() {
            if self.adversaries[idx].is_tile_aligned() {
                let choice = ai::choose_adversary_direction(
                    &self.adversaries[idx],
                    self.player.pos(),
                    &self.grid,
                    self.power_active,
                );
                self.adversaries[idx].set_pending_dir(choice);
            }
            self.adversaries[idx].update(&self.grid);
        }
    }
}
