use super::*;

impl GameSimulation {
    /// Checks adversaries in roster order against the player's current
    /// position. A life loss resets everyone mid-loop, so later adversaries
    /// are measured against the respawned player.
    pub(super) fn resolve_collisions(&mut self) {
        let threshold = self.config.tile_size as f32 * self.config.collision_radius_factor;
        for idx in 0..self.adversaries.len() {
            if self.ended {
                break;
            }
            let dist = self.player.pos().distance_to(self.adversaries[idx].pos());
            if dist >= threshold {
                continue;
            }

            if self.power_active {
                self.score += self.config.capture_bonus;
                self.adversaries[idx].reset();
                self.events
                    .push(RuntimeEvent::AdversaryCaptured { index: idx });
                continue;
            }

            self.lives -= 1;
            self.running = false;
            self.events.push(RuntimeEvent::LifeLost {
                lives_left: self.lives,
            });
            if self.lives <= 0 {
                self.ended = true;
                self.events.push(RuntimeEvent::GameOver);
            } else {
                self.player.reset();
                for adversary in &mut self.adversaries {
                    adversary.reset();
                }
            }
        }
    }
}
