use crate::entity::MobileEntity;
use crate::grid::GridMap;
use crate::types::{Direction, Vec2};

// Candidate order also breaks exact distance ties.
const CANDIDATE_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Picks the walkable neighbor whose prospective position is nearest the
/// player, or farthest when `flee` is set. Returns `Direction::None` when
/// every neighbor is a wall, which stops the adversary at the next commit.
pub fn choose_adversary_direction(
    adversary: &MobileEntity,
    player_pos: Vec2,
    grid: &GridMap,
    flee: bool,
) -> Direction {
    let (row, col) = adversary.tile();
    let tile_size = adversary.tile_size();
    let mut best = Direction::None;
    let mut best_dist = if flee { f32::NEG_INFINITY } else { f32::INFINITY };
    for dir in CANDIDATE_ORDER {
        let (dx, dy) = dir.delta();
        if !grid.is_walkable(row + dy, col + dx) {
            continue;
        }
        let prospective = Vec2 {
            x: adversary.pos().x + dx * tile_size,
            y: adversary.pos().y + dy * tile_size,
        };
        let dist = prospective.distance_to(player_pos);
        let better = if flee { dist > best_dist } else { dist < best_dist };
        if better {
            best = dir;
            best_dist = dist;
        }
    }
    best
}
