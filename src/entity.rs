use crate::grid::GridMap;
use crate::types::{Direction, Vec2};

#[derive(Clone, Debug)]
pub struct MobileEntity {
    spawn: Vec2,
    pos: Vec2,
    dir: Direction,
    pending_dir: Direction,
    speed: i32,
    tile_size: i32,
    base_color: String,
}

impl MobileEntity {
    pub fn new(row: i32, col: i32, tile_size: i32, speed: i32, color: String) -> Self {
        let spawn = Vec2 {
            x: col * tile_size,
            y: row * tile_size,
        };
        Self {
            spawn,
            pos: spawn,
            dir: Direction::None,
            pending_dir: Direction::None,
            speed,
            tile_size,
            base_color: color,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn pending_dir(&self) -> Direction {
        self.pending_dir
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    pub fn set_pending_dir(&mut self, dir: Direction) {
        self.pending_dir = dir;
    }

    pub fn is_tile_aligned(&self) -> bool {
        self.pos.x % self.tile_size == 0 && self.pos.y % self.tile_size == 0
    }

    /// (row, col) of the top-left-anchored tile. Exact at alignment.
    pub fn tile(&self) -> (i32, i32) {
        (self.pos.y / self.tile_size, self.pos.x / self.tile_size)
    }

    /// (row, col) of the tile holding the entity's center point.
    pub fn center_tile(&self) -> (i32, i32) {
        let half = self.tile_size / 2;
        (
            (self.pos.y + half) / self.tile_size,
            (self.pos.x + half) / self.tile_size,
        )
    }

    /// Two phases: intent commit at tile alignment, then an unconditional
    /// advance. A pending turn into a wall is dropped silently and does not
    /// stop existing motion; only a committed direction aimed at a wall
    /// zeroes it.
    pub fn update(&mut self, grid: &GridMap) {
        if self.is_tile_aligned() {
            let (row, col) = self.tile();
            let (pdx, pdy) = self.pending_dir.delta();
            if grid.is_walkable(row + pdy, col + pdx) {
                self.dir = self.pending_dir;
            }
            let (dx, dy) = self.dir.delta();
            if !grid.is_walkable(row + dy, col + dx) {
                self.dir = Direction::None;
            }
        }
        let (dx, dy) = self.dir.delta();
        self.pos.x += dx * self.speed;
        self.pos.y += dy * self.speed;
    }

    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.dir = Direction::None;
        self.pending_dir = Direction::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> GridMap {
        let layout: Vec<String> = ["#####", "#...#", "#.#.#", "#...#", "#####"]
            .iter()
            .map(|row| row.to_string())
            .collect();
        GridMap::from_layout(&layout, 10, 50).expect("test arena should be valid")
    }

    #[test]
    fn starts_at_spawn_tile_aligned() {
        let entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        assert_eq!(entity.pos(), Vec2 { x: 32, y: 32 });
        assert!(entity.is_tile_aligned());
        assert_eq!(entity.tile(), (1, 1));
        assert_eq!(entity.dir(), Direction::None);
    }

    #[test]
    fn commits_pending_direction_at_alignment() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        entity.update(&grid);
        assert_eq!(entity.dir(), Direction::Right);
        assert_eq!(entity.pos(), Vec2 { x: 34, y: 32 });
    }

    #[test]
    fn pending_toward_wall_is_dropped_and_motion_continues() {
        let grid = arena();
        let mut entity = MobileEntity::new(3, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        for _ in 0..16 {
            entity.update(&grid);
        }
        assert_eq!(entity.tile(), (3, 2));
        assert!(entity.is_tile_aligned());

        // (2, 2) is a wall, so the upward intent never commits.
        entity.set_pending_dir(Direction::Up);
        entity.update(&grid);
        assert_eq!(entity.dir(), Direction::Right, "wall-aimed intent must not commit");
        assert_eq!(entity.pending_dir(), Direction::Up);
        assert_eq!(entity.pos(), Vec2 { x: 66, y: 96 });
    }

    #[test]
    fn committed_direction_into_wall_stops_the_entity() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        for _ in 0..32 {
            entity.update(&grid);
        }
        assert_eq!(entity.tile(), (1, 3));
        assert!(entity.is_tile_aligned());

        // (1, 4) is a wall, so the next aligned check zeroes the direction.
        entity.update(&grid);
        assert_eq!(entity.dir(), Direction::None);
        assert_eq!(entity.pos(), Vec2 { x: 96, y: 32 });
        entity.update(&grid);
        assert_eq!(entity.pos(), Vec2 { x: 96, y: 32 });
    }

    #[test]
    fn pending_commits_at_next_alignment_not_mid_corridor() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 2, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        entity.update(&grid);
        entity.set_pending_dir(Direction::Down);
        for _ in 0..15 {
            entity.update(&grid);
        }
        assert_eq!(entity.pos(), Vec2 { x: 96, y: 32 });
        assert_eq!(entity.dir(), Direction::Right);

        entity.update(&grid);
        assert_eq!(entity.dir(), Direction::Down);
        assert_eq!(entity.pos(), Vec2 { x: 96, y: 34 });
    }

    #[test]
    fn zero_pending_commits_and_stops_at_alignment() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        for _ in 0..16 {
            entity.update(&grid);
        }
        assert_eq!(entity.tile(), (1, 2));
        entity.set_pending_dir(Direction::None);
        entity.update(&grid);
        assert_eq!(entity.dir(), Direction::None);
        assert_eq!(entity.pos(), Vec2 { x: 64, y: 32 });
    }

    #[test]
    fn center_tile_flips_once_the_center_crosses_the_boundary() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        for _ in 0..7 {
            entity.update(&grid);
        }
        assert_eq!(entity.pos().x, 46);
        assert_eq!(entity.center_tile(), (1, 1));

        entity.update(&grid);
        assert_eq!(entity.pos().x, 48);
        assert_eq!(entity.center_tile(), (1, 2));
    }

    #[test]
    fn full_tile_speed_reaches_the_neighbor_in_one_update() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 32, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        entity.update(&grid);
        assert_eq!(entity.tile(), (1, 2));
        assert!(entity.is_tile_aligned());
    }

    #[test]
    fn reset_returns_to_spawn_with_zero_directions() {
        let grid = arena();
        let mut entity = MobileEntity::new(1, 1, 32, 2, "#ffff00".to_string());
        entity.set_pending_dir(Direction::Right);
        for _ in 0..5 {
            entity.update(&grid);
        }
        assert_ne!(entity.pos(), entity.spawn());

        entity.reset();
        assert_eq!(entity.pos(), Vec2 { x: 32, y: 32 });
        assert_eq!(entity.dir(), Direction::None);
        assert_eq!(entity.pending_dir(), Direction::None);
    }
}
