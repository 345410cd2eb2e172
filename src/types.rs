use serde::Serialize;

use crate::constants::{
    ADVERSARY_COLORS, ADVERSARY_SPAWNS, ADVERSARY_SPEED, CAPTURE_BONUS, COLLISION_RADIUS_FACTOR,
    INITIAL_LIVES, MAP_LAYOUT, PELLET_SCORE, PLAYER_COLOR, PLAYER_SPAWN, PLAYER_SPEED,
    POWER_MODE_TICKS, POWER_PELLET_SCORE, TILE_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Wall,
    Pellet,
    PowerPellet,
    Empty,
}

impl CellKind {
    pub fn parse_tile(tile: char) -> Option<Self> {
        match tile {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Pellet),
            'o' => Some(Self::PowerPellet),
            ' ' => Some(Self::Empty),
            _ => None,
        }
    }

    pub fn as_tile(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Pellet => '.',
            Self::PowerPellet => 'o',
            Self::Empty => ' ',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub fn distance_to(self, other: Vec2) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumeResult {
    pub kind: CellKind,
    pub score_delta: i32,
    pub triggers_power: bool,
}

/// Configurations rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigError {
    /// The layout has no rows or its first row has no columns.
    EmptyLayout,
    /// The tile size is zero or negative.
    NonPositiveTileSize { tile_size: i32 },
    /// A layout row has a different width than the first row.
    LayoutRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A layout character is not one of the known tiles.
    UnknownTile { row: usize, col: usize, tile: char },
    /// A border cell outside the corridor row is not a wall.
    OpenBorder { row: usize, col: usize },
    /// An entity speed is zero or negative.
    NonPositiveSpeed { speed: i32 },
    /// An entity speed does not evenly divide the tile size.
    SpeedNotDividingTile { speed: i32, tile_size: i32 },
    /// A roster spawn tile is a wall or outside the grid.
    BlockedSpawn { row: i32, col: i32 },
    /// Initial lives must be at least one.
    NonPositiveLives { lives: i32 },
    /// Power mode must last at least one tick.
    ZeroPowerDuration,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntityView {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub color: String,
    #[serde(rename = "isPlayer")]
    pub is_player: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    PelletEaten {
        row: i32,
        col: i32,
    },
    PowerPelletEaten {
        row: i32,
        col: i32,
    },
    PowerStarted,
    PowerEnded,
    AdversaryCaptured {
        index: usize,
    },
    LifeLost {
        #[serde(rename = "livesLeft")]
        lives_left: i32,
    },
    GameOver,
    MazeCleared,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: i32,
    pub lives: i32,
    pub running: bool,
    pub ended: bool,
    #[serde(rename = "powerActive")]
    pub power_active: bool,
    #[serde(rename = "powerTicksRemaining")]
    pub power_ticks_remaining: u32,
    #[serde(rename = "pelletsRemaining")]
    pub pellets_remaining: i32,
    pub entities: Vec<EntityView>,
    pub grid: Vec<String>,
    pub events: Vec<RuntimeEvent>,
}

#[derive(Clone, Debug)]
pub struct EntitySpawn {
    pub row: i32,
    pub col: i32,
    pub color: String,
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub tile_size: i32,
    pub layout: Vec<String>,
    pub player: EntitySpawn,
    pub adversaries: Vec<EntitySpawn>,
    pub player_speed: i32,
    pub adversary_speed: i32,
    pub initial_lives: i32,
    pub power_mode_ticks: u32,
    pub pellet_score: i32,
    pub power_pellet_score: i32,
    pub capture_bonus: i32,
    pub collision_radius_factor: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            layout: MAP_LAYOUT.iter().map(|row| row.to_string()).collect(),
            player: EntitySpawn {
                row: PLAYER_SPAWN.0,
                col: PLAYER_SPAWN.1,
                color: PLAYER_COLOR.to_string(),
            },
            adversaries: ADVERSARY_SPAWNS
                .iter()
                .zip(ADVERSARY_COLORS.iter())
                .map(|(&(row, col), &color)| EntitySpawn {
                    row,
                    col,
                    color: color.to_string(),
                })
                .collect(),
            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            initial_lives: INITIAL_LIVES,
            power_mode_ticks: POWER_MODE_TICKS,
            pellet_score: PELLET_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            capture_bonus: CAPTURE_BONUS,
            collision_radius_factor: COLLISION_RADIUS_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move_accepts_known_tokens_only() {
        assert_eq!(Direction::parse_move("up"), Some(Direction::Up));
        assert_eq!(Direction::parse_move("right"), Some(Direction::Right));
        assert_eq!(Direction::parse_move("none"), Some(Direction::None));
        assert_eq!(Direction::parse_move("diagonal"), None);
    }

    #[test]
    fn deltas_are_unit_or_zero_vectors() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn tile_parse_round_trips() {
        for kind in [
            CellKind::Wall,
            CellKind::Pellet,
            CellKind::PowerPellet,
            CellKind::Empty,
        ] {
            assert_eq!(CellKind::parse_tile(kind.as_tile()), Some(kind));
        }
        assert_eq!(CellKind::parse_tile('x'), None);
    }

    #[test]
    fn default_config_matches_roster_constants() {
        let config = SimConfig::default();
        assert_eq!(config.layout.len(), 15);
        assert_eq!(config.adversaries.len(), 3);
        assert_eq!(config.player.color, "#ffff00");
        assert_eq!(config.adversaries[0].color, "#ff0000");
        assert_eq!(
            (config.adversaries[1].row, config.adversaries[1].col),
            (13, 1)
        );
    }
}
