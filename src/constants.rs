pub const TILE_SIZE: i32 = 32;
pub const ROWS: usize = 15;
pub const COLS: usize = 15;

pub const PLAYER_SPEED: i32 = 2;
pub const ADVERSARY_SPEED: i32 = 2;

pub const INITIAL_LIVES: i32 = 3;
pub const POWER_MODE_TICKS: u32 = 400;

pub const PELLET_SCORE: i32 = 10;
pub const POWER_PELLET_SCORE: i32 = 50;
pub const CAPTURE_BONUS: i32 = 200;

pub const COLLISION_RADIUS_FACTOR: f32 = 0.7;

pub const PLAYER_COLOR: &str = "#ffff00";
pub const VULNERABLE_COLOR: &str = "#0000ff";

pub const PLAYER_SPAWN: (i32, i32) = (1, 1);
pub const ADVERSARY_SPAWNS: [(i32, i32); 3] = [(13, 13), (13, 1), (1, 13)];
pub const ADVERSARY_COLORS: [&str; 3] = ["#ff0000", "#ffb8ff", "#00ffff"];

// #: Wall, .: Pellet, o: Power pellet, space: Empty
pub const MAP_LAYOUT: [&str; ROWS] = [
    "###############",
    "#o....#......o#",
    "#.##.##.##.##.#",
    "#.............#",
    "#.##.#.#.#.##.#",
    "#....#.#.#....#",
    "####.#####.####",
    "...............",
    "####.#####.####",
    "#......#......#",
    "#.##.#.#.#.##.#",
    "#..#.......#..#",
    "##.#.#####.#.##",
    "#o...........o#",
    "###############",
];
