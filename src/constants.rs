pub const TICK_RATE: u32 = 60;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const PLAYER_SPEED: f32 = 0.15;
pub const GHOST_SPEED: f32 = 0.1;

pub const COLLECTIBLE_POINTS: i32 = 10;
pub const POWER_COLLECTIBLE_POINTS: i32 = 50;
pub const CAPTURE_POINTS: i32 = 200;

pub const STARTING_LIVES: i32 = 3;
pub const INITIAL_HIGH_SCORE: i32 = 10_000;
pub const POWER_MODE_TICKS: u32 = 600;

// Must stay below one grid unit so diagonal near-misses never register.
pub const CAPTURE_RADIUS: f32 = 0.6;

// Row 9 is the portal row: both horizontal edges are open and wrap.
pub const DEFAULT_LAYOUT: [&str; 20] = [
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "####.#.......#.####",
    "####.#.#---#.#.####",
    "......##---##......",
    "####.#.#####.#.####",
    "####.#.......#.####",
    "####.#.#####.#.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#..... .....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "###################",
];
