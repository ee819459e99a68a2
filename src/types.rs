use serde::Serialize;

use crate::constants::{
    CAPTURE_POINTS, CAPTURE_RADIUS, COLLECTIBLE_POINTS, DEFAULT_LAYOUT, GHOST_SPEED,
    PLAYER_SPEED, POWER_COLLECTIBLE_POINTS, POWER_MODE_TICKS, STARTING_LIVES, TICK_RATE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
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

    pub fn unit_vector(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::None => (0.0, 0.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Wall,
    Collectible,
    PowerCollectible,
    Pen,
}

impl CellKind {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            '.' => Some(Self::Collectible),
            'o' => Some(Self::PowerCollectible),
            '-' => Some(Self::Pen),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Collectible => '.',
            Self::PowerCollectible => 'o',
            Self::Pen => '-',
        }
    }

    pub fn is_consumable(self) -> bool {
        matches!(self, Self::Collectible | Self::PowerCollectible)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    Pursue,
    Evade,
    Eaten,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub dir: Direction,
    #[serde(rename = "nextDir")]
    pub next_dir: Direction,
    pub speed: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Ghost {
    pub id: String,
    pub color: String,
    pub pos: Vec2,
    pub dir: Direction,
    #[serde(rename = "nextDir")]
    pub next_dir: Direction,
    pub speed: f32,
    pub mode: GhostMode,
    pub home: Vec2,
}

#[derive(Clone, Debug)]
pub struct GhostSpec {
    pub id: String,
    pub color: String,
    pub home: Vec2,
    pub initial_dir: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionState {
    pub score: i32,
    pub lives: i32,
    pub level: i32,
    pub paused: bool,
    #[serde(rename = "gameOver")]
    pub game_over: bool,
    pub won: bool,
    #[serde(rename = "highScore")]
    pub high_score: i32,
    #[serde(rename = "collectiblesRemaining")]
    pub collectibles_remaining: i32,
    #[serde(rename = "powerModeActive")]
    pub power_mode_active: bool,
    #[serde(rename = "powerModeTicks")]
    pub power_mode_ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Start,
    PowerUp,
    GhostEaten,
    Died,
    Win,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub score: i32,
    pub lives: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<String>,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub session: SessionState,
    pub events: Vec<GameEvent>,
}

/// Everything the engine is parameterized by. The engine logic hard-codes
/// none of these; `Default` mirrors `constants.rs`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub layout: Vec<String>,
    pub player_spawn: Vec2,
    pub player_speed: f32,
    pub ghost_spawn: Vec2,
    pub ghost_speed: f32,
    pub ghosts: Vec<GhostSpec>,
    pub capture_radius: f32,
    pub power_mode_ticks: u32,
    pub collectible_points: i32,
    pub power_collectible_points: i32,
    pub capture_points: i32,
    pub starting_lives: i32,
    pub tick_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.iter().map(|row| row.to_string()).collect(),
            player_spawn: Vec2::new(9.0, 15.0),
            player_speed: PLAYER_SPEED,
            ghost_spawn: Vec2::new(9.0, 9.0),
            ghost_speed: GHOST_SPEED,
            ghosts: vec![
                ghost_spec("blinky", "#FF0000", Vec2::new(17.0, 1.0), Direction::Left),
                ghost_spec("pinky", "#FFB8FF", Vec2::new(1.0, 1.0), Direction::Right),
                ghost_spec("inky", "#00FFFF", Vec2::new(17.0, 18.0), Direction::Up),
                ghost_spec("clyde", "#FFB852", Vec2::new(1.0, 18.0), Direction::Down),
            ],
            capture_radius: CAPTURE_RADIUS,
            power_mode_ticks: POWER_MODE_TICKS,
            collectible_points: COLLECTIBLE_POINTS,
            power_collectible_points: POWER_COLLECTIBLE_POINTS,
            capture_points: CAPTURE_POINTS,
            starting_lives: STARTING_LIVES,
            tick_rate: TICK_RATE,
        }
    }
}

fn ghost_spec(id: &str, color: &str, home: Vec2, initial_dir: Direction) -> GhostSpec {
    GhostSpec {
        id: id.to_string(),
        color: color.to_string(),
        home,
        initial_dir,
    }
}
