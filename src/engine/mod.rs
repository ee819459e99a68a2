use crate::constants::INITIAL_HIGH_SCORE;
use crate::grid::{Grid, LayoutError};
use crate::types::{
    Direction, EngineConfig, EventKind, GameEvent, Ghost, GhostMode, Player, SessionState,
    Snapshot,
};

mod collisions;
mod ghosts;
mod player;

/// The tick-driven simulation: one player, a set of ghosts, the grid they
/// share, and the session state machine that gates every tick. All state
/// mutation funnels through `step`, `queue_direction`, `toggle_pause`, and
/// `reset`; consumers only ever see immutable snapshots.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    fresh_grid: Grid,
    grid: Grid,
    player: Player,
    ghosts: Vec<Ghost>,
    session: SessionState,
    events: Vec<GameEvent>,
    tick: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, LayoutError> {
        let fresh_grid = Grid::parse(&config.layout)?;
        let mut engine = Self {
            grid: fresh_grid.clone(),
            player: spawn_player(&config),
            ghosts: spawn_ghosts(&config),
            session: starting_session(&config, &fresh_grid, INITIAL_HIGH_SCORE),
            events: Vec::new(),
            tick: 0,
            fresh_grid,
            config,
        };
        engine.push_event(EventKind::Start);
        // a layout without collectibles has nothing to play for
        if engine.session.collectibles_remaining == 0 {
            engine.session.won = true;
            engine.push_event(EventKind::Win);
        }
        Ok(engine)
    }

    /// One bounded, synchronous simulation step. Order matters: the player
    /// moves and consumes first, so every ghost targets the player's
    /// post-move position; ghosts then move in fixed order, captures resolve
    /// per ghost, and the power timer counts down last.
    pub fn step(&mut self) {
        if self.session.paused || self.session.game_over || self.session.won {
            return;
        }
        self.tick += 1;
        self.advance_player();
        self.resolve_consumption();
        if self.session.won {
            return;
        }
        self.advance_ghosts();
        self.resolve_captures();
        self.tick_power_timer();
    }

    /// Queues a turn intent. Repeated same-direction intents are idempotent
    /// overwrites; any directional intent resumes a paused, non-terminal
    /// session.
    pub fn queue_direction(&mut self, dir: Direction) {
        if self.session.game_over || self.session.won || dir == Direction::None {
            return;
        }
        self.player.next_dir = dir;
        self.session.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.session.game_over || self.session.won {
            return;
        }
        self.session.paused = !self.session.paused;
    }

    /// Full reset: grid, entities, and session are reconstructed wholesale,
    /// so no tick can observe a half-reset board. Only the high score
    /// carries across.
    pub fn reset(&mut self) {
        let high_score = self.session.high_score.max(self.session.score);
        self.grid = self.fresh_grid.clone();
        self.player = spawn_player(&self.config);
        self.ghosts = spawn_ghosts(&self.config);
        self.session = starting_session(&self.config, &self.grid, high_score);
        self.events.clear();
        self.tick = 0;
        self.push_event(EventKind::Start);
        if self.session.collectibles_remaining == 0 {
            self.session.won = true;
            self.push_event(EventKind::Win);
        }
    }

    pub fn is_over(&self) -> bool {
        self.session.game_over || self.session.won
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let snapshot = Snapshot {
            tick: self.tick,
            width: self.grid.width(),
            height: self.grid.height(),
            tiles: self.grid.rows(),
            player: self.player.clone(),
            ghosts: self.ghosts.clone(),
            session: self.session.clone(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    fn tick_power_timer(&mut self) {
        if !self.session.power_mode_active {
            return;
        }
        self.session.power_mode_ticks = self.session.power_mode_ticks.saturating_sub(1);
        if self.session.power_mode_ticks == 0 {
            self.session.power_mode_active = false;
        }
    }

    pub(crate) fn push_event(&mut self, kind: EventKind) {
        self.events.push(GameEvent {
            kind,
            score: self.session.score,
            lives: self.session.lives,
        });
    }
}

fn spawn_player(config: &EngineConfig) -> Player {
    Player {
        pos: config.player_spawn,
        dir: Direction::None,
        next_dir: Direction::None,
        speed: config.player_speed,
    }
}

fn spawn_ghosts(config: &EngineConfig) -> Vec<Ghost> {
    config
        .ghosts
        .iter()
        .map(|spec| Ghost {
            id: spec.id.clone(),
            color: spec.color.clone(),
            pos: config.ghost_spawn,
            dir: spec.initial_dir,
            next_dir: spec.initial_dir,
            speed: config.ghost_speed,
            mode: GhostMode::Pursue,
            home: spec.home,
        })
        .collect()
}

fn starting_session(config: &EngineConfig, grid: &Grid, high_score: i32) -> SessionState {
    SessionState {
        score: 0,
        lives: config.starting_lives,
        level: 1,
        paused: true,
        game_over: false,
        won: false,
        high_score,
        collectibles_remaining: grid.collectible_count(),
        power_mode_active: false,
        power_mode_ticks: 0,
    }
}
