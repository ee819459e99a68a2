use crate::motion::{euclidean, occupied_cell};
use crate::types::{CellKind, Direction, EventKind, GhostMode};

use super::Engine;

impl Engine {
    /// Consumes whatever sits under the player's occupied cell and applies
    /// its effects. Clearing the last collectible wins the round in the same
    /// update, before any power-up side effects would fire.
    pub(crate) fn resolve_consumption(&mut self) {
        let (cx, cy) = occupied_cell(self.player.pos);
        let Some(kind) = self.grid.consume(cx, cy) else {
            return;
        };
        match kind {
            CellKind::Collectible => self.session.score += self.config.collectible_points,
            CellKind::PowerCollectible => {
                self.session.score += self.config.power_collectible_points
            }
            _ => unreachable!("consume only yields consumable cells"),
        }
        self.session.collectibles_remaining -= 1;

        if self.session.collectibles_remaining == 0 {
            self.session.won = true;
            self.session.paused = true;
            self.push_event(EventKind::Win);
            return;
        }
        if kind == CellKind::PowerCollectible {
            self.session.power_mode_active = true;
            self.session.power_mode_ticks = self.config.power_mode_ticks;
            self.push_event(EventKind::PowerUp);
        }
    }

    /// Checks every ghost against the capture radius. An evading ghost is
    /// sent home for points; a pursuing ghost costs a life and resets the
    /// round positions, so the scan stops after the first pursuit capture.
    pub(crate) fn resolve_captures(&mut self) {
        for idx in 0..self.ghosts.len() {
            let dist = euclidean(self.ghosts[idx].pos, self.player.pos);
            if dist >= self.config.capture_radius {
                continue;
            }
            match self.ghosts[idx].mode {
                GhostMode::Evade | GhostMode::Eaten => {
                    self.session.score += self.config.capture_points;
                    self.ghosts[idx].pos = self.config.ghost_spawn;
                    self.ghosts[idx].dir = Direction::None;
                    self.ghosts[idx].mode = GhostMode::Pursue;
                    self.push_event(EventKind::GhostEaten);
                }
                GhostMode::Pursue => {
                    self.session.lives -= 1;
                    if self.session.lives <= 0 {
                        self.session.lives = 0;
                        self.session.game_over = true;
                        self.session.paused = true;
                        self.push_event(EventKind::Died);
                        return;
                    }
                    self.player.pos = self.config.player_spawn;
                    self.player.dir = Direction::None;
                    self.player.next_dir = Direction::None;
                    for ghost in &mut self.ghosts {
                        ghost.pos = self.config.ghost_spawn;
                        ghost.dir = Direction::Left;
                        ghost.mode = GhostMode::Pursue;
                    }
                    self.session.paused = true;
                    self.push_event(EventKind::Died);
                    return;
                }
            }
        }
    }
}
