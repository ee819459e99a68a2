use crate::motion::{apply_step, can_step, euclidean, wrap_portal};
use crate::types::{Direction, GhostMode, Vec2};

use super::Engine;

const CANDIDATE_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Engine {
    /// Advances every ghost in fixed order. Mode is re-derived from the
    /// session each tick (never sticky), so power-mode expiry flips all
    /// ghosts back to pursuit on the next tick without per-ghost bookkeeping.
    pub(crate) fn advance_ghosts(&mut self) {
        let player_pos = self.player.pos;
        for idx in 0..self.ghosts.len() {
            self.ghosts[idx].mode = if self.session.power_mode_active {
                GhostMode::Evade
            } else {
                GhostMode::Pursue
            };
            let target = match self.ghosts[idx].mode {
                GhostMode::Pursue => player_pos,
                GhostMode::Evade | GhostMode::Eaten => self.ghosts[idx].home,
            };

            let ghost = &self.ghosts[idx];
            if ghost.dir != Direction::None && can_step(&self.grid, ghost.pos, ghost.dir) {
                // straight-line bias: keep going until blocked
                let stepped = apply_step(ghost.pos, ghost.dir, ghost.speed);
                self.ghosts[idx].pos = wrap_portal(stepped, self.grid.width());
            } else {
                // decision point: commit a new direction, move next tick
                self.ghosts[idx].dir = self.choose_ghost_direction(idx, target);
            }
        }
    }

    /// Greedy single-step choice: among the legal cardinal directions that
    /// are not an immediate reversal, minimize the Euclidean distance from
    /// the prospective next cell to the target; ties fall to enumeration
    /// order. A ghost boxed in on all three non-reverse sides reverses if it
    /// can, else keeps no direction for this tick.
    fn choose_ghost_direction(&self, ghost_idx: usize, target: Vec2) -> Direction {
        let ghost = &self.ghosts[ghost_idx];
        let reverse = ghost.dir.opposite();
        let mut best = Direction::None;
        let mut best_dist = f32::INFINITY;

        for dir in CANDIDATE_DIRECTIONS {
            if dir == reverse {
                continue;
            }
            if !can_step(&self.grid, ghost.pos, dir) {
                continue;
            }
            let (vx, vy) = dir.unit_vector();
            let next = Vec2::new(ghost.pos.x + vx, ghost.pos.y + vy);
            let dist = euclidean(next, target);
            if dist < best_dist {
                best_dist = dist;
                best = dir;
            }
        }

        if best == Direction::None
            && reverse != Direction::None
            && can_step(&self.grid, ghost.pos, reverse)
        {
            return reverse;
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{config_on, ghost_spec_at};
    use super::super::Engine;
    use crate::types::{Direction, GhostMode, Vec2};

    fn engine_with_ghost(lines: &[&str], ghost_pos: Vec2, dir: Direction) -> Engine {
        let mut config = config_on(lines);
        config.ghost_spawn = ghost_pos;
        config.ghosts = vec![ghost_spec_at("ghost", Vec2::new(1.0, 1.0), dir)];
        let mut engine = Engine::new(config).unwrap();
        engine.session_mut().paused = false;
        engine
    }

    #[test]
    fn ghost_keeps_going_straight_while_the_path_is_clear() {
        let mut engine = engine_with_ghost(
            &["#####", "#...#", "#####"],
            Vec2::new(1.0, 1.0),
            Direction::Right,
        );
        // junction below would be preferred by a re-evaluation; none happens
        engine.player_mut().pos = Vec2::new(3.0, 1.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Right);
        assert_eq!(engine.ghosts()[0].pos, Vec2::new(1.1, 1.0));
    }

    #[test]
    fn blocked_ghost_commits_a_direction_without_moving() {
        let mut engine = engine_with_ghost(
            &["#.###", "#...#", "#####"],
            Vec2::new(3.0, 1.0),
            Direction::Up,
        );
        engine.player_mut().pos = Vec2::new(1.0, 1.0);
        engine.step();
        // decision tick: direction committed, position unchanged
        assert_eq!(engine.ghosts()[0].dir, Direction::Left);
        assert_eq!(engine.ghosts()[0].pos, Vec2::new(3.0, 1.0));
        engine.step();
        assert_eq!(engine.ghosts()[0].pos, Vec2::new(2.9, 1.0));
    }

    #[test]
    fn greedy_choice_minimizes_distance_to_the_target() {
        // T junction: ghost moving right hits a wall, may go up or down
        let lines = ["##.##", "##.##", "#..##", "##.##", "##.##"];
        let mut engine = engine_with_ghost(&lines, Vec2::new(2.0, 2.0), Direction::Right);
        engine.player_mut().pos = Vec2::new(2.0, 4.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Down);
    }

    #[test]
    fn ties_resolve_in_enumeration_order() {
        // up and down are equidistant from the target; Up enumerates first
        let lines = ["##.##", "##.##", "#..##", "##.##", "##.##"];
        let mut engine = engine_with_ghost(&lines, Vec2::new(2.0, 2.0), Direction::Right);
        engine.player_mut().pos = Vec2::new(3.0, 2.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Up);
    }

    #[test]
    fn ghost_never_reverses_even_when_reversing_is_closer() {
        // dead end to the right; the target sits behind the ghost, but Left
        // is the reverse of Right and may not be chosen while Up is legal
        let lines = ["###.#", "#...#", "#####"];
        let mut engine = engine_with_ghost(&lines, Vec2::new(1.0, 1.0), Direction::Right);
        engine.ghost_mut(0).pos = Vec2::new(3.0, 1.0);
        engine.player_mut().pos = Vec2::new(1.0, 1.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Up);
    }

    #[test]
    fn boxed_in_ghost_falls_back_to_reversing() {
        let lines = ["#####", "#...#", "#####"];
        let mut engine = engine_with_ghost(&lines, Vec2::new(1.0, 1.0), Direction::Right);
        engine.ghost_mut(0).pos = Vec2::new(3.0, 1.0);
        engine.player_mut().pos = Vec2::new(1.0, 1.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Left);
    }

    #[test]
    fn power_mode_switches_the_target_to_home() {
        // ghost at a junction with home upward and the player downward
        let lines = ["##.##", "##.##", "#..##", "##.##", "##.##"];
        let mut config = config_on(&lines);
        config.ghost_spawn = Vec2::new(2.0, 2.0);
        config.ghosts = vec![ghost_spec_at("ghost", Vec2::new(2.0, 0.0), Direction::None)];
        let mut engine = Engine::new(config).unwrap();
        engine.session_mut().paused = false;
        engine.player_mut().pos = Vec2::new(2.0, 4.0);
        engine.session_mut().power_mode_active = true;
        engine.session_mut().power_mode_ticks = 100;

        engine.step();
        assert_eq!(engine.ghosts()[0].mode, GhostMode::Evade);
        assert_eq!(engine.ghosts()[0].dir, Direction::Up);
    }

    #[test]
    fn mode_reverts_to_pursue_when_power_mode_ends() {
        let mut engine = engine_with_ghost(
            &["#####", "#...#", "#####"],
            Vec2::new(1.0, 1.0),
            Direction::Right,
        );
        engine.player_mut().pos = Vec2::new(3.0, 1.0);
        engine.session_mut().power_mode_active = true;
        engine.session_mut().power_mode_ticks = 1;
        engine.step();
        assert_eq!(engine.ghosts()[0].mode, GhostMode::Evade);
        assert!(!engine.session().power_mode_active);
        engine.step();
        assert_eq!(engine.ghosts()[0].mode, GhostMode::Pursue);
    }

    #[test]
    fn ghost_wraps_through_the_portal() {
        let mut engine = engine_with_ghost(
            &["#####", ".....", "#####"],
            Vec2::new(0.0, 1.0),
            Direction::Left,
        );
        engine.player_mut().pos = Vec2::new(2.0, 1.0);
        // five steps at 0.1 reach the half-cell threshold and snap across
        for _ in 0..5 {
            engine.step();
        }
        assert_eq!(engine.ghosts()[0].pos.x, 4.0);
    }

    #[test]
    fn ghost_with_no_direction_re_evaluates_all_four_candidates() {
        let lines = ["##.##", "##.##", "#...#", "##.##", "##.##"];
        let mut engine = engine_with_ghost(&lines, Vec2::new(2.0, 2.0), Direction::None);
        engine.player_mut().pos = Vec2::new(2.0, 4.0);
        engine.step();
        assert_eq!(engine.ghosts()[0].dir, Direction::Down);
    }
}
