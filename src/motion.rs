//! Pure geometric movement rules shared by the player and the ghosts.

use crate::grid::Grid;
use crate::types::{Direction, Vec2};

/// Two-decimal rounding keeps per-tick fractional steps from accumulating
/// floating-point drift across a long session.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// The grid cell an entity occupies for collision and consumption purposes.
pub fn occupied_cell(pos: Vec2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

/// Whether a full one-cell step from `pos` in `dir` lands on a passable cell.
///
/// The vertical axis has no wraparound, so a destination outside it is a
/// hard rejection. The horizontal lookup wraps modulo width: the portal is
/// applied after stepping, so the edges must never reject on bounds alone.
pub fn can_step(grid: &Grid, pos: Vec2, dir: Direction) -> bool {
    let (vx, vy) = dir.unit_vector();
    let dest_x = (pos.x + vx).round() as i32;
    let dest_y = (pos.y + vy).round() as i32;
    if dest_y < 0 || dest_y >= grid.height() {
        return false;
    }
    !grid.is_wall(dest_x.rem_euclid(grid.width()), dest_y)
}

/// Advances `pos` by `speed` grid units along `dir`. Callers apply
/// `wrap_portal` afterwards.
pub fn apply_step(pos: Vec2, dir: Direction, speed: f32) -> Vec2 {
    let (vx, vy) = dir.unit_vector();
    Vec2 {
        x: round2(pos.x + vx * speed),
        y: round2(pos.y + vy * speed),
    }
}

/// Horizontal portal rule: once a position rounds past the last column it
/// snaps to the opposite edge cell. The half-cell threshold matches
/// `occupied_cell` rounding, so an entity mid-portal never occupies a cell
/// outside `[0, width)`.
pub fn wrap_portal(mut pos: Vec2, width: i32) -> Vec2 {
    if pos.x <= -0.5 {
        pos.x = (width - 1) as f32;
    }
    if pos.x >= width as f32 - 0.5 {
        pos.x = 0.0;
    }
    pos
}

pub fn euclidean(a: Vec2, b: Vec2) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(lines: &[&str]) -> Grid {
        Grid::parse(&lines.iter().map(|line| line.to_string()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn apply_step_rounds_to_two_decimals() {
        let pos = Vec2::new(1.0, 1.0);
        let stepped = apply_step(pos, Direction::Right, 0.15);
        assert_eq!(stepped.x, 1.15);
        let stepped = apply_step(stepped, Direction::Right, 0.15);
        assert_eq!(stepped.x, 1.3);
        assert_eq!(stepped.y, 1.0);
    }

    #[test]
    fn can_step_blocks_walls_and_vertical_bounds() {
        let g = grid(&["###", "#.#", "###"]);
        let pos = Vec2::new(1.0, 1.0);
        assert!(!can_step(&g, pos, Direction::Up));
        assert!(!can_step(&g, pos, Direction::Down));
        assert!(!can_step(&g, pos, Direction::Left));
        assert!(!can_step(&g, pos, Direction::Right));
        // a stationary "step" stays on the current, passable cell
        assert!(can_step(&g, pos, Direction::None));

        let open = grid(&["...", "...", "..."]);
        assert!(!can_step(&open, Vec2::new(1.0, 0.0), Direction::Up));
        assert!(!can_step(&open, Vec2::new(1.0, 2.0), Direction::Down));
    }

    #[test]
    fn can_step_wraps_the_horizontal_lookup() {
        let g = grid(&["###", "...", "###"]);
        assert!(can_step(&g, Vec2::new(0.0, 1.0), Direction::Left));
        assert!(can_step(&g, Vec2::new(2.0, 1.0), Direction::Right));

        let blocked = grid(&["###", "#..", "###"]);
        // wrapping lands on the far wall column
        assert!(!can_step(&blocked, Vec2::new(2.0, 1.0), Direction::Right));
    }

    #[test]
    fn wrap_portal_round_trips_both_edges() {
        let left = wrap_portal(Vec2::new(-0.6, 1.0), 19);
        assert_eq!(left.x, 18.0);
        let right = wrap_portal(Vec2::new(18.6, 1.0), 19);
        assert_eq!(right.x, 0.0);
        // still rounds to an edge cell, so no wrap yet
        let edging = wrap_portal(Vec2::new(-0.45, 1.0), 19);
        assert_eq!(edging.x, -0.45);
        let inside = wrap_portal(Vec2::new(4.2, 1.0), 19);
        assert_eq!(inside.x, 4.2);
    }

    #[test]
    fn occupied_cell_rounds_to_nearest() {
        assert_eq!(occupied_cell(Vec2::new(4.4, 7.6)), (4, 8));
        assert_eq!(occupied_cell(Vec2::new(4.5, 7.5)), (5, 8));
    }

    #[test]
    fn euclidean_distance_is_symmetric() {
        let a = Vec2::new(5.0, 5.0);
        let b = Vec2::new(5.05, 5.0);
        assert!(euclidean(a, b) < 0.06);
        assert_eq!(euclidean(a, b), euclidean(b, a));
        assert!((euclidean(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
