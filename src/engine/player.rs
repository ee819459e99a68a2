use crate::motion::{apply_step, can_step, wrap_portal};
use crate::types::Direction;

use super::Engine;

impl Engine {
    /// Queued-turn-then-current-direction resolution. A queued turn that is
    /// legal always wins over continuing straight; if neither the queued nor
    /// the current direction permits a step, the player idles at the wall
    /// until redirected. Ghosts re-route autonomously, the player does not.
    pub(crate) fn advance_player(&mut self) {
        if self.player.next_dir != Direction::None
            && can_step(&self.grid, self.player.pos, self.player.next_dir)
        {
            self.player.dir = self.player.next_dir;
            self.player.next_dir = Direction::None;
        }

        if self.player.dir != Direction::None && can_step(&self.grid, self.player.pos, self.player.dir)
        {
            let stepped = apply_step(self.player.pos, self.player.dir, self.player.speed);
            self.player.pos = wrap_portal(stepped, self.grid.width());
        }
    }
}
