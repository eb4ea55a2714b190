use crate::model::{ActivityState, Facing, GameState, Tuning};

impl GameState {
    /// Explicit Euler step for the hop. Ground is height 0, negative is up.
    pub(crate) fn step_jump(&mut self, t: &Tuning) {
        if !self.jump.airborne {
            return;
        }
        self.jump.velocity += t.gravity;
        self.jump.height += self.jump.velocity;
        if self.jump.height >= 0.0 {
            self.jump.height = 0.0;
            self.jump.velocity = 0.0;
            self.jump.airborne = false;
            self.squash_until_ms = Some(self.now_ms + t.squash_ms);
        }
    }

    /// Walk translation with edge bounce. Suspended while dragged or locked.
    pub(crate) fn step_movement(&mut self, t: &Tuning) {
        if self.dragging || self.locked() || self.activity != ActivityState::Walk {
            return;
        }
        let max_x = (self.arena_w - t.pet_width).max(0.0);
        self.pos_x += t.walk_speed * self.facing.sign();
        if self.pos_x < 0.0 {
            self.pos_x = 0.0;
            self.facing = Facing::Right;
        } else if self.pos_x > max_x {
            self.pos_x = max_x;
            self.facing = Facing::Left;
        }
    }

    pub(crate) fn landing_squash_active(&self) -> bool {
        self.squash_until_ms.map_or(false, |t| self.now_ms < t)
    }
}
