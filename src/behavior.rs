use crate::model::{ActivityState, Facing, GameState, Mood, Tuning};
use crate::sim::derive_mood;

impl GameState {
    /// Autonomous reselection, one per behavior interval. Skipped while the
    /// pet is being dragged or an action lock is armed.
    pub(crate) fn behavior_tick(&mut self, t: &Tuning) {
        if self.dragging || self.locked() {
            return;
        }

        match derive_mood(&self.stats) {
            Mood::Hungry => self.activity = ActivityState::Hungry,
            Mood::Dirty => self.activity = ActivityState::Dirty,
            Mood::Sad => self.activity = ActivityState::Sad,
            Mood::Happy => {
                let choices = [
                    ActivityState::Idle,
                    ActivityState::Walk,
                    ActivityState::Jump,
                    ActivityState::Dance,
                    ActivityState::Happy,
                ];
                let next = *self.rng.pick(&choices);
                self.enter(next, t);
            }
            Mood::Normal | Mood::Sick => {
                let choices = [
                    ActivityState::Idle,
                    ActivityState::Idle,
                    ActivityState::Walk,
                    ActivityState::Walk,
                    ActivityState::Idle,
                ];
                let next = *self.rng.pick(&choices);
                self.enter(next, t);
            }
        }
    }

    fn enter(&mut self, next: ActivityState, t: &Tuning) {
        self.activity = next;
        match next {
            ActivityState::Walk => {
                self.facing = if self.rng.roll(0.5) {
                    Facing::Left
                } else {
                    Facing::Right
                };
            }
            ActivityState::Jump => self.start_jump(t),
            _ => {}
        }
    }

    /// Action commands: check the lock, mutate the stats, then hold the
    /// matching state until the deadline. A second command during an active
    /// lock is rejected outright.
    pub(crate) fn feed(&mut self, t: &Tuning) -> bool {
        if self.locked() || !self.stats.feed() {
            return false;
        }
        self.begin_lock(ActivityState::Eating, t.action_lock_ms);
        true
    }

    pub(crate) fn wash(&mut self, t: &Tuning) -> bool {
        if self.locked() || !self.stats.wash() {
            return false;
        }
        self.begin_lock(ActivityState::Washing, t.action_lock_ms);
        true
    }

    pub(crate) fn play(&mut self, t: &Tuning) -> bool {
        if self.locked() || !self.stats.play() {
            return false;
        }
        self.begin_lock(ActivityState::Playing, t.action_lock_ms);
        true
    }

    pub(crate) fn pet(&mut self, t: &Tuning) -> bool {
        if self.locked() || !self.stats.pet() {
            return false;
        }
        self.begin_lock(ActivityState::Happy, t.pet_lock_ms);
        true
    }

    fn begin_lock(&mut self, state: ActivityState, dur_ms: u64) {
        self.activity = state;
        self.lock_until_ms = Some(self.now_ms + dur_ms);
    }

    /// Deadline check, run on the fast tick.
    pub(crate) fn expire_lock_if_due(&mut self) {
        if let Some(until) = self.lock_until_ms {
            if self.now_ms >= until {
                self.lock_until_ms = None;
                if !self.dragging {
                    self.activity = ActivityState::Idle;
                }
            }
        }
    }

    /// Grabbing the pet suspends reselection and movement; the pet just
    /// hangs there looking pleased.
    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.lock_until_ms = None;
        self.activity = if dragging {
            ActivityState::Happy
        } else {
            ActivityState::Idle
        };
    }

    /// Double-activation entry path: hop if grounded and unlocked.
    pub(crate) fn trigger_jump(&mut self, t: &Tuning) {
        if self.dragging || self.locked() || self.jump.airborne {
            return;
        }
        self.activity = ActivityState::Jump;
        self.start_jump(t);
    }

    fn start_jump(&mut self, t: &Tuning) {
        if !self.jump.airborne {
            self.jump.airborne = true;
            self.jump.velocity = t.jump_velocity;
        }
    }
}
