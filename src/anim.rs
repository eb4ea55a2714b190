use crate::model::{ActivityState, Facing, GameState, Tuning};

/// Complete set of continuous animation parameters for one rendered frame.
/// Recomputed on demand; never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pose {
    pub(crate) eye_scale: f32,
    pub(crate) mouth_open: f32,
    pub(crate) arm_angle: f32,
    pub(crate) leg_offset: f32,
    pub(crate) body_squash: f32,
    pub(crate) tail_angle: f32,
    pub(crate) jump_height: f32,
    pub(crate) facing: Facing,
    pub(crate) blink: bool,
}

impl GameState {
    /// Fast tick: advance the frame counter, integrate the hop, translate,
    /// and release any expired deadline. Runs every anim interval.
    pub(crate) fn anim_tick(&mut self, t: &Tuning) {
        self.expire_lock_if_due();
        self.frame = (self.frame + 1) % t.frame_period;
        self.step_jump(t);
        self.step_movement(t);
    }
}

/// Pure projection of (activity, frame, jump height) into pose parameters.
/// Bounded sine motion per state; the renderer is free to call this at any
/// time without advancing the simulation.
pub(crate) fn pose(g: &GameState) -> Pose {
    let phase = g.frame as f32 / 60.0 * std::f32::consts::TAU;
    let squash_base = if g.landing_squash_active() { 0.35 } else { 0.0 };

    let mut p = Pose {
        eye_scale: 1.0,
        mouth_open: 0.1,
        arm_angle: 0.0,
        leg_offset: 0.0,
        body_squash: squash_base,
        tail_angle: (g.frame as f32 * 0.6).sin() * 20.0,
        jump_height: g.jump.height,
        facing: g.facing,
        blink: g.frame >= 55 && g.frame < 58,
    };

    match g.activity {
        ActivityState::Idle => {
            // breathing
            p.eye_scale = 1.0 + 0.05 * phase.sin();
            p.body_squash += 0.03 * phase.sin().abs();
        }
        ActivityState::Walk => {
            p.arm_angle = 25.0 * (phase * 2.0).sin();
            p.leg_offset = 3.0 * (phase * 2.0).sin();
            p.mouth_open = 0.15;
        }
        ActivityState::Jump => {
            p.eye_scale = 1.2;
            p.mouth_open = 0.6;
            p.arm_angle = -30.0;
            p.leg_offset = -2.0;
        }
        ActivityState::Hungry => {
            p.eye_scale = 0.8;
            p.mouth_open = 0.4 + 0.1 * phase.sin();
            p.arm_angle = -10.0;
        }
        ActivityState::Dirty => {
            p.eye_scale = 0.85;
            p.mouth_open = 0.2;
            p.arm_angle = 5.0 * phase.sin();
        }
        ActivityState::Sad => {
            p.eye_scale = 0.7;
            p.mouth_open = 0.05;
            p.arm_angle = -15.0;
            p.leg_offset = 1.0;
        }
        ActivityState::Happy => {
            p.eye_scale = 1.1;
            p.mouth_open = 0.5;
            p.arm_angle = 20.0 * (phase * 2.0).sin();
            p.tail_angle = (g.frame as f32 * 1.2).sin() * 30.0;
        }
        ActivityState::Eating => {
            p.mouth_open = 0.3 + 0.3 * (phase * 4.0).sin().abs();
            p.eye_scale = 0.95;
            p.body_squash += 0.05 * (phase * 4.0).sin().abs();
        }
        ActivityState::Washing => {
            p.eye_scale = 0.6;
            p.arm_angle = 40.0 * (phase * 3.0).sin();
            p.mouth_open = 0.1;
        }
        ActivityState::Playing => {
            p.eye_scale = 1.15;
            p.mouth_open = 0.45;
            p.arm_angle = 35.0 * (phase * 2.0).sin();
            p.leg_offset = 2.0 * (phase * 2.0).cos();
        }
        ActivityState::Dance => {
            p.arm_angle = 45.0 * (phase * 2.0).sin();
            p.leg_offset = 3.0 * (phase * 2.0).cos();
            p.body_squash += 0.15 * (0.5 + 0.5 * (phase * 2.0).sin());
            p.mouth_open = 0.5;
            p.tail_angle = (g.frame as f32 * 1.5).sin() * 35.0;
        }
    }

    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stats;

    fn state() -> GameState {
        GameState::new(Stats::new_default(), 3, 120.0)
    }

    #[test]
    fn frame_counter_wraps_at_period() {
        let t = Tuning::default();
        let mut g = state();
        for _ in 0..t.frame_period {
            g.anim_tick(&t);
            assert!(g.frame < t.frame_period);
        }
        assert_eq!(g.frame, 0);
    }

    #[test]
    fn pose_is_a_pure_read() {
        let mut g = state();
        g.activity = ActivityState::Dance;
        g.frame = 17;
        let snapshot = g.clone();
        let a = pose(&g);
        let b = pose(&g);
        assert_eq!(a, b);
        assert_eq!(g.frame, snapshot.frame);
        assert_eq!(g.stats.exp, snapshot.stats.exp);
    }

    #[test]
    fn pose_parameters_stay_bounded() {
        let t = Tuning::default();
        let mut g = state();
        let states = [
            ActivityState::Idle,
            ActivityState::Walk,
            ActivityState::Jump,
            ActivityState::Hungry,
            ActivityState::Dirty,
            ActivityState::Sad,
            ActivityState::Happy,
            ActivityState::Eating,
            ActivityState::Washing,
            ActivityState::Playing,
            ActivityState::Dance,
        ];
        for st in states {
            g.activity = st;
            for _ in 0..t.frame_period {
                g.anim_tick(&t);
                let p = pose(&g);
                assert!((0.0..=1.5).contains(&p.eye_scale), "{st:?}");
                assert!((0.0..=1.0).contains(&p.mouth_open), "{st:?}");
                assert!(p.arm_angle.abs() <= 45.0, "{st:?}");
                assert!(p.leg_offset.abs() <= 3.0, "{st:?}");
                assert!((0.0..=0.6).contains(&p.body_squash), "{st:?}");
                assert!(p.tail_angle.abs() <= 35.0, "{st:?}");
            }
        }
    }

    #[test]
    fn jump_height_flows_into_the_pose() {
        let t = Tuning::default();
        let mut g = state();
        g.trigger_jump(&t);
        g.anim_tick(&t);
        let p = pose(&g);
        assert!(p.jump_height < 0.0);
        assert_eq!(p.jump_height, g.jump.height);
    }

    #[test]
    fn blink_happens_once_per_period() {
        let t = Tuning::default();
        let mut g = state();
        let mut blinks = 0;
        for _ in 0..t.frame_period {
            g.anim_tick(&t);
            if pose(&g).blink {
                blinks += 1;
            }
        }
        assert_eq!(blinks, 3);
    }

    #[test]
    fn fast_tick_releases_an_expired_lock() {
        let t = Tuning::default();
        let mut g = state();
        g.stats.hunger = 50.0;
        assert!(g.feed(&t));
        g.advance_clock(t.action_lock_ms);
        g.anim_tick(&t);
        assert_eq!(g.activity, ActivityState::Idle);
    }
}
