use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug)]
pub(crate) enum Scene {
    Main,
    Settings,
    Help,
    Rename,
}

/// The persisted well-being record. Everything else in `GameState` is
/// session-scoped and rebuilt at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Stats {
    pub(crate) name: String,
    pub(crate) level: u32,
    pub(crate) exp: u32,
    pub(crate) exp_to_next: u32,
    pub(crate) hunger: f32,
    pub(crate) health: f32,
    pub(crate) clean: f32,
    pub(crate) happiness: f32,
    pub(crate) total_play_secs: f64,
    pub(crate) birth_date: DateTime<Utc>,
}

impl Stats {
    pub(crate) fn new_default() -> Self {
        Self {
            name: "Momo".to_string(),
            level: 1,
            exp: 0,
            exp_to_next: 100,
            hunger: 80.0,
            health: 100.0,
            clean: 80.0,
            happiness: 80.0,
            total_play_secs: 0.0,
            birth_date: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActivityState {
    Idle,
    Walk,
    Jump,
    Hungry,
    Dirty,
    Sad,
    Happy,
    Eating,
    Washing,
    Playing,
    Dance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mood {
    Hungry,
    Dirty,
    Sick,
    Happy,
    Sad,
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Facing {
    Left,
    Right,
}

impl Facing {
    pub(crate) fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParticleKind {
    Heart,
    Water,
    Food,
}

/// Short-lived visual point entity. Owned by the particle list on
/// `GameState`, stepped once per particle tick, removed at life 0.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Particle {
    pub(crate) kind: ParticleKind,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) vy: f32,
    pub(crate) life: u32,
}

/// Marker/emitter flags the renderer and particle spawner key off.
/// Derived from the activity state, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    HungryMarker,
    DirtyMarker,
    Hearts,
    Bubbles,
    Food,
    Water,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct RngState {
    pub(crate) seed: u64,
    pub(crate) event_counter: u64,
}

impl RngState {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            seed,
            event_counter: 0,
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // Counter-based SplitMix64: deterministic and cheap.
        let mut z = self
            .seed
            .wrapping_add(self.event_counter.wrapping_mul(0x9E3779B97F4A7C15));
        self.event_counter = self.event_counter.wrapping_add(1);

        z = z.wrapping_add(0x9E3779B97F4A7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f32(&mut self) -> f32 {
        // [0,1)
        let v = self.next_u64() >> 40; // 24 bits
        (v as f32) / ((1u64 << 24) as f32)
    }

    pub(crate) fn roll(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }

    pub(crate) fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = (self.next_u64() % items.len() as u64) as usize;
        &items[i]
    }
}

/// Fixed simulation constants. Not persisted, not tunable at runtime; a
/// single struct keeps the tick functions honest about what they read.
#[derive(Clone, Debug)]
pub(crate) struct Tuning {
    pub(crate) decay_step_secs: u64,
    pub(crate) behavior_step_ms: u64,
    pub(crate) anim_step_ms: u64,
    pub(crate) particle_step_ms: u64,

    pub(crate) action_lock_ms: u64,
    pub(crate) pet_lock_ms: u64,

    pub(crate) gravity: f32,
    pub(crate) jump_velocity: f32,
    pub(crate) squash_ms: u64,

    pub(crate) walk_speed: f32,
    pub(crate) pet_width: f32,

    pub(crate) frame_period: u32,

    pub(crate) heart_spawn_p: f32,
    pub(crate) water_spawn_p: f32,
    pub(crate) food_spawn_p: f32,
    pub(crate) food_max: usize,
    pub(crate) heart_life: u32,
    pub(crate) water_life: u32,
    pub(crate) food_life: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            decay_step_secs: 60,
            behavior_step_ms: 3000,
            anim_step_ms: 100,
            particle_step_ms: 100,

            action_lock_ms: 2000,
            pet_lock_ms: 1500,

            gravity: 0.8,
            jump_velocity: -12.0,
            squash_ms: 150,

            walk_speed: 0.6,
            pet_width: 17.0,

            frame_period: 60,

            heart_spawn_p: 0.30,
            water_spawn_p: 0.40,
            food_spawn_p: 0.15,
            food_max: 3,
            heart_life: 20,
            water_life: 16,
            food_life: 25,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct JumpState {
    pub(crate) airborne: bool,
    pub(crate) velocity: f32,
    pub(crate) height: f32,
}

/// The whole simulation context. One owner, passed by `&mut` to every tick
/// function; nothing in the core reads ambient state.
#[derive(Clone, Debug)]
pub(crate) struct GameState {
    pub(crate) stats: Stats,
    pub(crate) activity: ActivityState,
    pub(crate) facing: Facing,
    pub(crate) dragging: bool,
    pub(crate) frame: u32,
    pub(crate) pos_x: f32,
    pub(crate) arena_w: f32,
    pub(crate) jump: JumpState,
    pub(crate) lock_until_ms: Option<u64>,
    pub(crate) squash_until_ms: Option<u64>,
    pub(crate) now_ms: u64,
    pub(crate) rng: RngState,
    pub(crate) particles: Vec<Particle>,
}

impl GameState {
    pub(crate) fn new(stats: Stats, seed: u64, arena_w: f32) -> Self {
        Self {
            stats,
            activity: ActivityState::Idle,
            facing: Facing::Right,
            dragging: false,
            frame: 0,
            pos_x: arena_w / 2.0,
            arena_w,
            jump: JumpState::default(),
            lock_until_ms: None,
            squash_until_ms: None,
            now_ms: 0,
            rng: RngState::new(seed),
            particles: Vec::new(),
        }
    }

    pub(crate) fn advance_clock(&mut self, dt_ms: u64) {
        self.now_ms = self.now_ms.wrapping_add(dt_ms);
    }

    pub(crate) fn locked(&self) -> bool {
        self.lock_until_ms.map_or(false, |t| self.now_ms < t)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct SaveFile {
    pub(crate) version: u32,
    pub(crate) last_seen_utc: DateTime<Utc>,
    pub(crate) stats: Stats,
}
