use crate::model::{ActivityState, Effect, GameState, Particle, ParticleKind, Tuning};

impl GameState {
    /// Effect flags follow the activity state, so a lock expiring back to
    /// idle clears them with no extra bookkeeping.
    pub(crate) fn active_effects(&self) -> Vec<Effect> {
        match self.activity {
            ActivityState::Eating => vec![Effect::Food],
            ActivityState::Washing => vec![Effect::Water, Effect::Bubbles],
            ActivityState::Playing | ActivityState::Happy => vec![Effect::Hearts],
            ActivityState::Hungry => vec![Effect::HungryMarker],
            ActivityState::Dirty => vec![Effect::DirtyMarker],
            _ => Vec::new(),
        }
    }

    /// One particle interval: roll spawns for the active emitters, then give
    /// every live particle exactly one position/life step and drop the dead.
    ///
    /// Particle coordinates are cells relative to the pet sprite's top-left
    /// corner; the renderer adds the sprite origin.
    pub(crate) fn particle_tick(&mut self, t: &Tuning) {
        for effect in self.active_effects() {
            match effect {
                Effect::Hearts => {
                    if self.rng.roll(t.heart_spawn_p) {
                        let x = 3.0 + self.rng.next_f32() * 11.0;
                        self.particles.push(Particle {
                            kind: ParticleKind::Heart,
                            x,
                            y: 1.0 + self.rng.next_f32() * 2.0,
                            vy: -0.5,
                            life: t.heart_life,
                        });
                    }
                }
                Effect::Water => {
                    if self.rng.roll(t.water_spawn_p) {
                        let x = 2.0 + self.rng.next_f32() * 13.0;
                        self.particles.push(Particle {
                            kind: ParticleKind::Water,
                            x,
                            y: -3.0 + self.rng.next_f32() * 3.0,
                            vy: 0.6,
                            life: t.water_life,
                        });
                    }
                }
                Effect::Food => {
                    let live_food = self
                        .particles
                        .iter()
                        .filter(|p| p.kind == ParticleKind::Food)
                        .count();
                    if live_food < t.food_max && self.rng.roll(t.food_spawn_p) {
                        let x = 7.0 + self.rng.next_f32() * 3.0;
                        self.particles.push(Particle {
                            kind: ParticleKind::Food,
                            x,
                            y: 4.0,
                            vy: 0.3,
                            life: t.food_life,
                        });
                    }
                }
                Effect::Bubbles | Effect::HungryMarker | Effect::DirtyMarker => {}
            }
        }

        // prune first: a particle stays visible through the tick its life
        // reaches zero and disappears on the next one
        self.particles.retain(|p| p.life > 0);
        for p in &mut self.particles {
            p.y += p.vy;
            p.life -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stats;

    fn state() -> GameState {
        GameState::new(Stats::new_default(), 42, 120.0)
    }

    #[test]
    fn particle_lives_exactly_its_lifetime() {
        let t = Tuning::default();
        let mut g = state();
        g.particles.push(Particle {
            kind: ParticleKind::Heart,
            x: 5.0,
            y: 5.0,
            vy: -0.5,
            life: 20,
        });
        for tick in 1..=20 {
            g.particle_tick(&t);
            assert_eq!(g.particles.len(), 1, "gone too early at tick {tick}");
        }
        g.particle_tick(&t);
        assert!(g.particles.is_empty(), "still present on the 21st tick");
    }

    #[test]
    fn particles_move_by_their_velocity_each_tick() {
        let t = Tuning::default();
        let mut g = state();
        g.particles.push(Particle {
            kind: ParticleKind::Water,
            x: 4.0,
            y: 0.0,
            vy: 0.6,
            life: 10,
        });
        g.particle_tick(&t);
        g.particle_tick(&t);
        assert_eq!(g.particles[0].y, 1.2);
        assert_eq!(g.particles[0].x, 4.0);
    }

    #[test]
    fn washing_emits_only_water() {
        let t = Tuning::default();
        let mut g = state();
        g.activity = ActivityState::Washing;
        let mut seen = 0;
        for _ in 0..100 {
            g.particle_tick(&t);
            seen += g.particles.len();
            assert!(g.particles.iter().all(|p| p.kind == ParticleKind::Water));
        }
        assert!(seen > 0, "a hundred washing ticks should spawn something");
    }

    #[test]
    fn hearts_rise_and_water_falls() {
        let t = Tuning::default();
        let mut g = state();
        g.activity = ActivityState::Happy;
        let mut hearts = 0;
        for _ in 0..100 {
            g.particle_tick(&t);
            hearts += g.particles.len();
            assert!(g.particles.iter().all(|p| p.vy < 0.0));
        }
        assert!(hearts > 0);

        let mut g = state();
        g.activity = ActivityState::Washing;
        let mut drops = 0;
        for _ in 0..100 {
            g.particle_tick(&t);
            drops += g.particles.len();
            assert!(g.particles.iter().all(|p| p.vy > 0.0));
        }
        assert!(drops > 0);
    }

    #[test]
    fn food_is_capped() {
        let t = Tuning::default();
        let mut g = state();
        g.activity = ActivityState::Eating;
        for _ in 0..200 {
            g.particle_tick(&t);
            let food = g
                .particles
                .iter()
                .filter(|p| p.kind == ParticleKind::Food)
                .count();
            assert!(food <= t.food_max);
        }
    }

    #[test]
    fn idle_emits_nothing() {
        let t = Tuning::default();
        let mut g = state();
        for _ in 0..50 {
            g.particle_tick(&t);
        }
        assert!(g.particles.is_empty());
        assert!(g.active_effects().is_empty());
    }

    #[test]
    fn marker_flags_follow_need_states() {
        let mut g = state();
        g.activity = ActivityState::Hungry;
        assert_eq!(g.active_effects(), vec![Effect::HungryMarker]);
        g.activity = ActivityState::Dirty;
        assert_eq!(g.active_effects(), vec![Effect::DirtyMarker]);
        g.activity = ActivityState::Washing;
        assert_eq!(g.active_effects(), vec![Effect::Water, Effect::Bubbles]);
    }

    #[test]
    fn spawn_stream_is_deterministic_per_seed() {
        let t = Tuning::default();
        let mut a = state();
        let mut b = state();
        a.activity = ActivityState::Playing;
        b.activity = ActivityState::Playing;
        for _ in 0..50 {
            a.particle_tick(&t);
            b.particle_tick(&t);
        }
        assert_eq!(a.particles.len(), b.particles.len());
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.y, pb.y);
        }
    }
}
