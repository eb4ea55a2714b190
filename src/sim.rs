use crate::model::{Mood, Stats, Tuning};

const EXP_CURVE: f32 = 1.2;

impl Stats {
    /// Feeding only works while there is room left in the hunger meter.
    pub(crate) fn feed(&mut self) -> bool {
        if self.hunger >= 100.0 {
            return false;
        }
        self.hunger = (self.hunger + 30.0).clamp(0.0, 100.0);
        self.happiness = (self.happiness + 10.0).clamp(0.0, 100.0);
        self.add_exp(10);
        true
    }

    pub(crate) fn wash(&mut self) -> bool {
        if self.clean >= 100.0 {
            return false;
        }
        self.clean = (self.clean + 40.0).clamp(0.0, 100.0);
        self.health = (self.health + 10.0).clamp(0.0, 100.0);
        self.add_exp(10);
        true
    }

    /// Playing burns food; a pet that is too hungry refuses.
    pub(crate) fn play(&mut self) -> bool {
        if self.hunger <= 20.0 {
            return false;
        }
        self.happiness = (self.happiness + 25.0).clamp(0.0, 100.0);
        self.hunger = (self.hunger - 10.0).clamp(0.0, 100.0);
        self.add_exp(15);
        true
    }

    pub(crate) fn pet(&mut self) -> bool {
        self.happiness = (self.happiness + 15.0).clamp(0.0, 100.0);
        self.add_exp(5);
        true
    }

    /// Slow decay step, one per decay interval.
    pub(crate) fn decay_tick(&mut self, t: &Tuning) {
        self.hunger = (self.hunger - 1.0).clamp(0.0, 100.0);
        self.clean = (self.clean - 0.5).clamp(0.0, 100.0);
        if self.clean < 30.0 {
            self.health = (self.health - 0.5).clamp(0.0, 100.0);
        }
        if self.hunger < 20.0 {
            self.happiness = (self.happiness - 1.0).clamp(0.0, 100.0);
        }
        self.total_play_secs += t.decay_step_secs as f64;
    }

    pub(crate) fn add_exp(&mut self, amount: u32) {
        self.exp += amount;
        while self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.level += 1;
            self.exp_to_next = (self.exp_to_next as f32 * EXP_CURVE) as u32;
        }
    }
}

/// First match wins; hunger outranks everything.
pub(crate) fn derive_mood(s: &Stats) -> Mood {
    if s.hunger < 20.0 {
        return Mood::Hungry;
    }
    if s.clean < 30.0 {
        return Mood::Dirty;
    }
    if s.health < 30.0 {
        return Mood::Sick;
    }
    if s.happiness > 80.0 {
        return Mood::Happy;
    }
    if s.happiness < 30.0 {
        return Mood::Sad;
    }
    Mood::Normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> Stats {
        Stats::new_default()
    }

    fn assert_in_range(s: &Stats) {
        for v in [s.hunger, s.health, s.clean, s.happiness] {
            assert!((0.0..=100.0).contains(&v), "meter out of range: {v}");
        }
        assert!(s.exp < s.exp_to_next);
    }

    #[test]
    fn feed_raises_hunger_and_happiness() {
        let mut s = stats();
        s.hunger = 50.0;
        s.happiness = 50.0;
        assert!(s.feed());
        assert_eq!(s.hunger, 80.0);
        assert_eq!(s.happiness, 60.0);
        assert_eq!(s.exp, 10);
        assert_in_range(&s);
    }

    #[test]
    fn feed_when_full_is_rejected_and_changes_nothing() {
        let mut s = stats();
        s.hunger = 100.0;
        let before = s.clone();
        for _ in 0..3 {
            assert!(!s.feed());
        }
        assert_eq!(s.hunger, before.hunger);
        assert_eq!(s.happiness, before.happiness);
        assert_eq!(s.exp, before.exp);
        assert_eq!(s.level, before.level);
    }

    #[test]
    fn feed_clamps_at_the_top() {
        let mut s = stats();
        s.hunger = 90.0;
        s.happiness = 95.0;
        assert!(s.feed());
        assert_eq!(s.hunger, 100.0);
        assert_eq!(s.happiness, 100.0);
        assert_in_range(&s);
    }

    #[test]
    fn wash_when_spotless_is_rejected() {
        let mut s = stats();
        s.clean = 100.0;
        assert!(!s.wash());
    }

    #[test]
    fn play_requires_food_in_the_tank() {
        let mut s = stats();
        s.hunger = 20.0;
        assert!(!s.play());
        s.hunger = 21.0;
        assert!(s.play());
        assert_eq!(s.hunger, 11.0);
        assert_eq!(s.exp, 15);
    }

    #[test]
    fn pet_always_succeeds() {
        let mut s = stats();
        s.happiness = 100.0;
        assert!(s.pet());
        assert_eq!(s.happiness, 100.0);
        assert_eq!(s.exp, 5);
    }

    #[test]
    fn leveling_normalizes_exp_and_grows_the_curve() {
        let mut s = stats();
        s.exp = 95;
        s.exp_to_next = 100;
        let level = s.level;
        s.add_exp(10);
        assert_eq!(s.level, level + 1);
        assert_eq!(s.exp, 5);
        assert_eq!(s.exp_to_next, 120);
        assert_in_range(&s);
    }

    #[test]
    fn leveling_can_cross_several_levels_at_once() {
        let mut s = stats();
        s.exp = 0;
        s.exp_to_next = 100;
        s.level = 1;
        s.add_exp(100 + 120 + 7);
        assert_eq!(s.level, 3);
        assert_eq!(s.exp, 7);
        assert_eq!(s.exp_to_next, 144);
    }

    #[test]
    fn decay_floors_at_zero() {
        let t = Tuning::default();
        let mut s = stats();
        s.hunger = 0.0;
        s.clean = 0.0;
        s.happiness = 0.5;
        s.decay_tick(&t);
        assert_eq!(s.hunger, 0.0);
        assert_eq!(s.clean, 0.0);
        assert_eq!(s.happiness, 0.0);
        assert_in_range(&s);
    }

    #[test]
    fn dirty_pet_loses_health_on_decay() {
        let t = Tuning::default();
        let mut s = stats();
        s.clean = 25.0;
        s.health = 90.0;
        s.decay_tick(&t);
        assert_eq!(s.health, 89.5);
    }

    #[test]
    fn clean_pet_keeps_health_on_decay() {
        let t = Tuning::default();
        let mut s = stats();
        s.clean = 80.0;
        s.health = 90.0;
        s.decay_tick(&t);
        assert_eq!(s.health, 90.0);
    }

    #[test]
    fn decay_accumulates_play_time() {
        let t = Tuning::default();
        let mut s = stats();
        s.decay_tick(&t);
        s.decay_tick(&t);
        assert_eq!(s.total_play_secs, 120.0);
    }

    #[test]
    fn mood_priority_hunger_beats_dirt() {
        let mut s = stats();
        s.hunger = 10.0;
        s.clean = 10.0;
        assert_eq!(derive_mood(&s), Mood::Hungry);
    }

    #[test]
    fn mood_ladder() {
        let mut s = stats();
        s.hunger = 50.0;
        s.clean = 50.0;
        s.health = 50.0;

        s.happiness = 90.0;
        assert_eq!(derive_mood(&s), Mood::Happy);
        s.happiness = 20.0;
        assert_eq!(derive_mood(&s), Mood::Sad);
        s.happiness = 50.0;
        assert_eq!(derive_mood(&s), Mood::Normal);

        s.health = 10.0;
        assert_eq!(derive_mood(&s), Mood::Sick);
        s.clean = 10.0;
        assert_eq!(derive_mood(&s), Mood::Dirty);
        s.hunger = 10.0;
        assert_eq!(derive_mood(&s), Mood::Hungry);
    }
}
