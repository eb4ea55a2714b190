use crate::anim;
use crate::config::{load_settings, project_paths, save_settings_atomic, Settings};
use crate::input::{collect_input_nonblocking, map_event_to_action, PlayerAction};
use crate::model::{GameState, Scene, Tuning};
use crate::render::{
    draw_effect_markers, draw_particles, draw_pet, draw_settings, draw_text, ui_overlay, Cell,
    Terminal, PET_H,
};
use crate::storage::{load_or_init_save, save_atomic};
use std::cmp::{max, min};
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    tuning: Tuning,
    state: GameState,
    scene: Scene,
    settings_cursor: usize,
    name_edit: String,
    paths: crate::config::Paths,
    term: Terminal,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths()?;
        let mut settings = load_settings(&paths.settings_path);
        let tuning = Tuning::default();

        // ensure deterministic seed exists
        if settings.seed == 0 {
            settings.seed = 0xC0FFEE_u64;
        }

        let stats = load_or_init_save(&paths.save_path);

        let term = Terminal::begin()?;
        let arena_w = pet_area_width(term.cols);
        let state = GameState::new(stats, settings.seed, arena_w);

        Ok(Self {
            settings,
            tuning,
            state,
            scene: Scene::Main,
            settings_cursor: 0,
            name_edit: String::new(),
            paths,
            term,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        let anim_step = Duration::from_millis(self.tuning.anim_step_ms);
        let particle_step = Duration::from_millis(self.tuning.particle_step_ms);
        let behavior_step = Duration::from_millis(self.tuning.behavior_step_ms);
        let decay_step = Duration::from_secs(self.tuning.decay_step_secs);

        let mut last_frame = Instant::now();
        let mut anim_accum = Duration::ZERO;
        let mut particle_accum = Duration::ZERO;
        let mut behavior_accum = Duration::ZERO;
        let mut decay_accum = Duration::ZERO;

        while !self.should_quit {
            if self.term.resize_if_needed()? {
                let arena_w = pet_area_width(self.term.cols);
                self.state.arena_w = arena_w;
                self.state.pos_x = self
                    .state
                    .pos_x
                    .clamp(0.0, (arena_w - self.tuning.pet_width).max(0.0));
            }

            // input
            let events = collect_input_nonblocking(frame_dt)?;
            for ev in events {
                if let Some(action) = map_event_to_action(&self.scene, ev) {
                    self.apply_action(action)?;
                    if self.should_quit {
                        break;
                    }
                }
            }

            // the four independent cadences, all fed from one wall clock
            let now = Instant::now();
            let real_dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            self.state.advance_clock(real_dt.as_millis() as u64);

            anim_accum = anim_accum.saturating_add(real_dt);
            particle_accum = particle_accum.saturating_add(real_dt);
            behavior_accum = behavior_accum.saturating_add(real_dt);
            decay_accum = decay_accum.saturating_add(real_dt);

            while anim_accum >= anim_step {
                self.state.anim_tick(&self.tuning);
                anim_accum = anim_accum.saturating_sub(anim_step);
            }
            while particle_accum >= particle_step {
                self.state.particle_tick(&self.tuning);
                particle_accum = particle_accum.saturating_sub(particle_step);
            }
            while behavior_accum >= behavior_step {
                self.state.behavior_tick(&self.tuning);
                behavior_accum = behavior_accum.saturating_sub(behavior_step);
            }
            while decay_accum >= decay_step {
                self.state.stats.decay_tick(&self.tuning);
                self.save_now()?;
                decay_accum = decay_accum.saturating_sub(decay_step);
            }

            self.render_frame()?;

            // frame cap
            spin_sleep(frame_dt, Instant::now());
        }

        self.save_now()?;
        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn apply_action(&mut self, action: PlayerAction) -> anyhow::Result<()> {
        match action {
            PlayerAction::Feed => {
                if self.state.feed(&self.tuning) {
                    self.save_now()?;
                }
            }
            PlayerAction::Wash => {
                if self.state.wash(&self.tuning) {
                    self.save_now()?;
                }
            }
            PlayerAction::Play => {
                if self.state.play(&self.tuning) {
                    self.save_now()?;
                }
            }
            PlayerAction::Cuddle => {
                if self.state.pet(&self.tuning) {
                    self.save_now()?;
                }
            }
            PlayerAction::Jump => self.state.trigger_jump(&self.tuning),
            PlayerAction::GrabToggle => {
                let grabbed = !self.state.dragging;
                self.state.set_dragging(grabbed);
            }
            PlayerAction::HelpToggle => {
                self.scene = match self.scene {
                    Scene::Help => Scene::Main,
                    _ => Scene::Help,
                };
            }
            PlayerAction::SettingsOpen => {
                self.scene = Scene::Settings;
                self.settings_cursor = 0;
            }
            PlayerAction::SettingsMove(delta) => {
                let len = 2i32;
                let mut next = self.settings_cursor as i32 + delta;
                if next < 0 {
                    next = len - 1;
                } else if next >= len {
                    next = 0;
                }
                self.settings_cursor = next as usize;
            }
            PlayerAction::SettingsToggle => {
                if self.settings_cursor == 0 {
                    self.settings.enable_color = !self.settings.enable_color;
                } else {
                    self.name_edit = self.state.stats.name.clone();
                    self.scene = Scene::Rename;
                }
            }
            PlayerAction::RenameChar(ch) => {
                const NAME_MAX: usize = 18;
                if self.name_edit.len() < NAME_MAX {
                    self.name_edit.push(ch);
                }
            }
            PlayerAction::RenameBackspace => {
                self.name_edit.pop();
            }
            PlayerAction::RenameCommit => {
                let trimmed = self.name_edit.trim();
                if !trimmed.is_empty() {
                    self.state.stats.name = trimmed.to_string();
                    self.save_now()?;
                }
                self.scene = Scene::Settings;
            }
            PlayerAction::RenameCancel => {
                self.scene = Scene::Settings;
            }
            PlayerAction::Back => self.scene = Scene::Main,
            PlayerAction::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let bg = crossterm::style::Color::Black;
        self.term.cur.clear(bg);

        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;
        let panel_w = min(max(26, cols / 3), cols - 10);

        let pose = anim::pose(&self.state);

        // sprite anchored to a ground line; the hop lifts it in whole cells
        let ground_y = rows - 2;
        let hop = (pose.jump_height / 8.0).round() as i32;
        let x0 = panel_w + self.state.pos_x.round() as i32;
        let y0 = ground_y - PET_H + hop;

        draw_pet(
            &mut self.term.cur,
            &pose,
            x0,
            y0,
            self.settings.enable_color,
            bg,
        );
        draw_effect_markers(
            &mut self.term.cur,
            &self.state.active_effects(),
            x0,
            y0,
            self.state.frame,
            bg,
        );
        draw_particles(
            &mut self.term.cur,
            &self.state.particles,
            x0,
            y0,
            self.settings.enable_color,
            bg,
        );

        ui_overlay(&mut self.term.cur, &self.state, &self.scene);

        if matches!(self.scene, Scene::Settings) {
            draw_settings(
                &mut self.term.cur,
                &self.state,
                &self.settings,
                self.settings_cursor,
            );
        }

        if matches!(self.scene, Scene::Help) {
            self.draw_center_box(
                "How to care for your pet",
                "Keep the meters up; neglect sours the mood.\n\n\
    F Feed: +hunger/+happiness, refused when full.\n\
    W Wash: +clean/+health, refused when spotless.\n\
    P Play: +happiness, costs hunger, refused when starving.\n\
    C Cuddle: +happiness, always welcome.\n\
    J Jump: make it hop.\n\
    G Grab: pick the pet up / put it down.\n\n\
    A hungry, dirty or sad pet will tell you with its posture.\n\
    Tab opens Settings (color, rename).\n\n\
    Esc or H to close help.",
            )?;
        }

        if matches!(self.scene, Scene::Rename) {
            let mut preview = self.name_edit.clone();
            if preview.len() < 18 {
                preview.push('_');
            }
            self.draw_center_box(
                "Rename pet",
                &format!(
                    "Type a name (max 18 chars).\n\nName: {}\n\nEnter save | Esc cancel | Backspace delete",
                    preview
                ),
            )?;
        }

        self.term.present(true)?;
        Ok(())
    }

    fn draw_center_box(&mut self, title: &str, body: &str) -> anyhow::Result<()> {
        let w = self.term.cols;
        let h = self.term.rows;

        let bw = min(60, w.saturating_sub(4));
        let bh = min(18, h.saturating_sub(4));

        let x0 = (w - bw) / 2;
        let y0 = (h - bh) / 2;

        let fg = crossterm::style::Color::White;
        let bg = crossterm::style::Color::Black;
        let cell = |ch| Cell {
            ch,
            fg,
            bg,
            bold: false,
        };

        for x in x0..x0 + bw {
            self.term.cur.set(x, y0, cell('─'));
            self.term.cur.set(x, y0 + bh - 1, cell('─'));
        }
        for y in y0..y0 + bh {
            self.term.cur.set(x0, y, cell('│'));
            self.term.cur.set(x0 + bw - 1, y, cell('│'));
        }
        self.term.cur.set(x0, y0, cell('┌'));
        self.term.cur.set(x0 + bw - 1, y0, cell('┐'));
        self.term.cur.set(x0, y0 + bh - 1, cell('└'));
        self.term.cur.set(x0 + bw - 1, y0 + bh - 1, cell('┘'));

        draw_text(&mut self.term.cur, x0 + 2, y0 + 1, title, fg, bg);

        let mut yy = y0 + 3;
        for line in body.lines() {
            if yy >= y0 + bh - 1 {
                break;
            }
            draw_text(&mut self.term.cur, x0 + 2, yy, line, fg, bg);
            yy += 1;
        }

        Ok(())
    }

    fn save_now(&self) -> anyhow::Result<()> {
        save_atomic(&self.paths.save_path, &self.state.stats)?;
        Ok(())
    }
}

fn pet_area_width(cols: u16) -> f32 {
    let cols = cols as i32;
    let panel_w = min(max(26, cols / 3), cols - 10);
    (cols - panel_w).max(20) as f32
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    app.run()?;
    Ok(())
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
