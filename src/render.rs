use crate::anim::Pose;
use crate::config::Settings;
use crate::model::{Effect, Facing, GameState, Particle, ParticleKind, Scene};
use crate::sim::derive_mood;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn set_signed(&mut self, x: i32, y: i32, c: Cell) {
        if x >= 0 && y >= 0 {
            self.set(x as u16, y as u16, c);
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
            c.bold = false;
        }
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        let prev = CellBuffer::new(cols, rows);
        let cur = CellBuffer::new(cols, rows);

        Ok(Self {
            out,
            cols,
            rows,
            prev,
            cur,
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        Ok(true)
    }

    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(
            xx,
            y,
            Cell {
                ch,
                fg,
                bg,
                bold: false,
            },
        );
    }
}

fn bar(value01: f32, width: usize) -> String {
    let v = value01.clamp(0.0, 1.0);
    let fill = (v * width as f32 + 0.5) as usize;
    let mut s = String::new();
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

/* -----------------------------
   Pet sprite, driven by the pose snapshot
------------------------------ */

pub(crate) const PET_W: i32 = 17;
pub(crate) const PET_H: i32 = 9;

fn eye_char(p: &Pose) -> char {
    if p.blink {
        '-'
    } else if p.eye_scale >= 1.1 {
        'O'
    } else if p.eye_scale <= 0.75 {
        '.'
    } else {
        'o'
    }
}

fn mouth_line(p: &Pose) -> &'static str {
    if p.mouth_open >= 0.45 {
        r"|    \_O_/    |"
    } else if p.mouth_open >= 0.25 {
        r"|    \_o_/    |"
    } else {
        r"|    \___/    |"
    }
}

/// Draw the cat at cell origin (x0, y0) = the sprite's top-left. The whole
/// sprite is a pure function of the pose; nothing here touches the state.
pub(crate) fn draw_pet(
    buf: &mut CellBuffer,
    pose: &Pose,
    x0: i32,
    y0: i32,
    enable_color: bool,
    bg: Color,
) {
    let body = if enable_color {
        Color::Rgb {
            r: 255,
            g: 180,
            b: 200,
        }
    } else {
        Color::White
    };
    let dark = if enable_color {
        Color::Rgb {
            r: 200,
            g: 140,
            b: 160,
        }
    } else {
        Color::Grey
    };

    let eye = eye_char(pose);
    let squashed = pose.body_squash >= 0.2;

    // arms swing with the angle sign, legs alternate with the offset
    let (arm_l, arm_r) = if pose.arm_angle > 8.0 {
        ('\\', '/')
    } else if pose.arm_angle < -8.0 {
        ('/', '\\')
    } else {
        ('|', '|')
    };
    let leg_shift = if pose.leg_offset > 1.0 {
        1
    } else if pose.leg_offset < -1.0 {
        -1
    } else {
        0
    };

    let head = [
        r"  /\_______/\  ".to_string(),
        r" /           \ ".to_string(),
        format!(r"|   {eye}     {eye}   |"),
        r"|      ^      |".to_string(),
        mouth_line(pose).to_string(),
    ];
    let torso = if squashed {
        vec![format!(r" {arm_l}\_________/{arm_r} ")]
    } else {
        vec![
            r" \           / ".to_string(),
            format!(r" {arm_l}\_________/{arm_r} "),
        ]
    };

    let mut y = y0;
    for line in head.iter().chain(torso.iter()) {
        let mut x = x0 + 1;
        for ch in line.chars() {
            if ch != ' ' {
                buf.set_signed(
                    x,
                    y,
                    Cell {
                        ch,
                        fg: body,
                        bg,
                        bold: false,
                    },
                );
            }
            x += 1;
        }
        y += 1;
    }

    // legs
    let base = x0 + 4;
    for (dx, shift) in [(0, leg_shift), (6, -leg_shift)] {
        buf.set_signed(
            base + dx + shift,
            y,
            Cell {
                ch: '|',
                fg: dark,
                bg,
                bold: false,
            },
        );
        buf.set_signed(
            base + dx + shift + 1,
            y,
            Cell {
                ch: '|',
                fg: dark,
                bg,
                bold: false,
            },
        );
    }

    // tail on the side away from the facing direction
    let tail_x = match pose.facing {
        Facing::Right => x0,
        Facing::Left => x0 + PET_W - 1,
    };
    let tail_ch = if pose.tail_angle > 5.0 {
        '/'
    } else if pose.tail_angle < -5.0 {
        '\\'
    } else {
        '|'
    };
    let tail_ch = match pose.facing {
        Facing::Right => tail_ch,
        Facing::Left => match tail_ch {
            '/' => '\\',
            '\\' => '/',
            other => other,
        },
    };
    buf.set_signed(
        tail_x,
        y - 2,
        Cell {
            ch: tail_ch,
            fg: body,
            bg,
            bold: false,
        },
    );
}

fn particle_cell(p: &Particle, enable_color: bool, bg: Color) -> Cell {
    let (ch, fg) = match p.kind {
        ParticleKind::Heart => (
            '♥',
            if enable_color {
                Color::Magenta
            } else {
                Color::White
            },
        ),
        ParticleKind::Water => ('°', if enable_color { Color::Cyan } else { Color::White }),
        ParticleKind::Food => (
            '●',
            if enable_color {
                Color::Yellow
            } else {
                Color::White
            },
        ),
    };
    Cell {
        ch,
        fg,
        bg,
        bold: false,
    }
}

pub(crate) fn draw_particles(
    buf: &mut CellBuffer,
    particles: &[Particle],
    x0: i32,
    y0: i32,
    enable_color: bool,
    bg: Color,
) {
    for p in particles {
        buf.set_signed(
            x0 + p.x.round() as i32,
            y0 + p.y.round() as i32,
            particle_cell(p, enable_color, bg),
        );
    }
}

pub(crate) fn draw_effect_markers(
    buf: &mut CellBuffer,
    effects: &[Effect],
    x0: i32,
    y0: i32,
    frame: u32,
    bg: Color,
) {
    for e in effects {
        match e {
            Effect::HungryMarker => {
                buf.set_signed(
                    x0 + PET_W / 2,
                    y0 - 2,
                    Cell {
                        ch: '?',
                        fg: Color::Yellow,
                        bg,
                        bold: true,
                    },
                );
            }
            Effect::DirtyMarker => {
                for (dx, dy) in [(-2, 2), (PET_W + 1, 4), (PET_W, 1)] {
                    buf.set_signed(
                        x0 + dx,
                        y0 + dy,
                        Cell {
                            ch: '~',
                            fg: Color::DarkGrey,
                            bg,
                            bold: false,
                        },
                    );
                }
            }
            Effect::Bubbles => {
                // slow drift keyed to the frame counter
                let wobble = if (frame / 10) % 2 == 0 { 0 } else { 1 };
                for (dx, dy) in [(-2, 1 + wobble), (PET_W + 1, 3 - wobble), (2, -1)] {
                    buf.set_signed(
                        x0 + dx,
                        y0 + dy,
                        Cell {
                            ch: 'o',
                            fg: Color::Cyan,
                            bg,
                            bold: false,
                        },
                    );
                }
            }
            Effect::Hearts | Effect::Food | Effect::Water => {}
        }
    }
}

/* -----------------------------
   UI overlay (text + meters + clock)
------------------------------ */

pub(crate) fn ui_overlay(buf: &mut CellBuffer, st: &GameState, scene: &Scene) {
    let bg = Color::Black;
    let fg = Color::White;

    let mood = derive_mood(&st.stats);
    let title = format!(
        "deskpet  |  {}  Lv.{}  |  Mood: {:?}  |  {:?}",
        st.stats.name, st.stats.level, mood, st.activity
    );
    draw_text(buf, 1, 0, &title, fg, bg);

    let clock = chrono::Local::now().format("%H:%M:%S  %Y-%m-%d").to_string();
    let cx = buf.w.saturating_sub(clock.len() as u16 + 1);
    draw_text(buf, cx, 0, &clock, Color::Cyan, bg);

    let s = &st.stats;
    let lines = [
        ("Hunger", s.hunger),
        ("Health", s.health),
        ("Clean ", s.clean),
        ("Happy ", s.happiness),
    ];
    for (i, (name, val)) in lines.iter().enumerate() {
        let b = bar(*val / 100.0, 14);
        let line = format!("{name}: {b} {:>5.1}", val);
        draw_text(buf, 1, 2 + i as u16, &line, fg, bg);
    }

    let exp = bar(s.exp as f32 / s.exp_to_next as f32, 14);
    let line = format!("Exp   : {exp} {:>3}/{}", s.exp, s.exp_to_next);
    draw_text(buf, 1, 6, &line, fg, bg);

    let days = (s.total_play_secs / 86_400.0) as u64;
    let hours = ((s.total_play_secs % 86_400.0) / 3600.0) as u64;
    let info = format!(
        "Born {}  |  cared for {}d {}h",
        s.birth_date.format("%Y-%m-%d"),
        days,
        hours
    );
    draw_text(buf, 1, 8, &info, Color::DarkGrey, bg);

    let help = match scene {
        Scene::Main => {
            "Keys: q quit | f feed | w wash | p play | c cuddle | j jump | g grab | tab settings | h help"
        }
        Scene::Settings => "Settings: ↑↓ select | enter apply | esc back",
        Scene::Help => "Help: esc back | h close | q quit",
        Scene::Rename => "Rename: type name | enter save | esc cancel",
    };
    draw_text(buf, 1, buf.h.saturating_sub(1), help, fg, bg);
}

pub(crate) fn draw_settings(
    buf: &mut CellBuffer,
    st: &GameState,
    settings: &Settings,
    cursor_pos: usize,
) {
    let bg = Color::Black;
    let fg = Color::White;
    let hi = Color::Yellow;

    let start_x = 1;
    let start_y = 11;

    draw_text(buf, start_x, start_y, "Settings", fg, bg);

    let color_line = format!(
        "{} Color: {}",
        if cursor_pos == 0 { ">" } else { " " },
        if settings.enable_color { "on" } else { "off" }
    );
    draw_text(
        buf,
        start_x,
        start_y + 2,
        &color_line,
        if cursor_pos == 0 { hi } else { fg },
        bg,
    );

    let mut name_display = st.stats.name.clone();
    if name_display.len() > 16 {
        name_display.truncate(15);
        name_display.push_str("...");
    }
    let name_line = format!(
        "{} Name: {}",
        if cursor_pos == 1 { ">" } else { " " },
        name_display
    );
    draw_text(
        buf,
        start_x,
        start_y + 3,
        &name_line,
        if cursor_pos == 1 { hi } else { fg },
        bg,
    );
}
