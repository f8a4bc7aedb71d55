//! Rendering layer.  All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.  Canvas coordinates (800×400 play area)
//! are scaled onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use bash_quest::compute::format_time;
use bash_quest::entities::{Enemy, GameState, Particle, Tier, Vec2, CANVAS_WIDTH, GAME_AREA_HEIGHT};
use bash_quest::filesystem::{self, format_path};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BOSS: Color = Color::Magenta;
const C_TARGET: Color = Color::White;
const C_PROMPT: Color = Color::Green;
const C_ERROR: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved under the play area for the console.
const CONSOLE_ROWS: u16 = 6;

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Beginner => Color::Blue,
        Tier::Intermediate => Color::Green,
        Tier::Advanced => Color::Yellow,
        Tier::Pro => Color::Red,
    }
}

/// `#rrggbb` → terminal colour.
fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
        _ => Color::White,
    }
}

/// Terminal frame the state is drawn into.
#[derive(Clone, Copy)]
struct Frame {
    width: u16,
    height: u16,
}

impl Frame {
    fn play_rows(self) -> u16 {
        self.height.saturating_sub(CONSOLE_ROWS + 2).max(1)
    }

    fn console_top(self) -> u16 {
        self.play_rows() + 2
    }

    /// Canvas point → (col, row), clamped inside the border.
    fn project(self, p: Vec2) -> (u16, u16) {
        let cols = self.width.saturating_sub(2).max(1) as f32;
        let rows = self.play_rows() as f32;
        let col = (p.x / CANVAS_WIDTH * cols).clamp(0.0, cols - 1.0) as u16 + 1;
        let row = (p.y / GAME_AREA_HEIGHT * rows).clamp(0.0, rows - 1.0) as u16 + 1;
        (col, row)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    high_score: u32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let frame = Frame { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, frame)?;
    draw_hud(out, state, high_score, frame)?;

    for particle in &state.particles {
        draw_particle(out, particle, frame)?;
    }
    for enemy in state.active_enemies() {
        let targeted = state.target_enemy == Some(enemy.id);
        draw_enemy(out, enemy, targeted, state.text_animation_phase, frame)?;
    }
    draw_player(out, state, frame)?;
    draw_console(out, state, frame)?;

    if !state.started {
        draw_banner(out, frame, &["BASH QUEST: SURVIVAL", "Enter - Start   Q - Quit"], Color::Cyan)?;
    } else if state.game_over {
        draw_game_over(out, state, high_score, frame)?;
    } else if state.paused {
        draw_banner(out, frame, &["PAUSED", "Esc - Resume"], Color::Yellow)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, frame: Frame) -> std::io::Result<()> {
    let w = frame.width as usize;
    let bottom = frame.play_rows() + 1;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(frame.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (top border row) ──────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    high_score: u32,
    frame: Frame,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(2, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        " Score:{:>6}  Hi:{:>6}  {} ",
        state.score,
        high_score.max(state.score),
        format_time(state.timer_ms)
    )))?;

    let tier = format!(" [ {} ] ", state.current_tier.label());
    out.queue(cursor::MoveTo((frame.width / 2).saturating_sub(tier.len() as u16 / 2), 0))?;
    out.queue(style::SetForegroundColor(tier_color(state.current_tier)))?;
    out.queue(Print(&tier))?;

    let filled = (state.player.health * 10 / state.player.max_health.max(1)) as usize;
    let turrets = if state.turrets_enabled { "  TURRETS" } else { "" };
    let right = format!(
        " HP {}{} {}{} ",
        "█".repeat(filled),
        "░".repeat(10 - filled.min(10)),
        state.player.health,
        turrets
    );
    let rx = frame.width.saturating_sub(right.chars().count() as u16 + 2);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, frame: Frame) -> std::io::Result<()> {
    let (col, row) = frame.project(state.player.position);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(">_"))?;
    Ok(())
}

fn enemy_label(enemy: &Enemy) -> String {
    let base = if bash_quest::commands::is_standalone(enemy.command.name) {
        enemy.command.name.to_string()
    } else {
        format!("{} {}", enemy.command.name, enemy.filename)
    };
    match enemy.sequence_progress() {
        Some((index, len)) => format!("☠ {} ({}/{})", base, index + 1, len),
        None => base,
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    targeted: bool,
    phase: f32,
    frame: Frame,
) -> std::io::Result<()> {
    let (col, row) = frame.project(enemy.position);
    let label = format!("[{}]", enemy_label(enemy));
    // Freshly spawned enemies sit on the right edge; keep the label on screen.
    let len = label.chars().count() as u16;
    let col = col.min(frame.width.saturating_sub(len + 1)).max(1);
    let room = frame.width.saturating_sub(col + 1) as usize;
    let visible: String = label.chars().take(room).collect();

    let color = if targeted {
        C_TARGET
    } else if enemy.is_boss() {
        C_BOSS
    } else {
        tier_color(enemy.command.tier)
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    if targeted && phase < 500.0 {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(visible))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, particle: &Particle, frame: Frame) -> std::io::Result<()> {
    let (col, row) = frame.project(particle.position);
    let glyph = if particle.life > particle.max_life * 0.5 { "*" } else { "·" };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(hex_color(particle.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Console (below the play area) ─────────────────────────────────────────────

fn draw_console<W: Write>(out: &mut W, state: &GameState, frame: Frame) -> std::io::Result<()> {
    let top = frame.console_top();
    let path = filesystem::path_string(&state.filesystem);

    out.queue(cursor::MoveTo(1, top))?;
    out.queue(style::SetForegroundColor(C_PROMPT))?;
    out.queue(Print(format!("user@bash-quest:{path}$ ")))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(&state.current_input))?;
    out.queue(Print("█"))?;

    if !state.suggestions.is_empty() {
        out.queue(cursor::MoveTo(1, top + 1))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("Tab → {}", state.suggestions.join("   "))))?;
    }

    out.queue(cursor::MoveTo(1, top + 2))?;
    if let Some(error) = &state.last_error {
        out.queue(style::SetForegroundColor(C_ERROR))?;
        out.queue(Print(error.to_string()))?;
    } else if let Some(description) = &state.last_command_description {
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(description))?;
    }

    if let Some(target) = state.target() {
        if let Some(location) = filesystem::locate(&state.filesystem, target.id) {
            out.queue(cursor::MoveTo(1, top + 3))?;
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print(format!("{} lives in {}", target.filename, format_path(&location))))?;
        }
    }

    if !state.path_variables.is_empty() {
        let vars: Vec<String> = state
            .path_variables
            .iter()
            .map(|v| format!("${}={}", v.name, v.path))
            .collect();
        out.queue(cursor::MoveTo(1, top + 4))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(vars.join("  ")))?;
    } else if state.show_path_tutorial {
        out.queue(cursor::MoveTo(1, top + 4))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("Tip: export TRASH=/trash then mv <file> $TRASH"))?;
    }

    out.queue(cursor::MoveTo(1, top + 5))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Enter: run   Tab: complete   Esc: pause   Ctrl-C: quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    frame: Frame,
    lines: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let cx = frame.width / 2;
    let start_row = (frame.play_rows() / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    high_score: u32,
    frame: Frame,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if state.score > high_score {
        format!("★ NEW BEST: {:>6} ★", state.score)
    } else {
        format!("Best Score:  {:>6}", high_score)
    };
    draw_banner(
        out,
        frame,
        &[
            "╔════════════════════╗",
            "║    GAME  OVER      ║",
            "╚════════════════════╝",
            score_line.as_str(),
            best_line.as_str(),
            "Enter - Play Again   Q - Quit",
        ],
        Color::Red,
    )
}
