//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::info;

use crate::config::Tuning;
use crate::entities::{Enemy, GameState, Player, Tier};
use crate::filesystem::FileSystemState;
use crate::{particles, spawner};

/// Velocities are expressed per reference frame of this many ms.
pub const REFERENCE_FRAME_MS: f32 = 16.0;

/// Period of the pulsing-text animation.
pub const TEXT_ANIMATION_PERIOD_MS: f32 = 1000.0;

// ── Constructors & lifecycle ──────────────────────────────────────────────────

/// Fresh, not yet started game.
pub fn new_game(tuning: Tuning) -> GameState {
    GameState {
        player: Player::default(),
        enemies: Vec::new(),
        score: 0,
        timer_ms: 0.0,
        current_tier: Tier::Beginner,
        started: false,
        paused: false,
        game_over: false,
        current_input: String::new(),
        last_error: None,
        last_command_description: None,
        suggestions: Vec::new(),
        turrets_enabled: false,
        turret_cooldown_ms: 0.0,
        target_enemy: None,
        particles: Vec::new(),
        text_animation_phase: 0.0,
        path_variables: Vec::new(),
        show_path_tutorial: true,
        tab_cycle_index: 0,
        visible_filenames: Vec::new(),
        filesystem: FileSystemState::default(),
        tuning,
    }
}

pub fn start(state: &GameState) -> GameState {
    GameState {
        started: true,
        ..state.clone()
    }
}

pub fn pause(state: &GameState) -> GameState {
    GameState {
        paused: true,
        ..state.clone()
    }
}

pub fn resume(state: &GameState) -> GameState {
    GameState {
        paused: false,
        ..state.clone()
    }
}

/// Discard everything and begin a new, already started game.
pub fn restart(tuning: Tuning) -> GameState {
    start(&new_game(tuning))
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn one enemy for the current tier and adopt its file-system changes.
pub fn spawn_enemy(state: &GameState, is_boss: bool, rng: &mut impl Rng) -> GameState {
    let (enemy, filesystem) = spawner::spawn(
        state.current_tier,
        is_boss,
        &state.filesystem,
        state.timer_ms,
        state.tuning.onboarding_ms,
        rng,
    );
    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    GameState {
        enemies,
        filesystem,
        ..state.clone()
    }
}

// ── Per-frame update ──────────────────────────────────────────────────────────

/// Sorted filenames of active enemies, used for tab completion.
pub fn visible_filenames(enemies: &[Enemy]) -> Vec<String> {
    let mut names: Vec<String> = enemies
        .iter()
        .filter(|e| e.active)
        .map(|e| e.filename.clone())
        .collect();
    names.sort();
    names
}

/// Advance the simulation by `delta_ms`.  A paused, finished or unstarted
/// game is returned unchanged.
pub fn advance(state: &GameState, delta_ms: f32) -> GameState {
    if !state.is_running() {
        return state.clone();
    }

    // ── 1. Timer & tier ──────────────────────────────────────────────────────
    let timer_ms = state.timer_ms + delta_ms;
    let current_tier = Tier::for_elapsed(timer_ms, state.tuning.tier_upgrade_ms).max(state.current_tier);
    if current_tier != state.current_tier {
        info!(tier = current_tier.label(), "tier escalated");
    }

    // ── 2. Move enemies; contact deactivates and damages once ────────────────
    let edge = state.player.right_edge();
    let step = delta_ms / REFERENCE_FRAME_MS;
    let mut damage: u32 = 0;

    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .map(|e| {
            let x = e.position.x - e.speed * step;
            if x <= edge {
                damage += e.damage;
                Enemy {
                    active: false,
                    ..e.clone()
                }
            } else {
                let mut moved = e.clone();
                moved.position.x = x;
                moved
            }
        })
        .collect();

    // ── 3. Player health ─────────────────────────────────────────────────────
    let health = state.player.health.saturating_sub(damage);
    let game_over = health == 0;
    if game_over {
        info!(score = state.score, timer_ms, "game over");
    }

    // ── 4. Turret ────────────────────────────────────────────────────────────
    let mut turret_cooldown_ms = (state.turret_cooldown_ms - delta_ms).max(0.0);
    if state.turrets_enabled && turret_cooldown_ms == 0.0 {
        if let Some(target) = enemies.iter_mut().find(|e| e.active && !e.is_boss()) {
            target.active = false;
            turret_cooldown_ms = state.tuning.turret_cooldown_ms;
        }
    }

    // ── 5. Effects & caches ──────────────────────────────────────────────────
    let particles = particles::tick(&state.particles, delta_ms);
    let text_animation_phase = (state.text_animation_phase + delta_ms) % TEXT_ANIMATION_PERIOD_MS;
    let visible_filenames = visible_filenames(&enemies);
    let target_enemy = state
        .target_enemy
        .filter(|id| enemies.iter().any(|e| e.id == *id && e.active));

    GameState {
        player: Player {
            health,
            ..state.player.clone()
        },
        enemies,
        timer_ms,
        current_tier,
        game_over,
        turret_cooldown_ms,
        particles,
        text_animation_phase,
        visible_filenames,
        target_enemy,
        ..state.clone()
    }
}

/// `MM:SS` for a millisecond duration.
pub fn format_time(ms: f32) -> String {
    let total_seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
