//! Interprets what the player types.
//!
//! [`process`] is the central state transition for a submitted line.
//! [`preview_input`] and [`complete_input`] only touch the uncommitted
//! input line and its derived hints.

use rand::Rng;
use tracing::{debug, info};

use crate::commands::{self, is_standalone};
use crate::entities::{Enemy, EnemyKind, GameState, PathVariable, Tier};
use crate::error::GameError;
use crate::filesystem::{self, FileSystemState};
use crate::particles;

pub const MAX_SUGGESTIONS: usize = 4;

const TURRETS_ON_DESCRIPTION: &str = "Activates automatic turret system to defeat regular enemies";
const TURRETS_OFF_DESCRIPTION: &str = "Deactivates automatic turret system";

/// Commands whose second argument is a destination.
const DESTINATION_COMMANDS: [&str; 2] = ["mv", "cp"];

// ── Matching ──────────────────────────────────────────────────────────────────

/// Whether `input` defeats (or advances) `enemy`.
///
/// Any `cd <anything>` hits a `cd` enemy, and a bare `ls`/`pwd` hits the
/// matching enemy regardless of its filename.
pub fn matches(input: &str, enemy: &Enemy) -> bool {
    let input = input.trim();
    let name = enemy.command.name;

    if (name == "cd" && input.starts_with("cd ")) || ((name == "ls" || name == "pwd") && input == name) {
        return true;
    }
    if is_standalone(name) {
        return input == name;
    }
    input == name || input == format!("{} {}", name, enemy.filename)
}

/// Enemy after one successful hit, and whether that hit finished it.
fn hit(enemy: &Enemy) -> (Enemy, bool) {
    match &enemy.kind {
        EnemyKind::Regular => (
            Enemy {
                active: false,
                ..enemy.clone()
            },
            true,
        ),
        EnemyKind::Boss { sequence, index } => {
            let next = index + 1;
            match sequence.get(next) {
                Some(command) => (
                    Enemy {
                        command: *command,
                        kind: EnemyKind::Boss {
                            sequence: sequence.clone(),
                            index: next,
                        },
                        ..enemy.clone()
                    },
                    false,
                ),
                None => (
                    Enemy {
                        active: false,
                        kind: EnemyKind::Boss {
                            sequence: sequence.clone(),
                            index: sequence.len(),
                        },
                        ..enemy.clone()
                    },
                    true,
                ),
            }
        }
    }
}

/// Apply `input` to the first active enemy it matches.  `None` when
/// nothing matched.
fn strike(input: &str, state: &GameState, rng: &mut impl Rng) -> Option<GameState> {
    let index = state
        .enemies
        .iter()
        .position(|e| e.active && matches(input, e))?;
    let enemy = &state.enemies[index];
    let (updated, defeated) = hit(enemy);

    let mut particles = state.particles.clone();
    if defeated {
        particles.extend(particles::explosion(
            enemy.position,
            enemy.size,
            Some(enemy.command.category),
            rng,
        ));
    }

    debug!(id = %enemy.id, command = enemy.command.name, defeated, "enemy hit");

    let mut enemies = state.enemies.clone();
    enemies[index] = updated;

    Some(GameState {
        enemies,
        score: state.score + state.current_tier.score_value(),
        current_input: String::new(),
        last_error: None,
        last_command_description: Some(enemy.command.description.to_string()),
        particles,
        target_enemy: None,
        ..state.clone()
    })
}

// ── File-system commands ──────────────────────────────────────────────────────

fn listing(fs: &FileSystemState) -> String {
    let entries = filesystem::current_directory(fs).children();
    let items = if entries.is_empty() {
        "Directory is empty".to_string()
    } else {
        entries
            .iter()
            .map(|n| format!("{} {}", if n.is_directory() { "d" } else { "-" }, n.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("Contents of {}: {}", filesystem::path_string(fs), items)
}

/// Handle `cd`, `ls` and `pwd`.  `None` for anything else.
fn filesystem_command(input: &str, state: &GameState) -> Option<GameState> {
    let mut parts = input.split_whitespace();
    let command = parts.next()?;

    let (fs, description, error) = match command {
        "cd" => match filesystem::change_directory(&state.filesystem, parts.next().unwrap_or("")) {
            Ok(fs) => {
                let description = format!("Changed directory to {}", filesystem::path_string(&fs));
                (fs, Some(description), None)
            }
            Err(e) => (state.filesystem.clone(), None, Some(e)),
        },
        "ls" => {
            let fs = filesystem::mark_explored(&state.filesystem);
            let description = listing(&fs);
            (fs, Some(description), None)
        }
        "pwd" => {
            let description = format!("Current directory: {}", filesystem::path_string(&state.filesystem));
            (state.filesystem.clone(), Some(description), None)
        }
        _ => return None,
    };

    Some(GameState {
        filesystem: fs,
        current_input: String::new(),
        last_command_description: description,
        last_error: error,
        ..state.clone()
    })
}

/// A file-system command also strikes matching enemies.  Its own outcome
/// (error or listing) stays the message shown.
fn with_strike(match_input: &str, handled: GameState, rng: &mut impl Rng) -> GameState {
    match strike(match_input, &handled, rng) {
        Some(struck) => GameState {
            last_error: handled.last_error,
            last_command_description: handled.last_command_description,
            ..struck
        },
        None => handled,
    }
}

/// `in <path> rmv <dir>?` names the directory to step into.
fn parse_step_navigation(input: &str) -> Option<&str> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [word_in, _path, word_rmv, dir]
            if word_in.eq_ignore_ascii_case("in") && word_rmv.eq_ignore_ascii_case("rmv") =>
        {
            let dir: &str = dir;
            let dir = dir.strip_suffix('?').unwrap_or(dir);
            (!dir.is_empty()).then_some(dir)
        }
        _ => None,
    }
}

// ── PATH variables ────────────────────────────────────────────────────────────

/// `export NAME=VALUE` with exactly one `=`.
fn parse_export(input: &str) -> Option<PathVariable> {
    let rest = input.strip_prefix("export ")?;
    let parts: Vec<&str> = rest.split('=').collect();
    if parts.len() != 2 {
        return None;
    }
    let name = parts[0].trim();
    if name.is_empty() {
        return None;
    }
    Some(PathVariable {
        name: name.to_string(),
        path: parts[1].trim().to_string(),
    })
}

/// Insert or overwrite in place, keeping declaration order.
fn upsert(variables: &[PathVariable], variable: PathVariable) -> Vec<PathVariable> {
    let mut next = variables.to_vec();
    match next.iter_mut().find(|v| v.name == variable.name) {
        Some(existing) => *existing = variable,
        None => next.push(variable),
    }
    next
}

pub fn resolve_path_variable<'a>(state: &'a GameState, name: &str) -> Option<&'a PathVariable> {
    state.path_variables.iter().find(|v| v.name == name)
}

fn requires_destination(input: &str) -> bool {
    DESTINATION_COMMANDS.iter().any(|c| input.starts_with(c))
}

/// Validate a `mv`/`cp` line.  Returns the text to match enemies against
/// (the command and its source, without the destination).
fn check_destination(input: &str, state: &GameState) -> Result<Option<String>, GameError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() < 2 {
        return Ok(None);
    }
    if parts.len() < 3 {
        return Err(GameError::MissingDestination(parts[0].to_string()));
    }
    if let Some(name) = parts[2].strip_prefix('$') {
        if resolve_path_variable(state, name).is_none() {
            return Err(GameError::UnknownPathVariable(name.to_string()));
        }
    }
    Ok(Some(format!("{} {}", parts[0], parts[1])))
}

// ── Submit ────────────────────────────────────────────────────────────────────

/// Process one submitted line.  Rules are tried in order; the first that
/// applies decides the new state.
pub fn process(raw: &str, state: &GameState, rng: &mut impl Rng) -> GameState {
    let input = raw.trim();
    debug!(input, "processing input");

    // ── 1. Turret toggles ────────────────────────────────────────────────────
    if input == "turrets on" && !state.turrets_enabled {
        info!("turrets enabled");
        return GameState {
            turrets_enabled: true,
            current_input: String::new(),
            last_error: None,
            last_command_description: Some(TURRETS_ON_DESCRIPTION.to_string()),
            ..state.clone()
        };
    }
    if input == "turrets off" && state.turrets_enabled {
        info!("turrets disabled");
        return GameState {
            turrets_enabled: false,
            current_input: String::new(),
            last_error: None,
            last_command_description: Some(TURRETS_OFF_DESCRIPTION.to_string()),
            ..state.clone()
        };
    }

    // ── 2–4. Navigation ──────────────────────────────────────────────────────
    if let Some(dir) = parse_step_navigation(input) {
        let rewritten = format!("cd {dir}");
        if let Some(handled) = filesystem_command(&rewritten, state) {
            return with_strike(&rewritten, handled, rng);
        }
    }
    if input == "ls?" {
        if let Some(handled) = filesystem_command("ls", state) {
            return with_strike("ls", handled, rng);
        }
    }
    if let Some(handled) = filesystem_command(input, state) {
        return with_strike(input, handled, rng);
    }

    // ── 5. PATH variables ────────────────────────────────────────────────────
    if let Some(variable) = parse_export(input) {
        let description = format!("Created PATH variable: {}={}", variable.name, variable.path);
        return GameState {
            path_variables: upsert(&state.path_variables, variable),
            show_path_tutorial: false,
            current_input: String::new(),
            last_error: None,
            last_command_description: Some(description),
            ..state.clone()
        };
    }

    // ── 6. Destination commands ──────────────────────────────────────────────
    let mut match_input = input.to_string();
    if requires_destination(input) {
        match check_destination(input, state) {
            Ok(Some(source)) => match_input = source,
            Ok(None) => {}
            Err(e) => {
                return GameState {
                    last_error: Some(e),
                    last_command_description: None,
                    ..state.clone()
                };
            }
        }
    }

    // ── 7. Enemies ───────────────────────────────────────────────────────────
    if let Some(struck) = strike(&match_input, state, rng) {
        return struck;
    }

    // ── 8. Nothing matched ───────────────────────────────────────────────────
    GameState {
        current_input: String::new(),
        last_error: Some(GameError::CommandNotFound(input.to_string())),
        last_command_description: None,
        target_enemy: None,
        ..state.clone()
    }
}

// ── Typing aids ───────────────────────────────────────────────────────────────

/// Up to four completions for the partial input.
pub fn suggestions(input: &str, tier: Tier, fs: &FileSystemState) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();

    if let Some(partial) = input.strip_prefix("cd ") {
        let partial = partial.trim();
        if filesystem::is_explored(fs) {
            if !fs.current_path.is_empty() {
                if "/".starts_with(partial) {
                    out.push("cd /".to_string());
                }
                if "..".starts_with(partial) {
                    out.push("cd ..".to_string());
                }
            }
            out.extend(
                filesystem::visible_directories(fs)
                    .into_iter()
                    .filter(|d| d.starts_with(partial))
                    .map(|d| format!("cd {d}")),
            );
        }
    }

    out.extend(
        commands::up_to_tier(tier)
            .into_iter()
            .filter(|c| c.name.starts_with(input))
            .map(|c| c.name.to_string()),
    );
    out.truncate(MAX_SUGGESTIONS);
    out
}

/// First active enemy the partial input is heading towards.
fn find_target(partial: &str, enemies: &[Enemy]) -> Option<uuid::Uuid> {
    if partial.is_empty() {
        return None;
    }
    enemies
        .iter()
        .filter(|e| e.active)
        .find(|e| {
            if is_standalone(e.command.name) {
                e.command.name.starts_with(partial)
            } else {
                format!("{} {}", e.command.name, e.filename).starts_with(partial)
            }
        })
        .map(|e| e.id)
}

/// Keystroke update: refresh the uncommitted line and its hints.
pub fn preview_input(state: &GameState, partial: &str) -> GameState {
    GameState {
        current_input: partial.to_string(),
        suggestions: suggestions(partial, state.current_tier, &state.filesystem),
        target_enemy: find_target(partial, &state.enemies),
        text_animation_phase: 0.0,
        tab_cycle_index: 0,
        ..state.clone()
    }
}

/// Complete the argument being typed, cycling on repeated tabs.
fn complete_argument(state: &GameState) -> Option<String> {
    let (command, partial) = state.current_input.split_once(' ')?;
    let partial = partial.trim();

    let candidates: Vec<String> = if command == "cd" {
        filesystem::visible_directories(&state.filesystem)
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        state.visible_filenames.clone()
    };

    let pool: Vec<&String> = if partial.is_empty() || candidates.iter().any(|c| c == partial) {
        candidates.iter().collect()
    } else {
        candidates.iter().filter(|c| c.starts_with(partial)).collect()
    };

    if pool.is_empty() {
        return None;
    }
    Some(format!("{} {}", command, pool[state.tab_cycle_index % pool.len()]))
}

/// Tab: complete the argument, else the targeted enemy, else the first
/// suggestion.
pub fn complete_input(state: &GameState) -> GameState {
    let completed = complete_argument(state)
        .or_else(|| {
            state.target().map(|e| {
                if is_standalone(e.command.name) {
                    e.command.name.to_string()
                } else {
                    format!("{} {}", e.command.name, e.filename)
                }
            })
        })
        .or_else(|| state.suggestions.first().cloned());

    match completed {
        Some(line) => GameState {
            suggestions: suggestions(&line, state.current_tier, &state.filesystem),
            current_input: line,
            tab_cycle_index: state.tab_cycle_index + 1,
            ..state.clone()
        },
        None => state.clone(),
    }
}
