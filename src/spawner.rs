//! Enemy creation.  Enemies bound to `cd`, `cat`, `rm`, `cp` or `mv` also
//! grow the virtual file system with the directory or file they stand for.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::{Builder, Uuid};

use crate::commands::{self, is_standalone};
use crate::entities::{
    Command, Enemy, EnemyKind, Size, Tier, Vec2, CANVAS_WIDTH, GAME_AREA_HEIGHT,
};
use crate::filesystem::{self, EntryKind, FileSystemState};

// ── Spawn constants ───────────────────────────────────────────────────────────

pub const ENEMY_SIZE: Size = Size::new(40.0, 40.0);
pub const BOSS_SIZE: Size = Size::new(80.0, 80.0);

/// Keep clear of the HUD at the top.
pub const MIN_SPAWN_HEIGHT: f32 = 100.0;
/// Keep clear of the bottom 30% of the play area.
pub const MAX_SPAWN_HEIGHT_FRACTION: f32 = 0.7;

pub const BOSS_SEQUENCE_LENGTH: usize = 3;
pub const BOSS_HEALTH: u32 = 100;
pub const BOSS_SPEED: f32 = 0.3;
pub const BOSS_DAMAGE: u32 = 20;
pub const ENEMY_HEALTH: u32 = 1;
/// Regular speed is `ENEMY_BASE_SPEED + [0, ENEMY_SPEED_JITTER)`.
pub const ENEMY_BASE_SPEED: f32 = 0.5;
pub const ENEMY_SPEED_JITTER: f32 = 0.5;
pub const ENEMY_DAMAGE: u32 = 10;

/// Where `cd` enemies plant their directory: `(parent, name)`.
pub const DIRECTORY_OPTIONS: [(&[&str], &str); 5] = [
    (&[], "projects"),
    (&["home"], "user"),
    (&["home", "user"], "desktop"),
    (&["var"], "cache"),
    (&["etc"], "network"),
];

/// Where file-bound enemies plant their file.  The last segment picks the pool.
pub const FILE_TARGETS: [&[&str]; 8] = [
    &["home", "user", "documents"],
    &["home", "user", "pictures"],
    &["home", "user", "videos"],
    &["home", "user", "music"],
    &["home", "user", "downloads"],
    &["home", "user", "code"],
    &["etc"],
    &["var", "log"],
];

const FILE_COMMANDS: [&str; 4] = ["cat", "rm", "cp", "mv"];

const NAME_PREFIXES: [&str; 15] = [
    "data", "config", "user", "system", "app",
    "server", "client", "backup", "temp", "log",
    "file", "doc", "report", "project", "test",
];

const NAME_SUFFIXES: [&str; 12] = [
    "", "1", "2", "3", "_old", "_new", "_backup",
    "_temp", "_final", "_draft", "_v1", "_v2",
];

fn extensions(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Beginner => &[".txt", ".log", ".md", ".csv", ".json"],
        Tier::Intermediate => &[".js", ".py", ".html", ".css", ".xml"],
        Tier::Advanced => &[".cpp", ".java", ".go", ".rs", ".php"],
        Tier::Pro => &[".sh", ".bash", ".conf", ".yml", ".toml"],
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pick<'a>(items: &'a [&'a str], rng: &mut impl Rng) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Prefix + suffix + tier extension, e.g. `backup_v2.rs`.
pub fn random_filename(tier: Tier, rng: &mut impl Rng) -> String {
    format!(
        "{}{}{}",
        pick(&NAME_PREFIXES, rng),
        pick(&NAME_SUFFIXES, rng),
        pick(extensions(tier), rng)
    )
}

/// Random v4 id drawn from the injected generator.
pub fn enemy_id(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Regular command choice.  During onboarding only `cd` and standalone
/// commands are eligible.
fn pick_regular_command(tier: Tier, onboarding: bool, rng: &mut impl Rng) -> Command {
    if !onboarding {
        return commands::random_command(tier, rng);
    }

    let pool = commands::by_tier(tier);
    let eligible: Vec<Command> = pool
        .iter()
        .copied()
        .filter(|c| c.name == "cd" || is_standalone(c.name))
        .collect();

    match eligible.choose(rng) {
        Some(command) => *command,
        None => pool
            .iter()
            .copied()
            .find(|c| c.name == "cd")
            .unwrap_or_else(|| commands::random_command(tier, rng)),
    }
}

/// Choose the enemy's filename and apply any file-system side effect.
fn bind_filename(
    command: &Command,
    id: Uuid,
    fs: &FileSystemState,
    rng: &mut impl Rng,
) -> (String, FileSystemState) {
    if command.name == "cd" {
        let (parent, name) = DIRECTORY_OPTIONS[rng.gen_range(0..DIRECTORY_OPTIONS.len())];
        let fs = filesystem::create_entry(fs, parent, name, EntryKind::Directory, id);
        return (name.to_string(), fs);
    }

    if is_standalone(command.name) {
        return (command.name.to_string(), fs.clone());
    }

    if FILE_COMMANDS.contains(&command.name) {
        let parent = FILE_TARGETS[rng.gen_range(0..FILE_TARGETS.len())];
        let dir = parent.last().copied().unwrap_or_default();
        let name = pick(filesystem::pool_for(dir), rng);
        let fs = filesystem::create_entry(fs, parent, name, EntryKind::File, id);
        return (name.to_string(), fs);
    }

    (random_filename(command.tier, rng), fs.clone())
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Create an enemy for `tier` at the right edge of the play area.
///
/// Returns the enemy together with the file system it was spawned into;
/// the input `fs` is left untouched.
pub fn spawn(
    tier: Tier,
    is_boss: bool,
    fs: &FileSystemState,
    elapsed_ms: f32,
    onboarding_ms: f32,
    rng: &mut impl Rng,
) -> (Enemy, FileSystemState) {
    let id = enemy_id(rng);
    let size = if is_boss { BOSS_SIZE } else { ENEMY_SIZE };

    let max_y = GAME_AREA_HEIGHT * MAX_SPAWN_HEIGHT_FRACTION;
    let spawn_range = (max_y - MIN_SPAWN_HEIGHT - size.h).max(0.0);
    let position = Vec2::new(CANVAS_WIDTH, MIN_SPAWN_HEIGHT + rng.gen::<f32>() * spawn_range);

    let (enemy, fs) = if is_boss {
        let sequence = commands::random_sequence(tier, BOSS_SEQUENCE_LENGTH, rng);
        let command = sequence[0];
        let enemy = Enemy {
            id,
            command,
            kind: EnemyKind::Boss { sequence, index: 0 },
            health: BOSS_HEALTH,
            max_health: BOSS_HEALTH,
            position,
            speed: BOSS_SPEED,
            damage: BOSS_DAMAGE,
            size,
            active: true,
            filename: random_filename(tier, rng),
        };
        (enemy, fs.clone())
    } else {
        let command = pick_regular_command(tier, elapsed_ms < onboarding_ms, rng);
        let (filename, fs) = bind_filename(&command, id, fs, rng);
        let enemy = Enemy {
            id,
            command,
            kind: EnemyKind::Regular,
            health: ENEMY_HEALTH,
            max_health: ENEMY_HEALTH,
            position,
            speed: ENEMY_BASE_SPEED + rng.gen::<f32>() * ENEMY_SPEED_JITTER,
            damage: ENEMY_DAMAGE,
            size,
            active: true,
            filename,
        };
        (enemy, fs)
    };

    debug!(
        id = %enemy.id,
        command = enemy.command.name,
        filename = %enemy.filename,
        boss = is_boss,
        "enemy spawned"
    );
    (enemy, fs)
}
