//! All game entity types.  Pure data, no game rules.

use uuid::Uuid;

use crate::config::Tuning;
use crate::error::GameError;
use crate::filesystem::FileSystemState;

// ── Geometry ──────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const CONSOLE_HEIGHT: f32 = 200.0;
pub const GAME_AREA_HEIGHT: f32 = CANVAS_HEIGHT - CONSOLE_HEIGHT;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_INITIAL_X: f32 = 100.0;
pub const PLAYER_INITIAL_Y: f32 = GAME_AREA_HEIGHT - PLAYER_HEIGHT - 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Difficulty band.  Declaration order is the difficulty order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
    Pro,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Beginner, Tier::Intermediate, Tier::Advanced, Tier::Pro];

    /// Score awarded per successful match while playing in this tier.
    pub fn score_value(self) -> u32 {
        match self {
            Tier::Beginner => 10,
            Tier::Intermediate => 20,
            Tier::Advanced => 30,
            Tier::Pro => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Beginner => "BEGINNER",
            Tier::Intermediate => "INTERMEDIATE",
            Tier::Advanced => "ADVANCED",
            Tier::Pro => "PRO",
        }
    }

    /// Tier reached after `elapsed_ms` of play with one upgrade every
    /// `upgrade_ms`.
    pub fn for_elapsed(elapsed_ms: f32, upgrade_ms: f32) -> Tier {
        if upgrade_ms <= 0.0 {
            return Tier::Pro;
        }
        let steps = (elapsed_ms / upgrade_ms).floor() as usize;
        Tier::ALL[steps.min(Tier::ALL.len() - 1)]
    }
}

/// Visual family of a command; selects icon and explosion preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Move,
    List,
    Print,
    Create,
    Delete,
    Copy,
    Rename,
    Search,
    Permission,
    View,
    Transform,
    Archive,
    Pipe,
    Advanced,
}

/// A catalog entry.  Catalog-owned and immutable, hence `Copy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub category: IconCategory,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub health: u32,
    pub max_health: u32,
    pub position: Vec2,
    pub size: Size,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
}

impl Player {
    /// x coordinate enemies must reach to hit the player.
    pub fn right_edge(&self) -> f32 {
        self.position.x + self.size.w
    }
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: 100,
            max_health: 100,
            position: Vec2::new(PLAYER_INITIAL_X, PLAYER_INITIAL_Y),
            size: Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            level: 1,
            experience: 0,
            experience_to_next_level: 100,
        }
    }
}

/// Regular enemies die to one command; bosses walk a command chain.
#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Regular,
    /// `index` is the step currently awaiting input.
    Boss { sequence: Vec<Command>, index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: Uuid,
    /// Active command.  For a boss this always mirrors `sequence[index]`.
    pub command: Command,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    pub position: Vec2,
    pub speed: f32,
    pub damage: u32,
    pub size: Size,
    pub active: bool,
    pub filename: String,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss { .. })
    }

    /// `(index, len)` of a boss's command chain.
    pub fn sequence_progress(&self) -> Option<(usize, usize)> {
        match &self.kind {
            EnemyKind::Boss { sequence, index } => Some((*index, sequence.len())),
            EnemyKind::Regular => None,
        }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// `#rrggbb`
    pub color: &'static str,
    pub size: f32,
    /// Remaining lifetime in ms.
    pub life: f32,
    pub max_life: f32,
    /// Extra per-tick vertical acceleration on top of the global gravity.
    pub gravity: f32,
}

// ── PATH variables ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathVariable {
    pub name: String,
    pub path: String,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Elapsed play time in ms.
    pub timer_ms: f32,
    pub current_tier: Tier,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub current_input: String,
    pub last_error: Option<GameError>,
    pub last_command_description: Option<String>,
    /// At most four completions for the partial input.
    pub suggestions: Vec<String>,
    pub turrets_enabled: bool,
    pub turret_cooldown_ms: f32,
    /// Non-owning reference to the enemy best matching the partial input.
    pub target_enemy: Option<Uuid>,
    pub particles: Vec<Particle>,
    /// Cycles through 0..1000 ms for pulsing text.
    pub text_animation_phase: f32,
    pub path_variables: Vec<PathVariable>,
    pub show_path_tutorial: bool,
    pub tab_cycle_index: usize,
    /// Sorted filenames of active enemies, refreshed every frame.
    pub visible_filenames: Vec<String>,
    pub filesystem: FileSystemState,
    pub tuning: Tuning,
}

impl GameState {
    /// Started, not paused and not over.
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn enemy(&self, id: Uuid) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Resolve `target_enemy`, ignoring enemies no longer in play.
    pub fn target(&self) -> Option<&Enemy> {
        self.target_enemy
            .and_then(|id| self.enemy(id))
            .filter(|e| e.active)
    }

    pub fn active_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.active)
    }
}
