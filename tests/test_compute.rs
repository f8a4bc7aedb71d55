use bash_quest::commands;
use bash_quest::compute::*;
use bash_quest::config::Tuning;
use bash_quest::entities::*;
use bash_quest::filesystem;
use bash_quest::input::process;

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state() -> GameState {
    start(&new_game(Tuning::default()))
}

fn enemy_at(id: u128, name: &str, x: f32) -> Enemy {
    Enemy {
        id: Uuid::from_u128(id),
        command: commands::find(name).unwrap(),
        kind: EnemyKind::Regular,
        health: 1,
        max_health: 1,
        position: Vec2::new(x, 150.0),
        speed: 1.0,
        damage: 10,
        size: Size::new(40.0, 40.0),
        active: true,
        filename: format!("file{id}.txt"),
    }
}

fn boss_at(id: u128, x: f32) -> Enemy {
    let sequence = vec![commands::find("cat").unwrap(); 3];
    Enemy {
        kind: EnemyKind::Boss { sequence, index: 0 },
        damage: 20,
        speed: 0.3,
        ..enemy_at(id, "cat", x)
    }
}

// ── lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn new_game_defaults() {
    let s = new_game(Tuning::default());
    assert!(!s.started);
    assert!(!s.paused);
    assert!(!s.game_over);
    assert_eq!(s.score, 0);
    assert_eq!(s.player.health, 100);
    assert_eq!(s.current_tier, Tier::Beginner);
    assert!(s.enemies.is_empty());
    assert!(s.show_path_tutorial);
    assert!(!s.turrets_enabled);
    assert_eq!(filesystem::path_string(&s.filesystem), "/");
}

#[test]
fn pause_and_resume_toggle_running() {
    let s = make_state();
    assert!(s.is_running());
    let paused = pause(&s);
    assert!(paused.paused && !paused.is_running());
    assert!(resume(&paused).is_running());
}

#[test]
fn restart_discards_progress() {
    let mut s = make_state();
    s.score = 500;
    s.game_over = true;
    s.enemies.push(enemy_at(1, "ls", 500.0));
    let fresh = restart(s.tuning);
    assert!(fresh.started && !fresh.game_over);
    assert_eq!(fresh.score, 0);
    assert!(fresh.enemies.is_empty());
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_is_noop_unless_running() {
    let mut s = new_game(Tuning::default());
    s.enemies.push(enemy_at(1, "ls", 500.0));
    assert_eq!(advance(&s, 100.0).timer_ms, 0.0);

    let paused = pause(&start(&s));
    let after = advance(&paused, 100.0);
    assert_eq!(after.timer_ms, 0.0);
    assert_eq!(after.enemies[0].position.x, 500.0);

    let over = GameState {
        game_over: true,
        ..start(&s)
    };
    assert_eq!(advance(&over, 100.0).timer_ms, 0.0);
}

#[test]
fn enemies_move_left_by_speed_per_reference_frame() {
    let mut s = make_state();
    s.enemies.push(enemy_at(1, "ls", 500.0));
    let s = advance(&s, 32.0);
    assert_eq!(s.enemies[0].position.x, 498.0);
    assert_eq!(s.timer_ms, 32.0);
}

#[test]
fn contact_damages_once_and_removes_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(1, "ls", 150.5));
    let s = advance(&s, 16.0);
    assert!(!s.enemies[0].active);
    assert_eq!(s.player.health, 90);

    let s = advance(&s, 16.0);
    assert!(s.enemies.is_empty());
    assert_eq!(s.player.health, 90);
}

#[test]
fn health_reaching_zero_ends_game() {
    let mut s = make_state();
    s.player.health = 10;
    s.enemies.push(enemy_at(1, "ls", 150.5));
    let s = advance(&s, 16.0);
    assert_eq!(s.player.health, 0);
    assert!(s.game_over);
    assert!(!s.is_running());
}

#[test]
fn damage_saturates_at_zero() {
    let mut s = make_state();
    s.player.health = 5;
    s.enemies.push(boss_at(1, 150.1));
    let s = advance(&s, 16.0);
    assert_eq!(s.player.health, 0);
    assert!(s.game_over);
}

#[test]
fn tier_escalates_with_time_and_never_drops() {
    let mut s = make_state();
    s.timer_ms = 59990.0;
    let s = advance(&s, 20.0);
    assert_eq!(s.current_tier, Tier::Intermediate);

    let mut t = make_state();
    t.current_tier = Tier::Advanced;
    assert_eq!(advance(&t, 16.0).current_tier, Tier::Advanced);
}

#[test]
fn turret_destroys_first_regular_enemy_and_cools_down() {
    let mut s = make_state();
    s.turrets_enabled = true;
    s.enemies = vec![boss_at(1, 600.0), enemy_at(2, "ls", 600.0), enemy_at(3, "pwd", 600.0)];

    let s = advance(&s, 16.0);
    assert!(s.enemies[0].active);
    assert!(!s.enemies[1].active);
    assert!(s.enemies[2].active);
    assert_eq!(s.turret_cooldown_ms, 5000.0);
    // Turret kills score nothing.
    assert_eq!(s.score, 0);

    let s = advance(&s, 1000.0);
    assert_eq!(s.turret_cooldown_ms, 4000.0);
    assert!(s.enemies.iter().any(|e| e.id == Uuid::from_u128(3) && e.active));
}

#[test]
fn turret_idle_when_disabled() {
    let mut s = make_state();
    s.enemies.push(enemy_at(1, "ls", 600.0));
    let s = advance(&s, 16.0);
    assert!(s.enemies[0].active);
    assert_eq!(s.turret_cooldown_ms, 0.0);
}

#[test]
fn text_phase_wraps() {
    let mut s = make_state();
    s.text_animation_phase = 990.0;
    let s = advance(&s, 20.0);
    assert!((s.text_animation_phase - 10.0).abs() < 1e-3);
}

#[test]
fn visible_filenames_are_sorted_and_active_only() {
    let mut s = make_state();
    let mut gone = enemy_at(3, "cat", 500.0);
    gone.active = false;
    s.enemies = vec![enemy_at(2, "cat", 500.0), enemy_at(1, "cat", 500.0), gone];
    let s = advance(&s, 16.0);
    assert_eq!(s.visible_filenames, ["file1.txt", "file2.txt"]);
}

#[test]
fn stale_target_is_cleared() {
    let mut s = make_state();
    s.enemies.push(enemy_at(1, "ls", 150.5));
    s.target_enemy = Some(Uuid::from_u128(1));
    let s = advance(&s, 16.0);
    assert_eq!(s.target_enemy, None);
}

#[test]
fn particles_are_aged() {
    let mut s = make_state();
    s.enemies.push(enemy_at(1, "ls", 500.0));
    let s = process("ls", &s, &mut seeded_rng());
    assert_eq!(s.particles.len(), 30);
    let s = advance(&s, 2000.0);
    assert!(s.particles.is_empty());
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_enemy_appends_and_adopts_filesystem() {
    let s = make_state();
    let mut rng = seeded_rng();
    let mut next = s.clone();
    for _ in 0..10 {
        next = spawn_enemy(&next, false, &mut rng);
    }
    assert_eq!(next.enemies.len(), 10);
    assert!(s.enemies.is_empty());

    for e in next.enemies.iter().filter(|e| e.command.name == "cd") {
        assert!(filesystem::locate(&next.filesystem, e.id).is_some());
    }
    let boss = spawn_enemy(&next, true, &mut rng);
    assert!(boss.enemies.last().unwrap().is_boss());
}

#[test]
fn spawned_enemy_can_be_typed_down() {
    let mut rng = seeded_rng();
    let s = spawn_enemy(&make_state(), false, &mut rng);
    let e = s.enemies[0].clone();
    let line = if commands::is_standalone(e.command.name) {
        e.command.name.to_string()
    } else {
        format!("{} {}", e.command.name, e.filename)
    };
    let s = process(&line, &s, &mut rng);
    assert!(!s.enemies[0].active);
    assert_eq!(s.score, 10);
}

// ── format_time ───────────────────────────────────────────────────────────────

#[test]
fn format_time_minutes_seconds() {
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(59999.0), "00:59");
    assert_eq!(format_time(61000.0), "01:01");
    assert_eq!(format_time(600000.0), "10:00");
}
