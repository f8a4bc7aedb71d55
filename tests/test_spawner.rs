use bash_quest::commands::is_standalone;
use bash_quest::entities::{EnemyKind, Tier, CANVAS_WIDTH};
use bash_quest::filesystem::{self, FileSystemState};
use bash_quest::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const ONBOARDING_MS: f32 = 30000.0;
/// Comfortably past onboarding.
const LATE_MS: f32 = 120000.0;

fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn regular_enemy_shape() {
    let fs = FileSystemState::default();
    for seed in 0..30 {
        let (e, _) = spawn(Tier::Beginner, false, &fs, LATE_MS, ONBOARDING_MS, &mut seeded_rng(seed));
        assert_eq!(e.kind, EnemyKind::Regular);
        assert!(e.active);
        assert_eq!(e.position.x, CANVAS_WIDTH);
        assert!(e.position.y >= MIN_SPAWN_HEIGHT && e.position.y <= 240.0);
        assert!(e.speed >= ENEMY_BASE_SPEED && e.speed < ENEMY_BASE_SPEED + ENEMY_SPEED_JITTER);
        assert_eq!(e.damage, ENEMY_DAMAGE);
        assert_eq!(e.health, ENEMY_HEALTH);
        assert_eq!(e.size, ENEMY_SIZE);
        assert_eq!(e.command.tier, Tier::Beginner);
    }
}

#[test]
fn boss_enemy_shape() {
    let fs = FileSystemState::default();
    let (e, next_fs) = spawn(Tier::Advanced, true, &fs, LATE_MS, ONBOARDING_MS, &mut seeded_rng(9));
    match &e.kind {
        EnemyKind::Boss { sequence, index } => {
            assert_eq!(sequence.len(), BOSS_SEQUENCE_LENGTH);
            assert_eq!(*index, 0);
            assert_eq!(e.command, sequence[0]);
            assert!(sequence.iter().all(|c| c.tier == Tier::Advanced));
        }
        EnemyKind::Regular => panic!("expected a boss"),
    }
    assert_eq!(e.health, BOSS_HEALTH);
    assert_eq!(e.speed, BOSS_SPEED);
    assert_eq!(e.damage, BOSS_DAMAGE);
    assert_eq!(e.size, BOSS_SIZE);
    assert!(e.position.y >= MIN_SPAWN_HEIGHT && e.position.y <= 200.0);
    assert_eq!(next_fs, fs);
}

#[test]
fn onboarding_limits_regular_commands() {
    let fs = FileSystemState::default();
    for seed in 0..50 {
        let (e, _) = spawn(Tier::Beginner, false, &fs, 1000.0, ONBOARDING_MS, &mut seeded_rng(seed));
        assert!(
            e.command.name == "cd" || is_standalone(e.command.name),
            "onboarding spawned {}",
            e.command.name
        );
    }
}

#[test]
fn onboarding_without_eligible_commands_falls_back_to_tier() {
    let fs = FileSystemState::default();
    let (e, _) = spawn(Tier::Pro, false, &fs, 0.0, ONBOARDING_MS, &mut seeded_rng(3));
    assert_eq!(e.command.tier, Tier::Pro);
}

#[test]
fn cd_enemy_plants_directory() {
    let fs = FileSystemState::default();
    let mut seen = 0;
    for seed in 0..60 {
        let (e, next) = spawn(Tier::Beginner, false, &fs, 0.0, ONBOARDING_MS, &mut seeded_rng(seed));
        if e.command.name != "cd" {
            continue;
        }
        seen += 1;
        let (parent, name) = DIRECTORY_OPTIONS
            .iter()
            .find(|(_, n)| *n == e.filename)
            .expect("cd filename comes from the directory options");
        assert_eq!(e.filename, *name);
        let expected: Vec<String> = parent.iter().map(|s| s.to_string()).collect();
        assert_eq!(filesystem::locate(&next, e.id), Some(expected));
    }
    assert!(seen > 0);
}

#[test]
fn file_enemies_plant_pool_files() {
    let fs = FileSystemState::default();
    let mut seen = 0;
    for seed in 0..80 {
        let (e, next) = spawn(Tier::Intermediate, false, &fs, LATE_MS, ONBOARDING_MS, &mut seeded_rng(seed));
        match e.command.name {
            "rm" | "cp" | "mv" => {
                seen += 1;
                let parent = filesystem::locate(&next, e.id).expect("file was planted");
                let dir = parent.last().map(String::as_str).unwrap_or_default();
                assert!(filesystem::pool_for(dir).contains(&e.filename.as_str()));
                assert!(FILE_TARGETS
                    .iter()
                    .any(|t| t.iter().map(|s| s.to_string()).collect::<Vec<_>>() == parent));
            }
            _ => {
                assert_eq!(filesystem::locate(&next, e.id), None);
                assert_eq!(next, fs);
            }
        }
    }
    assert!(seen > 0);
}

#[test]
fn standalone_enemy_is_named_after_command() {
    let fs = FileSystemState::default();
    for seed in 0..40 {
        let (e, next) = spawn(Tier::Beginner, false, &fs, 0.0, ONBOARDING_MS, &mut seeded_rng(seed));
        if is_standalone(e.command.name) {
            assert_eq!(e.filename, e.command.name);
            assert_eq!(next, fs);
        }
    }
}

#[test]
fn random_filename_uses_tier_extension() {
    let mut rng = seeded_rng(1);
    for _ in 0..30 {
        let name = random_filename(Tier::Advanced, &mut rng);
        assert!(
            [".cpp", ".java", ".go", ".rs", ".php"].iter().any(|ext| name.ends_with(ext)),
            "{name}"
        );
    }
}

#[test]
fn ids_are_unique_and_seeded() {
    let mut rng = seeded_rng(5);
    let a = enemy_id(&mut rng);
    let b = enemy_id(&mut rng);
    assert_ne!(a, b);
    assert_eq!(enemy_id(&mut seeded_rng(5)), a);
}
