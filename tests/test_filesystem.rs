use bash_quest::error::GameError;
use bash_quest::filesystem::*;
use uuid::Uuid;

fn at(path: &[&str]) -> FileSystemState {
    FileSystemState {
        current_path: path.iter().map(|s| s.to_string()).collect(),
        ..FileSystemState::default()
    }
}

fn names(nodes: &[FsNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

// ── initial world ─────────────────────────────────────────────────────────────

#[test]
fn initial_tree_layout() {
    let fs = FileSystemState::default();
    assert_eq!(names(current_directory(&fs).children()), ["home", "bin", "etc", "var"]);
    assert!(fs.current_path.is_empty());
    assert!(fs.explored.contains("/"));

    let docs = at(&["home", "user", "documents"]);
    assert_eq!(names(current_directory(&docs).children()), &DOCUMENTS[..5]);
}

#[test]
fn format_path_root_and_nested() {
    assert_eq!(format_path::<&str>(&[]), "/");
    assert_eq!(format_path(&["home", "user"]), "/home/user");
}

#[test]
fn pool_for_aliases() {
    assert_eq!(pool_for("pics"), &PICTURES[..]);
    assert_eq!(pool_for("log"), &LOGS[..]);
    assert_eq!(pool_for("etc"), &CONFIG[..]);
    assert_eq!(pool_for("whatever"), &DOCUMENTS[..]);
}

#[test]
fn unresolvable_path_falls_back_to_deepest_directory() {
    let fs = at(&["home", "nope", "deeper"]);
    assert_eq!(current_directory(&fs).name, "home");
}

// ── cd ────────────────────────────────────────────────────────────────────────

#[test]
fn cd_into_child_and_back() {
    let fs = FileSystemState::default();
    let fs = change_directory(&fs, "home").unwrap();
    assert_eq!(path_string(&fs), "/home");
    let fs = change_directory(&fs, "user").unwrap();
    assert_eq!(path_string(&fs), "/home/user");
    let fs = change_directory(&fs, "..").unwrap();
    assert_eq!(path_string(&fs), "/home");
    let fs = change_directory(&fs, "/").unwrap();
    assert_eq!(path_string(&fs), "/");
}

#[test]
fn cd_parent_at_root_fails() {
    let fs = FileSystemState::default();
    assert_eq!(change_directory(&fs, ".."), Err(GameError::AlreadyAtRoot));
}

#[test]
fn cd_to_missing_or_file_fails() {
    let fs = at(&["home", "user"]);
    assert_eq!(
        change_directory(&fs, "secret"),
        Err(GameError::DirectoryNotFound("secret".to_string()))
    );
    assert_eq!(
        change_directory(&fs, "readme.txt"),
        Err(GameError::DirectoryNotFound("readme.txt".to_string()))
    );
}

#[test]
fn cd_does_not_require_exploration() {
    let fs = FileSystemState::default();
    let fs = change_directory(&fs, "etc").unwrap();
    assert!(!is_explored(&fs));
    assert_eq!(path_string(&fs), "/etc");
}

#[test]
fn cd_leaves_source_state_untouched() {
    let fs = FileSystemState::default();
    let _ = change_directory(&fs, "home").unwrap();
    assert!(fs.current_path.is_empty());
}

// ── exploration ───────────────────────────────────────────────────────────────

#[test]
fn visible_entries_gated_on_explored() {
    let fs = at(&["home", "user"]);
    assert!(visible_entries(&fs).is_empty());
    assert!(visible_directories(&fs).is_empty());

    let fs = mark_explored(&fs);
    assert!(fs.explored.contains("/home/user"));
    assert_eq!(visible_entries(&fs).len(), 7);
    assert_eq!(
        visible_directories(&fs),
        ["documents", "pictures", "videos", "music", "downloads", "code"]
    );
}

#[test]
fn explored_set_only_grows() {
    let fs = mark_explored(&at(&["etc"]));
    let fs = change_directory(&fs, "/").unwrap();
    let fs = mark_explored(&fs);
    assert!(fs.explored.contains("/etc"));
    assert!(fs.explored.contains("/"));
}

// ── spawn side effects ────────────────────────────────────────────────────────

#[test]
fn create_entry_appends_linked_leaf() {
    let id = Uuid::from_u128(1);
    let fs = FileSystemState::default();
    let next = create_entry(&fs, &["home", "user", "documents"], "resume.pdf", EntryKind::File, id);

    let fs_at = FileSystemState {
        current_path: vec!["home".into(), "user".into(), "documents".into()],
        ..next.clone()
    };
    let docs = current_directory(&fs_at);
    // Duplicates of the seeded file are allowed.
    assert_eq!(docs.children().len(), 6);
    let leaf = docs.children().last().unwrap();
    assert_eq!(leaf.name, "resume.pdf");
    assert_eq!(leaf.linked_enemy, Some(id));
    assert!(!leaf.is_directory());

    assert_eq!(current_directory(&at(&["home", "user", "documents"])).children().len(), 5);
}

#[test]
fn create_entry_builds_missing_parents() {
    let id = Uuid::from_u128(2);
    let fs = FileSystemState::default();
    let next = create_entry(&fs, &["opt", "games"], "saves", EntryKind::Directory, id);

    let fs_at = FileSystemState {
        current_path: vec!["opt".into(), "games".into()],
        ..next.clone()
    };
    let games = current_directory(&fs_at);
    assert_eq!(games.name, "games");
    assert!(games.child_directory("saves").is_some());
    assert_eq!(locate(&next, id), Some(vec!["opt".to_string(), "games".to_string()]));
}

#[test]
fn locate_finds_parent_path_or_none() {
    let id = Uuid::from_u128(3);
    let fs = create_entry(&FileSystemState::default(), &["var", "log"], "error.log", EntryKind::File, id);
    assert_eq!(locate(&fs, id), Some(vec!["var".to_string(), "log".to_string()]));
    assert_eq!(locate(&fs, Uuid::from_u128(4)), None);

    let at_root = create_entry(&fs, &[], "projects", EntryKind::Directory, Uuid::from_u128(5));
    assert_eq!(locate(&at_root, Uuid::from_u128(5)), Some(Vec::new()));
}
