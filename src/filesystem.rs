//! Virtual file system the player navigates with `cd`, `ls` and `pwd`.
//!
//! The tree is plain owned data.  Every operation takes the current
//! [`FileSystemState`] by reference and returns a fresh copy, so states
//! handed out earlier are never aliased by later mutations.
//!
//! Directory contents are hidden until the player runs `ls` in them:
//! [`visible_entries`] is gated on the `explored` set, while navigation
//! itself always walks the real tree.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::error::GameError;

// ── File pools ────────────────────────────────────────────────────────────────

pub const DOCUMENTS: [&str; 12] = [
    "resume.pdf", "report.docx", "notes.txt", "budget.xlsx",
    "presentation.pptx", "contract.pdf", "todo.md", "meeting_minutes.txt",
    "project_plan.xlsx", "thesis.pdf", "letter.docx", "schedule.xlsx",
];
pub const PICTURES: [&str; 12] = [
    "vacation.jpg", "family.png", "party.jpg", "screenshot.png",
    "profile.jpg", "landscape.png", "birthday.jpg", "wedding.png",
    "sunset.jpg", "cat.png", "dog.jpg", "selfie.png",
];
pub const VIDEOS: [&str; 12] = [
    "tutorial.mp4", "movie.mkv", "lecture.mp4", "gameplay.webm",
    "interview.mp4", "concert.mkv", "vlog.mp4", "animation.webm",
    "presentation.mp4", "travel.mkv", "wedding.mp4", "highlights.webm",
];
pub const MUSIC: [&str; 12] = [
    "song.mp3", "album.flac", "playlist.m3u", "podcast.mp3",
    "soundtrack.flac", "recording.wav", "ringtone.mp3", "audiobook.m4a",
    "live_performance.mp3", "remix.flac", "voice_memo.wav", "radio_show.mp3",
];
pub const DOWNLOADS: [&str; 12] = [
    "installer.exe", "archive.zip", "ebook.pdf", "software.dmg",
    "update.msi", "dataset.csv", "driver.exe", "backup.tar.gz",
    "movie.mp4", "album.zip", "game.iso", "firmware.bin",
];
pub const CODE: [&str; 12] = [
    "script.js", "index.html", "styles.css", "app.py",
    "main.cpp", "config.json", "server.js", "database.sql",
    "utils.py", "component.jsx", "api.ts", "Dockerfile",
];
pub const CONFIG: [&str; 12] = [
    "settings.json", "config.yml", ".env", "preferences.xml",
    "options.ini", "profile.conf", "rules.json", "schema.xml",
    "routes.yml", "users.json", "permissions.conf", "defaults.ini",
];
pub const LOGS: [&str; 12] = [
    "system.log", "error.log", "access.log", "debug.log",
    "application.log", "server.log", "events.log", "audit.log",
    "performance.log", "security.log", "network.log", "database.log",
];

/// Name pool matching a directory name, defaulting to documents.
pub fn pool_for(dir: &str) -> &'static [&'static str] {
    match dir.to_lowercase().as_str() {
        "documents" | "docs" => &DOCUMENTS,
        "pictures" | "pics" | "images" => &PICTURES,
        "videos" | "movies" => &VIDEOS,
        "music" | "audio" => &MUSIC,
        "downloads" | "dl" => &DOWNLOADS,
        "code" | "src" | "source" => &CODE,
        "config" | "conf" | "etc" => &CONFIG,
        "log" | "logs" | "var" => &LOGS,
        _ => &DOCUMENTS,
    }
}

// ── Tree ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    File,
    Directory(Vec<FsNode>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FsNode {
    pub name: String,
    pub kind: NodeKind,
    /// Enemy this node was spawned for.  A lookup key, not ownership.
    pub linked_enemy: Option<Uuid>,
}

impl FsNode {
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::File,
            linked_enemy: None,
        }
    }

    pub fn directory(name: &str, children: Vec<FsNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Directory(children),
            linked_enemy: None,
        }
    }

    fn new_entry(name: &str, kind: EntryKind, linked_enemy: Uuid) -> Self {
        let node = match kind {
            EntryKind::File => Self::file(name),
            EntryKind::Directory => Self::directory(name, Vec::new()),
        };
        Self {
            linked_enemy: Some(linked_enemy),
            ..node
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[FsNode] {
        match &self.kind {
            NodeKind::Directory(children) => children,
            NodeKind::File => &[],
        }
    }

    pub fn child_directory(&self, name: &str) -> Option<&FsNode> {
        self.children()
            .iter()
            .find(|c| c.is_directory() && c.name == name)
    }
}

fn files(names: &[&str]) -> Vec<FsNode> {
    names.iter().map(|n| FsNode::file(n)).collect()
}

/// The world every game starts in.
pub fn initial_tree() -> FsNode {
    let user = FsNode::directory(
        "user",
        vec![
            FsNode::directory("documents", files(&DOCUMENTS[..5])),
            FsNode::directory("pictures", files(&PICTURES[..5])),
            FsNode::directory("videos", files(&VIDEOS[..5])),
            FsNode::directory("music", files(&MUSIC[..5])),
            FsNode::directory("downloads", files(&DOWNLOADS[..5])),
            FsNode::directory("code", files(&CODE[..5])),
            FsNode::file("readme.txt"),
        ],
    );

    FsNode::directory(
        "root",
        vec![
            FsNode::directory("home", vec![user]),
            FsNode::directory("bin", files(&["bash", "ls", "cd", "mv", "cp", "rm"])),
            FsNode::directory("etc", files(&CONFIG[..6])),
            FsNode::directory("var", vec![FsNode::directory("log", files(&LOGS[..6]))]),
        ],
    )
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FileSystemState {
    pub root: FsNode,
    /// Directory names walked from the root.
    pub current_path: Vec<String>,
    /// Path strings where `ls` has been run.  Only ever grows.
    pub explored: BTreeSet<String>,
}

impl Default for FileSystemState {
    fn default() -> Self {
        Self {
            root: initial_tree(),
            current_path: Vec::new(),
            explored: BTreeSet::from(["/".to_string()]),
        }
    }
}

/// `"/"` for the root, otherwise `/a/b`.
pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    let joined: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
    format!("/{}", joined.join("/"))
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Directory named by `current_path`.  A path that stops resolving part
/// way resolves to the deepest directory reached.
pub fn current_directory(fs: &FileSystemState) -> &FsNode {
    let mut current = &fs.root;
    for segment in &fs.current_path {
        match current.child_directory(segment) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

pub fn path_string(fs: &FileSystemState) -> String {
    format_path(&fs.current_path)
}

pub fn is_explored(fs: &FileSystemState) -> bool {
    fs.explored.contains(&path_string(fs))
}

/// Contents of the current directory, or nothing if it hasn't been listed.
pub fn visible_entries(fs: &FileSystemState) -> &[FsNode] {
    if is_explored(fs) {
        current_directory(fs).children()
    } else {
        &[]
    }
}

/// Names of visible subdirectories, in tree order.
pub fn visible_directories(fs: &FileSystemState) -> Vec<&str> {
    visible_entries(fs)
        .iter()
        .filter(|n| n.is_directory())
        .map(|n| n.name.as_str())
        .collect()
}

/// Depth-first search for the node spawned for `enemy`.  Returns the path
/// segments of the directory containing it.
pub fn locate(fs: &FileSystemState, enemy: Uuid) -> Option<Vec<String>> {
    let mut stack: Vec<(&FsNode, Vec<String>)> = vec![(&fs.root, Vec::new())];

    while let Some((node, path)) = stack.pop() {
        if node.children().iter().any(|c| c.linked_enemy == Some(enemy)) {
            return Some(path);
        }
        // Reverse so the first child is explored first.
        for child in node.children().iter().rev().filter(|c| c.is_directory()) {
            let mut child_path = path.clone();
            child_path.push(child.name.clone());
            stack.push((child, child_path));
        }
    }
    None
}

// ── Transitions ───────────────────────────────────────────────────────────────

pub fn change_directory(fs: &FileSystemState, target: &str) -> Result<FileSystemState, GameError> {
    let target = target.trim();

    if target.is_empty() || target == "/" {
        return Ok(FileSystemState {
            current_path: Vec::new(),
            ..fs.clone()
        });
    }

    if target == ".." {
        if fs.current_path.is_empty() {
            return Err(GameError::AlreadyAtRoot);
        }
        let mut current_path = fs.current_path.clone();
        current_path.pop();
        return Ok(FileSystemState {
            current_path,
            ..fs.clone()
        });
    }

    if current_directory(fs).child_directory(target).is_none() {
        return Err(GameError::DirectoryNotFound(target.to_string()));
    }

    let mut current_path = fs.current_path.clone();
    current_path.push(target.to_string());
    Ok(FileSystemState {
        current_path,
        ..fs.clone()
    })
}

pub fn mark_explored(fs: &FileSystemState) -> FileSystemState {
    let mut explored = fs.explored.clone();
    explored.insert(path_string(fs));
    FileSystemState {
        explored,
        ..fs.clone()
    }
}

/// Descend into the directory child `name`, creating it if missing.
fn ensure_directory<'a>(node: &'a mut FsNode, name: &str) -> Option<&'a mut FsNode> {
    let NodeKind::Directory(children) = &mut node.kind else {
        return None;
    };
    let index = match children.iter().position(|c| c.is_directory() && c.name == name) {
        Some(i) => i,
        None => {
            children.push(FsNode::directory(name, Vec::new()));
            children.len() - 1
        }
    };
    children.get_mut(index)
}

/// Append a new leaf under `parent_path`, creating missing directories on
/// the way.  Existing nodes are never replaced.
pub fn create_entry(
    fs: &FileSystemState,
    parent_path: &[&str],
    name: &str,
    kind: EntryKind,
    linked_enemy: Uuid,
) -> FileSystemState {
    let mut next = fs.clone();
    let mut current = &mut next.root;

    for segment in parent_path {
        current = match ensure_directory(current, segment) {
            Some(dir) => dir,
            None => return fs.clone(),
        };
    }

    if let NodeKind::Directory(children) = &mut current.kind {
        children.push(FsNode::new_entry(name, kind, linked_enemy));
    }
    next
}
