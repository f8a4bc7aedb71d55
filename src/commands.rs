//! Static command catalog, grouped into difficulty tiers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Command, IconCategory, IconCategory as I, Tier, Tier as T};
use crate::error::CatalogError;

/// Commands that never take a filename argument.
pub const STANDALONE_COMMANDS: [&str; 4] = ["ls", "pwd", "clear", "history"];

pub fn is_standalone(name: &str) -> bool {
    STANDALONE_COMMANDS.contains(&name)
}

const fn cmd(
    name: &'static str,
    description: &'static str,
    tier: Tier,
    category: IconCategory,
) -> Command {
    Command {
        name,
        description,
        tier,
        category,
    }
}

pub const COMMANDS: &[Command] = &[
    // Beginner
    cmd("cd", "Change directory", T::Beginner, I::Move),
    cmd("ls", "List directory contents", T::Beginner, I::List),
    cmd("pwd", "Print working directory", T::Beginner, I::Print),
    cmd("echo", "Display a line of text", T::Beginner, I::Print),
    cmd("cat", "Concatenate files and print on the standard output", T::Beginner, I::Print),
    // Intermediate
    cmd("mkdir", "Make directories", T::Intermediate, I::Create),
    cmd("rm", "Remove files or directories", T::Intermediate, I::Delete),
    cmd("cp", "Copy files and directories", T::Intermediate, I::Copy),
    cmd("mv", "Move (rename) files", T::Intermediate, I::Rename),
    cmd("grep", "Print lines that match patterns", T::Intermediate, I::Search),
    cmd("touch", "Change file timestamps", T::Intermediate, I::Create),
    // Advanced
    cmd("chmod", "Change file mode bits", T::Advanced, I::Permission),
    cmd("chown", "Change file owner and group", T::Advanced, I::Permission),
    cmd("find", "Search for files in a directory hierarchy", T::Advanced, I::Search),
    cmd("tail", "Output the last part of files", T::Advanced, I::View),
    cmd("head", "Output the first part of files", T::Advanced, I::View),
    cmd("sed", "Stream editor for filtering and transforming text", T::Advanced, I::Transform),
    // Pro
    cmd("ls | grep", "Pipe ls output to grep", T::Pro, I::Pipe),
    cmd("find . -name", "Find files by name", T::Pro, I::Search),
    cmd("awk", "Pattern scanning and processing language", T::Pro, I::Transform),
    cmd("xargs", "Build and execute command lines from standard input", T::Pro, I::Advanced),
    cmd("tar", "Tape archiver", T::Pro, I::Archive),
];

/// Commands of exactly `tier`, in catalog order.
pub fn by_tier(tier: Tier) -> Vec<Command> {
    COMMANDS.iter().copied().filter(|c| c.tier == tier).collect()
}

/// Commands of `tier` and every easier tier, in catalog order.
pub fn up_to_tier(tier: Tier) -> Vec<Command> {
    COMMANDS.iter().copied().filter(|c| c.tier <= tier).collect()
}

pub fn find(name: &str) -> Option<Command> {
    COMMANDS.iter().copied().find(|c| c.name == name)
}

/// Uniform pick from `by_tier(tier)`.
///
/// The catalog is checked by [`validate`] at startup; an empty tier falls
/// back to the first catalog entry rather than panicking mid-game.
pub fn random_command(tier: Tier, rng: &mut impl Rng) -> Command {
    by_tier(tier)
        .choose(rng)
        .copied()
        .unwrap_or(COMMANDS[0])
}

/// `length` independent uniform draws from the tier (repeats allowed).
pub fn random_sequence(tier: Tier, length: usize, rng: &mut impl Rng) -> Vec<Command> {
    (0..length).map(|_| random_command(tier, rng)).collect()
}

/// Every tier must offer at least one command.
pub fn validate() -> Result<(), CatalogError> {
    match Tier::ALL.iter().find(|t| by_tier(**t).is_empty()) {
        Some(tier) => Err(CatalogError::EmptyTier(*tier)),
        None => Ok(()),
    }
}
