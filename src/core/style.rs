//! Consistent colored terminal output for autopush.
//!
//! All user-facing output goes through these helpers so colors are uniform.
//! Colors are automatically disabled when stdout is not a TTY.

use colored::Colorize;

// ---------- Banners ----------

/// Boxed startup banner
pub fn banner(title: &str) -> String {
    let width = title.chars().count() + 6;
    let bar = "═".repeat(width);
    format!(
        "╔{bar}╗\n║   {}   ║\n╚{bar}╝",
        title.bold().cyan(),
        bar = bar
    )
}

/// Format a header line: "=== Title ==="
pub fn header(title: &str) -> String {
    format!("=== {} ===", title.bold())
}

// ---------- Status indicators ----------

/// Green checkmark + message (success)
pub fn success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg)
}

/// Yellow warning + message
pub fn warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg)
}

/// Red error + message
pub fn error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg)
}

/// Blue info marker + message
pub fn info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

/// Dim info/hint message
pub fn hint(msg: &str) -> String {
    format!("{}", msg.dimmed())
}

// ---------- Progress ----------

/// A flow step: "→ Adding files to git..."
pub fn step(msg: &str) -> String {
    format!("{} {}", "→".cyan().bold(), msg)
}

/// Format a commit message
pub fn commit_message(msg: &str) -> String {
    format!("{}", msg.yellow())
}

/// Format a repository URL
pub fn url(url: &str) -> String {
    format!("{}", url.underline().cyan())
}

/// Format a command the user should run
pub fn command(cmd: &str) -> String {
    format!("{}", cmd.cyan())
}
