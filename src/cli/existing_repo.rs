use chrono::Local;

use crate::core::config::{BRANCH, REMOTE};
use crate::core::error::PushError;
use crate::core::repo;
use crate::core::runner::{Capture, CheckPolicy, CommandOutput, Runner};
use crate::core::style;
use crate::core::workspace::Workspace;

/// Commit outstanding changes and push them.
///
/// A clean tree only gets a best-effort push for unpushed commits and always
/// succeeds. A dirty tree is staged and committed (guarded), then pushed to
/// `origin main`, falling back to a plain `git push`.
pub fn run<R: Runner>(ws: &mut Workspace<R>) -> Result<(), PushError> {
    println!();
    println!("{}", style::header("Existing repository detected"));
    println!();

    // A failed status query is treated like a clean tree
    let status = ws
        .git(&["status", "--porcelain"], CheckPolicy::Guarded, Capture::Text)
        .ok();
    let dirty = status
        .as_ref()
        .is_some_and(|out| !out.stdout_trimmed().is_empty());

    if !dirty {
        return sync_clean(ws);
    }

    println!("{}", style::step("Adding changes..."));
    ws.git(&["add", "."], CheckPolicy::Guarded, Capture::Inherit)?;

    let message = repo::timestamped_message("Update", Local::now());
    println!("{} {}", style::step("Creating commit:"), style::commit_message(&message));
    ws.git(&["commit", "-m", message.as_str()], CheckPolicy::Guarded, Capture::Inherit)?;

    println!("{}", style::step("Pushing to GitHub..."));
    let mut last = push(ws, &["push", REMOTE, BRANCH]);
    if !last.as_ref().is_some_and(CommandOutput::success) {
        println!("{}", style::warning("Trying alternative push method..."));
        last = push(ws, &["push"]);
    }

    if last.as_ref().is_some_and(CommandOutput::success) {
        println!();
        println!("{}", style::success("Changes pushed successfully!"));
        return Ok(());
    }

    let detail = last
        .and_then(|out| out.stderr)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string());
    println!();
    println!("{}", style::error("Failed to push. Error:"));
    println!("{}", detail);
    Err(PushError::Push { detail })
}

fn sync_clean<R: Runner>(ws: &mut Workspace<R>) -> Result<(), PushError> {
    println!("{}", style::success("No changes to commit. Repository is up to date!"));
    println!();
    println!("{}", style::step("Checking for unpushed commits..."));

    match push(ws, &["push"]) {
        Some(out) if out.success() => {
            println!("{}", style::success("All commits are synced with remote!"));
        }
        _ => println!("{}", style::info("Nothing to push or no remote configured.")),
    }
    Ok(())
}

/// Best-effort push; `None` if git could not be started.
fn push<R: Runner>(ws: &mut Workspace<R>, args: &[&str]) -> Option<CommandOutput> {
    ws.git(args, CheckPolicy::BestEffort, Capture::Text).ok()
}
