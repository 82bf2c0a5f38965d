use chrono::Local;

use crate::core::config::{BRANCH, RepoSettings};
use crate::core::error::PushError;
use crate::core::repo;
use crate::core::runner::{Capture, CheckPolicy, Runner};
use crate::core::style;
use crate::core::workspace::Workspace;

/// Shown when the login cannot be resolved.
const LOGIN_PLACEHOLDER: &str = "<your-username>";

/// Initialize git, commit everything, then create the GitHub repo and push
/// in a single `gh repo create --push`.
///
/// Any guarded step failing aborts the flow. Nothing already done is undone.
pub fn run<R: Runner>(ws: &mut Workspace<R>, settings: &RepoSettings) -> Result<(), PushError> {
    println!();
    println!("{}", style::header("Initializing new repository"));
    println!();

    println!("{}", style::step("Initializing git..."));
    ws.git(&["init"], CheckPolicy::Guarded, Capture::Inherit)?;

    if repo::ensure_gitignore(ws.root())? {
        println!("{}", style::step("Created basic .gitignore"));
    }

    println!("{}", style::step("Adding files to git..."));
    ws.git(&["add", "."], CheckPolicy::Guarded, Capture::Inherit)?;

    let message = repo::timestamped_message("Initial commit", Local::now());
    println!("{} {}", style::step("Creating commit:"), style::commit_message(&message));
    ws.git(&["commit", "-m", message.as_str()], CheckPolicy::Guarded, Capture::Inherit)?;

    println!("{}", style::step(&format!("Setting branch to {}...", BRANCH)));
    match ws.git(&["branch", "-M", BRANCH], CheckPolicy::BestEffort, Capture::Inherit) {
        Ok(out) if out.success() => {}
        Ok(out) => tracing::warn!(code = ?out.code, "branch rename failed, continuing"),
        Err(e) => tracing::warn!(error = %e, "branch rename failed, continuing"),
    }

    println!();
    println!(
        "{}",
        style::step(&format!(
            "Creating {} GitHub repository '{}'...",
            settings.visibility.as_str(),
            settings.name
        ))
    );
    let created = ws.gh(
        &[
            "repo",
            "create",
            settings.name.as_str(),
            settings.visibility.flag(),
            "--source=.",
            "--description",
            settings.description.as_str(),
            "--push",
        ],
        CheckPolicy::Guarded,
        Capture::Text,
    );

    if created.is_err() {
        println!();
        println!(
            "{}",
            style::error("Failed to create repository. Make sure GitHub CLI is installed and authenticated.")
        );
        println!("Run {} to authenticate.", style::command("gh auth login"));
        return Err(PushError::CreateRepo {
            name: settings.name.clone(),
        });
    }

    println!();
    println!("{}", style::success("Repository created and pushed successfully!"));

    let login = ws.gh_login().unwrap_or_else(|| LOGIN_PLACEHOLDER.to_string());
    let url = ws.config().repo_url(&login, &settings.name);
    println!("Repository URL: {}", style::url(&url));

    Ok(())
}
