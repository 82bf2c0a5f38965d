pub mod configure;
pub mod existing_repo;
pub mod new_repo;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

use crate::cli::configure::Prefill;
use crate::core::config::PushConfig;
use crate::core::error::PushError;
use crate::core::repo;
use crate::core::runner::{Runner, SystemRunner};
use crate::core::style;
use crate::core::workspace::Workspace;

#[derive(Parser)]
#[command(name = "autopush")]
#[command(about = "Push the current directory to GitHub, creating the repository if needed")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: <config dir>/autopush/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository name for a new repository (skips the prompt)
    #[arg(long)]
    pub name: Option<String>,

    /// Repository description for a new repository (skips the prompt)
    #[arg(long)]
    pub description: Option<String>,

    /// public or private; anything else means private (skips the prompt)
    #[arg(long)]
    pub visibility: Option<String>,
}

impl Cli {
    /// Run against the current directory with real subprocesses and stdin.
    pub fn run(self) -> Result<(), PushError> {
        let config = PushConfig::load(self.config.as_deref())?;
        let cwd = std::env::current_dir()?;
        let prefill = Prefill {
            name: self.name,
            description: self.description,
            visibility: self.visibility,
        };

        let mut ws = Workspace::new(SystemRunner, cwd, config);
        let stdin = io::stdin();
        dispatch(&mut ws, &mut stdin.lock(), &prefill)
    }
}

/// Check for gh, then push either as a new repository or an existing one.
pub fn dispatch<R: Runner, I: BufRead>(
    ws: &mut Workspace<R>,
    input: &mut I,
    prefill: &Prefill,
) -> Result<(), PushError> {
    println!("{}", style::banner("GitHub Auto-Push"));

    if !ws.gh_installed() {
        println!();
        println!("{}", style::warning("GitHub CLI (gh) not found!"));
        println!("Install it from: {}", style::url("https://cli.github.com/"));
        println!("After installation, run: {}", style::command("gh auth login"));
        return Err(PushError::GhMissing);
    }

    if repo::is_git_repo(ws.root()) {
        tracing::debug!(root = %ws.root().display(), "existing repository");
        existing_repo::run(ws)
    } else {
        tracing::debug!(root = %ws.root().display(), "no repository yet");
        let default_description = ws.config().defaults.description.clone();
        let settings =
            configure::collect_settings(input, &mut io::stdout(), prefill, &default_description)?;
        new_repo::run(ws, &settings)
    }
}
