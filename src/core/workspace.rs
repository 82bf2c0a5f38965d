use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::config::PushConfig;
use crate::core::runner::{self, Capture, CheckPolicy, CommandError, CommandOutput, Invocation, Runner};

/// The directory being pushed, plus the runner that executes git and gh in it.
///
/// All external commands go through this struct so flows never build
/// `Invocation`s for the two tools by hand.
pub struct Workspace<R> {
    runner: R,
    root: PathBuf,
    config: PushConfig,
    /// Directories searched for gh instead of the process `PATH`.
    search_path: Option<OsString>,
}

/// The subset of `gh api user` we read.
#[derive(Debug, Deserialize)]
struct GhUser {
    login: String,
}

impl<R: Runner> Workspace<R> {
    pub fn new(runner: R, root: impl Into<PathBuf>, config: PushConfig) -> Self {
        Self {
            runner,
            root: root.into(),
            config,
            search_path: None,
        }
    }

    /// Look gh up in `path` (a `PATH`-style list) rather than the process `PATH`.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `git <args>` in the workspace root.
    pub fn git(
        &mut self,
        args: &[&str],
        policy: CheckPolicy,
        capture: Capture,
    ) -> Result<CommandOutput, CommandError> {
        let inv = Invocation::new(self.config.tools.git.clone(), args.iter().copied());
        runner::run(&mut self.runner, &self.root, &inv, policy, capture)
    }

    /// Run `gh <args>` in the workspace root.
    pub fn gh(
        &mut self,
        args: &[&str],
        policy: CheckPolicy,
        capture: Capture,
    ) -> Result<CommandOutput, CommandError> {
        let inv = Invocation::new(self.config.tools.gh.clone(), args.iter().copied());
        runner::run(&mut self.runner, &self.root, &inv, policy, capture)
    }

    /// Whether the hosting CLI is an executable on the search path.
    pub fn gh_installed(&self) -> bool {
        let gh = &self.config.tools.gh;
        let found = match &self.search_path {
            Some(path) => which::which_in(gh, Some(path), &self.root),
            None => which::which(gh),
        };
        match found {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "found gh");
                true
            }
            Err(e) => {
                tracing::debug!(%gh, error = %e, "gh not found");
                false
            }
        }
    }

    /// Login of the authenticated gh user, if it can be determined.
    pub fn gh_login(&mut self) -> Option<String> {
        let out = self
            .gh(&["api", "user"], CheckPolicy::BestEffort, Capture::Text)
            .ok()?;
        if !out.success() {
            tracing::debug!(code = ?out.code, "gh api user failed");
            return None;
        }
        parse_login(out.stdout_trimmed())
    }
}

/// Extract `login` from a `gh api user` JSON response.
pub fn parse_login(json: &str) -> Option<String> {
    match serde_json::from_str::<GhUser>(json) {
        Ok(user) if !user.login.trim().is_empty() => Some(user.login),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "could not parse gh user response");
            None
        }
    }
}
