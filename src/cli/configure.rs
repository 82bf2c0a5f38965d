use std::io::{BufRead, Write};

use crate::core::config::RepoSettings;
use crate::core::error::PushError;
use crate::core::style;

/// Values given on the command line; each one replaces its prompt.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
}

/// Ask for name, description and visibility, in that order.
///
/// An empty name is a hard failure. A blank description becomes
/// `default_description`; an unrecognized visibility becomes private.
pub fn collect_settings<I: BufRead, W: Write>(
    input: &mut I,
    out: &mut W,
    prefill: &Prefill,
    default_description: &str,
) -> Result<RepoSettings, PushError> {
    writeln!(out)?;
    writeln!(out, "{}", style::header("GitHub Repository Setup"))?;
    writeln!(out)?;

    let name = answer(input, out, prefill.name.as_deref(), "Enter repository name: ")?;
    if name.trim().is_empty() {
        writeln!(out, "{}", style::error("Repository name cannot be empty!"))?;
        return Err(PushError::EmptyName);
    }

    let description = answer(
        input,
        out,
        prefill.description.as_deref(),
        "Enter repository description (optional): ",
    )?;
    let visibility = answer(
        input,
        out,
        prefill.visibility.as_deref(),
        "Make repository public or private? (public/private) [private]: ",
    )?;

    let settings = RepoSettings::from_input(&name, &description, &visibility, default_description)
        .ok_or(PushError::EmptyName)?;
    tracing::debug!(?settings, "collected repository settings");
    Ok(settings)
}

fn answer<I: BufRead, W: Write>(
    input: &mut I,
    out: &mut W,
    prefilled: Option<&str>,
    question: &str,
) -> Result<String, PushError> {
    if let Some(value) = prefilled {
        return Ok(value.to_string());
    }

    write!(out, "{}", question)?;
    out.flush()?;

    // EOF counts as an empty answer
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}
