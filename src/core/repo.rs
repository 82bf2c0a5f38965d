use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

/// Default `.gitignore` written into a freshly initialized repository.
const DEFAULT_GITIGNORE: &str = "\
# Python
__pycache__/
*.py[cod]
*.so
.Python
venv/
ENV/

# Java
target/
*.class
*.jar
*.war

# IDE
.idea/
.vscode/
*.swp
*.swo

# OS
.DS_Store
Thumbs.db
";

/// True iff `root` has a `.git` directory at its top level.
pub fn is_git_repo(root: &Path) -> bool {
    root.join(".git").is_dir()
}

/// Write the default `.gitignore` unless one already exists.
///
/// Returns `true` if the file was created.
pub fn ensure_gitignore(root: &Path) -> Result<bool> {
    let path = root.join(".gitignore");
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(&path, DEFAULT_GITIGNORE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// `<prefix> - YYYY-MM-DD HH:MM:SS` in local time.
pub fn timestamped_message(prefix: &str, at: DateTime<Local>) -> String {
    format!("{} - {}", prefix, at.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_detects_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_git_repo(dir.path()));
    }

    #[test]
    fn test_git_file_is_not_a_repo() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".git"), "gitdir: ../elsewhere").unwrap();
        assert!(!is_git_repo(dir.path()));
    }

    #[test]
    fn test_nested_git_dir_not_detected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub/.git")).unwrap();
        assert!(!is_git_repo(dir.path()));
    }

    #[test]
    fn test_gitignore_created_with_sections() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_gitignore(dir.path()).unwrap());

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        for section in ["# Python", "# Java", "# IDE", "# OS"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("__pycache__/"));
        assert!(content.contains(".DS_Store"));
    }

    #[test]
    fn test_existing_gitignore_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "node_modules/\n").unwrap();

        assert!(!ensure_gitignore(dir.path()).unwrap());
        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "node_modules/\n");
    }

    #[test]
    fn test_timestamped_message_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            timestamped_message("Initial commit", at),
            "Initial commit - 2024-03-07 09:05:02"
        );
        assert_eq!(timestamped_message("Update", at), "Update - 2024-03-07 09:05:02");
    }
}
