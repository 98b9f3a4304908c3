use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Walks up from the working directory to the nearest directory containing
/// `.git`. The cache lives at the repository root so behavior is the same
/// no matter where inside the repo the tool is invoked.
pub fn find_git_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to get working directory")?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join(".git").is_dir() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => anyhow::bail!("not in a git repository"),
        }
    }
}

/// Repo-relative paths are used as cache keys so the cache stays valid when
/// the repository is moved or mounted elsewhere.
pub fn to_relative_path(root: &Path, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(root).map(Path::to_path_buf).with_context(|| {
        format!(
            "failed to make {} relative to {}",
            path.display(),
            root.display()
        )
    })
}

/// Asks git itself whether a file is ignored, which respects every
/// .gitignore in the hierarchy. `git check-ignore` exits 0 when ignored.
pub fn is_git_ignored(path: &Path) -> bool {
    Command::new("git")
        .args(["check-ignore", "-q"])
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
