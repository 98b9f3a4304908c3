use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

const GO: &str = "go";
const BIOME: &str = "biome";
const RUFF: &str = "ruff";
const RUSTFMT: &str = "rustfmt";
const TERRAFORM: &str = "terraform";
const YAMLFMT: &str = "yamlfmt";
const CLAUDE: &str = "claude";

fn run_formatter(tool: &str, base_args: &[&str], file_path: &Path) -> Result<()> {
    let mut cmd = Command::new(tool);
    cmd.args(base_args);
    cmd.arg(file_path);

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    let process = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn formatter '{}'", tool))?;

    let output = process
        .wait_with_output()
        .with_context(|| format!("Formatter '{}' failed to run", tool))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "Formatter '{}' failed for {}:\n{}",
            tool,
            file_path.display(),
            stderr.trim()
        );
    }
    Ok(())
}

/// Runs the formatter matching the file's extension in place. Returns
/// Ok(false) when no formatter is configured for the extension.
pub fn run_formatter_for_path(file_path: &Path) -> Result<bool> {
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "go" => run_formatter(GO, &["fmt"], file_path)?,
        "js" | "ts" | "jsx" | "tsx" => run_formatter(BIOME, &["format", "--write"], file_path)?,
        "py" => run_formatter(RUFF, &["format"], file_path)?,
        "rs" => run_formatter(RUSTFMT, &[], file_path)?,
        "tf" | "tfvars" => run_formatter(TERRAFORM, &["fmt"], file_path)?,
        "yaml" | "yml" => run_formatter(YAMLFMT, &[], file_path)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Invokes the `claude` CLI on one file with `{filename}` substituted into
/// the prompt template. Permission prompts are bypassed because interactive
/// prompts would stall batch processing; stdio is inherited so progress is
/// visible.
pub fn run_claude(file_path: &Path, prompt: &str) -> Result<()> {
    let prompt = prompt.replacen("{filename}", &file_path.display().to_string(), 1);

    let status = Command::new(CLAUDE)
        .args([
            "--dangerously-skip-permissions",
            "--model",
            "haiku",
            "--permission-mode",
            "bypassPermissions",
            "-p",
        ])
        .arg(prompt)
        .status()
        .with_context(|| format!("Failed to spawn '{}'", CLAUDE))?;

    if !status.success() {
        anyhow::bail!("claude command failed for {} ({})", file_path.display(), status);
    }
    Ok(())
}
