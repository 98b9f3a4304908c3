use crate::cache::FileCache;
use crate::repo;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEFAULT_PROMPT: &str = r#"You are tasked with adding thoughtful, meaningful comments to the
{filename} ONLY. Do not modify any other files or suggest
changes to other files.
## Core Principles
1. **Focus on "Why", not "What"**: The code itself should be
self-documenting through clear variable, function, and type names.
Comments should explain the rationale, not restate what the code
does.
2. **Avoid Redundant Comments**: Do NOT add comments that simply
restate what is obvious from the code.
3. **Target Nuances and Complexity**: Add comments specifically for
language-specific subtleties, business logic nuances, performance
critical sections, complex algorithms, APIs that require careful
usage, and code that appears unusual but is intentional.
4. **Preserve Code Clarity**: only add comments to the existing code
as-is; DO NOT rename anything.
5. **Improve Code Formatting**: Add appropriate newlines to improve
readability and logical grouping, following language conventions.
## Output Format
Write to the same file with comments added in the appropriate
language-specific comment syntax AND improved formatting. Preserve
all existing code exactly as-is - only add comments and improve
whitespace/newline placement for better readability.
"#;

#[derive(Debug, Parser, Clone)]
#[clap(about = "Strip comments and re-annotate files (main arguments)")]
pub struct NocommsArgs {
    #[clap(help = "Files to process")]
    pub files: Vec<PathBuf>,

    #[clap(
        long = "batch-size",
        default_value_t = 8,
        help = "Number of files to process in parallel per batch"
    )]
    pub batch_size: usize,

    #[clap(long, help = "Force reprocessing of all files, ignoring the cache")]
    pub force: bool,

    #[clap(
        long = "cache-only",
        help = "Mark files as cached without processing (useful for initialization)"
    )]
    pub cache_only: bool,

    #[clap(
        long,
        default_value = DEFAULT_PROMPT,
        help = "Prompt template for the annotation command; {filename} is replaced per file"
    )]
    pub prompt: String,

    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "nocomms",
    version = "0.1.0",
    about = "Strips comments from source files and re-annotates them in batches",
    long_about = "Removes existing comments from the given files, then runs an external \
annotation command over them in bounded-parallel batches, tracking processed \
files in a modification-time cache at the git root.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: NocommsArgs,
}

/// Converts every input to an absolute path up front so cache keys are
/// unambiguous regardless of how the paths were spelled.
pub fn resolve_input_files(args: &NocommsArgs) -> Result<Vec<PathBuf>> {
    if args.files.is_empty() {
        anyhow::bail!("no files provided");
    }
    let mut absolute = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let abs = std::path::absolute(file)
            .with_context(|| format!("failed to resolve absolute path for {}", file.display()))?;
        absolute.push(abs);
    }
    Ok(absolute)
}

#[derive(Debug, Default)]
pub struct FilteredFiles {
    pub to_process: Vec<PathBuf>,
    pub skipped: usize,
}

/// Drops gitignored files and files the cache says are unchanged (unless
/// `force`). Filtering happens before any expensive external calls.
pub fn filter_files(
    files: &[PathBuf],
    cache: &FileCache,
    root: &Path,
    force: bool,
) -> FilteredFiles {
    let mut filtered = FilteredFiles::default();
    for file in files {
        if repo::is_git_ignored(file) {
            println!("Skipping (gitignored): {}", file.display());
            filtered.skipped += 1;
            continue;
        }

        let should_process = force
            || match cache.should_process(root, file) {
                Ok(fresh) => fresh,
                Err(e) => {
                    // On cache check failure, err on the side of processing.
                    eprintln!(
                        "Warning: failed to check cache for {}: {:#}",
                        file.display(),
                        e
                    );
                    true
                }
            };

        if !should_process {
            println!("Skipping (unchanged): {}", file.display());
            filtered.skipped += 1;
            continue;
        }

        filtered.to_process.push(file.clone());
    }
    filtered
}
