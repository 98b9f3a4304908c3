use nocomms_core::{
    CliArgs, Command as CoreCommand, CoreError, FileCache, NocommsArgs, filter_files,
    process_batches, repo, resolve_input_files, strip_file,
};
mod interaction;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();

    if let Some(command) = cli.command {
        match command {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    match run(cli.main_opts) {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            eprintln!("{}", style(format!("Error: {:#}", e)).red());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(args: NocommsArgs) -> Result<ExitCode> {
    let root = repo::find_git_root()?;
    let mut cache = FileCache::load(&root)?;
    let files = resolve_input_files(&args)?;

    if args.cache_only {
        return run_cache_only(&files, &mut cache, &root);
    }

    // Filter before any expensive external work.
    let filtered = filter_files(&files, &cache, &root, args.force);

    if filtered.to_process.is_empty() {
        if filtered.skipped > 0 {
            println!(
                "\nAll {} files are up to date (no changes needed)",
                filtered.skipped
            );
            return Ok(ExitCode::SUCCESS);
        }
        anyhow::bail!("no files were successfully processed");
    }

    println!("Found {} files:", filtered.to_process.len());
    for file in filtered.to_process.iter().take(10) {
        println!("  {}", style(file.display()).dim());
    }
    if filtered.to_process.len() > 10 {
        println!("  ... and {} more.", filtered.to_process.len() - 10);
    }

    if !interaction::confirm_processing(filtered.to_process.len(), args.no_confirm)? {
        return Ok(ExitCode::SUCCESS);
    }

    // Comment removal happens before the annotation pass so the external
    // command starts from clean input.
    let mut to_annotate: Vec<PathBuf> = Vec::new();
    for file in &filtered.to_process {
        match strip_file(file) {
            Ok(_) => {
                println!("Removed comments from: {}", file.display());
                to_annotate.push(file.clone());
            }
            Err(CoreError::Unsupported(_)) => {
                println!("Skipping (unsupported): {}", file.display());
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Warning: failed to process {}: {}", file.display(), e))
                        .yellow()
                );
            }
        }
    }

    if to_annotate.is_empty() {
        println!("\nNo supported files left to annotate.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "\nProcessing {} files in batches of {}...\n",
        to_annotate.len(),
        args.batch_size
    );

    let results = process_batches(&to_annotate, args.batch_size, &args.prompt)?;

    let mut failure_count = 0;
    for result in &results {
        match &result.error {
            None => {
                // Only files that made it through the annotation pass are
                // marked, so a partial failure is retried next run.
                if let Err(e) = cache.mark_processed(&root, &result.path) {
                    eprintln!(
                        "Warning: failed to update cache for {}: {:#}",
                        result.path.display(),
                        e
                    );
                }
            }
            Some(err_msg) => {
                eprintln!(
                    "  {} Failed: {} - {}",
                    style("⚠️").yellow(),
                    style(result.path.display()).dim(),
                    style(err_msg).red()
                );
                failure_count += 1;
            }
        }
    }

    // Save failures are warnings: processing succeeded, the worst case is
    // redundant work on the next run.
    if let Err(e) = cache.save(&root) {
        eprintln!("Warning: failed to save cache: {:#}", e);
    }

    let success_count = results.len() - failure_count;
    println!(
        "\nResult: {} {} processed successfully, {} {} failed.",
        style(success_count).green(),
        if success_count == 1 { "file" } else { "files" },
        style(failure_count).red(),
        if failure_count == 1 { "file" } else { "files" }
    );

    if failure_count > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Marks the inputs as cached without stripping or annotating anything,
/// useful for adopting a repository whose files are already commented.
fn run_cache_only(
    files: &[PathBuf],
    cache: &mut FileCache,
    root: &std::path::Path,
) -> Result<ExitCode> {
    println!("Cache-only mode: marking files as cached without processing");
    let mut cached_count = 0;

    for file in files {
        if repo::is_git_ignored(file) {
            println!("Skipping (gitignored): {}", file.display());
            continue;
        }
        match cache.mark_processed(root, file) {
            Ok(()) => {
                println!("Cached: {}", file.display());
                cached_count += 1;
            }
            Err(e) => {
                eprintln!(
                    "Warning: failed to mark {} as cached: {:#}",
                    file.display(),
                    e
                );
            }
        }
    }

    if cached_count == 0 {
        anyhow::bail!("no files were successfully cached");
    }

    cache.save(root)?;
    println!("\nMarked {} files as cached", cached_count);
    Ok(ExitCode::SUCCESS)
}
