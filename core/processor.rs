use crate::CoreError;
use crate::command_runner::{run_claude, run_formatter_for_path};
use crate::stripper;
use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Strips comments from one file in place, replacing it atomically. Returns
/// whether the content changed. An unsupported extension surfaces as
/// `CoreError::Unsupported` so callers can skip the file.
pub fn strip_file(path: &Path) -> Result<bool, CoreError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let original = fs::read_to_string(path)?;
    let cleaned = stripper::clean_source(&original, extension)?;
    if cleaned == original {
        return Ok(false);
    }
    write_atomic(path, &cleaned).map_err(|e| CoreError::Processing {
        path: path.display().to_string(),
        message: format!("{e:#}"),
    })?;
    Ok(true)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("failed to get parent dir for {}", path.display()))?;
    let mut temp_file = tempfile::Builder::new()
        .prefix(".nocomms_")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|persist_error| {
        anyhow::anyhow!(
            "failed to overwrite {} with temp file: {}",
            path.display(),
            persist_error.error
        )
    })?;
    Ok(())
}

/// Runs the annotation command over the files in fixed-size batches. Files
/// within a batch run in parallel; the next batch starts only when the
/// whole batch has finished, which bounds concurrent external processes.
/// Failures are collected per file rather than aborting the run.
pub fn process_batches(
    files: &[PathBuf],
    batch_size: usize,
    prompt: &str,
) -> Result<Vec<ProcessedFileResult>> {
    let batch_size = batch_size.max(1);
    let total_batches = files.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(files.len());

    for (index, batch) in files.chunks(batch_size).enumerate() {
        println!(
            "Processing batch {}/{} ({} files)...",
            index + 1,
            total_batches,
            batch.len()
        );

        let batch_results: Vec<ProcessedFileResult> = batch
            .par_iter()
            .map(|path| {
                let outcome = annotate_file(path, prompt);
                ProcessedFileResult {
                    path: path.clone(),
                    error: outcome.err().map(|e| format!("{e:#}")),
                }
            })
            .collect();
        results.extend(batch_results);
    }

    Ok(results)
}

/// Formats the file before annotating it so the external command sees
/// consistent style. Formatter failures are warnings only.
fn annotate_file(path: &Path, prompt: &str) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    println!("  [{name}] Running claude...");
    match run_formatter_for_path(path) {
        Ok(true) => println!("  [{name}] Formatted"),
        Ok(false) => {}
        Err(e) => eprintln!("  [{name}] Warning: formatter failed: {e:#}"),
    }

    run_claude(path, prompt)?;
    println!("  [{name}] Completed");
    Ok(())
}
