pub mod normalize;
pub mod profile;
pub mod scanner;

pub use normalize::collapse_excess_newlines;
pub use profile::{LanguageProfile, profile_for_extension};
pub use scanner::{CrossLineState, scan_line};

/// The extension is not in the profile registry. Recoverable: callers skip
/// the file.
#[derive(Debug, thiserror::Error)]
#[error("unsupported file type: {extension}")]
pub struct UnsupportedExtension {
    pub extension: String,
}

/// Removes comments from a whole document. Splits on `\n`, folds the line
/// scanner across the lines starting from `Normal`, and rejoins, so the
/// output always has exactly as many line separators as the input. Pure:
/// no I/O and no state shared between calls.
pub fn strip_comments(content: &str, profile: &LanguageProfile) -> String {
    let mut state = CrossLineState::Normal;
    let mut cleaned: Vec<String> = Vec::new();
    for line in content.split('\n') {
        let (line_out, next_state) = scan_line(line, state, profile);
        cleaned.push(line_out);
        state = next_state;
    }
    cleaned.join("\n")
}

/// Full cleaning pass for one file's content: resolve the profile from the
/// extension, strip comments, then collapse the blank-line gaps stripping
/// leaves behind.
pub fn clean_source(content: &str, extension: &str) -> Result<String, UnsupportedExtension> {
    let profile = profile_for_extension(extension).ok_or_else(|| UnsupportedExtension {
        extension: extension.to_string(),
    })?;
    Ok(collapse_excess_newlines(&strip_comments(content, profile)))
}
