//! Generic, profile-driven line scanner.
//!
//! One line goes in together with the lexical context left over from the
//! previous line; the cleaned line and the context for the next line come
//! out. The fold over a whole document lives in the parent module.

use super::profile::{EscapeStyle, LanguageProfile};

/// Lexical context carried from the end of one line to the start of the
/// next. At most one context is active at a time; `depth` is only
/// meaningful for nestable block comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossLineState {
    Normal,
    InBlockComment { depth: usize },
    InRawString { close: String },
    InMultilineString { close: String },
    InHeredoc { delimiter: String },
}

/// Scans one line under `state` and returns the cleaned line plus the state
/// for the following line. Unterminated constructs are not errors: the
/// corresponding state simply persists past the last line of the document.
pub fn scan_line(
    line: &str,
    state: CrossLineState,
    profile: &LanguageProfile,
) -> (String, CrossLineState) {
    // Heredoc bodies are verbatim, terminator line included; they are never
    // scanned for comments or strings and never trimmed.
    if let CrossLineState::InHeredoc { delimiter } = state {
        if line.trim() == delimiter {
            return (line.to_string(), CrossLineState::Normal);
        }
        return (line.to_string(), CrossLineState::InHeredoc { delimiter });
    }

    let chars: Vec<char> = line.chars().collect();
    let (cleaned, state_out) = match state {
        CrossLineState::Normal => scan_code(&chars, profile),
        // Depth zero means no comment is open; the document fold never
        // produces this, but the state is constructible by callers.
        CrossLineState::InBlockComment { depth: 0 } => scan_code(&chars, profile),
        CrossLineState::InBlockComment { depth } => resume_block_comment(&chars, depth, profile),
        CrossLineState::InRawString { close } => {
            resume_string(&chars, &close, EscapeStyle::None, profile, true)
        }
        CrossLineState::InMultilineString { close } => {
            let escape = profile
                .multiline_strings
                .iter()
                .find(|rule| rule.delimiter == close)
                .map(|rule| rule.escape)
                .unwrap_or(EscapeStyle::None);
            resume_string(&chars, &close, escape, profile, false)
        }
        CrossLineState::InHeredoc { .. } => unreachable!("handled above"),
    };

    // Trailing whitespace left behind by a removed inline comment is noise.
    // Lines ending inside a string context are verbatim and stay untouched.
    match state_out {
        CrossLineState::Normal | CrossLineState::InBlockComment { .. } => (
            cleaned.trim_end_matches([' ', '\t']).to_string(),
            state_out,
        ),
        _ => (cleaned, state_out),
    }
}

/// Left-to-right scan starting outside any string or comment context.
fn scan_code(chars: &[char], profile: &LanguageProfile) -> (String, CrossLineState) {
    let mut out = String::with_capacity(chars.len());
    let mut quote: Option<(char, EscapeStyle)> = None;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        // Inside a single-line string or char literal: string-context checks
        // take absolute priority over comment recognition.
        if let Some((delimiter, escape)) = quote {
            match escape {
                EscapeStyle::Backslash if ch == '\\' => {
                    out.push(ch);
                    if let Some(&next) = chars.get(i + 1) {
                        out.push(next);
                    }
                    i += 2;
                    continue;
                }
                EscapeStyle::Doubled
                    if ch == delimiter && chars.get(i + 1) == Some(&delimiter) =>
                {
                    out.push(ch);
                    out.push(ch);
                    i += 2;
                    continue;
                }
                _ => {}
            }
            out.push(ch);
            if ch == delimiter {
                quote = None;
            }
            i += 1;
            continue;
        }

        // Hash-counted raw strings: the closing token is a double quote
        // followed by as many hashes as the opening had, so a lone `"#`
        // inside `r##"..."##` does not terminate it.
        if profile.hashed_raw_strings && ch == 'r' {
            let mut k = i + 1;
            let mut hashes = 0;
            while chars.get(k) == Some(&'#') {
                hashes += 1;
                k += 1;
            }
            if chars.get(k) == Some(&'"') {
                out.extend(&chars[i..=k]);
                let close: String = std::iter::once('"')
                    .chain(std::iter::repeat('#').take(hashes))
                    .collect();
                let body = &chars[k + 1..];
                match find_token(body, &close, EscapeStyle::None) {
                    Some(idx) => {
                        let end = idx + close.chars().count();
                        out.extend(&body[..end]);
                        i = k + 1 + end;
                        continue;
                    }
                    None => {
                        out.extend(body);
                        return (out, CrossLineState::InRawString { close });
                    }
                }
            }
        }

        // Line-spanning string delimiters (triple quotes, backticks). Checked
        // before plain quotes so `"""` is not read as three short strings.
        if let Some(rule) = profile
            .multiline_strings
            .iter()
            .find(|rule| starts_with_at(chars, i, rule.delimiter))
        {
            let token_len = rule.delimiter.chars().count();
            out.push_str(rule.delimiter);
            let body = &chars[i + token_len..];
            match find_token(body, rule.delimiter, rule.escape) {
                Some(idx) => {
                    let end = idx + token_len;
                    out.extend(&body[..end]);
                    i += token_len + end;
                    continue;
                }
                None => {
                    out.extend(body);
                    let close = rule.delimiter.to_string();
                    return (out, CrossLineState::InMultilineString { close });
                }
            }
        }

        // Single-line quoted strings and char literals.
        if let Some(rule) = profile.quotes.iter().find(|rule| rule.delimiter == ch) {
            quote = Some((rule.delimiter, rule.escape));
            out.push(ch);
            i += 1;
            continue;
        }

        // Heredoc entry: `<<DELIM` or `<<-DELIM`. The rest of the line is
        // emitted verbatim; the body starts on the next line.
        if profile.heredocs && starts_with_at(chars, i, "<<") {
            let mut k = i + 2;
            if chars.get(k) == Some(&'-') {
                k += 1;
            }
            let ident_start = k;
            while chars
                .get(k)
                .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '_')
            {
                k += 1;
            }
            if k > ident_start {
                let delimiter: String = chars[ident_start..k].iter().collect();
                out.extend(&chars[i..]);
                return (out, CrossLineState::InHeredoc { delimiter });
            }
        }

        // Block comments are checked before line comments so `/*` wins over
        // a `//` token at the same position.
        if let Some(block) = &profile.block_comment {
            if starts_with_at(chars, i, block.open) {
                match consume_block_comment(chars, i + block.open.chars().count(), 1, profile) {
                    Ok(resume_at) => {
                        i = resume_at;
                        continue;
                    }
                    Err(depth) => return (out, CrossLineState::InBlockComment { depth }),
                }
            }
        }

        if profile
            .line_comments
            .iter()
            .any(|token| starts_with_at(chars, i, token))
        {
            return (out, CrossLineState::Normal);
        }

        out.push(ch);
        i += 1;
    }

    (out, CrossLineState::Normal)
}

/// Continues a block comment left open by a previous line. If it closes,
/// the remainder of the line is scanned as normal code; otherwise the line
/// contributes nothing but its newline.
fn resume_block_comment(
    chars: &[char],
    depth: usize,
    profile: &LanguageProfile,
) -> (String, CrossLineState) {
    match consume_block_comment(chars, 0, depth, profile) {
        Ok(resume_at) => scan_code(&chars[resume_at..], profile),
        Err(depth) => (String::new(), CrossLineState::InBlockComment { depth }),
    }
}

/// Advances through a block comment body from `from`, tracking nesting if
/// the profile allows it. Returns the index just past the final close token,
/// or the remaining depth if the comment does not end on this line.
fn consume_block_comment(
    chars: &[char],
    from: usize,
    mut depth: usize,
    profile: &LanguageProfile,
) -> Result<usize, usize> {
    let Some(block) = &profile.block_comment else {
        return Err(depth);
    };
    let open_len = block.open.chars().count();
    let close_len = block.close.chars().count();
    let mut k = from;
    while k < chars.len() {
        if block.nestable && starts_with_at(chars, k, block.open) {
            depth += 1;
            k += open_len;
        } else if starts_with_at(chars, k, block.close) {
            depth -= 1;
            k += close_len;
            if depth == 0 {
                return Ok(k);
            }
        } else {
            k += 1;
        }
    }
    Err(depth)
}

/// Continues a raw or multi-line string left open by a previous line.
fn resume_string(
    chars: &[char],
    close: &str,
    escape: EscapeStyle,
    profile: &LanguageProfile,
    raw: bool,
) -> (String, CrossLineState) {
    match find_token(chars, close, escape) {
        Some(idx) => {
            let end = idx + close.chars().count();
            let mut out: String = chars[..end].iter().collect();
            let (tail, state) = scan_code(&chars[end..], profile);
            out.push_str(&tail);
            (out, state)
        }
        None => {
            let out: String = chars.iter().collect();
            let state = if raw {
                CrossLineState::InRawString {
                    close: close.to_string(),
                }
            } else {
                CrossLineState::InMultilineString {
                    close: close.to_string(),
                }
            };
            (out, state)
        }
    }
}

/// Finds `token` in `chars`, skipping backslash-escaped characters when the
/// escape style calls for it (a `\`` does not close a template literal).
fn find_token(chars: &[char], token: &str, escape: EscapeStyle) -> Option<usize> {
    let mut i = 0;
    while i < chars.len() {
        if escape == EscapeStyle::Backslash && chars[i] == '\\' {
            i += 2;
            continue;
        }
        if starts_with_at(chars, i, token) {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn starts_with_at(chars: &[char], at: usize, token: &str) -> bool {
    let mut i = at;
    for expected in token.chars() {
        if chars.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}
