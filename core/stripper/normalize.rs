//! Blank-line normalization applied after comment removal.

/// Collapses any newline, followed by a whitespace run containing at least
/// one more newline, down to a single newline. Removing comment-only lines
/// leaves such gaps behind.
///
/// The rewrite runs to a fixed point: collapsing one gap can expose another.
/// Each pass strictly shrinks the text, so the loop terminates, and the
/// result is idempotent.
pub fn collapse_excess_newlines(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let rewritten = collapse_once(&current);
        if rewritten == current {
            return current;
        }
        current = rewritten;
    }
}

fn collapse_once(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\n' {
            let mut j = i + 1;
            let mut last_newline = None;
            while j < chars.len() && chars[j].is_whitespace() {
                if chars[j] == '\n' {
                    last_newline = Some(j);
                }
                j += 1;
            }
            // Only a run with whitespace *between* two newlines is a gap;
            // a bare "\n\n" stays (it is a single blank line).
            if let Some(nl) = last_newline {
                if nl >= i + 2 {
                    out.push('\n');
                    i = nl + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}
