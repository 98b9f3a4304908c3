//! Declarative lexical profiles for the supported languages.
//!
//! A profile carries no behavior: the generic scanner in [`super::scanner`]
//! interprets these tables, so adding a language means adding data here
//! rather than another hand-written state machine.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeStyle {
    /// A backslash makes the following character literal (`"a \" b"`).
    Backslash,
    /// Two consecutive delimiters stand for one literal delimiter (`'it''s'`).
    Doubled,
    /// No escaping; the next delimiter always closes (Go raw strings).
    None,
}

/// A single-line quoted string or char literal rule. Strings of this kind
/// never span lines; an unterminated one simply runs to end of line.
#[derive(Debug, Clone, Copy)]
pub struct QuoteRule {
    pub delimiter: char,
    pub escape: EscapeStyle,
}

/// A string delimiter that may legitimately span lines (Python triple
/// quotes, Go backticks, JS template literals). The same token opens and
/// closes the span.
#[derive(Debug, Clone, Copy)]
pub struct SpanRule {
    pub delimiter: &'static str,
    pub escape: EscapeStyle,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockCommentRule {
    pub open: &'static str,
    pub close: &'static str,
    /// Inner open tokens increment a depth counter that must return to zero
    /// before the comment ends. Only Rust sets this.
    pub nestable: bool,
}

#[derive(Debug)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<BlockCommentRule>,
    pub quotes: &'static [QuoteRule],
    pub multiline_strings: &'static [SpanRule],
    /// Hash-counted raw strings: `r"..."`, `r#"..."#`, `r##"..."##`, with
    /// the closing token computed from the number of hashes after `r`.
    pub hashed_raw_strings: bool,
    /// Heredoc blocks: `<<DELIM` or `<<-DELIM`, terminated by a line whose
    /// trimmed content equals the delimiter.
    pub heredocs: bool,
}

const BACKSLASH_DOUBLE_QUOTE: QuoteRule = QuoteRule {
    delimiter: '"',
    escape: EscapeStyle::Backslash,
};

const BACKSLASH_SINGLE_QUOTE: QuoteRule = QuoteRule {
    delimiter: '\'',
    escape: EscapeStyle::Backslash,
};

pub static JAVASCRIPT: LanguageProfile = LanguageProfile {
    name: "javascript",
    line_comments: &["//"],
    block_comment: Some(BlockCommentRule {
        open: "/*",
        close: "*/",
        nestable: false,
    }),
    quotes: &[BACKSLASH_DOUBLE_QUOTE, BACKSLASH_SINGLE_QUOTE],
    multiline_strings: &[SpanRule {
        delimiter: "`",
        escape: EscapeStyle::Backslash,
    }],
    hashed_raw_strings: false,
    heredocs: false,
};

pub static GO: LanguageProfile = LanguageProfile {
    name: "go",
    line_comments: &["//"],
    block_comment: Some(BlockCommentRule {
        open: "/*",
        close: "*/",
        nestable: false,
    }),
    quotes: &[BACKSLASH_DOUBLE_QUOTE, BACKSLASH_SINGLE_QUOTE],
    multiline_strings: &[SpanRule {
        delimiter: "`",
        escape: EscapeStyle::None,
    }],
    hashed_raw_strings: false,
    heredocs: false,
};

pub static PYTHON: LanguageProfile = LanguageProfile {
    name: "python",
    line_comments: &["#"],
    block_comment: None,
    quotes: &[BACKSLASH_DOUBLE_QUOTE, BACKSLASH_SINGLE_QUOTE],
    multiline_strings: &[
        SpanRule {
            delimiter: "\"\"\"",
            escape: EscapeStyle::Backslash,
        },
        SpanRule {
            delimiter: "'''",
            escape: EscapeStyle::Backslash,
        },
    ],
    hashed_raw_strings: false,
    heredocs: false,
};

pub static RUST: LanguageProfile = LanguageProfile {
    name: "rust",
    line_comments: &["//"],
    block_comment: Some(BlockCommentRule {
        open: "/*",
        close: "*/",
        nestable: true,
    }),
    quotes: &[BACKSLASH_DOUBLE_QUOTE, BACKSLASH_SINGLE_QUOTE],
    multiline_strings: &[],
    hashed_raw_strings: true,
    heredocs: false,
};

pub static TERRAFORM: LanguageProfile = LanguageProfile {
    name: "terraform",
    line_comments: &["#", "//"],
    block_comment: Some(BlockCommentRule {
        open: "/*",
        close: "*/",
        nestable: false,
    }),
    quotes: &[BACKSLASH_DOUBLE_QUOTE],
    multiline_strings: &[],
    hashed_raw_strings: false,
    heredocs: true,
};

pub static YAML: LanguageProfile = LanguageProfile {
    name: "yaml",
    line_comments: &["#"],
    block_comment: None,
    quotes: &[
        BACKSLASH_DOUBLE_QUOTE,
        QuoteRule {
            delimiter: '\'',
            escape: EscapeStyle::Doubled,
        },
    ],
    multiline_strings: &[],
    hashed_raw_strings: false,
    heredocs: false,
};

/// Maps a file extension (with or without the leading dot) to its profile.
pub fn profile_for_extension(extension: &str) -> Option<&'static LanguageProfile> {
    let ext = extension.trim_start_matches('.');
    match ext.to_ascii_lowercase().as_str() {
        "js" | "ts" | "jsx" | "tsx" => Some(&JAVASCRIPT),
        "go" => Some(&GO),
        "py" => Some(&PYTHON),
        "rs" => Some(&RUST),
        "tf" | "tfvars" => Some(&TERRAFORM),
        "yaml" | "yml" => Some(&YAML),
        _ => None,
    }
}
