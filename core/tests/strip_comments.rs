use nocomms_core::stripper::{
    clean_source, collapse_excess_newlines, profile_for_extension, strip_comments,
};

struct Case {
    name: &'static str,
    input: &'static str,
    expected: &'static str,
}

fn strip(ext: &str, input: &str) -> String {
    let profile = profile_for_extension(ext).expect("profiled extension");
    strip_comments(input, profile)
}

fn check(ext: &str, cases: &[Case]) {
    for case in cases {
        let got = strip(ext, case.input);
        assert_eq!(
            got, case.expected,
            "case '{}' failed\ninput:\n{}",
            case.name, case.input
        );
    }
}

#[test]
fn go_comments() {
    check(
        "go",
        &[
            Case {
                name: "single line comment",
                input: "x := 5 // this is a comment\ny := 10",
                expected: "x := 5\ny := 10",
            },
            Case {
                name: "string with comment-like content",
                input: r#"s := "// not a comment""#,
                expected: r#"s := "// not a comment""#,
            },
            Case {
                name: "escaped quotes in string",
                input: r#"s := "He said \"hello\" // still string"
// gone"#,
                expected: r#"s := "He said \"hello\" // still string"
"#,
            },
            Case {
                name: "raw string spans lines",
                input: "s := `keep // this\nand # this`\ndone := true",
                expected: "s := `keep // this\nand # this`\ndone := true",
            },
            Case {
                name: "block comment across lines keeps line count",
                input: "a := 1\n/* b\nc */\nd := 2",
                expected: "a := 1\n\n\nd := 2",
            },
            Case {
                name: "inline block comment",
                input: "x := 1 /* mid */ + 2",
                expected: "x := 1  + 2",
            },
            Case {
                name: "rune literal with slash",
                input: "slash := '/' // comment",
                expected: "slash := '/'",
            },
        ],
    );
}

#[test]
fn javascript_comments() {
    check(
        "js",
        &[
            Case {
                name: "single line comment",
                input: "const x = 5; // this is a comment\nconst y = 10;",
                expected: "const x = 5;\nconst y = 10;",
            },
            Case {
                name: "template literal with comment-like content",
                input: "const str = `// not a comment\n/* still not */`;",
                expected: "const str = `// not a comment\n/* still not */`;",
            },
            Case {
                name: "block comments do not nest",
                input: "/* outer /* inner */ still in comment */\nconst x = 5;",
                expected: " still in comment */\nconst x = 5;",
            },
            Case {
                name: "inline block comment between statements",
                input: "const y = 10; /* inline block */ const z = 15;",
                expected: "const y = 10;  const z = 15;",
            },
            Case {
                name: "escaped quotes in string",
                input: "const str = \"He said \\\"hello\\\" // comment\";\n// another comment",
                expected: "const str = \"He said \\\"hello\\\" // comment\";\n",
            },
            Case {
                name: "backslash in template literal",
                input: r"const str = `path\\to\\file`; // comment",
                expected: r"const str = `path\\to\\file`;",
            },
            Case {
                name: "typescript generics survive",
                input: "function map<T, U>(arr: T[]): U[] {\n  // implementation\n  return arr.map(/* ... */);\n}",
                expected: "function map<T, U>(arr: T[]): U[] {\n\n  return arr.map();\n}",
            },
        ],
    );
}

#[test]
fn python_comments() {
    check(
        "py",
        &[
            Case {
                name: "single line comment",
                input: "x = 5 # comment\ny = 10",
                expected: "x = 5\ny = 10",
            },
            Case {
                name: "docstring body is preserved",
                input: "def f():\n    '''doc\n    # kept\n    '''\n    return 1",
                expected: "def f():\n    '''doc\n    # kept\n    '''\n    return 1",
            },
            Case {
                name: "triple quote closing on same line",
                input: r#"x = """a # b""" # c"#,
                expected: r#"x = """a # b""""#,
            },
            Case {
                name: "hash inside string",
                input: r#"s = "a # b" # c"#,
                expected: r#"s = "a # b""#,
            },
            Case {
                name: "escaped quote in string",
                input: r#"s = 'don\'t # inside' # outside"#,
                expected: r#"s = 'don\'t # inside'"#,
            },
            Case {
                name: "multi-line string with quotes inside",
                input: "s = \"\"\"\nhe said \"hi\" # kept\n\"\"\"",
                expected: "s = \"\"\"\nhe said \"hi\" # kept\n\"\"\"",
            },
        ],
    );
}

#[test]
fn rust_comments() {
    check(
        "rs",
        &[
            Case {
                name: "nested block comment closes at depth zero",
                input: "/* a /* b */ c */\nx",
                expected: "\nx",
            },
            Case {
                name: "three levels of nesting",
                input: "/* level 1 /* level 2 /* level 3 */ level 2 */ level 1 */\nlet x = 5;",
                expected: "\nlet x = 5;",
            },
            Case {
                name: "raw string with multiple hashes",
                input: r###"let s = r##"String with "quotes" and #hash"##; // comment"###,
                expected: r###"let s = r##"String with "quotes" and #hash"##;"###,
            },
            Case {
                name: "raw string spans lines",
                input: r##"let s = r#"first // keep
second # keep"#;
let t = 1; // drop"##,
                expected: r##"let s = r#"first // keep
second # keep"#;
let t = 1;"##,
            },
            Case {
                name: "char literals",
                input: r"let c = '/'; // comment
let c2 = '*';
let c3 = '\'';",
                expected: r"let c = '/';
let c2 = '*';
let c3 = '\'';",
            },
            Case {
                name: "doc comments are regular comments",
                input: "/// doc comment\nfn foo() {}\n//! module doc",
                expected: "\nfn foo() {}\n",
            },
            Case {
                name: "string with comment-like content",
                input: r#"let s = "// not a comment";"#,
                expected: r#"let s = "// not a comment";"#,
            },
        ],
    );
}

#[test]
fn terraform_comments() {
    check(
        "tf",
        &[
            Case {
                name: "hash line comment",
                input: "resource \"aws_instance\" \"example\" {\n  # comment\n  ami = \"ami-123456\"\n}",
                expected: "resource \"aws_instance\" \"example\" {\n\n  ami = \"ami-123456\"\n}",
            },
            Case {
                name: "double slash line comment",
                input: "a = 1 // c",
                expected: "a = 1",
            },
            Case {
                name: "inline hash after string",
                input: "ami = \"ami-123\" # inline",
                expected: "ami = \"ami-123\"",
            },
            Case {
                name: "string with comment-like content",
                input: "description = \"This is # not a comment\"\nname = \"test // also not\"",
                expected: "description = \"This is # not a comment\"\nname = \"test // also not\"",
            },
            Case {
                name: "heredoc body is untouched",
                input: "user_data = <<EOF\n#!/bin/bash\n# preserved\necho \"Hello\"\nEOF",
                expected: "user_data = <<EOF\n#!/bin/bash\n# preserved\necho \"Hello\"\nEOF",
            },
            Case {
                name: "indented heredoc",
                input: "user_data = <<-EOF\n  # preserved\n  echo \"test\"\n  EOF",
                expected: "user_data = <<-EOF\n  # preserved\n  echo \"test\"\n  EOF",
            },
            Case {
                name: "comment between heredocs is removed",
                input: "user_data = <<EOF\n# Preserved\nEOF\n# Removed comment\nmetadata = <<-METADATA\n  # Also preserved\n  METADATA",
                expected: "user_data = <<EOF\n# Preserved\nEOF\n\nmetadata = <<-METADATA\n  # Also preserved\n  METADATA",
            },
            Case {
                name: "block comment keeps line count",
                input: "/* a\nb */\nx = 1",
                expected: "\n\nx = 1",
            },
            Case {
                name: "escaped quotes in string",
                input: "description = \"He said \\\"hello\\\" # comment\"\n# another",
                expected: "description = \"He said \\\"hello\\\" # comment\"\n",
            },
        ],
    );
}

#[test]
fn yaml_comments() {
    check(
        "yaml",
        &[
            Case {
                name: "line comment",
                input: "key: value # comment\nother: 1",
                expected: "key: value\nother: 1",
            },
            Case {
                name: "hash inside double-quoted string",
                input: r##"key: "a # in" # out"##,
                expected: r##"key: "a # in""##,
            },
            Case {
                name: "doubled single-quote escape",
                input: "key: 'It''s # in' # out",
                expected: "key: 'It''s # in'",
            },
            Case {
                name: "backslash escape in double quotes",
                input: "msg: \"quote \\\" # in\" # out",
                expected: "msg: \"quote \\\" # in\"",
            },
            Case {
                name: "comment-only line",
                input: "# header\nkey: 1",
                expected: "\nkey: 1",
            },
        ],
    );
}

// A small corpus exercising every profile, used for the invariant checks.
fn corpus() -> Vec<(&'static str, &'static str)> {
    vec![
        ("go", "package main\n\n// c\nfunc main() {\n\ts := `raw\n# text`\n\t_ = s /* done */\n}\n"),
        ("js", "const a = 1; // x\nconst t = `multi\nline // inside`;\n/* block\nstill */\nconst b = 2;\n"),
        ("py", "x = 1 # c\ns = '''\n# inside\n'''\ny = 2\n"),
        ("rs", "fn main() {\n    /* a /* b */ c */\n    let s = r#\"raw // text\n more\"#;\n    let x = 1; // c\n}\n"),
        ("tf", "# header\nuser_data = <<EOF\n# body\nEOF\nami = \"a # b\" # c\n"),
        ("yaml", "# c\nkey: 'it''s # fine' # gone\nother: \"x \\\" # y\"\n"),
    ]
}

#[test]
fn stripping_preserves_line_count() {
    for (ext, doc) in corpus() {
        let stripped = strip(ext, doc);
        assert_eq!(
            stripped.split('\n').count(),
            doc.split('\n').count(),
            "line count changed for {ext}"
        );
    }
}

#[test]
fn stripping_is_idempotent() {
    for (ext, doc) in corpus() {
        let once = strip(ext, doc);
        let twice = strip(ext, &once);
        assert_eq!(once, twice, "strip not idempotent for {ext}");
    }
}

#[test]
fn clean_source_is_idempotent() {
    for (ext, doc) in corpus() {
        let once = clean_source(doc, ext).unwrap();
        let twice = clean_source(&once, ext).unwrap();
        assert_eq!(once, twice, "clean_source not idempotent for {ext}");
    }
}

#[test]
fn clean_source_collapses_gaps_left_by_comment_lines() {
    let input = "const x = 5;\n// comment\n/* block */\nconst y = 10;";
    assert_eq!(
        clean_source(input, "js").unwrap(),
        "const x = 5;\nconst y = 10;"
    );
}

#[test]
fn clean_source_rejects_unknown_extension() {
    let err = clean_source("# text", "txt").unwrap_err();
    assert_eq!(err.extension, "txt");
}

#[test]
fn normalizer_matches_documented_scenarios() {
    assert_eq!(collapse_excess_newlines("a\n\n\n\nb"), "a\nb");
}

#[test]
fn divergent_nesting_between_rust_and_javascript() {
    let input = "/* a /* b */ c */\nx";
    assert_eq!(strip("rs", input), "\nx");
    assert_eq!(strip("js", input), " c */\nx");
}
