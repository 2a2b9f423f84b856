//! Syntax highlighting and the changed-line overlay.
//!
//! Tokenization is a line-local heuristic: per comment style one compiled
//! pattern recognizes line comments, string literals, numbers, and
//! identifier words, in that precedence order; identifier words are checked
//! against a per-language keyword table. Block comments and multi-line
//! strings are out of scope. Emitted markup uses short Pygments-style
//! classes (`c` comment, `s` string, `m` number, `k` keyword); everything
//! else is HTML-escaped plain text.
//!
//! The overlay works on the structured per-line fragments, never on the
//! joined markup: each line gets a `lineno` span, flagged lines are wrapped
//! in a `changed` span, and the joined document goes into a `codehilite`
//! container sharing the first and last code line so markup and input have
//! the same line count.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::diff::split_lines;
use crate::registry::Language;

/// Final rendered markup plus the language it was highlighted as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    /// Highlighted markup with changed lines wrapped in a marker span.
    pub markup: String,
    /// Language the code was tokenized as.
    pub language: Language,
}

/// Highlights `code` and marks every line whose 1-based number appears in
/// `diff_lines` as changed.
///
/// Numbers beyond the rendered line count are ignored; line order and line
/// count of `code` are preserved.
pub fn render(code: &str, language: Language, diff_lines: &[usize]) -> RenderedOutput {
    let lines = split_lines(code);
    let fragments = tokenize(&lines, language);
    let flagged: HashSet<usize> = diff_lines.iter().copied().collect();

    let body = fragments
        .iter()
        .enumerate()
        .map(|(idx, fragment)| {
            let lineno = idx + 1;
            let numbered = format!("<span class=\"lineno\">{lineno}</span> {fragment}");
            if flagged.contains(&lineno) {
                format!("<span class=\"changed\">{numbered}</span>")
            } else {
                numbered
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    RenderedOutput {
        markup: format!("<div class=\"codehilite\"><pre>{body}</pre></div>"),
        language,
    }
}

/// Tokenizes each line into a markup fragment. The output length always
/// equals the input length.
pub fn tokenize(lines: &[&str], language: Language) -> Vec<String> {
    let pattern = lexer_for(comment_style(language));
    let keywords = keyword_table(language);
    lines
        .iter()
        .map(|line| markup_line(line, pattern, keywords))
        .collect()
}

fn markup_line(line: &str, pattern: &Regex, keywords: &[&str]) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    let mut last = 0;
    for caps in pattern.captures_iter(line) {
        let whole = caps.get(0).expect("capture 0 always present");
        out.push_str(&escape(&line[last..whole.start()]));

        let class = if caps.name("c").is_some() {
            Some("c")
        } else if caps.name("s").is_some() {
            Some("s")
        } else if caps.name("m").is_some() {
            Some("m")
        } else if keywords.contains(&whole.as_str()) {
            Some("k")
        } else {
            None
        };
        match class {
            Some(class) => {
                out.push_str(&format!(
                    "<span class=\"{class}\">{}</span>",
                    escape(whole.as_str())
                ));
            }
            None => out.push_str(&escape(whole.as_str())),
        }
        last = whole.end();
    }
    out.push_str(&escape(&line[last..]));
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Line-comment marker family of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    /// `//`
    Slash,
    /// `#`
    Hash,
    /// `--`
    Dash,
    /// `#` or `//` (php)
    HashOrSlash,
}

fn comment_style(language: Language) -> CommentStyle {
    match language {
        Language::Php => CommentStyle::HashOrSlash,
        Language::Python | Language::Perl => CommentStyle::Hash,
        Language::Lua => CommentStyle::Dash,
        Language::CSharp
        | Language::Cpp
        | Language::JavaScript
        | Language::Rust
        | Language::Kotlin
        | Language::Scala
        | Language::Go => CommentStyle::Slash,
    }
}

fn lexer_for(style: CommentStyle) -> &'static Regex {
    static SLASH: OnceLock<Regex> = OnceLock::new();
    static HASH: OnceLock<Regex> = OnceLock::new();
    static DASH: OnceLock<Regex> = OnceLock::new();
    static HASH_OR_SLASH: OnceLock<Regex> = OnceLock::new();
    match style {
        CommentStyle::Slash => SLASH.get_or_init(|| build_lexer(r"//.*")),
        CommentStyle::Hash => HASH.get_or_init(|| build_lexer(r"#.*")),
        CommentStyle::Dash => DASH.get_or_init(|| build_lexer(r"--.*")),
        CommentStyle::HashOrSlash => HASH_OR_SLASH.get_or_init(|| build_lexer(r"(?://|#).*")),
    }
}

fn build_lexer(comment: &str) -> Regex {
    let pattern = format!(
        r#"(?P<c>{comment})|(?P<s>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*')|(?P<m>\b\d+(?:\.\d+)?\b)|(?P<w>[A-Za-z_][A-Za-z0-9_]*)"#
    );
    Regex::new(&pattern).expect("static lexer pattern compiles")
}

fn keyword_table(language: Language) -> &'static [&'static str] {
    match language {
        Language::Php => &[
            "function", "return", "if", "else", "elseif", "foreach", "for", "while", "class",
            "public", "private", "protected", "static", "new", "echo", "use", "namespace", "null",
            "true", "false",
        ],
        Language::CSharp => &[
            "using", "namespace", "class", "public", "private", "protected", "static", "void",
            "int", "string", "bool", "var", "new", "return", "if", "else", "for", "foreach",
            "while", "null", "true", "false",
        ],
        Language::Cpp => &[
            "include", "int", "char", "bool", "void", "auto", "const", "return", "if", "else",
            "for", "while", "class", "struct", "new", "delete", "namespace", "using", "template",
            "true", "false", "nullptr",
        ],
        Language::Lua => &[
            "function", "end", "local", "return", "if", "then", "else", "elseif", "for", "while",
            "do", "repeat", "until", "nil", "true", "false", "and", "or", "not",
        ],
        Language::JavaScript => &[
            "function", "return", "if", "else", "for", "while", "const", "let", "var", "class",
            "new", "import", "export", "async", "await", "null", "undefined", "true", "false",
        ],
        Language::Python => &[
            "def", "return", "if", "elif", "else", "for", "while", "import", "from", "class",
            "print", "lambda", "with", "as", "try", "except", "raise", "pass", "None", "True",
            "False", "and", "or", "not", "in", "is",
        ],
        Language::Rust => &[
            "fn", "let", "mut", "pub", "use", "mod", "struct", "enum", "impl", "trait", "match",
            "if", "else", "for", "while", "loop", "return", "self", "Self", "true", "false",
        ],
        Language::Kotlin => &[
            "fun", "val", "var", "class", "object", "interface", "return", "if", "else", "when",
            "for", "while", "import", "package", "null", "true", "false",
        ],
        Language::Perl => &[
            "sub", "my", "our", "use", "return", "if", "elsif", "else", "unless", "for", "foreach",
            "while", "print", "defined", "undef",
        ],
        Language::Scala => &[
            "def", "val", "var", "class", "object", "trait", "extends", "with", "return", "if",
            "else", "match", "case", "for", "while", "import", "package", "new", "null", "true",
            "false",
        ],
        Language::Go => &[
            "func", "package", "import", "return", "if", "else", "for", "range", "var", "const",
            "type", "struct", "interface", "map", "chan", "go", "defer", "nil", "true", "false",
        ],
    }
}
