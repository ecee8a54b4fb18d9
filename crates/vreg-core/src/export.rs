#![forbid(unsafe_code)]

//! Pattern → source snippet formatting.

/// Export target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    /// The bare pattern.
    Raw,
    Rust,
    Python,
    JavaScript,
    Cpp,
}

impl ExportTarget {
    pub const ALL: [ExportTarget; 5] = [
        Self::Raw,
        Self::Rust,
        Self::Python,
        Self::JavaScript,
        Self::Cpp,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Cpp => "cpp",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "js" => Some(Self::JavaScript),
            "c++" => Some(Self::Cpp),
            "rs" => Some(Self::Rust),
            "py" => Some(Self::Python),
            _ => Self::ALL.into_iter().find(|t| t.name() == name),
        }
    }
}

/// Render `pattern` as a declaration in the target language.
#[must_use]
pub fn export(pattern: &str, target: ExportTarget) -> String {
    match target {
        ExportTarget::Raw => pattern.to_owned(),
        ExportTarget::Rust => {
            let hashes = "#".repeat(raw_hash_count(pattern));
            format!("let re = regex::Regex::new(r{hashes}\"{pattern}\"{hashes})?;")
        }
        ExportTarget::Python => {
            if python_raw_safe(pattern) {
                format!("pattern = re.compile(r\"{pattern}\")")
            } else {
                format!("pattern = re.compile(\"{}\")", escape_c_like(pattern))
            }
        }
        ExportTarget::JavaScript => {
            let body = if pattern.is_empty() {
                "(?:)".to_owned()
            } else {
                escape_js_literal(pattern)
            };
            format!("const re = /{body}/g;")
        }
        ExportTarget::Cpp => format!("std::regex re(\"{}\");", escape_c_like(pattern)),
    }
}

/// Minimal number of `#` needed to wrap `pattern` in a Rust raw string.
fn raw_hash_count(pattern: &str) -> usize {
    let bytes = pattern.as_bytes();
    let mut needed = 0;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'"' {
            let run = bytes[i + 1..].iter().take_while(|c| **c == b'#').count();
            needed = needed.max(run + 1);
        }
    }
    needed
}

/// A Python raw string cannot contain an unescaped quote, a newline, or end
/// in an odd run of backslashes.
fn python_raw_safe(pattern: &str) -> bool {
    let trailing = pattern.chars().rev().take_while(|c| *c == '\\').count();
    !pattern.contains(['"', '\n', '\r']) && trailing % 2 == 0
}

fn escape_c_like(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    for c in pattern.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape bare `/` and line breaks; other escapes are copied through.
fn escape_js_literal(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                // An escaped line break must not end the literal.
                match chars.next() {
                    Some('\n') => out.push('n'),
                    Some('\r') => out.push('r'),
                    Some(next) => out.push(next),
                    None => {}
                }
            }
            '/' => out.push_str("\\/"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
