#![forbid(unsafe_code)]

//! Match evaluation.
//!
//! Runs a generated pattern against a text buffer and reports every
//! non-overlapping match left to right, with its capture groups in
//! declaration order. The same [`MatchSet`] feeds the playground highlighter
//! ([`MatchSet::highlight_spans`]) and the debugger ([`DebugCursor`]).
//!
//! Offsets and lengths are byte offsets into the evaluated text.
//!
//! Evaluation runs inline on the caller's thread with no timeout. The
//! `regex` engine matches in linear time, so a pattern cannot backtrack
//! catastrophically, but a very large buffer still blocks the caller for
//! the duration of the scan.

use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("pattern is empty; connect some nodes to a start node first")]
    EmptyPattern,
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("path not found: {}", path.display())]
    PathNotFound { path: PathBuf },
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EvalError>;

/// A capture group that participated in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugGroup {
    pub content: String,
    pub start: usize,
    pub length: usize,
}

/// One match with its groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMatch {
    pub start: usize,
    pub length: usize,
    pub full_match: String,
    /// One entry per capturing group in declaration order; `None` when the
    /// group did not participate in this match.
    pub groups: Vec<Option<DebugGroup>>,
}

impl DebugMatch {
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// What a highlight span covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A whole match.
    Match,
    /// A capture group; `group` is 1-based, `color` indexes the palette.
    Group { group: usize, color: usize },
}

/// A region of the test text to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Index of the match this span belongs to.
    pub match_index: usize,
    pub start: usize,
    pub length: usize,
    pub kind: SpanKind,
}

/// Palette slot for a 1-based capture group number.
#[inline]
#[must_use]
pub fn group_color(group: usize, palette_size: usize) -> usize {
    group.saturating_sub(1) % palette_size.max(1)
}

/// Ordered matches of one pattern over one text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    pattern: String,
    matches: Vec<DebugMatch>,
}

impl MatchSet {
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn matches(&self) -> &[DebugMatch] {
        &self.matches
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DebugMatch> {
        self.matches.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Spans to paint: each match followed by its participating groups.
    #[must_use]
    pub fn highlight_spans(&self, palette_size: usize) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        for (match_index, m) in self.matches.iter().enumerate() {
            spans.push(HighlightSpan {
                match_index,
                start: m.start,
                length: m.length,
                kind: SpanKind::Match,
            });
            for (i, group) in m.groups.iter().enumerate() {
                let Some(group) = group else { continue };
                let number = i + 1;
                spans.push(HighlightSpan {
                    match_index,
                    start: group.start,
                    length: group.length,
                    kind: SpanKind::Group {
                        group: number,
                        color: group_color(number, palette_size),
                    },
                });
            }
        }
        spans
    }
}

/// Compile a pattern, mapping engine errors to [`EvalError::InvalidPattern`].
pub fn compile(pattern: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(EvalError::EmptyPattern);
    }
    Regex::new(pattern).map_err(|e| EvalError::InvalidPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    })
}

/// Compile `pattern` and collect its matches over `text`.
pub fn evaluate(pattern: &str, text: &str) -> Result<MatchSet> {
    let regex = compile(pattern)?;
    Ok(evaluate_compiled(&regex, text))
}

/// Collect the matches of an already compiled pattern.
#[must_use]
pub fn evaluate_compiled(regex: &Regex, text: &str) -> MatchSet {
    let matches = regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let groups = caps
                .iter()
                .skip(1)
                .map(|g| {
                    g.map(|g| DebugGroup {
                        content: g.as_str().to_owned(),
                        start: g.start(),
                        length: g.len(),
                    })
                })
                .collect();
            Some(DebugMatch {
                start: whole.start(),
                length: whole.len(),
                full_match: whole.as_str().to_owned(),
                groups,
            })
        })
        .collect();
    MatchSet {
        pattern: regex.as_str().to_owned(),
        matches,
    }
}

/// Count matches without materializing them.
#[must_use]
pub fn count_matches(regex: &Regex, text: &str) -> usize {
    regex.find_iter(text).count()
}

/// Cursor over a [`MatchSet`] for the debugger.
///
/// `select` clamps into `[0, len)`; `next`/`previous` wrap around. On an
/// empty set every operation is a no-op and `current` is `None`.
#[derive(Debug, Clone, Default)]
pub struct DebugCursor {
    set: MatchSet,
    index: usize,
}

impl DebugCursor {
    #[must_use]
    pub fn new(set: MatchSet) -> Self {
        Self { set, index: 0 }
    }

    #[must_use]
    pub fn set(&self) -> &MatchSet {
        &self.set
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&DebugMatch> {
        self.set.get(self.index)
    }

    pub fn select(&mut self, index: usize) -> Option<&DebugMatch> {
        if !self.set.is_empty() {
            self.index = index.min(self.set.len() - 1);
        }
        self.current()
    }

    pub fn next(&mut self) -> Option<&DebugMatch> {
        if !self.set.is_empty() {
            self.index = (self.index + 1) % self.set.len();
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&DebugMatch> {
        let len = self.set.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_in_mixed_text() {
        let set = evaluate(r"\d+", "a12b3").unwrap();
        assert_eq!(set.len(), 2);
        let m = &set.matches()[0];
        assert_eq!((m.start, m.length, m.full_match.as_str()), (1, 2, "12"));
        let m = &set.matches()[1];
        assert_eq!((m.start, m.length, m.full_match.as_str()), (4, 1, "3"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = evaluate("(\\d", "123").unwrap_err();
        assert!(matches!(err, EvalError::InvalidPattern { ref pattern, .. } if pattern == "(\\d"));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(evaluate("", "abc"), Err(EvalError::EmptyPattern)));
    }

    #[test]
    fn groups_in_declaration_order() {
        let set = evaluate(r"(\w+)@(\w+)", "me@home you@work").unwrap();
        assert_eq!(set.len(), 2);
        let groups = &set.matches()[1].groups;
        assert_eq!(
            groups[0],
            Some(DebugGroup {
                content: "you".into(),
                start: 8,
                length: 3
            })
        );
        assert_eq!(groups[1].as_ref().map(|g| g.content.as_str()), Some("work"));
    }

    #[test]
    fn non_participating_group_is_none() {
        let set = evaluate(r"(a)|(b)", "b").unwrap();
        let groups = &set.matches()[0].groups;
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_none());
        assert_eq!(groups[1].as_ref().map(|g| g.start), Some(0));
    }

    #[test]
    fn highlight_spans_tag_groups_with_palette_colors() {
        let set = evaluate(r"(a)(b)(c)", "abc").unwrap();
        let spans = set.highlight_spans(2);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].kind, SpanKind::Match);
        assert_eq!(spans[1].kind, SpanKind::Group { group: 1, color: 0 });
        assert_eq!(spans[2].kind, SpanKind::Group { group: 2, color: 1 });
        assert_eq!(spans[3].kind, SpanKind::Group { group: 3, color: 0 });
        assert_eq!((spans[3].start, spans[3].length), (2, 1));
    }

    #[test]
    fn cursor_wraps_and_clamps() {
        let set = evaluate(r"\d", "1 2 3").unwrap();
        let mut cursor = DebugCursor::new(set);
        assert_eq!(cursor.current().map(|m| m.start), Some(0));
        assert_eq!(cursor.previous().map(|m| m.start), Some(4));
        assert_eq!(cursor.next().map(|m| m.start), Some(0));
        assert_eq!(cursor.next().map(|m| m.start), Some(2));
        assert_eq!(cursor.select(99).map(|m| m.start), Some(4));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn cursor_on_empty_set_is_inert() {
        let mut cursor = DebugCursor::new(evaluate("x", "abc").unwrap());
        assert!(cursor.current().is_none());
        assert!(cursor.next().is_none());
        assert!(cursor.previous().is_none());
        assert!(cursor.select(3).is_none());
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn count_matches_agrees_with_evaluate() {
        let regex = compile(r"\w+").unwrap();
        let text = "one two  three";
        assert_eq!(count_matches(&regex, text), evaluate_compiled(&regex, text).len());
    }
}
