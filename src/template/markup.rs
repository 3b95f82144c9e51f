//! Inline emphasis markup (`*text*` and `**text**`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Double-marker spans come first so that `**x**` is never read as `*` + `*x*`.
static EMPHASIS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*").unwrap());

/// A piece of text with its emphasis flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment text, markers stripped
    pub text: &'a str,

    /// Whether the segment was wrapped in emphasis markers
    pub emphasis: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasis: false,
        }
    }

    fn emphasized(text: &'a str) -> Self {
        Self {
            text,
            emphasis: true,
        }
    }
}

/// Split `text` into plain and emphasized segments.
///
/// Matching is left to right and non-overlapping; the earliest span wins.
/// Text without any span comes back as a single plain segment (which is
/// empty for empty input).
pub fn parse(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in EMPHASIS_REGEX.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(inner) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };

        if whole.start() > last_end {
            segments.push(Segment::plain(&text[last_end..whole.start()]));
        }
        segments.push(Segment::emphasized(inner.as_str()));
        last_end = whole.end();
    }

    if last_end < text.len() {
        segments.push(Segment::plain(&text[last_end..]));
    }

    if segments.is_empty() {
        segments.push(Segment::plain(text));
    }

    segments
}

/// Check whether `text` contains at least one emphasis span.
pub fn has_markup(text: &str) -> bool {
    EMPHASIS_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(&str, bool)> {
        parse(text).into_iter().map(|s| (s.text, s.emphasis)).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(pairs("no markup here"), vec![("no markup here", false)]);
        assert!(!has_markup("no markup here"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(pairs(""), vec![("", false)]);
    }

    #[test]
    fn test_single_marker_span() {
        assert_eq!(
            pairs("Grew revenue by *40%*"),
            vec![("Grew revenue by ", false), ("40%", true)]
        );
    }

    #[test]
    fn test_double_marker_span() {
        assert_eq!(
            pairs("**Lead** engineer"),
            vec![("Lead", true), (" engineer", false)]
        );
    }

    #[test]
    fn test_multiple_spans_keep_order() {
        assert_eq!(
            pairs("*a* then **b** then c"),
            vec![
                ("a", true),
                (" then ", false),
                ("b", true),
                (" then c", false)
            ]
        );
    }

    #[test]
    fn test_mismatched_marker_lengths_do_not_pair() {
        // "**a*" cannot close a double span; the inner "*a*" matches instead.
        assert_eq!(pairs("**a*"), vec![("*", false), ("a", true)]);
    }

    #[test]
    fn test_unclosed_marker_is_literal() {
        assert_eq!(pairs("5 * 3 = 15"), vec![("5 * 3 = 15", false)]);
        assert_eq!(pairs("*open"), vec![("*open", false)]);
    }

    #[test]
    fn test_earliest_start_wins() {
        assert_eq!(
            pairs("*x*y*"),
            vec![("x", true), ("y*", false)]
        );
    }
}
