//! Run-preserving placeholder replacement.
//!
//! A placeholder is located in the paragraph's full text and the match is
//! mapped back onto run boundaries. Runs the match does not touch are kept
//! as they are. A touched run is cut into the text before the token (its own
//! style), the replacement (style of the run holding the token's first
//! character) and the text after the token (style of the run holding the
//! token's last character). The same mapping covers tokens that an editor
//! split across several runs: runs lying entirely inside the token vanish.
//!
//! Every new piece goes through the markup parser, so `*x*` in a value turns
//! into an emphasized run.

use super::markup;
use crate::model::{Paragraph, TextRun, TextStyle};

/// Replace every occurrence of `token` in `paragraph` with `replacement`.
///
/// Returns the number of occurrences replaced; zero means the paragraph was
/// left untouched.
pub fn replace_in_paragraph(paragraph: &mut Paragraph, token: &str, replacement: &str) -> usize {
    if token.is_empty() || !paragraph.contains(token) {
        return 0;
    }

    let full = paragraph.plain_text();
    let matches: Vec<(usize, usize)> = full
        .match_indices(token)
        .map(|(start, m)| (start, start + m.len()))
        .collect();

    let old_runs = std::mem::take(&mut paragraph.runs);
    let mut runs = Vec::with_capacity(old_runs.len() + 2 * matches.len());
    let mut run_start = 0;

    for run in old_runs {
        let run_end = run_start + run.text.len();
        let mut touching = matches
            .iter()
            .filter(|&&(start, end)| start < run_end && end > run_start)
            .peekable();

        if touching.peek().is_none() {
            runs.push(run);
            run_start = run_end;
            continue;
        }

        let mut cursor = run_start;
        for &(start, end) in touching {
            if start >= run_start {
                push_marked_up(&mut runs, &full[cursor..start], &run.style);
                push_marked_up(&mut runs, replacement, &run.style);
            }
            cursor = cursor.max(end.min(run_end));
        }
        push_marked_up(&mut runs, &full[cursor..run_end], &run.style);

        run_start = run_end;
    }

    paragraph.runs = runs;
    matches.len()
}

/// Apply several replacements in order. Returns the total number of
/// occurrences replaced.
pub fn replace_all<'a>(
    paragraph: &mut Paragraph,
    replacements: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> usize {
    replacements
        .into_iter()
        .map(|(token, value)| replace_in_paragraph(paragraph, token, value))
        .sum()
}

/// Style of the run holding the first character of `token`, falling back to
/// the first run's style, then to the default style.
pub fn token_style(paragraph: &Paragraph, token: &str) -> TextStyle {
    let full = paragraph.plain_text();
    if let Some(offset) = full.find(token) {
        let mut run_start = 0;
        for run in &paragraph.runs {
            let run_end = run_start + run.text.len();
            if offset < run_end {
                return run.style.clone();
            }
            run_start = run_end;
        }
    }
    paragraph
        .runs
        .first()
        .map(|run| run.style.clone())
        .unwrap_or_default()
}

/// Build runs for `text` with `style`, honoring emphasis markup.
pub fn marked_up_runs(text: &str, style: &TextStyle) -> Vec<TextRun> {
    let mut runs = Vec::new();
    push_marked_up(&mut runs, text, style);
    runs
}

fn push_marked_up(runs: &mut Vec<TextRun>, text: &str, style: &TextStyle) {
    if text.is_empty() {
        return;
    }
    if !markup::has_markup(text) {
        runs.push(TextRun::styled(text, style.clone()));
        return;
    }
    for segment in markup::parse(text) {
        if segment.text.is_empty() {
            continue;
        }
        let style = if segment.emphasis {
            style.emphasized()
        } else {
            style.clone()
        };
        runs.push(TextRun::styled(segment.text, style));
    }
}
