//! List placeholder expansion.
//!
//! A paragraph holding `{{KEY}}` for a list-valued KEY keeps the first item
//! in place; every further item becomes a sibling paragraph carrying the same
//! paragraph format (so bullets and numbering continue) and the style of the
//! run that held the token.

use super::splice;
use crate::data::placeholder;
use crate::model::{Document, ElementId, Paragraph};

/// Expand `{{key}}` in `paragraph` in place and return the sibling
/// paragraphs for items after the first, in item order.
///
/// An empty `items` list removes the token and yields no siblings. A
/// paragraph that does not contain the token is left untouched.
pub fn expand_list_paragraph(
    paragraph: &mut Paragraph,
    key: &str,
    items: &[String],
) -> Vec<Paragraph> {
    let token = placeholder(key);
    if !paragraph.contains(&token) {
        return Vec::new();
    }

    let Some((first, rest)) = items.split_first() else {
        splice::replace_in_paragraph(paragraph, &token, "");
        return Vec::new();
    };

    let format = paragraph.format.clone();
    let style = splice::token_style(paragraph, &token);

    splice::replace_in_paragraph(paragraph, &token, first);
    paragraph.format = format.clone();

    rest.iter()
        .map(|item| Paragraph {
            runs: splice::marked_up_runs(item, &style),
            format: format.clone(),
        })
        .collect()
}

/// Expand `{{key}}` in the body paragraph `id`, inserting siblings right
/// after it.
///
/// Returns the ids of the inserted paragraphs in document order. Unknown ids
/// and non-paragraph elements are ignored.
pub fn expand_list(
    doc: &mut Document,
    id: ElementId,
    key: &str,
    items: &[String],
) -> Vec<ElementId> {
    let Some(paragraph) = doc.paragraph_mut(id) else {
        return Vec::new();
    };

    let siblings = expand_list_paragraph(paragraph, key, items);

    let mut inserted = Vec::with_capacity(siblings.len());
    let mut anchor = id;
    for sibling in siblings {
        match doc.insert_after(Some(anchor), sibling) {
            Some(new_id) => {
                inserted.push(new_id);
                anchor = new_id;
            }
            None => break,
        }
    }
    inserted
}
