//! Excerpt extraction.
//!
//! An excerpt is the plain text of the first Markdown paragraph of a body,
//! cut at a word boundary once it exceeds the configured character budget.
//! Headings, code blocks and raw HTML are not paragraphs and never make it
//! into an excerpt.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Appended when the paragraph was cut.
pub const ELLIPSIS: char = '…';

/// Plain text of the first non-empty paragraph, at most `max_chars` long
/// (plus [`ELLIPSIS`] when cut). Empty when the body has no paragraph.
pub fn first_paragraph(markdown: &str, max_chars: usize) -> String {
    let mut in_paragraph = false;
    let mut image_depth = 0usize;
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                let collapsed = collapse_whitespace(&text);
                if !collapsed.is_empty() {
                    return truncate_at_word(&collapsed, max_chars);
                }
                in_paragraph = false;
            }
            // alt text is not prose
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(chunk) | Event::Code(chunk) if in_paragraph && image_depth == 0 => {
                text.push_str(&chunk);
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    String::new()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` (single-spaced) to at most `max_chars`, never inside a word.
///
/// A first word longer than the budget is kept whole.
fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut out = String::new();
    let mut used = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        if out.is_empty() {
            out.push_str(word);
            used = len;
        } else if used + 1 + len <= max_chars {
            out.push(' ');
            out.push_str(word);
            used += 1 + len;
        } else {
            break;
        }
    }

    if out.len() < text.len() {
        let trimmed = out.trim_end_matches([',', ';', ':', '.', '-']).len();
        // a punctuation-only first word stays as written
        if trimmed > 0 {
            out.truncate(trimmed);
        }
        out.push(ELLIPSIS);
    }
    out
}
