//! Front-matter splitting and parsing.
//!
//! A document starts with a `---` line, a YAML key-value block, and a
//! closing `---` line. Everything after the closing line is the body:
//!
//! ```markdown
//! ---
//! title: Run a MongoDB Replica Set Locally
//! date: 2019-09-01
//! tags: [mongodb]
//! published: true
//! ---
//!
//! Body text starts here.
//! ```

use super::{error::ContentError, metadata::Metadata};
use serde_yaml::Value;

/// Delimiter line opening and closing the metadata block.
pub const DELIMITER: &str = "---";

/// Split a raw document into its metadata and body.
///
/// The body keeps its trailing whitespace as-is; only blank lines directly
/// after the closing delimiter are dropped.
pub fn parse(raw: &str) -> Result<(Metadata, &str), ContentError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let (first, mut rest) =
        next_line(text).ok_or_else(|| ContentError::malformed("document is empty"))?;
    if !is_delimiter(first) {
        return Err(ContentError::malformed(
            "document must start with a `---` line",
        ));
    }

    let block_start = text.len() - rest.len();
    let (block, body) = loop {
        let Some((line, after)) = next_line(rest) else {
            return Err(ContentError::malformed("closing `---` line not found"));
        };
        if is_delimiter(line) {
            let block_end = text.len() - rest.len();
            break (&text[block_start..block_end], after);
        }
        rest = after;
    };

    let metadata = parse_block(block)?;
    Ok((metadata, trim_leading_blank_lines(body)))
}

/// Write metadata and body back into document form.
///
/// `parse(&to_source(..))` yields the same metadata and body again.
pub fn to_source(metadata: &Metadata, body: &str) -> Result<String, ContentError> {
    let block = if metadata.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(metadata)
            .map_err(|err| ContentError::malformed(format!("cannot serialize: {err}")))?
    };
    Ok(format!("{DELIMITER}\n{block}{DELIMITER}\n\n{body}"))
}

fn parse_block(block: &str) -> Result<Metadata, ContentError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let value: Value =
        serde_yaml::from_str(block).map_err(|err| ContentError::malformed(err.to_string()))?;
    Metadata::from_yaml(value)
}

#[inline]
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split off the first line, returning it (without `\n`) and the remainder.
fn next_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    Some(match text.find('\n') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => (text, ""),
    })
}

fn trim_leading_blank_lines(mut text: &str) -> &str {
    while let Some((line, rest)) = next_line(text) {
        if !line.trim().is_empty() {
            break;
        }
        text = rest;
    }
    text
}
