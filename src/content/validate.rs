//! Front-matter validation.
//!
//! | Key         | Required | Kind              | Default |
//! |-------------|----------|-------------------|---------|
//! | `title`     | yes      | text              |         |
//! | `date`      | yes      | `YYYY-MM-DD` text |         |
//! | `published` | no       | boolean           | `false` |
//! | `tags`      | no       | list of text      | `[]`    |
//! | `layout`    | no       | text (opaque)     | none    |
//!
//! Any other key passes through untouched.

use super::{
    document::TagSet,
    error::ContentError,
    metadata::{Metadata, MetaValue},
};
use chrono::NaiveDate;

pub const TITLE: &str = "title";
pub const DATE: &str = "date";
pub const PUBLISHED: &str = "published";
pub const TAGS: &str = "tags";
pub const LAYOUT: &str = "layout";

/// Keys with a typed meaning; everything else is pass-through metadata.
pub const RECOGNIZED: [&str; 5] = [TITLE, DATE, PUBLISHED, TAGS, LAYOUT];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed view of the recognized front-matter keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDate,
    pub tags: TagSet,
    pub published: bool,
    pub layout: Option<String>,
}

/// Check parsed metadata and body, in key order of the table above.
pub fn validate(metadata: &Metadata, body: &str) -> Result<FrontMatter, ContentError> {
    let title = required_text(metadata, TITLE)?.to_owned();
    let date = date(metadata)?;
    let published = published(metadata)?;
    let tags = tags(metadata)?;
    let layout = layout(metadata)?;

    if body.trim().is_empty() {
        return Err(ContentError::EmptyBody);
    }

    Ok(FrontMatter {
        title,
        date,
        tags,
        published,
        layout,
    })
}

/// Fetch a required text field. Blank text counts as absent.
fn required_text<'a>(metadata: &'a Metadata, field: &'static str) -> Result<&'a str, ContentError> {
    match metadata.get(field) {
        None | Some(MetaValue::Null) => Err(ContentError::MissingRequiredField(field)),
        Some(MetaValue::Text(text)) if text.trim().is_empty() => {
            Err(ContentError::MissingRequiredField(field))
        }
        Some(MetaValue::Text(text)) => Ok(text.trim()),
        Some(_) => Err(ContentError::InvalidFieldType {
            field,
            expected: "text",
        }),
    }
}

fn date(metadata: &Metadata) -> Result<NaiveDate, ContentError> {
    let invalid = ContentError::InvalidFieldType {
        field: DATE,
        expected: "an ISO-8601 date (YYYY-MM-DD)",
    };
    let text = required_text(metadata, DATE).map_err(|err| match err {
        ContentError::InvalidFieldType { .. } => invalid.clone(),
        other => other,
    })?;
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid)
}

fn published(metadata: &Metadata) -> Result<bool, ContentError> {
    match metadata.get(PUBLISHED) {
        None | Some(MetaValue::Null) => Ok(false),
        Some(MetaValue::Bool(value)) => Ok(*value),
        Some(_) => Err(ContentError::InvalidFieldType {
            field: PUBLISHED,
            expected: "a boolean",
        }),
    }
}

fn tags(metadata: &Metadata) -> Result<TagSet, ContentError> {
    let invalid = || ContentError::InvalidFieldType {
        field: TAGS,
        expected: "a list of text",
    };
    match metadata.get(TAGS) {
        None | Some(MetaValue::Null) => Ok(TagSet::default()),
        Some(MetaValue::List(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .ok_or_else(invalid)
            })
            .collect(),
        Some(_) => Err(invalid()),
    }
}

fn layout(metadata: &Metadata) -> Result<Option<String>, ContentError> {
    match metadata.get(LAYOUT) {
        None | Some(MetaValue::Null) => Ok(None),
        Some(MetaValue::Text(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ContentError::InvalidFieldType {
            field: LAYOUT,
            expected: "text",
        }),
    }
}
