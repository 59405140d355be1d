//! Title slugification.
//!
//! Slugs are the public identifiers of documents, so the mapping is fixed:
//! transliterate to ASCII, lowercase, collapse every run of characters that
//! are not ASCII letters or digits into a single `-`, and drop leading and
//! trailing hyphens.
//!
//! | Title                               | Slug                                |
//! |-------------------------------------|-------------------------------------|
//! | `Run a MongoDB Replica Set Locally` | `run-a-mongodb-replica-set-locally` |
//! | `  TDD -- with NodeJS!  `           | `tdd-with-nodejs`                   |
//! | `Café Streams`                      | `cafe-streams`                      |

/// Convert a title to its slug. May return an empty string for titles with
/// no letters or digits.
#[inline]
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple_title() {
        assert_eq!(
            slugify("Run a MongoDB Replica Set Locally"),
            "run-a-mongodb-replica-set-locally"
        );
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("TDD -- with   NodeJS"), "tdd-with-nodejs");
        assert_eq!(slugify("Change Streams: Part #2"), "change-streams-part-2");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  --Hello World!--  "), "hello-world");
        assert_eq!(slugify("(draft)"), "draft");
    }

    #[test]
    fn test_slugify_punctuation_inside_words() {
        assert_eq!(slugify("Node.js Streams"), "node-js-streams");
        assert_eq!(slugify("Don't Block the Loop"), "don-t-block-the-loop");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café Streams"), "cafe-streams");
        assert_eq!(slugify("Über mongoimport"), "uber-mongoimport");
    }

    #[test]
    fn test_slugify_digits_kept() {
        assert_eq!(slugify("MongoDB 4.2 Release"), "mongodb-4-2-release");
    }

    #[test]
    fn test_slugify_no_alphanumerics() {
        assert_eq!(slugify("!!! ??? ---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_case_insensitive_collision() {
        assert_eq!(slugify("Bulk Data Movement"), slugify("bulk data  movement!"));
    }
}
