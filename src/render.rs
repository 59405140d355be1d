//! Hand-off of registered posts to the templating layer.
//!
//! The renderer turns registry entries into plain serializable records and
//! writes them as JSON data files:
//!
//! ```text
//! <output>/
//! ├── site.json            [base] + [extra]
//! ├── posts.json           published records, listing order
//! ├── tags.json            { tag: [slug, ...] }
//! ├── drafts.json          every record (drafts enabled only)
//! └── posts/<slug>.json    one record per post
//! ```

use crate::{
    config::{BaseConfig, RenderConfig, SiteConfig},
    content::{
        ContentError, MetaValue, Metadata, Post, Registry, TagSet, Visibility, validate,
    },
};
use anyhow::{Context, Result};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

/// Date format used in every record.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a template needs to render one post.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRecord<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub tags: &'a TagSet,
    /// ISO 8601 date (e.g. "2019-10-19")
    pub date: String,
    pub published: bool,
    pub excerpt: &'a str,
    pub body: &'a str,
    /// Document layout, or the configured default
    pub layout: &'a str,
    /// Front-matter keys without a typed meaning
    pub extra: Extra<'a>,
}

/// Serializes only the pass-through keys of a document's metadata.
#[derive(Debug, Clone, Copy)]
pub struct Extra<'a>(&'a Metadata);

impl<'a> Extra<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a MetaValue)> + use<'a> {
        self.0
            .iter()
            .filter(|(key, _)| !validate::RECOGNIZED.contains(key))
    }
}

impl Serialize for Extra<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Site-wide data, exposed in `site.json`.
#[derive(Debug, Serialize)]
struct SiteData<'a> {
    #[serde(flatten)]
    base: &'a BaseConfig,
    extra: &'a HashMap<String, toml::Value>,
    posts: usize,
}

/// Builds records from a registry. Holds no state beyond its settings.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    drafts: bool,
}

impl Renderer {
    pub const fn new(config: RenderConfig) -> Self {
        Self {
            config,
            drafts: false,
        }
    }

    /// Also hand unpublished posts to templates when writing.
    pub const fn with_drafts(mut self, drafts: bool) -> Self {
        self.drafts = drafts;
        self
    }

    /// Record for a single registered post.
    pub fn record<'a>(&'a self, post: &'a Post) -> RenderRecord<'a> {
        let document = post.document();
        RenderRecord {
            slug: post.slug(),
            title: document.title(),
            tags: document.tags(),
            date: document.date().format(DATE_FORMAT).to_string(),
            published: document.published(),
            excerpt: post.excerpt(),
            body: document.body(),
            layout: document.layout().unwrap_or(&self.config.default_layout),
            extra: Extra(document.metadata()),
        }
    }

    /// Published records, newest first.
    pub fn published<'a>(
        &'a self,
        registry: &'a Registry,
    ) -> impl Iterator<Item = RenderRecord<'a>> {
        registry.list_published().map(|post| self.record(post))
    }

    /// Published records carrying `tag`, newest first.
    pub fn by_tag<'a>(
        &'a self,
        registry: &'a Registry,
        tag: &'a str,
    ) -> impl Iterator<Item = RenderRecord<'a>> {
        registry.find_by_tag(tag).map(|post| self.record(post))
    }

    /// Every record, drafts included, newest first.
    pub fn all<'a>(&'a self, registry: &'a Registry) -> impl Iterator<Item = RenderRecord<'a>> {
        registry.list_all().map(|post| self.record(post))
    }

    pub fn get<'a>(
        &'a self,
        registry: &'a Registry,
        slug: &str,
        visibility: Visibility,
    ) -> Result<RenderRecord<'a>, ContentError> {
        registry.get(slug, visibility).map(|post| self.record(post))
    }

    /// Serialize a value using the configured JSON style.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("Failed to serialize render data")
    }

    /// Write all data files into `out_dir`. Returns the number of files written.
    ///
    /// Data left by an earlier run (per-post files, `drafts.json`) is removed
    /// first, so a post that was unpublished or renamed since does not linger.
    pub fn write(&self, registry: &Registry, site: &SiteConfig, out_dir: &Path) -> Result<usize> {
        let posts_dir = out_dir.join("posts");
        if posts_dir.exists() {
            fs::remove_dir_all(&posts_dir).with_context(|| {
                format!("Failed to clear directory: {}", posts_dir.display())
            })?;
        }
        let drafts_path = out_dir.join("drafts.json");
        if drafts_path.exists() {
            fs::remove_file(&drafts_path)
                .with_context(|| format!("Failed to remove {}", drafts_path.display()))?;
        }
        fs::create_dir_all(&posts_dir)
            .with_context(|| format!("Failed to create directory: {}", posts_dir.display()))?;

        let published: Vec<_> = self.published(registry).collect();
        let tags: BTreeMap<&str, Vec<&str>> = registry
            .tags()
            .into_keys()
            .map(|tag| {
                let slugs = self.by_tag(registry, tag).map(|record| record.slug).collect();
                (tag, slugs)
            })
            .collect();
        let site_data = SiteData {
            base: &site.base,
            extra: &site.extra,
            posts: published.len(),
        };

        let mut written = 0;
        let mut emit = |path: &Path, json: String| -> Result<()> {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
            Ok(())
        };

        emit(&out_dir.join("site.json"), self.to_json(&site_data)?)?;
        emit(&out_dir.join("posts.json"), self.to_json(&published)?)?;
        emit(&out_dir.join("tags.json"), self.to_json(&tags)?)?;

        let pages = if self.drafts {
            let all: Vec<_> = self.all(registry).collect();
            emit(&drafts_path, self.to_json(&all)?)?;
            all
        } else {
            published
        };
        for record in &pages {
            let path = posts_dir.join(format!("{}.json", record.slug));
            emit(&path, self.to_json(record)?)?;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Document;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn registry() -> Registry {
        let sources = [
            (
                "replica.md",
                "---\ntitle: Run a MongoDB Replica Set Locally\ndate: 2019-09-01\npublished: true\ntags: [mongodb, docker]\ncomments: true\n---\n\nSpin up three nodes.\n",
            ),
            (
                "streams.md",
                "---\ntitle: Change Streams\ndate: 2019-10-19\npublished: true\ntags: [mongodb]\nlayout: wide\n---\n\nWatch a collection.\n",
            ),
            (
                "draft.md",
                "---\ntitle: Unfinished\ndate: 2019-11-01\ntags: [nodejs]\n---\n\nTODO.\n",
            ),
        ];
        let mut registry = Registry::new(200);
        for (name, raw) in sources {
            let doc = Document::parse(PathBuf::from(name), raw.to_owned()).unwrap();
            registry.add(doc).unwrap();
        }
        registry
    }

    fn renderer() -> Renderer {
        Renderer::new(RenderConfig::default())
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_record_fields() {
        let registry = registry();
        let renderer = renderer();
        let record = renderer
            .get(&registry, "run-a-mongodb-replica-set-locally", Visibility::Public)
            .unwrap();

        assert_eq!(record.title, "Run a MongoDB Replica Set Locally");
        assert_eq!(record.date, "2019-09-01");
        assert_eq!(record.layout, "post");
        assert_eq!(record.excerpt, "Spin up three nodes.");
        assert!(record.published);

        let json: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["mongodb", "docker"]));
        assert_eq!(json["extra"], serde_json::json!({ "comments": true }));
    }

    #[test]
    fn test_record_keeps_document_layout() {
        let registry = registry();
        let renderer = renderer();
        let record = renderer
            .get(&registry, "change-streams", Visibility::Public)
            .unwrap();
        assert_eq!(record.layout, "wide");
        assert_eq!(serde_json::to_value(&record).unwrap()["extra"], serde_json::json!({}));
    }

    #[test]
    fn test_listings() {
        let registry = registry();
        let renderer = renderer();

        let published: Vec<_> = renderer.published(&registry).map(|r| r.slug).collect();
        assert_eq!(published, vec!["change-streams", "run-a-mongodb-replica-set-locally"]);

        let tagged: Vec<_> = renderer.by_tag(&registry, "docker").map(|r| r.slug).collect();
        assert_eq!(tagged, vec!["run-a-mongodb-replica-set-locally"]);

        assert_eq!(renderer.all(&registry).count(), 3);
        assert!(renderer.get(&registry, "unfinished", Visibility::Public).is_err());
        assert!(renderer.get(&registry, "unfinished", Visibility::Preview).is_ok());
    }

    #[test]
    fn test_write_published_only() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut site = SiteConfig::default();
        site.base.title = "Notes".into();
        site.extra.insert("analytics".into(), toml::Value::String("UA-1".into()));

        let written = renderer().write(&registry, &site, dir.path()).unwrap();
        assert_eq!(written, 5);

        let site_json = read_json(&dir.path().join("site.json"));
        assert_eq!(site_json["title"], "Notes");
        assert_eq!(site_json["extra"]["analytics"], "UA-1");
        assert_eq!(site_json["posts"], 2);

        let posts = read_json(&dir.path().join("posts.json"));
        assert_eq!(posts.as_array().unwrap().len(), 2);
        assert_eq!(posts[0]["slug"], "change-streams");

        let tags = read_json(&dir.path().join("tags.json"));
        assert_eq!(
            tags,
            serde_json::json!({
                "docker": ["run-a-mongodb-replica-set-locally"],
                "mongodb": ["change-streams", "run-a-mongodb-replica-set-locally"],
            })
        );

        assert!(dir.path().join("posts/change-streams.json").exists());
        assert!(!dir.path().join("posts/unfinished.json").exists());
        assert!(!dir.path().join("drafts.json").exists());
    }

    #[test]
    fn test_write_with_drafts() {
        let dir = TempDir::new().unwrap();
        let registry = registry();

        let written = renderer()
            .with_drafts(true)
            .write(&registry, &SiteConfig::default(), dir.path())
            .unwrap();
        assert_eq!(written, 7);

        let drafts = read_json(&dir.path().join("drafts.json"));
        assert_eq!(drafts[0]["slug"], "unfinished");
        assert_eq!(drafts[0]["published"], false);
        assert!(dir.path().join("posts/unfinished.json").exists());

        // drafts never leak into public listings
        let tags = read_json(&dir.path().join("tags.json"));
        assert!(tags.get("nodejs").is_none());
    }

    #[test]
    fn test_write_removes_stale_data() {
        let dir = TempDir::new().unwrap();
        let site = SiteConfig::default();

        renderer()
            .with_drafts(true)
            .write(&registry(), &site, dir.path())
            .unwrap();
        assert!(dir.path().join("posts/unfinished.json").exists());
        assert!(dir.path().join("drafts.json").exists());

        // a later public build must not leave the draft behind
        let mut registry = Registry::new(200);
        let raw = "---\ntitle: Change Streams\ndate: 2019-10-19\npublished: false\n---\n\nHidden.\n";
        registry
            .add(Document::parse(PathBuf::from("streams.md"), raw.to_owned()).unwrap())
            .unwrap();
        renderer().write(&registry, &site, dir.path()).unwrap();

        assert!(!dir.path().join("posts/unfinished.json").exists());
        assert!(!dir.path().join("posts/change-streams.json").exists());
        assert!(!dir.path().join("posts/run-a-mongodb-replica-set-locally.json").exists());
        assert!(!dir.path().join("drafts.json").exists());
        assert_eq!(read_json(&dir.path().join("posts.json")), serde_json::json!([]));
    }

    #[test]
    fn test_compact_json() {
        let renderer = Renderer::new(RenderConfig {
            pretty: false,
            ..RenderConfig::default()
        });
        assert_eq!(renderer.to_json(&[1, 2]).unwrap(), "[1,2]");
    }
}
