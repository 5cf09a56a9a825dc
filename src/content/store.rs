use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::warn;

use crate::config::Config;
use crate::content::front_matter::{parse_record, FieldDefaults};
use crate::content::{Collection, ContentRecord, DEFAULT_AUTHOR, DEFAULT_GUIDE_CATEGORY, DEFAULT_POST_CATEGORY};
use crate::registry::GuideRegistry;

pub struct CollectionDir {
    pub root_dir: PathBuf,
    pub defaults: FieldDefaults,
}

/// Reads posts and guides from their content directories on demand. The
/// store keeps no cached state; every call is an independent read.
pub struct ContentStore {
    posts: CollectionDir,
    guides: CollectionDir,
    registry: GuideRegistry,
}

impl ContentStore {
    pub fn new(posts_dir: PathBuf, guides_dir: PathBuf, registry: GuideRegistry) -> ContentStore {
        ContentStore {
            posts: CollectionDir {
                root_dir: posts_dir,
                defaults: FieldDefaults {
                    author: DEFAULT_AUTHOR.to_string(),
                    category: DEFAULT_POST_CATEGORY.to_string(),
                },
            },
            guides: CollectionDir {
                root_dir: guides_dir,
                defaults: FieldDefaults {
                    author: DEFAULT_AUTHOR.to_string(),
                    category: DEFAULT_GUIDE_CATEGORY.to_string(),
                },
            },
            registry,
        }
    }

    pub fn from_config(config: &Config, registry: GuideRegistry) -> ContentStore {
        let mut store = ContentStore::new(
            config.paths.posts_dir.clone(),
            config.paths.guides_dir.clone(),
            registry,
        );

        if let Some(ref defaults) = config.defaults {
            if let Some(ref author) = defaults.author {
                store.posts.defaults.author = author.clone();
                store.guides.defaults.author = author.clone();
            }
            if let Some(ref category) = defaults.post_category {
                store.posts.defaults.category = category.clone();
            }
            if let Some(ref category) = defaults.guide_category {
                store.guides.defaults.category = category.clone();
            }
        }

        store
    }

    /// All records of a collection, newest first. A missing directory is an
    /// empty collection, and a file that fails to parse is skipped so one
    /// bad file cannot take down the whole listing.
    pub fn list_all(&self, collection: Collection) -> io::Result<Vec<ContentRecord>> {
        let dir = self.collection_dir(collection);
        let files = match list_markdown_files(&dir.root_dir) {
            Ok(files) => files,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };

        let mut records = vec![];
        for file_path in files {
            let slug = match file_slug(&file_path) {
                Some(slug) => slug,
                None => continue,
            };
            match read_record(&file_path, &slug, &dir.defaults) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping content file {}: {}", file_path.display(), e),
            }
        }

        // Newest first. Undated records sink to the end; the slug tiebreak
        // keeps the order total.
        records.sort_by(|a, b| {
            b.published.cmp(&a.published).then_with(|| a.slug.cmp(&b.slug))
        });

        Ok(records)
    }

    /// Looks one record up by its slug, taken verbatim from the caller.
    /// A missing or unparseable file is a plain not-found, never an error.
    /// Guide slugs must also exist in the registry: the markdown file
    /// supplies the body, the registry supplies the list-view metadata,
    /// and a guide missing either half is not served.
    pub fn get_by_slug(&self, collection: Collection, slug: &str) -> io::Result<Option<ContentRecord>> {
        if !is_safe_slug(slug) {
            return Ok(None);
        }

        let dir = self.collection_dir(collection);
        let file_path = dir.root_dir.join(format!("{}.md", slug));
        if !file_path.is_file() {
            return Ok(None);
        }

        if collection == Collection::Guides && !self.registry.contains(slug) {
            warn!("Guide file {} exists but the registry does not list it", file_path.display());
            return Ok(None);
        }

        match read_record(&file_path, slug, &dir.defaults) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Unreadable content file {}: {}", file_path.display(), e);
                Ok(None)
            }
        }
    }

    /// Slugs of every markdown file in a collection directory, parseable or
    /// not. Consistency checks compare this against list_all.
    pub fn file_slugs(&self, collection: Collection) -> io::Result<Vec<String>> {
        let dir = self.collection_dir(collection);
        let files = match list_markdown_files(&dir.root_dir) {
            Ok(files) => files,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };

        let mut slugs: Vec<String> = files.iter().filter_map(|p| file_slug(p)).collect();
        slugs.sort();
        Ok(slugs)
    }

    pub fn registry(&self) -> &GuideRegistry {
        &self.registry
    }

    fn collection_dir(&self, collection: Collection) -> &CollectionDir {
        match collection {
            Collection::Posts => &self.posts,
            Collection::Guides => &self.guides,
        }
    }
}

fn list_markdown_files(root_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    let entries = fs::read_dir(root_dir)?;
    for entry in entries {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(file_name) = entry.file_name().to_str() {
            if file_name.ends_with(".md") {
                files.push(entry.path());
            }
        }
    }
    Ok(files)
}

fn file_slug(file_path: &Path) -> Option<String> {
    let stem = file_path.file_stem()?.to_str()?;
    Some(stem.to_string())
}

fn read_record(file_path: &Path, slug: &str, defaults: &FieldDefaults) -> io::Result<ContentRecord> {
    let raw = fs::read_to_string(file_path)?;
    parse_record(slug, &raw, defaults)
}

// Slugs come straight from URL path segments
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != ".." && !slug.contains('/') && !slug.contains('\\')
}
