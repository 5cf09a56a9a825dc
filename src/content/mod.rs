use fmt::Display;
use std::fmt;
use std::fmt::Formatter;

use chrono::NaiveDateTime;

pub mod front_matter;
pub mod store;

/// Author substituted when front matter carries no author key.
pub const DEFAULT_AUTHOR: &str = "DevFixPro";
/// Category substituted for posts without a category key.
pub const DEFAULT_POST_CATEGORY: &str = "General";
/// Category substituted for guides without a category key.
pub const DEFAULT_GUIDE_CATEGORY: &str = "Setup";

/// The two independent content sets served by the store. Posts are
/// troubleshooting articles, guides are setup walkthroughs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Collection {
    Posts,
    Guides,
}

/// One markdown-backed content item, front matter already folded in.
///
/// The slug always comes from the file name, never from front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Raw front-matter date value, kept for display.
    pub date: String,
    /// Parsed publish date. None when the date is absent or unparseable,
    /// and those records sort after every dated one.
    pub published: Option<NaiveDateTime>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Markdown body with the front-matter block stripped.
    pub body: String,
}

impl Display for ContentRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, category={}, tags={}\ntitle={}\ndescription={}\n\n{}",
               self.slug,
               self.date,
               self.author,
               self.category,
               self.tags.join(" "),
               self.title,
               self.description,
               self.body
        )
    }
}
