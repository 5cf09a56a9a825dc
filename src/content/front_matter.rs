use std::io;
use std::io::ErrorKind;

use serde::Deserialize;

use crate::content::ContentRecord;
use crate::text_utils::parse_publish_date;

/// Keys recognized in a front-matter block. Everything is optional;
/// defaults are substituted once, when the record is built.
///
/// Example of a content file
/// ```markdown
/// ---
/// title: "Fix USB device not recognized"
/// description: "What to do when the drive disappears"
/// date: "2024-03-18"
/// author: "sofia"
/// category: "Hardware"
/// tags: ["usb", "windows"]
/// ---
/// When a USB device stops responding, start with the cable.
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Per-collection fallback values for missing front-matter keys.
#[derive(Debug, Clone)]
pub struct FieldDefaults {
    pub author: String,
    pub category: String,
}

/// Splits a raw file into its front-matter block and body.
///
/// A block is recognized only when the very first line is `---` and a later
/// line is `---` again. No opening delimiter means the whole file is body.
/// An opening delimiter that is never closed is malformed.
pub fn split_front_matter(raw: &str) -> io::Result<(Option<&str>, &str)> {
    if !is_delimiter(first_line(raw)) {
        return Ok((None, raw));
    }

    let block_start = match raw.find('\n') {
        Some(pos) => pos + 1,
        None => return Err(unclosed_block()),
    };

    let mut offset = block_start;
    for line in raw[block_start..].split_inclusive('\n') {
        if is_delimiter(line) {
            let block = &raw[block_start..offset];
            let body = &raw[offset + line.len()..];
            return Ok((Some(block), body));
        }
        offset += line.len();
    }

    Err(unclosed_block())
}

/// Parses one front-matter block into its optional fields. An empty block
/// is valid and yields all-absent fields.
pub fn parse_front_matter(block: &str) -> io::Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    match serde_yaml::from_str::<FrontMatter>(block) {
        Ok(matter) => Ok(matter),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Invalid front matter: {}", e))),
    }
}

/// Builds a record from a file's raw text. The slug is the file's base
/// name and is never read from the front matter.
pub fn parse_record(slug: &str, raw: &str, defaults: &FieldDefaults) -> io::Result<ContentRecord> {
    let (block, body) = split_front_matter(raw)?;
    let matter = match block {
        Some(block) => parse_front_matter(block)?,
        None => FrontMatter::default(),
    };

    let date = matter.date.unwrap_or_default();
    let published = parse_publish_date(&date);

    Ok(ContentRecord {
        slug: slug.to_string(),
        title: matter.title.unwrap_or_default(),
        description: matter.description.unwrap_or_default(),
        date,
        published,
        author: matter.author.unwrap_or_else(|| defaults.author.clone()),
        category: matter.category.unwrap_or_else(|| defaults.category.clone()),
        tags: matter.tags.unwrap_or_default(),
        body: body.to_string(),
    })
}

fn first_line(raw: &str) -> &str {
    match raw.find('\n') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == "---"
}

fn unclosed_block() -> io::Error {
    io::Error::new(ErrorKind::InvalidData, "Front matter block is not closed")
}

#[cfg(test)]
mod tests {
    use crate::test_data::{POST_NO_FRONT_MATTER, POST_WITH_FRONT_MATTER};

    use super::*;

    fn test_defaults() -> FieldDefaults {
        FieldDefaults {
            author: "DevFixPro".to_string(),
            category: "General".to_string(),
        }
    }

    #[test]
    fn test_split_with_front_matter() {
        let (block, body) = split_front_matter(POST_WITH_FRONT_MATTER).unwrap();
        let block = block.unwrap();
        assert!(block.contains("title:"));
        assert!(!block.contains("USB device stops"));
        assert!(body.starts_with("When a USB device stops responding"));
        assert!(!body.contains("---"));
    }

    #[test]
    fn test_split_without_front_matter() {
        let (block, body) = split_front_matter(POST_NO_FRONT_MATTER).unwrap();
        assert!(block.is_none());
        assert_eq!(body, POST_NO_FRONT_MATTER);
    }

    #[test]
    fn test_split_delimiter_must_open_the_file() {
        let content = "Intro paragraph\n---\ntitle: \"Late\"\n---\n";
        let (block, body) = split_front_matter(content).unwrap();
        assert!(block.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_unclosed_block_is_malformed() {
        let content = "---\ntitle: \"No closing line\"\n\nBody text\n";
        assert!(split_front_matter(content).is_err());
        assert!(split_front_matter("---").is_err());
    }

    #[test]
    fn test_split_empty_block() {
        let (block, body) = split_front_matter("---\n---\nBody\n").unwrap();
        assert_eq!(block, Some(""));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_crlf_delimiters() {
        let content = "---\r\ntitle: \"Windows line endings\"\r\n---\r\nBody\r\n";
        let (block, body) = split_front_matter(content).unwrap();
        assert_eq!(block, Some("title: \"Windows line endings\"\r\n"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_parse_front_matter_fields() {
        let matter = parse_front_matter(
            "title: \"A title\"\ndate: \"2024-03-18\"\ntags: [\"usb\", \"windows\"]\n").unwrap();
        assert_eq!(matter.title.as_deref(), Some("A title"));
        assert_eq!(matter.date.as_deref(), Some("2024-03-18"));
        assert_eq!(matter.tags, Some(vec!["usb".to_string(), "windows".to_string()]));
        assert!(matter.author.is_none());
    }

    #[test]
    fn test_parse_front_matter_block_style_tags() {
        let matter = parse_front_matter("tags:\n  - usb\n  - windows\n").unwrap();
        assert_eq!(matter.tags, Some(vec!["usb".to_string(), "windows".to_string()]));
    }

    #[test]
    fn test_parse_front_matter_unknown_keys_are_ignored() {
        let matter = parse_front_matter("title: \"T\"\nlayout: wide\n").unwrap();
        assert_eq!(matter.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_parse_front_matter_malformed_yaml() {
        assert!(parse_front_matter("title: [unclosed\n").is_err());
    }

    #[test]
    fn test_parse_record_with_all_fields() {
        let record = parse_record("fix-usb-device", POST_WITH_FRONT_MATTER, &test_defaults()).unwrap();
        assert_eq!(record.slug, "fix-usb-device");
        assert_eq!(record.title, "Fix USB device not recognized");
        assert_eq!(record.author, "sofia");
        assert_eq!(record.category, "Hardware");
        assert_eq!(record.tags, ["usb", "windows"]);
        assert!(record.published.is_some());
        assert!(record.body.starts_with("When a USB device stops responding"));
    }

    #[test]
    fn test_parse_record_defaults() {
        let record = parse_record("bare", POST_NO_FRONT_MATTER, &test_defaults()).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.description, "");
        assert_eq!(record.date, "");
        assert_eq!(record.published, None);
        assert_eq!(record.author, "DevFixPro");
        assert_eq!(record.category, "General");
        assert!(record.tags.is_empty());
        assert_eq!(record.body, POST_NO_FRONT_MATTER);
    }

    #[test]
    fn test_parse_record_partial_front_matter() {
        let content = "---\ntitle: \"Only a title\"\n---\nBody\n";
        let record = parse_record("partial", content, &test_defaults()).unwrap();
        assert_eq!(record.title, "Only a title");
        assert_eq!(record.author, "DevFixPro");
        assert_eq!(record.category, "General");
        assert_eq!(record.body, "Body\n");
    }

    #[test]
    fn test_parse_record_invalid_date_kept_raw() {
        let content = "---\ndate: \"next tuesday\"\n---\nBody\n";
        let record = parse_record("undated", content, &test_defaults()).unwrap();
        assert_eq!(record.date, "next tuesday");
        assert_eq!(record.published, None);
    }
}
