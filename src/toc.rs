use lazy_static::lazy_static;
use regex::Regex;

/// One heading reference for in-page navigation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TocEntry {
    /// Heading text, trimmed but otherwise verbatim. Inline markdown such
    /// as `code` or **bold** markers is kept as written.
    pub text: String,
    /// Anchor slug derived from the text. Two headings with the same text
    /// produce the same id.
    pub id: String,
    /// 2 or 3. Level-1 and level-4+ headings are never emitted.
    pub level: u8,
}

/// Scans a markdown body for ATX headings of level 2 and 3 and returns
/// them in document order. Setext underline headings are not recognized.
/// Any input yields a sequence; this never fails.
pub fn extract_toc(body: &str) -> Vec<TocEntry> {
    lazy_static! {
        static ref HEADING_REGEX: Regex = Regex::new(
            r"^(?P<marks>#{2,3})\s+(?P<text>.+)$"
        ).unwrap();
    }

    let mut entries = vec![];
    for line in body.lines() {
        let caps = match HEADING_REGEX.captures(line) {
            None => continue,
            Some(caps) => caps,
        };

        let level = caps["marks"].len() as u8;
        let text = caps["text"].trim();
        if text.is_empty() {
            continue;
        }

        entries.push(TocEntry {
            text: text.to_string(),
            id: slugify(text),
            level,
        });
    }

    entries
}

/// Lower-cases the text, strips every character outside word chars,
/// whitespace and hyphens, then collapses whitespace runs into single
/// hyphens. Existing hyphens pass through untouched.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    }

    let lowered = text.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&cleaned, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, id: &str, level: u8) -> TocEntry {
        TocEntry {
            text: text.to_string(),
            id: id.to_string(),
            level,
        }
    }

    #[test]
    fn test_extract_levels_two_and_three() {
        let toc = extract_toc("## Alpha\ntext\n### Beta\n");
        assert_eq!(toc, [entry("Alpha", "alpha", 2), entry("Beta", "beta", 3)]);
    }

    #[test]
    fn test_level_filter() {
        let toc = extract_toc("# Title\n## Sub\n#### Deep\n##### Deeper\n");
        assert_eq!(toc, [entry("Sub", "sub", 2)]);
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_toc("").is_empty());
        assert!(extract_toc("plain paragraph\nno headings at all\n").is_empty());
    }

    #[test]
    fn test_only_excluded_levels() {
        assert!(extract_toc("# One\n#### Four\n").is_empty());
    }

    #[test]
    fn test_requires_space_after_marks() {
        assert!(extract_toc("##NoSpace\n").is_empty());
        let toc = extract_toc("##   Padded\n");
        assert_eq!(toc, [entry("Padded", "padded", 2)]);
    }

    #[test]
    fn test_document_order_preserved() {
        let toc = extract_toc("### First\n## Second\n### Third\n");
        let ids: Vec<&str> = toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
        assert_eq!(toc[0].level, 3);
        assert_eq!(toc[1].level, 2);
    }

    #[test]
    fn test_duplicate_headings_collide() {
        let toc = extract_toc("## Steps\ntext\n## Steps\n");
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].id, toc[1].id);
    }

    #[test]
    fn test_inline_markdown_kept_verbatim() {
        let toc = extract_toc("## Run `cargo build` **now**\n");
        assert_eq!(toc[0].text, "Run `cargo build` **now**");
    }

    #[test]
    fn test_setext_headings_not_recognized() {
        assert!(extract_toc("Heading\n-------\n").is_empty());
        assert!(extract_toc("Heading\n=======\n").is_empty());
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        let toc = extract_toc("## Hello, World! & More\n");
        let id = &toc[0].id;
        assert_eq!(id, "hello-world-more");
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("Re-seat the RAM"), "re-seat-the-ram");
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Step   by \t step"), "step-by-step");
    }
}
