pub mod division;
pub mod page;
pub mod placements;

pub use division::{DivisionFacets, decode_division};
pub use page::{ParsedResult, parse_page};
pub use placements::{RawPlacementRow, extract_placements};

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Replaces every tag with a newline so adjacent cell contents never run
/// together, then leaves the caller to split into lines.
pub fn strip_tags(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "\n").into_owned()
}

/// The source pages only ever use these two entities in headings.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&").replace("&nbsp;", " ")
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flattens a markup fragment into trimmed, non-empty text lines.
pub fn text_lines(fragment: &str) -> Vec<String> {
    strip_tags(fragment)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            text_lines("<ul><li>1st</li><li>John</li></ul>"),
            vec!["1st", "John"]
        );
    }

    #[test]
    fn test_strip_tags_tolerates_unclosed_markup() {
        assert_eq!(text_lines("<li>1st<li>John"), vec!["1st", "John"]);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("Smith &amp; Sons&nbsp;Academy"),
            "Smith & Sons Academy"
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Male \n Black\t Adult "), "Male Black Adult");
    }
}
