use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use storage::models::NewTournamentResult;
use utoipa::ToSchema;

use crate::parse::division::decode_division;
use crate::parse::placements::extract_placements;
use crate::parse::{collapse_whitespace, decode_entities, strip_tags};

/// Division headings on the source pages.
static HEADING_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h4[^>]*>").expect("valid regex"));
static HEADING_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h4>").expect("valid regex"));

const NOGI_MARKER: &str = "no-gi";

/// One placement enriched with decoded division facets, ready for preview
/// output or conversion into a storable row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParsedResult {
    /// Division label, including the `[GI] `/`[NOGI] ` prefix when the
    /// tournament spans multiple source pages.
    pub division: String,
    pub gender: Option<String>,
    pub belt_rank: Option<String>,
    pub age_category: Option<String>,
    pub weight_class: Option<String>,
    pub placement: i16,
    pub competitor_name: String,
    pub academy: Option<String>,
    pub country_code: Option<String>,
}

impl ParsedResult {
    pub fn into_new_result(self) -> NewTournamentResult {
        NewTournamentResult {
            division: self.division,
            gender: self.gender,
            belt_rank: self.belt_rank,
            age_category: self.age_category,
            weight_class: self.weight_class,
            placement: self.placement,
            competitor_name: self.competitor_name,
            academy: self.academy,
            country_code: self.country_code,
        }
    }
}

/// Parses one full results page. `multi_page` marks tournaments with more
/// than one source page; their divisions get a `[GI] `/`[NOGI] ` prefix so
/// the two sub-events never collide after merging.
pub fn parse_page(html: &str, multi_page: bool) -> Vec<ParsedResult> {
    let prefix = if multi_page {
        if html.to_lowercase().contains(NOGI_MARKER) {
            "[NOGI] "
        } else {
            "[GI] "
        }
    } else {
        ""
    };

    let mut results = Vec::new();

    // Everything before the first heading is page chrome.
    for section in HEADING_OPEN_RE.split(html).skip(1) {
        let (heading, body) = match HEADING_CLOSE_RE.find(section) {
            Some(m) => (&section[..m.start()], &section[m.end()..]),
            // Unclosed heading: the whole section collapses into the label,
            // which yields no placement rows but cannot crash the page.
            None => (section, ""),
        };

        let label = collapse_whitespace(&decode_entities(&strip_tags(heading)));
        if label.is_empty() {
            continue;
        }

        let division = format!("{}{}", prefix, label);
        let facets = decode_division(&label);

        for raw in extract_placements(body) {
            results.push(ParsedResult {
                division: division.clone(),
                gender: facets.gender.clone(),
                belt_rank: facets.belt_rank.clone(),
                age_category: Some(facets.age_category.clone()),
                weight_class: facets.weight_class.clone(),
                placement: raw.placement_rank,
                competitor_name: raw.competitor_name,
                academy: blank_to_none(raw.academy),
                country_code: blank_to_none(raw.country_code),
            });
        }
    }

    results
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><div class="intro">Spring Open results</div>
        <h4>Male Black Adult Heavy</h4>
        <ul><li>1st</li><li>John Smith</li><li>Academy X</li><li>USA</li>
        <li>2nd</li><li>Taro Yamada</li><li>Academy Y</li><li>JPN</li></ul>
        <h4 class="division">Female &amp; Open&nbsp;Brown Adult Light</h4>
        <ul><li>1st</li><li>Maria Souza</li><li>Academy Z</li><li>BRA</li></ul>
        </body></html>
    "#;

    #[test]
    fn test_multiple_divisions_on_one_page() {
        let results = parse_page(PAGE, false);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].division, "Male Black Adult Heavy");
        assert_eq!(results[0].placement, 1);
        assert_eq!(results[1].placement, 2);
        assert_eq!(results[2].division, "Female & Open Brown Adult Light");
        assert_eq!(results[2].competitor_name, "Maria Souza");
    }

    #[test]
    fn test_facets_attached() {
        let results = parse_page(PAGE, false);

        assert_eq!(results[0].gender.as_deref(), Some("male"));
        assert_eq!(results[0].belt_rank.as_deref(), Some("black"));
        assert_eq!(results[0].age_category.as_deref(), Some("adult"));
        assert_eq!(results[0].weight_class.as_deref(), Some("heavy"));
    }

    #[test]
    fn test_gi_prefix_for_multi_page_tournaments() {
        let results = parse_page(PAGE, true);
        assert_eq!(results[0].division, "[GI] Male Black Adult Heavy");

        let nogi_page = format!("{} No-Gi sub event", PAGE);
        let results = parse_page(&nogi_page, true);
        assert_eq!(results[0].division, "[NOGI] Male Black Adult Heavy");
        // Facets are decoded from the unprefixed label.
        assert_eq!(results[0].belt_rank.as_deref(), Some("black"));
    }

    #[test]
    fn test_content_before_first_heading_is_discarded() {
        let html = "<li>1st</li><li>Ghost</li><li>Academy</li><li>USA</li>\
                    <h4>Male Black Adult Heavy</h4>\
                    <li>1st</li><li>Real</li><li>Academy</li><li>USA</li>";
        let results = parse_page(html, false);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].competitor_name, "Real");
    }

    #[test]
    fn test_empty_heading_section_is_skipped() {
        let html = "<h4>  </h4><li>1st</li><li>A</li><li>B</li><li>USA</li>";
        assert!(parse_page(html, false).is_empty());
    }

    #[test]
    fn test_unclosed_heading_does_not_crash() {
        let html = "<h4>Male Black Adult Heavy <li>1st</li>";
        assert!(parse_page(html, false).is_empty());
    }

    #[test]
    fn test_blank_fields_become_none() {
        assert_eq!(blank_to_none("  ".to_string()), None);
        assert_eq!(blank_to_none("USA".to_string()).as_deref(), Some("USA"));
    }
}
