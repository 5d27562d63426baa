//! Offline seed format, an escape hatch for bootstrapping without live
//! scraping:
//!
//! ```text
//! SLUG: spring-open-2025
//!
//! ##### Male Black Adult Heavy
//! 1|John Smith|Academy X|USA
//! 2|Taro Yamada|Academy Y|JPN
//! ```
//!
//! Division labels round-trip through the same decoder used for live pages.

use crate::error::{ImporterError, Result};
use crate::parse::ParsedResult;
use crate::parse::division::decode_division;

const SLUG_PREFIX: &str = "SLUG:";
const DIVISION_PREFIX: &str = "#####";

#[derive(Debug)]
pub struct SeedFile {
    pub slug: String,
    pub results: Vec<ParsedResult>,
}

pub fn parse_seed(text: &str) -> Result<SeedFile> {
    let mut slug: Option<String> = None;
    // The current division is threaded explicitly through the scan rather
    // than living in ambient state.
    let mut current_division: Option<String> = None;
    let mut results = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(SLUG_PREFIX) {
            slug = Some(rest.trim().to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix(DIVISION_PREFIX) {
            current_division = Some(rest.trim().to_string());
            continue;
        }

        let division = current_division.clone().ok_or_else(|| {
            ImporterError::SeedError(format!(
                "line {}: result row before any division heading",
                index + 1
            ))
        })?;

        results.push(parse_result_line(line, index + 1, division)?);
    }

    let slug = slug.ok_or_else(|| {
        ImporterError::SeedError(format!("missing '{}' header line", SLUG_PREFIX))
    })?;

    Ok(SeedFile { slug, results })
}

fn parse_result_line(line: &str, line_no: usize, division: String) -> Result<ParsedResult> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    let &[placement, name, academy, country] = parts.as_slice() else {
        return Err(ImporterError::SeedError(format!(
            "line {}: expected placement|name|academy|country",
            line_no
        )));
    };

    let placement: i16 = placement
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .map_err(|_| {
            ImporterError::SeedError(format!("line {}: invalid placement '{}'", line_no, placement))
        })?;

    let facets = decode_division(&division);

    Ok(ParsedResult {
        division,
        gender: facets.gender,
        belt_rank: facets.belt_rank,
        age_category: Some(facets.age_category),
        weight_class: facets.weight_class,
        placement,
        competitor_name: name.to_string(),
        academy: if academy.is_empty() {
            None
        } else {
            Some(academy.to_string())
        },
        country_code: if country.is_empty() {
            None
        } else {
            Some(country.to_string())
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "\
SLUG: spring-open-2025

##### Male Black Adult Heavy
1|John Smith|Academy X|USA
2|Taro Yamada|Academy Y|JPN

##### [NOGI] Female Brown Master 2 Light
1st|Maria Souza||BRA
";

    #[test]
    fn test_parses_header_and_blocks() {
        let seed = parse_seed(SEED).unwrap();

        assert_eq!(seed.slug, "spring-open-2025");
        assert_eq!(seed.results.len(), 3);
        assert_eq!(seed.results[0].division, "Male Black Adult Heavy");
        assert_eq!(seed.results[0].placement, 1);
        assert_eq!(seed.results[1].placement, 2);
        assert_eq!(seed.results[1].competitor_name, "Taro Yamada");
    }

    #[test]
    fn test_divisions_round_trip_through_decoder() {
        let seed = parse_seed(SEED).unwrap();

        assert_eq!(seed.results[0].belt_rank.as_deref(), Some("black"));
        assert_eq!(seed.results[0].weight_class.as_deref(), Some("heavy"));

        let nogi = &seed.results[2];
        assert_eq!(nogi.division, "[NOGI] Female Brown Master 2 Light");
        assert_eq!(nogi.gender.as_deref(), Some("female"));
        assert_eq!(nogi.age_category.as_deref(), Some("master_2"));
        assert_eq!(nogi.academy, None);
    }

    #[test]
    fn test_ordinal_placement_labels_accepted() {
        let seed = parse_seed(SEED).unwrap();
        assert_eq!(seed.results[2].placement, 1);
    }

    #[test]
    fn test_missing_slug_header() {
        let err = parse_seed("##### Male Black Adult Heavy\n1|A|B|USA\n").unwrap_err();
        assert!(matches!(err, ImporterError::SeedError(_)));
    }

    #[test]
    fn test_row_before_division_heading() {
        let err = parse_seed("SLUG: x\n1|A|B|USA\n").unwrap_err();
        assert!(matches!(err, ImporterError::SeedError(_)));
    }

    #[test]
    fn test_malformed_row() {
        let err = parse_seed("SLUG: x\n##### d\n1|only-two\n").unwrap_err();
        assert!(matches!(err, ImporterError::SeedError(_)));
    }
}
