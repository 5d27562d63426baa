use crate::parse::text_lines;

/// Country tokens on the source pages are short codes; anything longer means
/// the 4-line window is mis-aligned markup noise, not a record. A layout
/// artifact, not a validation rule, hence a tunable constant.
pub const MAX_COUNTRY_LEN: usize = 5;

const PLACEMENT_LABELS: [&str; 3] = ["1st", "2nd", "3rd"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlacementRow {
    pub placement_label: String,
    pub placement_rank: i16,
    pub competitor_name: String,
    pub academy: String,
    pub country_code: String,
}

/// Extracts ordered placement rows from the markup fragment following one
/// division heading.
pub fn extract_placements(fragment: &str) -> Vec<RawPlacementRow> {
    extract_from_lines(&text_lines(fragment))
}

/// Resynchronizing scan over the flattened lines: a valid record consumes
/// four lines, anything else consumes one. Tolerates arbitrary noise between
/// records and short trailing input.
pub fn extract_from_lines(lines: &[String]) -> Vec<RawPlacementRow> {
    let mut rows = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        match take_record(lines, cursor) {
            Some(row) => {
                rows.push(row);
                cursor += 4;
            }
            None => cursor += 1,
        }
    }

    rows
}

/// The single step of the scan: accepts the 4-line window at `at` only when
/// it starts with an exact placement label, all three follow-up lines exist,
/// and the country token is short enough to be genuine.
fn take_record(lines: &[String], at: usize) -> Option<RawPlacementRow> {
    let label = lines.get(at)?;
    if !PLACEMENT_LABELS.contains(&label.as_str()) {
        return None;
    }

    let competitor_name = lines.get(at + 1)?;
    let academy = lines.get(at + 2)?;
    let country_code = lines.get(at + 3)?;

    if country_code.chars().count() > MAX_COUNTRY_LEN {
        return None;
    }

    Some(RawPlacementRow {
        placement_label: label.clone(),
        placement_rank: rank_from_label(label),
        competitor_name: competitor_name.clone(),
        academy: academy.clone(),
        country_code: country_code.clone(),
    })
}

fn rank_from_label(label: &str) -> i16 {
    label
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
