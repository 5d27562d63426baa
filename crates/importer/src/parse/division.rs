//! Decodes free-text division labels such as "Male Black Adult Open Weight"
//! into structured facets. Pure and infallible: malformed labels produce
//! best-effort facets, never an error, so one bad heading cannot fail a page.

use tracing::warn;

pub const KNOWN_BELTS: [&str; 5] = ["white", "blue", "purple", "brown", "black"];

/// Default age category when the label carries none we recognize.
const DEFAULT_AGE: &str = "adult";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisionFacets {
    pub gender: Option<String>,
    pub belt_rank: Option<String>,
    pub age_category: String,
    pub weight_class: Option<String>,
}

pub fn decode_division(label: &str) -> DivisionFacets {
    let label = strip_event_prefix(label);
    let tokens: Vec<String> = label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let gender = tokens.first().cloned();
    let belt_rank = recover_belt(&tokens, label);

    let mut weight_start = 3;
    let age_category = match tokens.get(2).map(String::as_str) {
        Some("juvenile") => "juvenile".to_string(),
        Some("adult") => DEFAULT_AGE.to_string(),
        Some("master") => match tokens.get(3).filter(|t| is_numeric(t)) {
            Some(n) => {
                weight_start = 4;
                format!("master_{}", n)
            }
            None => "master".to_string(),
        },
        // Unrecognized token stays available to the weight class.
        _ => {
            weight_start = 2;
            DEFAULT_AGE.to_string()
        }
    };

    // Some pages put a stray age number ahead of the weight words.
    if tokens.get(weight_start).is_some_and(|t| is_numeric(t)) {
        weight_start += 1;
    }

    let weight_tokens = tokens.get(weight_start..).unwrap_or(&[]);
    let weight_class = if weight_tokens.is_empty() {
        None
    } else {
        Some(weight_tokens.join("_"))
    };

    DivisionFacets {
        gender,
        belt_rank,
        age_category,
        weight_class,
    }
}

pub fn strip_event_prefix(label: &str) -> &str {
    label
        .strip_prefix("[GI] ")
        .or_else(|| label.strip_prefix("[NOGI] "))
        .unwrap_or(label)
}

/// Token 1 is the expected belt position; some source pages reorder age and
/// belt, so when it does not match we scan the whole label and log the
/// fallback to keep source-layout regressions visible.
fn recover_belt(tokens: &[String], label: &str) -> Option<String> {
    if let Some(candidate) = tokens.get(1)
        && is_known_belt(candidate)
    {
        return Some(candidate.clone());
    }

    let scanned = tokens.iter().find(|t| is_known_belt(t)).cloned();
    if scanned.is_some() {
        warn!(label, "belt recovered by scanning out-of-position label");
    }
    scanned
}

fn is_known_belt(token: &str) -> bool {
    KNOWN_BELTS.contains(&token)
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
