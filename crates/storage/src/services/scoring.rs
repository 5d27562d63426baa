/// Star-weighted placement scoring.
///
/// This intentionally approximates the federation's undocumented scoring: it
/// omits per-match bonus points and runs roughly 5-10% below official totals
/// while preserving relative ordering.
pub const GOLD_MULTIPLIER: i64 = 15;
pub const SILVER_MULTIPLIER: i64 = 7;
pub const BRONZE_MULTIPLIER: i64 = 3;

/// Stars assumed for tournaments without a prestige rating.
pub const DEFAULT_STARS: i64 = 3;

pub fn placement_points(placement: i16, stars: Option<i32>) -> i64 {
    let multiplier = match placement {
        1 => GOLD_MULTIPLIER,
        2 => SILVER_MULTIPLIER,
        3 => BRONZE_MULTIPLIER,
        _ => return 0,
    };
    multiplier * stars.map(i64::from).unwrap_or(DEFAULT_STARS)
}

pub fn formula_description() -> String {
    format!(
        "points = placement multiplier (gold {}, silver {}, bronze {}) x tournament stars \
         (default {}); approximation, excludes federation bonus points",
        GOLD_MULTIPLIER, SILVER_MULTIPLIER, BRONZE_MULTIPLIER, DEFAULT_STARS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rated_tournament() {
        assert_eq!(placement_points(1, Some(5)), 75);
        assert_eq!(placement_points(2, Some(5)), 35);
        assert_eq!(placement_points(3, Some(5)), 15);
    }

    #[test]
    fn test_unrated_defaults_to_three_stars() {
        assert_eq!(placement_points(1, None), 45);
        assert_eq!(placement_points(2, None), 21);
        assert_eq!(placement_points(3, None), 9);
    }

    #[test]
    fn test_placement_outside_podium_scores_zero() {
        assert_eq!(placement_points(4, Some(5)), 0);
        assert_eq!(placement_points(0, Some(5)), 0);
        assert_eq!(placement_points(-1, None), 0);
    }
}
