use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::ranking::{GiNogi, RankingEntry, RankingFilter, RankingType, ScoredResultRow};
use crate::error::Result;
use crate::models::normalized_key;
use crate::repository::result::ResultRepository;
use crate::services::scoring::placement_points;

/// Bucket names for rows without an academy or country.
const INDEPENDENT_BUCKET: &str = "Independent";
const UNKNOWN_COUNTRY_BUCKET: &str = "Unknown";

/// Fetches filtered rows and folds them into the requested leaderboard.
pub async fn get_rankings(pool: &PgPool, filter: &RankingFilter) -> Result<Vec<RankingEntry>> {
    let repo = ResultRepository::new(pool);
    let rows = repo.fetch_scored(filter).await?;

    let gi_nogi = filter
        .gi_nogi()
        .map_err(crate::error::StorageError::ConstraintViolation)?;

    Ok(aggregate(&rows, filter.ranking_type, gi_nogi, filter.limit))
}

struct GroupAccumulator {
    entry: RankingEntry,
    tournaments: HashSet<Uuid>,
}

/// Groups rows by the ranking subject, sums star-weighted points, and sorts
/// with the three-level tie-break: points, then golds, then silvers, all
/// descending. The sort is stable, so equal inputs order deterministically.
pub fn aggregate(
    rows: &[ScoredResultRow],
    ranking_type: RankingType,
    gi_nogi: Option<GiNogi>,
    limit: usize,
) -> Vec<RankingEntry> {
    let mut groups: Vec<GroupAccumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        if let Some(filter) = gi_nogi
            && !filter.matches(&row.division)
        {
            continue;
        }

        let (key, display) = group_key(row, ranking_type);

        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupAccumulator {
                entry: new_entry(display, row, ranking_type),
                tournaments: HashSet::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.entry.total_points += placement_points(row.placement, row.prestige_rating);
        match row.placement {
            1 => group.entry.gold_count += 1,
            2 => group.entry.silver_count += 1,
            3 => group.entry.bronze_count += 1,
            _ => {}
        }
        group.entry.results_count += 1;
        group.tournaments.insert(row.tournament_id);
    }

    let mut entries: Vec<RankingEntry> = groups
        .into_iter()
        .map(|mut group| {
            group.entry.events_competed = group.tournaments.len();
            group.entry
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.gold_count.cmp(&a.gold_count))
            .then(b.silver_count.cmp(&a.silver_count))
    });
    entries.truncate(limit);

    entries
}

fn group_key(row: &ScoredResultRow, ranking_type: RankingType) -> (String, String) {
    match ranking_type {
        RankingType::Individual => (
            normalized_key(&row.competitor_name),
            row.competitor_name.clone(),
        ),
        RankingType::Team => {
            let academy = row
                .academy
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or(INDEPENDENT_BUCKET);
            (normalized_key(academy), academy.to_string())
        }
        RankingType::Country => {
            // Country codes group on the raw value; blanks get their own bucket.
            let country = row
                .country_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNKNOWN_COUNTRY_BUCKET);
            (country.to_string(), country.to_string())
        }
    }
}

fn new_entry(subject_name: String, row: &ScoredResultRow, ranking_type: RankingType) -> RankingEntry {
    let (academy, country_code) = match ranking_type {
        RankingType::Individual => (row.academy.clone(), row.country_code.clone()),
        RankingType::Team => (None, row.country_code.clone()),
        RankingType::Country => (None, None),
    };
    RankingEntry {
        subject_name,
        academy,
        country_code,
        total_points: 0,
        gold_count: 0,
        silver_count: 0,
        bronze_count: 0,
        events_competed: 0,
        results_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        tournament: u128,
        division: &str,
        placement: i16,
        name: &str,
        academy: &str,
        country: &str,
        stars: Option<i32>,
    ) -> ScoredResultRow {
        ScoredResultRow {
            tournament_id: Uuid::from_u128(tournament),
            division: division.to_string(),
            gender: Some("male".to_string()),
            belt_rank: Some("black".to_string()),
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
            prestige_rating: stars,
        }
    }

    #[test]
    fn test_name_variants_group_together() {
        let rows = vec![
            row(1, "Male Black Adult Heavy", 1, "John Smith", "X", "USA", Some(3)),
            row(2, "Male Black Adult Heavy", 2, " john   smith ", "X", "USA", Some(3)),
        ];
        let entries = aggregate(&rows, RankingType::Individual, None, 50);

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.subject_name, "John Smith");
        assert_eq!(entry.total_points, 45 + 21);
        assert_eq!(entry.gold_count, 1);
        assert_eq!(entry.silver_count, 1);
        assert_eq!(entry.events_competed, 2);
        assert_eq!(entry.results_count, 2);
    }

    #[test]
    fn test_tie_break_by_gold_then_silver() {
        // All three land on 45 points with different medal mixes.
        let rows = vec![
            row(1, "d", 1, "A", "", "", Some(3)), // 45, 1 gold
            row(1, "d", 2, "B", "", "", Some(3)), // 21
            row(2, "d", 2, "B", "", "", Some(3)), // 21
            row(3, "d", 3, "B", "", "", Some(1)), // 3 -> 45, 2 silver
            row(1, "d", 3, "C", "", "", Some(5)), // 15
            row(2, "d", 3, "C", "", "", Some(5)), // 15
            row(3, "d", 3, "C", "", "", Some(5)), // 15 -> 45, 3 bronze
        ];
        let entries = aggregate(&rows, RankingType::Individual, None, 50);

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.total_points == 45));
        assert_eq!(entries[0].subject_name, "A"); // 1 gold
        assert_eq!(entries[1].subject_name, "B"); // 0 gold, 2 silver
        assert_eq!(entries[2].subject_name, "C"); // 0 gold, 0 silver
    }

    #[test]
    fn test_gi_nogi_prefix_filter() {
        let rows = vec![
            row(1, "[GI] Male Black Adult Heavy", 1, "A", "", "", Some(3)),
            row(1, "[NOGI] Male Black Adult Heavy", 1, "B", "", "", Some(3)),
            row(1, "Male Black Adult Heavy", 1, "C", "", "", Some(3)),
        ];

        let nogi = aggregate(&rows, RankingType::Individual, Some(GiNogi::NoGi), 50);
        assert_eq!(nogi.len(), 1);
        assert_eq!(nogi[0].subject_name, "B");

        let gi = aggregate(&rows, RankingType::Individual, Some(GiNogi::Gi), 50);
        let names: Vec<_> = gi.iter().map(|e| e.subject_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let both = aggregate(&rows, RankingType::Individual, None, 50);
        assert_eq!(both.len(), 3);
    }

    #[test]
    fn test_blank_academy_becomes_independent() {
        let rows = vec![
            row(1, "d", 1, "A", "", "USA", Some(3)),
            row(1, "d", 2, "B", "  ", "USA", Some(3)),
        ];
        let entries = aggregate(&rows, RankingType::Team, None, 50);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject_name, "Independent");
        assert_eq!(entries[0].total_points, 45 + 21);
    }

    #[test]
    fn test_blank_country_becomes_unknown() {
        let rows = vec![row(1, "d", 1, "A", "X", "", Some(3))];
        let entries = aggregate(&rows, RankingType::Country, None, 50);

        assert_eq!(entries[0].subject_name, "Unknown");
    }

    #[test]
    fn test_single_tournament_scenario() {
        let rows = vec![
            row(1, "Male Black Adult Heavy", 1, "A", "AcademyX", "USA", Some(3)),
            row(1, "Male Black Adult Heavy", 2, "B", "AcademyX", "JPN", Some(3)),
        ];

        let individual = aggregate(&rows, RankingType::Individual, None, 50);
        assert_eq!(individual[0].subject_name, "A");
        assert_eq!(individual[0].total_points, 45);
        assert_eq!(individual[0].gold_count, 1);

        let teams = aggregate(&rows, RankingType::Team, None, 50);
        assert_eq!(teams[0].subject_name, "AcademyX");
        assert_eq!(teams[0].total_points, 66);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let rows = vec![
            row(1, "d", 3, "Low", "", "", Some(1)),
            row(1, "d", 1, "High", "", "", Some(5)),
        ];
        let entries = aggregate(&rows, RankingType::Individual, None, 1);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject_name, "High");
    }
}
