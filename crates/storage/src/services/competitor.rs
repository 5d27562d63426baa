use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::competitor::{CompetitorProfile, CompetitorResult, CompetitorResultRow};
use crate::error::{Result, StorageError};
use crate::repository::result::ResultRepository;
use crate::services::scoring::placement_points;

/// Builds a career profile for one competitor, matched case-insensitively
/// on the trimmed name. Zero matching rows is a NotFound.
pub async fn get_profile(pool: &PgPool, name: &str) -> Result<CompetitorProfile> {
    let repo = ResultRepository::new(pool);
    let rows = repo.fetch_by_competitor(name).await?;

    summarize(rows).ok_or(StorageError::NotFound)
}

/// Folds matched rows (already ordered newest tournament first) into the
/// profile. Returns None for an empty match.
pub fn summarize(rows: Vec<CompetitorResultRow>) -> Option<CompetitorProfile> {
    let first = rows.first()?;

    let mut profile = CompetitorProfile {
        competitor_name: first.competitor_name.clone(),
        total_points: 0,
        gold_count: 0,
        silver_count: 0,
        bronze_count: 0,
        tournaments_count: 0,
        academy: most_common(rows.iter().map(|r| r.academy.as_deref())),
        country_code: most_common(rows.iter().map(|r| r.country_code.as_deref())),
        results: Vec::with_capacity(rows.len()),
    };

    let mut tournaments = std::collections::HashSet::<Uuid>::new();

    for row in rows {
        let points = placement_points(row.placement, row.prestige_rating);
        profile.total_points += points;
        match row.placement {
            1 => profile.gold_count += 1,
            2 => profile.silver_count += 1,
            3 => profile.bronze_count += 1,
            _ => {}
        }
        tournaments.insert(row.tournament_id);
        profile.results.push(CompetitorResult {
            tournament_id: row.tournament_id,
            tournament_name: row.tournament_name,
            event_date: row.event_date,
            division: row.division,
            placement: row.placement,
            points,
        });
    }

    profile.tournaments_count = tournaments.len();

    Some(profile)
}

/// Most frequent non-blank value; ties keep the value encountered first.
fn most_common<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, value) in values.flatten().enumerate() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = counts.entry(value).or_insert((0, position));
        slot.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(value, _)| value.to_string())
}
