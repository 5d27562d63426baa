use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use storage::models::NewTournamentResult;
use storage::repository::result::ResultRepository;
use tokio::time::sleep;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::client::FederationClient;
use crate::error::{ImporterError, Result};
use crate::parse::{ParsedResult, parse_page};

/// Pause between fetches against the federation host, success or not.
const FETCH_PAUSE: Duration = Duration::from_secs(1);

const UNKNOWN_BUCKET: &str = "unknown";

#[derive(Debug, Serialize, ToSchema)]
pub struct ScrapeSummary {
    pub total: usize,
    pub by_belt: BTreeMap<String, usize>,
    pub by_gender: BTreeMap<String, usize>,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub distinct_academies: usize,
    pub distinct_countries: usize,
}

impl ScrapeSummary {
    pub fn from_results(results: &[ParsedResult]) -> Self {
        let mut by_belt: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_gender: BTreeMap<String, usize> = BTreeMap::new();
        let (mut gold, mut silver, mut bronze) = (0, 0, 0);
        let mut academies: HashSet<&str> = HashSet::new();
        let mut countries: HashSet<&str> = HashSet::new();

        for result in results {
            let belt = result.belt_rank.as_deref().unwrap_or(UNKNOWN_BUCKET);
            *by_belt.entry(belt.to_string()).or_default() += 1;

            let gender = result.gender.as_deref().unwrap_or(UNKNOWN_BUCKET);
            *by_gender.entry(gender.to_string()).or_default() += 1;

            match result.placement {
                1 => gold += 1,
                2 => silver += 1,
                3 => bronze += 1,
                _ => {}
            }

            if let Some(academy) = result.academy.as_deref().map(str::trim)
                && !academy.is_empty()
            {
                academies.insert(academy);
            }
            if let Some(country) = result.country_code.as_deref().map(str::trim)
                && !country.is_empty()
            {
                countries.insert(country);
            }
        }

        Self {
            total: results.len(),
            by_belt,
            by_gender,
            gold,
            silver,
            bronze,
            distinct_academies: academies.len(),
            distinct_countries: countries.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScrapeOutcome {
    pub results: Vec<ParsedResult>,
    pub summary: ScrapeSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportOutcome {
    pub imported: u64,
    pub summary: ScrapeSummary,
}

/// Sequences fetches for one logical tournament across its source ids,
/// strictly one at a time to honor the rate-limit contract with the
/// federation host.
pub struct ScrapeOrchestrator {
    client: FederationClient,
}

impl ScrapeOrchestrator {
    pub fn new(client: FederationClient) -> Self {
        Self { client }
    }

    /// Fetches and parses every source page without writing anything.
    pub async fn preview(&self, source_ids: &[String]) -> ScrapeOutcome {
        let results = self.fetch_all(source_ids).await;
        let summary = ScrapeSummary::from_results(&results);

        ScrapeOutcome { results, summary }
    }

    /// Fetches, parses, and atomically replaces the tournament's stored
    /// result set. An empty parse is an error: silently wiping existing
    /// rows over a dead page is almost always a caller mistake.
    pub async fn import(
        &self,
        pool: &PgPool,
        tournament_id: Uuid,
        source_ids: &[String],
    ) -> Result<ImportOutcome> {
        let results = self.fetch_all(source_ids).await;
        if results.is_empty() {
            return Err(ImporterError::EmptyResultSet);
        }

        let summary = ScrapeSummary::from_results(&results);
        let rows: Vec<NewTournamentResult> = results
            .into_iter()
            .map(ParsedResult::into_new_result)
            .collect();

        let imported = ResultRepository::new(pool)
            .replace_for_tournament(tournament_id, &rows)
            .await?;

        info!(%tournament_id, imported, "replaced tournament results");

        Ok(ImportOutcome { imported, summary })
    }

    /// A failed fetch contributes zero rows and the scrape continues;
    /// partial success across sub-pages is acceptable.
    async fn fetch_all(&self, source_ids: &[String]) -> Vec<ParsedResult> {
        let multi_page = source_ids.len() > 1;
        let mut results = Vec::new();

        for (index, source_id) in source_ids.iter().enumerate() {
            match self.client.fetch_results_page(source_id).await {
                Ok(html) => {
                    let rows = parse_page(&html, multi_page);
                    info!(source_id, rows = rows.len(), "parsed source page");
                    results.extend(rows);
                }
                Err(e) => warn!(source_id, error = %e, "skipping source page"),
            }

            if index + 1 < source_ids.len() {
                sleep(FETCH_PAUSE).await;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        division: &str,
        belt: Option<&str>,
        gender: Option<&str>,
        placement: i16,
        academy: Option<&str>,
        country: Option<&str>,
    ) -> ParsedResult {
        ParsedResult {
            division: division.to_string(),
            gender: gender.map(str::to_string),
            belt_rank: belt.map(str::to_string),
            age_category: Some("adult".to_string()),
            weight_class: None,
            placement,
            competitor_name: "someone".to_string(),
            academy: academy.map(str::to_string),
            country_code: country.map(str::to_string),
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result("d1", Some("black"), Some("male"), 1, Some("X"), Some("USA")),
            result("d1", Some("black"), Some("male"), 2, Some("X"), Some("JPN")),
            result("d2", Some("brown"), Some("female"), 1, Some("Y"), Some("USA")),
            result("d2", None, None, 3, None, Some("  ")),
        ];
        let summary = ScrapeSummary::from_results(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.by_belt["black"], 2);
        assert_eq!(summary.by_belt["brown"], 1);
        assert_eq!(summary.by_belt["unknown"], 1);
        assert_eq!(summary.by_gender["male"], 2);
        assert_eq!(summary.by_gender["female"], 1);
        assert_eq!(summary.gold, 2);
        assert_eq!(summary.silver, 1);
        assert_eq!(summary.bronze, 1);
        assert_eq!(summary.distinct_academies, 2);
        assert_eq!(summary.distinct_countries, 2);
    }

    #[test]
    fn test_summary_of_empty_set() {
        let summary = ScrapeSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.by_belt.is_empty());
        assert_eq!(summary.distinct_academies, 0);
    }
}
