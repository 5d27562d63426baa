use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RankingType {
    #[default]
    Individual,
    Team,
    Country,
}

impl RankingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
            Self::Country => "country",
        }
    }
}

/// Gi/no-gi filter, decided by the literal `[NOGI]` division prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiNogi {
    Gi,
    NoGi,
}

impl GiNogi {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "gi" => Ok(Self::Gi),
            "no-gi" | "nogi" => Ok(Self::NoGi),
            other => Err(format!("gi_nogi must be 'gi' or 'no-gi', got '{}'", other)),
        }
    }

    /// The prefix check is case-sensitive: only the importer ever writes it,
    /// always in this exact form.
    pub fn matches(&self, division: &str) -> bool {
        let nogi = division.starts_with("[NOGI]");
        match self {
            Self::Gi => !nogi,
            Self::NoGi => nogi,
        }
    }
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RankingFilter {
    #[serde(rename = "type", default)]
    pub ranking_type: RankingType,
    pub belt: Option<String>,
    pub gi_nogi: Option<String>,
    pub gender: Option<String>,
    pub tournament_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl RankingFilter {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > 500 {
            return Err("limit must be between 1 and 500".to_string());
        }
        self.gi_nogi()?;
        Ok(())
    }

    pub fn gi_nogi(&self) -> Result<Option<GiNogi>, String> {
        self.gi_nogi.as_deref().map(GiNogi::parse).transpose()
    }
}

impl Default for RankingFilter {
    fn default() -> Self {
        Self {
            ranking_type: RankingType::default(),
            belt: None,
            gi_nogi: None,
            gender: None,
            tournament_id: None,
            limit: default_limit(),
        }
    }
}

/// One stored result row joined with its tournament's star rating, the unit
/// the ranking aggregation works over.
#[derive(Debug, Clone, FromRow)]
pub struct ScoredResultRow {
    pub tournament_id: Uuid,
    pub division: String,
    pub gender: Option<String>,
    pub belt_rank: Option<String>,
    pub placement: i16,
    pub competitor_name: String,
    pub academy: Option<String>,
    pub country_code: Option<String>,
    pub prestige_rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingEntry {
    /// Competitor name, academy name, or country code depending on the
    /// ranking type. Casing comes from the first row seen in the group.
    pub subject_name: String,
    pub academy: Option<String>,
    pub country_code: Option<String>,
    pub total_points: i64,
    pub gold_count: u32,
    pub silver_count: u32,
    pub bronze_count: u32,
    pub events_competed: usize,
    pub results_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingMeta {
    #[serde(rename = "type")]
    pub ranking_type: String,
    pub formula_description: String,
    pub filters_applied: FiltersApplied,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FiltersApplied {
    pub belt: Option<String>,
    pub gi_nogi: Option<String>,
    pub gender: Option<String>,
    pub tournament_id: Option<Uuid>,
    pub limit: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingResponse {
    pub rankings: Vec<RankingEntry>,
    pub meta: RankingMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gi_nogi_parse() {
        assert_eq!(GiNogi::parse("gi").unwrap(), GiNogi::Gi);
        assert_eq!(GiNogi::parse("no-gi").unwrap(), GiNogi::NoGi);
        assert_eq!(GiNogi::parse("nogi").unwrap(), GiNogi::NoGi);
        assert!(GiNogi::parse("both").is_err());
    }

    #[test]
    fn test_prefix_predicate_is_case_sensitive() {
        assert!(GiNogi::NoGi.matches("[NOGI] Male Black Adult Heavy"));
        assert!(!GiNogi::NoGi.matches("[nogi] Male Black Adult Heavy"));
        assert!(GiNogi::Gi.matches("[GI] Male Black Adult Heavy"));
        assert!(GiNogi::Gi.matches("Male Black Adult Heavy"));
        assert!(!GiNogi::Gi.matches("[NOGI] Male Black Adult Heavy"));
    }

    #[test]
    fn test_limit_bounds() {
        let mut filter = RankingFilter::default();
        assert!(filter.validate().is_ok());
        filter.limit = 0;
        assert!(filter.validate().is_err());
        filter.limit = 501;
        assert!(filter.validate().is_err());
    }
}
