use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One podium placement for one competitor in one tournament.
///
/// The batch for a tournament is always replaced as a whole: the stored set
/// is exactly whatever the last successful import produced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TournamentResult {
    pub result_id: Uuid,
    pub tournament_id: Uuid,
    /// Full division label, including any `[GI] `/`[NOGI] ` prefix.
    pub division: String,
    pub gender: Option<String>,
    pub belt_rank: Option<String>,
    pub age_category: Option<String>,
    pub weight_class: Option<String>,
    pub placement: i16,
    pub competitor_name: String,
    pub academy: Option<String>,
    pub country_code: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// A result row ready to be inserted, before the database assigns ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewTournamentResult {
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

impl NewTournamentResult {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=3).contains(&self.placement) {
            return Err(format!("placement must be 1..=3, got {}", self.placement));
        }
        if self.division.trim().is_empty() {
            return Err("division must not be blank".to_string());
        }
        if self.competitor_name.trim().is_empty() {
            return Err("competitor_name must not be blank".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(placement: i16, division: &str, name: &str) -> NewTournamentResult {
        NewTournamentResult {
            division: division.to_string(),
            gender: None,
            belt_rank: None,
            age_category: None,
            weight_class: None,
            placement,
            competitor_name: name.to_string(),
            academy: None,
            country_code: None,
        }
    }

    #[test]
    fn test_valid_row() {
        assert!(row(1, "Male Black Adult Heavy", "A").validate().is_ok());
    }

    #[test]
    fn test_placement_out_of_range() {
        assert!(row(0, "Male Black Adult Heavy", "A").validate().is_err());
        assert!(row(4, "Male Black Adult Heavy", "A").validate().is_err());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(row(1, "  ", "A").validate().is_err());
        assert!(row(1, "Male Black Adult Heavy", "").validate().is_err());
    }
}
