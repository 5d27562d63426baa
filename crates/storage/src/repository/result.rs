use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::competitor::CompetitorResultRow;
use crate::dto::ranking::{RankingFilter, ScoredResultRow};
use crate::error::{Result, StorageError};
use crate::models::NewTournamentResult;

/// Repository for tournament result rows.
pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Atomically replaces the tournament's entire result set: delete plus
    /// bulk insert inside one transaction. Either the whole replacement
    /// commits or the prior rows stay untouched. Replaying the same batch
    /// leaves the stored state unchanged from a reader's point of view.
    pub async fn replace_for_tournament(
        &self,
        tournament_id: Uuid,
        rows: &[NewTournamentResult],
    ) -> Result<u64> {
        for row in rows {
            row.validate().map_err(StorageError::ConstraintViolation)?;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tournament_results WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        if !rows.is_empty() {
            let mut query = QueryBuilder::new(
                "INSERT INTO tournament_results \
                 (tournament_id, division, gender, belt_rank, age_category, weight_class, \
                  placement, competitor_name, academy, country_code) ",
            );
            query.push_values(rows, |mut b, row| {
                b.push_bind(tournament_id)
                    .push_bind(&row.division)
                    .push_bind(&row.gender)
                    .push_bind(&row.belt_rank)
                    .push_bind(&row.age_category)
                    .push_bind(&row.weight_class)
                    .push_bind(row.placement)
                    .push_bind(&row.competitor_name)
                    .push_bind(&row.academy)
                    .push_bind(&row.country_code);
            });
            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, tournament_id))?;
        }

        tx.commit().await?;

        Ok(rows.len() as u64)
    }

    /// Fetches result rows joined with their tournament's star rating,
    /// applying the plain equality filters in SQL. The gi/no-gi prefix
    /// filter is applied by the aggregation service, not here.
    ///
    /// Ordered by insertion sequence so grouping sees rows in a stable,
    /// deterministic order.
    pub async fn fetch_scored(&self, filter: &RankingFilter) -> Result<Vec<ScoredResultRow>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT r.tournament_id, r.division, r.gender, r.belt_rank, r.placement,
                   r.competitor_name, r.academy, r.country_code, t.prestige_rating
            FROM tournament_results r
            INNER JOIN tournaments t ON t.tournament_id = r.tournament_id
            WHERE 1=1
            "#,
        );

        if let Some(ref belt) = filter.belt {
            query.push(" AND r.belt_rank = ");
            query.push_bind(belt);
        }

        if let Some(ref gender) = filter.gender {
            query.push(" AND r.gender = ");
            query.push_bind(gender);
        }

        if let Some(tournament_id) = filter.tournament_id {
            query.push(" AND r.tournament_id = ");
            query.push_bind(tournament_id);
        }

        query.push(" ORDER BY r.seq");

        let rows = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows)
    }

    /// All rows for one competitor, matched case-insensitively on the
    /// trimmed name, newest tournament first.
    pub async fn fetch_by_competitor(&self, name: &str) -> Result<Vec<CompetitorResultRow>> {
        let rows = sqlx::query_as::<_, CompetitorResultRow>(
            r#"
            SELECT r.tournament_id, t.name AS tournament_name, t.event_date,
                   r.division, r.placement, r.competitor_name, r.academy,
                   r.country_code, t.prestige_rating
            FROM tournament_results r
            INNER JOIN tournaments t ON t.tournament_id = r.tournament_id
            WHERE LOWER(TRIM(r.competitor_name)) = LOWER(TRIM($1))
            ORDER BY t.event_date DESC NULLS LAST, r.seq
            "#,
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// A foreign-key violation on insert means the tournament row disappeared
/// between lookup and replacement; surface that as a constraint violation
/// rather than an opaque database error.
fn map_insert_error(e: sqlx::Error, tournament_id: Uuid) -> StorageError {
    let err = StorageError::from(e);
    if err.is_foreign_key_violation() {
        StorageError::ConstraintViolation(format!("tournament {tournament_id} does not exist"))
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_fk_insert_errors_pass_through() {
        let tournament_id = Uuid::nil();
        let mapped = map_insert_error(sqlx::Error::RowNotFound, tournament_id);
        assert!(matches!(mapped, StorageError::Database(_)));
    }
}
