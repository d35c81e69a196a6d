use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Row counts the seed file must leave behind, per table.
const SEED_TABLES: &[SeedTableContract] = &[
    SeedTableContract { table: "teacher", expected_rows: 5 },
    SeedTableContract { table: "discipline", expected_rows: 7 },
    SeedTableContract { table: "teacher_discipline", expected_rows: 7 },
    SeedTableContract { table: "sport_section", expected_rows: 3 },
    SeedTableContract { table: "document", expected_rows: 3 },
    SeedTableContract { table: "campus_event", expected_rows: 3 },
    SeedTableContract { table: "dormitory", expected_rows: 2 },
    SeedTableContract { table: "navigation_point", expected_rows: 10 },
];

const SEED_SURNAMES: &[&str] = &["Иванова", "Петров", "Смирнова", "Кузнецов", "Орлова"];

/// Deterministic campus directory: five teachers with their disciplines, reference
/// listings, and a navigation card for every named location.
pub struct CampusSeedDataset;

impl CampusSeedDataset {
    pub const SQL: &str = include_str!("../../../config/fixtures/campus_seed.sql");

    /// Loads the seed file in one transaction. Safe to repeat.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let tables = SEED_TABLES
            .iter()
            .map(|contract| SeededTable { table: contract.table, rows: contract.expected_rows })
            .collect::<Vec<_>>();

        tracing::info!(
            event_name = "db.seed.loaded",
            tables = tables.len(),
            "campus seed dataset loaded"
        );
        Ok(SeedResult { tables })
    }

    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for contract in SEED_TABLES {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(1) FROM {}", contract.table))
                .fetch_one(pool)
                .await?;
            checks.push((contract.table, count >= contract.expected_rows));
        }

        for surname in SEED_SURNAMES {
            let exists: i64 =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teacher WHERE surname = ?1)")
                    .bind(surname)
                    .fetch_one(pool)
                    .await?;
            checks.push((*surname, exists == 1));
        }

        let orphans: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM teacher_discipline td
             LEFT JOIN teacher t ON t.id = td.teacher_id
             LEFT JOIN discipline d ON d.id = td.discipline_id
             WHERE t.id IS NULL OR d.id IS NULL",
        )
        .fetch_one(pool)
        .await?;
        checks.push(("teacher-discipline-links", orphans == 0));

        let all_present = checks.iter().all(|(_, ok)| *ok);
        Ok(VerificationResult { all_present, checks })
    }

    /// Removes every seeded row, links first.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;
        for contract in SEED_TABLES.iter().rev() {
            sqlx::query(&format!("DELETE FROM {}", contract.table)).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedTableContract {
    table: &'static str,
    expected_rows: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededTable {
    pub table: &'static str,
    pub rows: i64,
}

#[derive(Debug)]
pub struct SeedResult {
    pub tables: Vec<SeededTable>,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
