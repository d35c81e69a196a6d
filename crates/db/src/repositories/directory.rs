use std::collections::HashMap;

use async_trait::async_trait;
use campus_core::directory::CampusDirectory;
use campus_core::domain::directory::{
    CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherId,
    TeacherProfile,
};
use campus_core::errors::ApplicationError;
use sqlx::Row;

use super::RepositoryError;
use crate::DbPool;

/// Campus directory backed by the SQLite schema in `migrations/`.
///
/// SQLite's `lower()` only folds ASCII, so Cyrillic substring matching is done on
/// loaded rows rather than in SQL.
#[derive(Clone)]
pub struct SqlDirectoryRepository {
    pool: DbPool,
}

impl SqlDirectoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn load_teachers(&self) -> Result<Vec<TeacherProfile>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, surname, given_name, patronymic, position, room
             FROM teacher
             ORDER BY surname, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query_as::<_, (i64, String)>(
            "SELECT td.teacher_id, d.name
             FROM teacher_discipline td
             JOIN discipline d ON d.id = td.discipline_id
             ORDER BY td.teacher_id, d.name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut disciplines: HashMap<i64, Vec<String>> = HashMap::new();
        for (teacher_id, name) in links {
            disciplines.entry(teacher_id).or_default().push(name);
        }

        rows.iter()
            .map(|row| {
                let mut profile = row_to_teacher(row)?;
                profile.disciplines = disciplines.remove(&profile.id.0).unwrap_or_default();
                Ok(profile)
            })
            .collect()
    }

    pub async fn find_by_surname(
        &self,
        surname: &str,
    ) -> Result<Vec<TeacherProfile>, RepositoryError> {
        let needle = surname.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let teachers = self.load_teachers().await?;
        Ok(teachers
            .into_iter()
            .filter(|profile| profile.surname.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn find_by_discipline(
        &self,
        discipline: &str,
    ) -> Result<Vec<TeacherProfile>, RepositoryError> {
        let needle = discipline.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let teachers = self.load_teachers().await?;
        Ok(teachers
            .into_iter()
            .filter(|profile| {
                profile.disciplines.iter().any(|name| name.to_lowercase().contains(&needle))
            })
            .collect())
    }

    pub async fn load_sport_sections(&self) -> Result<Vec<SportSection>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>, Option<String>)>(
            "SELECT name, coach, location, schedule FROM sport_section ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, coach, location, schedule)| SportSection {
                name,
                coach,
                location,
                schedule,
            })
            .collect())
    }

    pub async fn load_documents(&self) -> Result<Vec<DocumentInfo>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
            "SELECT name, description, template_url FROM document ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, description, template_url)| DocumentInfo {
                name,
                description,
                template_url,
            })
            .collect())
    }

    /// Events with a known start come first, earliest first.
    pub async fn load_events(&self) -> Result<Vec<CampusEvent>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
            "SELECT title, starts_at, location
             FROM campus_event
             ORDER BY starts_at IS NULL, starts_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(title, starts_at, location)| CampusEvent { title, starts_at, location })
            .collect())
    }

    pub async fn load_dormitories(&self) -> Result<Vec<Dormitory>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>, Option<String>)>(
            "SELECT number, warden, address, phone FROM dormitory ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(number, warden, address, phone)| Dormitory { number, warden, address, phone })
            .collect())
    }

    pub async fn load_navigation_points(&self) -> Result<Vec<NavigationPoint>, RepositoryError> {
        let rows = sqlx::query_as::<
            _,
            (String, String, Option<String>, Option<String>, Option<String>, Option<String>),
        >(
            "SELECT tag, title, floor, room, hours, notes
             FROM navigation_point
             ORDER BY sort_order, tag",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(tag, title, floor, room, hours, notes)| NavigationPoint {
                tag,
                title,
                floor,
                room,
                hours,
                notes,
            })
            .collect())
    }
}

fn row_to_teacher(row: &sqlx::sqlite::SqliteRow) -> Result<TeacherProfile, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let surname: String =
        row.try_get("surname").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let given_name: String =
        row.try_get("given_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let patronymic: String =
        row.try_get("patronymic").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let position: Option<String> =
        row.try_get("position").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let room: Option<String> =
        row.try_get("room").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(TeacherProfile {
        id: TeacherId(id),
        surname,
        given_name,
        patronymic,
        position,
        room,
        disciplines: Vec::new(),
    })
}

#[async_trait]
impl CampusDirectory for SqlDirectoryRepository {
    async fn teachers(&self) -> Result<Vec<TeacherProfile>, ApplicationError> {
        Ok(self.load_teachers().await?)
    }

    async fn find_teachers_by_surname(
        &self,
        surname: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError> {
        Ok(self.find_by_surname(surname).await?)
    }

    async fn find_teachers_by_discipline(
        &self,
        discipline: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError> {
        Ok(self.find_by_discipline(discipline).await?)
    }

    async fn sport_sections(&self) -> Result<Vec<SportSection>, ApplicationError> {
        Ok(self.load_sport_sections().await?)
    }

    async fn documents(&self) -> Result<Vec<DocumentInfo>, ApplicationError> {
        Ok(self.load_documents().await?)
    }

    async fn events(&self) -> Result<Vec<CampusEvent>, ApplicationError> {
        Ok(self.load_events().await?)
    }

    async fn dormitories(&self) -> Result<Vec<Dormitory>, ApplicationError> {
        Ok(self.load_dormitories().await?)
    }

    async fn navigation_points(&self) -> Result<Vec<NavigationPoint>, ApplicationError> {
        Ok(self.load_navigation_points().await?)
    }
}
