use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::directory::CampusDirectory;
use campus_core::domain::directory::{
    CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherProfile,
};
use campus_core::errors::ApplicationError;

#[derive(Clone, Debug, Default)]
pub struct DirectoryData {
    pub teachers: Vec<TeacherProfile>,
    pub sport_sections: Vec<SportSection>,
    pub documents: Vec<DocumentInfo>,
    pub events: Vec<CampusEvent>,
    pub dormitories: Vec<Dormitory>,
    pub navigation_points: Vec<NavigationPoint>,
}

/// Directory held in memory; used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryDirectory {
    data: RwLock<DirectoryData>,
}

impl InMemoryDirectory {
    pub fn new(data: DirectoryData) -> Self {
        Self { data: RwLock::new(data) }
    }

    /// Inserts or replaces a profile by id, keeping surname order.
    pub async fn save_teacher(&self, profile: TeacherProfile) {
        let mut data = self.data.write().await;
        data.teachers.retain(|existing| existing.id != profile.id);
        data.teachers.push(profile);
        data.teachers.sort_by(|left, right| left.surname.cmp(&right.surname));
    }

    pub async fn replace(&self, data: DirectoryData) {
        *self.data.write().await = data;
    }
}

#[async_trait]
impl CampusDirectory for InMemoryDirectory {
    async fn teachers(&self) -> Result<Vec<TeacherProfile>, ApplicationError> {
        Ok(self.data.read().await.teachers.clone())
    }

    async fn find_teachers_by_surname(
        &self,
        surname: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError> {
        let needle = surname.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let data = self.data.read().await;
        Ok(data
            .teachers
            .iter()
            .filter(|profile| profile.surname.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_teachers_by_discipline(
        &self,
        discipline: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError> {
        let needle = discipline.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let data = self.data.read().await;
        Ok(data
            .teachers
            .iter()
            .filter(|profile| {
                profile.disciplines.iter().any(|name| name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn sport_sections(&self) -> Result<Vec<SportSection>, ApplicationError> {
        Ok(self.data.read().await.sport_sections.clone())
    }

    async fn documents(&self) -> Result<Vec<DocumentInfo>, ApplicationError> {
        Ok(self.data.read().await.documents.clone())
    }

    async fn events(&self) -> Result<Vec<CampusEvent>, ApplicationError> {
        Ok(self.data.read().await.events.clone())
    }

    async fn dormitories(&self) -> Result<Vec<Dormitory>, ApplicationError> {
        Ok(self.data.read().await.dormitories.clone())
    }

    async fn navigation_points(&self) -> Result<Vec<NavigationPoint>, ApplicationError> {
        Ok(self.data.read().await.navigation_points.clone())
    }
}
