use async_trait::async_trait;

use crate::domain::directory::{
    CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherProfile,
};
use crate::errors::ApplicationError;

/// Read access to the campus data store behind the response dispatcher.
///
/// Implementations must tolerate concurrent readers; every method is a read.
#[async_trait]
pub trait CampusDirectory: Send + Sync {
    /// Full people directory, ordered by surname. Used to build the roster index.
    async fn teachers(&self) -> Result<Vec<TeacherProfile>, ApplicationError>;

    /// Profiles whose surname contains `surname` (case-insensitive).
    async fn find_teachers_by_surname(
        &self,
        surname: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError>;

    /// Profiles teaching a discipline whose name contains `discipline` (case-insensitive).
    async fn find_teachers_by_discipline(
        &self,
        discipline: &str,
    ) -> Result<Vec<TeacherProfile>, ApplicationError>;

    async fn sport_sections(&self) -> Result<Vec<SportSection>, ApplicationError>;

    async fn documents(&self) -> Result<Vec<DocumentInfo>, ApplicationError>;

    async fn events(&self) -> Result<Vec<CampusEvent>, ApplicationError>;

    async fn dormitories(&self) -> Result<Vec<Dormitory>, ApplicationError>;

    async fn navigation_points(&self) -> Result<Vec<NavigationPoint>, ApplicationError>;
}
