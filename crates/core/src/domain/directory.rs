use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub i64);

/// One row of the people directory together with the disciplines the person teaches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub id: TeacherId,
    pub surname: String,
    pub given_name: String,
    pub patronymic: String,
    pub position: Option<String>,
    pub room: Option<String>,
    pub disciplines: Vec<String>,
}

impl TeacherProfile {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.surname, self.given_name, self.patronymic).trim().to_string()
    }

    /// Positional roster fields: surname, given name, patronymic.
    pub fn roster_fields(&self) -> Vec<String> {
        vec![self.surname.clone(), self.given_name.clone(), self.patronymic.clone()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportSection {
    pub name: String,
    pub coach: Option<String>,
    pub location: Option<String>,
    pub schedule: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub description: Option<String>,
    pub template_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusEvent {
    pub title: String,
    pub starts_at: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dormitory {
    pub number: String,
    pub warden: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Where a named campus location is and when it is open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPoint {
    pub tag: String,
    pub title: String,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub hours: Option<String>,
    pub notes: Option<String>,
}
