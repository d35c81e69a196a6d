use serde::{Deserialize, Serialize};

/// Named places on campus that navigation questions resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Library,
    Canteen,
    Lab,
    Deanery,
    StudyOffice,
    StudentCouncil,
    Accounting,
    AssemblyHall,
    Gym,
    MedicalOffice,
}

impl Location {
    pub const ALL: [Location; 10] = [
        Self::Library,
        Self::Canteen,
        Self::Lab,
        Self::Deanery,
        Self::StudyOffice,
        Self::StudentCouncil,
        Self::Accounting,
        Self::AssemblyHall,
        Self::Gym,
        Self::MedicalOffice,
    ];

    /// Stable tag carried as the navigation entity.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Canteen => "canteen",
            Self::Lab => "lab",
            Self::Deanery => "deanery",
            Self::StudyOffice => "study_office",
            Self::StudentCouncil => "student_council",
            Self::Accounting => "accounting",
            Self::AssemblyHall => "assembly_hall",
            Self::Gym => "gym",
            Self::MedicalOffice => "medical_office",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.tag() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn tags_round_trip_through_lookup() {
        for location in Location::ALL {
            assert_eq!(Location::from_tag(location.tag()), Some(location));
        }
        assert_eq!(Location::from_tag("rooftop"), None);
    }
}
