use serde::{Deserialize, Serialize};

/// Information domain a student question is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Teacher,
    Discipline,
    Document,
    Navigation,
    Event,
    Sport,
    Dormitory,
    Unknown,
}

impl Category {
    /// Categories that own a keyword table, in keyword-matching order.
    pub const KEYWORD_ORDER: [Category; 7] = [
        Self::Teacher,
        Self::Discipline,
        Self::Document,
        Self::Navigation,
        Self::Event,
        Self::Sport,
        Self::Dormitory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Discipline => "discipline",
            Self::Document => "document",
            Self::Navigation => "navigation",
            Self::Event => "event",
            Self::Sport => "sport",
            Self::Dormitory => "dormitory",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
