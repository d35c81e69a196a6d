use serde::{Deserialize, Serialize};

use crate::domain::category::Category;

/// Outcome of classifying one question: the routed category plus the extracted entities.
///
/// Entities are a canonical teacher name, a capitalized discipline label, a location tag,
/// or the leftover normalized tokens when nothing more specific was isolated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub category: Category,
    pub entities: Vec<String>,
}

impl ExtractionResult {
    pub fn new(category: Category, entities: Vec<String>) -> Self {
        Self { category, entities }
    }

    pub fn single(category: Category, entity: impl Into<String>) -> Self {
        Self { category, entities: vec![entity.into()] }
    }

    pub fn unknown() -> Self {
        Self { category: Category::Unknown, entities: Vec::new() }
    }

    pub fn primary_entity(&self) -> Option<&str> {
        self.entities.first().map(String::as_str)
    }
}
