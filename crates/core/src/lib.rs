pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod lexicon;

pub use config::{AppConfig, ConfigError, LoadOptions, ReducerKind};
pub use directory::CampusDirectory;
pub use domain::category::Category;
pub use domain::directory::{
    CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherId,
    TeacherProfile,
};
pub use domain::extraction::ExtractionResult;
pub use domain::location::Location;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use lexicon::Lexicon;
