pub mod category;
pub mod directory;
pub mod extraction;
pub mod location;
