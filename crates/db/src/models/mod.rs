pub mod intervention;
pub mod lot;
pub mod planning_version;
pub mod project;
pub mod workspace;
