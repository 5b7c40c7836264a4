mod summary;
pub mod views;

pub use summary::{leaning, DEFAULT_TOP_DRIVERS, LEANING_DEADBAND};
pub use views::{
    ArchetypeRow, DriverRow, FactorRow, Leaning, MatchSummary, PolicyRow, ProfileReport,
};
