// Warehouse Registry - Core Library
// In-memory registries of warehouse staff and storage sections, with field
// validation, the employee<->section assignment relation, and save/restore
// through a tagged ';'-delimited record format.

pub mod assignments;
pub mod codec;
pub mod entities;
pub mod persistence;
pub mod validation;
pub mod warehouse;

// Re-export commonly used types
pub use assignments::AssignmentTable;
pub use codec::{DecodeSummary, FIELD_DELIMITER};
pub use entities::{
    Employee, EmployeeRegistry, ExperienceTier, HazardCategory, OperationalState, Position,
    SectionKind, SectionRegistry, StaffRole, StorageSection, TemperatureBand,
    ANNUAL_GROWTH_RATE, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C,
};
pub use persistence::{
    load_employees, load_sections, save_employees, save_sections, LoadOutcome,
};
pub use validation::ValidationError;
pub use warehouse::Warehouse;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
