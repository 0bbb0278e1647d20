// Entity Models
//
// Two families: warehouse staff (Employee) and storage sections
// (StorageSection). Each family has a closed set of concrete variants, a
// registry holding the ordered extent of live entities, and a per-family
// monotonic id counter. Construction always goes through the registry.

pub mod employee;
pub mod section;

pub use employee::{Employee, EmployeeRegistry, ExperienceTier, StaffRole, ANNUAL_GROWTH_RATE};
pub use section::{
    HazardCategory, OperationalState, Position, SectionKind, SectionRegistry, StorageSection,
    TemperatureBand, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C,
};
