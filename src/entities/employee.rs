// Employee Entity - Warehouse staff with enforced-valid fields
//
// Construction goes through EmployeeRegistry::create, which validates every
// field, assigns the next identity and appends - or fails and leaves no
// trace. Setters re-run the same validation helpers as construction.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Compensation growth applied per full year of service.
pub const ANNUAL_GROWTH_RATE: f64 = 0.04;

// ============================================================================
// EXPERIENCE TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceTier {
    Junior,
    Mid,
    Senior,
}

impl ExperienceTier {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            ExperienceTier::Junior => "Junior",
            ExperienceTier::Mid => "Mid",
            ExperienceTier::Senior => "Senior",
        }
    }

    /// Short code used in persisted records
    pub fn code(&self) -> &'static str {
        match self {
            ExperienceTier::Junior => "JUNIOR",
            ExperienceTier::Mid => "MID",
            ExperienceTier::Senior => "SENIOR",
        }
    }

    /// Parse a persisted code back into a tier
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "JUNIOR" => Some(ExperienceTier::Junior),
            "MID" => Some(ExperienceTier::Mid),
            "SENIOR" => Some(ExperienceTier::Senior),
            _ => None,
        }
    }
}

// ============================================================================
// STAFF ROLE
// ============================================================================

/// Concrete employee variants. The role is the record type tag; none of the
/// variants carry extra validated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Storekeeper,
    Loader,
    Supervisor,
}

impl StaffRole {
    pub fn name(&self) -> &'static str {
        match self {
            StaffRole::Storekeeper => "Storekeeper",
            StaffRole::Loader => "Loader",
            StaffRole::Supervisor => "Supervisor",
        }
    }

    /// Record type tag (first field of every persisted employee line)
    pub fn code(&self) -> &'static str {
        match self {
            StaffRole::Storekeeper => "STOREKEEPER",
            StaffRole::Loader => "LOADER",
            StaffRole::Supervisor => "SUPERVISOR",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "STOREKEEPER" => Some(StaffRole::Storekeeper),
            "LOADER" => Some(StaffRole::Loader),
            "SUPERVISOR" => Some(StaffRole::Supervisor),
            _ => None,
        }
    }
}

// ============================================================================
// EMPLOYEE ENTITY
// ============================================================================

/// A member of the warehouse staff.
///
/// Fields are private: every mutation goes through a setter that re-runs the
/// constructor's validation for that field, so the scalar invariants hold
/// for the entity's entire lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: u64,
    role: StaffRole,
    name: String,
    employment_date: NaiveDate,
    base_compensation: f64,
    experience_tier: ExperienceTier,
    notes: Option<String>,
}

impl Employee {
    /// Validate all fields and build the entity. Only the registry calls
    /// this; the id comes from the registry's counter.
    fn build(
        id: u64,
        role: StaffRole,
        name: &str,
        employment_date: NaiveDate,
        base_compensation: f64,
        experience_tier: ExperienceTier,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = validation::non_empty_trimmed("name", name)?;
        let employment_date =
            validation::not_in_future("employment_date", employment_date, today())?;
        let base_compensation =
            validation::strictly_positive("base_compensation", base_compensation)?;

        Ok(Employee {
            id,
            role,
            name,
            employment_date,
            base_compensation,
            experience_tier,
            notes: notes.map(|n| n.to_string()),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn role(&self) -> StaffRole {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn employment_date(&self) -> NaiveDate {
        self.employment_date
    }

    pub fn base_compensation(&self) -> f64 {
        self.base_compensation
    }

    pub fn experience_tier(&self) -> ExperienceTier {
        self.experience_tier
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Compensation grown by the annual rate for each full year of service,
    /// evaluated as of today. Computed, never stored.
    pub fn derived_compensation(&self) -> f64 {
        self.derived_compensation_on(today())
    }

    /// Date-parameterized variant for deterministic evaluation.
    pub fn derived_compensation_on(&self, date: NaiveDate) -> f64 {
        let years = whole_years_between(self.employment_date, date);
        self.base_compensation * (1.0 + ANNUAL_GROWTH_RATE).powi(years as i32)
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validation::non_empty_trimmed("name", name)?;
        Ok(())
    }

    pub fn set_employment_date(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        self.employment_date = validation::not_in_future("employment_date", date, today())?;
        Ok(())
    }

    pub fn set_base_compensation(&mut self, amount: f64) -> Result<(), ValidationError> {
        self.base_compensation = validation::strictly_positive("base_compensation", amount)?;
        Ok(())
    }

    pub fn set_experience_tier(&mut self, tier: ExperienceTier) {
        self.experience_tier = tier;
    }

    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = notes.map(|n| n.to_string());
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole years elapsed from `start` to `end`, anniversary-aware.
/// Zero when `end` is on or before `start`.
fn whole_years_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

// ============================================================================
// EMPLOYEE REGISTRY
// ============================================================================

/// Ordered collection of all live employees.
///
/// Append-only until a load replaces it wholesale. The id counter is scoped
/// to this family and survives `clear()`: ids are unique for the process
/// lifetime and never reused.
#[derive(Debug)]
pub struct EmployeeRegistry {
    entries: Vec<Employee>,
    next_id: u64,
}

impl EmployeeRegistry {
    pub fn new() -> Self {
        EmployeeRegistry {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// The only construction path. Validates every field, assigns the next
    /// id and appends; on failure nothing is added and the counter does not
    /// advance. Returns the new employee's id.
    pub fn create(
        &mut self,
        role: StaffRole,
        name: &str,
        employment_date: NaiveDate,
        base_compensation: f64,
        experience_tier: ExperienceTier,
        notes: Option<&str>,
    ) -> Result<u64, ValidationError> {
        let id = self.next_id;
        let employee = Employee::build(
            id,
            role,
            name,
            employment_date,
            base_compensation,
            experience_tier,
            notes,
        )?;
        self.next_id += 1;
        self.entries.push(employee);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&Employee> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Mutable access is safe: fields are private and setters validate.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Employee> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Read-only, order-preserving view of all employees.
    pub fn all(&self) -> &[Employee] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all entries. Only the load path calls this; the id counter
    /// is NOT reset.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EmployeeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
