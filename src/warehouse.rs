// Warehouse Context
//
// Owns the two registries and the assignment table and wires them to the
// persistence gateway. Registries are passed to the codec/gateway
// explicitly - there is no ambient global state. A wholesale load replaces
// both registries and drops every assignment, so no link can dangle
// against an id that no longer exists.

use anyhow::Result;
use std::path::Path;

use crate::assignments::AssignmentTable;
use crate::entities::{EmployeeRegistry, SectionRegistry};
use crate::persistence::{self, LoadOutcome};

#[derive(Debug)]
pub struct Warehouse {
    employees: EmployeeRegistry,
    sections: SectionRegistry,
    assignments: AssignmentTable,
}

impl Warehouse {
    pub fn new() -> Self {
        Warehouse {
            employees: EmployeeRegistry::new(),
            sections: SectionRegistry::new(),
            assignments: AssignmentTable::new(),
        }
    }

    pub fn employees(&self) -> &EmployeeRegistry {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut EmployeeRegistry {
        &mut self.employees
    }

    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut SectionRegistry {
        &mut self.sections
    }

    pub fn assignments(&self) -> &AssignmentTable {
        &self.assignments
    }

    pub fn assignments_mut(&mut self) -> &mut AssignmentTable {
        &mut self.assignments
    }

    /// Write both family files, overwriting prior content.
    pub fn save(&self, employees_path: &Path, sections_path: &Path) -> Result<()> {
        persistence::save_employees(&self.employees, employees_path)?;
        persistence::save_sections(&self.sections, sections_path)?;
        Ok(())
    }

    /// Replace the in-memory state with whatever the two files hold.
    ///
    /// Assignments are dropped up front: the persisted format carries
    /// entities only, and entities get fresh ids on restore, so any
    /// surviving link would point at the dead pre-load extent.
    pub fn load(
        &mut self,
        employees_path: &Path,
        sections_path: &Path,
    ) -> Result<(LoadOutcome, LoadOutcome)> {
        self.assignments.clear();
        let result = self.load_registries(employees_path, sections_path);
        if result.is_err() {
            // a failed load leaves the whole context known-empty, never
            // one family stale against the other
            self.employees.clear();
            self.sections.clear();
        }
        result
    }

    fn load_registries(
        &mut self,
        employees_path: &Path,
        sections_path: &Path,
    ) -> Result<(LoadOutcome, LoadOutcome)> {
        let employees = persistence::load_employees(&mut self.employees, employees_path)?;
        let sections = persistence::load_sections(&mut self.sections, sections_path)?;
        Ok((employees, sections))
    }
}

impl Default for Warehouse {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
