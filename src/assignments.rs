// Assignment Table - The employee <-> section relation
//
// A single relation object owned outside both entity families, so neither
// entity holds references into the other and no ownership cycle exists.
// Both directions are sets and every mutation touches both mirrors inside
// the same call: one-sided links are unrepresentable.

use std::collections::{BTreeMap, BTreeSet};

use crate::entities::{Employee, StorageSection};

/// Symmetric many-to-many relation between employees and sections, keyed by
/// the construction-assigned entity ids.
#[derive(Debug, Default)]
pub struct AssignmentTable {
    by_employee: BTreeMap<u64, BTreeSet<u64>>,
    by_section: BTreeMap<u64, BTreeSet<u64>>,
}

impl AssignmentTable {
    pub fn new() -> Self {
        AssignmentTable {
            by_employee: BTreeMap::new(),
            by_section: BTreeMap::new(),
        }
    }

    /// Assign an employee to a section. Already-linked pairs are a no-op.
    /// Returns true when the link is new.
    pub fn link(&mut self, employee: &Employee, section: &StorageSection) -> bool {
        let added = self
            .by_employee
            .entry(employee.id())
            .or_default()
            .insert(section.id());
        self.by_section
            .entry(section.id())
            .or_default()
            .insert(employee.id());
        added
    }

    /// Remove an assignment. Not-linked pairs are a no-op.
    /// Returns true when a link was actually removed.
    pub fn unlink(&mut self, employee: &Employee, section: &StorageSection) -> bool {
        let removed = match self.by_employee.get_mut(&employee.id()) {
            Some(sections) => sections.remove(&section.id()),
            None => false,
        };
        if let Some(employees) = self.by_section.get_mut(&section.id()) {
            employees.remove(&employee.id());
        }
        // drop empty mirror entries so pre-link state is fully restored
        if self
            .by_employee
            .get(&employee.id())
            .is_some_and(|s| s.is_empty())
        {
            self.by_employee.remove(&employee.id());
        }
        if self
            .by_section
            .get(&section.id())
            .is_some_and(|s| s.is_empty())
        {
            self.by_section.remove(&section.id());
        }
        removed
    }

    pub fn is_linked(&self, employee: &Employee, section: &StorageSection) -> bool {
        self.by_employee
            .get(&employee.id())
            .is_some_and(|sections| sections.contains(&section.id()))
    }

    /// Ids of the sections an employee is assigned to.
    pub fn sections_for(&self, employee: &Employee) -> BTreeSet<u64> {
        self.by_employee
            .get(&employee.id())
            .cloned()
            .unwrap_or_default()
    }

    /// Ids of the employees assigned to a section.
    pub fn employees_for(&self, section: &StorageSection) -> BTreeSet<u64> {
        self.by_section
            .get(&section.id())
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of links.
    pub fn len(&self) -> usize {
        self.by_employee.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_employee.is_empty()
    }

    /// Drop every link. Invoked as part of every wholesale registry load,
    /// so no assignment can dangle against a dead id.
    pub fn clear(&mut self) {
        self.by_employee.clear();
        self.by_section.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
