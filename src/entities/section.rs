// Storage Section Entity - Warehouse storage areas with enforced-valid fields
//
// Three concrete variants share the scalar base: unconditioned (General),
// temperature-controlled (adds an operational band) and hazardous (adds a
// non-empty hazard category set and a ventilation flag). Variant invariants
// are checked once, when the SectionKind value is constructed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Physical temperature range a section sensor can report, in Celsius.
pub const MIN_TEMPERATURE_C: f64 = -80.0;
pub const MAX_TEMPERATURE_C: f64 = 60.0;

// ============================================================================
// OPERATIONAL STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationalState {
    Active,
    Maintenance,
    Closed,
}

impl OperationalState {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            OperationalState::Active => "Active",
            OperationalState::Maintenance => "Maintenance",
            OperationalState::Closed => "Closed",
        }
    }

    /// Short code used in persisted records
    pub fn code(&self) -> &'static str {
        match self {
            OperationalState::Active => "ACTIVE",
            OperationalState::Maintenance => "MAINTENANCE",
            OperationalState::Closed => "CLOSED",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "ACTIVE" => Some(OperationalState::Active),
            "MAINTENANCE" => Some(OperationalState::Maintenance),
            "CLOSED" => Some(OperationalState::Closed),
            _ => None,
        }
    }
}

// ============================================================================
// POSITION
// ============================================================================

/// Where a section sits in the building: building / aisle / row.
/// Each component is validated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    building: String,
    aisle: String,
    row: u32,
}

impl Position {
    pub fn new(building: &str, aisle: &str, row: u32) -> Result<Self, ValidationError> {
        Ok(Position {
            building: validation::non_empty_trimmed("building", building)?,
            aisle: validation::non_empty_trimmed("aisle", aisle)?,
            row: validation::positive_row("row", row)?,
        })
    }

    pub fn building(&self) -> &str {
        &self.building
    }

    pub fn aisle(&self) -> &str {
        &self.aisle
    }

    pub fn row(&self) -> u32 {
        self.row
    }
}

// ============================================================================
// TEMPERATURE BAND
// ============================================================================

/// Required operational band of a temperature-controlled section.
/// `min_c` is strictly below `max_c`; both sit inside the physical range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    min_c: f64,
    max_c: f64,
}

impl TemperatureBand {
    pub fn new(min_c: f64, max_c: f64) -> Result<Self, ValidationError> {
        let min_c = validation::in_range("min_c", min_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)?;
        let max_c = validation::in_range("max_c", max_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)?;
        if min_c >= max_c {
            return Err(ValidationError::new(
                "min_c",
                format!("must be strictly below max_c, got [{}, {}]", min_c, max_c),
            ));
        }
        Ok(TemperatureBand { min_c, max_c })
    }

    pub fn min_c(&self) -> f64 {
        self.min_c
    }

    pub fn max_c(&self) -> f64 {
        self.max_c
    }

    /// Inclusive on both ends.
    pub fn contains(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min_c && temperature_c <= self.max_c
    }
}

// ============================================================================
// HAZARD CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HazardCategory {
    Flammable,
    Corrosive,
    Toxic,
    Explosive,
    Oxidizing,
}

impl HazardCategory {
    pub fn code(&self) -> &'static str {
        match self {
            HazardCategory::Flammable => "FLAMMABLE",
            HazardCategory::Corrosive => "CORROSIVE",
            HazardCategory::Toxic => "TOXIC",
            HazardCategory::Explosive => "EXPLOSIVE",
            HazardCategory::Oxidizing => "OXIDIZING",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "FLAMMABLE" => Some(HazardCategory::Flammable),
            "CORROSIVE" => Some(HazardCategory::Corrosive),
            "TOXIC" => Some(HazardCategory::Toxic),
            "EXPLOSIVE" => Some(HazardCategory::Explosive),
            "OXIDIZING" => Some(HazardCategory::Oxidizing),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION KIND
// ============================================================================

/// Closed set of concrete section variants. The tag is the first field of
/// every persisted section record and the sole dispatch key on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectionKind {
    General,
    TemperatureControlled {
        band: TemperatureBand,
    },
    Hazardous {
        categories: BTreeSet<HazardCategory>,
        forced_ventilation: bool,
    },
}

impl SectionKind {
    /// Build the temperature-controlled variant, enforcing the band invariant.
    pub fn temperature_controlled(min_c: f64, max_c: f64) -> Result<Self, ValidationError> {
        Ok(SectionKind::TemperatureControlled {
            band: TemperatureBand::new(min_c, max_c)?,
        })
    }

    /// Build the hazardous variant. The category set must not be empty.
    pub fn hazardous(
        categories: BTreeSet<HazardCategory>,
        forced_ventilation: bool,
    ) -> Result<Self, ValidationError> {
        if categories.is_empty() {
            return Err(ValidationError::new(
                "hazard_categories",
                "must contain at least one category",
            ));
        }
        Ok(SectionKind::Hazardous {
            categories,
            forced_ventilation,
        })
    }

    /// Record type tag (first field of every persisted section line)
    pub fn tag(&self) -> &'static str {
        match self {
            SectionKind::General => "GENERAL",
            SectionKind::TemperatureControlled { .. } => "TEMP_CONTROLLED",
            SectionKind::Hazardous { .. } => "HAZARDOUS",
        }
    }
}

// ============================================================================
// STORAGE SECTION ENTITY
// ============================================================================

/// One storage area of the warehouse.
///
/// Fields are private; setters re-run the constructor's validation, so the
/// invariants hold for the entity's entire lifetime. `area()` is derived
/// from width and length and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    id: u64,
    name: String,
    position: Position,
    width_m: f64,
    length_m: f64,
    state: OperationalState,
    has_backup_power: bool,
    temperature_c: Option<f64>,
    humidity_pct: f64,
    kind: SectionKind,
}

impl StorageSection {
    #[allow(clippy::too_many_arguments)]
    fn build(
        id: u64,
        kind: SectionKind,
        name: &str,
        position: Position,
        width_m: f64,
        length_m: f64,
        state: OperationalState,
        has_backup_power: bool,
        temperature_c: Option<f64>,
        humidity_pct: f64,
    ) -> Result<Self, ValidationError> {
        let name = validation::non_empty_trimmed("name", name)?;
        let width_m = validation::strictly_positive("width_m", width_m)?;
        let length_m = validation::strictly_positive("length_m", length_m)?;
        let temperature_c = validate_temperature(temperature_c)?;
        let humidity_pct = validation::in_range("humidity_pct", humidity_pct, 0.0, 100.0)?;

        Ok(StorageSection {
            id,
            name,
            position,
            width_m,
            length_m,
            state,
            has_backup_power,
            temperature_c,
            humidity_pct,
            kind,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    /// Floor area in square meters, rounded to two decimals. Derived.
    pub fn area(&self) -> f64 {
        (self.width_m * self.length_m * 100.0).round() / 100.0
    }

    pub fn state(&self) -> OperationalState {
        self.state
    }

    pub fn has_backup_power(&self) -> bool {
        self.has_backup_power
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_c
    }

    pub fn humidity_pct(&self) -> f64 {
        self.humidity_pct
    }

    pub fn kind(&self) -> &SectionKind {
        &self.kind
    }

    /// The operational band, when this is a temperature-controlled section.
    pub fn band(&self) -> Option<&TemperatureBand> {
        match &self.kind {
            SectionKind::TemperatureControlled { band } => Some(band),
            _ => None,
        }
    }

    /// The hazard categories, when this is a hazardous section.
    pub fn hazard_categories(&self) -> Option<&BTreeSet<HazardCategory>> {
        match &self.kind {
            SectionKind::Hazardous { categories, .. } => Some(categories),
            _ => None,
        }
    }

    /// Whether the current temperature reading sits inside the operational
    /// band. Sections without a band have no constraint to violate and
    /// report true; a temperature-controlled section with no reading is not
    /// known to be in range and reports false.
    pub fn within_operational_range(&self) -> bool {
        match &self.kind {
            SectionKind::TemperatureControlled { band } => match self.temperature_c {
                Some(t) => band.contains(t),
                None => false,
            },
            _ => true,
        }
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validation::non_empty_trimmed("name", name)?;
        Ok(())
    }

    /// Position components are validated by `Position::new`.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_width_m(&mut self, width_m: f64) -> Result<(), ValidationError> {
        self.width_m = validation::strictly_positive("width_m", width_m)?;
        Ok(())
    }

    pub fn set_length_m(&mut self, length_m: f64) -> Result<(), ValidationError> {
        self.length_m = validation::strictly_positive("length_m", length_m)?;
        Ok(())
    }

    pub fn set_state(&mut self, state: OperationalState) {
        self.state = state;
    }

    pub fn set_has_backup_power(&mut self, has_backup_power: bool) {
        self.has_backup_power = has_backup_power;
    }

    pub fn set_temperature_c(&mut self, temperature_c: Option<f64>) -> Result<(), ValidationError> {
        self.temperature_c = validate_temperature(temperature_c)?;
        Ok(())
    }

    pub fn set_humidity_pct(&mut self, humidity_pct: f64) -> Result<(), ValidationError> {
        self.humidity_pct = validation::in_range("humidity_pct", humidity_pct, 0.0, 100.0)?;
        Ok(())
    }
}

fn validate_temperature(temperature_c: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match temperature_c {
        Some(t) => Ok(Some(validation::in_range(
            "temperature_c",
            t,
            MIN_TEMPERATURE_C,
            MAX_TEMPERATURE_C,
        )?)),
        None => Ok(None),
    }
}

// ============================================================================
// SECTION REGISTRY
// ============================================================================

/// Ordered collection of all live storage sections.
///
/// Same discipline as the employee registry: append-only, replaced wholesale
/// by a load, id counter survives `clear()` and ids are never reused.
#[derive(Debug)]
pub struct SectionRegistry {
    entries: Vec<StorageSection>,
    next_id: u64,
}

impl SectionRegistry {
    pub fn new() -> Self {
        SectionRegistry {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// The only construction path. The kind carries its variant invariants
    /// already (checked at `SectionKind` construction); this validates the
    /// shared scalar fields, assigns the next id and appends.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        kind: SectionKind,
        name: &str,
        position: Position,
        width_m: f64,
        length_m: f64,
        state: OperationalState,
        has_backup_power: bool,
        temperature_c: Option<f64>,
        humidity_pct: f64,
    ) -> Result<u64, ValidationError> {
        let id = self.next_id;
        let section = StorageSection::build(
            id,
            kind,
            name,
            position,
            width_m,
            length_m,
            state,
            has_backup_power,
            temperature_c,
            humidity_pct,
        )?;
        self.next_id += 1;
        self.entries.push(section);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&StorageSection> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut StorageSection> {
        self.entries.iter_mut().find(|s| s.id == id)
    }

    /// Read-only, order-preserving view of all sections.
    pub fn all(&self) -> &[StorageSection] {
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

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> Position {
        Position::new("B1", "A3", 4).unwrap()
    }

    fn create_general(registry: &mut SectionRegistry, name: &str) -> u64 {
        registry
            .create(
                SectionKind::General,
                name,
                position(),
                4.0,
                6.0,
                OperationalState::Active,
                false,
                None,
                45.0,
            )
            .unwrap()
    }

    #[test]
    fn test_general_section_creation() {
        let mut registry = SectionRegistry::new();
        let id = create_general(&mut registry, "Dry goods");

        assert_eq!(registry.len(), 1);
        let section = registry.get(id).unwrap();
        assert_eq!(section.name(), "Dry goods");
        assert_eq!(section.kind(), &SectionKind::General);
        assert_eq!(section.state(), OperationalState::Active);
        assert_eq!(section.position().building(), "B1");
        assert_eq!(section.position().aisle(), "A3");
        assert_eq!(section.position().row(), 4);
        assert!(section.band().is_none());
        assert!(section.hazard_categories().is_none());
    }

    #[test]
    fn test_position_components_validated_independently() {
        assert_eq!(Position::new("", "A1", 1).unwrap_err().field, "building");
        assert_eq!(Position::new("B1", "  ", 1).unwrap_err().field, "aisle");
        assert_eq!(Position::new("B1", "A1", 0).unwrap_err().field, "row");
    }

    #[test]
    fn test_invalid_scalars_leave_registry_unchanged() {
        let mut registry = SectionRegistry::new();

        let bad_width = registry.create(
            SectionKind::General,
            "S",
            position(),
            0.0,
            6.0,
            OperationalState::Active,
            false,
            None,
            45.0,
        );
        assert_eq!(bad_width.unwrap_err().field, "width_m");

        let bad_humidity = registry.create(
            SectionKind::General,
            "S",
            position(),
            4.0,
            6.0,
            OperationalState::Active,
            false,
            None,
            120.0,
        );
        assert_eq!(bad_humidity.unwrap_err().field, "humidity_pct");

        let bad_temperature = registry.create(
            SectionKind::General,
            "S",
            position(),
            4.0,
            6.0,
            OperationalState::Active,
            false,
            Some(200.0),
            45.0,
        );
        assert_eq!(bad_temperature.unwrap_err().field, "temperature_c");

        assert!(registry.is_empty());
    }

    #[test]
    fn test_area_is_derived_and_rounded() {
        let mut registry = SectionRegistry::new();
        let id = registry
            .create(
                SectionKind::General,
                "S",
                position(),
                2.5,
                3.333,
                OperationalState::Active,
                false,
                None,
                45.0,
            )
            .unwrap();

        // 2.5 * 3.333 = 8.3325 -> 8.33
        assert_eq!(registry.get(id).unwrap().area(), 8.33);
    }

    #[test]
    fn test_temperature_band_requires_min_strictly_below_max() {
        assert!(TemperatureBand::new(-10.0, 5.0).is_ok());
        assert!(TemperatureBand::new(5.0, 5.0).is_err());
        assert!(TemperatureBand::new(5.0, -10.0).is_err());
        // outside the physical range
        assert!(TemperatureBand::new(-200.0, 5.0).is_err());
        assert!(TemperatureBand::new(-10.0, 90.0).is_err());
    }

    #[test]
    fn test_within_operational_range_scenario() {
        let mut registry = SectionRegistry::new();
        let kind = SectionKind::temperature_controlled(-10.0, 5.0).unwrap();
        let id = registry
            .create(
                kind,
                "Cold room",
                position(),
                3.0,
                3.0,
                OperationalState::Active,
                true,
                None,
                60.0,
            )
            .unwrap();

        let section = registry.get_mut(id).unwrap();
        // no reading yet: not known to be in range
        assert!(!section.within_operational_range());

        section.set_temperature_c(Some(20.0)).unwrap();
        assert!(!section.within_operational_range());

        section.set_temperature_c(Some(-3.0)).unwrap();
        assert!(section.within_operational_range());

        // band ends are inclusive
        section.set_temperature_c(Some(5.0)).unwrap();
        assert!(section.within_operational_range());
    }

    #[test]
    fn test_bandless_section_always_within_range() {
        let mut registry = SectionRegistry::new();
        let id = create_general(&mut registry, "S");
        let section = registry.get_mut(id).unwrap();

        assert!(section.within_operational_range());
        section.set_temperature_c(Some(55.0)).unwrap();
        assert!(section.within_operational_range());
    }

    #[test]
    fn test_hazardous_requires_nonempty_categories() {
        let empty = SectionKind::hazardous(BTreeSet::new(), true);
        assert_eq!(empty.unwrap_err().field, "hazard_categories");

        let mut categories = BTreeSet::new();
        categories.insert(HazardCategory::Flammable);
        categories.insert(HazardCategory::Corrosive);
        let kind = SectionKind::hazardous(categories.clone(), true).unwrap();

        let mut registry = SectionRegistry::new();
        let id = registry
            .create(
                kind,
                "Solvents",
                position(),
                5.0,
                8.0,
                OperationalState::Active,
                true,
                Some(18.0),
                35.0,
            )
            .unwrap();

        let section = registry.get(id).unwrap();
        assert_eq!(section.hazard_categories(), Some(&categories));
    }

    #[test]
    fn test_setters_revalidate() {
        let mut registry = SectionRegistry::new();
        let id = create_general(&mut registry, "S");
        let section = registry.get_mut(id).unwrap();

        assert!(section.set_name("  ").is_err());
        assert_eq!(section.name(), "S");

        assert!(section.set_width_m(-2.0).is_err());
        assert!(section.set_humidity_pct(101.0).is_err());
        assert!(section.set_temperature_c(Some(-100.0)).is_err());

        assert!(section.set_humidity_pct(100.0).is_ok());
        assert!(section.set_temperature_c(Some(MAX_TEMPERATURE_C)).is_ok());
        section.set_state(OperationalState::Maintenance);
        assert_eq!(section.state(), OperationalState::Maintenance);
    }

    #[test]
    fn test_ids_monotonic_and_never_reused_after_clear() {
        let mut registry = SectionRegistry::new();
        assert_eq!(create_general(&mut registry, "A"), 1);
        assert_eq!(create_general(&mut registry, "B"), 2);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(create_general(&mut registry, "C"), 3);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut registry = SectionRegistry::new();
        create_general(&mut registry, "First");
        create_general(&mut registry, "Second");

        let names: Vec<&str> = registry.all().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_state_and_category_codes_round_trip() {
        for state in [
            OperationalState::Active,
            OperationalState::Maintenance,
            OperationalState::Closed,
        ] {
            assert_eq!(OperationalState::parse(state.code()), Some(state));
        }
        for category in [
            HazardCategory::Flammable,
            HazardCategory::Corrosive,
            HazardCategory::Toxic,
            HazardCategory::Explosive,
            HazardCategory::Oxidizing,
        ] {
            assert_eq!(HazardCategory::parse(category.code()), Some(category));
        }
        assert_eq!(OperationalState::parse("OPEN"), None);
        assert_eq!(HazardCategory::parse("WET"), None);
    }
}
