// Persistence Gateway
//
// The save/load boundary between the codec and the filesystem. One file per
// entity family, whole-file reads and writes. A missing file is the
// expected first-run path and reports NoPriorState; an unreadable file
// clears the registry and propagates the error, so the system is always
// known-empty rather than partially populated.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

use crate::codec;
use crate::entities::{EmployeeRegistry, SectionRegistry};

/// What a load found at the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the path - no prior state, registry left empty.
    NoPriorState,
    /// File decoded; counts of restored entities and skipped records.
    Restored { restored: usize, skipped: usize },
}

// ============================================================================
// SAVE
// ============================================================================

/// Serialize the registry and overwrite `path`. Write failures propagate.
pub fn save_employees(registry: &EmployeeRegistry, path: &Path) -> Result<()> {
    let encoded = codec::encode_employees(registry)?;
    fs::write(path, encoded)
        .with_context(|| format!("failed to write employee file {}", path.display()))?;
    debug!("saved {} employees to {}", registry.len(), path.display());
    Ok(())
}

/// Serialize the registry and overwrite `path`. Write failures propagate.
pub fn save_sections(registry: &SectionRegistry, path: &Path) -> Result<()> {
    let encoded = codec::encode_sections(registry)?;
    fs::write(path, encoded)
        .with_context(|| format!("failed to write section file {}", path.display()))?;
    debug!("saved {} sections to {}", registry.len(), path.display());
    Ok(())
}

// ============================================================================
// LOAD
// ============================================================================

/// Replace the registry contents with whatever `path` holds.
pub fn load_employees(registry: &mut EmployeeRegistry, path: &Path) -> Result<LoadOutcome> {
    if !path.exists() {
        registry.clear();
        return Ok(LoadOutcome::NoPriorState);
    }

    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) => {
            registry.clear();
            return Err(e)
                .with_context(|| format!("failed to read employee file {}", path.display()));
        }
    };

    let summary = codec::decode_employees(registry, &input);
    Ok(LoadOutcome::Restored {
        restored: summary.restored,
        skipped: summary.skipped,
    })
}

/// Replace the registry contents with whatever `path` holds.
pub fn load_sections(registry: &mut SectionRegistry, path: &Path) -> Result<LoadOutcome> {
    if !path.exists() {
        registry.clear();
        return Ok(LoadOutcome::NoPriorState);
    }

    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) => {
            registry.clear();
            return Err(e)
                .with_context(|| format!("failed to read section file {}", path.display()));
        }
    };

    let summary = codec::decode_sections(registry, &input);
    Ok(LoadOutcome::Restored {
        restored: summary.restored,
        skipped: summary.skipped,
    })
}

// ============================================================================
// TESTS
// ============================================================================
