// Tagged-Record Codec
//
// Converts each registry to an ordered sequence of ';'-delimited text
// records (one line per entity, leading type tag) and back. Decoding is
// best-effort: a malformed record is skipped and logged, never fatal, and
// every surviving record is rebuilt through the registry's normal
// construction path so all invariants re-run on restore.
//
// Record layouts:
//   employee: TAG;id;name;employment_date;base_compensation;tier;notes
//   general : GENERAL;id;name;pos;width;length;state;backup;temp;humidity
//   temp-ctl: TEMP_CONTROLLED;<same 10>;min_c;max_c
//   hazmat  : HAZARDOUS;<same 10>;categories;ventilation
//
// Position is building-aisle-row on '-'; hazard categories are ','-joined
// inside their slot; booleans are 0/1; absent optionals keep their slot.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, warn};
use std::collections::BTreeSet;

use crate::entities::{
    EmployeeRegistry, ExperienceTier, HazardCategory, OperationalState, Position, SectionKind,
    SectionRegistry, StaffRole,
};

pub const FIELD_DELIMITER: u8 = b';';
const POSITION_DELIMITER: char = '-';
const CATEGORY_DELIMITER: char = ',';
const DATE_FORMAT: &str = "%Y-%m-%d";

/// tag + id + name + date + compensation + tier; the notes slot may be
/// absent entirely on hand-edited files
const MIN_EMPLOYEE_FIELDS: usize = 6;
/// tag through humidity; variant payloads come after
const MIN_SECTION_FIELDS: usize = 10;
/// sections whose tag carries a two-field payload
const VARIANT_SECTION_FIELDS: usize = 12;

/// Outcome of one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub restored: usize,
    pub skipped: usize,
}

// ============================================================================
// ENCODING
// ============================================================================

pub fn encode_employees(registry: &EmployeeRegistry) -> Result<String> {
    let mut wtr = record_writer();

    for employee in registry.all() {
        wtr.write_record(&[
            employee.role().code().to_string(),
            employee.id().to_string(),
            sanitize_text(employee.name()),
            employee.employment_date().format(DATE_FORMAT).to_string(),
            employee.base_compensation().to_string(),
            employee.experience_tier().code().to_string(),
            employee.notes().map(sanitize_text).unwrap_or_default(),
        ])?;
    }

    finish(wtr)
}

pub fn encode_sections(registry: &SectionRegistry) -> Result<String> {
    let mut wtr = record_writer();

    for section in registry.all() {
        let mut fields = vec![
            section.kind().tag().to_string(),
            section.id().to_string(),
            sanitize_text(section.name()),
            encode_position(section.position()),
            section.width_m().to_string(),
            section.length_m().to_string(),
            section.state().code().to_string(),
            encode_bool(section.has_backup_power()),
            section
                .temperature_c()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            section.humidity_pct().to_string(),
        ];

        match section.kind() {
            SectionKind::General => {}
            SectionKind::TemperatureControlled { band } => {
                fields.push(band.min_c().to_string());
                fields.push(band.max_c().to_string());
            }
            SectionKind::Hazardous {
                categories,
                forced_ventilation,
            } => {
                fields.push(encode_categories(categories));
                fields.push(encode_bool(*forced_ventilation));
            }
        }

        wtr.write_record(&fields)?;
    }

    finish(wtr)
}

fn record_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("failed to flush record writer: {}", e))?;
    String::from_utf8(bytes).context("encoded records were not valid UTF-8")
}

/// Free text sheds the field delimiter and line breaks before encoding.
/// Accepted lossy behavior - the format has no escaping.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ';' && *c != '\n' && *c != '\r')
        .collect()
}

/// Position components additionally shed the sub-delimiter.
fn sanitize_position_token(token: &str) -> String {
    sanitize_text(token)
        .chars()
        .filter(|c| *c != POSITION_DELIMITER)
        .collect()
}

fn encode_position(position: &Position) -> String {
    format!(
        "{}{}{}{}{}",
        sanitize_position_token(position.building()),
        POSITION_DELIMITER,
        sanitize_position_token(position.aisle()),
        POSITION_DELIMITER,
        position.row()
    )
}

fn encode_categories(categories: &BTreeSet<HazardCategory>) -> String {
    categories
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(&CATEGORY_DELIMITER.to_string())
}

fn encode_bool(value: bool) -> String {
    let flag = if value { "1" } else { "0" };
    flag.to_string()
}

// ============================================================================
// DECODING
// ============================================================================

/// Clear the registry, then rebuild one employee per well-formed record.
/// Bad records are skipped and counted; the load never aborts on them.
pub fn decode_employees(registry: &mut EmployeeRegistry, input: &str) -> DecodeSummary {
    registry.clear();
    let mut summary = DecodeSummary::default();
    let mut reader = record_reader(input);

    for (number, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("employee record {}: unreadable ({}), skipped", number + 1, e);
                summary.skipped += 1;
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        match decode_employee_record(registry, &record) {
            Ok(()) => summary.restored += 1,
            Err(reason) => {
                warn!("employee record {}: {}, skipped", number + 1, reason);
                summary.skipped += 1;
            }
        }
    }

    debug!(
        "decoded employees: {} restored, {} skipped",
        summary.restored, summary.skipped
    );
    summary
}

/// Clear the registry, then rebuild one section per well-formed record.
pub fn decode_sections(registry: &mut SectionRegistry, input: &str) -> DecodeSummary {
    registry.clear();
    let mut summary = DecodeSummary::default();
    let mut reader = record_reader(input);

    for (number, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("section record {}: unreadable ({}), skipped", number + 1, e);
                summary.skipped += 1;
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        match decode_section_record(registry, &record) {
            Ok(()) => summary.restored += 1,
            Err(reason) => {
                warn!("section record {}: {}, skipped", number + 1, reason);
                summary.skipped += 1;
            }
        }
    }

    debug!(
        "decoded sections: {} restored, {} skipped",
        summary.restored, summary.skipped
    );
    summary
}

fn record_reader(input: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input.as_bytes())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("").trim()
}

fn decode_employee_record(
    registry: &mut EmployeeRegistry,
    record: &StringRecord,
) -> Result<(), String> {
    if record.len() < MIN_EMPLOYEE_FIELDS {
        return Err(format!(
            "expected at least {} fields, got {}",
            MIN_EMPLOYEE_FIELDS,
            record.len()
        ));
    }

    let tag = field(record, 0);
    let role = StaffRole::parse(tag).ok_or_else(|| format!("unknown record tag {:?}", tag))?;

    // The stored id is positional only; construction assigns a fresh one.
    let _stored_id: u64 = field(record, 1)
        .parse()
        .map_err(|_| format!("invalid id {:?}", field(record, 1)))?;

    let name = field(record, 2);
    let employment_date = parse_date(field(record, 3))?;
    let base_compensation = parse_f64("base_compensation", field(record, 4))?;
    let tier = field(record, 5);
    let experience_tier =
        ExperienceTier::parse(tier).ok_or_else(|| format!("unknown experience tier {:?}", tier))?;
    let notes = match field(record, 6) {
        "" => None,
        text => Some(text),
    };

    registry
        .create(
            role,
            name,
            employment_date,
            base_compensation,
            experience_tier,
            notes,
        )
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn decode_section_record(
    registry: &mut SectionRegistry,
    record: &StringRecord,
) -> Result<(), String> {
    if record.len() < MIN_SECTION_FIELDS {
        return Err(format!(
            "expected at least {} fields, got {}",
            MIN_SECTION_FIELDS,
            record.len()
        ));
    }

    let tag = field(record, 0);
    let kind = decode_section_kind(tag, record)?;

    // The stored id is positional only; construction assigns a fresh one.
    let _stored_id: u64 = field(record, 1)
        .parse()
        .map_err(|_| format!("invalid id {:?}", field(record, 1)))?;

    let name = field(record, 2);
    let position = parse_position(field(record, 3))?;
    let width_m = parse_f64("width_m", field(record, 4))?;
    let length_m = parse_f64("length_m", field(record, 5))?;
    let state_code = field(record, 6);
    let state = OperationalState::parse(state_code)
        .ok_or_else(|| format!("unknown operational state {:?}", state_code))?;
    let has_backup_power = parse_bool("has_backup_power", field(record, 7))?;
    let temperature_c = match field(record, 8) {
        "" => None,
        raw => Some(parse_f64("temperature_c", raw)?),
    };
    let humidity_pct = parse_f64("humidity_pct", field(record, 9))?;

    registry
        .create(
            kind,
            name,
            position,
            width_m,
            length_m,
            state,
            has_backup_power,
            temperature_c,
            humidity_pct,
        )
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn decode_section_kind(tag: &str, record: &StringRecord) -> Result<SectionKind, String> {
    match tag {
        "GENERAL" => Ok(SectionKind::General),
        "TEMP_CONTROLLED" => {
            if record.len() < VARIANT_SECTION_FIELDS {
                return Err(format!(
                    "expected {} fields for a TEMP_CONTROLLED record, got {}",
                    VARIANT_SECTION_FIELDS,
                    record.len()
                ));
            }
            let min_c = parse_f64("min_c", field(record, 10))?;
            let max_c = parse_f64("max_c", field(record, 11))?;
            SectionKind::temperature_controlled(min_c, max_c).map_err(|e| e.to_string())
        }
        "HAZARDOUS" => {
            if record.len() < VARIANT_SECTION_FIELDS {
                return Err(format!(
                    "expected {} fields for a HAZARDOUS record, got {}",
                    VARIANT_SECTION_FIELDS,
                    record.len()
                ));
            }
            let categories = parse_categories(field(record, 10))?;
            let forced_ventilation = parse_bool("forced_ventilation", field(record, 11))?;
            SectionKind::hazardous(categories, forced_ventilation).map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown record tag {:?}", tag)),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| format!("invalid date {:?}", raw))
}

fn parse_f64(name: &str, raw: &str) -> Result<f64, String> {
    raw.parse()
        .map_err(|_| format!("invalid {} value {:?}", name, raw))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(format!("invalid {} flag {:?} (expected 0 or 1)", name, raw)),
    }
}

/// Sub-split the composite position slot. Missing or unparsable components
/// are substituted with placeholders rather than failing the whole record -
/// documented lossy recovery, surfaced in the log.
fn parse_position(raw: &str) -> Result<Position, String> {
    let parts: Vec<&str> = raw.split(POSITION_DELIMITER).collect();
    let mut defaulted = false;

    let building = match parts.first().map(|p| p.trim()) {
        Some(b) if !b.is_empty() => b,
        _ => {
            defaulted = true;
            "UNKNOWN"
        }
    };
    let aisle = match parts.get(1).map(|p| p.trim()) {
        Some(a) if !a.is_empty() => a,
        _ => {
            defaulted = true;
            "X"
        }
    };
    let row = match parts.get(2).and_then(|p| p.trim().parse::<u32>().ok()) {
        Some(r) if r > 0 => r,
        _ => {
            defaulted = true;
            1
        }
    };

    if defaulted {
        warn!(
            "position {:?}: missing or invalid components, placeholders substituted",
            raw
        );
    }

    Position::new(building, aisle, row).map_err(|e| e.to_string())
}

fn parse_categories(raw: &str) -> Result<BTreeSet<HazardCategory>, String> {
    let mut categories = BTreeSet::new();
    for code in raw
        .split(CATEGORY_DELIMITER)
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let category = HazardCategory::parse(code)
            .ok_or_else(|| format!("unknown hazard category {:?}", code))?;
        categories.insert(category);
    }
    Ok(categories)
}

// ============================================================================
// TESTS
// ============================================================================
