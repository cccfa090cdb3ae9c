//! CSV decoding for the hazard loss dataset.
//!
//! Only three columns are read: `NAME`, `PROPERTY_DAMAGE`, and
//! `HAZARD_BEGIN_DATE`. Other columns are ignored. There is no row
//! validation: unparseable damage becomes [`DamageAmount::Invalid`] and
//! unparseable dates become `None`.

use disaster_map_disaster_models::{DamageAmount, Disaster, parse_hazard_date};

use crate::DatasetError;

/// County name column.
pub const NAME_COLUMN: &str = "NAME";
/// Property damage column.
pub const PROPERTY_DAMAGE_COLUMN: &str = "PROPERTY_DAMAGE";
/// Hazard begin date column.
pub const HAZARD_BEGIN_DATE_COLUMN: &str = "HAZARD_BEGIN_DATE";

/// Parses the disaster CSV.
///
/// County names are kept verbatim. A missing `PROPERTY_DAMAGE` column or
/// cell yields an invalid amount; a missing `HAZARD_BEGIN_DATE` column or
/// cell yields no date.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if there is no `NAME` column,
/// or [`DatasetError::Csv`] if the CSV itself is malformed.
pub fn parse_disasters_csv(text: &str) -> Result<Vec<Disaster>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);

    let name_idx = column(NAME_COLUMN).ok_or(DatasetError::MissingColumn {
        column: NAME_COLUMN,
    })?;
    let damage_idx = column(PROPERTY_DAMAGE_COLUMN);
    let date_idx = column(HAZARD_BEGIN_DATE_COLUMN);

    if damage_idx.is_none() {
        log::warn!("Disaster CSV has no {PROPERTY_DAMAGE_COLUMN} column; all damage is invalid");
    }
    if date_idx.is_none() {
        log::warn!("Disaster CSV has no {HAZARD_BEGIN_DATE_COLUMN} column");
    }

    let mut disasters = Vec::new();
    let mut invalid_damage = 0_usize;
    let mut invalid_dates = 0_usize;

    for result in reader.records() {
        let record = result?;

        let name = record.get(name_idx).unwrap_or_default();

        let damage = damage_idx
            .and_then(|i| record.get(i))
            .map_or(DamageAmount::Invalid, DamageAmount::parse);
        if !damage.is_valid() {
            invalid_damage += 1;
        }

        let date = date_idx
            .and_then(|i| record.get(i))
            .and_then(parse_hazard_date);
        if date.is_none() {
            invalid_dates += 1;
        }

        disasters.push(Disaster::new(name, damage, date));
    }

    log::info!("Parsed {} disaster records", disasters.len());
    if invalid_damage > 0 {
        log::warn!("{invalid_damage} disaster records have non-numeric {PROPERTY_DAMAGE_COLUMN}");
    }
    if invalid_dates > 0 {
        log::warn!(
            "{invalid_dates} disaster records have an unparseable {HAZARD_BEGIN_DATE_COLUMN}"
        );
    }

    Ok(disasters)
}
