//! Attaches the national energy requirement projections to every state row.

use tracing::info;

use ev_model::{EnergyProjections, StateRecord};

use crate::error::{Result, TransformError};

/// Copies the projection for each label in `years` onto every record. The
/// values are national figures and are identical across rows.
///
/// Fails when a requested year is absent from the projections. A year that is
/// present but has no usable value is carried as unset.
pub fn attach_energy_projections(
    records: &[StateRecord],
    projections: &EnergyProjections,
    years: &[String],
) -> Result<Vec<StateRecord>> {
    let values = years
        .iter()
        .map(|year| {
            projections
                .get(year)
                .ok_or_else(|| TransformError::MissingEnergyYear {
                    label: year.clone(),
                })
        })
        .collect::<Result<Vec<Option<f64>>>>()?;

    info!(
        years = values.len(),
        unset = values.iter().filter(|value| value.is_none()).count(),
        "attached energy requirement projections"
    );
    Ok(records
        .iter()
        .map(|record| StateRecord {
            energy_requirement_gwh: values.clone(),
            ..record.clone()
        })
        .collect())
}
