//! Integration tests for loading the source catalogue from disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ev_common::column_string_values;
use ev_ingest::{IngestError, StateColumn, load_sources, read_energy_projections};
use ev_model::{IssueKind, PipelineConfig, STATE_COLUMN, SourceKind};

fn write_sources(dir: &Path, overrides: &[(SourceKind, &str)]) {
    let defaults = [
        (
            SourceKind::VehicleCategorySales,
            "Sl. No.,State Name,Two Wheeler,Three Wheeler,Four Wheeler\n\
             1,Maharastra,5000,700,300\n\
             2,Goa,NA,NA,NA\n",
        ),
        (
            SourceKind::RetailOutletCharging,
            "State/UT,No of RO's where EV Charging Facility available\nGoa,12\n",
        ),
        (
            SourceKind::PcsFeb2024,
            "State/UT,No. of Operational PCS\nPondicherry,4\n",
        ),
        (
            SourceKind::NationalCategorySales,
            "Category,2022,2023\n2 Wheelers,631464,859376\n3 Wheelers,352710,582793\n\
             Passenger Vehicles,38240,82105\n",
        ),
        (
            SourceKind::HighwayChargers,
            "State/UT,Number of Charges on Highway\nGoa,3\n",
        ),
        (
            SourceKind::PcsMar2024,
            "State/UT,No. of PCS as on 31st March 2024\nPuducherry,5\n",
        ),
        (
            SourceKind::EnergyRequirement,
            "Years,Energy Requirement\n2024-25,1000\n2025-26,2000\n2026-27,3000\n\
             2027-28,4000\n2028-29,5000\n2029-30,6000\n",
        ),
        (
            SourceKind::TotalEvSales,
            "State Name,Total EV,% of Share of EV in Total Vehicles Sold\nGoa,900,4.5\n",
        ),
    ];
    for (kind, contents) in defaults {
        let contents = overrides
            .iter()
            .find(|(override_kind, _)| *override_kind == kind)
            .map_or(contents, |(_, replacement)| *replacement);
        fs::write(dir.join(kind.default_file_name()), contents).expect("write source");
    }
}

#[test]
fn loads_and_normalizes_every_source() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path(), &[]);
    let config = PipelineConfig::default().with_input_dir(dir.path());

    let loaded = load_sources(&config).expect("load sources");

    assert_eq!(loaded.frames.len(), 8);
    assert!(loaded.issues.is_empty());
    assert_eq!(loaded.merged().len(), 6);

    let vehicle = loaded.get(SourceKind::VehicleCategorySales).unwrap();
    assert!(matches!(vehicle.state_column, StateColumn::Renamed { .. }));
    assert_eq!(
        column_string_values(&vehicle.frame, STATE_COLUMN).unwrap(),
        vec!["Maharashtra", "Goa"]
    );
    let pcs = loaded.get(SourceKind::PcsFeb2024).unwrap();
    assert_eq!(
        column_string_values(&pcs.frame, STATE_COLUMN).unwrap(),
        vec!["Puducherry"]
    );

    let energy = loaded.get(SourceKind::EnergyRequirement).unwrap();
    assert_eq!(energy.state_column, StateColumn::Missing);
    let projections = read_energy_projections(&energy.frame).unwrap();
    assert_eq!(projections.get("2029-30"), Some(Some(6000.0)));
}

#[test]
fn per_state_source_without_identifier_is_reported() {
    let dir = TempDir::new().unwrap();
    write_sources(
        dir.path(),
        &[(SourceKind::HighwayChargers, "Region,Number of Charges on Highway\nWest,3\n")],
    );
    let config = PipelineConfig::default().with_input_dir(dir.path());

    let loaded = load_sources(&config).expect("load sources");

    assert_eq!(loaded.issues.len(), 1);
    assert_eq!(loaded.issues[0].kind, IssueKind::SchemaMissing);
    assert_eq!(loaded.issues[0].column.as_deref(), Some("highway-chargers"));
}

#[test]
fn missing_file_names_the_source() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path(), &[]);
    fs::remove_file(dir.path().join(SourceKind::TotalEvSales.default_file_name())).unwrap();
    let config = PipelineConfig::default().with_input_dir(dir.path());

    let err = load_sources(&config).unwrap_err();

    assert!(matches!(
        err,
        IngestError::FileNotFound {
            kind: SourceKind::TotalEvSales,
            ..
        }
    ));
}
