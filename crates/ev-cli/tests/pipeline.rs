//! End-to-end runs of the build pipeline over source files on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ev_cli::pipeline::{output, run_pipeline, write_issues_json};
use ev_model::{
    AllocationPolicy, IssueKind, PipelineConfig, QualityReport, SourceKind, WheelerCategory,
};

const VEHICLE_SALES: &str = "Sl. No.,State Name,Two Wheeler,Three Wheeler,Four Wheeler\n\
                             1,Maharastra,600000,50000,5000\n\
                             2,Delhi,400000,40000,4000\n\
                             3,Bihar,NA,NA,NA\n\
                             4,Kerala,NA,NA,NA\n\
                             5,Leh,NA,NA,NA\n";

const NATIONAL_SALES: &str = "Category,2022,2023\n\
                              2 Wheelers,631464,859376\n\
                              3 Wheelers,352710,582793\n\
                              Passenger Vehicles,38240,82105\n";

const ENERGY: &str = "Years,Energy Requirement\n2024-25,1000\n2025-26,2000\n2026-27,3000\n\
                      2027-28,4000\n2028-29,5000\n2029-30,6000\n";

fn write_sources(dir: &Path, overrides: &[(SourceKind, &str)]) {
    let defaults = [
        (SourceKind::VehicleCategorySales, VEHICLE_SALES),
        (
            SourceKind::RetailOutletCharging,
            "State/UT,No of RO's where EV Charging Facility available\nDelhi,12\n",
        ),
        (
            SourceKind::PcsFeb2024,
            "State/UT,No. of Operational PCS\nPondicherry,4\n",
        ),
        (SourceKind::NationalCategorySales, NATIONAL_SALES),
        (
            SourceKind::HighwayChargers,
            "State/UT,Number of Charges on Highway\nDelhi,3\n",
        ),
        (
            SourceKind::PcsMar2024,
            "State/UT,No. of PCS as on 31st March 2024\nPuducherry,5\n",
        ),
        (SourceKind::EnergyRequirement, ENERGY),
        (
            SourceKind::TotalEvSales,
            "State Name,Total EV,% of Share of EV in Total Vehicles Sold\n\
             Maharastra,700000,5.0\n\
             Delhi,450000,6.0\n\
             Bihar,30000,2.0\n\
             Kerala,50000,3.0\n\
             Pondicherry,100,1.0\n\
             Leh,10,0.1\n",
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

fn config_for(dir: &TempDir) -> PipelineConfig {
    PipelineConfig::default()
        .with_input_dir(dir.path())
        .with_output_path(dir.path().join("market.csv"))
}

#[test]
fn builds_the_market_table() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path(), &[]);
    let config = config_for(&dir);

    let mut run = run_pipeline(&config).expect("run pipeline");

    let states: Vec<&str> = run.records.iter().map(|r| r.state.as_str()).collect();
    assert_eq!(states, vec!["Bihar", "Delhi", "Kerala", "Maharashtra", "Puducherry"]);
    assert_eq!(run.excluded, vec!["Leh".to_string()]);
    assert!(!run.report.has_errors(), "{:?}", run.report.issues);

    let kerala = &run.records[2];
    assert_eq!(kerala.cumulative(WheelerCategory::TwoWheeler), Some(40_000.0));
    let puducherry = &run.records[4];
    assert_eq!(puducherry.pcs_feb_2024, Some(4.0));
    assert_eq!(puducherry.pcs_mar_2024, Some(5.0));
    assert!(puducherry.cumulative(WheelerCategory::TwoWheeler).is_some());

    let national = [
        (WheelerCategory::TwoWheeler, [631_464.0, 859_376.0]),
        (WheelerCategory::ThreeWheeler, [352_710.0, 582_793.0]),
        (WheelerCategory::FourWheeler, [38_240.0, 82_105.0]),
    ];
    for (category, years) in national {
        for (year, expected) in years.into_iter().enumerate() {
            let allocated: f64 = run
                .records
                .iter()
                .filter_map(|r| r.yearly_sales.get(category).values()[year])
                .sum();
            assert!(
                (allocated - expected).abs() <= expected * 1e-9,
                "{category} year {year}: {allocated} != {expected}"
            );
        }
    }

    let path = output(&mut run.frame, &config).expect("write output");
    let written = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("State/UT,Total EVs Sold,EV Penetration (%)"));
    assert!(!written.contains("Leh"));
    for line in &lines[1..] {
        assert!(line.ends_with(",1000,2000,3000,4000,5000,6000"), "{line}");
    }
    let delhi = lines[2];
    assert!(delhi.starts_with("Delhi,450000,6,400000,40000,4000,"), "{delhi}");
}

#[test]
fn pipeline_run_does_not_write_output() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path(), &[]);
    let config = config_for(&dir);

    let run = run_pipeline(&config).expect("run pipeline");

    assert_eq!(run.frame.height(), 5);
    assert!(!config.output_path.exists());
}

#[test]
fn zero_category_total_is_an_error_issue() {
    let dir = TempDir::new().unwrap();
    write_sources(
        dir.path(),
        &[
            (
                SourceKind::VehicleCategorySales,
                "State Name,Two Wheeler,Three Wheeler,Four Wheeler\n\
                 Delhi,400000,40000,0\n\
                 Bihar,NA,NA,NA\n",
            ),
            (
                SourceKind::NationalCategorySales,
                "Category,2022,2023\n2 Wheelers,631464,859376\n3 Wheelers,352710,582793\n\
                 Passenger Vehicles,0,0\n",
            ),
        ],
    );
    let config = config_for(&dir).with_allocation(AllocationPolicy::proportional_only());

    let run = run_pipeline(&config).expect("run pipeline");

    assert!(run.report.has_errors());
    let zero = run
        .report
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::ZeroDenominator)
        .expect("zero denominator issue");
    assert_eq!(zero.column.as_deref(), Some("Four Wheeler Sales (Cumulative)"));
    assert!(
        run.records
            .iter()
            .all(|r| r.yearly_sales.four_wheeler.first.is_none())
    );
}

#[test]
fn missing_energy_year_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_sources(
        dir.path(),
        &[(
            SourceKind::EnergyRequirement,
            "Years,Energy Requirement\n2024-25,1000\n2025-26,2000\n",
        )],
    );

    let err = run_pipeline(&config_for(&dir)).unwrap_err();

    assert!(format!("{err:#}").contains("2026-27"));
}

#[test]
fn issues_are_written_as_json() {
    let dir = TempDir::new().unwrap();
    write_sources(
        dir.path(),
        &[(
            SourceKind::TotalEvSales,
            "State Name,Total EV,% of Share of EV in Total Vehicles Sold\n\
             Delhi,450000,six\n\
             Bihar,30000,2.0\n",
        )],
    );
    let config = config_for(&dir);
    let run = run_pipeline(&config).expect("run pipeline");
    let path = dir.path().join("issues.json");

    write_issues_json(&path, &run.report).expect("write issues");

    let report: QualityReport =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.kind == IssueKind::UnparseableNumeric)
    );
}
