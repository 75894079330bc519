//! End-to-end pipeline tests
//!
//! Each test runs the coordinator against tempfile sandboxes with mail
//! delivery disabled, exercising the full read → normalize → stage path and
//! the fatal freshness/write branches.

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, Local};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use spw_export::config::{
    ApplicationConfig, ExtractConfig, LoggingConfig, MailConfig, SpwConfig, StagingConfig,
};
use spw_export::core::pipeline::{exit, exit_code_for, RunCoordinator, RunOutcome};
use spw_export::domain::SpwError;
use std::path::Path;
use tempfile::TempDir;

/// Config pointing at sandbox directories, delivery disabled
fn sandbox_config(extract_dir: &Path, staging_dir: &Path) -> SpwConfig {
    SpwConfig {
        application: ApplicationConfig {
            log_level: "info".to_string(),
        },
        extract: ExtractConfig {
            input_dir: extract_dir.to_string_lossy().into_owned(),
        },
        staging: StagingConfig {
            dir: staging_dir.to_string_lossy().into_owned(),
        },
        mail: MailConfig {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: 587,
            username: None,
            password: None,
            from: String::new(),
            to: vec![],
            subject_prefix: "SPW Report".to_string(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Write an extract matching the upstream layout: one row with a missing
/// mbl_pri_ref, a date-typed ship_start_date, and blank remaining dates.
fn write_sample_extract(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "SKIP",
        "mbl_pri_ref",
        "mbl_addl_ref",
        "shipment_pri_ref",
        "ship_start_date",
        "ship_end_date",
        "delivery_start_date",
        "delivery_end_date",
    ];
    for (col, name) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }

    worksheet.write_string(1, 0, "x").unwrap();
    // col 1 (mbl_pri_ref) left empty: missing, to be backfilled
    worksheet.write_string(1, 2, "REF123").unwrap();
    worksheet.write_string(1, 3, "S1").unwrap();

    let date_format = Format::new().set_num_format("mm/dd/yyyy");
    let ship_start = ExcelDateTime::from_ymd(2024, 5, 1).unwrap();
    worksheet
        .write_datetime_with_format(1, 4, &ship_start, &date_format)
        .unwrap();
    // cols 5-7 (remaining date columns) left empty: must render as ""

    workbook.save(path).unwrap();
}

fn staged_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

#[test]
fn test_fresh_run_stages_exactly_one_normalized_report() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    write_sample_extract(&extract_dir.path().join("spw_load_export.xlsx"));

    // Two stale leftovers that the run must clear first
    std::fs::write(staging_dir.path().join("leftover1.xlsx"), b"stale").unwrap();
    std::fs::write(staging_dir.path().join("leftover2.xlsx"), b"stale").unwrap();

    let config = sandbox_config(extract_dir.path(), staging_dir.path());
    let outcome = RunCoordinator::new(config).execute().unwrap();

    assert!(matches!(outcome, RunOutcome::DeliverySkipped { .. }));

    // Exactly one file, named after the source extract
    let staged = staged_files(staging_dir.path());
    assert_eq!(staged.len(), 1);
    assert_eq!(
        staged[0].file_name().unwrap().to_string_lossy(),
        "spw_load_export.xlsx"
    );

    // Read the staged report back and verify the normalized row
    let mut workbook = open_workbook_auto(&staged[0]).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let rows: Vec<_> = range.rows().collect();

    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header[0], "#SKIP");

    let cell = |name: &str| -> String {
        let idx = header.iter().position(|h| h == name).unwrap();
        match &rows[1].get(idx) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Empty) | None => String::new(),
            Some(other) => panic!("cell {name} is not a string: {other:?}"),
        }
    };

    assert_eq!(cell("#SKIP"), "x");
    assert_eq!(cell("mbl_pri_ref"), "REF123");
    assert_eq!(cell("mbl_addl_ref"), "REF123");
    assert_eq!(cell("shipment_pri_ref"), "S1");
    assert_eq!(cell("ship_start_date"), "5/1/2024");
    assert_eq!(cell("ship_end_date"), "");
    assert_eq!(cell("delivery_start_date"), "");
    assert_eq!(cell("delivery_end_date"), "");
}

#[test]
fn test_stale_extract_aborts_without_staging() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    // The extract exists, but from tomorrow's perspective it is a day old
    write_sample_extract(&extract_dir.path().join("spw_load_export.xlsx"));
    let tomorrow = Local::now().date_naive() + Duration::days(1);

    let config = sandbox_config(extract_dir.path(), staging_dir.path());
    let err = RunCoordinator::new(config)
        .with_today(tomorrow)
        .execute()
        .unwrap_err();

    assert!(matches!(err, SpwError::Freshness(_)));
    assert_eq!(exit_code_for(&err), exit::STALE);

    // No staged file was produced
    assert!(staged_files(staging_dir.path()).is_empty());
}

#[test]
fn test_empty_extract_directory_aborts() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    let config = sandbox_config(extract_dir.path(), staging_dir.path());
    let err = RunCoordinator::new(config).execute().unwrap_err();

    assert!(matches!(err, SpwError::Freshness(_)));
    assert_eq!(exit_code_for(&err), exit::STALE);
}

#[test]
fn test_two_same_day_extracts_abort() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    write_sample_extract(&extract_dir.path().join("first.xlsx"));
    write_sample_extract(&extract_dir.path().join("second.xlsx"));

    let config = sandbox_config(extract_dir.path(), staging_dir.path());
    let err = RunCoordinator::new(config).execute().unwrap_err();

    assert!(matches!(err, SpwError::Freshness(_)));
    assert!(staged_files(staging_dir.path()).is_empty());
}

#[test]
fn test_delivery_skip_flag_stages_without_sending() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    write_sample_extract(&extract_dir.path().join("spw_load_export.xlsx"));

    // Mail nominally enabled, but the operator asked to skip delivery;
    // no SMTP connection may be attempted
    let mut config = sandbox_config(extract_dir.path(), staging_dir.path());
    config.mail.enabled = true;
    config.mail.smtp_host = "smtp.invalid".to_string();

    let outcome = RunCoordinator::new(config)
        .with_delivery_skipped(true)
        .execute()
        .unwrap();

    assert!(matches!(outcome, RunOutcome::DeliverySkipped { .. }));
    assert_eq!(staged_files(staging_dir.path()).len(), 1);
}

#[test]
fn test_rerun_replaces_previous_report() {
    let extract_dir = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();

    write_sample_extract(&extract_dir.path().join("spw_load_export.xlsx"));
    let config = sandbox_config(extract_dir.path(), staging_dir.path());
    let coordinator = RunCoordinator::new(config);

    coordinator.execute().unwrap();
    coordinator.execute().unwrap();

    // The zero-or-one invariant holds across runs
    assert_eq!(staged_files(staging_dir.path()).len(), 1);
}
