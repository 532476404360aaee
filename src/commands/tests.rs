use std::fs;
use std::path::PathBuf;

use takeoff_table::table::{ExportKind, FormatOptions, ProjectInfo, RowRole, TableParser};

use super::export::{
    ExportRequest, NO_DATA_MESSAGE, export_run_id, export_text, prepare_export_dir,
};
use super::parse::{build_report, render_report};

const BOQ_TEXT: &str = "Here is the BOQ:

| Item Code | Description | Unit | Quantity | Rate (LKR) | Amount (LKR) |
|-----------|-------------|------|----------|------------|--------------|
| A. Substructure | | | | | |
| 1.1 | Excavation, trenches | m3 | 100 | 1,500 | 150,000 |
| | | | | | 150,000 |
| Grand Total | | | | | 150,000 |";

fn parser() -> TableParser {
    TableParser::new().expect("patterns compile")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "takeoff-table-{name}-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn build_report_for_structured_text_includes_display_model() {
    let report = build_report(&parser(), BOQ_TEXT, "boq.txt", FormatOptions::default());

    assert!(report.structured);
    assert_eq!(report.row_count, 4);
    assert!(report.raw_text.is_none());

    let display = report.display.as_ref().expect("display model");
    assert_eq!(display.rows[0].role, RowRole::SectionHeader);
    assert!(display.rows[0].spans_all_columns);
    assert_eq!(display.rows[1].cells[5].text, "LKR 150,000");
    assert_eq!(display.rows[2].role, RowRole::Total);
    assert_eq!(display.rows[3].role, RowRole::Total);
    assert!(display.has_totals_footer);

    let rendered = render_report(&report);
    assert!(rendered.starts_with("| Item Code | Description |"));
    assert!(rendered.ends_with("All prices shown in Sri Lankan Rupees (LKR)"));
}

#[test]
fn build_report_for_unstructured_text_keeps_raw_text() {
    let text = "The drawing could not be read.\n";

    let report = build_report(&parser(), text, "-", FormatOptions::default());

    assert!(!report.structured);
    assert!(report.display.is_none());
    assert_eq!(report.delimiter, None);
    assert_eq!(report.raw_text.as_deref(), Some(text));
    assert_eq!(render_report(&report), "The drawing could not be read.");
    assert_eq!(report.source_sha256.len(), 64);
}

#[test]
fn export_text_writes_sheets_and_manifest() {
    let output_dir = scratch_dir("export");
    let project = ProjectInfo {
        project_name: Some("Galle Villa".to_string()),
        location: Some("Galle".to_string()),
        client: None,
    };
    let options = FormatOptions::default();
    let request = ExportRequest {
        source: "boq.txt",
        source_name: Some("villa-plan.png"),
        kind: ExportKind::BillOfQuantities,
        project: &project,
        options: &options,
        output_dir: &output_dir,
    };

    let manifest = export_text(&parser(), BOQ_TEXT, &request).expect("export succeeds");

    assert_eq!(manifest.suggested_file_name, "villa-plan_BOQ.xlsx");
    assert_eq!(manifest.data_row_count, 4);
    assert_eq!(manifest.total_row_count, 2);
    assert_eq!(manifest.currency, "Sri Lankan Rupees (LKR)");
    assert_eq!(manifest.sheets.len(), 2);
    assert_eq!(manifest.sheets[0].name, "Bill of Quantities");
    assert_eq!(manifest.sheets[0].row_count, 5);
    assert_eq!(manifest.sheets[1].name, "Project Info");

    let boq_csv = fs::read_to_string(&manifest.sheets[0].csv_path).expect("read boq csv");
    let mut lines = boq_csv.lines();
    assert_eq!(
        lines.next(),
        Some("Item Code,Description,Unit,Quantity,Rate (LKR),Amount (LKR)")
    );
    assert_eq!(lines.next(), Some("A. Substructure"));
    assert_eq!(
        lines.next(),
        Some("1.1,\"Excavation, trenches\",m3,100,\"1,500\",\"150,000\"")
    );

    let info_csv = fs::read_to_string(&manifest.sheets[1].csv_path).expect("read info csv");
    assert!(info_csv.contains("Project Name,Galle Villa"));
    assert!(info_csv.contains("Client,Not specified"));

    let manifest_path = output_dir
        .join(&manifest.run_id)
        .join("export_manifest.json");
    let raw = fs::read(&manifest_path).expect("read manifest");
    let value: serde_json::Value = serde_json::from_slice(&raw).expect("parse manifest");
    assert_eq!(value["kind"], "bill_of_quantities");
    assert_eq!(value["sheets"][0]["column_widths"][1], 40);

    fs::remove_dir_all(&output_dir).ok();
}

#[test]
fn export_text_reports_no_data_without_writing_files() {
    let output_dir = scratch_dir("no-data");
    let project = ProjectInfo::default();
    let options = FormatOptions::default();
    let request = ExportRequest {
        source: "empty.txt",
        source_name: None,
        kind: ExportKind::TakeOff,
        project: &project,
        options: &options,
        output_dir: &output_dir,
    };

    let err = export_text(&parser(), "", &request).expect_err("nothing to export");

    assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    let entries = fs::read_dir(&output_dir).expect("read output dir").count();
    assert_eq!(entries, 0);

    fs::remove_dir_all(&output_dir).ok();
}

#[test]
fn export_run_id_carries_source_digest_prefix() {
    let first = export_run_id("20261018T101500Z", &takeoff_table::util::sha256_text("a"));
    let second = export_run_id("20261018T101500Z", &takeoff_table::util::sha256_text("b"));

    assert!(first.starts_with("export-20261018T101500Z-"));
    assert_eq!(first.len(), "export-20261018T101500Z-".len() + 8);
    assert_ne!(first, second);
}

#[test]
fn export_text_run_id_matches_source_digest() {
    let output_dir = scratch_dir("run-id");
    let project = ProjectInfo::default();
    let options = FormatOptions::default();
    let request = ExportRequest {
        source: "boq.txt",
        source_name: None,
        kind: ExportKind::TakeOff,
        project: &project,
        options: &options,
        output_dir: &output_dir,
    };

    let manifest = export_text(&parser(), BOQ_TEXT, &request).expect("export succeeds");

    assert!(manifest.run_id.ends_with(&manifest.source_sha256[..8]));

    fs::remove_dir_all(&output_dir).ok();
}

#[test]
fn prepare_export_dir_refuses_existing_run_directory() {
    let output_dir = scratch_dir("existing-run");

    let created = prepare_export_dir(&output_dir, "export-1").expect("first run");
    assert!(created.is_dir());

    let err = prepare_export_dir(&output_dir, "export-1").expect_err("second run refused");
    assert!(err.to_string().contains("already exists"));

    fs::remove_dir_all(&output_dir).ok();
}
