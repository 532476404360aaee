use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Utc;
use takeoff_table::model::{ExportManifest, ExportedSheet};
use takeoff_table::table::{
    ExportKind, FormatOptions, ProjectInfo, RowRole, TableParser, build_workbook, matrix_to_csv,
};
use takeoff_table::util::{
    ensure_directory, now_utc_string, read_input_text, sha256_text, utc_compact_string,
    write_json_pretty, write_text,
};
use tracing::{info, warn};

use crate::cli::ExportArgs;

pub(crate) const NO_DATA_MESSAGE: &str = "No data available to export";

pub(crate) struct ExportRequest<'a> {
    pub(crate) source: &'a str,
    pub(crate) source_name: Option<&'a str>,
    pub(crate) kind: ExportKind,
    pub(crate) project: &'a ProjectInfo,
    pub(crate) options: &'a FormatOptions,
    pub(crate) output_dir: &'a Path,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let source = args.input.display().to_string();
    let text = read_input_text(&args.input)?;
    let parser = TableParser::new()?;
    let project = args.project_info();
    let options = args.format_options();

    info!(source = %source, output_dir = %args.output_dir.display(), "starting export");

    let request = ExportRequest {
        source: &source,
        source_name: args.source_name.as_deref(),
        kind: args.kind.as_kind(),
        project: &project,
        options: &options,
        output_dir: &args.output_dir,
    };
    let manifest = export_text(&parser, &text, &request)?;

    info!(
        file_name = %manifest.suggested_file_name,
        sheets = manifest.sheets.len(),
        rows = manifest.data_row_count,
        "export completed"
    );

    Ok(())
}

pub(crate) fn export_text(
    parser: &TableParser,
    text: &str,
    request: &ExportRequest<'_>,
) -> Result<ExportManifest> {
    let started_ts = Utc::now();
    let source_sha256 = sha256_text(text);
    let run_id = export_run_id(&utc_compact_string(started_ts), &source_sha256);
    let generated_on = started_ts.format("%Y-%m-%d").to_string();

    let table = parser.parse(text);
    if !table.is_structured() {
        warn!(source = %request.source, "no header line found in input");
    }

    let Some(workbook) = build_workbook(
        &table,
        request.kind,
        request.source_name,
        request.project,
        request.options,
        &generated_on,
    ) else {
        warn!(source = %request.source, "nothing to export");
        bail!(NO_DATA_MESSAGE);
    };

    let export_dir = prepare_export_dir(request.output_dir, &run_id)?;

    let mut sheets = Vec::<ExportedSheet>::with_capacity(workbook.sheets.len());
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let csv_path =
            export_dir.join(format!("{:02}_{}.csv", index + 1, sheet_slug(&sheet.name)));
        write_text(&csv_path, &matrix_to_csv(&sheet.rows))?;
        info!(path = %csv_path.display(), rows = sheet.rows.len(), "wrote sheet");

        sheets.push(ExportedSheet {
            name: sheet.name.clone(),
            csv_path: csv_path.display().to_string(),
            row_count: sheet.rows.len(),
            column_widths: sheet.column_widths.clone(),
        });
    }

    let manifest = ExportManifest {
        manifest_version: 1,
        run_id,
        generated_at: now_utc_string(),
        source: request.source.to_string(),
        source_sha256,
        kind: request.kind,
        suggested_file_name: workbook.file_name,
        currency: request.options.currency_description(),
        project: request.project.clone(),
        data_row_count: table.rows.len(),
        total_row_count: table
            .rows
            .iter()
            .filter(|row| row.role == RowRole::Total)
            .count(),
        sheets,
    };

    let manifest_path = export_dir.join("export_manifest.json");
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote export manifest");

    Ok(manifest)
}

pub(crate) fn export_run_id(compact_ts: &str, source_sha256: &str) -> String {
    let digest_prefix = source_sha256.get(..8).unwrap_or(source_sha256);
    format!("export-{compact_ts}-{digest_prefix}")
}

/// Creates the run directory. A directory left by an earlier run is an error.
pub(crate) fn prepare_export_dir(output_dir: &Path, run_id: &str) -> Result<PathBuf> {
    let export_dir = output_dir.join(run_id);
    if export_dir.exists() {
        bail!("export directory already exists: {}", export_dir.display());
    }
    ensure_directory(&export_dir)?;
    Ok(export_dir)
}

fn sheet_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<String>>()
        .join("_")
}
