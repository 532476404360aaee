use serde::Serialize;

use super::ParsedTable;
use super::format::{ColumnRole, FormatOptions};

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportMatrix {
    pub rows: Vec<Vec<String>>,
    /// Advisory widths, one per header; consumed by the spreadsheet writer.
    pub column_widths: Vec<Option<u16>>,
}

/// Result of preparing a table for export. `NoData` is distinct from a
/// matrix that happens to hold only headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Ready(ExportMatrix),
    NoData,
}

impl ExportOutcome {
    pub fn into_matrix(self) -> Option<ExportMatrix> {
        match self {
            ExportOutcome::Ready(matrix) => Some(matrix),
            ExportOutcome::NoData => None,
        }
    }
}

pub fn to_export_matrix(table: &ParsedTable) -> ExportOutcome {
    if table.rows.is_empty() {
        return ExportOutcome::NoData;
    }

    let mut rows = Vec::<Vec<String>>::with_capacity(table.rows.len() + 1);
    if let Some(header_row) = table.header_row() {
        rows.push(header_row.cells);
    }
    rows.extend(table.rows.iter().map(|row| row.cells.clone()));

    let column_widths = table
        .headers
        .iter()
        .map(|header| ColumnRole::from_header(header).suggested_width())
        .collect();

    ExportOutcome::Ready(ExportMatrix {
        rows,
        column_widths,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    TakeOff,
    BillOfQuantities,
}

impl ExportKind {
    pub fn sheet_name(self) -> &'static str {
        match self {
            ExportKind::TakeOff => "Quantities",
            ExportKind::BillOfQuantities => "Bill of Quantities",
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            ExportKind::TakeOff => "_quantities.xlsx",
            ExportKind::BillOfQuantities => "_BOQ.xlsx",
        }
    }

    fn default_file_name(self) -> &'static str {
        match self {
            ExportKind::TakeOff => "drawing_quantities.xlsx",
            ExportKind::BillOfQuantities => "Sri_Lankan_Construction_BOQ.xlsx",
        }
    }
}

/// Download name for an export: the source name up to its first `.`, plus a
/// kind-specific suffix.
pub fn suggested_file_name(source_name: Option<&str>, kind: ExportKind) -> String {
    let stem = source_name
        .map(str::trim)
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty());

    match stem {
        Some(stem) => format!("{stem}{}", kind.file_suffix()),
        None => kind.default_file_name().to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub project_name: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<Option<u16>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportWorkbook {
    pub file_name: String,
    pub sheets: Vec<ExportSheet>,
}

/// Assembles the sheets handed to a spreadsheet writer. Returns `None` when
/// the table has nothing to export.
pub fn build_workbook(
    table: &ParsedTable,
    kind: ExportKind,
    source_name: Option<&str>,
    project: &ProjectInfo,
    options: &FormatOptions,
    generated_on: &str,
) -> Option<ExportWorkbook> {
    let matrix = to_export_matrix(table).into_matrix()?;

    let mut sheets = vec![ExportSheet {
        name: kind.sheet_name().to_string(),
        rows: matrix.rows,
        column_widths: matrix.column_widths,
    }];

    if kind == ExportKind::BillOfQuantities {
        sheets.push(project_info_sheet(project, options, generated_on));
    }

    Some(ExportWorkbook {
        file_name: suggested_file_name(source_name, kind),
        sheets,
    })
}

fn project_info_sheet(
    project: &ProjectInfo,
    options: &FormatOptions,
    generated_on: &str,
) -> ExportSheet {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(NOT_SPECIFIED)
            .to_string()
    };

    ExportSheet {
        name: "Project Info".to_string(),
        rows: vec![
            vec!["Project Information".to_string()],
            vec!["Project Name".to_string(), field(&project.project_name)],
            vec!["Location".to_string(), field(&project.location)],
            vec!["Client".to_string(), field(&project.client)],
            vec!["Date Generated".to_string(), generated_on.to_string()],
            vec!["Currency".to_string(), options.currency_description()],
        ],
        column_widths: vec![Some(20), Some(40)],
    }
}

pub fn matrix_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape_csv_cell(cell))
                .collect::<Vec<String>>()
                .join(",")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn escape_csv_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
