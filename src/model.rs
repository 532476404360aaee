use serde::Serialize;

use crate::table::{DelimiterStrategy, DisplayModel, ExportKind, FormatOptions, ProjectInfo};

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub source: String,
    pub source_sha256: String,
    pub structured: bool,
    pub delimiter: Option<DelimiterStrategy>,
    pub row_count: usize,
    pub options: FormatOptions,
    pub display: Option<DisplayModel>,
    /// Set when no header line was found; shown verbatim by callers.
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedSheet {
    pub name: String,
    pub csv_path: String,
    pub row_count: usize,
    pub column_widths: Vec<Option<u16>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub source: String,
    pub source_sha256: String,
    pub kind: ExportKind,
    pub suggested_file_name: String,
    pub currency: String,
    pub project: ProjectInfo,
    pub data_row_count: usize,
    pub total_row_count: usize,
    pub sheets: Vec<ExportedSheet>,
}
