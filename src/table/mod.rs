//! Interpretation of loosely tabular text produced by a text-generation
//! service: row parsing and classification, display formatting, and export
//! matrices for spreadsheet writers.

use anyhow::Result;
use serde::Serialize;

mod classify;
mod export;
mod format;
mod parser;
mod patterns;

pub use export::{
    ExportKind, ExportMatrix, ExportOutcome, ExportSheet, ExportWorkbook, ProjectInfo,
    build_workbook, matrix_to_csv, suggested_file_name, to_export_matrix,
};
pub use format::{
    ColumnRole, DisplayHeader, DisplayModel, FormatOptions, FormattedCell, FormattedRow,
    render_text,
};

use patterns::TablePatterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRole {
    Header,
    Data,
    Total,
    SectionHeader,
}

/// How cells are separated within one table. Chosen once from the header
/// line and applied to every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterStrategy {
    Pipe,
    WhitespaceRun,
}

impl DelimiterStrategy {
    pub fn for_header_line(line: &str) -> Self {
        if line.contains('|') {
            DelimiterStrategy::Pipe
        } else {
            DelimiterStrategy::WhitespaceRun
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DelimiterStrategy::Pipe => "pipe",
            DelimiterStrategy::WhitespaceRun => "whitespace_run",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    pub cells: Vec<String>,
    pub role: RowRole,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
    pub delimiter: Option<DelimiterStrategy>,
}

impl ParsedTable {
    /// False when no header line was found; callers should show the raw
    /// text verbatim instead of a table.
    pub fn is_structured(&self) -> bool {
        !self.headers.is_empty()
    }

    /// The header line as a row tagged `Header`, if one was detected.
    pub fn header_row(&self) -> Option<ParsedRow> {
        self.is_structured().then(|| ParsedRow {
            cells: self.headers.clone(),
            role: RowRole::Header,
        })
    }

    pub fn has_totals(&self) -> bool {
        self.rows.iter().any(|row| row.role == RowRole::Total)
    }
}

/// Entry point for parsing and formatting. Holds only compiled patterns, so
/// one instance can be reused across calls and threads.
#[derive(Debug, Clone)]
pub struct TableParser {
    patterns: TablePatterns,
}

impl TableParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: TablePatterns::new()?,
        })
    }

    pub fn parse(&self, raw: &str) -> ParsedTable {
        parser::parse_table(raw, &self.patterns)
    }

    pub fn display_model(&self, table: &ParsedTable, options: &FormatOptions) -> DisplayModel {
        format::to_display_model(table, options, &self.patterns)
    }
}
