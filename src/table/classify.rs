use super::patterns::{TablePatterns, mentions_total};
use super::{DelimiterStrategy, RowRole};

/// One body line as seen by the classifier. `raw_cells` keeps blank
/// positions, `cells` holds only the non-empty ones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowShape<'a> {
    pub(crate) line: &'a str,
    pub(crate) raw_cells: &'a [String],
    pub(crate) cells: &'a [String],
    pub(crate) delimiter: DelimiterStrategy,
}

type RowPredicate = fn(&RowShape<'_>, &TablePatterns) -> bool;

const TOTAL_PREDICATES: [RowPredicate; 3] = [
    line_mentions_total,
    cell_mentions_total,
    blank_leading_cell_with_number,
];

const SECTION_PREDICATES: [RowPredicate; 3] = [
    single_cell,
    label_without_second_column,
    cell_has_section_marker,
];

/// Total takes precedence over SectionHeader; anything else is Data.
pub(crate) fn classify_row(shape: &RowShape<'_>, patterns: &TablePatterns) -> RowRole {
    if is_total_row(shape, patterns) {
        RowRole::Total
    } else if is_section_header_row(shape, patterns) {
        RowRole::SectionHeader
    } else {
        RowRole::Data
    }
}

pub(crate) fn is_total_row(shape: &RowShape<'_>, patterns: &TablePatterns) -> bool {
    TOTAL_PREDICATES
        .iter()
        .any(|predicate| predicate(shape, patterns))
}

pub(crate) fn is_section_header_row(shape: &RowShape<'_>, patterns: &TablePatterns) -> bool {
    SECTION_PREDICATES
        .iter()
        .any(|predicate| predicate(shape, patterns))
}

fn line_mentions_total(shape: &RowShape<'_>, _: &TablePatterns) -> bool {
    mentions_total(shape.line)
}

fn cell_mentions_total(shape: &RowShape<'_>, _: &TablePatterns) -> bool {
    shape.cells.iter().any(|cell| mentions_total(cell))
}

// Unlabelled footer rows in pipe tables: `| | | 12,000 |`.
fn blank_leading_cell_with_number(shape: &RowShape<'_>, patterns: &TablePatterns) -> bool {
    shape.delimiter == DelimiterStrategy::Pipe
        && shape
            .raw_cells
            .first()
            .is_some_and(|cell| cell.is_empty())
        && shape
            .raw_cells
            .iter()
            .any(|cell| patterns.contains_number(cell))
}

fn single_cell(shape: &RowShape<'_>, _: &TablePatterns) -> bool {
    shape.cells.len() == 1
}

// Also fires on genuine data rows whose second column is blank.
fn label_without_second_column(shape: &RowShape<'_>, _: &TablePatterns) -> bool {
    shape.raw_cells.len() > 1 && !shape.raw_cells[0].is_empty() && shape.raw_cells[1].is_empty()
}

fn cell_has_section_marker(shape: &RowShape<'_>, patterns: &TablePatterns) -> bool {
    shape
        .cells
        .iter()
        .any(|cell| patterns.is_section_marker(cell))
}
