use super::classify::{RowShape, classify_row};
use super::patterns::{TablePatterns, is_divider_line, is_header_line, strip_markup};
use super::{DelimiterStrategy, ParsedRow, ParsedTable};

pub(crate) fn parse_table(raw: &str, patterns: &TablePatterns) -> ParsedTable {
    let lines = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();

    let Some(header_index) = lines.iter().position(|line| is_header_line(line)) else {
        return ParsedTable::default();
    };

    let header_line = lines[header_index];
    let delimiter = DelimiterStrategy::for_header_line(header_line);
    let headers = non_empty_cells(&split_raw_cells(header_line, delimiter, patterns));

    let mut rows = Vec::<ParsedRow>::new();
    for &line in &lines[header_index + 1..] {
        if is_divider_line(line) {
            continue;
        }

        let raw_cells = split_raw_cells(line, delimiter, patterns);
        let cells = non_empty_cells(&raw_cells);
        if cells.is_empty() {
            continue;
        }

        let shape = RowShape {
            line,
            raw_cells: &raw_cells,
            cells: &cells,
            delimiter,
        };
        let role = classify_row(&shape, patterns);
        rows.push(ParsedRow { cells, role });
    }

    ParsedTable {
        headers,
        rows,
        delimiter: Some(delimiter),
    }
}

/// Splits a line into cleaned cells, keeping empty positions so that blank
/// columns stay visible to the classifier.
pub(crate) fn split_raw_cells(
    line: &str,
    delimiter: DelimiterStrategy,
    patterns: &TablePatterns,
) -> Vec<String> {
    let trimmed = line.trim();

    match delimiter {
        DelimiterStrategy::Pipe => {
            let mut content = trimmed;
            if let Some(without_leading) = content.strip_prefix('|') {
                content = without_leading;
            }
            if let Some(without_trailing) = content.strip_suffix('|') {
                content = without_trailing;
            }

            content.split('|').map(strip_markup).collect()
        }
        DelimiterStrategy::WhitespaceRun => patterns
            .whitespace_run()
            .split(trimmed)
            .map(strip_markup)
            .collect(),
    }
}

fn non_empty_cells(raw_cells: &[String]) -> Vec<String> {
    raw_cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .cloned()
        .collect()
}
