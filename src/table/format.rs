use serde::Serialize;

use super::patterns::TablePatterns;
use super::{ParsedRow, ParsedTable, RowRole};

pub const DEFAULT_CURRENCY_LABEL: &str = "LKR";
pub const DEFAULT_CURRENCY_NAME: &str = "Sri Lankan Rupees";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOptions {
    pub currency_label: String,
    pub currency_name: String,
    pub unit_after_quantity: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            currency_name: DEFAULT_CURRENCY_NAME.to_string(),
            unit_after_quantity: false,
        }
    }
}

impl FormatOptions {
    pub fn currency_description(&self) -> String {
        format!("{} ({})", self.currency_name, self.currency_label)
    }
}

/// Semantic role of a column, inferred from its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    ItemCode,
    Description,
    Unit,
    Quantity,
    Rate,
    Amount,
    Other,
}

impl ColumnRole {
    /// Money and measure keywords outrank qualifiers such as "Unit" in
    /// "Unit Rate" or "Item" in "Item Description".
    pub fn from_header(header: &str) -> Self {
        let lower = header.to_lowercase();
        if lower.contains("amount") {
            ColumnRole::Amount
        } else if lower.contains("rate") {
            ColumnRole::Rate
        } else if lower.contains("quantity") {
            ColumnRole::Quantity
        } else if lower.contains("description") {
            ColumnRole::Description
        } else if lower.contains("unit") {
            ColumnRole::Unit
        } else if lower.contains("item") || lower.contains("code") {
            ColumnRole::ItemCode
        } else {
            ColumnRole::Other
        }
    }

    /// Advisory spreadsheet column width, in characters.
    pub fn suggested_width(self) -> Option<u16> {
        match self {
            ColumnRole::ItemCode => Some(12),
            ColumnRole::Description => Some(40),
            ColumnRole::Unit => Some(8),
            ColumnRole::Quantity => Some(12),
            ColumnRole::Rate => Some(15),
            ColumnRole::Amount => Some(18),
            ColumnRole::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayHeader {
    pub text: String,
    pub role: ColumnRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCell {
    pub text: String,
    pub column_header: String,
    pub is_currency: bool,
    pub is_numeric: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRow {
    pub role: RowRole,
    pub cells: Vec<FormattedCell>,
    /// Render the single cell across every column (colspan = header count).
    pub spans_all_columns: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub headers: Vec<DisplayHeader>,
    pub rows: Vec<FormattedRow>,
    pub has_totals_footer: bool,
    pub totals_footer_note: Option<String>,
}

impl DisplayModel {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

pub(crate) fn to_display_model(
    table: &ParsedTable,
    options: &FormatOptions,
    patterns: &TablePatterns,
) -> DisplayModel {
    let column_order = column_order(&table.headers, options);

    let headers = reorder(&table.headers, column_order.as_deref())
        .into_iter()
        .map(|text| DisplayHeader {
            role: ColumnRole::from_header(&text),
            text,
        })
        .collect::<Vec<DisplayHeader>>();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            format_row(
                row,
                &table.headers,
                column_order.as_deref(),
                options,
                patterns,
            )
        })
        .collect::<Vec<FormattedRow>>();

    let has_totals_footer = rows.iter().any(|row| row.role == RowRole::Total);
    let totals_footer_note = has_totals_footer
        .then(|| format!("All prices shown in {}", options.currency_description()));

    DisplayModel {
        headers,
        rows,
        has_totals_footer,
        totals_footer_note,
    }
}

fn format_row(
    row: &ParsedRow,
    headers: &[String],
    column_order: Option<&[usize]>,
    options: &FormatOptions,
    patterns: &TablePatterns,
) -> FormattedRow {
    // Bind to headers in their original order before any reordering.
    let cells = row
        .cells
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let header = headers.get(index).map(String::as_str).unwrap_or_default();
            format_cell(text, header, options, patterns)
        })
        .collect::<Vec<FormattedCell>>();

    FormattedRow {
        role: row.role,
        spans_all_columns: row.role == RowRole::SectionHeader && row.cells.len() == 1,
        cells: reorder(&cells, column_order),
    }
}

fn format_cell(
    text: &str,
    column_header: &str,
    options: &FormatOptions,
    patterns: &TablePatterns,
) -> FormattedCell {
    let label = options.currency_label.as_str();
    let unlabelled = if label.is_empty() {
        text.trim().to_string()
    } else {
        text.replace(label, "").trim().to_string()
    };

    let header_lower = column_header.to_lowercase();
    let is_money_column = header_lower.contains("amount") || header_lower.contains("rate");
    let is_currency = is_money_column && patterns.contains_number(text);
    let is_numeric = patterns.is_exact_number(&unlabelled);

    let display_text = if is_currency && !label.is_empty() && !text.contains(label) {
        format!("{label} {}", text.trim())
    } else {
        text.to_string()
    };

    FormattedCell {
        text: display_text,
        column_header: column_header.to_string(),
        is_currency,
        is_numeric,
    }
}

/// Permutation that moves the unit column directly after the quantity
/// column. `None` means the original order stands.
fn column_order(headers: &[String], options: &FormatOptions) -> Option<Vec<usize>> {
    if !options.unit_after_quantity {
        return None;
    }

    let unit_index = headers
        .iter()
        .position(|header| ColumnRole::from_header(header) == ColumnRole::Unit)?;
    let quantity_index = headers
        .iter()
        .position(|header| ColumnRole::from_header(header) == ColumnRole::Quantity)?;
    if unit_index == quantity_index || unit_index == quantity_index + 1 {
        return None;
    }

    let mut order = (0..headers.len()).collect::<Vec<usize>>();
    order.remove(unit_index);
    let quantity_position = order
        .iter()
        .position(|index| *index == quantity_index)
        .unwrap_or(order.len().saturating_sub(1));
    order.insert(quantity_position + 1, unit_index);
    Some(order)
}

fn reorder<T: Clone>(values: &[T], column_order: Option<&[usize]>) -> Vec<T> {
    let Some(order) = column_order else {
        return values.to_vec();
    };

    // Rows too narrow to hold every reordered position keep their own order.
    let widest = order.iter().copied().max().unwrap_or(0);
    if values.len() <= widest {
        return values.to_vec();
    }

    let mut reordered = order
        .iter()
        .map(|index| values[*index].clone())
        .collect::<Vec<T>>();
    reordered.extend(values.iter().skip(order.len()).cloned());
    reordered
}

/// Renders the display model as a pipe table for terminal output.
pub fn render_text(model: &DisplayModel) -> String {
    let column_count = model.column_count().max(1);
    let mut lines = Vec::<String>::new();

    lines.push(format!(
        "| {} |",
        model
            .headers
            .iter()
            .map(|header| header.text.as_str())
            .collect::<Vec<&str>>()
            .join(" | ")
    ));
    lines.push(format!(
        "| {} |",
        (0..column_count)
            .map(|_| "---")
            .collect::<Vec<&str>>()
            .join(" | ")
    ));

    for row in &model.rows {
        let texts = row
            .cells
            .iter()
            .map(|cell| cell.text.as_str())
            .collect::<Vec<&str>>();

        let line = if row.spans_all_columns {
            format!("| {} |", texts.join(" "))
        } else if row.role == RowRole::Total {
            format!("| **{}** |", texts.join("** | **"))
        } else {
            let mut padded = texts;
            while padded.len() < column_count {
                padded.push("");
            }
            format!("| {} |", padded.join(" | "))
        };
        lines.push(line);
    }

    if let Some(note) = &model.totals_footer_note {
        lines.push(String::new());
        lines.push(note.clone());
    }

    lines.join("\n")
}
