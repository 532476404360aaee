use anyhow::{Context, Result};
use regex::Regex;

pub(crate) const HEADER_KEYWORDS: [&str; 6] =
    ["item", "description", "unit", "quantity", "rate", "amount"];

const TOTAL_KEYWORDS: [&str; 3] = ["total", "subtotal", "grand total"];

/// Compiled patterns shared by the parser and the formatter.
#[derive(Debug, Clone)]
pub(crate) struct TablePatterns {
    whitespace_run: Regex,
    number_presence: Regex,
    number_exact: Regex,
    section_marker: Regex,
}

impl TablePatterns {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            whitespace_run: Regex::new(r"\s{2,}")
                .context("failed to compile whitespace-run delimiter regex")?,
            number_presence: Regex::new(r"[\d,]+(?:\.\d+)?")
                .context("failed to compile number presence regex")?,
            number_exact: Regex::new(r"^[\d,]+(?:\.\d+)?$")
                .context("failed to compile exact number regex")?,
            section_marker: Regex::new(r"^[A-Z][.:]")
                .context("failed to compile section marker regex")?,
        })
    }

    pub(crate) fn whitespace_run(&self) -> &Regex {
        &self.whitespace_run
    }

    /// A number appears somewhere in the text. A bare run of commas is not a
    /// number.
    pub(crate) fn contains_number(&self, text: &str) -> bool {
        self.number_presence
            .find_iter(text)
            .any(|found| found.as_str().bytes().any(|byte| byte.is_ascii_digit()))
    }

    pub(crate) fn is_exact_number(&self, text: &str) -> bool {
        self.number_exact.is_match(text) && text.bytes().any(|byte| byte.is_ascii_digit())
    }

    pub(crate) fn is_section_marker(&self, cell: &str) -> bool {
        self.section_marker.is_match(cell)
    }
}

pub(crate) fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

pub(crate) fn mentions_total(text: &str) -> bool {
    let lower = text.to_lowercase();
    TOTAL_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

pub(crate) fn is_divider_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with("+---") || trimmed.starts_with("|---") {
        return true;
    }

    (trimmed.contains('-') || trimmed.contains('='))
        && trimmed
            .chars()
            .all(|ch| matches!(ch, '-' | '+' | '|' | ':' | '=') || ch.is_whitespace())
}

/// Removes markdown emphasis and heading markers that models sprinkle into
/// table cells.
pub(crate) fn strip_markup(cell: &str) -> String {
    cell.chars()
        .filter(|ch| !matches!(ch, '*' | '#'))
        .collect::<String>()
        .trim()
        .to_string()
}
