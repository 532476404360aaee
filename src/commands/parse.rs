use std::io::{self, Write};

use anyhow::{Context, Result};
use takeoff_table::model::ParseReport;
use takeoff_table::table::{FormatOptions, TableParser, render_text};
use takeoff_table::util::{read_input_text, sha256_text};
use tracing::{info, warn};

use crate::cli::ParseArgs;

pub fn run(args: ParseArgs) -> Result<()> {
    let source = args.input.display().to_string();
    let text = read_input_text(&args.input)?;
    let parser = TableParser::new()?;

    info!(source = %source, bytes = text.len(), "parsing table text");

    let report = build_report(&parser, &text, &source, args.format_options());
    if report.structured {
        info!(
            delimiter = report.delimiter.map(|value| value.as_str()).unwrap_or_default(),
            rows = report.row_count,
            "table parsed"
        );
    } else {
        warn!(source = %source, "no header line found; showing text verbatim");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize parse json output")?;
        writeln!(output)?;
    } else {
        writeln!(output, "{}", render_report(&report))?;
    }
    output.flush()?;

    Ok(())
}

pub(crate) fn build_report(
    parser: &TableParser,
    text: &str,
    source: &str,
    options: FormatOptions,
) -> ParseReport {
    let table = parser.parse(text);
    let structured = table.is_structured();

    let display = structured.then(|| parser.display_model(&table, &options));
    let raw_text = (!structured).then(|| text.to_string());

    ParseReport {
        source: source.to_string(),
        source_sha256: sha256_text(text),
        structured,
        delimiter: table.delimiter,
        row_count: table.rows.len(),
        options,
        display,
        raw_text,
    }
}

pub(crate) fn render_report(report: &ParseReport) -> String {
    match (&report.display, &report.raw_text) {
        (Some(display), _) => render_text(display),
        (None, Some(raw_text)) => raw_text.trim_end().to_string(),
        (None, None) => String::new(),
    }
}
