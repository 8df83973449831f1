//! Purpose: Render a schema and its rows as an aligned plain-text grid.
//! Exports: `render_rows`.
//! Role: Pure presentation helper for the CLI; the table core never depends on it for ordering.
//! Invariants: Without color the output contains no ANSI escapes.
//! Invariants: One header line plus one line per row; no trailing whitespace on any line.
use crate::core::kind::ColumnKind;
use crate::core::value::Row;

const SEPARATOR: &str = "  ";

pub fn render_rows(schema: &[ColumnKind], rows: &[Row], use_color: bool) -> String {
    let header: Vec<String> = schema
        .iter()
        .enumerate()
        .map(|(idx, kind)| format!("{idx}:{kind}"))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|label| label.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line = format_line(&header, &widths);
    if use_color {
        out.push_str(&format!("\u{1b}[1m{header_line}\u{1b}[0m"));
    } else {
        out.push_str(&header_line);
    }
    out.push('\n');
    for cells in &body {
        out.push_str(&format_line(cells, &widths));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(SEPARATOR).trim_end().to_string()
}
