//! Rendering of the downsampling report.
//!
//! The text form is a bordered table with centered cells; the JSON form is an
//! array of [`ReportRow`] objects.

use crate::downsample::ReportRow;
use crate::error::KitResult;

pub const COLUMN_LABELS: [&str; 4] = [
    "Image Name",
    "Original Size (KB)",
    "Encoded Size (KB)",
    "Compression Ratio",
];

/// Cell strings for one row, formatted with two decimals.
pub fn row_cells(row: &ReportRow) -> [String; 4] {
    [
        row.name.clone(),
        format!("{:.2}", row.original_kb()),
        format!("{:.2}", row.resized_kb()),
        format!("{:.2}", row.ratio),
    ]
}

/// Render `rows` as a bordered, center-aligned text table.
pub fn render_table(rows: &[ReportRow]) -> String {
    let body: Vec<[String; 4]> = rows.iter().map(row_cells).collect();

    let mut widths = COLUMN_LABELS.map(str::len);
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = border(&widths);
    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&line(&COLUMN_LABELS, &widths));
    out.push_str(&rule.replace('-', "="));
    for cells in &body {
        out.push_str(&line(cells, &widths));
    }
    out.push_str(&rule);
    out
}

/// Render `rows` as pretty-printed JSON.
pub fn render_json(rows: &[ReportRow]) -> KitResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

fn border(widths: &[usize; 4]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line<S: AsRef<str>>(cells: &[S; 4], widths: &[usize; 4]) -> String {
    let mut s = String::from("|");
    for (cell, &w) in cells.iter().zip(widths) {
        s.push_str(&format!(" {:^w$} |", cell.as_ref()));
    }
    s.push('\n');
    s
}
