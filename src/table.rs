use std::fmt::Write;

use crate::models::Dataset;

const FINAL_SCORE_HEADER: &str = "final_score";

/// Renders every source column plus the derived final score as an aligned text table.
pub fn render(dataset: &Dataset) -> String {
    let mut headers: Vec<&str> = dataset.headers.iter().map(String::as_str).collect();
    headers.push(FINAL_SCORE_HEADER);

    let rows: Vec<Vec<String>> = dataset
        .rows
        .iter()
        .map(|row| {
            let mut cells = row.fields.clone();
            cells.push(format!("{:.1}", row.final_score));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    write_line(&mut output, &widths, headers.iter().copied());
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut output, &widths, separator.iter().map(String::as_str));
    for row in &rows {
        write_line(&mut output, &widths, row.iter().map(String::as_str));
    }
    output
}

fn write_line<'a>(output: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(output, "{}", line.trim_end());
}
