use cutsheet_core::diagnostics::Diagnostic;
use cutsheet_core::report::{ColumnKind, Report};

pub fn print_report(report: &Report) {
    println!("{}", format_report(report));
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{} note(s) while extracting:", diagnostics.len());
    for d in diagnostics {
        eprintln!("  {d}");
    }
}

/// Render a report as aligned plain-text columns. Numbers are right-aligned.
pub fn format_report(report: &Report) -> String {
    let cells: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let widths: Vec<usize> = report
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|s| s.chars().count())
                .chain(std::iter::once(col.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 3);
    lines.push(format!("=== {} ===\n", report.sheet_name));

    let header: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<w$}", col.name))
        .collect();
    lines.push(header.join("  ").trim_end().to_string());
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&report.columns)
            .zip(&widths)
            .map(|((value, col), w)| match col.kind {
                ColumnKind::Text => format!("{value:<w$}"),
                ColumnKind::Number | ColumnKind::Integer => format!("{value:>w$}"),
            })
            .collect();
        lines.push(line.join("  ").trim_end().to_string());
    }

    lines.push(format!("\n{} record(s)", report.rows.len()));
    lines.join("\n")
}
