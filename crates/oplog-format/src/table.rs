use crate::pipeline::LineTransform;
use crate::record::LogRecord;

/// Column widths for timestamp, accelerator, origin, facility, proc, text.
pub const COLUMN_WIDTHS: [usize; 6] = [20, 15, 20, 20, 20, 40];

const HEADERS: [&str; 6] = ["TIMESTAMP", "ACCELERATOR", "ORIGIN", "FACILITY", "PROC", "TEXT"];

/// Header row plus `=` separator. Emitted exactly once per session by the
/// driver, never by the transform; tail reconnects must not repeat it.
pub fn header_lines() -> Vec<String> {
    let total: usize = COLUMN_WIDTHS.iter().sum();
    vec![render_row(&HEADERS), "=".repeat(total)]
}

fn render_row(cells: &[&str; 6]) -> String {
    let mut row = String::new();
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        row.push_str(&format!("{cell:<width$}"));
    }
    row.trim_end().to_string()
}

/// Renders each line as a fixed-width row. Wide values overflow their column
/// rather than being truncated; operators expect to see everything.
/// Unparseable payloads render with empty fields, never an error.
#[derive(Debug, Default)]
pub struct TableRenderer;

impl LineTransform for TableRenderer {
    fn push(&mut self, line: &str, out: &mut Vec<String>) {
        let record = LogRecord::parse(line);
        out.push(render_row(&[
            &record.timestamp,
            &record.accelerator,
            &record.origin,
            &record.facility,
            &record.proc,
            &record.text,
        ]));
    }
}
