use crate::extraction::{Cell, RawTable};

/// Reconstruct cut-sheet tables from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces, so the header
/// line gives the column anchors and every following line is slotted into
/// those anchors until the table ends.
const HEADER_KEYWORDS: [&str; 7] = [
    "part id",
    "part name",
    "cart",
    "qty",
    "description",
    "instruction",
    "material",
];

/// Keywords every header carries. Inside an open table only a line with all
/// of them starts a new table, so a data row such as "Cart 3 ... Material
/// rack" stays a data row.
const HEADER_SIGNATURE: [&str; 2] = ["part id", "part name"];

/// Segments may start slightly left of their header anchor when a value is
/// wider than its column title.
const ANCHOR_TOLERANCE: usize = 2;

/// Detect if a line looks like a cut-sheet table header row.
pub fn is_table_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    let count = HEADER_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    count >= 2
}

/// Stricter header test used while a table is already open.
fn is_repeated_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_SIGNATURE.iter().all(|kw| lower.contains(kw))
}

/// Lines that close an open table region.
fn is_table_end(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("Page ") || trimmed.starts_with("---")
}

/// Find every table in one page of layout text.
///
/// The first row of each returned table is the header line itself. Header
/// lines with no rows under them are not reported.
pub fn detect_tables(page_text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: Option<TableBuilder> = None;

    for line in page_text.lines() {
        let starts_table = match current {
            Some(_) => is_repeated_header(line),
            None => is_table_header(line),
        };
        if starts_table {
            if let Some(builder) = current.take() {
                builder.finish_into(&mut tables);
            }
            current = Some(TableBuilder::new(line));
            continue;
        }

        if let Some(builder) = current.as_mut() {
            if is_table_end(line) {
                if let Some(builder) = current.take() {
                    builder.finish_into(&mut tables);
                }
            } else {
                builder.push_line(line);
            }
        }
    }

    if let Some(builder) = current {
        builder.finish_into(&mut tables);
    }

    tables
}

struct TableBuilder {
    anchors: Vec<usize>,
    rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    fn new(header_line: &str) -> Self {
        let segments = split_segments(header_line);
        let anchors = segments.iter().map(|s| s.column).collect();
        let header = segments.iter().map(|s| Some(s.text.to_string())).collect();
        TableBuilder {
            anchors,
            rows: vec![header],
        }
    }

    fn push_line(&mut self, line: &str) {
        let mut row: Vec<Cell> = vec![None; self.anchors.len()];
        for segment in split_segments(line) {
            let idx = self
                .anchors
                .iter()
                .rposition(|&a| a <= segment.column + ANCHOR_TOLERANCE)
                .unwrap_or(0);
            match &mut row[idx] {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(segment.text);
                }
                slot => *slot = Some(segment.text.to_string()),
            }
        }
        self.rows.push(row);
    }

    fn finish_into(self, tables: &mut Vec<RawTable>) {
        if self.rows.len() > 1 {
            tables.push(RawTable::new(self.rows));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Segment<'a> {
    /// Character column where the segment starts.
    column: usize,
    text: &'a str,
}

/// Split a line by gaps of 2+ whitespace characters, keeping start columns.
fn split_segments(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut end_byte = 0;
    let mut space_count = 0;

    for (column, (byte, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some((s, col)) = start.take() {
                    segments.push(Segment {
                        column: col,
                        text: &line[s..end_byte],
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some((byte, column));
            }
            space_count = 0;
            end_byte = byte + c.len_utf8();
        }
    }

    if let Some((s, col)) = start {
        segments.push(Segment {
            column: col,
            text: &line[s..end_byte],
        });
    }

    segments
}
