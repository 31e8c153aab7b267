use model::{
    core::{labels::synthetic_label, value::CellValue},
    records::{
        ingest::ParserStage,
        row::{RowValues, SourceRow},
    },
};

/// Sheet name given to rows recovered from text.
pub const RECOVERED_SHEET: &str = "Recovered Sheet 1";

/// A non-blank input line with its 1-based position in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Splits text into non-blank lines, keeping original line numbers.
pub fn non_blank_lines(text: &str) -> Vec<TextLine<'_>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, text)| TextLine { number: i + 1, text })
        .collect()
}

/// One named way of turning text lines into rows.
pub trait ParseStrategy {
    fn stage(&self) -> ParserStage;

    fn parse(&self, lines: &[TextLine<'_>], source_file: &str) -> Vec<SourceRow>;

    fn attempt(&self, lines: &[TextLine<'_>], source_file: &str) -> Attempt {
        Attempt {
            stage: self.stage(),
            rows: self.parse(lines, source_file),
        }
    }
}

/// Rows produced by one strategy; the row count is the confidence signal.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub stage: ParserStage,
    pub rows: Vec<SourceRow>,
}

impl Attempt {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Keeps `self` unless `other` produced strictly more rows.
    pub fn better_of(self, other: Attempt) -> Attempt {
        if other.row_count() > self.row_count() {
            other
        } else {
            self
        }
    }
}

/// Keys `cells` by `headers`; cells past the header width get synthetic labels.
/// Returns `None` when every cell is blank.
pub fn keyed_row(headers: &[String], cells: &[&str]) -> Option<RowValues> {
    let values: RowValues = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let label = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| synthetic_label(i + 1));
            (label, CellValue::text(*cell))
        })
        .collect();

    if values.is_blank() { None } else { Some(values) }
}

pub fn recovered_row(source_file: &str, line_number: usize, values: RowValues) -> SourceRow {
    SourceRow::new(source_file, RECOVERED_SHEET, line_number, values)
}
