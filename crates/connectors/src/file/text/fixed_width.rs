use super::strategy::{ParseStrategy, TextLine, keyed_row, recovered_row};
use lazy_static::lazy_static;
use model::{
    core::labels::header_labels,
    records::{ingest::ParserStage, row::SourceRow},
};
use regex::Regex;

lazy_static! {
    static ref COLUMN_GAP: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// A line needs this many tokens to count as a table line.
pub const MIN_TOKENS: usize = 3;
/// Header plus at least one data line.
pub const MIN_TABLE_LINES: usize = 2;

/// Columns separated by runs of two or more whitespace characters.
pub struct FixedWidthStrategy;

impl FixedWidthStrategy {
    fn tokens(line: &str) -> Vec<&str> {
        COLUMN_GAP.split(line.trim()).collect()
    }
}

impl ParseStrategy for FixedWidthStrategy {
    fn stage(&self) -> ParserStage {
        ParserStage::FixedWidth
    }

    fn parse(&self, lines: &[TextLine<'_>], source_file: &str) -> Vec<SourceRow> {
        let table: Vec<(usize, Vec<&str>)> = lines
            .iter()
            .map(|line| (line.number, Self::tokens(line.text)))
            .filter(|(_, tokens)| tokens.len() >= MIN_TOKENS)
            .collect();

        if table.len() < MIN_TABLE_LINES {
            return Vec::new();
        }

        let headers = header_labels(table[0].1.iter().map(|t| Some(*t)));
        table[1..]
            .iter()
            .filter_map(|(number, tokens)| {
                keyed_row(&headers, tokens).map(|values| recovered_row(source_file, *number, values))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::text::strategy::non_blank_lines;
    use model::core::value::CellValue;

    #[test]
    fn aligned_columns_are_split_on_wide_gaps() {
        let text = "Part Number    Description      Cost\n\
                    ABC-1          3 ton coil       410.00\n\
                    ABC-2          4 ton coil       455.00\n";
        let rows = FixedWidthStrategy.parse(&non_blank_lines(text), "list.txt");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].values.get("Description"),
            Some(&CellValue::text("3 ton coil"))
        );
        assert_eq!(rows[1].source_row_number, 3);
    }

    #[test]
    fn short_lines_are_ignored() {
        let text = "Price list\n\
                    Part    Desc    Cost\n\
                    notes only\n\
                    X1    Widget    5\n";
        let rows = FixedWidthStrategy.parse(&non_blank_lines(text), "list.txt");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_row_number, 4);
        assert_eq!(rows[0].values.get("Part"), Some(&CellValue::text("X1")));
    }

    #[test]
    fn single_table_line_is_not_a_table() {
        let text = "Part    Desc    Cost\nfree text\n";
        assert!(FixedWidthStrategy.parse(&non_blank_lines(text), "f.txt").is_empty());
    }
}
