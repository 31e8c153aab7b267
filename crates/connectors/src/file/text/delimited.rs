use super::strategy::{ParseStrategy, TextLine, keyed_row, recovered_row};
use model::{
    core::labels::header_labels,
    records::{ingest::ParserStage, row::SourceRow},
};
use tracing::debug;

/// Delimiters tried by the fallback parser, in tie-break order.
pub const DELIMITER_CANDIDATES: [char; 4] = [',', '\t', ';', '|'];

/// First line is the header, the rest are rows keyed by position.
pub struct DelimitedStrategy {
    delimiter: char,
}

impl DelimitedStrategy {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn candidates() -> Vec<DelimitedStrategy> {
        DELIMITER_CANDIDATES.into_iter().map(Self::new).collect()
    }
}

impl ParseStrategy for DelimitedStrategy {
    fn stage(&self) -> ParserStage {
        ParserStage::Delimited(self.delimiter)
    }

    fn parse(&self, lines: &[TextLine<'_>], source_file: &str) -> Vec<SourceRow> {
        let joined = lines.iter().map(|l| l.text).collect::<Vec<_>>().join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(false)
            .flexible(true)
            .from_reader(joined.as_bytes());

        let mut records = reader.records();
        let header = match records.next() {
            Some(Ok(record)) => record,
            _ => return Vec::new(),
        };
        // Without the delimiter in the header line this candidate does not apply.
        if header.len() < 2 {
            return Vec::new();
        }
        let headers = header_labels(header.iter().map(Some));

        let mut rows = Vec::new();
        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    debug!("Delimiter {:?}: stopping at unreadable record: {}", self.delimiter, err);
                    break;
                }
            };

            let cells: Vec<&str> = record.iter().collect();
            let Some(values) = keyed_row(&headers, &cells) else {
                continue;
            };

            let line_number = record
                .position()
                .and_then(|pos| lines.get((pos.line() as usize).saturating_sub(1)))
                .map(|line| line.number)
                .unwrap_or(0);
            rows.push(recovered_row(source_file, line_number, values));
        }

        rows
    }
}
