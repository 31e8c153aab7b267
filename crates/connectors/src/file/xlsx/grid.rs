use model::core::value::CellValue;
use std::fmt;
use umya_spreadsheet::{Cell, Worksheet};

/// Merge-free view of one worksheet. Row and column indices are 0-based.
///
/// Rows are ragged: each one ends at its last value, and the grid ends at the
/// last row holding a value. Styled but empty cells take no space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeParseError(pub String);

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell range '{}'", self.0)
    }
}

/// Inclusive 1-based bounds of a rectangular range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min_col: u32,
    pub min_row: u32,
    pub max_col: u32,
    pub max_row: u32,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Snapshots the cells that hold values, then flattens every merged range
    /// clipped to that extent. Returns the merge ranges that could not be parsed.
    pub fn from_worksheet(sheet: &Worksheet) -> (Self, Vec<RangeParseError>) {
        let mut grid = SheetGrid::default();
        for cell in sheet.get_cell_collection() {
            let value = cell_value(cell);
            if value.is_empty() {
                continue;
            }
            let coordinate = cell.get_coordinate();
            let col: u32 = coordinate.get_col_num().to_owned();
            let row: u32 = coordinate.get_row_num().to_owned();
            grid.set(row - 1, col - 1, value);
        }

        let (height, width) = (grid.height(), grid.width());
        let mut failures = Vec::new();
        for range in sheet.get_merge_cells() {
            match parse_range(&range.get_range()) {
                Ok(bounds) => {
                    if let Some(clipped) = bounds.clipped(height, width) {
                        grid.fill_bounds(clipped);
                    }
                }
                Err(err) => failures.push(err),
            }
        }
        (grid, failures)
    }

    /// Copies the top-left value of `range` (e.g. `B2:D4`) into every cell of it.
    pub fn fill_merged(&mut self, range: &str) -> Result<(), RangeParseError> {
        self.fill_bounds(parse_range(range)?);
        Ok(())
    }

    fn fill_bounds(&mut self, bounds: CellBounds) {
        let top_left = self.get(bounds.min_row - 1, bounds.min_col - 1).clone();
        for r in bounds.min_row..=bounds.max_row {
            for c in bounds.min_col..=bounds.max_col {
                self.set(r - 1, c - 1, top_left.clone());
            }
        }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Length of the longest row.
    pub fn width(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn get(&self, row: u32, col: u32) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(EMPTY)
    }

    fn set(&mut self, row: u32, col: u32, value: CellValue) {
        let (row, col) = (row as usize, col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }
}

impl CellBounds {
    /// The part of these bounds inside a `height` x `width` grid, if any.
    pub fn clipped(self, height: u32, width: u32) -> Option<CellBounds> {
        if self.min_row > height || self.min_col > width {
            return None;
        }
        Some(CellBounds {
            max_row: self.max_row.min(height),
            max_col: self.max_col.min(width),
            ..self
        })
    }
}

fn cell_value(cell: &Cell) -> CellValue {
    let raw = cell.get_value();
    if cell.get_data_type() == "n" {
        CellValue::numeric_or_text(&raw)
    } else {
        CellValue::text(raw.to_string())
    }
}

/// Parses `A1`, `$A$1` or `A1:C3` into inclusive 1-based bounds.
pub fn parse_range(range: &str) -> Result<CellBounds, RangeParseError> {
    let err = || RangeParseError(range.to_string());
    let mut parts = range.split(':');
    let start = parts.next().ok_or_else(err)?;
    let end = parts.next().unwrap_or(start);
    if parts.next().is_some() {
        return Err(err());
    }

    let (c1, r1) = parse_coordinate(start).ok_or_else(err)?;
    let (c2, r2) = parse_coordinate(end).ok_or_else(err)?;
    Ok(CellBounds {
        min_col: c1.min(c2),
        min_row: r1.min(r2),
        max_col: c1.max(c2),
        max_row: r1.max(r2),
    })
}

fn parse_coordinate(coord: &str) -> Option<(u32, u32)> {
    let coord = coord.trim().replace('$', "");
    let split = coord.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = coord.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col, row))
}
