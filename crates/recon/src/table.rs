//! Normalized tabular model.
//!
//! Every loaded worksheet arrives as a [`SheetTable`]: a header row plus
//! raw cell values, decoupled from whichever spreadsheet library read the
//! file. The engine never touches parser-specific row objects.

/// A single raw cell value as read from a spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Blank,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Blank => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Render the cell as text. Integral floats print without a decimal
    /// point so numeric order IDs and tracking numbers compare as strings.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Blank => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

/// One worksheet, normalized. `rows` are aligned to `headers` by position.
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Originating file name (not a full path).
    pub source: String,
    /// Worksheet name within the file.
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Position of a header by exact name, as the resolver returned it.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell at (row, header). `None` when the header is unknown or the row
    /// is ragged short of that column.
    pub fn cell(&self, row_idx: usize, header: &str) -> Option<&Cell> {
        let col = self.column_index(header)?;
        self.rows.get(row_idx)?.get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_renders_without_decimals() {
        assert_eq!(Cell::Number(231005.0).to_text(), "231005");
        assert_eq!(Cell::Number(2.5).to_text(), "2.5");
    }

    #[test]
    fn whitespace_text_is_blank() {
        assert!(Cell::Text("   ".into()).is_blank());
        assert!(!Cell::Text("PH1".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn cell_lookup_tolerates_ragged_rows() {
        let table = SheetTable {
            source: "a.xlsx".into(),
            sheet: "orders".into(),
            headers: vec!["Order ID".into(), "Tracking Number".into()],
            rows: vec![vec![Cell::Text("2310ABC".into())]],
        };
        assert!(table.cell(0, "Tracking Number").is_none());
        assert_eq!(
            table.cell(0, "Order ID"),
            Some(&Cell::Text("2310ABC".into()))
        );
    }
}
