// Excel import (xlsx, xls, ods) normalized into SheetTable values.
//
// One-way conversion: the first row of each sheet becomes the header row,
// everything below becomes raw cells. Formulas, styles, and merged regions
// are irrelevant to reconciliation and are not read.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use packscan_recon::{Cell, SheetTable};

/// Load every sheet of an Excel file. `source` is the display name carried
/// into each table (file name, not the full path).
pub fn load(path: &Path, source: &str) -> Result<Vec<SheetTable>, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("cannot open {source}: {e}"))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut tables = Vec::new();

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("cannot read sheet '{sheet_name}' of {source}: {e}"))?;

        let mut rows_iter = range.rows();
        let Some(header_row) = rows_iter.next() else {
            continue;
        };
        let headers: Vec<String> = header_row.iter().map(|d| to_cell(d).to_text()).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            continue;
        }

        let rows: Vec<Vec<Cell>> = rows_iter
            .map(|row| row.iter().map(to_cell).collect())
            .collect();

        tables.push(SheetTable {
            source: source.to_string(),
            sheet: sheet_name.clone(),
            headers,
            rows,
        });
    }

    Ok(tables)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Blank,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        // Serial value; reconciliation only ever compares these as text.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
