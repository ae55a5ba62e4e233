// CSV import: one file becomes one single-sheet table.

use std::path::Path;

use packscan_recon::{Cell, SheetTable};

pub fn load(path: &Path, source: &str) -> Result<Vec<SheetTable>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("cannot open {source}: {e}"))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("cannot read headers of {source}: {e}"))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("cannot read {source}: {e}"))?;
        let row: Vec<Cell> = (0..headers.len())
            .map(|i| match record.get(i) {
                None | Some("") => Cell::Blank,
                Some(value) => Cell::Text(value.to_string()),
            })
            .collect();
        rows.push(row);
    }

    let sheet = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source)
        .to_string();

    Ok(vec![SheetTable {
        source: source.to_string(),
        sheet,
        headers,
        rows,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazada.csv");
        std::fs::write(
            &path,
            "orderNumber,trackingCode,itemName\n778899,PH555XYZ,Collagen Gummies\n",
        )
        .unwrap();

        let tables = load(&path, "lazada.csv").unwrap();
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.sheet, "lazada");
        assert_eq!(table.headers, vec!["orderNumber", "trackingCode", "itemName"]);
        assert_eq!(
            table.cell(0, "trackingCode"),
            Some(&Cell::Text("PH555XYZ".into()))
        );
    }

    #[test]
    fn short_records_pad_with_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c\n1,2\n").unwrap();

        let tables = load(&path, "ragged.csv").unwrap();
        assert_eq!(tables[0].cell(0, "c"), Some(&Cell::Blank));
    }
}
