//! Directory-backed sheet source.

use std::path::{Path, PathBuf};

use packscan_recon::{EngineError, SheetSource, SheetTable};

use crate::{csv_file, xlsx};

const EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// The spreadsheet folder the engine reads from. Every call re-reads the
/// directory and file contents; exports change infrequently and freshness
/// wins over caching.
pub struct FolderSource {
    dir: PathBuf,
}

impl FolderSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FolderSource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn supported(path: &Path) -> bool {
    matches!(extension_of(path), Some(ext) if EXTENSIONS.contains(&ext.as_str()))
}

impl SheetSource for FolderSource {
    fn list_files(&self) -> Result<Vec<String>, EngineError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A missing folder is "no data sources", not a fault.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EngineError::Source(format!(
                    "cannot read {}: {e}",
                    self.dir.display()
                )))
            }
        };

        let mut files: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_file() || !supported(&path) {
                    return None;
                }
                let name = path.file_name()?.to_str()?.to_string();
                // Excel drops ~$ lock stubs next to open workbooks.
                if name.starts_with("~$") {
                    return None;
                }
                Some(name)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn load_sheets(&self, file: &str) -> Result<Vec<SheetTable>, EngineError> {
        let path = self.dir.join(file);
        let result = match extension_of(&path).as_deref() {
            Some("csv") => csv_file::load(&path, file),
            _ => xlsx::load(&path, file),
        };
        result.map_err(EngineError::Source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_xlsx(dir: &Path, name: &str) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Tracking Number").unwrap();
        sheet.write_string(1, 0, "PH1").unwrap();
        workbook.save(dir.join(name)).unwrap();
    }

    #[test]
    fn lists_only_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_xlsx(dir.path(), "b.xlsx");
        write_xlsx(dir.path(), "a.xlsx");
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("~$b.xlsx"), "lock").unwrap();
        std::fs::write(dir.path().join("manifest.csv"), "a,b\n1,2\n").unwrap();

        let source = FolderSource::new(dir.path());
        assert_eq!(
            source.list_files().unwrap(),
            vec!["a.xlsx", "b.xlsx", "manifest.csv"]
        );
    }

    #[test]
    fn missing_folder_is_empty_not_an_error() {
        let source = FolderSource::new("/nonexistent/packscan-test");
        assert!(source.list_files().unwrap().is_empty());
    }

    #[test]
    fn load_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        write_xlsx(dir.path(), "orders.xlsx");
        std::fs::write(dir.path().join("manifest.csv"), "Tracking Number\nPH2\n").unwrap();

        let source = FolderSource::new(dir.path());
        let xlsx_tables = source.load_sheets("orders.xlsx").unwrap();
        assert_eq!(xlsx_tables[0].rows.len(), 1);

        let csv_tables = source.load_sheets("manifest.csv").unwrap();
        assert_eq!(csv_tables[0].headers, vec!["Tracking Number"]);
    }

    #[test]
    fn corrupt_file_surfaces_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.xlsx"), b"not a workbook").unwrap();

        let source = FolderSource::new(dir.path());
        let err = source.load_sheets("bad.xlsx").unwrap_err();
        assert!(err.to_string().contains("bad.xlsx"));
    }
}
