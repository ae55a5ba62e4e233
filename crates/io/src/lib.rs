// Spreadsheet access - folder enumeration, xlsx/xls via calamine, csv

pub mod csv_file;
pub mod folder;
pub mod xlsx;

pub use folder::FolderSource;
