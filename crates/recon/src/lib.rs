//! `packscan-recon` — Tracking reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded sheet tables, returns annotated
//! match results. No CLI, file, or database dependencies — spreadsheets
//! arrive through [`SheetSource`], persistence through [`OrderCodeSource`]
//! and [`ScanLedger`].

pub mod columns;
pub mod compare;
pub mod error;
pub mod extract;
pub mod model;
pub mod order_code;
pub mod platform;
pub mod search;
pub mod source;
pub mod stats;
pub mod table;

pub use columns::{resolve_column, Field, ResolvedColumns};
pub use compare::compare_list;
pub use error::EngineError;
pub use model::{CompareReport, CourierStat, OrderRow, SearchOutcome};
pub use order_code::format_order_code;
pub use platform::Platform;
pub use search::search;
pub use source::{OrderCodeSource, ScanLedger, SheetSource, StaticSource};
pub use stats::compute_stats;
pub use table::{Cell, SheetTable};
