//! Conversion entrypoints and implementations.
//!
//! Most callers should use [`convert_from_path`] (from [`unified`]) which:
//!
//! - auto-detects the workbook format by file extension (or you can override via
//!   [`ConversionOptions`])
//! - reads every sheet, infers a schema per sheet and applies DROP/CREATE/INSERT statements
//!   through a [`crate::sql::StatementExecutor`]
//! - optionally reports converted/skipped sheets and failures to a [`ConversionObserver`]
//!
//! Sheets that are already in memory go through [`convert_sheets`]; [`plan_sheet`] produces a
//! single sheet's statements without executing anything.

#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod pipeline;
pub mod unified;

pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionSeverity, FileObserver,
    StdErrObserver,
};
pub use pipeline::{
    convert_sheets, plan_sheet, ConversionStats, SheetOutcome, SheetPlan, SheetStats, SkipReason,
};
pub use unified::{
    convert_from_glob, convert_from_path, ConversionOptions, ConversionRequest, WorkbookFormat,
};
