//! `sheet-to-sql` infers a relational table schema from each sheet of a spreadsheet workbook and
//! emits the MySQL statements (DROP, CREATE, INSERT) that reproduce the sheet's rows.
//!
//! The primary entrypoint is [`conversion::convert_from_path`], which reads a workbook (Cargo
//! feature `excel`, on by default) and hands every generated statement, in order, to a
//! [`sql::StatementExecutor`] of your choice.
//!
//! ## How a sheet becomes a table
//!
//! - The sheet name, cleaned by [`schema::clean_name`] (quotes escaped, spaces removed), is the
//!   table name.
//! - The first row supplies column names; duplicates get numeric suffixes (`X`, `X1`, `X2`).
//! - The second row is the type sample: text → `text`, number → `double`, boolean →
//!   `tinyint(1)`, date-formatted number → `datetime`. Columns whose sample is an error cell are
//!   dropped.
//! - Every table gets an auto-increment key `<table>ID`.
//! - Each row after the sample row becomes one INSERT; rows where every column is null are
//!   skipped.
//! - [`schema::PathFilter`] patterns (`sheet`, `sheet.column`, `sheet.*`, `*.*`) select which
//!   sheets and columns take part.
//!
//! ## Quick example: in-memory sheet
//!
//! ```rust
//! use sheet_to_sql::conversion::{plan_sheet, SheetOutcome};
//! use sheet_to_sql::schema::PathFilter;
//! use sheet_to_sql::types::{CellValue, Sheet};
//!
//! let sheet = Sheet::new(
//!     "orders",
//!     vec![
//!         vec![CellValue::from("Item"), CellValue::from("Qty")],
//!         vec![CellValue::from("sample"), CellValue::Number(1.0)],
//!         vec![CellValue::from("pen"), CellValue::Number(3.0)],
//!     ],
//! );
//!
//! let SheetOutcome::Planned(plan) = plan_sheet(&sheet, &PathFilter::default(), false) else {
//!     panic!("sheet should produce a table");
//! };
//! assert_eq!(plan.statements[0], "DROP TABLE IF EXISTS `orders`;");
//! assert!(plan.statements[1].contains("`ordersID` int(11) NOT NULL AUTO_INCREMENT"));
//! assert_eq!(plan.statements[2], "INSERT INTO `orders` (`Item`, `Qty`) VALUES ('pen', 3);");
//! ```
//!
//! ## Quick example: workbook to SQL script
//!
//! ```no_run
//! use sheet_to_sql::conversion::{convert_from_path, ConversionOptions};
//! use sheet_to_sql::sql::SqlScriptWriter;
//!
//! # fn main() -> Result<(), sheet_to_sql::ConversionError> {
//! let mut out = SqlScriptWriter::new(std::io::stdout());
//! let stats = convert_from_path("workbook.xlsx", &mut out, &ConversionOptions::default())?;
//! eprintln!("tables={} rows={}", stats.sheets_converted, stats.rows_inserted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: cells, sheets, columns and schemas
//! - [`schema`]: name cleaning, path filtering, type inference and schema building
//! - [`sql`]: statement generation and executors
//! - [`conversion`]: workbook reading, orchestration and observability
//! - [`config`]: JSON-loadable settings
//! - [`error`]: error types used across conversion

pub mod config;
pub mod conversion;
pub mod error;
pub mod schema;
pub mod sql;
pub mod types;

pub use error::{ConversionError, ConversionResult};
