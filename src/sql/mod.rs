//! SQL emission.
//!
//! - [`statement`]: pure DROP/CREATE/INSERT text generation from a [`crate::types::Schema`]
//! - [`executor`]: the [`StatementExecutor`] seam and database-free executors
//!
//! ## Example
//!
//! ```rust
//! use sheet_to_sql::sql::{create_statement, drop_statement, insert_statement};
//! use sheet_to_sql::types::{CellType, CellValue, Schema};
//!
//! let schema = Schema::with_columns("t", [("A", CellType::String), ("B", CellType::Numeric)]);
//!
//! assert_eq!(drop_statement(&schema), "DROP TABLE IF EXISTS `t`;");
//! assert!(create_statement(&schema).unwrap().contains("PRIMARY KEY (`tID`)"));
//!
//! // Rows where every column is null are skipped.
//! assert_eq!(insert_statement(&schema, &[CellValue::Empty, CellValue::Empty]), None);
//! assert_eq!(
//!     insert_statement(&schema, &[CellValue::from("v"), CellValue::Empty]).unwrap(),
//!     "INSERT INTO `t` (`A`, `B`) VALUES ('v', null);"
//! );
//! ```

pub mod executor;
pub mod statement;

pub use executor::{SqlScriptWriter, StatementError, StatementExecutor, StatementLog};
pub use statement::{
    create_statement, drop_statement, insert_statement, quote_identifier, quote_string, DATE_FORMAT,
    NULL_LITERAL,
};
