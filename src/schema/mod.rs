//! Schema inference: which sheets and columns participate, what they are called and what type
//! each column holds.
//!
//! - [`PathFilter`]: sheet/column inclusion by path pattern
//! - [`clean_name()`]: the name normalization applied to sheets, headers and patterns
//! - [`infer_type()`]: sample cell → [`crate::types::CellType`]
//! - [`infer_schema()`] / [`schema_from_rows()`]: header + sample row → [`crate::types::Schema`]
//!
//! ## Example
//!
//! ```rust
//! use sheet_to_sql::schema::{schema_from_rows, PathFilter};
//! use sheet_to_sql::types::{CellType, CellValue};
//!
//! let header = vec![CellValue::from("X"), CellValue::from("X"), CellValue::from("Qty")];
//! let sample = vec![CellValue::from("a"), CellValue::from("b"), CellValue::Number(2.0)];
//! let schema = schema_from_rows("Order Lines", &header, &sample, &PathFilter::default());
//!
//! assert_eq!(schema.table_name, "OrderLines");
//! let names: Vec<&str> = schema.columns().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, vec!["X", "X1", "Qty"]);
//! assert_eq!(schema.column("Qty").unwrap().cell_type, CellType::Numeric);
//! ```

pub mod builder;
pub mod filter;
pub mod infer;
pub mod naming;

pub use builder::{infer_schema, primary_key_name, schema_from_rows};
pub use filter::{PathFilter, ACCEPT_ALL};
pub use infer::infer_type;
pub use naming::clean_name;
