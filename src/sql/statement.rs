//! DROP / CREATE / INSERT text generation (MySQL dialect).
//!
//! Identifiers are backtick-quoted, the synthetic key is `int(11) NOT NULL AUTO_INCREMENT`, and
//! SQL NULL is written as `null`. Nothing here touches a database.

use crate::schema::primary_key_name;
use crate::types::{
    excel_serial_to_datetime, format_number, parse_iso_datetime, CellType, CellValue, Column, Schema,
};

/// SQL NULL literal used in INSERT value lists.
pub const NULL_LITERAL: &str = "null";

/// Timestamp layout for DATE values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `DROP TABLE IF EXISTS `<table>`;`
pub fn drop_statement(schema: &Schema) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_identifier(&schema.table_name))
}

/// CREATE statement for `schema`, or `None` if it has no accepted columns.
///
/// An auto-increment key column `<table>ID` always comes first; every accepted column follows as
/// `DEFAULT NULL`.
pub fn create_statement(schema: &Schema) -> Option<String> {
    if !schema.is_usable() {
        return None;
    }
    let key = quote_identifier(&primary_key_name(&schema.table_name));

    let mut defs: Vec<String> = Vec::with_capacity(schema.accepted_count() + 2);
    defs.push(format!("{key} int(11) NOT NULL AUTO_INCREMENT"));
    for column in schema.accepted_columns() {
        if let Some(sql_type) = column.cell_type.sql_type() {
            defs.push(format!(
                "{} {sql_type} DEFAULT NULL",
                quote_identifier(&column.name)
            ));
        }
    }
    defs.push(format!("PRIMARY KEY ({key})"));

    Some(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n);",
        quote_identifier(&schema.table_name),
        defs.join(",\n  ")
    ))
}

/// INSERT statement for one data row, or `None` when every accepted column would be NULL.
///
/// Cells are read at each accepted column's `source_index`. Absent, blank, error and
/// non-coercible cells become `null`.
pub fn insert_statement(schema: &Schema, row: &[CellValue]) -> Option<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut values: Vec<String> = Vec::new();
    let mut null_count = 0usize;

    for column in schema.accepted_columns() {
        columns.push(quote_identifier(&column.name));
        match serialize_cell(column, row) {
            Some(value) => values.push(value),
            None => {
                null_count += 1;
                values.push(NULL_LITERAL.to_string());
            }
        }
    }

    if null_count >= columns.len() {
        return None;
    }
    Some(format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_identifier(&schema.table_name),
        columns.join(", "),
        values.join(", ")
    ))
}

/// Quote an identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a string literal, escaping backslashes and single quotes with a backslash.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

fn serialize_cell(column: &Column, row: &[CellValue]) -> Option<String> {
    let cell = row.get(column.source_index)?;
    match column.cell_type {
        CellType::Date => to_datetime(cell).map(|dt| quote_string(&dt.format(DATE_FORMAT).to_string())),
        CellType::Numeric => to_number(cell).map(format_number),
        CellType::Boolean => to_bool(cell).map(|b| b.to_string()),
        CellType::String => to_text(cell).map(|s| quote_string(&s)),
        CellType::Unknown => None,
    }
}

fn to_datetime(cell: &CellValue) -> Option<chrono::NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Number(n) => excel_serial_to_datetime(*n),
        CellValue::Text(s) => parse_iso_datetime(s),
        _ => None,
    }
}

fn to_number(cell: &CellValue) -> Option<f64> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn to_bool(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) => Some(*n != 0.0),
        CellValue::Text(s) => parse_bool_str(s),
        _ => None,
    }
}

fn parse_bool_str(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn to_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty | CellValue::Error(_) => None,
        CellValue::Number(n) if !n.is_finite() => None,
        other => other.header_text(),
    }
}
