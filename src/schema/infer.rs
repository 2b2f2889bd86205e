//! Cell type inference.

use crate::types::{CellType, CellValue};

/// Classify one sample cell.
///
/// - blank or text → [`CellType::String`]
/// - boolean → [`CellType::Boolean`]
/// - date/time formatted number → [`CellType::Date`]
/// - other number → [`CellType::Numeric`]
/// - error values → [`CellType::Unknown`]
///
/// The date formatting flag travels with the value: readers deliver date-formatted numbers as
/// [`CellValue::DateTime`]. Formulas must already be evaluated.
pub fn infer_type(value: &CellValue) -> CellType {
    match value {
        CellValue::Empty | CellValue::Text(_) => CellType::String,
        CellValue::Bool(_) => CellType::Boolean,
        CellValue::DateTime(_) => CellType::Date,
        CellValue::Number(_) => CellType::Numeric,
        CellValue::Error(_) => CellType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::infer_type;
    use crate::types::{CellType, CellValue};

    #[test]
    fn classifies_every_value_kind() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(infer_type(&CellValue::Empty), CellType::String);
        assert_eq!(infer_type(&CellValue::from("x")), CellType::String);
        assert_eq!(infer_type(&CellValue::Bool(false)), CellType::Boolean);
        assert_eq!(infer_type(&CellValue::Number(30.0)), CellType::Numeric);
        assert_eq!(infer_type(&CellValue::DateTime(date)), CellType::Date);
        assert_eq!(infer_type(&CellValue::Error("#DIV/0!".to_string())), CellType::Unknown);
    }
}
