//! Schema inference from a header row and one sample row.

use std::collections::HashSet;

use crate::types::{CellType, CellValue, Column, ColumnSlot, Schema, Sheet};

use super::filter::PathFilter;
use super::infer::infer_type;
use super::naming::clean_name;

/// Infer the schema of `sheet` from its first two rows.
///
/// Returns `None` when the sheet has fewer than two rows: without a sample row there is nothing
/// to infer types from.
pub fn infer_schema(sheet: &Sheet, filter: &PathFilter) -> Option<Schema> {
    match sheet.rows.as_slice() {
        [header, sample, ..] => Some(schema_from_rows(&sheet.name, header, sample, filter)),
        _ => None,
    }
}

/// Build a schema for sheet `sheet_name` from a `header` row and a `sample` row.
///
/// Header positions whose cleaned name is rejected by `filter`, or that hold no text, become
/// [`ColumnSlot::Excluded`]. Accepted names that are already taken get the first free numeric
/// suffix (`X`, `X1`, `X2`, ...). The synthetic key name `<table>ID` counts as taken from the
/// start. Types come from the sample cell at the same position; positions past the end of the
/// sample row stay [`CellType::Unknown`].
pub fn schema_from_rows(
    sheet_name: &str,
    header: &[CellValue],
    sample: &[CellValue],
    filter: &PathFilter,
) -> Schema {
    let table_name = clean_name(sheet_name);
    let mut taken: HashSet<String> = HashSet::with_capacity(header.len() + 1);
    taken.insert(primary_key_name(&table_name));

    let mut slots: Vec<ColumnSlot> = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        let Some(text) = cell.header_text() else {
            slots.push(ColumnSlot::Excluded);
            continue;
        };
        let candidate = clean_name(&text);
        if !filter.accepts_column(sheet_name, &candidate) {
            slots.push(ColumnSlot::Excluded);
            continue;
        }

        let name = unique_name(candidate, &taken);
        taken.insert(name.clone());
        let cell_type = sample.get(idx).map(infer_type).unwrap_or(CellType::Unknown);
        slots.push(ColumnSlot::Included(Column {
            name,
            cell_type,
            source_index: idx,
        }));
    }

    Schema::new(table_name, slots)
}

/// Name of the auto-increment key column injected into every table.
pub fn primary_key_name(table_name: &str) -> String {
    format!("{table_name}ID")
}

/// First of `base`, `base1`, `base2`, ... not present in `taken`.
///
/// At most `taken.len() + 1` candidates are probed.
fn unique_name(base: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut suffix: usize = 1;
    loop {
        let candidate = format!("{base}{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{infer_schema, schema_from_rows};
    use crate::schema::filter::PathFilter;
    use crate::types::{CellType, CellValue, ColumnSlot, Sheet};

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn names(schema: &crate::types::Schema) -> Vec<String> {
        schema.columns().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn infers_types_in_header_order() {
        let joined = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let schema = schema_from_rows(
            "People",
            &text_row(&["Name", "Age", "Active", "Joined"]),
            &[
                CellValue::from("Alice"),
                CellValue::Number(30.0),
                CellValue::Bool(true),
                CellValue::DateTime(joined),
            ],
            &PathFilter::default(),
        );

        let types: Vec<CellType> = schema.columns().map(|c| c.cell_type).collect();
        assert_eq!(
            types,
            vec![CellType::String, CellType::Numeric, CellType::Boolean, CellType::Date]
        );
        assert_eq!(schema.table_name, "People");
    }

    #[test]
    fn duplicate_names_get_increasing_suffixes() {
        let schema = schema_from_rows(
            "s",
            &text_row(&["X", "X", "X"]),
            &text_row(&["a", "b", "c"]),
            &PathFilter::default(),
        );
        assert_eq!(names(&schema), vec!["X", "X1", "X2"]);
    }

    #[test]
    fn suffix_skips_names_already_present_in_header() {
        let schema = schema_from_rows(
            "s",
            &text_row(&["X1", "X", "X"]),
            &text_row(&["a", "b", "c"]),
            &PathFilter::default(),
        );
        assert_eq!(names(&schema), vec!["X1", "X", "X2"]);
    }

    #[test]
    fn header_named_like_the_key_column_is_suffixed() {
        let schema = schema_from_rows(
            "orders",
            &text_row(&["ordersID", "Qty"]),
            &text_row(&["1", "2"]),
            &PathFilter::default(),
        );
        assert_eq!(names(&schema), vec!["ordersID1", "Qty"]);
    }

    #[test]
    fn header_names_are_cleaned() {
        let schema = schema_from_rows(
            "My Sheet",
            &text_row(&["First Name", "O'Brien"]),
            &text_row(&["a", "b"]),
            &PathFilter::default(),
        );
        assert_eq!(schema.table_name, "MySheet");
        assert_eq!(names(&schema), vec!["FirstName", "O\\'Brien"]);
    }

    #[test]
    fn filtered_columns_keep_positional_alignment() {
        let filter = PathFilter::new(["Orders.Qty"]);
        let schema = schema_from_rows(
            "Orders",
            &text_row(&["Notes", "Qty"]),
            &[CellValue::from("n"), CellValue::Number(3.0)],
            &filter,
        );
        assert_eq!(schema.slots()[0], ColumnSlot::Excluded);
        let qty = schema.column("Qty").unwrap();
        assert_eq!(qty.source_index, 1);
        assert_eq!(qty.cell_type, CellType::Numeric);
    }

    #[test]
    fn excluded_names_do_not_reserve_suffixes() {
        let filter = PathFilter::new(["s.X"]);
        let schema = schema_from_rows(
            "s",
            &text_row(&["Y", "X", "X"]),
            &text_row(&["a", "b", "c"]),
            &filter,
        );
        assert_eq!(schema.slots()[0], ColumnSlot::Excluded);
        assert_eq!(names(&schema), vec!["X", "X1"]);
    }

    #[test]
    fn blank_header_cells_are_excluded() {
        let schema = schema_from_rows(
            "s",
            &[CellValue::from("a"), CellValue::Empty, CellValue::from("c")],
            &text_row(&["1", "2", "3"]),
            &PathFilter::default(),
        );
        assert_eq!(schema.slots()[1], ColumnSlot::Excluded);
        assert_eq!(names(&schema), vec!["a", "c"]);
        assert_eq!(schema.column("c").unwrap().source_index, 2);
    }

    #[test]
    fn short_sample_row_leaves_trailing_columns_unknown() {
        let schema = schema_from_rows(
            "s",
            &text_row(&["a", "b"]),
            &text_row(&["1"]),
            &PathFilter::default(),
        );
        assert_eq!(schema.column("b").unwrap().cell_type, CellType::Unknown);
        assert_eq!(schema.accepted_count(), 1);
    }

    #[test]
    fn error_sample_makes_column_unknown() {
        let schema = schema_from_rows(
            "s",
            &text_row(&["a"]),
            &[CellValue::Error("#REF!".to_string())],
            &PathFilter::default(),
        );
        assert!(!schema.is_usable());
    }

    #[test]
    fn empty_header_gives_empty_schema() {
        let schema = schema_from_rows("s", &[], &text_row(&["1"]), &PathFilter::default());
        assert!(schema.slots().is_empty());
        assert!(!schema.is_usable());
    }

    #[test]
    fn sheet_with_fewer_than_two_rows_has_no_schema() {
        let filter = PathFilter::default();
        assert!(infer_schema(&Sheet::new("s", vec![]), &filter).is_none());
        assert!(infer_schema(&Sheet::new("s", vec![text_row(&["a"])]), &filter).is_none());
        assert!(
            infer_schema(&Sheet::new("s", vec![text_row(&["a"]), text_row(&["1"])]), &filter)
                .is_some()
        );
    }
}
