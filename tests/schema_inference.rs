use sheet_to_sql::schema::{infer_schema, schema_from_rows, PathFilter};
use sheet_to_sql::types::{CellType, CellValue, ColumnSlot, Sheet};

use chrono::NaiveDate;

fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

fn names(sheet: &Sheet, filter: &PathFilter) -> Vec<String> {
    infer_schema(sheet, filter)
        .unwrap()
        .columns()
        .map(|c| c.name.clone())
        .collect()
}

#[test]
fn types_follow_the_sample_row() {
    let when = NaiveDate::from_ymd_opt(2021, 3, 4)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    let sheet = Sheet::new(
        "People",
        vec![
            vec![text("Name"), text("Age"), text("Active"), text("Joined"), text("Broken")],
            vec![
                text("Ada"),
                CellValue::Number(36.0),
                CellValue::Bool(true),
                CellValue::DateTime(when),
                CellValue::Error("#DIV/0!".to_string()),
            ],
        ],
    );

    let schema = infer_schema(&sheet, &PathFilter::default()).unwrap();
    assert_eq!(schema.table_name, "People");
    let types: Vec<(String, CellType)> = schema
        .columns()
        .map(|c| (c.name.clone(), c.cell_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("Name".to_string(), CellType::String),
            ("Age".to_string(), CellType::Numeric),
            ("Active".to_string(), CellType::Boolean),
            ("Joined".to_string(), CellType::Date),
            ("Broken".to_string(), CellType::Unknown),
        ]
    );
    assert_eq!(schema.accepted_count(), 4);
}

#[test]
fn blank_sample_cell_is_text() {
    let sheet = Sheet::new(
        "t",
        vec![vec![text("A"), text("B")], vec![CellValue::Empty, CellValue::Number(1.0)]],
    );
    let schema = infer_schema(&sheet, &PathFilter::default()).unwrap();
    assert_eq!(schema.column("A").unwrap().cell_type, CellType::String);
}

#[test]
fn short_sample_row_leaves_trailing_columns_untyped() {
    let sheet = Sheet::new(
        "t",
        vec![vec![text("A"), text("B"), text("C")], vec![text("x")]],
    );
    let schema = infer_schema(&sheet, &PathFilter::default()).unwrap();
    assert_eq!(schema.column("B").unwrap().cell_type, CellType::Unknown);
    assert_eq!(schema.column("C").unwrap().cell_type, CellType::Unknown);
    assert_eq!(schema.accepted_count(), 1);
}

#[test]
fn sheets_with_fewer_than_two_rows_have_no_schema() {
    let empty = Sheet::new("t", vec![]);
    let header_only = Sheet::new("t", vec![vec![text("A")]]);
    assert!(infer_schema(&empty, &PathFilter::default()).is_none());
    assert!(infer_schema(&header_only, &PathFilter::default()).is_none());
}

#[test]
fn names_are_cleaned_and_deduplicated() {
    let sheet = Sheet::new(
        "Order Lines",
        vec![
            vec![text("Unit Price"), text("X"), text("X"), text("X"), text("O'Brien")],
            vec![
                CellValue::Number(1.0),
                text("a"),
                text("b"),
                text("c"),
                text("d"),
            ],
        ],
    );
    let schema = infer_schema(&sheet, &PathFilter::default()).unwrap();
    assert_eq!(schema.table_name, "OrderLines");
    assert_eq!(
        names(&sheet, &PathFilter::default()),
        vec!["UnitPrice", "X", "X1", "X2", "O\\'Brien"]
    );
}

#[test]
fn suffixes_skip_names_already_used_by_later_headers() {
    let sheet = Sheet::new(
        "t",
        vec![
            vec![text("X1"), text("X"), text("X")],
            vec![text("a"), text("b"), text("c")],
        ],
    );
    assert_eq!(names(&sheet, &PathFilter::default()), vec!["X1", "X", "X2"]);
}

#[test]
fn header_matching_the_key_name_is_renamed() {
    let sheet = Sheet::new(
        "orders",
        vec![vec![text("ordersID"), text("Qty")], vec![CellValue::Number(7.0), CellValue::Number(1.0)]],
    );
    assert_eq!(names(&sheet, &PathFilter::default()), vec!["ordersID1", "Qty"]);
}

#[test]
fn numeric_headers_become_names() {
    let sheet = Sheet::new(
        "t",
        vec![vec![CellValue::Number(2024.0), CellValue::Bool(true)], vec![text("a"), text("b")]],
    );
    assert_eq!(names(&sheet, &PathFilter::default()), vec!["2024", "true"]);
}

#[test]
fn excluded_positions_keep_source_indices_aligned() {
    let filter = PathFilter::new(["Sales.Qty", "Sales.Total"]);
    let schema = schema_from_rows(
        "Sales",
        &[text("Region"), CellValue::Empty, text("Qty"), text("Total")],
        &[text("north"), text("?"), CellValue::Number(2.0), CellValue::Number(9.5)],
        &filter,
    );

    assert_eq!(schema.slots().len(), 4);
    assert_eq!(schema.slots()[0], ColumnSlot::Excluded);
    assert_eq!(schema.slots()[1], ColumnSlot::Excluded);
    assert_eq!(schema.column("Qty").unwrap().source_index, 2);
    assert_eq!(schema.column("Total").unwrap().source_index, 3);
}

#[test]
fn column_filter_sees_the_cleaned_header_name() {
    let filter = PathFilter::new(["Order Lines.Unit Price"]);
    let sheet = Sheet::new(
        "Order Lines",
        vec![
            vec![text("Unit Price"), text("Qty")],
            vec![CellValue::Number(1.5), CellValue::Number(2.0)],
        ],
    );
    assert_eq!(names(&sheet, &filter), vec!["UnitPrice"]);
}

#[test]
fn filter_patterns_cover_sheets_and_columns() {
    let filter = PathFilter::new(["Orders.*", "Customers.Name"]);
    assert!(filter.accepts_sheet("Orders"));
    assert!(filter.accepts_sheet("Customers"));
    assert!(!filter.accepts_sheet("Products"));
    assert!(filter.accepts_column("Orders", "Anything"));
    assert!(filter.accepts_column("Customers", "Name"));
    assert!(!filter.accepts_column("Customers", "Email"));
}

#[test]
fn bare_sheet_pattern_admits_the_sheet_but_no_columns() {
    let filter = PathFilter::new(["Orders"]);
    assert!(filter.accepts_sheet("Orders"));
    assert!(!filter.accepts_column("Orders", "Qty"));
}

#[test]
fn wildcard_sheet_patterns_only_accept_all_columns_when_exact() {
    let filter = PathFilter::new(["*.Name"]);
    assert!(filter.accepts_sheet("Anything"));
    assert!(!filter.accepts_column("Anything", "Name"));

    let all = PathFilter::default();
    assert!(all.accepts_sheet("Anything"));
    assert!(all.accepts_column("Anything", "Name"));
}

#[test]
fn empty_pattern_set_accepts_nothing() {
    let filter = PathFilter::new(Vec::<String>::new());
    assert!(!filter.accepts_sheet("Orders"));
    assert!(!filter.accepts_column("Orders", "Qty"));
}
