//! Core data model types.
//!
//! A reader turns a workbook into [`Sheet`]s of raw [`CellValue`]s. Schema inference turns the
//! first two rows of a sheet into a [`Schema`] of typed [`Column`]s, and statement generation
//! turns that schema plus the remaining rows into SQL text.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A single evaluated cell value, as delivered by a spreadsheet reader.
///
/// Formula cells are expected to arrive as their computed result.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank or absent cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Numeric cell without date/time formatting.
    Number(f64),
    /// Boolean cell.
    Bool(bool),
    /// Numeric cell formatted as a date/time, already converted to a naive timestamp.
    DateTime(NaiveDateTime),
    /// Error cell (`#DIV/0!`, `#N/A`, ...).
    Error(String),
}

impl CellValue {
    /// Text used when this cell appears in a header row.
    ///
    /// Blank and error cells carry no usable name and return `None`.
    pub fn header_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M").to_string()),
            CellValue::Empty | CellValue::Error(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// One row of raw cells, indexed by the same position space as [`Column::source_index`].
pub type Row = Vec<CellValue>;

/// One sheet of a workbook: its display name and rows in top-to-bottom order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Display name as stored in the workbook.
    pub name: String,
    /// Rows in physical order; the first row is the header.
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from its name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Semantic type of a column, inferred from its sample cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Text (or blank) sample.
    String,
    /// Plain numeric sample.
    Numeric,
    /// Boolean sample.
    Boolean,
    /// Date/time formatted numeric sample.
    Date,
    /// No sample, or a sample that maps to no type. Such columns get no SQL column.
    Unknown,
}

impl CellType {
    /// Target SQL column type, or `None` for [`CellType::Unknown`].
    pub const fn sql_type(&self) -> Option<&'static str> {
        match self {
            CellType::String => Some("text"),
            CellType::Numeric => Some("double"),
            CellType::Boolean => Some("tinyint(1)"),
            CellType::Date => Some("datetime"),
            CellType::Unknown => None,
        }
    }
}

/// A named, typed column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within its schema.
    pub name: String,
    /// Inferred type.
    pub cell_type: CellType,
    /// 0-based position of the column in the header row.
    pub source_index: usize,
}

impl Column {
    /// Whether this column takes part in CREATE/INSERT statements.
    pub fn is_accepted(&self) -> bool {
        self.cell_type != CellType::Unknown
    }
}

/// One header position of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSlot {
    /// A column that passed the path filter.
    Included(Column),
    /// A position rejected by the path filter (or with no usable header text).
    Excluded,
}

impl ColumnSlot {
    /// The included column, if any.
    pub fn column(&self) -> Option<&Column> {
        match self {
            ColumnSlot::Included(c) => Some(c),
            ColumnSlot::Excluded => None,
        }
    }
}

/// Inferred table layout for one sheet.
///
/// Slot `i` always describes header position `i`, so row cells are looked up by
/// [`Column::source_index`] even when earlier positions were excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Cleaned table name.
    pub table_name: String,
    slots: Vec<ColumnSlot>,
}

impl Schema {
    /// Create a schema from positional slots.
    ///
    /// Each included column's `source_index` is reset to its slot position.
    pub fn new(table_name: impl Into<String>, mut slots: Vec<ColumnSlot>) -> Self {
        for (idx, slot) in slots.iter_mut().enumerate() {
            if let ColumnSlot::Included(c) = slot {
                c.source_index = idx;
            }
        }
        Self {
            table_name: table_name.into(),
            slots,
        }
    }

    /// Convenience constructor for a schema whose columns occupy consecutive positions.
    pub fn with_columns<I, S>(table_name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, CellType)>,
        S: Into<String>,
    {
        let slots = columns
            .into_iter()
            .map(|(name, cell_type)| {
                ColumnSlot::Included(Column {
                    name: name.into(),
                    cell_type,
                    source_index: 0,
                })
            })
            .collect();
        Self::new(table_name, slots)
    }

    /// All header positions, in order.
    pub fn slots(&self) -> &[ColumnSlot] {
        &self.slots
    }

    /// Included columns (any type), in header order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.slots.iter().filter_map(ColumnSlot::column)
    }

    /// Included columns with a known type, in header order.
    pub fn accepted_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns().filter(|c| c.is_accepted())
    }

    /// Number of columns that take part in CREATE/INSERT statements.
    pub fn accepted_count(&self) -> usize {
        self.accepted_columns().count()
    }

    /// Whether this schema can produce a CREATE statement.
    pub fn is_usable(&self) -> bool {
        self.accepted_columns().next().is_some()
    }

    /// Returns an included column by name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns().find(|c| c.name == name)
    }
}

/// Render a number the way it appears in SQL and header text (`30`, `2.5`).
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Convert an Excel 1900-system serial number into a naive timestamp.
///
/// Serials below 60 are shifted by one day to undo the Lotus 1-2-3 leap year bug.
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64 + if serial < 60.0 { 1 } else { 0 };
    let millis = (serial.fract() * 86_400_000f64).round() as i64;
    let offset = Duration::try_days(days)?.checked_add(&Duration::try_milliseconds(millis)?)?;
    epoch.checked_add_signed(offset)
}

/// Parse ISO-8601 style date/time text (`2020-01-01`, `2020-01-01 10:30`, `2020-01-01T10:30:00`).
pub(crate) fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    const FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
