#![cfg(feature = "excel")]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Ods, Reader, Sheets, Xls, Xlsb, Xlsx};

use crate::error::ConversionResult;
use crate::types::{parse_iso_datetime, CellValue, Row, Sheet};

use super::unified::WorkbookFormat;

/// Read every sheet of a workbook in workbook order, using the reader for `format`.
///
/// Behavior:
/// - The file extension is not consulted; `format` alone picks the reader
/// - Each sheet's used range becomes its rows, top to bottom
/// - Formula cells yield the result cached in the file
/// - Date/time formatted numbers become [`CellValue::DateTime`]
pub fn read_workbook_from_path(
    path: impl AsRef<Path>,
    format: WorkbookFormat,
) -> ConversionResult<Vec<Sheet>> {
    let path = path.as_ref();
    // Missing files surface as I/O errors.
    std::fs::metadata(path)?;
    let mut workbook = open_sheets(path, format)?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets: Vec<Sheet> = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        sheets.push(sheet_from_range(name, &range));
    }
    Ok(sheets)
}

fn open_sheets(
    path: &Path,
    format: WorkbookFormat,
) -> Result<Sheets<BufReader<File>>, calamine::Error> {
    let sheets = match format {
        WorkbookFormat::Xlsx => {
            Sheets::Xlsx(open_workbook::<Xlsx<_>, _>(path).map_err(calamine::Error::Xlsx)?)
        }
        WorkbookFormat::Xlsb => {
            Sheets::Xlsb(open_workbook::<Xlsb<_>, _>(path).map_err(calamine::Error::Xlsb)?)
        }
        WorkbookFormat::Xls => {
            Sheets::Xls(open_workbook::<Xls<_>, _>(path).map_err(calamine::Error::Xls)?)
        }
        WorkbookFormat::Ods => {
            Sheets::Ods(open_workbook::<Ods<_>, _>(path).map_err(calamine::Error::Ods)?)
        }
    };
    Ok(sheets)
}

fn sheet_from_range(name: String, range: &calamine::Range<Data>) -> Sheet {
    let rows: Vec<Row> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Sheet::new(name, rows)
}

fn convert_cell(c: &Data) -> CellValue {
    match c {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
