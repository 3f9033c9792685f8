//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, SHEET_NAME};
use engine::{datetime_to_excel_serial, Column, Table, Value};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Excel number format used for the date columns.
const DATE_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Encode the table as an in-memory `.xlsx` file: one sheet, a header row,
/// then one row per record.
pub fn write_table_xlsx(table: &Table) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    fill_worksheet(worksheet, table)?;
    Ok(xlsx.save_to_buffer()?)
}

/// Write the same workbook as `write_table_xlsx` to disk.
pub fn save_table_xlsx(table: &Table, path: &Path) -> Result<(), PersistenceError> {
    let buffer = write_table_xlsx(table)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

/// Width of each column in characters: the longer of the header and the
/// longest cell string.
pub fn column_widths(table: &Table) -> Vec<usize> {
    Column::ALL
        .iter()
        .map(|column| {
            let header = column.header().chars().count();
            let longest = table
                .iter()
                .map(|record| record.value(*column).display_value().chars().count())
                .max()
                .unwrap_or(0);
            header.max(longest)
        })
        .collect()
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &Table) -> Result<(), PersistenceError> {
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    for column in Column::ALL {
        worksheet.write_string_with_format(0, column.index() as u16, column.header(), &header_format)?;
    }

    for (i, record) in table.iter().enumerate() {
        let row = (i + 1) as u32;
        for column in Column::ALL {
            let col = column.index() as u16;
            match record.value(column) {
                Value::Null => {}
                Value::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(row, col, &s)?;
                }
                Value::Date(d) => {
                    worksheet.write_number_with_format(row, col, datetime_to_excel_serial(&d), &date_format)?;
                }
            }
        }
    }

    for (col, width) in column_widths(table).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(())
}
