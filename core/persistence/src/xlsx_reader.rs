//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{PersistenceError, SHEET_NAME};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use engine::{excel_serial_to_datetime, Column, Value, COLUMN_COUNT};
use std::io::Cursor;
use std::path::Path;

/// Read an exported snapshot from disk into raw positional rows.
/// The header row is checked against the view schema and dropped.
pub fn read_table_xlsx(path: &Path) -> Result<Vec<Vec<Value>>, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = snapshot_range(&mut workbook)?;
    rows_from_range(&range)
}

/// Same as `read_table_xlsx`, for a workbook already in memory.
pub fn read_table_xlsx_bytes(bytes: &[u8]) -> Result<Vec<Vec<Value>>, PersistenceError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = snapshot_range(&mut workbook)?;
    rows_from_range(&range)
}

/// The snapshot sheet, or the first sheet when it was renamed.
fn snapshot_range<RS>(workbook: &mut Xlsx<RS>) -> Result<Range<Data>, PersistenceError>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let name = sheet_names
        .iter()
        .find(|n| n.as_str() == SHEET_NAME)
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| PersistenceError::SheetNotFound(SHEET_NAME.to_string()))?;

    Ok(workbook.worksheet_range(&name)?)
}

fn rows_from_range(range: &Range<Data>) -> Result<Vec<Vec<Value>>, PersistenceError> {
    let mut rows = range.rows();

    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(Vec::new()),
    };
    check_header(header)?;

    let mut result = Vec::new();
    for row in rows {
        let mut values: Vec<Value> = row.iter().take(COLUMN_COUNT).map(to_value).collect();
        // Trailing blank cells are not stored in the sheet
        values.resize(COLUMN_COUNT, Value::Null);
        result.push(values);
    }
    Ok(result)
}

fn check_header(header: &[Data]) -> Result<(), PersistenceError> {
    let names: Vec<String> = header
        .iter()
        .map(|cell| cell.to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.len() != COLUMN_COUNT {
        return Err(PersistenceError::ColumnCount {
            expected: COLUMN_COUNT,
            found: names.len(),
        });
    }

    for (i, (column, found)) in Column::ALL.iter().zip(names.iter()).enumerate() {
        if column.header() != found {
            return Err(PersistenceError::HeaderMismatch {
                column: i,
                expected: column.header().to_string(),
                found: found.clone(),
            });
        }
    }
    Ok(())
}

fn to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::Error(_) => Value::Null,
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(Value::Date)
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_table_xlsx;
    use engine::{Record, Table};

    #[test]
    fn test_reads_back_written_snapshot() {
        let record = Record {
            cliente: Some("ACME".to_string()),
            valor_liquido: Some(1234.5),
            data_oficial_faturamento: engine::parse_date("2025-10-01"),
            ..Default::default()
        };
        let table = Table::from_records(vec![record.clone()]);
        let buffer = write_table_xlsx(&table).unwrap();

        let rows = read_table_xlsx_bytes(&buffer).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), COLUMN_COUNT);
        assert_eq!(rows[0][Column::Cliente.index()], Value::Text("ACME".to_string()));
        assert_eq!(rows[0][Column::ValorLiquido.index()], Value::Number(1234.5));
        assert_eq!(
            rows[0][Column::DataOficialFaturamento.index()],
            Value::from(record.data_oficial_faturamento)
        );
    }

    #[test]
    fn test_empty_snapshot_has_no_rows() {
        let buffer = write_table_xlsx(&Table::new()).unwrap();
        assert!(read_table_xlsx_bytes(&buffer).unwrap().is_empty());
    }

    #[test]
    fn test_header_check() {
        let mut header: Vec<Data> = Column::ALL
            .iter()
            .map(|c| Data::String(c.header().to_string()))
            .collect();
        assert!(check_header(&header).is_ok());

        header.swap(8, 9);
        assert!(matches!(
            check_header(&header),
            Err(PersistenceError::HeaderMismatch { column: 8, .. })
        ));

        header.pop();
        assert!(matches!(
            check_header(&header),
            Err(PersistenceError::ColumnCount { found: 27, .. })
        ));
    }
}
