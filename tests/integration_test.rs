//! Integration Tests for xlsxtext
//!
//! rust_xlsxwriterで生成したワークブックを変換し、出力テキストを検証します。

use rust_xlsxwriter::*;
use std::io::Cursor;
use xlsxtext::{ConverterBuilder, DateFormat, ErrorKind, SheetSelector, XlsxToTextError};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Generate a simple 2x2 table Excel file
    pub fn generate_simple_table() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // Header row
        worksheet.write_string(0, 0, "Header1")?;
        worksheet.write_string(0, 1, "Header2")?;

        // Data row
        worksheet.write_string(1, 0, "Data1")?;
        worksheet.write_string(1, 1, "Data2")?;

        workbook.save_to_buffer()
    }

    /// Generate a workbook with 3 sheets
    pub fn generate_multi_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        for name in ["First", "Second", "Third"] {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            sheet.write_string(0, 0, format!("{}_Data", name))?;
        }

        workbook.save_to_buffer()
    }

    /// Generate a sheet with an empty row between data rows
    pub fn generate_with_blank_rows() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "a")?;
        worksheet.write_string(0, 1, "b")?;
        // row 1 and 2 are left empty
        worksheet.write_string(3, 0, "c")?;

        workbook.save_to_buffer()
    }

    /// Generate a sheet with gaps inside rows and an empty column A
    pub fn generate_sparse() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // B1, D1
        worksheet.write_string(0, 1, "b")?;
        worksheet.write_string(0, 3, "d")?;
        // C2
        worksheet.write_string(1, 2, "c")?;

        workbook.save_to_buffer()
    }

    /// Generate a sheet with numbers, booleans and dates
    pub fn generate_typed_values() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        worksheet.write_number(0, 0, 10.0)?;
        worksheet.write_number(0, 1, 1.5)?;
        worksheet.write_number(0, 2, -3.0)?;
        worksheet.write_boolean(0, 3, true)?;
        worksheet.write_boolean(0, 4, false)?;

        let date = ExcelDateTime::from_ymd(2025, 11, 20)?;
        worksheet.write_datetime_with_format(1, 0, &date, &date_format)?;

        let datetime = ExcelDateTime::from_ymd(2025, 11, 20)?.and_hms(13, 45, 0)?;
        worksheet.write_datetime_with_format(1, 1, &datetime, &datetime_format)?;

        workbook.save_to_buffer()
    }
}

#[test]
fn test_simple_table_conversion() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_simple_table().unwrap();

    let text = converter.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(
        text,
        "===== Sheet1 =====\nHeader1\tHeader2\nData1\tData2\n\n"
    );
}

#[test]
fn test_multiple_sheets_in_declaration_order() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert_eq!(
        text,
        "===== First =====\nFirst_Data\n\n\
         ===== Second =====\nSecond_Data\n\n\
         ===== Third =====\nThird_Data\n\n"
    );
    assert_eq!(text.matches("=====\n").count(), 3);
}

#[test]
fn test_blank_rows_are_omitted() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_with_blank_rows().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    // 空行の除外後も列の位置は保たれる
    assert_eq!(text, "===== Sheet1 =====\na\tb\nc\t\n\n");
}

#[test]
fn test_absent_cells_render_as_empty_fields() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_sparse().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert_eq!(text, "===== Sheet1 =====\n\tb\t\td\n\t\tc\t\n\n");
}

#[test]
fn test_typed_values() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_typed_values().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "===== Sheet1 =====");
    assert_eq!(lines[1], "10\t1.5\t-3\ttrue\tfalse");
    assert_eq!(lines[2], "2025-11-20\t2025-11-20 13:45:00\t\t\t");
}

#[test]
fn test_date_format_serial() {
    let converter = ConverterBuilder::new()
        .with_date_format(DateFormat::Serial)
        .with_sheet_selector(SheetSelector::Index(0))
        .build()
        .unwrap();
    let excel_data = fixtures::generate_typed_values().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert!(
        text.contains("\n45981\t"),
        "Expected serial date value. Got: {}",
        text
    );
}

#[test]
fn test_date_format_custom() {
    let converter = ConverterBuilder::new()
        .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
        .build()
        .unwrap();
    let excel_data = fixtures::generate_typed_values().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert!(text.contains("\n2025/11/20\t2025/11/20\t"), "Got: {}", text);
}

#[test]
fn test_conversion_is_idempotent() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let first = converter.convert_bytes(&excel_data).unwrap();
    let second = converter.convert_bytes(&excel_data).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sheet_selection_by_index() {
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Index(1))
        .build()
        .unwrap();
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert_eq!(text, "===== Second =====\nSecond_Data\n\n");
}

#[test]
fn test_sheet_selection_by_names_keeps_given_order() {
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Names(vec![
            "Third".to_string(),
            "First".to_string(),
        ]))
        .build()
        .unwrap();
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let text = converter.convert_bytes(&excel_data).unwrap();

    assert_eq!(
        text,
        "===== Third =====\nThird_Data\n\n===== First =====\nFirst_Data\n\n"
    );
}

#[test]
fn test_sheet_selection_errors() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Index(10))
        .build()
        .unwrap();
    match converter.convert_bytes(&excel_data) {
        Err(XlsxToTextError::Config(msg)) => assert!(msg.contains("out of range")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Missing".to_string()))
        .build()
        .unwrap();
    match converter.convert_bytes(&excel_data) {
        Err(XlsxToTextError::Config(msg)) => assert!(msg.contains("'Missing' not found")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_corrupt_zip_is_parse_error() {
    let converter = ConverterBuilder::new().build().unwrap();
    let mut data = b"PK\x03\x04".to_vec();
    data.extend_from_slice(&[0u8; 64]);

    let result = converter.convert_bytes(&data);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().starts_with("Failed to parse spreadsheet"));
}

#[test]
fn test_truncated_workbook_is_error() {
    let converter = ConverterBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_simple_table().unwrap();

    let result = converter.convert_bytes(&excel_data[..excel_data.len() / 2]);

    assert!(result.is_err());
}

#[test]
fn test_unsupported_inputs() {
    let converter = ConverterBuilder::new().build().unwrap();

    for input in [&b""[..], &[0xFF, 0xFE, 0x00, 0x81][..]] {
        match converter.convert_bytes(input) {
            Err(e @ XlsxToTextError::UnsupportedFormat(_)) => {
                assert_eq!(e.kind(), ErrorKind::Parse);
            }
            other => panic!("Expected UnsupportedFormat error, got {:?}", other),
        }
    }
}

#[test]
fn test_csv_input() {
    let converter = ConverterBuilder::new().build().unwrap();

    let text = converter
        .convert_bytes("\u{feff}Name,Age\nAlice,30\n,\nBob,\n".as_bytes())
        .unwrap();

    assert_eq!(text, "===== Sheet1 =====\nName\tAge\nAlice\t30\nBob\t\n\n");
}

#[test]
fn test_csv_input_with_custom_delimiter_and_ragged_rows() {
    let converter = ConverterBuilder::new()
        .with_csv_delimiter(b';')
        .build()
        .unwrap();

    let text = converter.convert_bytes(b"a;b;c\nd\n").unwrap();

    assert_eq!(text, "===== Sheet1 =====\na\tb\tc\nd\t\t\n\n");
}

#[test]
fn test_convert_writes_nothing_on_error() {
    let converter = ConverterBuilder::new().build().unwrap();
    let mut output = Vec::new();

    let result = converter.convert(Cursor::new(vec![0xFFu8; 8]), &mut output);

    assert!(result.is_err());
    assert!(output.is_empty());
}
