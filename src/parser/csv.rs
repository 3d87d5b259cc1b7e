//! CSV Parser
//!
//! UTF-8テキスト入力をcsvクレートで解析し、単一シートのグリッドに変換します。

use ::csv::ReaderBuilder;
use tracing::debug;

use crate::error::XlsxToTextError;
use crate::parser::DEFAULT_SHEET_NAME;
use crate::types::{CellValue, Sheet};

/// CSVパーサー
#[derive(Debug, Clone, Copy)]
pub(crate) struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// CSVテキストを`Sheet1`という名前のシートに変換
    ///
    /// フィールドはすべて文字列セルになります。行の長さが揃っていない場合は、
    /// 最長の行に合わせて`CellValue::Absent`で埋めて矩形にします。
    pub fn parse(&self, text: &str) -> Result<Sheet, XlsxToTextError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| CellValue::String(field.to_string()))
                    .collect::<Vec<_>>(),
            );
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Absent);
        }

        debug!(rows = rows.len(), columns = width, "parsed CSV input");
        Ok(Sheet::new(DEFAULT_SHEET_NAME, rows))
    }
}
