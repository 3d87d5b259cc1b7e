//! Output Module
//!
//! シートをプレーンテキストのブロックとして出力するモジュール。
//!
//! 各シートは次の形式で出力されます。
//!
//! ```text
//! ===== Sheet1 =====
//! a	b
//!
//! ```
//!
//! ヘッダー行、空でない行ごとにタブ区切りの1行、最後に空行が1行続きます。

use std::io::Write;

use crate::builder::ConversionConfig;
use crate::error::XlsxToTextError;
use crate::formatter::CellFormatter;
use crate::types::{CellValue, Sheet};

/// シート名を囲む区切り記号
pub(crate) const SHEET_DELIMITER: &str = "=====";

/// セルの区切り文字
pub(crate) const CELL_SEPARATOR: char = '\t';

/// テキストレンダラー
pub(crate) struct TextRenderer<'a> {
    formatter: &'a CellFormatter,
    config: &'a ConversionConfig,
}

impl<'a> TextRenderer<'a> {
    pub fn new(formatter: &'a CellFormatter, config: &'a ConversionConfig) -> Self {
        Self { formatter, config }
    }

    /// シートを1ブロックとして出力する
    pub fn render_sheet<W: Write>(
        &self,
        sheet: &Sheet,
        writer: &mut W,
    ) -> Result<(), XlsxToTextError> {
        writeln!(
            writer,
            "{} {} {}",
            SHEET_DELIMITER,
            sheet.name(),
            SHEET_DELIMITER
        )?;

        for row in sheet.rows().iter().filter(|row| !is_blank_row(row)) {
            self.render_row(row, writer)?;
        }

        writeln!(writer)?;
        Ok(())
    }

    fn render_row<W: Write>(
        &self,
        row: &[CellValue],
        writer: &mut W,
    ) -> Result<(), XlsxToTextError> {
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx > 0 {
                write!(writer, "{}", CELL_SEPARATOR)?;
            }
            write!(writer, "{}", self.formatter.format_cell(cell, self.config))?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// すべてのセルが値なし、または空文字列の行
fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}
