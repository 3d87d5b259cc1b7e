//! Workbook Parser
//!
//! calamineを使用したExcel/ODSファイル解析。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read, Seek};
use tracing::debug;

use crate::error::XlsxToTextError;
use crate::parser::excel_serial;
use crate::types::{CellValue, Sheet};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// XLSX/XLSM/XLSB/XLS/ODSをcalamineの自動判定で開きます。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToTextError::Parse)` - サポートされた形式として解釈できなかった場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, XlsxToTextError> {
        let workbook =
            open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(XlsxToTextError::Parse)?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を宣言順に取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シートをパースして、矩形のセルグリッドを抽出
    ///
    /// calamineの範囲は最初の使用セルから始まるため、先頭の空列は
    /// `CellValue::Absent`で埋めてA列起点のグリッドにします。
    /// 先頭の空行は出力時に必ず除外されるため、埋めません。
    pub fn parse_sheet(&mut self, sheet_name: &str) -> Result<Sheet, XlsxToTextError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(XlsxToTextError::Parse)?;

        let rows = range_to_rows(&range);
        debug!(sheet = sheet_name, rows = rows.len(), "parsed sheet");

        Ok(Sheet::new(sheet_name, rows))
    }
}

/// calamineの範囲をA列起点の行リストに変換
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let leading_cols = range.start().map_or(0, |(_, col)| col as usize);

    range
        .rows()
        .map(|row| {
            let mut cells = Vec::with_capacity(leading_cols + row.len());
            cells.resize(leading_cols, CellValue::Absent);
            cells.extend(row.iter().map(convert_cell));
            cells
        })
        .collect()
}

/// calamineのセルデータをCellValueに変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Absent,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Duration(dt.as_f64())
            } else {
                match dt.as_datetime() {
                    Some(datetime) => CellValue::DateTime {
                        datetime,
                        serial: dt.as_f64(),
                    },
                    // 日付として表現できないシリアル値は数値のまま扱う
                    None => CellValue::Number(dt.as_f64()),
                }
            }
        }
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(datetime) => CellValue::DateTime {
                datetime,
                serial: excel_serial(&datetime),
            },
            None => CellValue::String(s.clone()),
        },
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

/// ODSのISO 8601日時文字列を解析
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            s.parse::<NaiveDate>()
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
