//! Parser Module
//!
//! 入力バイト列の形式を判定し、`Workbook`へ解析するモジュール。
//! スプレッドシート形式はcalamine、テキスト形式はcsvクレートに委譲します。

mod csv;
mod workbook;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::api::SheetSelector;
use crate::builder::ConversionConfig;
use crate::error::XlsxToTextError;
use crate::types::Workbook;

pub(crate) use self::csv::CsvParser;
pub(crate) use self::workbook::WorkbookParser;

/// ZIPアーカイブ（XLSX/XLSM/XLSB/ODS）のマジックナンバー
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE複合ドキュメント（XLS）のマジックナンバー
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// UTF-8のBOM
const UTF8_BOM: &str = "\u{feff}";

/// 入力の形式
///
/// 拡張子やMIMEタイプは参考情報に過ぎないため、内容から判定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceFormat {
    /// calamineで扱うバイナリ/XML系のスプレッドシート
    Spreadsheet,
    /// UTF-8テキスト（CSVとして扱う）
    Text,
    /// 判定不能
    Unknown,
}

impl SourceFormat {
    /// バイト列の先頭から形式を判定
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            SourceFormat::Unknown
        } else if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            SourceFormat::Spreadsheet
        } else if std::str::from_utf8(bytes).is_ok() {
            SourceFormat::Text
        } else {
            SourceFormat::Unknown
        }
    }
}

/// バイト列をワークブックに解析し、設定に従ってシートを選択する
pub(crate) fn parse_workbook(
    buffer: Vec<u8>,
    config: &ConversionConfig,
) -> Result<Workbook, XlsxToTextError> {
    let format = SourceFormat::detect(&buffer);
    debug!(?format, bytes = buffer.len(), "detected input format");

    match format {
        SourceFormat::Spreadsheet => {
            let mut parser = WorkbookParser::open(buffer)?;
            let sheet_names = select_sheets(&parser.sheet_names(), &config.sheet_selector)?;
            let sheets = sheet_names
                .iter()
                .map(|name| parser.parse_sheet(name))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Workbook::new(sheets))
        }
        SourceFormat::Text => {
            let text = String::from_utf8(buffer).map_err(|e| {
                XlsxToTextError::UnsupportedFormat(format!("input is not valid UTF-8: {}", e))
            })?;
            let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
            let sheet = CsvParser::new(config.csv_delimiter).parse(text)?;
            let selected = select_sheets(&[sheet.name().to_string()], &config.sheet_selector)?;
            let sheets = selected.iter().map(|_| sheet.clone()).collect();
            Ok(Workbook::new(sheets))
        }
        SourceFormat::Unknown => Err(XlsxToTextError::UnsupportedFormat(if buffer.is_empty() {
            "input is empty".to_string()
        } else {
            "input is neither a spreadsheet nor UTF-8 text".to_string()
        })),
    }
}

/// シート選択方式に基づいてシートを選択
///
/// # 戻り値
///
/// * `Ok(Vec<String>)` - 選択されたシート名のリスト（選択方式の指定順）
/// * `Err(XlsxToTextError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
pub(crate) fn select_sheets(
    all_sheet_names: &[String],
    selector: &SheetSelector,
) -> Result<Vec<String>, XlsxToTextError> {
    let by_index = |index: usize| -> Result<String, XlsxToTextError> {
        all_sheet_names.get(index).cloned().ok_or_else(|| {
            XlsxToTextError::Config(format!(
                "Sheet index {} is out of range (total: {})",
                index,
                all_sheet_names.len()
            ))
        })
    };
    let by_name = |name: &String| -> Result<String, XlsxToTextError> {
        if all_sheet_names.contains(name) {
            Ok(name.clone())
        } else {
            Err(XlsxToTextError::Config(format!("Sheet '{}' not found", name)))
        }
    };

    match selector {
        SheetSelector::All => Ok(all_sheet_names.to_vec()),
        SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
        SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
        SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
        SheetSelector::Names(names) => names.iter().map(by_name).collect(),
    }
}

/// 1970-01-01のシリアル値（1900年システム）
const UNIX_EPOCH_SERIAL: f64 = 25_569.0;

/// 日時を1900年システムのシリアル値に変換
///
/// 1900年3月1日以降の日付で正しい値になります（1900年うるう年バグのため）。
pub(crate) fn excel_serial(datetime: &NaiveDateTime) -> f64 {
    datetime.and_utc().timestamp() as f64 / 86_400.0 + UNIX_EPOCH_SERIAL
}

/// CSVなどの単一シート入力に付けるシート名
pub(crate) const DEFAULT_SHEET_NAME: &str = "Sheet1";
