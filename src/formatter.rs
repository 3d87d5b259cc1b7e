//! Formatter Module
//!
//! セル値を文字列に変換するモジュール。
//! すべてのセル型に対して単一の文字列化規則を適用し、出力を決定的にします。

use chrono::{NaiveDate, NaiveDateTime, SubsecRound, Timelike};
use std::fmt::Write;

use crate::api::DateFormat;
use crate::builder::ConversionConfig;
use crate::types::CellValue;

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セル値をフォーマット
    ///
    /// * `Absent` → 空文字列
    /// * 文字列・エラー値 → そのまま
    /// * 数値 → 最短の10進表記（`1.0` は `1`）
    /// * 論理値 → `true` / `false`
    /// * 日時 → 設定された`DateFormat`
    /// * 時間 → `H:MM:SS`
    pub fn format_cell(&self, value: &CellValue, config: &ConversionConfig) -> String {
        match value {
            CellValue::Absent => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Number(n) => self.number_formatter.format(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime { datetime, serial } => match config.date_format {
                DateFormat::Serial => self.number_formatter.format(*serial),
                _ => self.date_formatter.format(datetime, &config.date_format),
            },
            CellValue::Duration(days) => match config.date_format {
                DateFormat::Serial => self.number_formatter.format(*days),
                _ => self.date_formatter.format_duration(*days),
            },
            CellValue::Error(e) => e.clone(),
        }
    }
}

/// 日付フォーマッター
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日時をフォーマット
    ///
    /// 秒未満は丸めます。`DateFormat::Iso8601`では時刻が0時0分0秒の場合に日付のみを出力します。
    /// カスタム形式の書式化に失敗した場合はISO 8601形式にフォールバックします。
    pub fn format(&self, datetime: &NaiveDateTime, date_format: &DateFormat) -> String {
        let datetime = datetime.round_subsecs(0);

        if let DateFormat::Custom(format_str) = date_format {
            if let Some(formatted) = try_format(&datetime, format_str) {
                return formatted;
            }
        }

        if datetime.num_seconds_from_midnight() == 0 {
            datetime.format("%Y-%m-%d").to_string()
        } else {
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }

    /// 日数単位の時間を `H:MM:SS` 形式でフォーマット
    ///
    /// 24時間を超える場合も時の部分は繰り上げません（例: `36:00:00`）。
    pub fn format_duration(&self, days: f64) -> String {
        let total_seconds = (days * 86_400.0).round() as i64;
        let sign = if total_seconds < 0 { "-" } else { "" };
        let total_seconds = total_seconds.unsigned_abs();

        format!(
            "{}{}:{:02}:{:02}",
            sign,
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60
        )
    }
}

/// chronoの書式文字列で日時を書式化する。書式が不正な場合は`None`
fn try_format(datetime: &NaiveDateTime, format_str: &str) -> Option<String> {
    let mut formatted = String::new();
    write!(formatted, "{}", datetime.format(format_str)).ok()?;
    Some(formatted)
}

/// カスタム日付形式が有効かを検証（`ConverterBuilder::build()`で使用）
pub(crate) fn is_valid_date_format(format_str: &str) -> bool {
    if format_str.is_empty() {
        return false;
    }
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|datetime| try_format(&datetime, format_str))
        .is_some_and(|formatted| !formatted.is_empty())
}

/// 数値フォーマッター
#[derive(Debug, Default)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値を最短の10進表記に変換
    ///
    /// 負のゼロは `0` として出力します。
    pub fn format(&self, value: f64) -> String {
        if value == 0.0 {
            "0".to_string()
        } else {
            value.to_string()
        }
    }
}
