//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// 解析ライブラリから得られる動的な値を閉じた列挙型として扱い、
/// 文字列化の規則を一箇所（`CellFormatter`）に集約します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 値が存在しないセル
    Absent,

    /// 文字列
    String(String),

    /// 整数
    Int(i64),

    /// 浮動小数点数
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日時
    ///
    /// `serial` はスプレッドシートのシリアル値（1900年システム換算）です。
    DateTime { datetime: NaiveDateTime, serial: f64 },

    /// 時間（経過時間）。値は日数単位
    Duration(f64),

    /// エラー値（例: #DIV/0!）
    Error(String),
}

impl CellValue {
    /// 文字列セルを生成
    pub fn string(s: impl Into<String>) -> Self {
        CellValue::String(s.into())
    }

    /// 行の空判定に使用する: 値なし、または空文字列
    ///
    /// 空白文字のみの文字列は空として扱いません。
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Absent => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Absent, Into::into)
    }
}

/// 名前付きのシート（セル値の2次元グリッド）
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// シート名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 行のリスト
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// 解析済みのワークブック（順序付きのシート集合）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// シートのリストからワークブックを生成
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// 宣言順のシート
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}
