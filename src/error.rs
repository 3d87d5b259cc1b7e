//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxtextクレート全体で使用するエラー型
///
/// ファイルの読み込み、解析、変換処理中に発生するすべてのエラーを
/// 統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Read`: 入力バイト列を読み込めなかったエラー
/// - `Parse` / `Csv` / `UnsupportedFormat`: 入力をスプレッドシートとして解釈できなかったエラー
/// - `Config`: 設定の検証に失敗したエラー（無効なシート指定など）
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtext::XlsxToTextError;
/// use std::fs::File;
///
/// fn read_excel_file(path: &str) -> Result<(), XlsxToTextError> {
///     let file = File::open(path)?;  // Readエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToTextError {
    /// 入力の読み込み中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// CSVの解析中に発生したエラー
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// サポートされていない入力形式
    ///
    /// 空のファイルや、スプレッドシートでもUTF-8テキストでもないバイト列の場合に発生します。
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時、またはシート選択時に無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxtext::{ConverterBuilder, XlsxToTextError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_max_input_size(0)
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxToTextError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズが上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// エラーの大分類
///
/// セッション層ではこの分類に関係なくメッセージのみを表示しますが、
/// 呼び出し側で読み込み失敗と解析失敗を区別したい場合に使用します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力を読み込めなかった
    Read,
    /// 入力をスプレッドシートとして解釈できなかった
    Parse,
    /// 設定または制限の違反
    Config,
}

impl XlsxToTextError {
    /// エラーの大分類を返す
    pub fn kind(&self) -> ErrorKind {
        match self {
            XlsxToTextError::Read(_) => ErrorKind::Read,
            XlsxToTextError::Parse(_)
            | XlsxToTextError::Csv(_)
            | XlsxToTextError::UnsupportedFormat(_) => ErrorKind::Parse,
            XlsxToTextError::Config(_) | XlsxToTextError::SecurityViolation(_) => {
                ErrorKind::Config
            }
        }
    }
}

/// クリップボードへの書き込みに失敗したエラー
///
/// プラットフォームが書き込みを拒否した場合などに発生します。
/// セッションはこのエラーを固定メッセージに変換し、変換結果は保持したままにします。
#[derive(Error, Debug)]
#[error("Clipboard write failed: {reason}")]
pub struct ClipboardError {
    reason: String,
}

impl ClipboardError {
    /// 新しいClipboardErrorを生成
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// 失敗の理由
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
