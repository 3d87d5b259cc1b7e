//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use rayon::prelude::*;
use std::io::{BufWriter, Read, Write};
use tracing::{debug, info};

use crate::api::{DateFormat, SheetSelector};
use crate::error::XlsxToTextError;
use crate::formatter::{is_valid_date_format, CellFormatter};
use crate::output::TextRenderer;
use crate::security::SecurityConfig;
use crate::types::Workbook;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// CSV入力のフィールド区切り文字
    pub csv_delimiter: u8,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            date_format: DateFormat::Iso8601,
            csv_delimiter: b',',
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtext::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxtext::XlsxToTextError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Index(0))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 日付形式: ISO 8601
    /// - CSV区切り文字: `,`
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxtext::{ConverterBuilder, SheetSelector};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Summary".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// CSV入力のフィールド区切り文字を指定する
    ///
    /// 改行文字とダブルクォートは指定できません（`build()`で検証）。
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.config.csv_delimiter = delimiter;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, max_bytes: u64) -> Self {
        self.config.security.max_input_file_size = max_bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToTextError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式文字列
    ///   * CSV区切り文字が改行文字またはダブルクォート
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, XlsxToTextError> {
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            if !is_valid_date_format(format_str) {
                return Err(XlsxToTextError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        if matches!(self.config.csv_delimiter, b'\n' | b'\r' | b'"') {
            return Err(XlsxToTextError::Config(format!(
                "Invalid CSV delimiter: {:?}",
                self.config.csv_delimiter as char
            )));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(XlsxToTextError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシートをプレーンテキストに変換するためのメインエントリーポイントです。
/// 同じ入力に対しては常に同じテキストを返します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtext::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxtext::XlsxToTextError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("example.xlsx")?;
/// let text = converter.convert_to_string(input)?;
/// print!("{}", text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(),
            config,
        }
    }

    /// 入力を読み込んでテキストに変換し、出力先に書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込む（サイズ制限付き）
    /// 2. 形式を判定してワークブックを解析
    /// 3. 各シートを並列にテキスト化し、宣言順に連結
    /// 4. 出力バッファをフラッシュ
    ///
    /// 失敗した場合、出力先には何も書き込みません。
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), XlsxToTextError> {
        let buffer = self.config.security.read_limited(input)?;
        let text = self.convert_buffer(buffer)?;

        let mut writer = BufWriter::new(output);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    /// 入力を読み込んでテキストに変換する
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, XlsxToTextError> {
        let buffer = self.config.security.read_limited(input)?;
        self.convert_buffer(buffer)
    }

    /// メモリ上のファイル内容をテキストに変換する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxtext::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxtext::XlsxToTextError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let text = converter.convert_bytes(b"a,b\n1,2\n")?;
    /// assert_eq!(text, "===== Sheet1 =====\na\tb\n1\t2\n\n");
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String, XlsxToTextError> {
        self.config.security.check_input_size(bytes.len() as u64)?;
        self.convert_buffer(bytes.to_vec())
    }

    /// 解析済みのワークブックをテキストに変換する
    ///
    /// シートごとのテキスト化は並列に行い、結果は宣言順に連結します。
    pub fn render_workbook(&self, workbook: &Workbook) -> Result<String, XlsxToTextError> {
        let renderer = TextRenderer::new(&self.formatter, &self.config);

        let blocks: Vec<Vec<u8>> = workbook
            .sheets()
            .par_iter()
            .map(|sheet| -> Result<Vec<u8>, XlsxToTextError> {
                let mut block = Vec::new();
                renderer.render_sheet(sheet, &mut block)?;
                Ok(block)
            })
            .collect::<Result<_, _>>()?;

        let text = String::from_utf8(blocks.concat()).map_err(|e| {
            XlsxToTextError::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(text)
    }

    fn convert_buffer(&self, buffer: Vec<u8>) -> Result<String, XlsxToTextError> {
        let bytes = buffer.len();
        let workbook = crate::parser::parse_workbook(buffer, &self.config)?;
        debug!(sheets = workbook.sheets().len(), "workbook parsed");

        let text = self.render_workbook(&workbook)?;
        info!(
            bytes,
            sheets = workbook.sheets().len(),
            chars = text.len(),
            "conversion completed"
        );

        Ok(text)
    }
}
