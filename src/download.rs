//! Download Module
//!
//! 変換結果をダウンロード可能なプレーンテキストとして表現するモジュール。

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// ダウンロードファイルのコンテンツタイプ
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// ダウンロードファイルの拡張子
const TEXT_EXTENSION: &str = "txt";

/// 元のファイル名が空の場合に使用するベース名
const FALLBACK_BASE_NAME: &str = "download";

/// ダウンロード可能なテキストファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    file_name: String,
    content_type: &'static str,
    content: String,
}

impl Download {
    /// 元のファイル名と変換結果からダウンロードを生成
    pub fn new(source_file_name: &str, content: impl Into<String>) -> Self {
        Self {
            file_name: download_file_name(source_file_name),
            content_type: TEXT_CONTENT_TYPE,
            content: content.into(),
        }
    }

    /// ダウンロードファイル名（`<ベース名>.txt`）
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// コンテンツタイプ（常に`text/plain; charset=utf-8`）
    pub fn content_type(&self) -> &str {
        self.content_type
    }

    /// ファイルの内容
    pub fn content(&self) -> &str {
        &self.content
    }

    /// ディレクトリにファイルとして保存し、保存先のパスを返す
    pub fn save_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.content.as_bytes())?;
        Ok(path)
    }
}

/// 元のファイル名からダウンロードファイル名を生成
///
/// パス区切りより前の部分と、最後の拡張子を取り除いて`.txt`を付けます。
/// 先頭のドットは拡張子として扱いません（`.hidden` → `.hidden.txt`）。
///
/// ```
/// use xlsxtext::download_file_name;
///
/// assert_eq!(download_file_name("Report.xlsx"), "Report.txt");
/// assert_eq!(download_file_name("archive.tar.gz"), "archive.tar.txt");
/// assert_eq!(download_file_name("README"), "README.txt");
/// ```
pub fn download_file_name(source_file_name: &str) -> String {
    let base = source_file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(source_file_name);

    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };

    let stem = if stem.is_empty() {
        FALLBACK_BASE_NAME
    } else {
        stem
    };

    format!("{}.{}", stem, TEXT_EXTENSION)
}
