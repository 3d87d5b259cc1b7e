//! Clipboard Module
//!
//! プラットフォームのクリップボードを抽象化するトレイト。
//! 実際の書き込み先（ブラウザ、OS、テスト用バッファ）は呼び出し側が実装します。

use crate::error::ClipboardError;

/// テキストを書き込めるクリップボード
pub trait Clipboard {
    /// テキスト全体をクリップボードに書き込む
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// メモリ上のクリップボード
///
/// 最後に書き込まれたテキストを保持します。CLIやテストで使用します。
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最後に書き込まれたテキスト
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
