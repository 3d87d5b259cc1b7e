//! Session Module
//!
//! 選択中のファイル名、処理中フラグ、エラーメッセージ、変換結果を保持し、
//! コピー・ダウンロード・クリアの操作を提供するモジュール。
//!
//! 状態は`Session`だけが変更し、表示層には読み取り専用の`SessionState`として公開します。

mod controller;

pub use controller::{SelectedFile, SessionController};

use serde::Serialize;
use tracing::warn;

use crate::clipboard::Clipboard;
use crate::download::Download;
use crate::error::XlsxToTextError;

/// クリップボードへの書き込みに失敗したときに表示するメッセージ
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

/// 表示層から参照されるセッションの状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// 選択されたファイルの表示名
    pub file_name: String,
    /// 変換結果
    pub text: String,
    /// 変換中かどうか
    pub is_processing: bool,
    /// 表示するエラーメッセージ
    pub error: Option<String>,
}

/// 変換の世代を表すチケット
///
/// ファイル選択ごとに発行され、変換完了時に`Session::finish_conversion`へ渡します。
/// 新しい選択が行われた後に古いチケットで完了しても、その結果は破棄されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ConversionTicket {
    generation: u64,
}

/// 変換セッション
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の状態
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// ファイル選択を記録して変換を開始する
    ///
    /// ファイル名を記録し、前回の結果とエラーを消去して処理中にします。
    pub fn begin_conversion(&mut self, file_name: impl Into<String>) -> ConversionTicket {
        self.generation += 1;
        self.state.file_name = file_name.into();
        self.state.text.clear();
        self.state.error = None;
        self.state.is_processing = true;

        ConversionTicket {
            generation: self.generation,
        }
    }

    /// 変換結果を反映する
    ///
    /// 成功時は結果を保持してエラーを消去し、失敗時は結果を消去してエラーメッセージを保持します。
    /// 最新の選択のチケットでなければ何もせず`false`を返します。
    pub fn finish_conversion(
        &mut self,
        ticket: ConversionTicket,
        result: Result<String, XlsxToTextError>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                stale = ticket.generation,
                current = self.generation,
                "discarding result of a superseded conversion"
            );
            return false;
        }

        match result {
            Ok(text) => {
                self.state.text = text;
                self.state.error = None;
            }
            Err(e) => {
                self.state.text.clear();
                self.state.error = Some(e.to_string());
            }
        }
        self.state.is_processing = false;
        true
    }

    /// 変換結果をクリップボードに書き込む
    ///
    /// 結果が空の場合は何もしません。書き込みに失敗した場合は固定のエラーメッセージを設定し、
    /// 結果はそのまま保持します。書き込みに成功した場合に`true`を返します。
    pub fn copy_to_clipboard<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) -> bool {
        if self.state.text.is_empty() {
            return false;
        }

        match clipboard.write_text(&self.state.text) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.state.error = Some(COPY_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// 変換結果をダウンロード用のテキストファイルとして取得する
    ///
    /// 結果が空の場合は`None`を返します。
    pub fn download_as_file(&self) -> Option<Download> {
        if self.state.text.is_empty() {
            return None;
        }
        Some(Download::new(&self.state.file_name, self.state.text.as_str()))
    }

    /// ファイル名・結果・エラーを消去する
    ///
    /// 処理中フラグは変更しません。
    pub fn clear(&mut self) {
        self.state.file_name.clear();
        self.state.text.clear();
        self.state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::error::ClipboardError;

    struct DenyingClipboard;

    impl Clipboard for DenyingClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::new("denied"))
        }
    }

    fn completed_session(file_name: &str, text: &str) -> Session {
        let mut session = Session::new();
        let ticket = session.begin_conversion(file_name);
        assert!(session.finish_conversion(ticket, Ok(text.to_string())));
        session
    }

    #[test]
    fn test_begin_conversion_resets_state() {
        let mut session = Session::new();
        let ticket = session.begin_conversion("old.xlsx");
        session.finish_conversion(ticket, Err(XlsxToTextError::Config("bad".to_string())));
        assert!(session.state().error.is_some());

        let _ticket = session.begin_conversion("new.xlsx");
        let state = session.state();
        assert_eq!(state.file_name, "new.xlsx");
        assert!(state.text.is_empty());
        assert!(state.error.is_none());
        assert!(state.is_processing);
    }

    #[test]
    fn test_finish_conversion_success() {
        let session = completed_session("Report.xlsx", "A\tB\n");
        let state = session.state();
        assert_eq!(state.text, "A\tB\n");
        assert!(state.error.is_none());
        assert!(!state.is_processing);
    }

    #[test]
    fn test_finish_conversion_failure_clears_text() {
        let mut session = completed_session("Report.xlsx", "A\tB\n");
        let ticket = session.begin_conversion("broken.xlsx");
        let error = XlsxToTextError::UnsupportedFormat("input is empty".to_string());
        assert!(session.finish_conversion(ticket, Err(error)));

        let state = session.state();
        assert!(state.text.is_empty());
        assert_eq!(
            state.error.as_deref(),
            Some("Unsupported file format: input is empty")
        );
        assert!(!state.is_processing);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_conversion("first.xlsx");
        let second = session.begin_conversion("second.xlsx");

        assert!(session.finish_conversion(second, Ok("second".to_string())));
        assert!(!session.finish_conversion(first, Ok("first".to_string())));

        let state = session.state();
        assert_eq!(state.file_name, "second.xlsx");
        assert_eq!(state.text, "second");
        assert!(!state.is_processing);
    }

    #[test]
    fn test_stale_ticket_does_not_end_processing() {
        let mut session = Session::new();
        let first = session.begin_conversion("first.xlsx");
        let _second = session.begin_conversion("second.xlsx");

        assert!(!session.finish_conversion(first, Ok("first".to_string())));
        assert!(session.state().is_processing);
        assert!(session.state().text.is_empty());
    }

    #[test]
    fn test_copy_to_clipboard() {
        let mut session = completed_session("Report.xlsx", "A\tB\n");
        let mut clipboard = MemoryClipboard::new();

        assert!(session.copy_to_clipboard(&mut clipboard));
        assert_eq!(clipboard.contents(), Some("A\tB\n"));
    }

    #[test]
    fn test_copy_to_clipboard_failure_keeps_text() {
        let mut session = completed_session("Report.xlsx", "A\tB\n");

        assert!(!session.copy_to_clipboard(&mut DenyingClipboard));
        assert_eq!(session.state().text, "A\tB\n");
        assert_eq!(session.state().error.as_deref(), Some(COPY_FAILED_MESSAGE));
    }

    #[test]
    fn test_copy_with_empty_text_is_noop() {
        let mut session = Session::new();
        let mut clipboard = MemoryClipboard::new();

        assert!(!session.copy_to_clipboard(&mut clipboard));
        assert_eq!(clipboard.contents(), None);

        // 空の場合は失敗するクリップボードにも触れない
        assert!(!session.copy_to_clipboard(&mut DenyingClipboard));
        assert!(session.state().error.is_none());
    }

    #[test]
    fn test_download_as_file() {
        let session = completed_session("Report.xlsx", "A\tB\n");
        let download = session.download_as_file().unwrap();
        assert_eq!(download.file_name(), "Report.txt");
        assert_eq!(download.content(), "A\tB\n");
    }

    #[test]
    fn test_clear_after_success() {
        let mut session = completed_session("Report.xlsx", "A\tB\n");
        session.clear();

        assert_eq!(session.state(), &SessionState::default());
        assert!(session.download_as_file().is_none());

        let mut clipboard = MemoryClipboard::new();
        assert!(!session.copy_to_clipboard(&mut clipboard));
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_clear_leaves_processing_flag() {
        let mut session = Session::new();
        let _ticket = session.begin_conversion("pending.xlsx");
        session.clear();

        assert!(session.state().is_processing);
        assert!(session.state().file_name.is_empty());
    }

    #[test]
    fn test_state_serializes_to_json() {
        let session = completed_session("Report.xlsx", "A\tB\n");
        let json = serde_json::to_value(session.state()).unwrap();
        assert_eq!(json["file_name"], "Report.xlsx");
        assert_eq!(json["text"], "A\tB\n");
        assert_eq!(json["is_processing"], false);
        assert!(json["error"].is_null());
    }
}
