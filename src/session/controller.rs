//! Session Controller
//!
//! ファイル選択・コピー・ダウンロード・クリアの4つの操作を受け付け、
//! 非同期にファイルを読み込んで`Session`を更新します。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::builder::Converter;
use crate::clipboard::Clipboard;
use crate::download::Download;
use crate::error::XlsxToTextError;
use crate::session::{Session, SessionState};

/// ユーザーが選択したファイル
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    source: FileSource,
}

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl SelectedFile {
    /// ファイルシステム上のファイルを選択する。表示名はパスのファイル名部分
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// 読み込み済みの内容を持つファイルを選択する
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes.into()),
        }
    }

    /// 表示名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ファイルの内容全体を読み込む
    async fn read(&self) -> Result<Vec<u8>, XlsxToTextError> {
        match &self.source {
            FileSource::Path(path) => Ok(tokio::fs::read(path).await?),
            FileSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// パスから選択された場合のパス
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Bytes(_) => None,
        }
    }
}

/// セッションコントローラー
///
/// セッションの状態はコントローラーが所有し、表示層には`snapshot()`で複製を渡します。
/// ファイル選択が重なった場合は、最後に選択されたファイルの結果だけが反映されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtext::{ConverterBuilder, SelectedFile, SessionController};
///
/// # async fn run() -> Result<(), xlsxtext::XlsxToTextError> {
/// let controller = SessionController::new(ConverterBuilder::new().build()?);
/// controller.on_file_selected(&SelectedFile::from_path("Report.xlsx")).await;
///
/// if let Some(download) = controller.download_as_file().await {
///     download.save_to(std::path::Path::new("."))?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionController {
    converter: Converter,
    session: Mutex<Session>,
}

impl SessionController {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            session: Mutex::new(Session::new()),
        }
    }

    /// ファイルが選択されたときの処理
    ///
    /// ファイルの読み込みが唯一の待機点です。変換結果が反映された場合に`true`、
    /// 後から選択されたファイルによって結果が破棄された場合に`false`を返します。
    pub async fn on_file_selected(&self, file: &SelectedFile) -> bool {
        let ticket = self.session.lock().await.begin_conversion(file.name());
        debug!(file = file.name(), "file selected");

        let result = match file.read().await {
            Ok(bytes) => self.converter.convert_bytes(&bytes),
            Err(e) => Err(e),
        };

        self.session.lock().await.finish_conversion(ticket, result)
    }

    /// 変換結果をクリップボードに書き込む
    pub async fn copy_to_clipboard<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> bool {
        self.session.lock().await.copy_to_clipboard(clipboard)
    }

    /// 変換結果をダウンロード用のファイルとして取得する
    pub async fn download_as_file(&self) -> Option<Download> {
        self.session.lock().await.download_as_file()
    }

    /// セッションをクリアする
    pub async fn clear(&self) {
        self.session.lock().await.clear();
    }

    /// 現在の状態の複製
    pub async fn snapshot(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }
}
