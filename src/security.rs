//! Security Module
//!
//! 入力サイズ制限を実装するモジュール。
//! 上限を超える入力はメモリに読み込む前に打ち切ります。

use std::io::Read;

use crate::error::XlsxToTextError;

/// 入力ファイルの最大サイズのデフォルト値（2GB）
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 2_147_483_648;

/// セキュリティ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証
    pub fn check_input_size(&self, len: u64) -> Result<(), XlsxToTextError> {
        if len > self.max_input_file_size {
            return Err(XlsxToTextError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                len, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// 上限+1バイトまでを読み込み、超過していればエラーを返す
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, XlsxToTextError> {
        let mut buffer = Vec::new();
        reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        self.check_input_size(buffer.len() as u64)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_limit() {
        assert_eq!(
            SecurityConfig::default().max_input_file_size,
            DEFAULT_MAX_INPUT_FILE_SIZE
        );
    }

    #[test]
    fn test_check_input_size() {
        let config = SecurityConfig {
            max_input_file_size: 10,
        };
        assert!(config.check_input_size(10).is_ok());
        match config.check_input_size(11) {
            Err(XlsxToTextError::SecurityViolation(msg)) => {
                assert!(msg.contains("11 bytes"));
                assert!(msg.contains("max: 10 bytes"));
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_read_limited() {
        let config = SecurityConfig {
            max_input_file_size: 4,
        };
        let data = config.read_limited(Cursor::new(b"abcd".to_vec())).unwrap();
        assert_eq!(data, b"abcd");

        let result = config.read_limited(Cursor::new(b"abcdefgh".to_vec()));
        assert!(matches!(result, Err(XlsxToTextError::SecurityViolation(_))));
    }
}
