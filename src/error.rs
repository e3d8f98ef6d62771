//! エラーハンドリングシステム
//!
//! formpad 全体で使用される統一されたエラー型とユーティリティを定義
//! 失敗は操作の境界でユーザー向けメッセージへ変換し、セッションは継続する

use std::io;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PadError {
    /// 拡張子に対応するフォーマットが存在しない
    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// ファイル操作エラー
    #[error(transparent)]
    File(#[from] FileError),

    /// base64 デコードエラー（バイナリ保存時）
    #[error("Invalid base64 content: {message}")]
    Decode { message: String },

    /// フォーマット未選択のまま保存しようとした
    #[error("No file format selected; open a file or choose a format first")]
    NoActiveFormat,

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),

    /// UI操作エラー
    #[error("UI error: {0}")]
    Ui(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error in {path}: {message}")]
    Encoding { path: String, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `io::Error` を種別ごとに分類する
    pub fn from_io(error: &io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileError::Encoding {
                path,
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

impl PadError {
    /// 表示時のレベル
    pub fn level(&self) -> ErrorLevel {
        match self {
            PadError::UnsupportedFormat { .. } | PadError::NoActiveFormat => ErrorLevel::Warning,
            _ => ErrorLevel::Error,
        }
    }
}

// std::io::Error から PadError への変換（パス情報なし）
impl From<io::Error> for PadError {
    fn from(error: io::Error) -> Self {
        PadError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}

impl From<base64::DecodeError> for PadError {
    fn from(error: base64::DecodeError) -> Self {
        PadError::Decode {
            message: error.to_string(),
        }
    }
}

/// パニックハンドラの設定
///
/// 端末を raw モードのまま残さないよう、メッセージ出力前に後始末のフックを呼ぶ
pub fn setup_panic_handler<F>(cleanup: F)
where
    F: Fn() + Send + Sync + 'static,
{
    std::panic::set_hook(Box::new(move |panic_info| {
        cleanup();

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, PadError>;
