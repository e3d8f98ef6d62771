//! formpad - pluggable-format text editor
//!
//! テキスト・HTML・バイナリ（base64 表示）を拡張子で切り替えて読み書きし、
//! 編集内容の変化（単語削除・段落追加）を通知するエディタのコア

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod file;
pub mod format;

// 編集層
pub mod editor;

// 表示層
pub mod frontend;

// 公開API
pub use config::EditorConfig;
pub use editor::{EditorSession, Notification, NotificationSink, SaveOutcome};
pub use error::{PadError, Result};
pub use format::{Codec, FormatKind};
pub use frontend::TuiApplication;
