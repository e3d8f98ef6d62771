//! エディタ設定
//!
//! 環境変数や設定ファイルは読まない。呼び出し側がコードで組み立てる

use crate::logging::{LogLevel, Logger};
use std::path::PathBuf;

/// セッションとロギングの設定
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// 削除語数がこの値を超えたときに通知する（厳密に大きい場合のみ）
    pub word_removal_threshold: usize,
    /// 段落数が増えたときに自動保存するか
    pub autosave_on_new_paragraph: bool,
    /// ログレベル
    pub log_level: LogLevel,
    /// ログ出力先（未指定時はログを登録しない）
    pub log_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            word_removal_threshold: 1,
            autosave_on_new_paragraph: true,
            log_level: LogLevel::Warning,
            log_file: None,
        }
    }
}

impl EditorConfig {
    pub fn with_word_removal_threshold(mut self, threshold: usize) -> Self {
        self.word_removal_threshold = threshold;
        self
    }

    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave_on_new_paragraph = enabled;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// ファイル出力のみのロガーを構築（stderr は TUI の描画を壊すため使わない）
    pub fn file_logger(&self) -> Option<Logger> {
        self.log_file.as_ref().map(|path| {
            Logger::new(self.log_level)
                .without_stderr()
                .with_file_output(path.clone())
        })
    }
}
