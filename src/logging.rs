//! ロギングシステム
//!
//! `log` ファサードの出力先となる開発者向けロガーと、
//! 通知を JSON Lines 形式で記録するイベントログを提供

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// ロガー
///
/// * 既定では stderr へ出力
/// * TUI 実行中は stderr を無効化し、ファイル出力のみを使う
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    /// `log` ファサードのグローバルロガーとして登録
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.to_filter();
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.should_log(LogLevel::from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = LogLevel::from_log(record.level());
        self.write_line(&format!(
            "{} [{}] {}",
            level.tag(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

/// イベントを JSON Lines 形式で追記するロガー
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: PathBuf) -> io::Result<Self> {
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn log_event<T: Serialize>(&self, tag: &str, payload: &T) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let record = serde_json::json!({
            "tag": tag,
            "ts": timestamp_ms(),
            "payload": payload
        });
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}

/// 親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::tempdir;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(LogLevel::Debug));
        assert!(logger.should_log(LogLevel::Error));

        let warn_logger = Logger::for_development()
            .with_level(LogLevel::Warning)
            .without_stderr();
        assert!(!warn_logger.should_log(LogLevel::Info));
        assert!(warn_logger.should_log(LogLevel::Warning));
    }

    #[test]
    fn logger_appends_records_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formpad.log");
        let logger = Logger::new(LogLevel::Info)
            .without_stderr()
            .with_file_output(&path);

        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("formpad::editor")
                .args(format_args!("opened notes.txt"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("filtered out"))
                .build(),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "INFO [formpad::editor] opened notes.txt\n");
    }

    #[test]
    fn event_log_writes_json_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let log = EventLog::new(path.clone()).unwrap();

        log.log_event("notification", &"Removed 2 words.").unwrap();
        log.log_event("notification", &"File updated with new paragraph.")
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tag"], "notification");
        assert_eq!(first["payload"], "Removed 2 words.");
    }
}
