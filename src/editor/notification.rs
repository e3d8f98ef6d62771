//! 通知
//!
//! セッションが発行するメッセージと、その受け取り先

use crate::error::{ErrorLevel, PadError};
use crate::logging::EventLog;
use serde::Serialize;

/// 通知レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl From<ErrorLevel> for NotificationLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::Info => NotificationLevel::Info,
            ErrorLevel::Warning => NotificationLevel::Warning,
            ErrorLevel::Error => NotificationLevel::Error,
        }
    }
}

/// 一行メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// ブロッキング表示が必要か（明示的な開く・保存の失敗）
    pub modal: bool,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            modal: false,
        }
    }

    pub fn words_removed(count: usize) -> Self {
        Self::info(format!("Removed {} words.", count))
    }

    pub fn autosaved() -> Self {
        Self::info("File updated with new paragraph.")
    }

    /// 自動保存の失敗は受動的な通知にとどめる
    pub fn autosave_failed(error: &PadError) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: format!("Error during autosave: {}", error),
            modal: false,
        }
    }

    /// 明示的な操作の失敗
    pub fn error(error: &PadError) -> Self {
        Self {
            level: error.level().into(),
            message: error.to_string(),
            modal: true,
        }
    }
}

/// 通知の受け取り先
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// 受け取った通知を順に保持する
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 保持している通知を取り出して空にする
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

/// クロージャを受け取り先として使う
pub struct CallbackSink<F>(pub F);

impl<F> NotificationSink for CallbackSink<F>
where
    F: FnMut(Notification),
{
    fn notify(&mut self, notification: Notification) {
        (self.0)(notification)
    }
}

/// 通知を `log` ファサードへ流す
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => log::info!("{}", notification.message),
            NotificationLevel::Warning => log::warn!("{}", notification.message),
            NotificationLevel::Error => log::error!("{}", notification.message),
        }
    }
}

impl NotificationSink for EventLog {
    fn notify(&mut self, notification: Notification) {
        if let Err(e) = self.log_event("notification", &notification) {
            log::warn!("event log write to {} failed: {}", self.path().display(), e);
        }
    }
}

/// 二つの受け取り先へ同じ通知を配る
pub struct Tee<A, B>(pub A, pub B);

impl<A, B> NotificationSink for Tee<A, B>
where
    A: NotificationSink,
    B: NotificationSink,
{
    fn notify(&mut self, notification: Notification) {
        self.0.notify(notification.clone());
        self.1.notify(notification);
    }
}
