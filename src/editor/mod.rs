//! 編集層
//!
//! 変更追跡・通知・セッション管理

pub mod change_tracker;
pub mod notification;
pub mod session;

pub use change_tracker::{word_count, ChangeTracker};
pub use notification::{
    CallbackSink, LogSink, Notification, NotificationLevel, NotificationLog, NotificationSink, Tee,
};
pub use session::{paragraph_count, save_prompt, Confirm, EditorSession, SaveOutcome};
