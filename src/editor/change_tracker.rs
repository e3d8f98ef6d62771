//! 変更追跡
//!
//! 直前に観測したバッファ内容（ベースライン）と比較し、
//! 一定数を超える単語が削除されたときに通知を返す

use super::notification::Notification;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_runs() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"))
}

/// 空白の連続で分割した片の数
///
/// 空文字列も一片として数える。前後の空白は空の片を生む
pub fn word_count(text: &str) -> usize {
    whitespace_runs().split(text).count()
}

/// 単語削除の追跡
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    baseline: String,
    threshold: usize,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::with_threshold(1)
    }

    /// 削除語数が `threshold` を超えたときだけ通知する
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            baseline: String::new(),
            threshold,
        }
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn has_baseline(&self) -> bool {
        !self.baseline.is_empty()
    }

    /// ベースラインを置き換える（通知なし）
    pub fn reset(&mut self, text: &str) {
        self.baseline.clear();
        self.baseline.push_str(text);
    }

    /// 変更イベントを処理し、必要なら通知を返す
    ///
    /// 通知の有無にかかわらずベースラインは `current` に更新される
    pub fn observe(&mut self, current: &str) -> Option<Notification> {
        let notification = if self.has_baseline() {
            let deleted = word_count(&self.baseline).saturating_sub(word_count(current));
            (deleted > self.threshold).then(|| Notification::words_removed(deleted))
        } else {
            None
        };

        self.reset(current);
        notification
    }
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}
