//! 編集セッション
//!
//! 現在のファイルパス・フォーマット・バッファを保持し、
//! シェルから呼ばれる `open` / `save` / `on_buffer_changed` を処理する。
//! 段落数が増えたときの自動保存もここで行う

use super::change_tracker::ChangeTracker;
use super::notification::{Notification, NotificationSink};
use crate::config::EditorConfig;
use crate::error::{PadError, Result};
use crate::format::{self, Codec, FormatKind};
use std::path::{Path, PathBuf};

/// シェルの確認ダイアログ
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// 明示的な保存の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// 確認で拒否された（何も書き込んでいない）
    Declined,
}

/// 明示的な保存の確認文言
pub fn save_prompt(path: &Path) -> String {
    format!("Save to {}?", path.display())
}

/// 改行で区切られた片の数（空バッファは 1）
pub fn paragraph_count(text: &str) -> usize {
    text.split('\n').count()
}

/// 編集セッション
pub struct EditorSession<S: NotificationSink> {
    path: Option<PathBuf>,
    codec: Option<&'static Codec>,
    buffer: String,
    paragraph_count: usize,
    tracker: ChangeTracker,
    config: EditorConfig,
    sink: S,
}

impl<S: NotificationSink> EditorSession<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(EditorConfig::default(), sink)
    }

    pub fn with_config(config: EditorConfig, sink: S) -> Self {
        Self {
            path: None,
            codec: None,
            buffer: String::new(),
            paragraph_count: paragraph_count(""),
            tracker: ChangeTracker::with_threshold(config.word_removal_threshold),
            config,
            sink,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> Option<FormatKind> {
        self.codec.map(Codec::kind)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// フォーマットの選択を取り消す（パスとバッファはそのまま）
    pub fn clear_format(&mut self) {
        self.codec = None;
    }

    /// ファイルを開かずにフォーマットを選ぶ（新規文書）
    pub fn select_format(&mut self, kind: FormatKind) {
        log::debug!("format selected: {}", kind);
        self.codec = Some(kind.codec());
    }

    /// パス・フォーマット・バッファを空に戻す
    pub fn new_document(&mut self) {
        self.path = None;
        self.codec = None;
        self.buffer.clear();
        self.paragraph_count = paragraph_count("");
        self.tracker.reset("");
    }

    /// ファイルを開く
    ///
    /// 失敗時は状態を変えず、ブロッキング通知を出してエラーを返す
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = format::resolve_path(path).and_then(|codec| {
            let content = codec.load(path)?;
            Ok((codec, content))
        });

        let (codec, content) = match loaded {
            Ok(loaded) => loaded,
            Err(error) => return Err(self.report(error, "open")),
        };

        log::info!(
            "opened {} as {} ({} bytes)",
            path.display(),
            codec.kind(),
            content.len()
        );

        self.codec = Some(codec);
        self.path = Some(path.to_path_buf());
        self.paragraph_count = paragraph_count(&content);
        self.tracker.reset(&content);
        self.buffer = content;
        Ok(())
    }

    /// 現在のフォーマットで明示的に保存する
    ///
    /// 保存に成功したパスが以後の自動保存先になる
    pub fn save<C>(&mut self, path: impl AsRef<Path>, confirm: &mut C) -> Result<SaveOutcome>
    where
        C: Confirm + ?Sized,
    {
        let path = path.as_ref();
        let codec = match self.codec {
            Some(codec) => codec,
            None => return Err(self.report(PadError::NoActiveFormat, "save")),
        };

        if !confirm.confirm(&save_prompt(path)) {
            log::debug!("save to {} declined", path.display());
            return Ok(SaveOutcome::Declined);
        }

        if let Err(error) = codec.save(path, &self.buffer) {
            return Err(self.report(error, "save"));
        }

        log::info!("saved {} as {}", path.display(), codec.kind());
        self.path = Some(path.to_path_buf());
        self.sink
            .notify(Notification::info(format!("File saved: {}", path.display())));
        Ok(SaveOutcome::Saved)
    }

    /// バッファ変更イベント
    ///
    /// 単語削除の追跡の後、段落数が増えていれば自動保存する。
    /// 自動保存の失敗は通知するだけで伝播しない
    pub fn on_buffer_changed(&mut self, text: &str) {
        if let Some(notification) = self.tracker.observe(text) {
            self.sink.notify(notification);
        }

        self.buffer.clear();
        self.buffer.push_str(text);

        let current = paragraph_count(text);
        if current > self.paragraph_count && self.config.autosave_on_new_paragraph {
            self.autosave();
        }
        self.paragraph_count = current;
    }

    fn autosave(&mut self) {
        let (codec, path) = match (self.codec, self.path.as_deref()) {
            (Some(codec), Some(path)) => (codec, path),
            _ => return,
        };

        match codec.save(path, &self.buffer) {
            Ok(()) => {
                log::info!("autosaved {}", path.display());
                self.sink.notify(Notification::autosaved());
            }
            Err(error) => {
                log::warn!("autosave to {} failed: {}", path.display(), error);
                self.sink.notify(Notification::autosave_failed(&error));
            }
        }
    }

    fn report(&mut self, error: PadError, operation: &str) -> PadError {
        log::warn!("{} failed: {}", operation, error);
        self.sink.notify(Notification::error(&error));
        error
    }
}
