//! プロンプト管理
//!
//! ミニバッファでのパス入力と y/n 確認

use crate::editor::save_prompt;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// プロンプトの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// 入力が完了した
    Completed(String),
    /// y/n の回答
    Answered(bool),
    /// 入力がキャンセルされた
    Cancelled,
    /// 入力継続中
    InProgress,
}

/// プロンプトの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    OpenPath,
    SavePath,
    ConfirmSave(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    message: String,
    input: String,
}

impl Prompt {
    pub fn open_path() -> Self {
        Self {
            kind: PromptKind::OpenPath,
            message: "Open file: ".to_string(),
            input: String::new(),
        }
    }

    /// 現在のパスを初期値にした保存先入力
    pub fn save_path(current: Option<&Path>) -> Self {
        Self {
            kind: PromptKind::SavePath,
            message: "Save to: ".to_string(),
            input: current
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn confirm_save(path: PathBuf) -> Self {
        Self {
            message: format!("{} (y/n) ", save_prompt(&path)),
            kind: PromptKind::ConfirmSave(path),
            input: String::new(),
        }
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if matches!(self.kind, PromptKind::ConfirmSave(_)) {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') if !ctrl => PromptResult::Answered(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    PromptResult::Answered(false)
                }
                KeyCode::Char('g') if ctrl => PromptResult::Cancelled,
                _ => PromptResult::InProgress,
            };
        }

        match key.code {
            KeyCode::Enter => PromptResult::Completed(self.input.clone()),
            KeyCode::Esc => PromptResult::Cancelled,
            KeyCode::Char('g') if ctrl => PromptResult::Cancelled,
            KeyCode::Backspace => {
                self.input.pop();
                PromptResult::InProgress
            }
            KeyCode::Char(ch) if !ctrl => {
                self.input.push(ch);
                PromptResult::InProgress
            }
            _ => PromptResult::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_path_input_and_completion() {
        let mut prompt = Prompt::open_path();
        for ch in "a.tx".chars() {
            assert_eq!(prompt.handle_key(key(KeyCode::Char(ch))), PromptResult::InProgress);
        }
        prompt.handle_key(key(KeyCode::Char('t')));
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Char('t')));

        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptResult::Completed("a.txt".to_string())
        );
    }

    #[test]
    fn test_save_prompt_is_prefilled() {
        let prompt = Prompt::save_path(Some(Path::new("/tmp/notes.txt")));
        assert_eq!(prompt.input(), "/tmp/notes.txt");
        assert_eq!(prompt.kind(), &PromptKind::SavePath);
    }

    #[test]
    fn test_cancel_with_escape_and_ctrl_g() {
        let mut prompt = Prompt::open_path();
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptResult::Cancelled);

        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert_eq!(prompt.handle_key(ctrl_g), PromptResult::Cancelled);
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn test_confirm_answers() {
        let mut prompt = Prompt::confirm_save(PathBuf::from("notes.txt"));
        assert_eq!(prompt.message(), "Save to notes.txt? (y/n) ");
        assert_eq!(prompt.handle_key(key(KeyCode::Char('x'))), PromptResult::InProgress);
        assert_eq!(prompt.handle_key(key(KeyCode::Char('y'))), PromptResult::Answered(true));
        assert_eq!(prompt.handle_key(key(KeyCode::Char('n'))), PromptResult::Answered(false));
    }
}
