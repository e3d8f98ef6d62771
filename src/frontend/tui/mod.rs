//! 端末フロントエンド
//!
//! セッションに対するシェル役。ファイル選択（ミニバッファ入力）、y/n 確認、
//! 通知表示、変更フック付きテキストバッファを提供する

use super::prompt::{Prompt, PromptKind, PromptResult};
use super::text_area::TextArea;
use crate::config::EditorConfig;
use crate::editor::{
    EditorSession, LogSink, Notification, NotificationLevel, NotificationLog, Tee,
};
use crate::error::{PadError, Result};
use crate::file::{display_name, expand_path};
use crate::format;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// 受動的な通知の表示時間
const MESSAGE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct MessageDisplay {
    notification: Notification,
    shown_at: Instant,
}

impl MessageDisplay {
    fn new(notification: Notification) -> Self {
        Self {
            notification,
            shown_at: Instant::now(),
        }
    }

    /// ブロッキング通知はキー入力まで消えない
    fn is_expired(&self) -> bool {
        !self.notification.modal && self.shown_at.elapsed() >= MESSAGE_DURATION
    }
}

/// 画面表示用に溜めつつ、ログにも流す
type ShellSink = Tee<NotificationLog, LogSink>;

pub struct TuiApplication {
    session: EditorSession<ShellSink>,
    text_area: TextArea,
    prompt: Option<Prompt>,
    message: Option<MessageDisplay>,
    running: bool,
}

impl TuiApplication {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            session: EditorSession::with_config(config, Tee(NotificationLog::new(), LogSink)),
            text_area: TextArea::new(),
            prompt: None,
            message: None,
            running: true,
        }
    }

    pub fn session(&self) -> &EditorSession<ShellSink> {
        &self.session
    }

    pub fn text_area(&self) -> &TextArea {
        &self.text_area
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn message(&self) -> Option<&Notification> {
        self.message.as_ref().map(|display| &display.notification)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            if self.message.as_ref().is_some_and(MessageDisplay::is_expired) {
                self.message = None;
            }

            terminal
                .draw(|frame| self.render(frame))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(100)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_event(key_event)
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// キー入力を処理（端末なしでも呼べる）
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // ブロッキング通知は次のキーで閉じ、そのキーは消費する
        if self.message.as_ref().is_some_and(|m| m.notification.modal) {
            self.message = None;
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else {
            self.handle_edit_key(key);
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        let result = prompt.handle_key(key);
        let kind = prompt.kind().clone();

        match result {
            PromptResult::InProgress => {}
            PromptResult::Cancelled => {
                self.prompt = None;
                self.show(Notification::info("Cancelled."));
            }
            PromptResult::Completed(input) => {
                self.prompt = None;
                match kind {
                    PromptKind::OpenPath => self.open_file(&input),
                    PromptKind::SavePath => self.request_save_confirmation(&input),
                    PromptKind::ConfirmSave(_) => {}
                }
            }
            PromptResult::Answered(accepted) => {
                self.prompt = None;
                if let PromptKind::ConfirmSave(path) = kind {
                    self.finish_save(path, accepted);
                }
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        let changed = match key.code {
            KeyCode::Char('q') if ctrl => {
                self.running = false;
                false
            }
            KeyCode::Char('o') if ctrl => {
                self.prompt = Some(Prompt::open_path());
                false
            }
            KeyCode::Char('s') if ctrl => {
                self.prompt = Some(Prompt::save_path(self.session.path()));
                false
            }
            KeyCode::Char('n') if ctrl => {
                self.session.new_document();
                self.text_area.set_text("");
                self.show(Notification::info("New document."));
                false
            }
            KeyCode::Char(ch) if !ctrl && !alt => {
                self.text_area.insert_char(ch);
                true
            }
            KeyCode::Enter => {
                self.text_area.insert_char('\n');
                true
            }
            KeyCode::Tab => {
                self.text_area.insert_char('\t');
                true
            }
            KeyCode::Backspace => self.text_area.backspace(),
            KeyCode::Delete => self.text_area.delete(),
            KeyCode::Left => {
                self.text_area.move_left();
                false
            }
            KeyCode::Right => {
                self.text_area.move_right();
                false
            }
            KeyCode::Up => {
                self.text_area.move_up();
                false
            }
            KeyCode::Down => {
                self.text_area.move_down();
                false
            }
            KeyCode::Home => {
                self.text_area.move_line_start();
                false
            }
            KeyCode::End => {
                self.text_area.move_line_end();
                false
            }
            _ => false,
        };

        if changed {
            self.session.on_buffer_changed(self.text_area.text());
            self.pull_notifications();
        }
    }

    fn open_file(&mut self, input: &str) {
        let path = match expand_path(input) {
            Ok(path) => path,
            Err(error) => {
                self.show(Notification::error(&error));
                return;
            }
        };

        if self.session.open(&path).is_ok() {
            self.text_area.set_text(self.session.buffer());
            let label = self
                .session
                .format()
                .map(|kind| kind.label())
                .unwrap_or_default();
            self.show(Notification::info(format!(
                "Opened {} ({})",
                display_name(&path),
                label
            )));
        }
        self.pull_notifications();
    }

    fn request_save_confirmation(&mut self, input: &str) {
        match expand_path(input) {
            Ok(path) => self.prompt = Some(Prompt::confirm_save(path)),
            Err(error) => self.show(Notification::error(&error)),
        }
    }

    fn finish_save(&mut self, path: PathBuf, accepted: bool) {
        if !accepted {
            self.show(Notification::info("Save cancelled."));
            return;
        }

        // 新規文書は保存先の拡張子でフォーマットを決める
        let chosen_here = self.session.format().is_none();
        if chosen_here {
            match format::resolve_path(&path) {
                Ok(codec) => self.session.select_format(codec.kind()),
                Err(error) => {
                    self.show(Notification::error(&error));
                    return;
                }
            }
        }

        if self.session.save(&path, &mut |_: &str| true).is_err() && chosen_here {
            self.session.clear_format();
        }
        self.pull_notifications();
    }

    fn pull_notifications(&mut self) {
        for notification in self.session.sink_mut().0.drain() {
            self.show(notification);
        }
    }

    fn show(&mut self, notification: Notification) {
        let keep_current = self
            .message
            .as_ref()
            .is_some_and(|current| current.notification.modal && !notification.modal);
        if !keep_current {
            self.message = Some(MessageDisplay::new(notification));
        }
    }

    fn title(&self) -> String {
        let name = self
            .session
            .path()
            .map(display_name)
            .unwrap_or_else(|| "[untitled]".to_string());
        format!(" {} ", name)
    }

    fn status_line(&self) -> String {
        let format = self
            .session
            .format()
            .map(|kind| kind.label())
            .unwrap_or("No format");
        format!(
            " {} | L{}:C{} | ^O open  ^S save  ^N new  ^Q quit",
            format,
            self.text_area.cursor_line() + 1,
            self.text_area.display_column() + 1
        )
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
            .split(frame.area());

        let block = Block::default().borders(Borders::ALL).title(self.title());
        let inner = block.inner(chunks[0]);
        let height = inner.height as usize;

        self.text_area.ensure_visible(height);
        let lines: Vec<Line<'_>> = self
            .text_area
            .visible_lines(height)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

        let status = Paragraph::new(self.status_line())
            .style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(status, chunks[1]);

        let cursor = if let Some(prompt) = &self.prompt {
            let text = format!("{}{}", prompt.message(), prompt.input());
            let x = chunks[2].x + (text.width() as u16).min(chunks[2].width.saturating_sub(1));
            frame.render_widget(Paragraph::new(text), chunks[2]);
            Position::new(x, chunks[2].y)
        } else {
            if let Some(display) = &self.message {
                let color = match display.notification.level {
                    NotificationLevel::Info => Color::Green,
                    NotificationLevel::Warning => Color::Yellow,
                    NotificationLevel::Error => Color::Red,
                };
                let widget = Paragraph::new(display.notification.message.clone())
                    .style(Style::default().fg(color));
                frame.render_widget(widget, chunks[2]);
            }

            let column = (self.text_area.display_column() as u16).min(inner.width.saturating_sub(1));
            let row = (self.text_area.cursor_line() - self.text_area.scroll()) as u16;
            Position::new(inner.x + column, inner.y + row)
        };
        frame.set_cursor_position(cursor);
    }
}

impl Default for TuiApplication {
    fn default() -> Self {
        Self::new()
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

/// パニック時など、エラーを返せない場面での端末復帰
pub fn restore_terminal() {
    let _ = leave_terminal();
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> PadError {
    PadError::Ui(format!("{}: {}", context, err))
}
