//! テキストエリア
//!
//! 編集中のテキストとカーソル位置（バイトオフセット、常に文字境界）を保持する

use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct TextArea {
    text: String,
    cursor: usize,
    scroll: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// 内容を置き換え、カーソルを先頭へ
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// カーソル前の一文字を削除。削除した場合 true
    pub fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                self.text.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    /// カーソル位置の一文字を削除。削除した場合 true
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_line_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let column = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            return;
        }
        let column = self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, column);
    }

    /// カーソルのある行番号（0 始まり）
    pub fn cursor_line(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    /// カーソルの表示桁（全角は 2 桁、タブは 4 桁）
    pub fn display_column(&self) -> usize {
        display_width(&self.text[self.line_start(self.cursor)..self.cursor])
    }

    /// カーソル行が `height` 行の表示範囲に収まるようスクロール位置を調整
    pub fn ensure_visible(&mut self, height: usize) {
        let line = self.cursor_line();
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }

    /// 表示用の行（タブは空白へ展開）
    pub fn visible_lines(&self, height: usize) -> Vec<String> {
        self.text
            .split('\n')
            .skip(self.scroll)
            .take(height)
            .map(|line| line.replace('\t', &" ".repeat(TAB_WIDTH)))
            .collect()
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.text.len())
    }

    fn offset_in_line(&self, start: usize, column: usize) -> usize {
        let end = self.line_end(start);
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }
}

fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| {
            if ch == '\t' {
                TAB_WIDTH
            } else {
                ch.width().unwrap_or(0)
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(text: &str) -> TextArea {
        let mut area = TextArea::new();
        area.set_text(text);
        area
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut area = TextArea::new();
        for ch in "aあb".chars() {
            area.insert_char(ch);
        }
        assert_eq!(area.text(), "aあb");
        assert_eq!(area.display_column(), 4);

        area.move_left();
        assert!(area.backspace());
        assert_eq!(area.text(), "ab");
        assert_eq!(area.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut area = area("abc");
        assert!(!area.backspace());
        assert!(area.delete());
        assert_eq!(area.text(), "bc");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut area = area("long line\nab\nthird line");
        area.move_line_end();
        assert_eq!(area.cursor_line(), 0);

        area.move_down();
        assert_eq!(area.cursor_line(), 1);
        assert_eq!(area.cursor(), "long line\nab".len());

        area.move_down();
        assert_eq!(area.cursor(), "long line\nab\nth".len());

        area.move_up();
        area.move_up();
        assert_eq!(area.cursor(), 2);
    }

    #[test]
    fn test_move_down_on_last_line_is_noop() {
        let mut area = area("one\ntwo");
        area.move_down();
        let pos = area.cursor();
        area.move_down();
        assert_eq!(area.cursor(), pos);
    }

    #[test]
    fn test_newline_insertion_changes_line() {
        let mut area = area("hello");
        area.move_line_end();
        area.insert_char('\n');
        area.insert_char('w');
        assert_eq!(area.text(), "hello\nw");
        assert_eq!(area.cursor_line(), 1);
        assert_eq!(area.display_column(), 1);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut area = area("1\n2\n3\n4\n5\n6");
        for _ in 0..5 {
            area.move_down();
        }
        area.ensure_visible(3);
        assert_eq!(area.scroll(), 3);
        assert_eq!(area.visible_lines(3), vec!["4", "5", "6"]);

        for _ in 0..5 {
            area.move_up();
        }
        area.ensure_visible(3);
        assert_eq!(area.scroll(), 0);
    }

    #[test]
    fn test_tabs_are_expanded_for_display() {
        let mut area = area("\tx");
        area.move_line_end();
        assert_eq!(area.display_column(), 5);
        assert_eq!(area.visible_lines(1), vec!["    x"]);
    }
}
