//! HTML（簡易変換）
//!
//! 読み込み時はタグをパターンで除去するだけで、HTMLを木構造として解析しない。
//! 保存時もエスケープを行わないため、`<` `>` `&` を含むバッファは往復で一致しない

use crate::error::Result;
use crate::file;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;

const TAG_PATTERN: &str = r"<[^>]+>";

const DOCUMENT_HEAD: &str = "<!DOCTYPE html><html><body><p>";
const DOCUMENT_TAIL: &str = "</p></body></html>";
const PARAGRAPH_BREAK: &str = "</p>\n<p>";

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern is a valid regex"))
}

/// タグを除去してテキストを取り出す
///
/// `<p` または `<br` を含むタグ（小文字化して判定）は改行に、それ以外は空文字に置換し、
/// 最後に前後の空白を取り除く
pub fn html_to_text(html: &str) -> String {
    let stripped = tag_regex().replace_all(html, |caps: &Captures<'_>| {
        let tag = caps[0].to_lowercase();
        if tag.contains("<p") || tag.contains("<br") {
            "\n"
        } else {
            ""
        }
    });
    stripped.trim().to_string()
}

/// テキストを最小限のHTML文書で包む（改行ごとに段落を区切る）
pub fn text_to_html(text: &str) -> String {
    let body = text.replace('\n', PARAGRAPH_BREAK);
    let mut document = String::with_capacity(DOCUMENT_HEAD.len() + body.len() + DOCUMENT_TAIL.len());
    document.push_str(DOCUMENT_HEAD);
    document.push_str(&body);
    document.push_str(DOCUMENT_TAIL);
    document
}

pub fn load(path: &Path) -> Result<String> {
    let html = file::read_text(path)?;
    Ok(html_to_text(&html))
}

pub fn save(path: &Path, text: &str) -> Result<()> {
    file::write_text(path, &text_to_html(text))
}
