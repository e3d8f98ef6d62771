//! バイナリ（base64 表示）
//!
//! バイト列の内容は解釈しない。編集バッファ上では標準 base64 文字列として扱う

use crate::error::Result;
use crate::file;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// バイト列を標準 base64（パディングあり）に変換
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// base64 文字列をバイト列に戻す
///
/// 編集中に入った改行などの ASCII 空白は無視する
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

pub fn load(path: &Path) -> Result<String> {
    let bytes = file::read_bytes(path)?;
    Ok(encode(&bytes))
}

pub fn save(path: &Path, text: &str) -> Result<()> {
    let bytes = decode(text)?;
    file::write_bytes(path, &bytes)
}
