//! プレーンテキスト（変換なし）

use crate::error::Result;
use crate::file;
use std::path::Path;

pub fn load(path: &Path) -> Result<String> {
    file::read_text(path)
}

pub fn save(path: &Path, text: &str) -> Result<()> {
    file::write_text(path, text)
}
