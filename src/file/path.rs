//! パス処理ユーティリティ
//!
//! ミニバッファで入力されたパスの展開と、フォーマット判定用の拡張子取得

use crate::error::{PadError, Result};
use std::path::{Component, Path, PathBuf};

/// 入力文字列をパスへ展開（`~` → ホームディレクトリ）
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PadError::Path("empty path".to_string()));
    }

    let expanded = shellexpand::tilde_with_context(trimmed, || {
        dirs::home_dir().map(|home| home.to_string_lossy().into_owned())
    });
    Ok(normalize_path(Path::new(expanded.as_ref())))
}

/// `.` を取り除き、先頭以外の `..` を一つ前のコンポーネントと相殺する
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                let can_pop = matches!(
                    result.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    result.pop();
                } else {
                    result.push(component);
                }
            }
            _ => result.push(component),
        }
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// 先頭のドットを含む拡張子（`notes.TXT` → `.TXT`）。拡張子がなければ空文字
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// ステータスライン表示用のファイル名
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
