//! ファイルI/O操作
//!
//! バイト列・テキストの読み込みと、一時ファイル経由のアトミック保存

use crate::error::{FileError, PadError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// ファイル読み込みの便利関数（バイト列）
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(PadError::File(FileError::InvalidPath {
            path: path.display().to_string(),
        }));
    }

    fs::read(path).map_err(|e| PadError::File(FileError::from_io(&e, path)))
}

/// ファイル読み込みの便利関数（UTF-8 テキスト、変換なし）
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;

    String::from_utf8(bytes).map_err(|e| {
        PadError::File(FileError::Encoding {
            path: path.display().to_string(),
            message: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })
    })
}

/// バイト列を書き込み（既存ファイルは上書き）
pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    FileSaver::new().save(path.as_ref(), content)
}

/// テキストをそのまま書き込み
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    write_bytes(path, content.as_bytes())
}

/// ファイル保存処理
#[derive(Debug, Clone)]
pub struct FileSaver {
    atomic_save: bool,
}

impl FileSaver {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 一時ファイルを使わず直接書き込む
    pub fn direct() -> Self {
        Self { atomic_save: false }
    }

    /// ファイルを保存
    pub fn save(&self, path: &Path, content: &[u8]) -> Result<()> {
        if path.is_dir() {
            return Err(PadError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        log::debug!("saving {} bytes to {}", content.len(), path.display());

        let result = if self.atomic_save {
            self.atomic_save_impl(path, content)
        } else {
            self.direct_save_impl(path, content)
        };

        if let Err(e) = &result {
            log::warn!("save to {} failed: {}", path.display(), e);
        }
        result
    }

    /// アトミック保存（一時ファイル経由）
    fn atomic_save_impl(&self, path: &Path, content: &[u8]) -> Result<()> {
        let temp_path = self.generate_temp_path(path)?;

        fs::write(&temp_path, content).map_err(|e| {
            // 書きかけの一時ファイルを残さない
            let _ = fs::remove_file(&temp_path);
            PadError::File(FileError::from_io(&e, path))
        })?;

        fs::rename(&temp_path, path).map_err(|e| {
            // 一時ファイル削除を試行
            let _ = fs::remove_file(&temp_path);
            PadError::File(FileError::from_io(&e, path))
        })
    }

    /// 直接保存
    fn direct_save_impl(&self, path: &Path, content: &[u8]) -> Result<()> {
        fs::write(path, content).map_err(|e| PadError::File(FileError::from_io(&e, path)))
    }

    fn generate_temp_path(&self, original: &Path) -> Result<PathBuf> {
        let invalid = || {
            PadError::File(FileError::InvalidPath {
                path: original.display().to_string(),
            })
        };

        let parent = original.parent().ok_or_else(invalid)?;
        let filename = original.file_name().ok_or_else(invalid)?;

        // 一意な一時ファイル名生成
        let temp_name = format!(".{}_{}", filename.to_string_lossy(), std::process::id());

        Ok(parent.join(temp_name))
    }
}

impl Default for FileSaver {
    fn default() -> Self {
        Self::new()
    }
}
