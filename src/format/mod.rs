//! ファイルフォーマット
//!
//! 拡張子からフォーマットを決定し、読み込み・保存の関数ペアを返す。
//! 各コーデックは状態を持たず、静的テーブルから参照される

pub mod binary;
pub mod html;
pub mod text;

use crate::error::{PadError, Result};
use crate::file::dotted_extension;
use std::fmt;
use std::path::Path;

/// 対応フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Text,
    Html,
    Binary,
}

impl FormatKind {
    pub const ALL: [FormatKind; 3] = [FormatKind::Text, FormatKind::Html, FormatKind::Binary];

    /// 先頭ドット付きの拡張子から判定（大文字小文字は区別しない）
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            ".txt" => Ok(FormatKind::Text),
            ".html" => Ok(FormatKind::Html),
            ".bin" => Ok(FormatKind::Binary),
            _ => Err(PadError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// 代表となる拡張子
    pub fn extension(self) -> &'static str {
        match self {
            FormatKind::Text => ".txt",
            FormatKind::Html => ".html",
            FormatKind::Binary => ".bin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatKind::Text => "Text",
            FormatKind::Html => "HTML",
            FormatKind::Binary => "Binary (base64)",
        }
    }

    pub fn codec(self) -> &'static Codec {
        match self {
            FormatKind::Text => &CODECS[0],
            FormatKind::Html => &CODECS[1],
            FormatKind::Binary => &CODECS[2],
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 読み込み関数
pub type LoadFn = fn(&Path) -> Result<String>;
/// 保存関数
pub type SaveFn = fn(&Path, &str) -> Result<()>;

/// フォーマットごとの読み込み・保存ペア
#[derive(Clone, Copy)]
pub struct Codec {
    kind: FormatKind,
    load: LoadFn,
    save: SaveFn,
}

impl Codec {
    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    /// ファイルを読み込み、編集用テキストに変換
    pub fn load(&self, path: &Path) -> Result<String> {
        log::debug!("loading {} as {}", path.display(), self.kind);
        (self.load)(path)
    }

    /// 編集用テキストをフォーマットに変換して保存
    pub fn save(&self, path: &Path, text: &str) -> Result<()> {
        log::debug!("saving {} as {}", path.display(), self.kind);
        (self.save)(path, text)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").field("kind", &self.kind).finish()
    }
}

impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

static CODECS: [Codec; 3] = [
    Codec {
        kind: FormatKind::Text,
        load: text::load,
        save: text::save,
    },
    Codec {
        kind: FormatKind::Html,
        load: html::load,
        save: html::save,
    },
    Codec {
        kind: FormatKind::Binary,
        load: binary::load,
        save: binary::save,
    },
];

/// 拡張子からコーデックを取得
pub fn resolve(extension: &str) -> Result<&'static Codec> {
    FormatKind::from_extension(extension).map(FormatKind::codec)
}

/// パスの拡張子からコーデックを取得
pub fn resolve_path(path: &Path) -> Result<&'static Codec> {
    resolve(&dotted_extension(path))
}
