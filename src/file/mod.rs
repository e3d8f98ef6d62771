//! ファイル操作モジュール
//!
//! - 読み込み・保存はブロッキングで呼び出し元スレッド上で行う
//! - 保存は一時ファイル経由で置き換える（失敗時に既存ファイルを壊さない）
//! - 権限不足などはエラーとして返し、エディタは継続

pub mod io;
pub mod path;

pub use io::{read_bytes, read_text, write_bytes, write_text, FileSaver};
pub use path::{display_name, dotted_extension, expand_path, normalize_path};
