//! フロントエンド
//!
//! セッションを操作するシェル。現在は端末 UI のみ

pub mod prompt;
pub mod text_area;
pub mod tui;

pub use tui::TuiApplication;
