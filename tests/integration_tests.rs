use formpad::editor::{NotificationLog, SaveOutcome};
use formpad::error::FileError;
use formpad::{EditorConfig, EditorSession, FormatKind, PadError, Result};
use std::fs;
use tempfile::TempDir;

fn session() -> EditorSession<NotificationLog> {
    EditorSession::new(NotificationLog::new())
}

#[test]
fn test_open_append_paragraph_autosaves() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "hello").unwrap();

    let mut session = session();
    session.open(&file_path)?;
    assert_eq!(session.buffer(), "hello");

    session.on_buffer_changed("hello\nworld");

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "hello\nworld");
    assert_eq!(
        session.sink().messages(),
        vec!["File updated with new paragraph."]
    );
    Ok(())
}

#[test]
fn test_same_line_count_does_not_autosave() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "hello").unwrap();

    let mut session = session();
    session.open(&file_path)?;
    session.on_buffer_changed("hello there");
    session.on_buffer_changed("hello there, friend");

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "hello");
    assert!(session.sink().is_empty());
    Ok(())
}

#[test]
fn test_each_new_paragraph_autosaves_once() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "one").unwrap();

    let mut session = session();
    session.open(&file_path)?;
    session.on_buffer_changed("one\ntwo");
    session.on_buffer_changed("one\ntwo!");
    session.on_buffer_changed("one");
    session.on_buffer_changed("one\n2");

    // 段落が減った後に再び増えた場合も保存する
    assert_eq!(session.sink().len(), 2);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "one\n2");
    Ok(())
}

#[test]
fn test_word_removal_and_autosave_in_one_change() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "alpha beta gamma delta").unwrap();

    let mut session = session();
    session.open(&file_path)?;
    session.on_buffer_changed("alpha\nbeta");

    assert_eq!(
        session.sink().messages(),
        vec!["Removed 2 words.", "File updated with new paragraph."]
    );
    Ok(())
}

#[test]
fn test_autosave_failure_is_passive() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("blob.bin");
    fs::write(&file_path, [1u8, 2, 3]).unwrap();

    let mut session = session();
    session.open(&file_path)?;
    assert_eq!(session.buffer(), "AQID");

    // 改行は無視されるが、base64 として不正な文字は保存できない
    session.on_buffer_changed("AQID\n???");

    let last = session.sink().last().unwrap();
    assert!(!last.modal);
    assert!(last.message.starts_with("Error during autosave: Invalid base64 content"));
    assert_eq!(fs::read(&file_path).unwrap(), vec![1, 2, 3]);

    // 編集は続けられ、次の段落追加で正しい内容なら保存される
    session.on_buffer_changed("AQID\nBA==");
    assert_eq!(session.sink().len(), 1);
    session.on_buffer_changed("AQID\nBA==\n");
    assert_eq!(
        session.sink().last().unwrap().message,
        "File updated with new paragraph."
    );
    assert_eq!(fs::read(&file_path).unwrap(), vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_autosave_to_deleted_directory_reports_io_error() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let file_path = nested.join("notes.txt");
    fs::write(&file_path, "first").unwrap();

    let mut session = session();
    session.open(&file_path)?;
    fs::remove_dir_all(&nested).unwrap();

    session.on_buffer_changed("first\nsecond");

    let last = session.sink().last().unwrap();
    assert!(last.message.starts_with("Error during autosave: File not found"));
    assert_eq!(session.buffer(), "first\nsecond");
    Ok(())
}

#[test]
fn test_binary_file_round_trip_through_session() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("image.bin");
    let target = temp_dir.path().join("copy.BIN");
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
    fs::write(&source, &bytes).unwrap();

    let mut session = session();
    session.open(&source)?;
    assert_eq!(session.format(), Some(FormatKind::Binary));

    let outcome = session.save(&target, &mut |_: &str| true)?;
    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(fs::read(&target).unwrap(), bytes);
    Ok(())
}

#[test]
fn test_html_open_extracts_text() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("page.HTML");
    fs::write(
        &file_path,
        "<html><head><title>T</title></head><body><p>First</p><p>Second<br>line</p></body></html>",
    )
    .unwrap();

    let mut session = session();
    session.open(&file_path)?;

    assert_eq!(session.format(), Some(FormatKind::Html));
    assert_eq!(session.buffer(), "T\nFirst\nSecond\nline");
    assert_eq!(session.paragraph_count(), 4);
    Ok(())
}

#[test]
fn test_explicit_save_errors_are_modal() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = session();
    session.select_format(FormatKind::Text);
    session.on_buffer_changed("content");

    let err = session
        .save(temp_dir.path(), &mut |_: &str| true)
        .unwrap_err();

    assert!(matches!(err, PadError::File(FileError::InvalidPath { .. })));
    assert!(session.sink().last().unwrap().modal);
    assert_eq!(session.path(), None);
}

#[test]
fn test_threshold_from_config() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "a b c d e").unwrap();

    let config = EditorConfig::default().with_word_removal_threshold(3);
    let mut session = EditorSession::with_config(config, NotificationLog::new());
    session.open(&file_path)?;

    session.on_buffer_changed("a b");
    assert!(session.sink().is_empty());

    session.on_buffer_changed("a b c d e f");
    session.on_buffer_changed("a");
    assert_eq!(session.sink().messages(), vec!["Removed 5 words."]);
    Ok(())
}
