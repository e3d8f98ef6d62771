use formpad::frontend::tui::restore_terminal;
use formpad::{error, EditorConfig, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler(restore_terminal);

    let config = EditorConfig::default();
    if let Some(logger) = config.file_logger() {
        logger.install()?;
    }

    let mut app = TuiApplication::with_config(config);
    app.run()?;
    Ok(())
}
