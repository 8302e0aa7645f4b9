use anyhow::Result;
use kanbo::config::Config;
use kanbo::tui;

fn main() -> Result<()> {
    // Log to a file; stdout belongs to the TUI. Guard must outlive the app
    // so buffered lines are flushed on exit.
    let _guard = init_logging()?;

    let config = Config::load().unwrap_or_default();

    let mut app = tui::App::new(config)?;
    app.run()?;

    Ok(())
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    let log_dir = Config::data_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, "kanbo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
