use mazeseek::{
    app,
    config::{Config, LOG_FILE_NAME},
};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    // The terminal is in raw mode while the app runs, so logs go to a file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("[main] Starting mazeseek");
    app::run(Config::default())
}
