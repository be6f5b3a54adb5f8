use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uibo_tui::Cli;
use uibo_tui::HeroSlide;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = init_logging();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(uibo_tui::run_main(cli, trending()))
}

/// Log to a file; stderr belongs to the terminal UI.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".uibo")
        .join("log");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "uibo-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Built-in trending catalog; the carousel rotates the first five.
fn trending() -> Vec<HeroSlide> {
    [
        ("流浪地球2", "2023", "8.3"),
        ("漫长的季节", "2023", "9.4"),
        ("三体", "2023", "8.7"),
        ("奥本海默", "2023", "8.9"),
        ("繁花", "2024", "8.7"),
        ("狂飙", "2023", "8.5"),
        ("封神第一部", "2023", "8.0"),
        ("沙丘2", "2024", "8.2"),
        ("周处除三害", "2024", "8.1"),
        ("热辣滚烫", "2024", "7.7"),
        ("年会不能停！", "2023", "8.1"),
        ("新闻女王", "2023", "8.2"),
    ]
    .into_iter()
    .map(|(title, year, rating)| HeroSlide {
        title: title.to_string(),
        year: Some(year.to_string()),
        rating: Some(rating.to_string()),
    })
    .collect()
}
