//! Terminal front-end for the Uibo media site.
//!
//! Renders the browsing chrome — sidebar, hero carousel, compact header,
//! scroll-to-top — and an embedded chatbot widget that talks to the
//! `uibo-server` signing route.

use clap::Parser;
use color_eyre::eyre::Result;

mod app;
mod app_event;
mod app_event_sender;
mod browse;
mod chatbot;
mod header;
mod hero_carousel;
mod prefs;
mod sidebar;

pub use app::App;
pub use hero_carousel::HeroSlide;

pub const SITE_NAME: &str = "Uibo";

#[derive(Parser, Debug)]
#[command(name = "uibo-tui", about = "Terminal client for the Uibo media site")]
pub struct Cli {
    /// Base URL of the uibo-server instance hosting /api/hunyuan.
    #[arg(long, default_value = "http://127.0.0.1:3100")]
    pub server_url: String,

    /// Extra sidebar categories, e.g. --category 动画 --category 纪录片.
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

pub async fn run_main(cli: Cli, slides: Vec<HeroSlide>) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(&cli, slides).run(&mut terminal).await;
    ratatui::restore();
    result
}
