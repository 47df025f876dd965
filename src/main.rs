use clap::Parser;
use relm4::prelude::*;
use standkit::{Argb, Ratings};
use standstats::config;
use standstats::gui::app::{AppInit, AppModel};
use standstats::storage;
use standstats::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "standstats", version, about, long_about = None)]
struct Cli {
    /// Ratings to show, one mark digit per category (e.g. "543210")
    #[arg(short = 'r', long)]
    ratings: Option<Ratings>,

    /// Polygon fill color as #AARRGGBB or #RRGGBB
    #[arg(short = 'c', long)]
    color: Option<Argb>,

    /// Change ratings and colors without transitions
    #[arg(long)]
    no_animation: bool,

    /// Write the default config file if none exists and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let mut state = storage::load();
    if let Some(ratings) = cli.ratings {
        state.ratings = ratings;
    }
    if let Some(color) = cli.color {
        state.fill_color = Some(color);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.standstats.StandStats").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        config,
        state,
        animate_override: cli.no_animation.then_some(false),
        events: rx,
    });
    Ok(())
}
