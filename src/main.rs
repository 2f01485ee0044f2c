mod anim;
mod app;
mod cards;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the platform cards shown beside the animation.
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Number of balloon slots.
    #[arg(long, default_value_t = anim::VISIBLE_BALLOONS)]
    balloons: usize,

    /// Seed for reproducible balloon motion and label rotation.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let deck = match &args.cards {
        Some(path) => match cards::load_card_deck(path) {
            Ok(deck) => deck,
            Err(error) => {
                log::warn!(
                    "falling back to the built-in platform list: {error:#}"
                );
                cards::default_deck()
            }
        },
        None => cards::default_deck(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "House of Peers",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BalloonApp::new(
                cc,
                deck,
                args.balloons,
                args.seed,
            )))
        }),
    )
}
