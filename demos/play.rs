//! Plays at the terminal. Every decision and every dealt value is typed in.
//!
//! Usage: cargo run --example play -- --bankroll 500 --wager 10

use std::io;
use std::time::Duration;

use bjauto::{Console, Dealer, GameController, GameOptions, Gambler, Money, TextRenderer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play blackjack against the dealer at the terminal")]
struct Args {
    /// Name shown for the gambler
    #[arg(short, long, default_value = "Gambler")]
    name: String,

    /// Starting bankroll
    #[arg(short, long, default_value = "500")]
    bankroll: Money,

    /// Auto-wager placed at the start of every turn
    #[arg(short, long, default_value = "10")]
    wager: Money,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Offer surrender on the first decision
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    surrender: bool,

    /// Milliseconds to wait between turns
    #[arg(long)]
    pause_ms: Option<u64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut gambler = Gambler::new(args.name, args.bankroll, Money::ZERO);
    if let Err(err) = gambler.set_new_auto_wager(args.wager) {
        eprintln!("play failed: {err}");
        std::process::exit(1);
    }
    let options = GameOptions::default()
        .with_verbose(true)
        .with_max_turns(args.max_turns)
        .with_surrender(args.surrender)
        .with_turn_pause(args.pause_ms.map(Duration::from_millis));

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut game = GameController::new(
        gambler,
        Dealer::new(),
        console.strategy(),
        console.input(),
        options,
    )
    .with_status_source(console.status())
    .with_renderer(TextRenderer::new(io::stdout()));

    match game.play() {
        Ok(summary) => println!("Final bankroll: {}", summary.bankroll),
        Err(err) => {
            eprintln!("play failed: {err}");
            std::process::exit(1);
        }
    }
}
