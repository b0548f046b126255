//! Plays seeded games with a static strategy against a shuffled shoe and
//! prints the tallies.
//!
//! Usage: cargo run --example simulate -- --games 100 --strategy insurance

use std::io;

use bjauto::{
    Dealer, DefaultStaticStrategy, GameController, GameOptions, Gambler,
    InsuranceStaticStrategy, MetricSummary, Money, ShoeInput, Strategy,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Basic strategy, never insures
    Default,
    /// Basic strategy, always insures
    Insurance,
}

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Simulate blackjack games with a static strategy")]
struct Args {
    /// Starting bankroll for every game
    #[arg(short, long, default_value = "1000")]
    bankroll: Money,

    /// Auto-wager for every turn
    #[arg(short, long, default_value = "10")]
    wager: Money,

    /// Decks in the shoe
    #[arg(short, long, default_value_t = 6)]
    decks: u8,

    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: u32,

    /// Turn cap per game
    #[arg(short, long, default_value_t = 500)]
    turns: u32,

    /// Strategy to play
    #[arg(long, value_enum, default_value_t = StrategyKind::Default)]
    strategy: StrategyKind,

    /// Seed of the first game; later games count up from it
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let result = match args.strategy {
        StrategyKind::Default => run(&args, DefaultStaticStrategy::new),
        StrategyKind::Insurance => run(&args, InsuranceStaticStrategy::new),
    };
    if let Err(err) = result {
        eprintln!("simulate failed: {err}");
        std::process::exit(1);
    }
}

fn run<S: Strategy>(args: &Args, strategy: impl Fn() -> S) -> Result<(), bjauto::GameError> {
    let mut total = MetricSummary::default();
    let mut net: i64 = 0;

    for game_index in 0..args.games {
        let mut gambler = Gambler::new("Simulator", args.bankroll, Money::ZERO);
        gambler.set_new_auto_wager(args.wager)?;

        let options = GameOptions::default().with_max_turns(Some(args.turns));
        let mut game = GameController::new(
            gambler,
            Dealer::new(),
            strategy(),
            ShoeInput::new(args.decks, args.seed + u64::from(game_index)),
            options,
        );
        let summary = game.play()?;
        let stats = game.metrics().summary();

        println!(
            "game {:>4}: {:>5} turns, {:?}, bankroll {} (low {}, high {})",
            game_index + 1,
            summary.turns,
            summary.end,
            summary.bankroll,
            stats.min_bankroll,
            stats.max_bankroll,
        );

        total.wins += stats.wins;
        total.losses += stats.losses;
        total.pushes += stats.pushes;
        total.surrenders += stats.surrenders;
        total.insurance_wins += stats.insurance_wins;
        total.insurance_losses += stats.insurance_losses;
        total.gambler_blackjacks += stats.gambler_blackjacks;
        total.dealer_blackjacks += stats.dealer_blackjacks;
        net += stats.net_winnings();
    }

    let hands = total.total_hands().max(1);
    println!();
    println!("hands played:      {}", total.total_hands());
    println!(
        "wins/losses/push:  {}/{}/{} ({:.1}% won)",
        total.wins,
        total.losses,
        total.pushes,
        f64::from(total.wins) * 100.0 / f64::from(hands)
    );
    println!("surrenders:        {}", total.surrenders);
    println!(
        "insurance:         {} won, {} lost",
        total.insurance_wins, total.insurance_losses
    );
    println!(
        "blackjacks:        {} gambler, {} dealer",
        total.gambler_blackjacks, total.dealer_blackjacks
    );
    let sign = if net < 0 { "-" } else { "" };
    println!(
        "net winnings:      {sign}{}",
        Money::from_cents(net.unsigned_abs())
    );
    Ok(())
}
