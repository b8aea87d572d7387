use anyhow::Result;
use leaders_api::client::EspnClient;
use leaders_api::fetch::LeaderFeed;
use leaders_api::names::abbreviate_for_display;
use leaders_api::{LeagueKey, NormalizedGame};
use log::warn;

/// Length budget for leader names on the compact one-line-per-team output.
const NAME_BUDGET: usize = 8;

const DEFAULT_MAX_GAMES: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(cli) = parse_args() else {
        return Ok(());
    };

    // An unknown league key is a configuration problem, not a crash: warn
    // and report no data, same as the library does for upstream failures.
    let league: LeagueKey = match cli.league.parse() {
        Ok(league) => league,
        Err(err) => {
            warn!("{err}");
            println!("No live games.");
            return Ok(());
        }
    };

    let feed = LeaderFeed::new(EspnClient::new());
    let games = feed.fetch_live_games(league, cli.max_games).await;

    if games.is_empty() {
        println!("No live {league} games right now.");
        return Ok(());
    }
    for game in &games {
        print_game(game);
    }

    Ok(())
}

fn print_game(game: &NormalizedGame) {
    println!("{}", game.summary_line());
    let sides = [
        (&game.away_abbr, &game.away_leaders),
        (&game.home_abbr, &game.home_leaders),
    ];
    for (abbr, leaders) in sides {
        let Some(leaders) = leaders else { continue };
        let line = leaders
            .iter()
            .map(|(category, leader)| {
                format!(
                    "{} {} {}",
                    category.label(),
                    abbreviate_for_display(&leader.name, NAME_BUDGET),
                    leader.stat
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {abbr}: {line}");
    }
}

struct CliArgs {
    league: String,
    max_games: usize,
}

/// Parse command-line arguments. `None` means the invocation was already
/// handled (help/version); bad usage exits with status 2.
fn parse_args() -> Option<CliArgs> {
    let mut league = None;
    let mut max_games = DEFAULT_MAX_GAMES;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("statlead {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--max-games" => match args.next().as_deref().map(str::parse::<usize>) {
                Some(Ok(n)) => max_games = n,
                _ => usage_error("--max-games expects a number"),
            },
            _ if league.is_none() && !arg.starts_with('-') => league = Some(arg),
            _ => usage_error(&format!("Unknown argument: {arg}")),
        }
    }

    let Some(league) = league else {
        usage_error("Missing league argument");
    };
    Some(CliArgs { league, max_games })
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\n\n{}", usage_text());
    std::process::exit(2);
}

fn usage_text() -> &'static str {
    "statlead - live stat leaders for the terminal

Usage:
  statlead <league> [--max-games N]
  statlead --help
  statlead --version

Leagues:
  nba, nfl, ncaam, ncaaf

Environment:
  RUST_LOG   Log filter (default: warn)"
}
