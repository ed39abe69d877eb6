mod config;
mod error;
mod games;
mod store;
mod terminal;

use config::GameOptions;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use store::FileStore;
use tracing::info;

const LOG_ENV: &str = "QUIZ_GAMES_LOG";
const LOG_FILE: &str = "quiz-games.log";

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String>
{
    let mut args = env::args().skip(1);
    let command = args.next();
    let rest: Vec<String> = args.collect();
    match command.as_deref() {
        None => interactive_menu(),
        Some("list") => {
            list_games();
            Ok(())
        }
        Some("geo") => run_game("geo", rest),
        Some("gugudan") => run_game("gugudan", rest),
        Some("-h") | Some("--help") => {
            print_help();
            Ok(())
        }
        Some(other) => Err(format!("Unknown command '{other}'. Run with --help.")),
    }
}

fn run_game(name: &str, args: Vec<String>) -> Result<(), String>
{
    let (data_dir, args) = config::take_data_dir(args)?;
    let data_dir = config::resolve_data_dir(data_dir)?;

    let defaults = match name {
        "geo" => games::geo::DEFAULT_TIMER,
        "gugudan" => games::gugudan::DEFAULT_TIMER,
        _ => return Err(format!("Unknown game '{name}'. Run with --help.")),
    };
    let options = GameOptions::from_args(&args, defaults)?;

    if let Err(err) = init_logging(&data_dir) {
        eprintln!("Warning: logging disabled ({err}).");
    }
    let store = FileStore::new(&data_dir);
    info!(game = name, data_dir = %store.dir().display(), ?options, "starting game");

    let result = match name {
        "geo" => games::geo::run_with_options(options, store),
        _ => games::gugudan::run_with_options(options, store),
    };
    result.map_err(|err| err.to_string())
}

fn init_logging(data_dir: &Path) -> Result<(), String>
{
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    fs::create_dir_all(data_dir)
        .map_err(|err| format!("Failed to create {}: {err}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| format!("Failed to open {}: {err}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| format!("Failed to install log subscriber: {err}"))
}

fn interactive_menu() -> Result<(), String>
{
    let registry = games::registry();
    println!("Quiz Games");
    println!();
    println!("Select a game:");
    for (idx, game) in registry.iter().enumerate() {
        println!("  {}. {} - {}", idx + 1, game.name, game.description);
    }
    println!();
    print!("Enter number or name (default 1, q to quit): ");
    std::io::Write::flush(&mut std::io::stdout())
        .map_err(|err| format!("Failed to flush stdout: {err}"))?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|err| format!("Failed to read input: {err}"))?;
    let choice = input.trim();

    if choice.is_empty() {
        return run_game(registry[0].name, Vec::new());
    }
    if choice.eq_ignore_ascii_case("q") {
        return Ok(());
    }
    if let Ok(index) = choice.parse::<usize>() {
        if index >= 1 && index <= registry.len() {
            return run_game(registry[index - 1].name, Vec::new());
        }
    }

    for game in registry {
        if game.name.eq_ignore_ascii_case(choice) {
            return run_game(game.name, Vec::new());
        }
    }

    Err("Invalid selection.".to_string())
}

fn list_games()
{
    println!("Available games:");
    for game in games::registry() {
        println!("  {:<10} - {}", game.name, game.description);
    }
}

fn print_help()
{
    println!("quiz-games");
    println!("\nUsage:");
    println!("  quiz-games list");
    println!("  quiz-games geo [options]");
    println!("  quiz-games gugudan [options]");
    println!("\nOptions:");
    println!("  --email=ADDRESS       prefill the setup screen");
    println!("  --start-timer=SECS    stage 1 time budget (geo 30, gugudan 10)");
    println!("  --decrement=SECS      budget lost per stage (0.1)");
    println!("  --min-timer=SECS      budget floor (geo 2, gugudan 1)");
    println!("  --data-dir=PATH       where leaderboards and the log live");
    println!("\nNotes:");
    println!("  Leaderboards are stored as geo_rankings.json / gugudan_rankings.json.");
    println!("  Set QUIZ_GAMES_DATA_DIR to move the data directory and");
    println!("  QUIZ_GAMES_LOG=debug for more detailed logs.");
}
