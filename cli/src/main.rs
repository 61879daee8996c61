use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use minebet_core::{GameConfig, GameSession, MineFieldGenerator, RevealOutcome};

use command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file overriding the default game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the session state as JSON after every command
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {seed}");

    let mut session = GameSession::with_seed(config, seed)?;
    log::info!("session started with balance {}", session.balance());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{HELP}");
    print!("{}", render::board(&session.snapshot()));

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        if let Err(err) = execute(&mut session, command) {
            println!("error: {err}");
        }
        if args.json {
            println!("{}", serde_json::to_string(&session.snapshot())?);
        }
    }

    log::info!("session ended with balance {}", session.balance());
    Ok(())
}

fn execute<G: MineFieldGenerator>(
    session: &mut GameSession<G>,
    command: Command,
) -> minebet_core::Result<()> {
    match command {
        Command::Start { bet, mines } => {
            if let Some(bet) = bet {
                session.select_bet(bet)?;
            }
            if let Some(mines) = mines {
                session.select_mine_count(mines)?;
            }
            session.start_selected()?;
            print!("{}", render::board(&session.snapshot()));
            println!("{}", render::status(&session.snapshot()));
        }
        Command::Reveal(target) => {
            let index = target.resolve(session.grid())?;
            let outcome = session.reveal(index)?;
            print!("{}", render::board(&session.snapshot()));
            println!("{}", render::outcome(&outcome));
            if let RevealOutcome::Safe { .. } = outcome {
                println!("{}", render::status(&session.snapshot()));
            }
        }
        Command::CashOut => {
            let payout = session.cash_out()?;
            print!("{}", render::board(&session.snapshot()));
            println!("You won ${payout}!");
        }
        Command::Bet(bet) => {
            session.select_bet(bet)?;
            println!("{}", render::status(&session.snapshot()));
        }
        Command::Mines(mines) => {
            session.select_mine_count(mines)?;
            println!("{}", render::status(&session.snapshot()));
        }
        Command::AllIn => {
            let bet = session.select_all_in()?;
            println!("Betting ${bet}");
        }
        Command::Reset => {
            let balance = session.reset_balance()?;
            println!("Balance reset to ${balance}.");
        }
        Command::Status => {
            let snapshot = session.snapshot();
            print!("{}", render::board(&snapshot));
            println!("{}", render::status(&snapshot));
        }
        Command::Ladder => print!("{}", render::ladder(&session.snapshot())?),
        Command::History => {
            if session.history().is_empty() {
                println!("No rounds played yet.");
            }
            for entry in session.history() {
                println!("{}", render::history_line(entry));
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    let config: GameConfig = toml::from_str(&text)
        .with_context(|| format!("Could not parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_overrides_defaults() {
        let config: GameConfig = toml::from_str("rows = 4\nstarting_balance = 250\n").unwrap();

        assert_eq!(config.rows, 4);
        assert_eq!(config.cols, 5);
        assert_eq!(config.starting_balance, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/minebet.toml"))).unwrap_err();

        assert!(err.to_string().contains("Could not read config"));
    }

    #[test]
    fn invalid_config_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("minebet-{}.toml", std::process::id()));
        std::fs::write(&path, "min_bet = 0\n").unwrap();

        let result = load_config(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert!(result.unwrap_err().to_string().contains("Invalid config"));
    }

    #[test]
    fn commands_drive_a_full_round() {
        let mut session = GameSession::with_seed(GameConfig::default(), 3).unwrap();
        execute(&mut session, Command::Ladder).unwrap();

        execute(&mut session, Command::Start { bet: Some(10), mines: Some(1) }).unwrap();
        assert_eq!(session.balance(), 90);

        let mine = (0..25)
            .find(|&index| {
                let mut probe = session.clone();
                matches!(probe.reveal(index), Ok(RevealOutcome::MineHit { .. }))
            })
            .unwrap();
        let safe = if mine == 0 { 1 } else { 0 };

        execute(&mut session, Command::Reveal(command::CellTarget::Index(safe))).unwrap();
        execute(&mut session, Command::CashOut).unwrap();
        assert_eq!(session.balance(), 90 + session.history().latest().unwrap().amount);
        assert!(execute(&mut session, Command::CashOut).is_err());
    }
}
