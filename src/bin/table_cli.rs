// src/bin/table_cli.rs
//
// Консольный стол: имена и ходы читаются из stdin.
//   cargo run --bin table_cli -- holdem
//   cargo run --bin table_cli -- tarabish

use std::io::{self, BufRead, Write};

use card_table::domain::{Config, Game, Limit, Parameters, Stakes};
use card_table::engine::{
    Action, ActionKind, Bid, CardDealer, Player, PlayerError, PokerTable, TableError, Turn,
};
use card_table::infra::SystemRng;
use card_table::Chips;
use tracing_subscriber::EnvFilter;

const SEATS: u8 = 4;
const BUY_IN: u64 = 100;

struct ConsolePlayer {
    id: String,
}

fn read_token(prompt: &str) -> Result<String, PlayerError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| PlayerError::Input(e.to_string()))?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PlayerError::Input(e.to_string()))?;
    if read == 0 {
        return Err(PlayerError::Input("stdin закрыт".to_string()));
    }
    Ok(line.trim().to_string())
}

impl Player for ConsolePlayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn action(&mut self, turn: &Turn) -> Result<Action, PlayerError> {
        let valid: Vec<String> = turn.valid_actions.iter().map(|a| a.to_string()).collect();
        println!(
            "\nChips {}, Outstanding {}, MinRaise {}, MaxRaise {}",
            turn.chips, turn.outstanding, turn.min_raise, turn.max_raise
        );

        loop {
            let input = read_token(&format!("Player {} Action ({}):\n", self.id, valid.join(",")))?;

            if turn.valid_actions.contains(&ActionKind::Bid) {
                match input.parse::<Bid>() {
                    Ok(bid) => return Ok(Action::Bid(bid)),
                    Err(e) => {
                        println!("Error {e}");
                        continue;
                    }
                }
            }

            let kind = match input.parse::<ActionKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    println!("Error {e}");
                    continue;
                }
            };
            let action = match kind {
                ActionKind::Fold => Action::Fold,
                ActionKind::Check => Action::Check,
                ActionKind::Call => Action::Call,
                ActionKind::Bet | ActionKind::Raise => {
                    let amount = read_token("Enter Bet / Raise Amount:\n")?;
                    let Ok(amount) = amount.parse::<u64>() else {
                        println!("Error {amount} – это не число");
                        continue;
                    };
                    if kind == ActionKind::Bet {
                        Action::Bet(Chips(amount))
                    } else {
                        Action::Raise(Chips(amount))
                    }
                }
                ActionKind::Bid => {
                    println!("Error сейчас нет торговли");
                    continue;
                }
            };
            return Ok(action);
        }
    }

    fn from_id(id: &str) -> Result<Self, PlayerError> {
        Ok(Self { id: id.to_string() })
    }
}

fn print_table(table: &PokerTable) {
    println!();
    println!("-----Table-----");
    println!(
        "round {} | pot {} | button {:?} | action {:?}",
        table.round(),
        table.pot().total(),
        table.button(),
        table.action()
    );
    if let Some(trump) = table.trump() {
        println!("trump {}", trump.name());
    }
    for seat in table.players() {
        println!("{seat}");
    }
    println!("-----Table-----");
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let game = match std::env::args().nth(1).as_deref() {
        Some("tarabish") => Game::Tarabish,
        _ => Game::Holdem,
    };
    let config = Config {
        game,
        limit: Limit::NoLimit,
        stakes: Stakes::new(Chips(1), Chips(2), Chips::ZERO),
        num_of_seats: SEATS,
        ..Config::default()
    };

    let mut table = match PokerTable::new(config, Box::new(CardDealer::new(SystemRng))) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error {e}");
            return;
        }
    };

    for seat in 0..SEATS {
        let name = loop {
            match read_token(&format!("\nPick Player {} name:\n", seat + 1)) {
                Ok(name) if !name.is_empty() => break name,
                Ok(_) => continue,
                Err(e) => {
                    eprintln!("Error {e}");
                    return;
                }
            }
        };
        if let Err(e) = table.sit(Box::new(ConsolePlayer { id: name }), Parameters::new(seat, Chips(BUY_IN))) {
            println!("Error {e}");
        }
    }

    loop {
        match table.next() {
            Ok(progress) => {
                if progress.done {
                    break;
                }
                print_table(&table);
                if let Some(results) = progress.results {
                    for list in results.values() {
                        for result in list {
                            println!("{result}");
                        }
                    }
                }
            }
            Err(e) => {
                println!("Error {e}");
                if e.is_fatal() || matches!(e, TableError::NotEnoughPlayers) {
                    break;
                }
            }
        }
    }
    println!("DONE");
}
