//! Terminal butter-othello, two humans or against a CPU
//!
//! Usage: cargo run --bin play -- [--mode cpu-hard] [--cpu-color white] [--seed 7]
//!
//! Set RUST_LOG=butter_othello_engines=info to watch the CPU think.

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use butter_othello::{Color, GameState, PieceType, Winner};
use butter_othello_engines::{CpuAction, GameMode, GameSession, Settings, DEFAULT_DEPTH};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Pvp,
    CpuEasy,
    CpuHard,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Black,
    White,
}

/// Play butter-othello in the terminal
#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Othello with butter, cat and buttercat pieces", long_about = None)]
struct Args {
    /// Who plays
    #[arg(long, value_enum, default_value_t = Mode::CpuEasy)]
    mode: Mode,

    /// Color the CPU plays
    #[arg(long, value_enum, default_value_t = Side::White)]
    cpu_color: Side,

    /// Seed for piece draws and the easy CPU
    #[arg(long)]
    seed: Option<u64>,

    /// Search depth of the hard CPU
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            mode: match self.mode {
                Mode::Pvp => GameMode::Pvp,
                Mode::CpuEasy => GameMode::CpuEasy,
                Mode::CpuHard => GameMode::CpuHard,
            },
            cpu_color: match self.cpu_color {
                Side::Black => Color::Black,
                Side::White => Color::White,
            },
            search_depth: self.depth,
            seed: self.seed,
            ..Settings::default()
        }
    }
}

enum Command {
    Place { slot: u8, x: i32, y: i32 },
    Pass,
    NewGame,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["q"] | ["quit"] => Ok(Command::Quit),
        ["pass"] => Ok(Command::Pass),
        ["new"] => Ok(Command::NewGame),
        [slot, x, y] => {
            let slot = slot.parse().map_err(|_| format!("bad slot '{slot}'"))?;
            let x = x.parse().map_err(|_| format!("bad column '{x}'"))?;
            let y = y.parse().map_err(|_| format!("bad row '{y}'"))?;
            Ok(Command::Place { slot, x, y })
        }
        _ => Err("expected '<slot> <x> <y>', 'pass', 'new' or 'q'".to_string()),
    }
}

fn symbol(color: Option<Color>, kind: Option<PieceType>) -> &'static str {
    match (kind, color) {
        (None, _) | (_, None) => ".",
        (Some(PieceType::ButterCat), _) => "*",
        (Some(PieceType::Normal), Some(Color::Black)) => "X",
        (Some(PieceType::Normal), Some(Color::White)) => "O",
        (Some(PieceType::Butter), Some(Color::Black)) => "B",
        (Some(PieceType::Butter), Some(Color::White)) => "b",
        (Some(PieceType::Cat), Some(Color::Black)) => "C",
        (Some(PieceType::Cat), Some(Color::White)) => "c",
    }
}

fn render(state: &GameState) {
    println!();
    println!("   0 1 2 3 4 5 6 7");
    for (y, row) in state.board.iter().enumerate() {
        print!("{y}  ");
        for cell in row {
            let mark = if cell.piece_type.is_none() && cell.is_valid_move {
                "+"
            } else {
                symbol(cell.color, cell.piece_type)
            };
            print!("{mark} ");
        }
        println!();
    }
    println!();

    for color in Color::ALL {
        let hand = state.hand(color);
        let slots: Vec<String> = hand
            .slots
            .iter()
            .map(|slot| {
                let marker = if hand.selected_slot_id == Some(slot.id) { ">" } else { " " };
                format!("{marker}{}:{:?}", slot.id, slot.kind)
            })
            .collect();
        println!("{:?} hand: {}", color, slots.join(" "));
    }
    println!(
        "Black {} - White {}   {:?} to move",
        state.black_count, state.white_count, state.current_turn
    );
}

fn announce_result(state: &GameState) {
    match state.winner {
        Some(Winner::Black) => println!("Black wins!"),
        Some(Winner::White) => println!("White wins!"),
        Some(Winner::Draw) => println!("Draw."),
        None => {}
    }
    println!("Type 'new' for another game or 'q' to quit.");
}

/// Let the CPU and forced passes run until a human has something to do
fn advance(session: &mut GameSession) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // no animation in the terminal
        session.end_flipping();
        if session.game().is_game_over() {
            return Ok(());
        }
        if let Some(action) = session.cpu_turn()? {
            match action {
                CpuAction::Placed { chosen, outcome } => println!(
                    "CPU plays slot {} at {} flipping {}",
                    chosen.slot,
                    chosen.position,
                    outcome.flipped.len()
                ),
                CpuAction::Passed => println!("CPU passes."),
            }
            continue;
        }
        if session.resolve_forced_pass() {
            println!("No playable piece, turn passes.");
            continue;
        }
        return Ok(());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut session = GameSession::new(args.settings());
    if let Some(cpu) = session.cpu_name() {
        println!("Playing against the {cpu} CPU.");
    }
    println!("Enter '<slot> <x> <y>' to place, 'pass', 'new' or 'q'.");

    advance(&mut session)?;
    render(&session.state());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nGoodbye!");
            return Ok(());
        }

        let command = match parse_command(line.trim()) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Command::NewGame => session.new_game(),
            Command::Pass => {
                if !session.pass() {
                    println!("Cannot pass right now.");
                }
            }
            Command::Place { slot, x, y } => {
                if let Err(err) = session.select_slot(slot) {
                    println!("{err}");
                    continue;
                }
                match session.place(x, y) {
                    Ok(outcome) if outcome.success => {
                        println!("Flipped {}", outcome.flipped.len());
                    }
                    Ok(_) => {
                        println!("That piece cannot go there.");
                        session.deselect_slot();
                    }
                    Err(err) => {
                        println!("{err}");
                        session.deselect_slot();
                    }
                }
            }
        }

        advance(&mut session)?;
        let state = session.state();
        render(&state);
        if state.is_game_over {
            announce_result(&state);
        }
    }
}
