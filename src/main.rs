use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use log::info;
use sparse_2048::{Board, DenseBoard, Game, Move, SparseBoard};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BoardKind {
    Sparse,
    Dense,
}

#[derive(Debug, Parser)]
#[command(name = "sparse-2048", about = "Play 2048 with bricks on a text terminal")]
struct Args {
    /// Number of rows
    rows: usize,

    /// Number of columns
    cols: usize,

    /// Immovable bricks to place before the first move, 0 for none
    #[arg(default_value_t = 0)]
    bricks: usize,

    /// Board implementation
    #[arg(long, value_enum, default_value_t = BoardKind::Sparse)]
    board: BoardKind,

    /// Seed for tile and brick placement
    #[arg(long, default_value_t = 13579)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match args.board {
        BoardKind::Sparse => {
            play(Game::new(SparseBoard::new(args.rows, args.cols)?, args.seed), &args)
        }
        BoardKind::Dense => {
            play(Game::new(DenseBoard::new(args.rows, args.cols)?, args.seed), &args)
        }
    }
}

fn parse_move(input: &str) -> Option<Move> {
    match input {
        "l" => Some(Move::Left),
        "r" => Some(Move::Right),
        "u" => Some(Move::Up),
        "d" => Some(Move::Down),
        _ => None,
    }
}

fn play<B: Board>(mut game: Game<B>, args: &Args) -> anyhow::Result<()> {
    println!("Instructions");
    println!("------------");
    println!("Enter moves as l r u d q for");
    println!("l: shift left");
    println!("r: shift right");
    println!("u: shift up");
    println!("d: shift down");
    println!("q: quit game");
    println!();

    for _ in 0..args.bricks {
        game.add_random_brick()?;
    }
    // A quarter of the board starts filled, rounded down.
    let initial = (args.rows * args.cols / 4).saturating_sub(args.bricks).max(1);
    for _ in 0..initial {
        game.add_random_tile()?;
    }
    info!(
        "{}x{} {:?} board, {} bricks, {initial} tiles, seed {}",
        args.rows, args.cols, args.board, args.bricks, args.seed
    );

    let stdin = io::stdin();
    let mut words = stdin
        .lock()
        .lines()
        .map_while(Result::ok)
        .flat_map(|line| line.split_whitespace().map(str::to_owned).collect::<Vec<_>>());

    while !game.is_game_over() {
        println!("{game}");
        print!("Move: ");
        io::stdout().flush()?;
        let Some(input) = words.next() else { break };
        if input == "q" {
            break;
        }
        println!("{input}");
        let Some(dir) = parse_move(&input) else {
            println!("unknown move '{input}'");
            continue;
        };
        game.shift(dir);
        if game.last_shift_moved() {
            game.add_random_tile()?;
        }
    }

    println!("{game}");
    println!("Game Over! Final Score: {}", game.score());
    Ok(())
}
