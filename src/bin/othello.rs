//! Terminal driver for the Othello engine.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use othello::{BoardEngine, Position, Score};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Play or replay Othello games in the terminal
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(about = "Play or replay Othello games in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive two-player game on stdin/stdout
    Play {
        /// Mark legal moves with `*`
        #[arg(long)]
        hints: bool,
    },

    /// Apply moves from the start position and print the result
    Replay {
        /// Moves in algebraic notation, e.g. d3 c5 f6
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Play { hints } => play(BoardEngine::new(), io::stdin().lock(), &mut out, hints),
        Command::Replay { moves } => replay(&moves, &mut out),
    }
}

/// Reads one command per line from `input` until it ends or says `quit`.
fn play(
    mut engine: BoardEngine,
    input: impl BufRead,
    out: &mut impl Write,
    mut hints: bool,
) -> Result<()> {
    print_position(out, &engine, hints)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "hint" => hints = !hints,
            "restart" | "new" => {
                engine.reset();
                info!("new game");
            }
            text => match text.parse::<Position>() {
                Ok(pos) => match engine.apply_move(pos) {
                    Ok(report) if report.opponent_passed && !report.game_over => {
                        let passed = report.player.opponent();
                        writeln!(out, "{passed} has no legal move and passes.")?;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        continue;
                    }
                },
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }

        print_position(out, &engine, hints)?;
    }

    Ok(())
}

fn replay(moves: &[String], out: &mut impl Write) -> Result<()> {
    let mut engine = BoardEngine::new();

    for (ply, text) in moves.iter().enumerate() {
        let pos: Position = text
            .parse()
            .with_context(|| format!("move {} is not a square", ply + 1))?;
        if let Err(err) = engine.apply_move(pos) {
            warn!(ply = ply + 1, %pos, %err, "replay stopped");
            bail!("move {} ({pos}) rejected: {err}", ply + 1);
        }
    }

    print_position(out, &engine, false)
}

fn print_position(out: &mut impl Write, engine: &BoardEngine, hints: bool) -> Result<()> {
    let marks = if hints && !engine.is_over() {
        engine.board().legal_moves(engine.side_to_move())
    } else {
        0
    };
    let Score { black, white } = engine.score();

    write!(out, "{}", engine.board().render(marks))?;
    writeln!(out, "black (X): {black}  white (O): {white}")?;

    if engine.is_over() {
        writeln!(out, "Game over: {}.", engine.score().outcome())?;
    } else {
        writeln!(out, "{} to move", engine.side_to_move())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use othello::{Board, Player};

    use super::*;

    const WIPE_OUT: [&str; 9] = ["e6", "f4", "e3", "f6", "g5", "d6", "e7", "f5", "c5"];

    fn run_play(engine: BoardEngine, input: &str, hints: bool) -> String {
        let mut out = Vec::new();
        play(engine, input.as_bytes(), &mut out, hints).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// The last board printed, from its header to the end of the output.
    fn last_position(output: &str) -> &str {
        let start = output.rfind("  a b c d e f g h").unwrap();
        &output[start..]
    }

    fn moves(list: &[&str]) -> Vec<String> {
        list.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn replay_stops_at_first_rejected_move() {
        let mut out = Vec::new();

        let err = replay(&moves(&["d3", "d3"]), &mut out).unwrap_err();

        assert!(err.to_string().contains("move 2 (d3) rejected"));
        assert!(out.is_empty());
    }

    #[test]
    fn replay_rejects_bad_notation() {
        let mut out = Vec::new();

        assert!(replay(&moves(&["z9"]), &mut out).is_err());
    }

    #[test]
    fn replay_prints_final_position() {
        let mut out = Vec::new();

        replay(&moves(&WIPE_OUT), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("black (X): 13  white (O): 0"));
        assert!(text.ends_with("Game over: black wins.\n"));
    }

    #[test]
    fn play_announces_outcome_when_game_ends() {
        let input = WIPE_OUT.join("\n");

        let output = run_play(BoardEngine::new(), &input, false);

        let last = last_position(&output);
        assert!(last.contains("black (X): 13  white (O): 0"));
        assert!(last.ends_with("Game over: black wins.\n"));
    }

    #[test]
    fn play_reports_forced_pass() {
        let black = 1u64 | (1u64 << 56);
        let white = (1u64 << 1) | (1u64 << 57);
        let engine = BoardEngine::from_board(Board::from_bitboards(black, white), Player::Black);

        let output = run_play(engine, "c1\n", false);

        assert!(output.contains("white has no legal move and passes."));
        assert!(last_position(&output).ends_with("black to move\n"));
    }

    #[test]
    fn hint_marks_survive_restart() {
        let output = run_play(BoardEngine::new(), "d3\nhint\nrestart\n", false);

        let last = last_position(&output);
        assert_eq!(last.matches('*').count(), 4);
        assert!(last.contains("3 . . . * . . . ."));
        assert!(last.contains("black (X): 2  white (O): 2"));
        assert!(last.ends_with("black to move\n"));
    }

    #[test]
    fn hint_toggles_off_again() {
        let output = run_play(BoardEngine::new(), "hint\nhint\n", false);

        assert!(!last_position(&output).contains('*'));
    }

    #[test]
    fn invalid_input_keeps_game_going() {
        let output = run_play(BoardEngine::new(), "a1\nzz\nquit\nd3\n", false);

        assert!(output.contains("illegal move: a1 flips nothing"));
        assert!(output.contains("cannot read \"zz\" as a square"));
        assert!(last_position(&output).contains("black (X): 2  white (O): 2"));
    }
}
