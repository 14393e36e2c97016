//! Console front end for a [`Game`]: the interactive command loop, the
//! move-playback file reader and the board renderer. Every rule decision is
//! delegated to the engine; this layer only parses tokens and announces
//! outcomes.
//!
//! Accepted input, one command per line:
//!
//! - `<from> <to> [r|n|b|q] [draw?]` — a move given as two square names,
//!   with an optional promotion choice (default queen) and an optional draw
//!   offer to the opponent;
//! - `draw` — accept the draw offered on the previous move;
//! - `resign` — concede the game.

use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, Write};

use anyhow::Context;

use crate::chess::core::{PieceKind, Player, Promotion, Square, BOARD_WIDTH};
use crate::chess::game::{Game, Phase};
use crate::chess::piece::Piece;

/// An interactive session over generic line-based I/O. Scripted lines (from
/// a playback file) are consumed first, echoed as if typed, before falling
/// back to the input stream.
pub struct Session<'a, R: BufRead, W: Write> {
    game: Game,
    input: &'a mut R,
    output: &'a mut W,
    scripted: VecDeque<String>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// A session with no scripted moves.
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self::with_script(input, output, Vec::new())
    }

    /// A session that plays the given lines back before reading the input
    /// stream.
    pub fn with_script(input: &'a mut R, output: &'a mut W, script: Vec<String>) -> Self {
        Self {
            game: Game::new(),
            input,
            output,
            scripted: script.into(),
        }
    }

    /// Runs the command loop until the game ends or the input is exhausted.
    ///
    /// # Errors
    ///
    /// Only I/O failures surface as errors; illegal input is answered with
    /// "Illegal move, try again" and the loop continues.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.render("")?;
        loop {
            if self.announce_or_prompt()? {
                break;
            }
            let Some(line) = self.next_line()? else {
                break;
            };
            let mut tokens = line.split_whitespace();
            let first = tokens.next().unwrap_or("").to_lowercase();
            let second = tokens.next().unwrap_or("").to_lowercase();
            let third = tokens.next().unwrap_or("").to_lowercase();
            match first.as_str() {
                "" => {}
                "resign" => {
                    let _ = self.game.resign();
                }
                "draw" => {
                    // Accepting a draw that was never offered is illegal.
                    if !self.game.accept_draw() {
                        writeln!(self.output, "Illegal move, try again")?;
                    }
                }
                _ => {
                    let promotion =
                        Promotion::try_from(third.as_str()).unwrap_or(Promotion::Queen);
                    self.game.set_promotion(promotion);
                    if self.game.try_move(&first, &second) {
                        if third == "draw?" {
                            self.game.offer_draw();
                        }
                        let announcement = match self.game.phase() {
                            Phase::Checkmate => "Checkmate",
                            Phase::Stalemate => "Stalemate",
                            _ if self.game.is_in_check(Player::White)
                                || self.game.is_in_check(Player::Black) =>
                            {
                                "Check"
                            }
                            _ if self.game.draw_offered() => "draw?",
                            _ => "",
                        };
                        self.render(announcement)?;
                    } else {
                        writeln!(self.output, "Illegal move, try again")?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Prints the prompt for the side to move, or the game's verdict.
    /// Returns `true` once the game is over.
    fn announce_or_prompt(&mut self) -> anyhow::Result<bool> {
        match self.game.phase() {
            Phase::WhiteToMove => {
                write!(self.output, "White's move: ")?;
                self.output.flush()?;
                Ok(false)
            }
            Phase::BlackToMove => {
                write!(self.output, "Black's move: ")?;
                self.output.flush()?;
                Ok(false)
            }
            Phase::WhiteResigned => {
                writeln!(self.output, "Black wins")?;
                Ok(true)
            }
            Phase::BlackResigned => {
                writeln!(self.output, "White wins")?;
                Ok(true)
            }
            Phase::DrawAccepted => {
                writeln!(self.output, "Draw")?;
                Ok(true)
            }
            Phase::Checkmate => {
                if self.game.is_in_check(Player::White) {
                    writeln!(self.output, "Black wins")?;
                } else {
                    writeln!(self.output, "White wins")?;
                }
                Ok(true)
            }
            // Already announced alongside the final board.
            Phase::Stalemate => Ok(true),
        }
    }

    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        if let Some(line) = self.scripted.pop_front() {
            writeln!(self.output, "{line}")?;
            writeln!(self.output)?;
            return Ok(Some(line));
        }
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => {
                writeln!(self.output)?;
                Ok(Some(line.trim().to_string()))
            }
        }
    }

    /// Draws the board rank-descending, file-ascending, with rank digits on
    /// the right, the file letters underneath and an optional announcement.
    fn render(&mut self, announcement: &str) -> anyhow::Result<()> {
        for rank in (0..BOARD_WIDTH).rev() {
            for file in 0..BOARD_WIDTH {
                let piece = self.game.piece_at(Square::from_index(rank * BOARD_WIDTH + file));
                write!(self.output, "{}", cell(piece))?;
            }
            writeln!(self.output, "{}", rank + 1)?;
        }
        writeln!(self.output, " a  b  c  d  e  f  g  h")?;
        if !announcement.is_empty() {
            writeln!(self.output, "{announcement}")?;
        }
        Ok(())
    }
}

/// The three-character cell for one square: color prefix and piece letter,
/// or the square's own shade for vacancies.
fn cell(piece: &Piece) -> String {
    let letter = match piece.kind() {
        PieceKind::Pawn => 'p',
        PieceKind::Rook => 'R',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
        PieceKind::Empty => {
            return match piece.owner() {
                Player::Black => "## ".to_string(),
                Player::White => "   ".to_string(),
            }
        }
    };
    let color = match piece.owner() {
        Player::White => 'w',
        Player::Black => 'b',
    };
    format!("{color}{letter} ")
}

/// Reads a playback file: one command per line, empty lines skipped. The
/// lines are consumed as if the user typed them.
///
/// # Errors
///
/// Fails when the file can not be read.
pub fn read_playback(path: &str) -> anyhow::Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading playback file {path}"))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}
