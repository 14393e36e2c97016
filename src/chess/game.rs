//! The game state machine wrapped around a [`Board`]: whose turn it is, the
//! promotion configuration, draw offers and resignation, and the
//! terminal-state detection that turns a position with no legal reply into
//! checkmate or stalemate.

use std::fmt::{self, Write};

use anyhow::bail;

use crate::chess::board::{piece_from_fen_symbol, Board, Checks};
use crate::chess::core::{File, Move, PieceKind, Player, Promotion, Rank, Square, BOARD_WIDTH};
use crate::chess::piece::Piece;

/// The phases a game moves through. White always moves first; the phase
/// changes only on a completed legal move or an explicit resign/draw
/// command.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    WhiteToMove,
    BlackToMove,
    WhiteResigned,
    BlackResigned,
    DrawAccepted,
    Checkmate,
    Stalemate,
}

impl Phase {
    /// The player due to move, or [`None`] once the game has ended.
    #[must_use]
    pub const fn to_move(self) -> Option<Player> {
        match self {
            Self::WhiteToMove => Some(Player::White),
            Self::BlackToMove => Some(Player::Black),
            _ => None,
        }
    }

    const fn of(player: Player) -> Self {
        match player {
            Player::White => Self::WhiteToMove,
            Player::Black => Self::BlackToMove,
        }
    }
}

/// A single game of chess: the rules authority a front end talks to.
///
/// Moves enter through [`Game::try_move`] as two square names; every
/// illegality is reported as a plain `false` with no observable board
/// mutation. Outcome signals (per-color check flags, the current phase) let
/// the caller announce check, checkmate, stalemate, draws and resignations
/// without re-deriving any rules.
///
/// ```
/// use arbiter::chess::game::{Game, Phase};
///
/// let mut game = Game::new();
/// // Fool's mate: the fastest possible checkmate.
/// for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
///     assert!(game.try_move(from, to));
/// }
/// assert_eq!(game.phase(), Phase::Checkmate);
/// ```
pub struct Game {
    board: Board,
    phase: Phase,
    turn: Player,
    checks: Checks,
    promotion: Promotion,
    draw_offered: bool,
}

impl Game {
    /// A fresh game from the starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::starting();
        let checks = board.evaluate();
        Self {
            board,
            phase: Phase::WhiteToMove,
            turn: Player::White,
            checks,
            promotion: Promotion::Queen,
            draw_offered: false,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player due to move, or [`None`] once the game has ended.
    #[must_use]
    pub fn side_to_move(&self) -> Option<Player> {
        self.phase.to_move()
    }

    /// Whether the given player's king is attacked in the current position.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        self.checks.player(player)
    }

    /// The piece on the given square, for rendering: color, kind and (for
    /// empty placeholders) the square's render color.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> &Piece {
        self.board.piece(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Sets the piece a pawn reaching the final rank turns into. A single
    /// configuration value, default queen; it applies to any following move.
    pub fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = promotion;
    }

    /// Whether a draw offer from the previous move is on the table.
    #[must_use]
    pub fn draw_offered(&self) -> bool {
        self.draw_offered
    }

    /// Offers a draw to the opponent, to be accepted or implicitly declined
    /// on their next action. No-op once the game has ended.
    pub fn offer_draw(&mut self) {
        if self.phase.to_move().is_some() {
            self.draw_offered = true;
        }
    }

    /// Accepts a pending draw offer, ending the game. Returns `false` when
    /// no offer is outstanding.
    pub fn accept_draw(&mut self) -> bool {
        if self.draw_offered && self.phase.to_move().is_some() {
            self.phase = Phase::DrawAccepted;
            return true;
        }
        false
    }

    /// The side to move concedes. Returns `false` once the game has ended.
    pub fn resign(&mut self) -> bool {
        match self.phase {
            Phase::WhiteToMove => {
                self.phase = Phase::WhiteResigned;
                true
            }
            Phase::BlackToMove => {
                self.phase = Phase::BlackResigned;
                true
            }
            _ => false,
        }
    }

    /// Attempts the move described by two square names.
    ///
    /// Every failure (malformed name, empty source, opponent's piece,
    /// unreachable destination, a move that would expose the own king, game
    /// already over) returns `false` and leaves the game exactly as it was.
    /// A completed move hands the turn to the opponent, or ends the game
    /// when the opponent has no legal reply.
    pub fn try_move(&mut self, from: &str, to: &str) -> bool {
        let Some(side) = self.phase.to_move() else {
            log::debug!("move rejected: the game is over ({:?})", self.phase);
            return false;
        };
        let (Ok(from), Ok(to)) = (Square::try_from(from), Square::try_from(to)) else {
            log::debug!("move rejected: malformed square name");
            return false;
        };
        let Some(checks) = self.board.apply_move(side, from, to, self.promotion) else {
            return false;
        };
        self.checks = checks;
        self.draw_offered = false;
        let opponent = side.opponent();
        self.turn = opponent;
        self.phase = Phase::of(opponent);
        if self.checks.any() {
            if self.is_checkmate() {
                self.phase = Phase::Checkmate;
                log::info!("checkmate");
            }
        } else if self.is_stalemate() {
            self.phase = Phase::Stalemate;
            log::info!("stalemate");
        }
        true
    }

    /// Whether the side to move is checkmated: in check with no move that
    /// survives the legality filter. Tried exhaustively on cloned boards.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        match self.phase.to_move() {
            Some(side) => self.checks.player(side) && !self.board.has_any_legal_move(side),
            None => self.phase == Phase::Checkmate,
        }
    }

    /// Whether the side to move is stalemated: not in check, yet without any
    /// legal move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        match self.phase.to_move() {
            Some(side) => !self.checks.player(side) && !self.board.has_any_legal_move(side),
            None => self.phase == Phase::Stalemate,
        }
    }

    /// Every legal move available to the side to move; empty once the game
    /// has ended.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.phase.to_move() {
            Some(side) => self.board.legal_moves(side),
            None => Vec::new(),
        }
    }

    /// Parses a position from Forsyth-Edwards Notation.
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// The last two parts (together) are optional: trimmed, EPD-style
    /// position strings are common in books and datasets, and the clocks do
    /// not affect any rule this engine implements, so they are validated and
    /// ignored.
    ///
    /// # Errors
    ///
    /// Rejects syntactically malformed input and placements that are
    /// impossible to reconcile with the stated castling rights or en-passant
    /// square.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let placement = match parts.next() {
            Some(placement) => placement,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let mut pieces = Vec::with_capacity(32);
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file > BOARD_WIDTH {
                    bail!("file exceeded {BOARD_WIDTH}");
                }
                match symbol {
                    '0' => bail!("empty-square run can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    }
                    _ => {}
                }
                let (owner, kind) = piece_from_fen_symbol(symbol)?;
                pieces.push((owner, kind, Square::new(File::try_from(file)?, rank)));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!("incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen}");
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        let mut board = Board::with_pieces(&pieces)?;
        let turn = match parts.next() {
            Some(value) => Player::try_from(value)?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        match parts.next() {
            Some(value) => apply_castle_rights(&mut board, value)?,
            None => bail!("incorrect FEN: missing castling rights"),
        }
        match parts.next() {
            Some("-") => {}
            Some(value) => {
                let trigger = Square::try_from(value)?;
                let expected = match turn {
                    Player::White => Rank::Six,
                    Player::Black => Rank::Three,
                };
                if trigger.rank() != expected {
                    bail!("expected en passant square on rank {expected}, got {trigger}");
                }
                let owner = turn.opponent();
                let pushed = match trigger.offset(0, owner.push_direction()) {
                    Some(square) => square,
                    None => bail!("en passant square {trigger} has no square beyond it"),
                };
                let pawn = board.piece(pushed);
                if pawn.kind() != PieceKind::Pawn || pawn.owner() != owner {
                    bail!("en passant square is not beyond a pushed pawn");
                }
                board.open_en_passant(pushed, owner);
            }
            None => bail!("incorrect FEN: missing en passant square"),
        }
        if let Some(value) = parts.next() {
            if !value.bytes().all(|c| c.is_ascii_digit()) {
                bail!("halfmove clock can not contain anything other than digits");
            }
            match parts.next() {
                Some(value) => {
                    if !value.bytes().all(|c| c.is_ascii_digit()) {
                        bail!("fullmove counter can not contain anything other than digits");
                    }
                }
                None => bail!("incorrect FEN: missing fullmove counter"),
            }
            if parts.next().is_some() {
                bail!("trailing symbols are not allowed in FEN");
            }
        }
        let checks = board.evaluate();
        Ok(Self {
            board,
            phase: Phase::of(turn),
            turn,
            checks,
            promotion: Promotion::Queen,
            draw_offered: false,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for Game {
    type Error = anyhow::Error;

    /// Cleans up the input (whitespace, an optional `fen`/`epd` prefix) and
    /// parses the remainder as a position.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl fmt::Display for Game {
    /// Prints the position in Forsyth-Edwards Notation (the four position
    /// fields; the engine does not track move clocks).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.board, self.turn)?;
        let mut any = false;
        for (symbol, player, rook_file) in [
            ('K', Player::White, File::H),
            ('Q', Player::White, File::A),
            ('k', Player::Black, File::H),
            ('q', Player::Black, File::A),
        ] {
            if self.board.castle_right_intact(player, rook_file) {
                f.write_char(symbol)?;
                any = true;
            }
        }
        if !any {
            f.write_char('-')?;
        }
        match self.board.en_passant_square() {
            Some(square) => write!(f, " {square}"),
            None => write!(f, " -"),
        }
    }
}

fn apply_castle_rights(board: &mut Board, input: &str) -> anyhow::Result<()> {
    if input.is_empty() {
        bail!("incorrect FEN: missing castling rights");
    }
    let mut granted = [false; 4];
    if input != "-" {
        for ch in input.chars() {
            let index = match ch {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => bail!("unknown castle rights symbol: '{ch}'"),
            };
            granted[index] = true;
        }
    }
    let sides = [
        (Player::White, File::H),
        (Player::White, File::A),
        (Player::Black, File::H),
        (Player::Black, File::A),
    ];
    for (index, (player, rook_file)) in sides.into_iter().enumerate() {
        let intact = board.castle_right_intact(player, rook_file);
        if granted[index] && !intact {
            bail!("castle rights '{input}' are inconsistent with the placement");
        }
        if !granted[index] && intact {
            // The pieces stand on their home squares but the right is gone:
            // record the rook as having moved.
            board.force_moved(Square::new(rook_file, Rank::backrank(player)));
        }
    }
    Ok(())
}
