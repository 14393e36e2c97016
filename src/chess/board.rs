//! The 8x8 board: the sole mutable authority over piece placement. Implements
//! the evaluation pass (recomputing every piece's reachable squares), the
//! dedicated square-attack query, castle-target discovery and the
//! apply-then-verify move executor with snapshot rollback.

use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::core::{File, Move, PieceKind, Player, Promotion, Rank, Square, BOARD_SIZE, BOARD_WIDTH};
use crate::chess::piece::{Piece, MAX_TARGETS};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

bitflags::bitflags! {
    /// Result of a full evaluation pass: which kings are currently attacked.
    /// Returned as a value from every evaluation and threaded explicitly
    /// through the executor and the terminal-state detection instead of
    /// living in shared mutable state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Checks: u8 {
        /// The white king is attacked.
        const WHITE = 0b01;
        /// The black king is attacked.
        const BLACK = 0b10;
    }
}

impl Checks {
    /// Whether the given player's king is attacked.
    #[must_use]
    pub fn player(self, player: Player) -> bool {
        match player {
            Player::White => self.contains(Self::WHITE),
            Player::Black => self.contains(Self::BLACK),
        }
    }

    pub(crate) fn any(self) -> bool {
        !self.is_empty()
    }
}

/// The one-ply window to capture a pawn that just advanced two squares.
///
/// Opened when a pawn makes its initial double push; any completed move while
/// the window is open consumes it, whether or not the capture was taken; the
/// consumed record is discarded before the next move begins. The capture
/// right therefore survives exactly one reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EnPassant {
    pushed: Option<(Square, Player)>,
    completed: bool,
}

impl EnPassant {
    fn opened(pawn: Square, owner: Player) -> Self {
        Self {
            pushed: Some((pawn, owner)),
            completed: false,
        }
    }

    fn is_open(self) -> bool {
        self.pushed.is_some() && !self.completed
    }

    /// The square the double-pushed pawn skipped over, where the capturing
    /// pawn lands.
    fn trigger_square(self) -> Option<Square> {
        let (victim, trigger, _) = self.capture_details()?;
        debug_assert!(victim.file() == trigger.file());
        Some(trigger)
    }

    /// `(victim, trigger, capturing player)` while the window is open.
    fn capture_details(self) -> Option<(Square, Square, Player)> {
        if !self.is_open() {
            return None;
        }
        let (pawn, owner) = self.pushed?;
        let trigger = pawn.offset(0, -owner.push_direction())?;
        Some((pawn, trigger, owner.opponent()))
    }

    /// Whether the given pawn may capture en passant this ply: the window is
    /// open, the pawn belongs to the replying side and stands right beside
    /// the double-pushed pawn on an adjoining file.
    fn is_participant(self, piece: &Piece) -> bool {
        let Some((pawn, owner)) = self.pushed else {
            return false;
        };
        self.is_open()
            && piece.kind() == PieceKind::Pawn
            && piece.owner() == owner.opponent()
            && piece.position().rank() == pawn.rank()
            && (piece.position().file() as i8 - pawn.file() as i8).abs() == 1
    }

    fn complete(&mut self) {
        self.completed = true;
    }

    fn is_consumed(self) -> bool {
        self.completed
    }
}

/// Pre-move state needed to undo a rejected move: the pieces at every square
/// the move touches, the cached king locations and the en-passant record.
struct Snapshot {
    saved: ArrayVec<(Square, Piece), 4>,
    white_king: Square,
    black_king: Square,
    en_passant: EnPassant,
}

impl Snapshot {
    fn new(board: &Board) -> Self {
        Self {
            saved: ArrayVec::new(),
            white_king: board.white_king,
            black_king: board.black_king,
            en_passant: board.en_passant,
        }
    }

    fn save(&mut self, board: &Board, square: Square) {
        if self.saved.iter().any(|(saved, _)| *saved == square) {
            return;
        }
        self.saved.push((square, board.piece(square).clone()));
    }

    fn restore(self, board: &mut Board) {
        for (square, piece) in self.saved {
            *board.piece_mut(square) = piece;
        }
        board.white_king = self.white_king;
        board.black_king = self.black_king;
        board.en_passant = self.en_passant;
    }
}

/// The board is a complete 8x8 grid of [`Piece`] values (vacancies hold
/// explicit empty placeholders carrying a render color), plus cached king
/// locations for O(1) check lookup and the active en-passant record.
///
/// Cloning a board deep-copies every piece and the en-passant record; the
/// legality filter and the terminal-state detection both rely on trying
/// candidate moves on such clones.
#[derive(Clone)]
pub struct Board {
    squares: [Piece; BOARD_SIZE as usize],
    white_king: Square,
    black_king: Square,
    en_passant: EnPassant,
}

impl Board {
    /// The starting position of a standard game, fully evaluated.
    #[must_use]
    pub fn starting() -> Self {
        const BACK_ROW: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut squares = Self::vacant_squares();
        for (file, &kind) in BACK_ROW.iter().enumerate() {
            let file = file as u8;
            let place = |squares: &mut [Piece; BOARD_SIZE as usize],
                         owner: Player,
                         kind: PieceKind,
                         index: u8| {
                squares[usize::from(index)] = Piece::new(owner, kind, Square::from_index(index));
            };
            place(&mut squares, Player::White, kind, file);
            place(&mut squares, Player::White, PieceKind::Pawn, BOARD_WIDTH + file);
            place(
                &mut squares,
                Player::Black,
                PieceKind::Pawn,
                BOARD_WIDTH * 6 + file,
            );
            place(
                &mut squares,
                Player::Black,
                kind,
                BOARD_WIDTH * 7 + file,
            );
        }
        let mut board = Self {
            squares,
            white_king: Square::E1,
            black_king: Square::E8,
            en_passant: EnPassant::default(),
        };
        let _ = board.evaluate();
        board
    }

    /// Builds a board from an arbitrary placement and evaluates it. Pieces
    /// standing away from their conventional home squares count as having
    /// moved, so castling and double-push rights come out right for
    /// constructed positions.
    ///
    /// # Errors
    ///
    /// Rejects placements with anything other than exactly one king per
    /// side, explicit empty entries, or two pieces on one square.
    pub fn with_pieces(placement: &[(Player, PieceKind, Square)]) -> anyhow::Result<Self> {
        let mut squares = Self::vacant_squares();
        let mut white_king = None;
        let mut black_king = None;
        for &(owner, kind, square) in placement {
            if kind == PieceKind::Empty {
                bail!("placement can not contain empty pieces");
            }
            if !squares[square as usize].is_empty() {
                bail!("two pieces on {square}");
            }
            if kind == PieceKind::King {
                let cache = match owner {
                    Player::White => &mut white_king,
                    Player::Black => &mut black_king,
                };
                if cache.replace(square).is_some() {
                    bail!("more than one '{owner}' king");
                }
            }
            let mut piece = Piece::new(owner, kind, square);
            if !conventional_home(owner, kind, square) {
                piece.mark_moved();
            }
            squares[square as usize] = piece;
        }
        let (Some(white_king), Some(black_king)) = (white_king, black_king) else {
            bail!("both kings must be present");
        };
        let mut board = Self {
            squares,
            white_king,
            black_king,
            en_passant: EnPassant::default(),
        };
        let _ = board.evaluate();
        Ok(board)
    }

    fn vacant_squares() -> [Piece; BOARD_SIZE as usize] {
        std::array::from_fn(|index| Piece::empty(Square::from_index(index as u8)))
    }

    /// The piece standing on the given square; an empty placeholder for
    /// vacancies.
    #[must_use]
    pub fn piece(&self, square: Square) -> &Piece {
        &self.squares[square as usize]
    }

    fn piece_mut(&mut self, square: Square) -> &mut Piece {
        &mut self.squares[square as usize]
    }

    /// Cached location of the given player's king.
    #[must_use]
    pub fn king(&self, player: Player) -> Square {
        match player {
            Player::White => self.white_king,
            Player::Black => self.black_king,
        }
    }

    /// The en-passant trigger square while a capture window is open.
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant.trigger_square()
    }

    /// Replaces the piece at `square` with an empty placeholder and returns
    /// the removed piece.
    fn take(&mut self, square: Square) -> Piece {
        std::mem::replace(self.piece_mut(square), Piece::empty(square))
    }

    fn clear(&mut self, square: Square) {
        *self.piece_mut(square) = Piece::empty(square);
    }

    fn occupied_by(&self, square: Square, player: Player) -> bool {
        let piece = self.piece(square);
        !piece.is_empty() && piece.owner() == player
    }

    // ------------------------------------------------------------------
    // Evaluation: pure target recomputation, then check flags, then castle
    // targets. Invoked after every structural change so target lists are
    // never stale.
    // ------------------------------------------------------------------

    /// Recomputes every piece's reachable squares from scratch and returns
    /// which kings are attacked in the resulting position. Never fails.
    pub(crate) fn evaluate(&mut self) -> Checks {
        for square in Square::iter() {
            let targets = self.reachable_from(square);
            self.piece_mut(square).set_targets(targets);
        }
        let mut checks = Checks::empty();
        if self.attacked_by(self.white_king, Player::Black) {
            checks |= Checks::WHITE;
        }
        if self.attacked_by(self.black_king, Player::White) {
            checks |= Checks::BLACK;
        }
        self.add_castle_targets(checks);
        checks
    }

    fn reachable_from(&self, square: Square) -> ArrayVec<Square, MAX_TARGETS> {
        let mut targets = ArrayVec::new();
        let piece = self.piece(square);
        let owner = piece.owner();
        match piece.kind() {
            PieceKind::Empty => {}
            PieceKind::Rook => self.slide(square, owner, &ROOK_DIRECTIONS, &mut targets),
            PieceKind::Bishop => self.slide(square, owner, &BISHOP_DIRECTIONS, &mut targets),
            PieceKind::Queen => {
                self.slide(square, owner, &ROOK_DIRECTIONS, &mut targets);
                self.slide(square, owner, &BISHOP_DIRECTIONS, &mut targets);
            }
            PieceKind::Knight => self.steps(square, owner, &KNIGHT_JUMPS, &mut targets),
            PieceKind::King => self.steps(square, owner, &KING_STEPS, &mut targets),
            PieceKind::Pawn => self.pawn_targets(piece, &mut targets),
        }
        targets
    }

    /// Walks each direction square by square: empty squares are reachable,
    /// an opponent's piece is reachable and stops the walk, an own piece
    /// stops the walk without being reachable.
    fn slide(
        &self,
        from: Square,
        owner: Player,
        directions: &[(i8, i8)],
        targets: &mut ArrayVec<Square, MAX_TARGETS>,
    ) {
        for &(dx, dy) in directions {
            let mut current = from;
            while let Some(next) = current.offset(dx, dy) {
                let occupant = self.piece(next);
                if occupant.is_empty() {
                    targets.push(next);
                    current = next;
                    continue;
                }
                if occupant.owner() != owner {
                    targets.push(next);
                }
                break;
            }
        }
    }

    fn steps(
        &self,
        from: Square,
        owner: Player,
        offsets: &[(i8, i8)],
        targets: &mut ArrayVec<Square, MAX_TARGETS>,
    ) {
        for &(dx, dy) in offsets {
            if let Some(next) = from.offset(dx, dy) {
                if !self.occupied_by(next, owner) {
                    targets.push(next);
                }
            }
        }
    }

    fn pawn_targets(&self, pawn: &Piece, targets: &mut ArrayVec<Square, MAX_TARGETS>) {
        let owner = pawn.owner();
        let from = pawn.position();
        let direction = owner.push_direction();
        if let Some(step) = from.offset(0, direction) {
            if self.piece(step).is_empty() {
                targets.push(step);
                // The double push requires both intervening squares empty.
                if !pawn.has_moved() {
                    if let Some(jump) = from.offset(0, 2 * direction) {
                        if self.piece(jump).is_empty() {
                            targets.push(jump);
                        }
                    }
                }
            }
        }
        for dx in [-1, 1] {
            if let Some(capture) = from.offset(dx, direction) {
                if self.occupied_by(capture, owner.opponent()) {
                    targets.push(capture);
                }
            }
        }
        if self.en_passant.is_participant(pawn) {
            if let Some(trigger) = self.en_passant.trigger_square() {
                targets.push(trigger);
            }
        }
    }

    // ------------------------------------------------------------------
    // Attack query.
    // ------------------------------------------------------------------

    /// Whether any piece of `attacker` attacks `target`. This is the
    /// dedicated query behind check detection and castle-path safety; it is
    /// independent of the computed target lists. Pawns attack their two
    /// forward diagonals whether or not those squares are occupied, and a
    /// pawn's straight push is never an attack.
    #[must_use]
    pub fn attacked_by(&self, target: Square, attacker: Player) -> bool {
        for square in Square::iter() {
            let piece = self.piece(square);
            if piece.is_empty() || piece.owner() != attacker {
                continue;
            }
            if self.piece_attacks(piece, target) {
                return true;
            }
        }
        false
    }

    fn piece_attacks(&self, piece: &Piece, target: Square) -> bool {
        let from = piece.position();
        if from == target {
            return false;
        }
        let dx = target.file() as i8 - from.file() as i8;
        let dy = target.rank() as i8 - from.rank() as i8;
        match piece.kind() {
            PieceKind::Pawn => dy == piece.owner().push_direction() && dx.abs() == 1,
            PieceKind::Knight => matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1)),
            PieceKind::King => dx.abs() <= 1 && dy.abs() <= 1,
            PieceKind::Rook => (dx == 0 || dy == 0) && self.open_line(from, target),
            PieceKind::Bishop => dx.abs() == dy.abs() && self.open_line(from, target),
            PieceKind::Queen => {
                (dx == 0 || dy == 0 || dx.abs() == dy.abs()) && self.open_line(from, target)
            }
            PieceKind::Empty => false,
        }
    }

    /// Whether every square strictly between `from` and `to` is empty. The
    /// two squares must share a rank, file or diagonal.
    fn open_line(&self, from: Square, to: Square) -> bool {
        let dx = (to.file() as i8 - from.file() as i8).signum();
        let dy = (to.rank() as i8 - from.rank() as i8).signum();
        let mut current = from;
        loop {
            current = match current.offset(dx, dy) {
                Some(next) => next,
                None => return false,
            };
            if current == to {
                return true;
            }
            if !self.piece(current).is_empty() {
                return false;
            }
        }
    }

    // ------------------------------------------------------------------
    // Castling.
    // ------------------------------------------------------------------

    /// Adds the castle destinations to each eligible king's target list.
    /// Eligible: the king is not in check, neither the king nor the matching
    /// rook has ever moved, the squares between them are empty and the
    /// king's walk and landing squares are not attacked.
    fn add_castle_targets(&mut self, checks: Checks) {
        for player in [Player::White, Player::Black] {
            if checks.player(player) {
                continue;
            }
            let king_square = self.king(player);
            let (has_moved, castle) = {
                let king = self.piece(king_square);
                (king.has_moved(), king.castle().copied())
            };
            let Some(castle) = castle else { continue };
            if has_moved {
                continue;
            }
            let opponent = player.opponent();
            let backrank = Rank::backrank(player);
            if self.has_unmoved_rook(Square::new(File::H, backrank), player)
                && self.clear_of_attack(opponent, [castle.rook_short, castle.king_short])
            {
                self.piece_mut(king_square).add_target(castle.king_short);
            }
            if self.piece(Square::new(File::B, backrank)).is_empty()
                && self.has_unmoved_rook(Square::new(File::A, backrank), player)
                && self.clear_of_attack(opponent, [castle.king_long, castle.rook_long])
            {
                self.piece_mut(king_square).add_target(castle.king_long);
            }
        }
    }

    fn has_unmoved_rook(&self, square: Square, owner: Player) -> bool {
        let piece = self.piece(square);
        piece.kind() == PieceKind::Rook && piece.owner() == owner && !piece.has_moved()
    }

    fn clear_of_attack(&self, attacker: Player, squares: [Square; 2]) -> bool {
        squares
            .iter()
            .all(|&square| self.piece(square).is_empty() && !self.attacked_by(square, attacker))
    }

    /// Whether `player` still holds the castle right on the given rook file:
    /// unmoved king on its home square and an unmoved rook on `rook_file`.
    pub(crate) fn castle_right_intact(&self, player: Player, rook_file: File) -> bool {
        let backrank = Rank::backrank(player);
        let king = self.piece(Square::new(File::E, backrank));
        king.kind() == PieceKind::King
            && king.owner() == player
            && !king.has_moved()
            && self.has_unmoved_rook(Square::new(rook_file, backrank), player)
    }

    // ------------------------------------------------------------------
    // Move executor / legality filter.
    // ------------------------------------------------------------------

    /// Attempts to move `side`'s piece between the two squares.
    ///
    /// Preconditions, each failing closed with no mutation: the source
    /// square holds a piece of `side` with a non-empty target list that
    /// contains the destination. The move is then applied (castle rook
    /// sub-move, relocation, promotion, en-passant bookkeeping), the board
    /// re-evaluated, and rolled back if `side`'s own king ended up attacked.
    ///
    /// Returns the evaluation result of the new position, or [`None`] for a
    /// rejected move (the board is then exactly as before the call).
    pub(crate) fn apply_move(
        &mut self,
        side: Player,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> Option<Checks> {
        {
            let piece = self.piece(from);
            if piece.is_empty() || piece.owner() != side {
                return None;
            }
            if piece.targets().is_empty() || !piece.targets().contains(&to) {
                return None;
            }
        }

        let mut snapshot = Snapshot::new(self);
        snapshot.save(self, from);
        snapshot.save(self, to);

        // A king's first move onto one of its castle destinations relocates
        // the matching rook first; the king itself moves below.
        let (kind, unmoved, castle) = {
            let piece = self.piece(from);
            (piece.kind(), !piece.has_moved(), piece.castle().copied())
        };
        if kind == PieceKind::King && unmoved {
            if let Some(castle) = castle {
                let backrank = Rank::backrank(side);
                let rook_move = if to == castle.king_short {
                    Some((Square::new(File::H, backrank), castle.rook_short))
                } else if to == castle.king_long {
                    Some((Square::new(File::A, backrank), castle.rook_long))
                } else {
                    None
                };
                if let Some((rook_from, rook_to)) = rook_move {
                    snapshot.save(self, rook_from);
                    snapshot.save(self, rook_to);
                    let mut rook = self.take(rook_from);
                    debug_assert!(rook.kind() == PieceKind::Rook);
                    rook.relocate(rook_to);
                    *self.piece_mut(rook_to) = rook;
                }
            }
        }

        let double_push = self.piece(from).is_pawn_double_push(to);

        let mut mover = self.take(from);
        mover.relocate(to);
        if mover.kind() == PieceKind::Pawn && to.rank() == Rank::backrank(side.opponent()) {
            mover = Piece::promoted(side, promotion.into(), to);
        }
        *self.piece_mut(to) = mover;
        if kind == PieceKind::King {
            match side {
                Player::White => self.white_king = to,
                Player::Black => self.black_king = to,
            }
        }

        // Any move while the window is open consumes it; only a replying
        // pawn landing on the trigger square takes the capture.
        if let Some((victim, trigger, capturing)) = self.en_passant.capture_details() {
            if side == capturing && to == trigger && self.piece(to).kind() == PieceKind::Pawn {
                snapshot.save(self, victim);
                self.clear(victim);
            }
            self.en_passant.complete();
        }
        if double_push {
            self.en_passant = EnPassant::opened(to, side);
        }

        let checks = self.evaluate();
        if checks.player(side) {
            log::debug!("move {from}{to} would leave {side}'s king attacked; rolled back");
            snapshot.restore(self);
            let _ = self.evaluate();
            return None;
        }
        if self.en_passant.is_consumed() {
            self.en_passant = EnPassant::default();
        }
        Some(checks)
    }

    // ------------------------------------------------------------------
    // Legal move enumeration: clone-and-verify over pseudo-legal targets.
    // ------------------------------------------------------------------

    /// Whether `side` has any legal move at all. Early-exits on the first
    /// target that survives clone-and-verify.
    pub(crate) fn has_any_legal_move(&self, side: Player) -> bool {
        for square in Square::iter() {
            let piece = self.piece(square);
            if piece.is_empty() || piece.owner() != side {
                continue;
            }
            for &target in piece.targets() {
                let mut trial = self.clone();
                if trial
                    .apply_move(side, square, target, Promotion::Queen)
                    .is_some()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Every legal move for `side`: the pseudo-legal targets that survive
    /// being tried on a cloned board. A pawn reaching the final rank counts
    /// once (the promotion piece is configuration, not part of the move).
    #[must_use]
    pub fn legal_moves(&self, side: Player) -> Vec<Move> {
        let mut moves = Vec::with_capacity(40);
        for square in Square::iter() {
            let piece = self.piece(square);
            if piece.is_empty() || piece.owner() != side {
                continue;
            }
            for &target in piece.targets() {
                let mut trial = self.clone();
                if trial
                    .apply_move(side, square, target, Promotion::Queen)
                    .is_some()
                {
                    moves.push(Move::new(square, target));
                }
            }
        }
        moves
    }

    // ------------------------------------------------------------------
    // Position setup support.
    // ------------------------------------------------------------------

    pub(crate) fn force_moved(&mut self, square: Square) {
        self.piece_mut(square).mark_moved();
    }

    pub(crate) fn open_en_passant(&mut self, pawn: Square, owner: Player) {
        self.en_passant = EnPassant::opened(pawn, owner);
    }
}

impl fmt::Display for Board {
    /// Prints the piece placement in Forsyth-Edwards Notation: ranks from
    /// the eighth down to the first, runs of empty squares as digits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..BOARD_WIDTH).rev() {
            let mut gap = 0;
            for file in 0..BOARD_WIDTH {
                let piece = self.piece(Square::from_index(rank * BOARD_WIDTH + file));
                match fen_symbol(piece.owner(), piece.kind()) {
                    None => gap += 1,
                    Some(symbol) => {
                        if gap > 0 {
                            write!(f, "{gap}")?;
                            gap = 0;
                        }
                        f.write_char(symbol)?;
                    }
                }
            }
            if gap > 0 {
                write!(f, "{gap}")?;
            }
            if rank > 0 {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

fn conventional_home(owner: Player, kind: PieceKind, square: Square) -> bool {
    let backrank = Rank::backrank(owner);
    match kind {
        PieceKind::Pawn => square.rank() == Rank::pawns_starting(owner),
        PieceKind::King => square == Square::new(File::E, backrank),
        PieceKind::Queen => square == Square::new(File::D, backrank),
        PieceKind::Rook => {
            square.rank() == backrank && matches!(square.file(), File::A | File::H)
        }
        PieceKind::Knight => {
            square.rank() == backrank && matches!(square.file(), File::B | File::G)
        }
        PieceKind::Bishop => {
            square.rank() == backrank && matches!(square.file(), File::C | File::F)
        }
        PieceKind::Empty => true,
    }
}

/// FEN symbol for a piece: uppercase for White, lowercase for Black, [`None`]
/// for empty placeholders.
pub(crate) fn fen_symbol(owner: Player, kind: PieceKind) -> Option<char> {
    let symbol = match kind {
        PieceKind::King => 'k',
        PieceKind::Queen => 'q',
        PieceKind::Rook => 'r',
        PieceKind::Bishop => 'b',
        PieceKind::Knight => 'n',
        PieceKind::Pawn => 'p',
        PieceKind::Empty => return None,
    };
    Some(match owner {
        Player::White => symbol.to_ascii_uppercase(),
        Player::Black => symbol,
    })
}

pub(crate) fn piece_from_fen_symbol(symbol: char) -> anyhow::Result<(Player, PieceKind)> {
    let owner = if symbol.is_ascii_uppercase() {
        Player::White
    } else {
        Player::Black
    };
    let kind = match symbol.to_ascii_lowercase() {
        'k' => PieceKind::King,
        'q' => PieceKind::Queen,
        'r' => PieceKind::Rook,
        'b' => PieceKind::Bishop,
        'n' => PieceKind::Knight,
        'p' => PieceKind::Pawn,
        _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
    };
    Ok((owner, kind))
}
