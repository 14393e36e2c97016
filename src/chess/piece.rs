//! A piece occupying a board square: its identity, current location, move
//! history flag and the target squares recomputed on every evaluation pass.

use arrayvec::ArrayVec;

use crate::chess::core::{File, PieceKind, Player, Rank, Square};

/// The longest target list any single piece can produce: a queen reaching
/// along all eight directions from a center square.
pub(crate) const MAX_TARGETS: usize = 27;

/// The four squares involved in castling, owned by a king and fixed at its
/// creation: where the king lands and where the matching rook lands, for the
/// short and the long side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastleSquares {
    pub(crate) king_short: Square,
    pub(crate) rook_short: Square,
    pub(crate) king_long: Square,
    pub(crate) rook_long: Square,
}

impl CastleSquares {
    fn new(owner: Player) -> Self {
        let backrank = Rank::backrank(owner);
        Self {
            king_short: Square::new(File::G, backrank),
            rook_short: Square::new(File::F, backrank),
            king_long: Square::new(File::C, backrank),
            rook_long: Square::new(File::D, backrank),
        }
    }
}

/// A piece on the board. Vacant squares hold a piece too, with
/// [`PieceKind::Empty`] and the owner encoding the square's render color, so
/// the 8x8 grid is always fully populated.
///
/// `moved` is monotonic: it is set on the first relocation and never cleared,
/// so a king or rook that wanders back to its original square stays
/// ineligible for castling and a returning pawn cannot double-push again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    owner: Player,
    kind: PieceKind,
    position: Square,
    moved: bool,
    targets: ArrayVec<Square, MAX_TARGETS>,
    castle: Option<CastleSquares>,
}

impl Piece {
    /// Creates a piece standing on its square, not yet moved. Kings receive
    /// their castle-destination squares here; they never change afterwards.
    #[must_use]
    pub fn new(owner: Player, kind: PieceKind, position: Square) -> Self {
        let castle = match kind {
            PieceKind::King => Some(CastleSquares::new(owner)),
            _ => None,
        };
        Self {
            owner,
            kind,
            position,
            moved: false,
            targets: ArrayVec::new(),
            castle,
        }
    }

    /// A freshly promoted piece: inherits color and destination square and
    /// counts as having moved.
    pub(crate) fn promoted(owner: Player, kind: PieceKind, position: Square) -> Self {
        let mut piece = Self::new(owner, kind, position);
        piece.moved = true;
        piece
    }

    /// The placeholder for a vacant square. Render color alternates by
    /// `(x + y)` parity so the checkered pattern survives any sequence of
    /// moves.
    pub(crate) fn empty(position: Square) -> Self {
        let owner = if (position.file() as u8 + position.rank() as u8) % 2 == 0 {
            Player::Black
        } else {
            Player::White
        };
        Self::new(owner, PieceKind::Empty, position)
    }

    /// The player owning this piece; for empty placeholders, the square's
    /// render color.
    #[must_use]
    pub fn owner(&self) -> Player {
        self.owner
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn position(&self) -> Square {
        self.position
    }

    /// Whether this piece has ever been relocated (or was created by a
    /// promotion).
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.kind == PieceKind::Empty
    }

    /// The squares this piece can currently reach, as of the last evaluation
    /// pass. These are pseudo-legal: own-king safety is a separate filter.
    #[must_use]
    pub fn targets(&self) -> &[Square] {
        &self.targets
    }

    pub(crate) fn set_targets(&mut self, targets: ArrayVec<Square, MAX_TARGETS>) {
        self.targets = targets;
    }

    pub(crate) fn add_target(&mut self, target: Square) {
        self.targets.push(target);
    }

    pub(crate) fn castle(&self) -> Option<&CastleSquares> {
        self.castle.as_ref()
    }

    /// Moves the piece to a new square and latches the moved flag.
    pub(crate) fn relocate(&mut self, to: Square) {
        self.position = to;
        self.moved = true;
    }

    pub(crate) fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Whether moving this piece to `to` would be a pawn's initial two-square
    /// advance, the move that opens an en-passant window.
    pub(crate) fn is_pawn_double_push(&self, to: Square) -> bool {
        self.kind == PieceKind::Pawn
            && !self.moved
            && self.position.offset(0, 2 * self.owner.push_direction()) == Some(to)
    }
}
