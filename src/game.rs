/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context as _, Result};
use log::{debug, info};

use crate::{
    attacks::{attacks_of, AttackMap},
    error::{RuleError, RuleResult},
    movegen,
    path::{classify, Context, Verdict},
    special::{detect_special, needs_promotion, PromotionChooser, SpecialMove},
    Bitboard, Board, Color, Piece, PieceId, PieceKind, Role, Square,
};

/// A move as a player asks for it: which piece, where to, and optionally
/// what a promoting pawn becomes.
///
/// Written as `WP5-e4`, or `WP1-a8=q` with a promotion choice.
///
/// # Example
/// ```
/// # use gambit::{MoveRequest, PieceKind, Square};
/// let request: MoveRequest = "wp1-A8=q".parse().unwrap();
/// assert_eq!(request.to, Square::A8);
/// assert_eq!(request.promotion, Some(PieceKind::Queen));
/// assert_eq!(request.to_string(), "WP1-a8=Q");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MoveRequest {
    pub piece: PieceId,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    #[inline(always)]
    pub const fn new(piece: PieceId, to: Square) -> Self {
        Self {
            piece,
            to,
            promotion: None,
        }
    }

    #[inline(always)]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }
}

impl FromStr for MoveRequest {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((label, target)) = s.trim().split_once('-') else {
            bail!("Invalid move: Expected something like WP5-e4. Got {s:?}");
        };
        let piece = label.parse()?;

        let (to, promotion) = match target.split_once('=') {
            Some((to, kind)) => (to, Some(kind.parse::<PieceKind>()?)),
            None => (target, None),
        };
        let to = Square::parse(to).context(format!("Invalid destination in move {s:?}"))?;

        Ok(Self {
            piece,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.piece, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.char())?;
        }
        Ok(())
    }
}

/// What happened when a move was played.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub special: SpecialMove,
    pub captured: Option<PieceId>,
    /// The piece that replaced a promoting pawn.
    pub promoted_to: Option<PieceId>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {captured}")?;
        }
        match self.special {
            SpecialMove::None => {}
            SpecialMove::EnPassant { .. } => write!(f, " en passant")?,
            SpecialMove::Castle { rook_from, rook_to } => {
                write!(f, " castling, rook {rook_from}-{rook_to}")?
            }
        }
        if let Some(promoted) = self.promoted_to {
            write!(f, " and becomes {promoted}")?;
        }
        Ok(())
    }
}

/// How many of each kind a side starts a standard game with.
///
/// Promoted pieces are numbered after these even when a custom placement
/// holds fewer, so a side's first extra queen is always its second.
const STARTING_COUNTS: [u8; PieceKind::COUNT] = [8, 2, 2, 2, 1, 1];

/// A two-player chess game under rules enforcement.
///
/// The session owns the board, the ply counter and both sides' attack maps.
/// Maps are recomputed from scratch after every executed move, so between
/// calls they always describe the current board.
///
/// [`GameSession::play`] is the validated entry point. The lower-level
/// operations it is built from are public too, for callers that drive the
/// rules step by step.
#[derive(Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,

    /// Plies played. White moves on even plies.
    ply: usize,

    /// Attack maps, indexed by [`Color::index`].
    attacks: [AttackMap; Color::COUNT],

    /// Highest number ever issued, per side and kind.
    issued: [[u8; PieceKind::COUNT]; Color::COUNT],

    /// Pawns replaced by promotion, in the order they were promoted.
    retired: Vec<Piece>,
}

impl GameSession {
    /// A new game from the standard starting array, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// A game starting from a FEN placement.
    ///
    /// If the placement is followed by an active color field (as in a full
    /// FEN string), a `b` there makes Black the side to move. Any later
    /// fields are ignored.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, GameSession};
    /// let game = GameSession::from_placement("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.ply(), 1);
    /// ```
    pub fn from_placement(placement: &str) -> Result<Self> {
        let mut fields = placement.split_whitespace();
        let board = Board::from_placement(fields.next().unwrap_or_default())?;
        let side = match fields.next() {
            Some(color) => color.parse()?,
            None => Color::White,
        };
        Ok(Self::from_board(board, side))
    }

    /// A game starting from an arbitrary board with `side` to move.
    pub fn from_board(board: Board, side: Color) -> Self {
        let mut issued = [STARTING_COUNTS; Color::COUNT];
        for piece in board.pieces() {
            let highest = &mut issued[piece.color().index()][piece.kind().index()];
            *highest = (*highest).max(piece.num());
        }

        let mut session = Self {
            board,
            ply: side.index(),
            attacks: Default::default(),
            issued,
            retired: Vec::new(),
        };
        session.recompute_attacks();
        session
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of plies played so far.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        if self.ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Pawns that have been promoted, and so are out of play.
    #[inline(always)]
    pub fn retired(&self) -> &[Piece] {
        &self.retired
    }

    /// The pieces of `side` still in play, in ascending square order.
    pub fn pieces(&self, side: Color) -> impl Iterator<Item = &Piece> {
        self.board.pieces_of(side)
    }

    /// The current attack map of `side`.
    #[inline(always)]
    pub fn attacked_squares(&self, side: Color) -> &AttackMap {
        &self.attacks[side.index()]
    }

    /// Whether any piece of `side` attacks `square`.
    ///
    /// This is the primitive check detection is built on.
    #[inline(always)]
    pub fn square_is_attacked_by(&self, side: Color, square: Square) -> bool {
        self.attacked_squares(side).attacks(square)
    }

    /// Whether `side`'s king is attacked by the opponent.
    pub fn is_in_check(&self, side: Color) -> bool {
        self.board
            .king_square(side)
            .is_some_and(|king| self.square_is_attacked_by(side.opponent(), king))
    }

    /// Every square `piece` could reach by its movement pattern alone.
    pub fn pseudo_legal_destinations(&self, piece: PieceId) -> RuleResult<Bitboard> {
        let piece = self.find(piece)?;
        Ok(movegen::pseudo_legal_destinations(piece))
    }

    /// Classifies `side`'s `piece` moving to `to`: quiet, a capture, or blocked.
    ///
    /// King moves are checked against the opponent's attack map, but nothing
    /// here looks at discovered attacks on the king.
    pub fn classify_move(&self, side: Color, piece: PieceId, to: Square) -> RuleResult<Verdict> {
        let piece = self.find_for(side, piece)?;
        if !movegen::pseudo_legal_destinations(piece).contains(to) {
            return Err(RuleError::InvalidDestination { piece: piece.id(), to });
        }
        Ok(classify(&self.board, piece, to, &self.context_for(side)))
    }

    /// Whether the resolver refuses `side`'s `piece` moving to `to`.
    pub fn is_move_blocked(&self, side: Color, piece: PieceId, to: Square) -> RuleResult<bool> {
        Ok(self.classify_move(side, piece, to)?.is_blocked())
    }

    /// The auxiliary edits `side`'s `piece` moving to `to` would carry.
    pub fn resolve_special(&self, side: Color, piece: PieceId, to: Square) -> RuleResult<SpecialMove> {
        let piece = self.find_for(side, piece)?;
        Ok(detect_special(&self.board, self.ply, piece, to))
    }

    /// The destinations `piece` may legally move to, whoever's turn it is.
    ///
    /// # Example
    /// ```
    /// # use gambit::{GameSession, PieceId};
    /// let game = GameSession::new();
    /// let pawn: PieceId = "WP5".parse().unwrap();
    /// assert_eq!(game.legal_destinations(pawn).unwrap().population(), 2);
    /// let rook: PieceId = "BR1".parse().unwrap();
    /// assert!(game.legal_destinations(rook).unwrap().is_empty());
    /// ```
    pub fn legal_destinations(&self, piece: PieceId) -> RuleResult<Bitboard> {
        let piece = self.find(piece)?;
        Ok(movegen::pseudo_legal_destinations(piece)
            .iter()
            .filter(|&to| self.vet(piece, to).is_ok())
            .collect())
    }

    /// Every legal move of the side to move.
    ///
    /// A promoting pawn move is listed once per promotion kind.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        let mut moves = Vec::with_capacity(64);
        for piece in self.pieces(self.side_to_move()) {
            for to in movegen::pseudo_legal_destinations(piece) {
                if self.vet(piece, to).is_err() {
                    continue;
                }
                let request = MoveRequest::new(piece.id(), to);
                if needs_promotion(piece, to) {
                    moves.extend(
                        [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight]
                            .map(|kind| request.with_promotion(kind)),
                    );
                } else {
                    moves.push(request);
                }
            }
        }
        moves
    }

    /// Validates and plays a move.
    ///
    /// The checks run in this order, and the first failure is returned with
    /// the session untouched:
    /// 1. the piece is in play ([`RuleError::NoSuchPiece`]);
    /// 2. it belongs to the side to move ([`RuleError::NotYourTurn`]);
    /// 3. its movement pattern reaches `to` ([`RuleError::InvalidDestination`]);
    /// 4. nothing blocks it ([`RuleError::Blocked`], or
    ///    [`RuleError::WouldExposeKing`] for king-safety refusals);
    /// 5. the mover's king is not attacked afterwards ([`RuleError::WouldExposeKing`]).
    ///
    /// If the request names a promotion kind, it is used; otherwise `chooser` is asked.
    /// A kind that no pawn may become is [`RuleError::IllegalPromotionChoice`],
    /// and a kind named on a move that does not promote is
    /// [`RuleError::InvalidDestination`].
    pub fn play(&mut self, request: MoveRequest, chooser: impl PromotionChooser) -> RuleResult<MoveRecord> {
        let piece = *self.find(request.piece)?;
        if piece.color() != self.side_to_move() {
            return Err(RuleError::NotYourTurn { piece: piece.id() });
        }
        let special = self.vet(&piece, request.to)?;

        if let Some(kind) = request.promotion {
            if !kind.is_promotion_target() {
                return Err(RuleError::IllegalPromotionChoice { kind });
            }
            if !needs_promotion(&piece, request.to) {
                return Err(RuleError::InvalidDestination {
                    piece: piece.id(),
                    to: request.to,
                });
            }
        }

        let (captured, promoted_to) = match request.promotion {
            Some(kind) => self.apply(&piece, request.to, special, kind)?,
            None => self.apply(&piece, request.to, special, chooser)?,
        };

        Ok(MoveRecord {
            piece: piece.id(),
            from: piece.square(),
            to: request.to,
            special,
            captured,
            promoted_to,
        })
    }

    /// Carries out a move that has already been validated.
    ///
    /// Relocates the piece, applies `special`, updates the movement
    /// bookkeeping, advances the ply counter, substitutes a promoted piece and
    /// recomputes both attack maps. Returns the captured piece, if any.
    ///
    /// The promotion choice is checked before anything changes, so an
    /// [`RuleError::IllegalPromotionChoice`] leaves the session untouched.
    pub fn execute_move(
        &mut self,
        piece: PieceId,
        to: Square,
        special: SpecialMove,
        chooser: impl PromotionChooser,
    ) -> RuleResult<Option<PieceId>> {
        let piece = *self.find(piece)?;
        let (captured, _) = self.apply(&piece, to, special, chooser)?;
        Ok(captured)
    }

    fn apply(
        &mut self,
        piece: &Piece,
        to: Square,
        special: SpecialMove,
        mut chooser: impl PromotionChooser,
    ) -> RuleResult<(Option<PieceId>, Option<PieceId>)> {
        let id = piece.id();
        let from = piece.square();

        let promotion = if needs_promotion(piece, to) {
            let kind = chooser.choose(id);
            if !kind.is_promotion_target() {
                return Err(RuleError::IllegalPromotionChoice { kind });
            }
            Some(kind)
        } else {
            None
        };

        let mut captured = self.board.move_occupant(from, to);
        match special {
            SpecialMove::None => {}
            SpecialMove::EnPassant { captured: victim } => {
                debug_assert!(captured.is_none(), "En passant must land on an empty square");
                captured = self.board.take(victim);
            }
            SpecialMove::Castle { rook_from, rook_to } => {
                self.board.move_occupant(rook_from, rook_to);
                if let Some(rook) = self.board.occupant_at_mut(rook_to) {
                    if let Role::Rook { has_moved } = rook.role_mut() {
                        *has_moved = true;
                    }
                }
                info!("{id} castles, rook {rook_from}-{rook_to}");
            }
        }

        let ply = self.ply + 1;
        if let Some(moved) = self.board.find_mut(id) {
            match moved.role_mut() {
                Role::Pawn {
                    has_moved,
                    last_moved_ply,
                    double_step,
                    ..
                } => {
                    *has_moved = true;
                    *last_moved_ply = Some(ply);
                    *double_step = from.distance_ranks(to) == 2;
                }
                Role::Rook { has_moved } | Role::King { has_moved } => *has_moved = true,
                _ => {}
            }
        }
        self.ply = ply;

        let promoted_to = promotion.and_then(|kind| self.promote(to, kind));
        self.recompute_attacks();

        debug!(
            "Ply {ply}: {id} {from}-{to}{}",
            captured.map(|c| format!(" takes {}", c.id())).unwrap_or_default()
        );
        Ok((captured.map(|c| c.id()), promoted_to))
    }

    /// Replaces the pawn on `square` with a new piece of `kind`, retiring the pawn.
    fn promote(&mut self, square: Square, kind: PieceKind) -> Option<PieceId> {
        let mut pawn = self.board.take(square)?;
        if let Role::Pawn { promoted, .. } = pawn.role_mut() {
            *promoted = true;
        }

        let color = pawn.color();
        let issued = &mut self.issued[color.index()][kind.index()];
        *issued += 1;
        let replacement = Piece::new(color, kind, *issued, square).moved();
        self.board.place(square, Some(replacement));

        info!("{} promoted to {} on {square}", pawn.id(), replacement.id());
        self.retired.push(pawn);
        Some(replacement.id())
    }

    fn recompute_attacks(&mut self) {
        self.attacks = Color::all().map(|color| AttackMap::compute(&self.board, color));
    }

    /// Runs every check of [`GameSession::play`] after the turn check,
    /// returning the special move the move would carry.
    fn vet(&self, piece: &Piece, to: Square) -> RuleResult<SpecialMove> {
        let id = piece.id();
        if to == piece.square() || !movegen::pseudo_legal_destinations(piece).contains(to) {
            return Err(RuleError::InvalidDestination { piece: id, to });
        }

        if let Verdict::Blocked(reason) = classify(&self.board, piece, to, &self.context_for(piece.color())) {
            return Err(RuleError::from_block(id, to, reason));
        }

        let special = detect_special(&self.board, self.ply, piece, to);
        if self.exposes_king(piece, to, special) {
            return Err(RuleError::WouldExposeKing { piece: id, to });
        }

        Ok(special)
    }

    /// Plays the move on a scratch board and reports whether the mover's king ends up attacked.
    fn exposes_king(&self, piece: &Piece, to: Square, special: SpecialMove) -> bool {
        let mut scratch = self.board.clone();
        scratch.move_occupant(piece.square(), to);
        match special {
            SpecialMove::None => {}
            SpecialMove::EnPassant { captured } => {
                scratch.take(captured);
            }
            SpecialMove::Castle { rook_from, rook_to } => {
                scratch.move_occupant(rook_from, rook_to);
            }
        }

        let color = piece.color();
        let Some(king) = scratch.king_square(color) else {
            return false;
        };
        let exposed = scratch
            .pieces_of(color.opponent())
            .any(|enemy| attacks_of(&scratch, enemy).contains(king));
        exposed
    }

    fn context_for(&self, side: Color) -> Context {
        Context {
            ply: self.ply,
            enemy_attacks: self.attacked_squares(side.opponent()).union(),
        }
    }

    fn find(&self, piece: PieceId) -> RuleResult<&Piece> {
        self.board
            .find(piece)
            .ok_or(RuleError::NoSuchPiece { piece })
    }

    fn find_for(&self, side: Color, piece: PieceId) -> RuleResult<&Piece> {
        if piece.color() != side {
            return Err(RuleError::NoSuchPiece { piece });
        }
        self.find(piece)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "Ply {}, {} to move", self.ply, self.side_to_move())?;
        if self.is_in_check(self.side_to_move()) {
            write!(f, " (in check)")?;
        }
        Ok(())
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("ply", &self.ply)
            .field("retired", &self.retired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(label: &str) -> PieceId {
        label.parse().unwrap()
    }

    fn play(game: &mut GameSession, mv: &str) -> MoveRecord {
        game.play(mv.parse().unwrap(), PieceKind::Queen).unwrap()
    }

    #[test]
    fn test_move_request_parsing() {
        let request: MoveRequest = "BN2-f6".parse().unwrap();
        assert_eq!(request, MoveRequest::new(id("BN2"), Square::F6));
        assert!("WP5e4".parse::<MoveRequest>().is_err());
        assert!("WP5-e9".parse::<MoveRequest>().is_err());
        assert!("WP5-e8=z".parse::<MoveRequest>().is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = GameSession::new();
        assert_eq!(game.side_to_move(), Color::White);
        let err = game.play("BP5-e5".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::NotYourTurn { piece: id("BP5") });

        play(&mut game, "WP5-e4");
        assert_eq!(game.ply(), 1);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn test_check_order() {
        let mut game = GameSession::new();
        let before = game.clone();

        let err = game.play("WQ2-d4".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::NoSuchPiece { piece: id("WQ2") });

        let err = game.play("WN1-b3".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::InvalidDestination { piece: id("WN1"), to: Square::B3 });

        let err = game.play("WR1-a3".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert!(matches!(err, RuleError::Blocked { .. }));

        assert_eq!(game, before);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut game = GameSession::from_placement("4k3/4r3/8/8/8/8/4B3/4K3").unwrap();
        let err = game.play("WB1-d3".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::WouldExposeKing { piece: id("WB1"), to: Square::D3 });
        assert!(game.legal_destinations(id("WB1")).unwrap().is_empty());
    }

    #[test]
    fn test_king_cannot_take_defended_piece() {
        let game = GameSession::from_placement("4k3/8/8/8/8/8/3rr3/4K3").unwrap();
        let king = game.legal_destinations(id("WK1")).unwrap();
        // d2 is defended by the e2 rook and vice versa
        assert!(!king.contains(Square::D2));
        assert!(!king.contains(Square::E2));
        assert!(game.is_in_check(Color::White));
    }

    #[test]
    fn test_promotion_numbering_and_retirement() {
        let mut game = GameSession::from_placement("7k/P7/8/8/8/8/8/4K3").unwrap();
        let record = play(&mut game, "WP1-a8");
        assert_eq!(record.promoted_to, Some(id("WQ2")));
        assert_eq!(game.board().occupant_at(Square::A8).unwrap().id(), id("WQ2"));
        assert_eq!(game.retired().len(), 1);
        assert!(matches!(game.retired()[0].role(), Role::Pawn { promoted: true, .. }));
        assert!(game.attacked_squares(Color::White).get(id("WP1")).is_none());
        assert!(game.attacked_squares(Color::White).get(id("WQ2")).is_some());
    }

    #[test]
    fn test_illegal_promotion_choice_changes_nothing() {
        let mut game = GameSession::from_placement("7k/P7/8/8/8/8/8/4K3").unwrap();
        let before = game.clone();
        let err = game.play("WP1-a8".parse().unwrap(), PieceKind::King).unwrap_err();
        assert_eq!(err, RuleError::IllegalPromotionChoice { kind: PieceKind::King });
        assert_eq!(game, before);

        let err = game
            .play("WP1-a8=p".parse().unwrap(), PieceKind::Queen)
            .unwrap_err();
        assert_eq!(err, RuleError::IllegalPromotionChoice { kind: PieceKind::Pawn });
    }

    #[test]
    fn test_request_promotion_overrides_chooser() {
        let mut game = GameSession::from_placement("7k/P7/8/8/8/8/8/4K3").unwrap();
        let record = game
            .play("WP1-a8=n".parse().unwrap(), |_| PieceKind::Queen)
            .unwrap();
        assert_eq!(record.promoted_to, Some(id("WN3")));
    }

    #[test]
    fn test_promotion_suffix_needs_a_promotion() {
        let mut game = GameSession::new();
        let before = game.clone();

        let err = game.play("WN2-f3=k".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::IllegalPromotionChoice { kind: PieceKind::King });

        let err = game.play("WN2-f3=q".parse().unwrap(), PieceKind::Queen).unwrap_err();
        assert_eq!(err, RuleError::InvalidDestination { piece: id("WN2"), to: Square::F3 });
        assert_eq!(game, before);

        play(&mut game, "WN2-f3");
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn test_executor_marks_the_mover() {
        let mut game = GameSession::from_placement("4k3/8/8/8/8/8/4P3/R3K3").unwrap();
        play(&mut game, "WR1-a2");
        assert!(matches!(
            game.board().find(id("WR1")).unwrap().role(),
            Role::Rook { has_moved: true }
        ));
        play(&mut game, "BK-d8");
        play(&mut game, "WP1-e4");
        assert!(matches!(
            game.board().find(id("WP1")).unwrap().role(),
            Role::Pawn {
                has_moved: true,
                double_step: true,
                last_moved_ply: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn test_legal_moves_from_start() {
        let game = GameSession::new();
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn test_execute_move_reports_capture() {
        let mut game = GameSession::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let captured = game
            .execute_move(id("WP1"), Square::D5, SpecialMove::None, PieceKind::Queen)
            .unwrap();
        assert_eq!(captured, Some(id("BP1")));
        assert_eq!(game.ply(), 1);
        assert!(game.board().find(id("BP1")).is_none());
        assert!(game.attacked_squares(Color::Black).get(id("BP1")).is_none());
    }
}
