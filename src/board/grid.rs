/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index, str::FromStr};

use anyhow::{bail, Result};

use super::{Color, File, Piece, PieceId, PieceKind, Rank, Square};

/// Placement field of the standard starting position.
pub const STARTPOS_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Back rank layout shared by both sides, from file `a` to file `h`, with
/// the number each piece starts with.
const BACK_RANK: [(PieceKind, u8); File::COUNT] = [
    (PieceKind::Rook, 1),
    (PieceKind::Knight, 1),
    (PieceKind::Bishop, 1),
    (PieceKind::Queen, 1),
    (PieceKind::King, 1),
    (PieceKind::Bishop, 2),
    (PieceKind::Knight, 2),
    (PieceKind::Rook, 2),
];

/// The 8x8 grid of cells, each holding at most one [`Piece`].
///
/// This layer stores pieces and nothing else. It performs no rule checks:
/// every mutation here is trusted to come from validated code.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// An empty board.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            cells: [None; Square::COUNT],
        }
    }

    /// The standard starting array, with every piece unmoved.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let board = Board::standard();
    /// assert_eq!(board.occupant_at(Square::E1).unwrap().id().to_string(), "WK1");
    /// assert_eq!(board.occupant_at(Square::G8).unwrap().id().to_string(), "BN2");
    /// assert_eq!(board.occupant_at(Square::D7).unwrap().id().to_string(), "BP4");
    /// assert_eq!(board.pieces().count(), 32);
    /// ```
    pub fn standard() -> Self {
        let mut board = Self::new();

        for color in Color::all() {
            for (file, (kind, num)) in File::iter().zip(BACK_RANK) {
                let back = Square::new(file, Rank::first(color));
                board.place(back, Some(Piece::new(color, kind, num, back)));

                let pawn = Square::new(file, Rank::second(color));
                let num = file.index() as u8 + 1;
                board.place(pawn, Some(Piece::new(color, PieceKind::Pawn, num, pawn)));
            }
        }

        board
    }

    /// Builds a [`Board`] from the placement field of a FEN string.
    ///
    /// Numbers are handed out per side and kind in ascending square order,
    /// starting at 1. Kings and rooks count as unmoved only on their home
    /// squares, and pawns only on their starting rank.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").unwrap();
    /// assert_eq!(board.occupant_at(Square::A1).unwrap().id().to_string(), "WR1");
    /// assert_eq!(board.occupant_at(Square::H1).unwrap().id().to_string(), "WR2");
    /// assert!(!board.occupant_at(Square::E8).unwrap().has_moved());
    /// ```
    pub fn from_placement(placement: &str) -> Result<Self> {
        // Tolerate a full FEN string by ignoring everything after the placements
        let placement = placement.split_whitespace().next().unwrap_or_default();

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != Rank::COUNT {
            bail!(
                "FEN must have piece placements for all 8 ranks. Got {} in {placement:?}",
                rows.len()
            );
        }

        let mut kinds: [Option<(Color, PieceKind)>; Square::COUNT] = [None; Square::COUNT];

        // Rows are listed from the 8th rank down to the 1st
        for (row, rank) in rows.iter().zip(Rank::iter().rev()) {
            let mut files = 0;
            for c in row.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        bail!("FEN placements must use digits between [1, 8]. Got {c:?}");
                    }
                    files += empty as usize;
                    continue;
                }

                let kind = PieceKind::from_char(c)?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let Some(file) = File::iter().nth(files) else {
                    bail!("FEN rank {rank} has more than 8 files: {row:?}");
                };
                kinds[Square::new(file, rank)] = Some((color, kind));
                files += 1;
            }

            if files != File::COUNT {
                bail!("FEN rank {rank} must span exactly 8 files. Got {files} in {row:?}");
            }
        }

        Ok(Self::number_pieces(&kinds))
    }

    /// Turns a grid of bare kinds into pieces, assigning numbers in ascending square order.
    fn number_pieces(kinds: &[Option<(Color, PieceKind)>; Square::COUNT]) -> Self {
        let mut board = Self::new();
        let mut issued = [[0u8; PieceKind::COUNT]; Color::COUNT];

        for square in Square::iter() {
            let Some((color, kind)) = kinds[square] else {
                continue;
            };
            let num = &mut issued[color.index()][kind.index()];
            *num += 1;

            let piece = Piece::new(color, kind, *num, square);
            let piece = if starts_unmoved(color, kind, square) {
                piece
            } else {
                piece.moved()
            };
            board.place(square, Some(piece));
        }

        board
    }

    /// The placement field of a FEN string describing this board.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, STARTPOS_PLACEMENT};
    /// assert_eq!(Board::standard().placement(), STARTPOS_PLACEMENT);
    /// ```
    pub fn placement(&self) -> String {
        let mut placement = String::with_capacity(64);

        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.occupant_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank != Rank::ONE {
                placement.push('/');
            }
        }

        placement
    }

    /// The piece standing on `square`, if any.
    #[inline(always)]
    pub fn occupant_at(&self, square: Square) -> Option<&Piece> {
        self.cells[square].as_ref()
    }

    #[inline(always)]
    pub fn occupant_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.cells[square].as_mut()
    }

    #[inline(always)]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square].is_none()
    }

    /// Overwrites `square` with `occupant`, updating the piece's own square to match.
    #[inline(always)]
    pub fn place(&mut self, square: Square, occupant: Option<Piece>) {
        self.cells[square] = occupant.map(|mut piece| {
            piece.set_square(square);
            piece
        });
    }

    /// Empties `square`, returning whatever stood there.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square].take()
    }

    /// Moves the occupant of `from` onto `to` and empties `from`.
    ///
    /// Returns whatever previously stood on `to`: the captured piece, if any.
    pub fn move_occupant(&mut self, from: Square, to: Square) -> Option<Piece> {
        debug_assert_ne!(from, to, "Cannot move a piece onto its own square");
        let mover = self.take(from);
        let captured = self.take(to);
        self.place(to, mover);
        captured
    }

    /// Looks up a piece in play by its identity.
    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|piece| piece.id() == id)
    }

    pub fn find_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.cells.iter_mut().flatten().find(|piece| piece.id() == id)
    }

    /// All pieces on the board, in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// All pieces of one side, in ascending square order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color() == color)
    }

    /// Where `color`'s king stands, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|piece| piece.kind() == PieceKind::King)
            .map(Piece::square)
    }
}

/// Whether a piece found on `square` in a FEN placement still has its first-move privileges.
fn starts_unmoved(color: Color, kind: PieceKind, square: Square) -> bool {
    let home_rank = Rank::first(color);
    match kind {
        PieceKind::Pawn => square.rank() == Rank::second(color),
        PieceKind::Rook => {
            square == Square::new(File::A, home_rank) || square == Square::new(File::H, home_rank)
        }
        PieceKind::King => square == Square::new(File::E, home_rank),
        _ => true,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_placement(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let occupant = self
                    .occupant_at(Square::new(file, rank))
                    .map_or('.', Piece::char);
                write!(f, " {occupant}")?;
            }
            writeln!(f)?;
        }
        write!(f, " +{}\n  ", "--".repeat(File::COUNT))?;
        for file in File::iter() {
            write!(f, " {file}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_matches_startpos_placement() {
        let parsed = Board::from_placement(STARTPOS_PLACEMENT).unwrap();
        assert_eq!(parsed, Board::standard());
    }

    #[test]
    fn test_standard_ids() {
        let board = Board::standard();
        let id = |s: &str| s.parse::<PieceId>().unwrap();
        assert_eq!(board.find(id("WR1")).unwrap().square(), Square::A1);
        assert_eq!(board.find(id("WR2")).unwrap().square(), Square::H1);
        assert_eq!(board.find(id("WB1")).unwrap().square(), Square::C1);
        assert_eq!(board.find(id("BB2")).unwrap().square(), Square::F8);
        assert_eq!(board.find(id("WP5")).unwrap().square(), Square::E2);
        assert_eq!(board.find(id("BQ1")).unwrap().square(), Square::D8);
        assert!(board.find(id("WQ2")).is_none());
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn test_square_field_tracks_cell() {
        let mut board = Board::standard();
        let captured = board.move_occupant(Square::D1, Square::D7);
        assert_eq!(captured.unwrap().id().to_string(), "BP4");
        assert!(board.is_empty(Square::D1));

        let queen = board.occupant_at(Square::D7).unwrap();
        assert_eq!(queen.square(), Square::D7);
        for square in Square::iter() {
            if let Some(piece) = board.occupant_at(square) {
                assert_eq!(piece.square(), square);
            }
        }
    }

    #[test]
    fn test_placement_moved_flags() {
        let board = Board::from_placement("4k3/3p4/8/8/4P3/8/8/1R2K3").unwrap();
        assert!(board.occupant_at(Square::B1).unwrap().has_moved());
        assert!(!board.occupant_at(Square::E1).unwrap().has_moved());
        assert!(board.occupant_at(Square::E4).unwrap().has_moved());
        assert!(!board.occupant_at(Square::D7).unwrap().has_moved());
    }

    #[test]
    fn test_bad_placements() {
        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("x7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn test_placement_round_trip_of_kiwipete() {
        let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
        assert_eq!(Board::from_placement(kiwipete).unwrap().placement(), kiwipete);
    }

    #[test]
    fn test_display() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
        let shown = board.to_string();
        assert!(shown.starts_with("8| . . . . k . . .\n"));
        assert!(shown.contains("1| . . . . K . . .\n"));
        assert!(shown.ends_with("a b c d e f g h"));
    }
}
