/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::Square;

/// The side a piece belongs to.
///
/// White moves first, so [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub const COUNT: usize = 2;

    /// Both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The rank direction this side's pawns advance in: `1` for White, `-1` for Black.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Parses the first letter of a piece label, in either case.
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color:?}"),
        }
    }

    /// The uppercase letter used in piece labels.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::Black.name(), "black");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    /// Accepts `w`, `b`, `white` or `black`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Invalid Color string: Expected one of w, b, white, black. Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The six kinds of chess piece, without a [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const COUNT: usize = 6;

    /// All six kinds, in the order `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a kind letter (`P N B R Q K`), in either case.
    ///
    /// # Example
    /// ```
    /// # use gambit::PieceKind;
    /// assert_eq!(PieceKind::from_char('q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// The uppercase letter for this kind.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Returns `true` if a pawn may be replaced by this kind on promotion.
    ///
    /// # Example
    /// ```
    /// # use gambit::PieceKind;
    /// assert!(PieceKind::Knight.is_promotion_target());
    /// assert!(!PieceKind::King.is_promotion_target());
    /// assert!(!PieceKind::Pawn.is_promotion_target());
    /// ```
    #[inline(always)]
    pub const fn is_promotion_target(&self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Accepts a kind letter or a full name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Some(kind) = Self::all().into_iter().find(|k| k.name() == lower) {
            return Ok(kind);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Invalid PieceKind string: Got {s:?}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The identity of a piece: its side, its kind and a number unique among
/// that side's pieces of that kind.
///
/// A [`PieceId`] is written as a label such as `WP5` (white's fifth pawn) or
/// `BN2`. Parsing ignores case, and a king's number may be left out, so `wk`
/// names `WK1`.
///
/// # Example
/// ```
/// # use gambit::{Color, PieceId, PieceKind};
/// let id: PieceId = "bn2".parse().unwrap();
/// assert_eq!(id, PieceId::new(Color::Black, PieceKind::Knight, 2));
/// assert_eq!(id.to_string(), "BN2");
/// assert_eq!("WK".parse::<PieceId>().unwrap().to_string(), "WK1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    color: Color,
    kind: PieceKind,
    num: u8,
}

impl PieceId {
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind, num: u8) -> Self {
        Self { color, kind, num }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn num(&self) -> u8 {
        self.num
    }
}

impl FromStr for PieceId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(color), Some(kind)) = (chars.next(), chars.next()) else {
            bail!("Invalid piece label: Expected something like WP5. Got {s:?}");
        };
        let color = Color::from_char(color)?;
        let kind = PieceKind::from_char(kind)?;

        let digits = chars.as_str();
        let num = if digits.is_empty() && kind == PieceKind::King {
            1
        } else {
            digits
                .parse::<u8>()
                .ok()
                .filter(|&n| n > 0)
                .context(format!("Invalid piece label: Bad number in {s:?}"))?
        };

        Ok(Self::new(color, kind, num))
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.color.char(), self.kind.char(), self.num)
    }
}

impl fmt::Debug for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Kind-specific state of a piece.
///
/// Only pawns, rooks and kings carry state: whether they have moved (which
/// gates the double step and castling), and for pawns what the en passant
/// and promotion rules need to know.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Pawn {
        has_moved: bool,
        /// The ply count right after this pawn's latest move.
        last_moved_ply: Option<usize>,
        /// Whether this pawn's latest move was its two-square advance.
        double_step: bool,
        promoted: bool,
    },
    Knight,
    Bishop,
    Rook {
        has_moved: bool,
    },
    Queen,
    King {
        has_moved: bool,
    },
}

impl Role {
    /// The state of a piece of `kind` that has not moved yet.
    pub const fn unmoved(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Self::Pawn {
                has_moved: false,
                last_moved_ply: None,
                double_step: false,
                promoted: false,
            },
            PieceKind::Knight => Self::Knight,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Rook => Self::Rook { has_moved: false },
            PieceKind::Queen => Self::Queen,
            PieceKind::King => Self::King { has_moved: false },
        }
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::Pawn { .. } => PieceKind::Pawn,
            Self::Knight => PieceKind::Knight,
            Self::Bishop => PieceKind::Bishop,
            Self::Rook { .. } => PieceKind::Rook,
            Self::Queen => PieceKind::Queen,
            Self::King { .. } => PieceKind::King,
        }
    }
}

/// A piece in play.
///
/// The `square` field always mirrors the board cell the piece occupies; only
/// [`Board::place`](super::Board::place) changes it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    num: u8,
    square: Square,
    role: Role,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub const fn new(color: Color, kind: PieceKind, num: u8, square: Square) -> Self {
        Self {
            color,
            num,
            square,
            role: Role::unmoved(kind),
        }
    }

    /// Returns this piece with its `has_moved` flag set, if its kind tracks one.
    pub fn moved(mut self) -> Self {
        match &mut self.role {
            Role::Pawn { has_moved, .. }
            | Role::Rook { has_moved }
            | Role::King { has_moved } => *has_moved = true,
            _ => {}
        }
        self
    }

    #[inline(always)]
    pub const fn id(&self) -> PieceId {
        PieceId::new(self.color, self.kind(), self.num)
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.role.kind()
    }

    #[inline(always)]
    pub const fn num(&self) -> u8 {
        self.num
    }

    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline(always)]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    #[inline(always)]
    pub fn role_mut(&mut self) -> &mut Role {
        &mut self.role
    }

    /// Whether this piece has ever moved. Kinds without the flag report `false`.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        match self.role {
            Role::Pawn { has_moved, .. } | Role::Rook { has_moved } | Role::King { has_moved } => {
                has_moved
            }
            _ => false,
        }
    }

    #[inline(always)]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// FEN-style letter: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind().char(),
            Color::Black => self.kind().char().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} {:?}", self.id(), self.square, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing_is_case_insensitive() {
        let upper: PieceId = "WP5".parse().unwrap();
        let lower: PieceId = "wp5".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.kind(), PieceKind::Pawn);
        assert_eq!(upper.num(), 5);
    }

    #[test]
    fn test_bad_labels() {
        assert!("".parse::<PieceId>().is_err());
        assert!("W".parse::<PieceId>().is_err());
        assert!("XP1".parse::<PieceId>().is_err());
        assert!("WP".parse::<PieceId>().is_err());
        assert!("WP0".parse::<PieceId>().is_err());
        assert!("WQx".parse::<PieceId>().is_err());
    }

    #[test]
    fn test_roles_start_unmoved() {
        let rook = Piece::new(Color::White, PieceKind::Rook, 1, Square::A1);
        assert!(!rook.has_moved());
        assert!(rook.moved().has_moved());

        let knight = Piece::new(Color::Black, PieceKind::Knight, 2, Square::G8).moved();
        assert!(!knight.has_moved());
        assert_eq!(knight.char(), 'n');
        assert_eq!(knight.id().to_string(), "BN2");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("queen".parse::<PieceKind>().unwrap(), PieceKind::Queen);
        assert_eq!("N".parse::<PieceKind>().unwrap(), PieceKind::Knight);
        assert!("dragon".parse::<PieceKind>().is_err());
        assert_eq!("BLACK".parse::<Color>().unwrap(), Color::Black);
    }
}
