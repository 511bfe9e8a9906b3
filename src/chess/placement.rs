//! Provides [`BoardGrid`]: the square-centric representation of the [Piece
//! Placement] field of [Forsyth-Edwards Notation] (FEN), the parser producing
//! it and the serializer writing it back.
//!
//! The grid is rank-major and follows the order in which FEN lists the ranks:
//! rank 0 is the first rank in the string (the 8th rank in chess notation,
//! i.e. the top row of a board drawn from White's perspective), file 0 is the
//! a-file.
//!
//! [Piece Placement]: https://www.chessprogramming.org/Forsyth-Edwards_Notation#Piece_Placement
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt::{self, Write};
use std::str::FromStr;

use itertools::Itertools;

use crate::chess::core::{Color, Piece, PieceKind, BOARD_WIDTH};

/// Placement field of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Full FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const RANK_SEPARATOR: char = '/';
const FIELD_SEPARATOR: char = ' ';

const BACK_RANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The placement field does not describe exactly 8 ranks of exactly 8 squares.
///
/// Positions are byte offsets into the parsed string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedFen {
    /// Symbol outside of "PNBRQKpnbrqk", digits 1-8, rank separator and space.
    #[error("incorrect FEN: unexpected symbol '{symbol}' at position {position}")]
    UnexpectedSymbol {
        #[allow(missing_docs)]
        symbol: char,
        #[allow(missing_docs)]
        position: usize,
    },
    /// A piece or an empty run would not fit into the rank.
    #[error(
        "incorrect FEN: rank {rank} exceeds 8 files with '{symbol}' at position {position}"
    )]
    RankOverflow {
        #[allow(missing_docs)]
        rank: u8,
        #[allow(missing_docs)]
        symbol: char,
        #[allow(missing_docs)]
        position: usize,
    },
    /// The rank ended before all of its squares were described.
    #[error(
        "incorrect FEN: rank size should be exactly 8, rank {rank} has {files} files (ends at \
         position {position})"
    )]
    IncompleteRank {
        #[allow(missing_docs)]
        rank: u8,
        #[allow(missing_docs)]
        files: u8,
        #[allow(missing_docs)]
        position: usize,
    },
    /// More rank separators than a board has room for.
    #[error("incorrect FEN: expected 8 ranks, got more at position {position}")]
    TooManyRanks {
        #[allow(missing_docs)]
        position: usize,
    },
    /// The placement ended before all ranks were described.
    #[error("incorrect FEN: expected 8 ranks, got {ranks}")]
    TooFewRanks {
        #[allow(missing_docs)]
        ranks: u8,
    },
}

/// Squares are checkered starting with a light one in the top-left corner
/// (a8).
#[must_use]
pub const fn is_light_square(rank: u8, file: u8) -> bool {
    (rank + file) % 2 == 0
}

/// One cell of the [`BoardGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
    piece: Option<Piece>,
}

impl Square {
    const fn new(rank: u8, file: u8) -> Self {
        Self {
            rank,
            file,
            piece: None,
        }
    }

    /// Row index: 0 is the first rank listed in FEN (the top row).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Column index: 0 is the a-file.
    #[must_use]
    pub const fn file(&self) -> u8 {
        self.file
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// See [`is_light_square`].
    #[must_use]
    pub const fn is_light(&self) -> bool {
        is_light_square(self.rank, self.file)
    }

    /// Algebraic name of the square.
    ///
    /// ```
    /// use fen_board::chess::placement::BoardGrid;
    ///
    /// let grid = BoardGrid::empty();
    /// assert_eq!(grid.square(0, 0).unwrap().name(), "a8");
    /// assert_eq!(grid.square(7, 4).unwrap().name(), "e1");
    /// ```
    #[must_use]
    pub fn name(&self) -> String {
        format!(
            "{}{}",
            char::from(b'a' + self.file),
            BOARD_WIDTH - self.rank
        )
    }
}

/// Position of the parser within the placement field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    rank: u8,
    file: u8,
}

impl Cursor {
    const START: Self = Self { rank: 0, file: 0 };

    /// Consumes a single symbol of the placement field and returns the next
    /// cursor together with the piece to put on the current square, if any.
    fn advance(self, position: usize, symbol: char) -> Result<(Self, Option<Piece>), MalformedFen> {
        let overflow = MalformedFen::RankOverflow {
            rank: self.rank,
            symbol,
            position,
        };
        match symbol {
            RANK_SEPARATOR => {
                self.expect_complete_rank(position)?;
                if self.rank + 1 == BOARD_WIDTH {
                    return Err(MalformedFen::TooManyRanks { position });
                }
                Ok((
                    Self {
                        rank: self.rank + 1,
                        file: 0,
                    },
                    None,
                ))
            },
            // "9" is never a valid run but it's treated as one to report the
            // overflow instead of an unknown symbol.
            '1'..='9' => {
                let run = match symbol.to_digit(10).map(u8::try_from) {
                    Some(Ok(run)) if self.file + run <= BOARD_WIDTH => run,
                    _ => return Err(overflow),
                };
                Ok((
                    Self {
                        file: self.file + run,
                        ..self
                    },
                    None,
                ))
            },
            _ => match Piece::from_symbol(symbol) {
                Some(_) if self.file == BOARD_WIDTH => Err(overflow),
                Some(piece) => Ok((
                    Self {
                        file: self.file + 1,
                        ..self
                    },
                    Some(piece),
                )),
                None => Err(MalformedFen::UnexpectedSymbol { symbol, position }),
            },
        }
    }

    const fn expect_complete_rank(self, position: usize) -> Result<(), MalformedFen> {
        if self.file != BOARD_WIDTH {
            return Err(MalformedFen::IncompleteRank {
                rank: self.rank,
                files: self.file,
                position,
            });
        }
        Ok(())
    }

    /// Checks that the cursor stopped right after the last square of the
    /// board.
    fn finish(self, position: usize) -> Result<(), MalformedFen> {
        self.expect_complete_rank(position)?;
        if self.rank + 1 != BOARD_WIDTH {
            return Err(MalformedFen::TooFewRanks {
                ranks: self.rank + 1,
            });
        }
        Ok(())
    }
}

/// Square-centric board: 8 ranks of 8 [`Square`]s, each optionally holding a
/// [`Piece`]. Always complete, the parser never produces partial grids.
///
/// [`BoardGrid::try_from()`] is a convenient interface for creating a grid
/// from untrusted input: it trims whitespace and an optional "fen " prefix
/// before calling [`parse_placement`].
///
/// ```
/// use fen_board::chess::placement::BoardGrid;
///
/// let grid = BoardGrid::try_from("  fen 8/8/8/3k4/8/8/8/4K3 w - - 0 1\n").unwrap();
/// assert_eq!(grid.occupied().count(), 2);
/// assert_eq!(grid.to_string(), "8/8/8/3k4/8/8/8/4K3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardGrid {
    ranks: [[Square; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl BoardGrid {
    /// Creates a grid without any pieces.
    #[must_use]
    pub fn empty() -> Self {
        let mut ranks = [[Square::new(0, 0); BOARD_WIDTH as usize]; BOARD_WIDTH as usize];
        for (rank, row) in (0..BOARD_WIDTH).zip(ranks.iter_mut()) {
            for (file, square) in (0..BOARD_WIDTH).zip(row.iter_mut()) {
                *square = Square::new(rank, file);
            }
        }
        Self { ranks }
    }

    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use fen_board::chess::placement::{BoardGrid, STARTING_PLACEMENT};
    ///
    /// assert_eq!(BoardGrid::starting().to_string(), STARTING_PLACEMENT);
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut grid = Self::empty();
        for (file, kind) in (0..BOARD_WIDTH).zip(BACK_RANK) {
            grid.put(0, file, Piece::new(Color::Black, kind));
            grid.put(1, file, Piece::new(Color::Black, PieceKind::Pawn));
            grid.put(6, file, Piece::new(Color::White, PieceKind::Pawn));
            grid.put(7, file, Piece::new(Color::White, kind));
        }
        grid
    }

    fn put(&mut self, rank: u8, file: u8, piece: Piece) {
        self.ranks[rank as usize][file as usize].piece = Some(piece);
    }

    /// Returns the square at given coordinates or [`None`] if they are
    /// outside the board.
    #[must_use]
    pub fn square(&self, rank: u8, file: u8) -> Option<&Square> {
        self.ranks
            .get(rank as usize)
            .and_then(|row| row.get(file as usize))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn piece_at(&self, rank: u8, file: u8) -> Option<Piece> {
        self.square(rank, file).and_then(Square::piece)
    }

    /// Iterates over ranks in FEN order (top to bottom).
    pub fn ranks(&self) -> impl Iterator<Item = &[Square; BOARD_WIDTH as usize]> {
        self.ranks.iter()
    }

    /// Iterates over all 64 squares, rank-major.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.ranks.iter().flatten()
    }

    /// Iterates over squares holding a piece, rank-major.
    pub fn occupied(&self) -> impl Iterator<Item = &Square> {
        self.squares().filter(|square| !square.is_empty())
    }
}

/// Parses the Piece Placement field of FEN. Accepts a full FEN as well:
/// everything starting from the first space is ignored.
///
/// NOTE: This expects properly-formatted inputs: no leading whitespace or
/// prefixes. Use [`BoardGrid::try_from`] for cleaning up the input if it is
/// coming from untrusted source.
///
/// # Errors
///
/// Returns [`MalformedFen`] if the placement has a symbol outside of
/// "PNBRQKpnbrqk12345678/", if a rank does not describe exactly 8 squares or if
/// there are not exactly 8 ranks.
///
/// ```
/// use fen_board::chess::placement::{parse_placement, MalformedFen};
///
/// let grid = parse_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
///     .unwrap();
/// assert_eq!(grid.occupied().count(), 32);
/// assert_eq!(
///     parse_placement("8/8/8/8/8/8/8"),
///     Err(MalformedFen::TooFewRanks { ranks: 7 })
/// );
/// ```
pub fn parse_placement(fen: &str) -> Result<BoardGrid, MalformedFen> {
    let placement = fen
        .split_once(FIELD_SEPARATOR)
        .map_or(fen, |(placement, _)| placement);
    let mut grid = BoardGrid::empty();
    let cursor =
        placement
            .char_indices()
            .try_fold(Cursor::START, |cursor, (position, symbol)| {
                let (next, piece) = cursor.advance(position, symbol)?;
                if let Some(piece) = piece {
                    grid.put(cursor.rank, cursor.file, piece);
                }
                Ok::<Cursor, MalformedFen>(next)
            })?;
    cursor.finish(placement.len())?;
    Ok(grid)
}

impl FromStr for BoardGrid {
    type Err = MalformedFen;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        parse_placement(fen)
    }
}

impl TryFrom<&str> for BoardGrid {
    type Error = MalformedFen;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        let input = input.trim();
        parse_placement(input.strip_prefix("fen ").unwrap_or(input).trim_start())
    }
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for BoardGrid {
    /// Prints the grid as FEN Piece Placement: consecutive empty squares are
    /// collapsed into a single digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rank) in self.ranks().enumerate() {
            if index != 0 {
                f.write_char(RANK_SEPARATOR)?;
            }
            for (run, piece) in rank.iter().map(Square::piece).dedup_with_count() {
                match piece {
                    Some(piece) => {
                        for _ in 0..run {
                            write!(f, "{piece}")?;
                        }
                    },
                    None => write!(f, "{run}")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for BoardGrid {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.ranks()
                .map(|rank| {
                    rank.iter()
                        .map(|square| square.piece().map_or('.', Piece::symbol))
                        .join(" ")
                })
                .join("\n")
        )?;
        write!(f, "FEN: {self}")
    }
}
