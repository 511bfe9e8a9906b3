//! Presentation of a [`BoardGrid`]: every occupied square is turned into a
//! [`Placement`] instruction and sent to a [`Surface`] which knows how to
//! display it.
//!
//! The surfaces provided here are [`HtmlBoard`] (the checkered grid of `<div>`
//! cells with piece images) and [`TextBoard`] (a plain diagram).

use std::fmt;

use tracing::{debug, trace};

use crate::chess::core::{Color, Piece, PieceKind};
use crate::chess::placement::BoardGrid;

mod html;
mod text;

pub use html::{HtmlBoard, DARK_SQUARE_COLOR, DEFAULT_ASSET_DIR, LIGHT_SQUARE_COLOR};
pub use text::TextBoard;

/// Instruction for the presentation layer: show `piece` at (`rank`, `file`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    #[allow(missing_docs)]
    pub rank: u8,
    #[allow(missing_docs)]
    pub file: u8,
    #[allow(missing_docs)]
    pub piece: Piece,
}

impl Placement {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    /// Identifier of the image to show, see [`Piece::asset_name`].
    #[must_use]
    pub fn asset(&self) -> String {
        self.piece.asset_name()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.asset(), self.rank, self.file)
    }
}

/// Display surface receiving placement instructions.
pub trait Surface {
    /// Shows the piece at the given square.
    ///
    /// # Errors
    ///
    /// Implementations reject placements outside of the board or on a square
    /// that already holds a piece.
    fn place(&mut self, placement: Placement) -> anyhow::Result<()>;
}

/// Produces placement instructions for all occupied squares of the grid in
/// rank-major order.
pub fn placements(grid: &BoardGrid) -> impl Iterator<Item = Placement> + '_ {
    grid.occupied().filter_map(|square| {
        square.piece().map(|piece| Placement {
            rank: square.rank(),
            file: square.file(),
            piece,
        })
    })
}

/// Sends every piece of the grid to the surface.
///
/// # Errors
///
/// Propagates the first error reported by [`Surface::place`].
///
/// ```
/// use fen_board::chess::placement::BoardGrid;
/// use fen_board::render::{render, TextBoard};
///
/// let mut board = TextBoard::new();
/// render(&BoardGrid::starting(), &mut board).unwrap();
/// assert!(board.to_string().starts_with("r n b q k b n r"));
/// ```
pub fn render<S: Surface>(grid: &BoardGrid, surface: &mut S) -> anyhow::Result<()> {
    let mut pieces = 0;
    for placement in placements(grid) {
        trace!(%placement, "placing piece");
        surface.place(placement)?;
        pieces += 1;
    }
    debug!(pieces, placement = %grid, "rendered board");
    Ok(())
}

#[cfg(test)]
mod test {
    use anyhow::bail;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::placement::{parse_placement, STARTING_FEN};

    #[derive(Default)]
    struct Recorder {
        placements: Vec<Placement>,
    }

    impl Surface for Recorder {
        fn place(&mut self, placement: Placement) -> anyhow::Result<()> {
            self.placements.push(placement);
            Ok(())
        }
    }

    struct Broken;

    impl Surface for Broken {
        fn place(&mut self, placement: Placement) -> anyhow::Result<()> {
            bail!("can not show {placement}")
        }
    }

    #[test]
    fn only_occupied_squares() {
        let grid = parse_placement("8/8/8/3k4/8/8/8/4K3").unwrap();
        let mut recorder = Recorder::default();
        render(&grid, &mut recorder).unwrap();
        assert_eq!(
            recorder.placements,
            vec![
                Placement {
                    rank: 3,
                    file: 3,
                    piece: Piece::new(Color::Black, PieceKind::King),
                },
                Placement {
                    rank: 7,
                    file: 4,
                    piece: Piece::new(Color::White, PieceKind::King),
                },
            ]
        );
        assert_eq!(recorder.placements[0].asset(), "black_king");
        assert!(recorder
            .placements
            .iter()
            .all(|placement| placement.kind() == PieceKind::King));
        assert_eq!(recorder.placements[1].to_string(), "white_king at (7, 4)");
    }

    #[test]
    fn starting_position_order() {
        let grid = parse_placement(STARTING_FEN).unwrap();
        let mut recorder = Recorder::default();
        render(&grid, &mut recorder).unwrap();
        assert_eq!(recorder.placements.len(), 32);
        assert_eq!(
            recorder
                .placements
                .iter()
                .take(8)
                .map(Placement::asset)
                .collect::<Vec<_>>(),
            vec![
                "black_rook",
                "black_knight",
                "black_bishop",
                "black_queen",
                "black_king",
                "black_bishop",
                "black_knight",
                "black_rook",
            ]
        );
        assert!(recorder.placements[16..]
            .iter()
            .all(|placement| placement.color() == Color::White));
    }

    #[test]
    fn empty_board() {
        let mut recorder = Recorder::default();
        render(&BoardGrid::empty(), &mut recorder).unwrap();
        assert!(recorder.placements.is_empty());
        // Nothing is placed, so the broken surface is never called.
        assert!(render(&BoardGrid::empty(), &mut Broken).is_ok());
    }

    #[test]
    fn surface_errors() {
        let error = render(&BoardGrid::starting(), &mut Broken).unwrap_err();
        assert_eq!(error.to_string(), "can not show black_rook at (0, 0)");
    }
}
