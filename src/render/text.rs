//! Plain text rendering of the board, the same diagram the grid prints with
//! `{:?}`.

use std::fmt;

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::core::{Piece, BOARD_WIDTH};
use crate::render::{Placement, Surface};

const EMPTY_SQUARE: char = '.';
const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

/// Plain diagram of the board a-la Stockfish "d" command: FEN symbol for a
/// piece, '.' for an empty square.
#[derive(Clone, Debug, Default)]
pub struct TextBoard {
    cells: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl TextBoard {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TextBoard {
    fn place(&mut self, placement: Placement) -> anyhow::Result<()> {
        let cell = self
            .cells
            .get_mut(placement.rank as usize)
            .and_then(|rank| rank.get_mut(placement.file as usize))
            .with_context(|| format!("{placement} is outside of the board"))?;
        if let Some(existing) = cell {
            bail!(
                "can not place {placement}: the square already holds {}",
                existing.asset_name()
            );
        }
        *cell = Some(placement.piece);
        Ok(())
    }
}

impl fmt::Display for TextBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.cells
                .iter()
                .map(|rank| rank
                    .iter()
                    .map(|cell| cell.map_or(EMPTY_SQUARE, Piece::symbol))
                    .join(SQUARE_SEPARATOR))
                .join(LINE_SEPARATOR)
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::placement::{parse_placement, BoardGrid};
    use crate::render::render;

    #[test]
    fn starting_position() {
        let mut board = TextBoard::new();
        render(&BoardGrid::starting(), &mut board).unwrap();
        assert_eq!(
            board.to_string(),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
    }

    #[test]
    fn matches_grid_dump() {
        let grid = parse_placement("r1b1qrk1/ppp2pbp/n2p1np1/4p1B1/2PPP3/2NB1N1P/PP3PP1/R2QK2R")
            .unwrap();
        let mut board = TextBoard::new();
        render(&grid, &mut board).unwrap();
        // Debug output of the grid is the same diagram followed by FEN.
        assert_eq!(
            format!("{grid:?}"),
            format!("{board}\nFEN: {grid}")
        );
    }

    #[test]
    fn rejected_placements() {
        let mut board = TextBoard::new();
        let king = Placement {
            rank: 0,
            file: 0,
            piece: Piece::from_symbol('K').unwrap(),
        };
        board.place(king).unwrap();
        assert_eq!(
            board.place(king).unwrap_err().to_string(),
            "can not place white_king at (0, 0): the square already holds white_king"
        );
        assert!(board.place(Placement { rank: 9, ..king }).is_err());
    }
}
