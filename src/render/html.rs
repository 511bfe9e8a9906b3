//! HTML rendering of the board: the checkered grid of `<div>` cells with piece
//! images inside occupied ones.

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::core::BOARD_WIDTH;
use crate::chess::placement::is_light_square;
use crate::render::{Placement, Surface};

/// Placeholder background of the light squares.
pub const LIGHT_SQUARE_COLOR: &str = "wheat";
/// Placeholder background of the dark squares.
pub const DARK_SQUARE_COLOR: &str = "darkblue";
/// Directory with `{color}_{kind}.png` piece images.
pub const DEFAULT_ASSET_DIR: &str = "images";

/// HTML fragment of the chess board: one `rank` container per row, each with
/// 8 checkered `board-square` cells. Occupied cells hold a `chess-piece`
/// image.
///
/// ```
/// use fen_board::render::{HtmlBoard, Placement, Surface};
/// use fen_board::chess::core::Piece;
///
/// let mut board = HtmlBoard::new();
/// board
///     .place(Placement {
///         rank: 0,
///         file: 4,
///         piece: Piece::from_symbol('k').unwrap(),
///     })
///     .unwrap();
/// assert!(board
///     .to_string()
///     .contains(r#"<img class="chess-piece" src="images/black_king.png">"#));
/// ```
#[derive(Clone, Debug)]
pub struct HtmlBoard {
    // Either empty or ends with exactly one '/'.
    asset_prefix: String,
    // Asset names of the pieces, rank-major.
    cells: [[Option<String>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl HtmlBoard {
    /// Creates an empty board loading piece images from
    /// [`DEFAULT_ASSET_DIR`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_asset_dir(DEFAULT_ASSET_DIR)
    }

    /// Creates an empty board loading piece images from `asset_dir`. Repeated
    /// trailing slashes are collapsed into one, the root directory "/" stays
    /// absolute and an empty directory means paths relative to the page.
    #[must_use]
    pub fn with_asset_dir(asset_dir: &str) -> Self {
        let asset_prefix = if asset_dir.is_empty() {
            String::new()
        } else {
            format!("{}/", asset_dir.trim_end_matches('/'))
        };
        Self {
            asset_prefix,
            cells: Default::default(),
        }
    }

    fn image_source(&self, asset: &str) -> String {
        escape_attribute(&format!("{}{asset}.png", self.asset_prefix))
    }
}

/// Makes the value safe to put inside a double-quoted attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for symbol in value.chars() {
        match symbol {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(symbol),
        }
    }
    escaped
}

impl Default for HtmlBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for HtmlBoard {
    fn place(&mut self, placement: Placement) -> anyhow::Result<()> {
        let cell = self
            .cells
            .get_mut(placement.rank as usize)
            .and_then(|rank| rank.get_mut(placement.file as usize))
            .with_context(|| format!("{placement} is outside of the board"))?;
        if let Some(existing) = cell {
            bail!("can not place {placement}: the square already holds {existing}");
        }
        *cell = Some(placement.asset());
        Ok(())
    }
}

impl fmt::Display for HtmlBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<div id="chess-board">"#)?;
        for (rank, cells) in (0..BOARD_WIDTH).zip(self.cells.iter()) {
            writeln!(f, r#"  <div class="rank">"#)?;
            for (file, cell) in (0..BOARD_WIDTH).zip(cells.iter()) {
                let background = if is_light_square(rank, file) {
                    LIGHT_SQUARE_COLOR
                } else {
                    DARK_SQUARE_COLOR
                };
                write!(
                    f,
                    r#"    <div class="board-square" style="background-color: {background};">"#
                )?;
                if let Some(asset) = cell {
                    write!(
                        f,
                        r#"<img class="chess-piece" src="{}">"#,
                        self.image_source(asset)
                    )?;
                }
                writeln!(f, "</div>")?;
            }
            writeln!(f, "  </div>")?;
        }
        write!(f, "</div>")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Piece;
    use crate::chess::placement::{parse_placement, BoardGrid};
    use crate::render::render;

    fn placement(rank: u8, file: u8, symbol: char) -> Placement {
        Placement {
            rank,
            file,
            piece: Piece::from_symbol(symbol).unwrap(),
        }
    }

    #[test]
    fn layout() {
        let html = HtmlBoard::new().to_string();
        assert_eq!(html.matches(r#"<div class="rank">"#).count(), 8);
        assert_eq!(html.matches(r#"<div class="board-square""#).count(), 64);
        assert_eq!(html.matches(LIGHT_SQUARE_COLOR).count(), 32);
        assert_eq!(html.matches(DARK_SQUARE_COLOR).count(), 32);
        assert!(!html.contains("<img"));
        assert!(html.starts_with(r#"<div id="chess-board">"#));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn checkered_corners() {
        let html = HtmlBoard::new().to_string();
        let squares: Vec<&str> = html
            .lines()
            .filter(|line| line.contains("board-square"))
            .collect();
        assert_eq!(squares.len(), 64);
        assert!(squares[0].contains(LIGHT_SQUARE_COLOR));
        assert!(squares[1].contains(DARK_SQUARE_COLOR));
        assert!(squares[8].contains(DARK_SQUARE_COLOR));
        assert!(squares[63].contains(LIGHT_SQUARE_COLOR));
    }

    #[test]
    fn piece_images() {
        let mut board = HtmlBoard::with_asset_dir("static/pieces/");
        render(&parse_placement("8/8/8/8/8/8/8/R6k").unwrap(), &mut board).unwrap();
        let html = board.to_string();
        let pieces: Vec<&str> = html
            .lines()
            .filter(|line| line.contains("<img"))
            .collect();
        assert_eq!(
            pieces,
            vec![
                r#"    <div class="board-square" style="background-color: darkblue;"><img class="chess-piece" src="static/pieces/white_rook.png"></div>"#,
                r#"    <div class="board-square" style="background-color: wheat;"><img class="chess-piece" src="static/pieces/black_king.png"></div>"#,
            ]
        );
    }

    #[test]
    fn starting_position_images() {
        let mut board = HtmlBoard::default();
        render(&BoardGrid::starting(), &mut board).unwrap();
        let html = board.to_string();
        assert_eq!(html.matches(r#"class="chess-piece""#).count(), 32);
        assert_eq!(html.matches("images/white_pawn.png").count(), 8);
        assert_eq!(html.matches("images/black_pawn.png").count(), 8);
        assert_eq!(html.matches("images/white_king.png").count(), 1);
        assert_eq!(html.matches("images/black_queen.png").count(), 1);
    }

    #[test]
    fn empty_asset_dir() {
        let mut board = HtmlBoard::with_asset_dir("");
        board.place(placement(0, 0, 'Q')).unwrap();
        assert!(board.to_string().contains(r#"src="white_queen.png""#));
    }

    #[test]
    fn root_asset_dir() {
        for asset_dir in ["/", "//"] {
            let mut board = HtmlBoard::with_asset_dir(asset_dir);
            board.place(placement(0, 0, 'Q')).unwrap();
            assert!(
                board.to_string().contains(r#"src="/white_queen.png""#),
                "{asset_dir}"
            );
        }
    }

    #[test]
    fn escaped_asset_dir() {
        let mut board = HtmlBoard::with_asset_dir(r#"x"><script>&'"#);
        board.place(placement(0, 0, 'k')).unwrap();
        let html = board.to_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            r#"<img class="chess-piece" src="x&quot;&gt;&lt;script&gt;&amp;&#39;/black_king.png">"#
        ));
    }

    #[test]
    fn shades_match_squares() {
        let html = HtmlBoard::new().to_string();
        let squares = html.lines().filter(|line| line.contains("board-square"));
        for (square, line) in BoardGrid::empty().squares().zip(squares) {
            let expected = if square.is_light() {
                LIGHT_SQUARE_COLOR
            } else {
                DARK_SQUARE_COLOR
            };
            assert!(line.contains(expected), "{}", square.name());
        }
    }

    #[test]
    fn rejected_placements() {
        let mut board = HtmlBoard::new();
        board.place(placement(2, 2, 'B')).unwrap();
        assert_eq!(
            board.place(placement(2, 2, 'b')).unwrap_err().to_string(),
            "can not place black_bishop at (2, 2): the square already holds white_bishop"
        );
        assert_eq!(
            board.place(placement(8, 0, 'p')).unwrap_err().to_string(),
            "black_pawn at (8, 0) is outside of the board"
        );
        assert!(board.place(placement(0, 8, 'p')).is_err());
    }
}
