//! Renders chess positions described in [Forsyth-Edwards Notation] (FEN) onto
//! an 8x8 grid.
//!
//! [`chess::placement::parse_placement`] turns the Piece Placement field into a
//! [`chess::placement::BoardGrid`] and [`render::render`] hands its pieces to a
//! presentation [`render::Surface`], such as the HTML board with piece images.
//!
//! ```
//! use fen_board::chess::placement::parse_placement;
//! use fen_board::render::{render, HtmlBoard};
//!
//! let grid = parse_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
//! let mut board = HtmlBoard::new();
//! render(&grid, &mut board)?;
//! assert!(board.to_string().contains("images/white_king.png"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

pub mod chess;
pub mod render;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}
