//! Chess primitives and the square-centric board parsed from Forsyth-Edwards
//! Notation.

pub mod core;
pub mod placement;
