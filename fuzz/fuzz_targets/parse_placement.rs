#![no_main]
use fen_board::chess::placement::parse_placement;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(grid) = parse_placement(s) {
            // Parsed grids are always complete and survive serialization.
            assert_eq!(grid.squares().count(), 64);
            assert_eq!(parse_placement(&grid.to_string()), Ok(grid));
        }
    }
});
