//! PDN-like square and move notation used for logging self-play games.
//!
//! This is not a PDN file reader - parsing a full `.pdn` game record is out of scope - just the
//! square naming (`a1`..`h8`) and move formatting (`from-to` for a plain move, `from:to:...` for
//! a compound capture) used to write a human-readable move log.

use crate::bitboard;

/// Format a square index as algebraic notation, e.g. index 0 -> `"h8"`.
///
/// Follows the mapping `col = 'a' + (7 - file)`, `row = '1' + (7 - rank)`: the index-packing
/// scheme in [`bitboard`] counts files/ranks from the a1 corner, but this notation's column and
/// row letters count from the opposite corner, h8.
pub fn format_square(index: u32) -> String {
    let (file, rank) = bitboard::index_to_coords(index);
    let col = (b'a' + (7 - file) as u8) as char;
    let row = (b'1' + (7 - rank) as u8) as char;
    format!("{col}{row}")
}

/// Parse algebraic notation (e.g. `"d4"`) back into a square index. Returns `None` for anything
/// that isn't a two-character file/rank pair on a dark square.
pub fn parse_square(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let col = chars.next()?;
    let row = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if !('a'..='h').contains(&col) || !('1'..='8').contains(&row) {
        return None;
    }

    let file = 7 - (col as i32 - 'a' as i32);
    let rank = 7 - (row as i32 - '1' as i32);
    if bitboard::is_white_square(file, rank) {
        return None;
    }

    Some(bitboard::coords_to_index(file, rank))
}

/// Format a plain move as `"from-to"`.
pub fn format_move(from: u32, to: u32) -> String {
    format!("{}-{}", format_square(from), format_square(to))
}

/// Format a compound capture as `"from:x1:x2:...:xn"`, `landings` being the ordered sequence of
/// squares landed on after each jump.
pub fn format_capture(from: u32, landings: &[u32]) -> String {
    let mut s = format_square(from);
    for &landing in landings {
        s.push(':');
        s.push_str(&format_square(landing));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_parse_round_trip_every_dark_square() {
        for index in 0..32 {
            let text = format_square(index);
            assert_eq!(parse_square(&text), Some(index));
        }
    }

    #[test]
    fn parse_rejects_light_squares_and_garbage() {
        assert_eq!(parse_square("a2"), None); // a2 is a light square
        assert_eq!(parse_square("z9"), None);
        assert_eq!(parse_square("a"), None);
        assert_eq!(parse_square("a11"), None);
    }

    #[test]
    fn index_zero_is_h8() {
        assert_eq!(format_square(0), "h8");
    }

    #[test]
    fn move_and_capture_formatting() {
        assert_eq!(format_move(0, 4), "h8-g7");
        assert_eq!(format_capture(0, &[9, 18]), "h8:f6:d4");
    }
}
