//! Left/right mirror of a move sequence.
//!
//! Only `R` and `L` swap. Every other letter, including wide moves, slices
//! and rotations, maps to itself; this is not a geometric mirror of those
//! moves and consumers rely on the mapping as it is.

use super::moves::MoveToken;

/// Letter reflection table. Letters not listed are fixed points.
const MIRROR_TABLE: &[(char, char)] = &[('R', 'L'), ('L', 'R')];

fn mirror_letter(letter: char) -> char {
    MIRROR_TABLE
        .iter()
        .find(|(from, _)| *from == letter)
        .map_or(letter, |(_, to)| *to)
}

/// Mirrors a single token: letter through the table, direction reversed.
pub fn mirror_token(token: MoveToken) -> MoveToken {
    token.with(mirror_letter(token.letter()), token.suffix().reversed())
}

/// Mirrors a space-separated algorithm string.
///
/// Tokens that do not parse as moves are passed through unchanged, so the
/// token count and order always match the input.
pub fn mirror_algorithm(alg: &str) -> String {
    if alg.is_empty() {
        return String::new();
    }

    alg.split(' ')
        .map(|token| match MoveToken::parse(token) {
            Some(parsed) => mirror_token(parsed).to_string(),
            None => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_right_and_left_and_flips_direction() {
        assert_eq!(mirror_algorithm("R U R'"), "L' U' L");
        assert_eq!(mirror_algorithm("R U R' U'"), "L' U' L U");
    }

    #[test]
    fn mirroring_twice_is_identity() {
        for alg in ["R U R'", "R U R' U'", "F2 B2", "M' x y2 r"] {
            assert_eq!(mirror_algorithm(&mirror_algorithm(alg)), alg);
        }
    }

    #[test]
    fn suffix_law() {
        for letter in ["U", "D", "F", "B", "R", "L", "M", "x"] {
            assert!(mirror_algorithm(letter).ends_with('\''));
            let prime = format!("{letter}'");
            assert!(!mirror_algorithm(&prime).ends_with('\''));
            let double = format!("{letter}2");
            assert!(mirror_algorithm(&double).ends_with('2'));
        }
    }

    #[test]
    fn double_turns_keep_letters_fixed_except_r_l() {
        assert_eq!(mirror_algorithm("F2 B2"), "F2 B2");
        assert_eq!(mirror_algorithm("R2 L2"), "L2 R2");
    }

    #[test]
    fn slices_rotations_and_wide_moves_are_fixed_points() {
        assert_eq!(mirror_algorithm("M E S x y z r l"), "M' E' S' x' y' z' r' l'");
    }

    #[test]
    fn unparseable_tokens_pass_through() {
        assert_eq!(mirror_algorithm("R Rw U"), "L' Rw U'");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(mirror_algorithm(""), "");
    }
}
