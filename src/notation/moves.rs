//! Move tokens and algorithms in standard cube notation.
//!
//! A token is one letter from the face/slice/rotation alphabet followed by an
//! optional `'` or `2`. Letters are matched case-insensitively and keep the
//! case they were written in, so wide moves (`r`) survive as written.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Grammar of a single legal token.
static MOVE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([UDLRFBMESXYZudlrfbmesxyz])(['2]?)$").expect("move token regex is valid")
});

/// Turn direction suffix of a move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suffix {
    /// No suffix, a quarter turn clockwise.
    #[default]
    Clockwise,
    /// `'`, a quarter turn counter-clockwise.
    CounterClockwise,
    /// `2`, a half turn.
    Double,
}

impl Suffix {
    /// Returns the notation text of the suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Suffix::Clockwise => "",
            Suffix::CounterClockwise => "'",
            Suffix::Double => "2",
        }
    }

    /// Parses a suffix from its notation text.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Suffix::Clockwise),
            "'" => Some(Suffix::CounterClockwise),
            "2" => Some(Suffix::Double),
            _ => None,
        }
    }

    /// Reverses the turn direction. Half turns are their own reverse.
    pub fn reversed(self) -> Self {
        match self {
            Suffix::Clockwise => Suffix::CounterClockwise,
            Suffix::CounterClockwise => Suffix::Clockwise,
            Suffix::Double => Suffix::Double,
        }
    }
}

/// A single notation unit: face/axis letter plus suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveToken {
    letter: char,
    suffix: Suffix,
}

impl MoveToken {
    /// Parses a token, returning None when it does not match the grammar.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = MOVE_TOKEN.captures(s)?;
        let letter = caps.get(1)?.as_str().chars().next()?;
        let suffix = Suffix::parse(caps.get(2).map_or("", |m| m.as_str()))?;
        Some(Self { letter, suffix })
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    /// Returns a copy of this token with different parts.
    pub fn with(self, letter: char, suffix: Suffix) -> Self {
        Self { letter, suffix }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.suffix.as_str())
    }
}

impl FromStr for MoveToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a legal move: {:?}", s))
    }
}

/// An ordered sequence of move tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Algorithm {
    moves: Vec<MoveToken>,
}

impl Algorithm {
    /// Builds an algorithm from one line of text, silently dropping tokens
    /// that are not legal moves.
    ///
    /// The line is split on single spaces, so runs of spaces produce empty
    /// candidates that are dropped like any other invalid token.
    pub fn from_line(line: &str) -> Self {
        let moves = line
            .trim()
            .split(' ')
            .filter_map(MoveToken::parse)
            .collect();
        Self { moves }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_prime_and_double() {
        let r = MoveToken::parse("R").unwrap();
        assert_eq!(r.letter(), 'R');
        assert_eq!(r.suffix(), Suffix::Clockwise);

        let u = MoveToken::parse("U'").unwrap();
        assert_eq!(u.suffix(), Suffix::CounterClockwise);

        let f = MoveToken::parse("F2").unwrap();
        assert_eq!(f.suffix(), Suffix::Double);
    }

    #[test]
    fn parse_accepts_wide_slice_and_rotation_letters() {
        for token in ["r", "u2", "M", "E'", "S2", "x", "y'", "z2", "X", "m"] {
            assert!(MoveToken::parse(token).is_some(), "{token} should be legal");
        }
    }

    #[test]
    fn parse_rejects_illegal_tokens() {
        for token in ["", "Q", "R3", "R2'", "RU", "2", "'", "R ", "Rw"] {
            assert!(MoveToken::parse(token).is_none(), "{token:?} should be rejected");
        }
    }

    #[test]
    fn token_display_round_trips_text() {
        assert_eq!(MoveToken::parse("b'").unwrap().to_string(), "b'");
        assert_eq!("x2".parse::<MoveToken>().unwrap().to_string(), "x2");
        assert!("Q".parse::<MoveToken>().is_err());
    }

    #[test]
    fn suffix_reversal() {
        assert_eq!(Suffix::Clockwise.reversed(), Suffix::CounterClockwise);
        assert_eq!(Suffix::CounterClockwise.reversed(), Suffix::Clockwise);
        assert_eq!(Suffix::Double.reversed(), Suffix::Double);
    }

    #[test]
    fn algorithm_from_line_drops_invalid_tokens() {
        let alg = Algorithm::from_line("  R U2 Q F'  ");
        assert_eq!(alg.to_string(), "R U2 F'");
    }

    #[test]
    fn algorithm_from_line_collapses_double_spaces() {
        assert_eq!(Algorithm::from_line("R  U").to_string(), "R U");
    }

    #[test]
    fn empty_algorithm_displays_empty() {
        assert!(Algorithm::from_line("Q W").is_empty());
        assert_eq!(Algorithm::default().to_string(), "");
    }
}
