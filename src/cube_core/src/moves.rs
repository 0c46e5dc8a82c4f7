use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::face::Face;

/// A quarter or half turn of one face. `turns` is the number of clockwise
/// quarter turns as seen from that face and is always 1, 2, or 3.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    face: Face,
    turns: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Empty move")]
    Empty,
    #[error("Unknown face letter `{0}`")]
    UnknownFace(char),
    #[error("Unknown move modifier in `{0}`")]
    UnknownModifier(String),
}

impl Move {
    /// All 18 moves, grouped by face in facelet-block order.
    pub const ALL: [Self; 18] = {
        let mut moves = [Move::clockwise(Face::U); 18];
        let mut i = 0;
        while i < 18 {
            moves[i] = Move {
                face: Face::ALL[i / 3],
                turns: (i % 3) as u8 + 1,
            };
            i += 1;
        }
        moves
    };

    pub const fn clockwise(face: Face) -> Self {
        Move { face, turns: 1 }
    }

    pub const fn half(face: Face) -> Self {
        Move { face, turns: 2 }
    }

    pub const fn counter_clockwise(face: Face) -> Self {
        Move { face, turns: 3 }
    }

    /// Builds the move of `face` turned `turns` clockwise quarter turns,
    /// reduced modulo 4. Returns `None` when the turns cancel out.
    pub const fn new(face: Face, turns: u8) -> Option<Self> {
        match turns % 4 {
            0 => None,
            turns => Some(Move { face, turns }),
        }
    }

    pub const fn face(self) -> Face {
        self.face
    }

    pub const fn turns(self) -> u8 {
        self.turns
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        Move {
            face: self.face,
            turns: 4 - self.turns,
        }
    }

    /// The same turn applied to a different face.
    #[must_use]
    pub const fn on(self, face: Face) -> Self {
        Move {
            face,
            turns: self.turns,
        }
    }

    /// Index of this move within [`Move::ALL`].
    pub const fn index(self) -> usize {
        self.face.index() * 3 + self.turns as usize - 1
    }

    /// Parses a move, falling back to the clockwise turn of the face when the
    /// modifier is not recognized. Returns `None` only when there is no valid
    /// face letter to fall back to.
    pub fn parse_lenient(token: &str) -> Option<Self> {
        match token.parse::<Move>() {
            Ok(mv) => Some(mv),
            Err(MoveParseError::UnknownModifier(_)) => {
                let face = Face::from_letter(token.chars().next()?)?;
                Some(Move::clockwise(face))
            }
            Err(_) => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turns {
            1 => write!(f, "{}", self.face),
            2 => write!(f, "{}2", self.face),
            _ => write!(f, "{}'", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let face = Face::from_letter(letter).ok_or(MoveParseError::UnknownFace(letter))?;

        match chars.as_str() {
            "" => Ok(Move::clockwise(face)),
            "2" => Ok(Move::half(face)),
            "'" => Ok(Move::counter_clockwise(face)),
            _ => Err(MoveParseError::UnknownModifier(s.to_owned())),
        }
    }
}

/// Parses whitespace separated move notation.
///
/// # Errors
///
/// Returns the first token that is not a well formed move.
pub fn parse_sequence(notation: &str) -> Result<Vec<Move>, MoveParseError> {
    notation.split_whitespace().map(str::parse).collect()
}

pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

pub(crate) const fn count_moves(notation: &str) -> usize {
    let bytes = notation.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if Face::from_letter(bytes[i] as char).is_some() {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Compile time counterpart of [`parse_sequence`] for fixed algorithms.
pub(crate) const fn parse_notation<const N: usize>(notation: &str) -> [Move; N] {
    let bytes = notation.as_bytes();
    let mut moves = [Move::clockwise(Face::U); N];
    let mut n = 0;
    let mut i = 0;
    while i < bytes.len() {
        let Some(face) = Face::from_letter(bytes[i] as char) else {
            assert!(bytes[i] == b' ', "unexpected character in notation");
            i += 1;
            continue;
        };
        let mut turns = 1;
        if i + 1 < bytes.len() {
            match bytes[i + 1] {
                b'2' => {
                    turns = 2;
                    i += 1;
                }
                b'\'' => {
                    turns = 3;
                    i += 1;
                }
                _ => {}
            }
        }
        moves[n] = Move { face, turns };
        n += 1;
        i += 1;
    }
    assert!(n == N, "move count mismatch");
    moves
}
