use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::moves::MoveParseError;

/// One of the six outer faces. The discriminant is the face's block index in
/// the facelet array.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

/// A facelet color. Each color is the solved color of the face with the same
/// discriminant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, L, R, F, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The four faces around the equator, each followed by its right-hand
    /// neighbor when viewed with U on top.
    pub const SIDES: [Self; 4] = [Face::F, Face::R, Face::B, Face::L];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Index of this face's first facelet.
    pub const fn offset(self) -> usize {
        self as usize * 9
    }

    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// The side face to the right of this one, looking at it with U on top.
    /// U and D map to themselves.
    pub const fn right(self) -> Self {
        match self {
            Face::F => Face::R,
            Face::R => Face::B,
            Face::B => Face::L,
            Face::L => Face::F,
            Face::U | Face::D => self,
        }
    }

    /// The side face to the left of this one. U and D map to themselves.
    pub const fn left(self) -> Self {
        match self {
            Face::F => Face::L,
            Face::L => Face::B,
            Face::B => Face::R,
            Face::R => Face::F,
            Face::U | Face::D => self,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    pub const fn is_side(self) -> bool {
        !matches!(self, Face::U | Face::D)
    }

    /// The color this face shows when the cube is solved.
    pub const fn solved_color(self) -> Color {
        Color::ALL[self as usize]
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(MoveParseError::Empty),
            (Some(letter), None) => {
                Face::from_letter(letter).ok_or(MoveParseError::UnknownFace(letter))
            }
            (Some(_), Some(_)) => Err(MoveParseError::UnknownModifier(s.to_owned())),
        }
    }
}

impl Color {
    pub const ALL: [Self; 6] = {
        use Color::*;
        [White, Yellow, Orange, Red, Green, Blue]
    };

    /// Single-letter abbreviation used by the text net.
    pub const fn initial(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    /// The face whose solved color this is.
    pub const fn home(self) -> Face {
        Face::ALL[self as usize]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_go_around_the_equator() {
        for face in Face::SIDES {
            assert_eq!(face.right().left(), face);
            assert_eq!(face.right().right(), face.opposite());
            assert!(face.right().is_side());
        }
        assert_eq!(Face::U.right(), Face::U);
    }

    #[test]
    fn colors_and_faces_pair_up() {
        for face in Face::ALL {
            assert_eq!(face.solved_color().home(), face);
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
    }

    #[test]
    fn parse_face() {
        assert_eq!("R".parse::<Face>(), Ok(Face::R));
        assert_eq!("".parse::<Face>(), Err(MoveParseError::Empty));
        assert_eq!("X".parse::<Face>(), Err(MoveParseError::UnknownFace('X')));
    }
}
