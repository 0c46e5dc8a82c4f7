//! Fixed edge and corner locations, and lookup of the piece currently sitting
//! in them by its colors.

use std::fmt;

use itertools::Itertools;

use crate::{
    face::{Color, Face},
    state::PuzzleState,
};

/// One facelet coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Sticker {
    pub face: Face,
    pub row: usize,
    pub col: usize,
}

impl Sticker {
    pub const fn new(face: Face, row: usize, col: usize) -> Sticker {
        Sticker { face, row, col }
    }

    pub const fn index(self) -> usize {
        self.face.offset() + self.row * 3 + self.col
    }

    pub fn color(self, state: &PuzzleState) -> Color {
        state.facelet(self.face, self.row, self.col)
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.face, self.row, self.col)
    }
}

const fn s(face: Face, row: usize, col: usize) -> Sticker {
    Sticker::new(face, row, col)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EdgeSlot(pub [Sticker; 2]);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CornerSlot(pub [Sticker; 3]);

pub const EDGE_SLOTS: [EdgeSlot; 12] = {
    use Face::*;
    [
        EdgeSlot([s(U, 0, 1), s(B, 0, 1)]),
        EdgeSlot([s(U, 1, 0), s(L, 0, 1)]),
        EdgeSlot([s(U, 1, 2), s(R, 0, 1)]),
        EdgeSlot([s(U, 2, 1), s(F, 0, 1)]),
        EdgeSlot([s(D, 0, 1), s(F, 2, 1)]),
        EdgeSlot([s(D, 1, 0), s(L, 2, 1)]),
        EdgeSlot([s(D, 1, 2), s(R, 2, 1)]),
        EdgeSlot([s(D, 2, 1), s(B, 2, 1)]),
        EdgeSlot([s(F, 1, 0), s(L, 1, 2)]),
        EdgeSlot([s(F, 1, 2), s(R, 1, 0)]),
        EdgeSlot([s(B, 1, 0), s(R, 1, 2)]),
        EdgeSlot([s(B, 1, 2), s(L, 1, 0)]),
    ]
};

pub const CORNER_SLOTS: [CornerSlot; 8] = {
    use Face::*;
    [
        CornerSlot([s(U, 0, 0), s(L, 0, 0), s(B, 0, 2)]),
        CornerSlot([s(U, 0, 2), s(B, 0, 0), s(R, 0, 2)]),
        CornerSlot([s(U, 2, 0), s(F, 0, 0), s(L, 0, 2)]),
        CornerSlot([s(U, 2, 2), s(R, 0, 0), s(F, 0, 2)]),
        CornerSlot([s(D, 0, 0), s(L, 2, 2), s(F, 2, 0)]),
        CornerSlot([s(D, 0, 2), s(F, 2, 2), s(R, 2, 0)]),
        CornerSlot([s(D, 2, 0), s(B, 2, 2), s(L, 2, 0)]),
        CornerSlot([s(D, 2, 2), s(R, 2, 2), s(B, 2, 0)]),
    ]
};

/// A piece identified by the colors it carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Piece {
    Edge([Color; 2]),
    Corner([Color; 3]),
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Edge(colors) => write!(f, "{} edge", colors.iter().join("-")),
            Piece::Corner(colors) => write!(f, "{} corner", colors.iter().join("-")),
        }
    }
}

impl EdgeSlot {
    pub fn stickers(&self) -> &[Sticker; 2] {
        &self.0
    }

    pub fn touches(&self, face: Face) -> bool {
        self.0.iter().any(|sticker| sticker.face == face)
    }

    pub fn sticker_on(&self, face: Face) -> Option<Sticker> {
        self.0.iter().copied().find(|sticker| sticker.face == face)
    }

    /// The sticker of this slot that currently shows `color`.
    pub fn sticker_showing(&self, state: &PuzzleState, color: Color) -> Option<Sticker> {
        self.0
            .iter()
            .copied()
            .find(|sticker| sticker.color(state) == color)
    }

    /// The other sticker of the slot.
    pub fn other(&self, sticker: Sticker) -> Sticker {
        if self.0[0] == sticker {
            self.0[1]
        } else {
            self.0[0]
        }
    }

    /// For a middle-layer slot, the face whose right-hand neighbor is the
    /// slot's other face.
    pub fn left_face(&self) -> Face {
        let [a, b] = self.0.map(|sticker| sticker.face);
        if a.right() == b { a } else { b }
    }

    fn colors(&self, state: &PuzzleState) -> [Color; 2] {
        self.0.map(|sticker| sticker.color(state))
    }
}

impl CornerSlot {
    pub fn stickers(&self) -> &[Sticker; 3] {
        &self.0
    }

    pub fn touches(&self, face: Face) -> bool {
        self.0.iter().any(|sticker| sticker.face == face)
    }

    /// For a top or bottom slot, the side face whose right-hand neighbor is
    /// the slot's other side face.
    pub fn left_side(&self) -> Option<Face> {
        self.0
            .iter()
            .map(|sticker| sticker.face)
            .find(|&face| face.is_side() && self.touches(face.right()))
    }

    /// Whether this slot sits between exactly these three faces.
    pub fn is_between(&self, faces: [Face; 3]) -> bool {
        faces.iter().all(|&face| self.touches(face))
    }

    pub fn sticker_showing(&self, state: &PuzzleState, color: Color) -> Option<Sticker> {
        self.0
            .iter()
            .copied()
            .find(|sticker| sticker.color(state) == color)
    }

    fn colors(&self, state: &PuzzleState) -> [Color; 3] {
        self.0.map(|sticker| sticker.color(state))
    }
}

fn same_colors<const N: usize>(mut a: [Color; N], mut b: [Color; N]) -> bool {
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Finds the edge slot holding the piece with these two colors, in any
/// orientation.
pub fn locate_edge(state: &PuzzleState, colors: [Color; 2]) -> Option<EdgeSlot> {
    EDGE_SLOTS
        .iter()
        .copied()
        .find(|slot| same_colors(slot.colors(state), colors))
}

/// Finds the corner slot holding the piece with these three colors, in any
/// orientation.
pub fn locate_corner(state: &PuzzleState, colors: [Color; 3]) -> Option<CornerSlot> {
    CORNER_SLOTS
        .iter()
        .copied()
        .find(|slot| same_colors(slot.colors(state), colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn slots_cover_every_non_center_facelet_once() {
        let indices = EDGE_SLOTS
            .iter()
            .flat_map(|slot| slot.stickers().map(Sticker::index))
            .chain(
                CORNER_SLOTS
                    .iter()
                    .flat_map(|slot| slot.stickers().map(Sticker::index)),
            )
            .sorted()
            .collect_vec();
        let expected = (0..54).filter(|i| i % 9 != 4).collect_vec();
        assert_eq!(indices, expected);
    }

    #[test]
    fn solved_pieces_are_home() {
        let state = PuzzleState::new();
        let slot = locate_edge(&state, [Color::Yellow, Color::Green]).unwrap();
        assert_eq!(slot, EDGE_SLOTS[4]);
        let slot = locate_corner(&state, [Color::Red, Color::Yellow, Color::Green]).unwrap();
        assert_eq!(slot, CORNER_SLOTS[5]);
        assert!(locate_edge(&state, [Color::White, Color::Yellow]).is_none());
    }

    fn repainted(stickers: &[(Sticker, Color)]) -> PuzzleState {
        let mut facelets = *PuzzleState::new().facelets();
        for &(sticker, color) in stickers {
            facelets[sticker.index()] = color;
        }
        PuzzleState::from_facelets(facelets)
    }

    #[test]
    fn first_matching_slot_wins() {
        // The back-bottom edge and corner now carry green where blue was.
        let state = repainted(&[
            (Sticker::new(Face::B, 2, 1), Color::Green),
            (Sticker::new(Face::B, 2, 0), Color::Green),
        ]);
        assert!(same_colors(
            EDGE_SLOTS[7].colors(&state),
            EDGE_SLOTS[4].colors(&state)
        ));
        assert!(same_colors(
            CORNER_SLOTS[7].colors(&state),
            CORNER_SLOTS[5].colors(&state)
        ));

        assert_eq!(
            locate_edge(&state, [Color::Green, Color::Yellow]),
            Some(EDGE_SLOTS[4])
        );
        assert_eq!(
            locate_corner(&state, [Color::Green, Color::Red, Color::Yellow]),
            Some(CORNER_SLOTS[5])
        );
    }

    #[test]
    fn missing_corner_is_not_found() {
        let state = repainted(&[(Sticker::new(Face::F, 2, 2), Color::White)]);
        assert_eq!(
            locate_corner(&state, [Color::Red, Color::Yellow, Color::Green]),
            None
        );
        assert!(locate_corner(&state, [Color::Red, Color::Yellow, Color::Blue]).is_some());
    }

    #[test]
    fn pieces_stay_in_slots_under_every_move() {
        for mv in Move::ALL {
            let mut state = PuzzleState::new();
            state.apply(mv);
            for slot in EDGE_SLOTS {
                let colors = slot.colors(&state);
                assert_ne!(colors[0], colors[1], "{mv} broke {slot:?}");
                assert!(locate_edge(&PuzzleState::new(), colors).is_some());
            }
            for slot in CORNER_SLOTS {
                assert!(locate_corner(&PuzzleState::new(), slot.colors(&state)).is_some());
            }
        }
    }

    #[test]
    fn middle_slot_left_face() {
        assert_eq!(EDGE_SLOTS[8].left_face(), Face::L);
        assert_eq!(EDGE_SLOTS[9].left_face(), Face::F);
        assert_eq!(EDGE_SLOTS[10].left_face(), Face::R);
        assert_eq!(EDGE_SLOTS[11].left_face(), Face::B);
    }

    #[test]
    fn corner_left_side() {
        assert_eq!(CORNER_SLOTS[5].left_side(), Some(Face::F));
        assert_eq!(CORNER_SLOTS[0].left_side(), Some(Face::B));
        assert_eq!(CORNER_SLOTS[4].left_side(), Some(Face::L));
    }

    #[test]
    fn piece_display() {
        let piece = Piece::Edge([Color::Yellow, Color::Green]);
        assert_eq!(piece.to_string(), "yellow-green edge");
    }
}
