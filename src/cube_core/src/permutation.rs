use std::fmt;

use itertools::Itertools;

use crate::state::FACELET_COUNT;

/// A rearrangement of the 54 facelet positions.
///
/// Stored as a gather table: applying the permutation to an array `old`
/// produces `new[i] = old[mapping[i]]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permutation {
    mapping: [u8; FACELET_COUNT],
}

impl Permutation {
    pub const IDENTITY: Self = {
        let mut mapping = [0; FACELET_COUNT];
        let mut i = 0;
        while i < FACELET_COUNT {
            mapping[i] = i as u8;
            i += 1;
        }
        Permutation { mapping }
    };

    /// Builds a permutation from cycles listed in the direction the stickers
    /// travel: the sticker at `cycle[0]` moves to `cycle[1]` and so on, the
    /// last one wrapping around to `cycle[0]`.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of range or appears in more than one cycle.
    pub fn from_cycles<C: AsRef<[usize]>>(cycles: &[C]) -> Permutation {
        let mut mapping = Self::IDENTITY.mapping;
        let mut seen = [false; FACELET_COUNT];

        for cycle in cycles {
            let cycle = cycle.as_ref();
            for (&from, &to) in cycle.iter().circular_tuple_windows() {
                assert!(!seen[to], "position {to} is in more than one cycle");
                seen[to] = true;
                mapping[to] = from as u8;
            }
        }

        Permutation { mapping }
    }

    pub fn mapping(&self) -> &[u8; FACELET_COUNT] {
        &self.mapping
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rearranges `values` according to this permutation.
    pub fn apply<T: Copy>(&self, values: &[T; FACELET_COUNT]) -> [T; FACELET_COUNT] {
        std::array::from_fn(|i| values[usize::from(self.mapping[i])])
    }

    /// The permutation equivalent to applying `self` and then `other`.
    #[must_use]
    pub fn then(&self, other: &Permutation) -> Permutation {
        Permutation {
            mapping: other.apply(&self.mapping),
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Permutation {
        let mut mapping = [0; FACELET_COUNT];
        for (i, &from) in self.mapping.iter().enumerate() {
            mapping[usize::from(from)] = i as u8;
        }
        Permutation { mapping }
    }

    #[must_use]
    pub fn pow(&self, exponent: usize) -> Permutation {
        (0..exponent).fold(Self::IDENTITY, |acc, _| acc.then(self))
    }

    /// Every non-trivial cycle, listed in the direction the stickers travel.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let destination = self.inverse();
        let mut covered = [false; FACELET_COUNT];
        let mut cycles = vec![];

        for start in 0..FACELET_COUNT {
            if covered[start] {
                continue;
            }
            covered[start] = true;

            let mut cycle = vec![start];
            let mut next = usize::from(destination.mapping[start]);
            while next != start {
                covered[next] = true;
                cycle.push(next);
                next = usize::from(destination.mapping[next]);
            }

            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }

        cycles
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return f.write_str("()");
        }
        for cycle in cycles {
            write!(f, "({})", cycle.iter().join(" "))?;
        }
        Ok(())
    }
}
