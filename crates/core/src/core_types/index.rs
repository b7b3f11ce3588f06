//! Integer cell indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Integer triple addressing a cell as `(i, j, k)` along width, breadth and height.
///
/// Indices are signed so that neighbour arithmetic near the lower faces of the
/// grid stays total. An index is not guaranteed to lie inside any particular
/// grid; check it with [`GridGeometry::is_valid_index`](crate::grid::GridGeometry::is_valid_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellIndex {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl CellIndex {
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        CellIndex { i, j, k }
    }

    /// Index moved by the given offset
    #[inline]
    pub const fn offset(self, di: i32, dj: i32, dk: i32) -> Self {
        CellIndex {
            i: self.i + di,
            j: self.j + dj,
            k: self.k + dk,
        }
    }

    /// Index moved by `by`, or `None` if any component overflows `i32`
    #[inline]
    pub fn checked_offset(self, by: CellIndex) -> Option<Self> {
        Some(CellIndex {
            i: self.i.checked_add(by.i)?,
            j: self.j.checked_add(by.j)?,
            k: self.k.checked_add(by.k)?,
        })
    }
}

impl Add for CellIndex {
    type Output = CellIndex;

    #[inline]
    fn add(self, rhs: CellIndex) -> CellIndex {
        self.offset(rhs.i, rhs.j, rhs.k)
    }
}

impl From<(i32, i32, i32)> for CellIndex {
    fn from((i, j, k): (i32, i32, i32)) -> Self {
        CellIndex::new(i, j, k)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.i, self.j, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_add_agree() {
        let base = CellIndex::new(2, 0, 5);
        assert_eq!(base.offset(-1, 1, 0), CellIndex::new(1, 1, 5));
        assert_eq!(base + CellIndex::new(-3, -1, 0), CellIndex::new(-1, -1, 5));
    }

    #[test]
    fn test_checked_offset_at_the_limits() {
        let far = CellIndex::new(i32::MAX, 0, i32::MIN);
        assert_eq!(far.checked_offset(CellIndex::new(1, 0, 0)), None);
        assert_eq!(far.checked_offset(CellIndex::new(0, 0, -1)), None);
        assert_eq!(
            far.checked_offset(CellIndex::new(-1, 1, 1)),
            Some(CellIndex::new(i32::MAX - 1, 1, i32::MIN + 1))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellIndex::from((1, -2, 3)).to_string(), "[1, -2, 3]");
    }
}
