//! Neighbour offset tables.

use crate::core_types::CellIndex;

/// The six axis-aligned unit offsets, in `+x, -x, +y, -y, +z, -z` order
pub const FACE_OFFSETS: [CellIndex; 6] = [
    CellIndex::new(1, 0, 0),
    CellIndex::new(-1, 0, 0),
    CellIndex::new(0, 1, 0),
    CellIndex::new(0, -1, 0),
    CellIndex::new(0, 0, 1),
    CellIndex::new(0, 0, -1),
];

/// All 26 non-zero offsets with components in `{-1, 0, 1}` (faces, edges and corners).
///
/// Ordered with the first component varying slowest, skipping `(0, 0, 0)`.
pub const ALL_OFFSETS: [CellIndex; 26] = all_offsets();

const fn all_offsets() -> [CellIndex; 26] {
    let mut offsets = [CellIndex::new(0, 0, 0); 26];
    let mut n = 0;
    let mut code = 0;
    while code < 27 {
        let di = code / 9 - 1;
        let dj = (code / 3) % 3 - 1;
        let dk = code % 3 - 1;
        if di != 0 || dj != 0 || dk != 0 {
            offsets[n] = CellIndex::new(di, dj, dk);
            n += 1;
        }
        code += 1;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_face_offsets_are_unit_steps() {
        for offset in FACE_OFFSETS {
            let manhattan = offset.i.abs() + offset.j.abs() + offset.k.abs();
            assert_eq!(manhattan, 1, "{offset} is not a face offset");
        }
        let unique: HashSet<_> = FACE_OFFSETS.into_iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_all_offsets_cover_cube_shell() {
        let unique: HashSet<_> = ALL_OFFSETS.into_iter().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&CellIndex::new(0, 0, 0)));
        for offset in FACE_OFFSETS {
            assert!(unique.contains(&offset));
        }
        assert_eq!(ALL_OFFSETS[0], CellIndex::new(-1, -1, -1));
        assert_eq!(ALL_OFFSETS[25], CellIndex::new(1, 1, 1));
    }
}
