//! Path decomposition: splits a bitmap into closed pixel-boundary loops.
//!
//! Corners live on the integer lattice `0..=width × 0..=height`. Each loop
//! keeps foreground on its right-hand side (Y down), so outer boundaries and
//! holes both have positive shoelace area.

use crate::preprocess::BinaryMask;
use crate::vectorize::PathKind;

/// A traced loop before smoothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPath {
    /// Turn corners, in walk order
    pub corners: Vec<(i64, i64)>,
    /// Enclosed pixel count
    pub area: u64,
    /// Outer boundary or hole, from the original bitmap
    pub kind: PathKind,
}

/// Working copy of the bitmap; interiors are inverted as loops are found.
struct WorkBitmap {
    width: i64,
    height: i64,
    bits: Vec<bool>,
}

impl WorkBitmap {
    fn from_mask(mask: &BinaryMask) -> Self {
        Self {
            width: i64::from(mask.width()),
            height: i64::from(mask.height()),
            bits: mask.cells().to_vec(),
        }
    }

    #[inline]
    fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Inverts `row` from column `x` to the right edge.
    fn flip_row_from(&mut self, x: i64, row: i64) {
        if row < 0 || row >= self.height {
            return;
        }
        let start = (row * self.width + x.max(0)) as usize;
        let end = ((row + 1) * self.width) as usize;
        for bit in &mut self.bits[start..end] {
            *bit = !*bit;
        }
    }

    /// Next set pixel at or after linear index `from`.
    fn next_set(&self, from: usize) -> Option<usize> {
        self.bits[from..].iter().position(|&b| b).map(|i| i + from)
    }
}

/// Pixel touching `corner` in quadrant `q` (each component ±1).
#[inline]
fn pixel_at(corner: (i64, i64), q: (i64, i64)) -> (i64, i64) {
    (
        if q.0 > 0 { corner.0 } else { corner.0 - 1 },
        if q.1 > 0 { corner.1 } else { corner.1 - 1 },
    )
}

#[inline]
fn right_of(d: (i64, i64)) -> (i64, i64) {
    (-d.1, d.0)
}

#[inline]
fn left_of(d: (i64, i64)) -> (i64, i64) {
    (d.1, -d.0)
}

/// Walks the boundary starting at the top-left corner of pixel (x, y).
///
/// The pixel must be the first set pixel in row-major order, so the walk
/// starts heading east with the pixel below-right.
fn walk(bitmap: &WorkBitmap, x: i64, y: i64) -> Option<Vec<(i64, i64)>> {
    const EAST: (i64, i64) = (1, 0);

    let start = (x, y);
    let max_steps = 4 * (bitmap.width + 1) * (bitmap.height + 1) + 4;

    let mut corners = vec![start];
    let mut point = start;
    let mut dir = EAST;

    for _ in 0..max_steps {
        point = (point.0 + dir.0, point.1 + dir.1);

        let r = right_of(dir);
        let ahead_right = pixel_at(point, (dir.0 + r.0, dir.1 + r.1));
        let ahead_left = pixel_at(point, (dir.0 - r.0, dir.1 - r.1));

        let next_dir = if !bitmap.get(ahead_right.0, ahead_right.1) {
            // Also covers the diagonal case: foreground stays 4-connected
            r
        } else if bitmap.get(ahead_left.0, ahead_left.1) {
            left_of(dir)
        } else {
            dir
        };

        if point == start && next_dir == EAST {
            return Some(corners);
        }
        if next_dir != dir {
            corners.push(point);
        }
        dir = next_dir;
    }

    None
}

/// Twice the signed shoelace area of a lattice polygon.
fn doubled_area(corners: &[(i64, i64)]) -> i64 {
    let n = corners.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = corners[i];
            let (x1, y1) = corners[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum()
}

/// Inverts every pixel enclosed by the loop (even-odd rule).
fn invert_interior(bitmap: &mut WorkBitmap, corners: &[(i64, i64)]) {
    let n = corners.len();
    for i in 0..n {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % n];
        if x0 != x1 {
            continue;
        }
        for row in y0.min(y1)..y0.max(y1) {
            bitmap.flip_row_from(x0, row);
        }
    }
}

/// Splits the bitmap into closed loops in scan order.
///
/// Every loop is reported, including speckles; filtering is up to the caller.
pub fn decompose(mask: &BinaryMask) -> Vec<RawPath> {
    let mut work = WorkBitmap::from_mask(mask);
    let mut paths = Vec::new();
    let mut cursor = 0usize;

    if work.bits.is_empty() {
        return paths;
    }

    while let Some(index) = work.next_set(cursor) {
        let x = index as i64 % work.width;
        let y = index as i64 / work.width;

        let Some(corners) = walk(&work, x, y) else {
            break;
        };

        let kind = if mask.get(x, y) {
            PathKind::Outer
        } else {
            PathKind::Hole
        };
        let area = doubled_area(&corners).unsigned_abs() / 2;

        invert_interior(&mut work, &corners);
        paths.push(RawPath {
            corners,
            area,
            kind,
        });
        cursor = index;
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        BinaryMask::from_fn(width, height, |x, y| {
            rows[y as usize].as_bytes()[x as usize] == b'#'
        })
    }

    #[test]
    fn test_single_pixel() {
        let paths = decompose(&mask_from_rows(&["#"]));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].corners, vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
        assert_eq!(paths[0].area, 1);
        assert_eq!(paths[0].kind, PathKind::Outer);
    }

    #[test]
    fn test_rectangle_has_four_corners() {
        let paths = decompose(&mask_from_rows(&[
            "......",
            ".####.",
            ".####.",
            "......",
        ]));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].corners, vec![(1, 1), (5, 1), (5, 3), (1, 3)]);
        assert_eq!(paths[0].area, 8);
    }

    #[test]
    fn test_l_shape_area() {
        let paths = decompose(&mask_from_rows(&[
            "#..",
            "#..",
            "###",
        ]));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].corners.len(), 6);
        assert_eq!(paths[0].area, 5);
    }

    #[test]
    fn test_ring_yields_outer_and_hole() {
        let paths = decompose(&mask_from_rows(&[
            "#####",
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ]));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].kind, PathKind::Outer);
        assert_eq!(paths[0].area, 25);
        assert_eq!(paths[1].kind, PathKind::Hole);
        assert_eq!(paths[1].area, 9);
    }

    #[test]
    fn test_island_inside_hole() {
        let paths = decompose(&mask_from_rows(&[
            "#######",
            "#.....#",
            "#.....#",
            "#..#..#",
            "#.....#",
            "#.....#",
            "#######",
        ]));
        let kinds: Vec<PathKind> = paths.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PathKind::Outer, PathKind::Hole, PathKind::Outer]);
        assert_eq!(paths[2].area, 1);
    }

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let paths = decompose(&mask_from_rows(&[
            "#.",
            ".#",
        ]));
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.area == 1 && p.kind == PathKind::Outer));
    }

    #[test]
    fn test_empty_bitmap() {
        assert!(decompose(&mask_from_rows(&["...", "..."])).is_empty());
    }

    #[test]
    fn test_disjoint_regions_in_scan_order() {
        let paths = decompose(&mask_from_rows(&[
            "##...",
            "##...",
            ".....",
            "...##",
        ]));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].corners[0], (0, 0));
        assert_eq!(paths[1].corners[0], (3, 3));
    }
}
