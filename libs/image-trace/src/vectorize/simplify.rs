//! Loop smoothing and simplification.

use glam::DVec2;

/// Replaces a lattice loop by the midpoints of its unit steps.
///
/// Pixel staircases along a straight diagonal become collinear points,
/// while square corners are only cut by half a pixel.
pub fn smooth_staircase(corners: &[(i64, i64)]) -> Vec<DVec2> {
    let n = corners.len();
    let mut points = Vec::new();

    for i in 0..n {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % n];
        let steps = (x1 - x0).abs().max((y1 - y0).abs());
        if steps == 0 {
            continue;
        }
        let step = DVec2::new((x1 - x0) as f64, (y1 - y0) as f64) / steps as f64;
        let origin = DVec2::new(x0 as f64, y0 as f64);
        for k in 0..steps {
            points.push(origin + step * (k as f64 + 0.5));
        }
    }

    points
}

/// Distance from `p` to the segment `a`–`b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Douglas–Peucker on an open polyline; endpoints are always kept.
fn douglas_peucker_open(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (mut worst, mut worst_dist) = (start, 0.0);
        for i in start + 1..end {
            let d = segment_distance(points[i], points[start], points[end]);
            if d > worst_dist {
                worst = i;
                worst_dist = d;
            }
        }
        if worst_dist > tolerance {
            keep[worst] = true;
            stack.push((start, worst));
            stack.push((worst, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Douglas–Peucker on a closed loop.
///
/// The loop is split at its first point and the point farthest from it,
/// and each half is simplified as an open polyline.
pub fn douglas_peucker_closed(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
    if points.len() < 4 {
        return points.to_vec();
    }

    let anchor = points[0];
    let far = points
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| anchor.distance_squared(**a).total_cmp(&anchor.distance_squared(**b)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    if far == 0 {
        return points.to_vec();
    }

    let first = douglas_peucker_open(&points[..=far], tolerance);
    let mut second_half: Vec<DVec2> = points[far..].to_vec();
    second_half.push(anchor);
    let second = douglas_peucker_open(&second_half, tolerance);

    // Drop the duplicated split points: `far` ends `first`, `anchor` ends `second`
    let mut result = first;
    result.extend_from_slice(&second[1..second.len() - 1]);
    result
}
