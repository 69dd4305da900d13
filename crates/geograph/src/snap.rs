use geo::Coord;

/// Snap the vertices and segments of a coordinate sequence to a set of
/// target points, repairing floating-point artefacts that make noding fail.
///
/// Vertices within `tolerance` of a target move onto it; then each target
/// within `tolerance` of a segment (and not already a vertex of it) is
/// inserted into the nearest such segment.  `closed` sequences keep their
/// first and last points equal.
///
/// `targets` should be free of duplicates.  A closing duplicate of the first
/// target is ignored.
pub fn snap_line(coords: &[Coord<f64>], targets: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let closed = coords.len() > 1 && coords[0] == coords[coords.len() - 1];
    let mut out = coords.to_vec();
    snap_vertices(&mut out, targets, tolerance, closed);
    snap_segments(&mut out, targets, tolerance);
    out
}

/// Move every vertex within `tolerance` of a target onto the first such
/// target.  A vertex that already equals a target stays where it is.
pub fn snap_vertices(coords: &mut [Coord<f64>], targets: &[Coord<f64>], tolerance: f64, closed: bool) {
    let n = coords.len();
    let end = if closed { n.saturating_sub(1) } else { n };
    for i in 0..end {
        let Some(snap) = find_snap_for_vertex(coords[i], targets, tolerance) else { continue };
        coords[i] = snap;
        if i == 0 && closed { coords[n - 1] = snap }
    }
}

fn find_snap_for_vertex(pt: Coord<f64>, targets: &[Coord<f64>], tolerance: f64) -> Option<Coord<f64>> {
    for &t in targets {
        if pt == t { return None }
        if distance(pt, t) < tolerance { return Some(t) }
    }
    None
}

/// Insert each target into the nearest segment lying within `tolerance`.
pub fn snap_segments(coords: &mut Vec<Coord<f64>>, targets: &[Coord<f64>], tolerance: f64) {
    if targets.is_empty() { return }
    let distinct = if targets.len() > 1 && targets[0] == targets[targets.len() - 1] {
        targets.len() - 1
    } else {
        targets.len()
    };

    for &t in &targets[..distinct] {
        let Some(i) = find_segment_to_snap(t, coords, tolerance) else { continue };
        // never create repeated points
        if coords[i] == t || coords[i + 1] == t { continue }
        coords.insert(i + 1, t);
    }
}

fn find_segment_to_snap(pt: Coord<f64>, coords: &[Coord<f64>], tolerance: f64) -> Option<usize> {
    let mut best = None;
    let mut min_dist = f64::MAX;
    for (i, seg) in coords.windows(2).enumerate() {
        // a target that is already a vertex must not be snapped again
        if seg[0] == pt || seg[1] == pt { return None }
        let d = segment_distance(pt, seg[0], seg[1]);
        if d < tolerance && d < min_dist {
            min_dist = d;
            best = Some(i);
        }
    }
    best
}

#[inline]
fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Distance from `p` to the segment `a -> b`.
pub fn segment_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    if a == b { return distance(p, a) }
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let r = ((p.x - a.x) * dx + (p.y - a.y) * dy) / (dx * dx + dy * dy);
    if r <= 0.0 { return distance(p, a) }
    if r >= 1.0 { return distance(p, b) }
    let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / (dx * dx + dy * dy);
    s.abs() * (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn snaps_nearby_vertices() {
        let line = [coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }];
        let targets = [coord! { x: 10.0, y: 1e-10 }];
        let out = snap_line(&line, &targets, 1e-6);
        assert_eq!(out, vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 1e-10 }]);
    }

    #[test]
    fn closed_rings_stay_closed() {
        let ring = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 0.0 },
            coord! { x: 4.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
        ];
        let targets = [coord! { x: 1e-9, y: -1e-9 }];
        let out = snap_line(&ring, &targets, 1e-6);
        assert_eq!(out[0], targets[0]);
        assert_eq!(out[3], targets[0]);
    }

    #[test]
    fn inserts_targets_into_segments() {
        let line = [coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }];
        let targets = [coord! { x: 5.0, y: 1e-9 }];
        let out = snap_line(&line, &targets, 1e-6);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], targets[0]);
    }

    #[test]
    fn segment_distance_clamps_to_end_points() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 2.0, y: 0.0 };
        assert_eq!(segment_distance(coord! { x: 1.0, y: 3.0 }, a, b), 3.0);
        assert_eq!(segment_distance(coord! { x: 5.0, y: 4.0 }, a, b), 5.0);
    }
}
