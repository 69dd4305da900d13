use geo::Coord;

/// Twice the signed area of a closed ring; positive for counter-clockwise
/// rings.
///
/// Coordinates are taken relative to the first vertex to limit rounding.
pub fn signed_area2(ring: &[Coord<f64>]) -> f64 {
    let Some(&origin) = ring.first() else { return 0.0 };
    ring.windows(2)
        .map(|w| {
            let (a, b) = (w[0] - origin, w[1] - origin);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// True if the closed ring is oriented counter-clockwise.  Degenerate rings
/// with no area are not.
pub fn is_ccw(ring: &[Coord<f64>]) -> bool {
    signed_area2(ring) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn square(ccw: bool) -> Vec<Coord<f64>> {
        let mut pts = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 1.0 },
            coord! { x: 0.0, y: 0.0 },
        ];
        if !ccw { pts.reverse() }
        pts
    }

    #[test]
    fn orientation_of_squares() {
        assert!(is_ccw(&square(true)));
        assert!(!is_ccw(&square(false)));
        assert_eq!(signed_area2(&square(true)), 2.0);
    }
}
