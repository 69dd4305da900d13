use std::cmp::Ordering;

use geo::Coord;

/// A coordinate ordered by x, then y.
///
/// Used as the key of ordered maps so that graph iteration follows a
/// deterministic coordinate order.  Comparisons use `f64::total_cmp`.
#[derive(Clone, Copy, Debug)]
pub struct CoordKey(pub Coord<f64>);

impl CoordKey {
    #[inline] pub fn coord(&self) -> Coord<f64> { self.0 }
}

impl From<Coord<f64>> for CoordKey {
    fn from(c: Coord<f64>) -> Self { CoordKey(c) }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_coords(self.0, other.0)
    }
}

/// Lexicographic (x, then y) comparison of two coordinates.
///
/// Negative and positive zero compare equal.
pub fn compare_coords(a: Coord<f64>, b: Coord<f64>) -> Ordering {
    let (ax, ay) = (a.x + 0.0, a.y + 0.0);
    let (bx, by) = (b.x + 0.0, b.y + 0.0);
    ax.total_cmp(&bx).then_with(|| ay.total_cmp(&by))
}

/// Bit pattern of a coordinate suitable for hashing, with `-0.0` folded
/// onto `0.0`.
#[inline]
pub fn coord_bits(c: Coord<f64>) -> (u64, u64) {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn orders_by_x_then_y() {
        let mut keys = vec![
            CoordKey(coord! { x: 1.0, y: 0.0 }),
            CoordKey(coord! { x: 0.0, y: 2.0 }),
            CoordKey(coord! { x: 0.0, y: 1.0 }),
        ];
        keys.sort();
        let xs: Vec<_> = keys.iter().map(|k| (k.0.x, k.0.y)).collect();
        assert_eq!(xs, vec![(0.0, 1.0), (0.0, 2.0), (1.0, 0.0)]);
    }

    #[test]
    fn signed_zeros_are_equal() {
        let a = coord! { x: -0.0, y: 0.0 };
        let b = coord! { x: 0.0, y: -0.0 };
        assert_eq!(CoordKey(a), CoordKey(b));
        assert_eq!(coord_bits(a), coord_bits(b));
    }
}
