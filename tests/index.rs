use geo::{Coord, Rect, coord};
use geoverlay::index::StrTreeBuilder;
use proptest::prelude::*;

fn point_tree(points: &[(f64, f64)]) -> geoverlay::index::StrTree<Coord<f64>> {
    let mut builder = StrTreeBuilder::new();
    for &(x, y) in points {
        let c = coord! { x: x, y: y };
        builder.insert(Rect::new(c, c), c);
    }
    builder.build()
}

fn euclidean(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 2..120)
}

proptest! {
    #[test]
    fn nearest_neighbour_matches_brute_force(points in points()) {
        let tree = point_tree(&points);
        let (a, b) = tree.nearest_neighbour(&euclidean).unwrap();
        let found = euclidean(a, b);

        let coords: Vec<Coord<f64>> = points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        let mut best = f64::INFINITY;
        for i in 0..coords.len() {
            for j in i + 1..coords.len() {
                best = best.min(euclidean(&coords[i], &coords[j]));
            }
        }
        prop_assert!((found - best).abs() < 1e-9, "found {found}, expected {best}");
    }

    #[test]
    fn query_matches_brute_force(
        points in points(),
        (x, y, w, h) in (-100.0..100.0f64, -100.0..100.0f64, 0.0..80.0f64, 0.0..80.0f64),
    ) {
        let tree = point_tree(&points);
        let window = Rect::new(coord! { x: x, y: y }, coord! { x: x + w, y: y + h });

        let mut found: Vec<(f64, f64)> = tree.query(&window).map(|c| (c.x, c.y)).collect();
        let mut expected: Vec<(f64, f64)> = points.iter().copied()
            .filter(|&(px, py)| px >= x && px <= x + w && py >= y && py <= y + h)
            .collect();
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn items_tree_keeps_every_item(points in points()) {
        let tree = point_tree(&points);
        prop_assert_eq!(tree.items_tree().len(), points.len());
    }
}
