use geo::{Area, Coord, Geometry, HasDimensions, LineString, MultiPoint, Polygon, Rect, coord, point, polygon};
use geoverlay::{OpCode, overlay, overlay_snap_if_needed};

fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
    Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size }).to_polygon().into()
}

fn area(g: &Geometry<f64>) -> f64 { g.unsigned_area() }

#[test]
fn overlapping_squares_all_operations() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);

    let cases = [
        (OpCode::Intersection, 25.0),
        (OpCode::Union, 175.0),
        (OpCode::Difference, 75.0),
        (OpCode::SymDifference, 150.0),
    ];
    for (op, expected) in cases {
        let result = overlay(&a, &b, op).unwrap();
        assert!((area(&result) - expected).abs() < 1e-9, "{op}: area {}", area(&result));
    }

    let Geometry::Polygon(inter) = overlay(&a, &b, OpCode::Intersection).unwrap() else {
        panic!("intersection should be a single polygon");
    };
    assert_eq!(inter.exterior().0.len(), 5);
    assert!(inter.interiors().is_empty());
}

fn coords(pts: &[(f64, f64)]) -> Vec<Coord<f64>> {
    pts.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()
}

#[test]
fn overlapping_squares_exact_rings() {
    let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)].into();
    let b: Geometry<f64> = polygon![(x: 5.0, y: 5.0), (x: 15.0, y: 5.0), (x: 15.0, y: 15.0), (x: 5.0, y: 15.0)].into();

    // rings start at the first result edge in graph order
    let Geometry::Polygon(inter) = overlay(&a, &b, OpCode::Intersection).unwrap() else {
        panic!("intersection should be a single polygon");
    };
    assert_eq!(inter.exterior().0, coords(&[(5.0, 10.0), (10.0, 10.0), (10.0, 5.0), (5.0, 5.0), (5.0, 10.0)]));

    let Geometry::Polygon(union) = overlay(&a, &b, OpCode::Union).unwrap() else {
        panic!("union should be a single polygon");
    };
    assert!(union.interiors().is_empty());
    assert_eq!(union.exterior().0, coords(&[
        (10.0, 5.0), (10.0, 0.0), (0.0, 0.0), (0.0, 10.0), (5.0, 10.0),
        (5.0, 15.0), (15.0, 15.0), (15.0, 5.0), (10.0, 5.0),
    ]));

    let lower_l = coords(&[(10.0, 5.0), (10.0, 0.0), (0.0, 0.0), (0.0, 10.0), (5.0, 10.0), (5.0, 5.0), (10.0, 5.0)]);
    let upper_l = coords(&[(10.0, 5.0), (10.0, 10.0), (5.0, 10.0), (5.0, 15.0), (15.0, 15.0), (15.0, 5.0), (10.0, 5.0)]);

    let Geometry::Polygon(diff) = overlay(&a, &b, OpCode::Difference).unwrap() else {
        panic!("difference should be a single polygon");
    };
    assert!(diff.interiors().is_empty());
    assert_eq!(diff.exterior().0, lower_l);

    let Geometry::MultiPolygon(sym) = overlay(&a, &b, OpCode::SymDifference).unwrap() else {
        panic!("symmetric difference should be a multipolygon");
    };
    assert_eq!(sym.0.len(), 2);
    assert!(sym.iter().all(|p| p.interiors().is_empty()));
    assert_eq!(sym.0[0].exterior().0, lower_l);
    assert_eq!(sym.0[1].exterior().0, upper_l);
}

#[test]
fn operations_are_symmetric_where_expected() {
    let a = square(0.0, 0.0, 3.0);
    let b: Geometry<f64> = polygon![(x: 1.0, y: -1.0), (x: 5.0, y: 1.0), (x: 2.0, y: 4.0)].into();
    for op in [OpCode::Intersection, OpCode::Union, OpCode::SymDifference] {
        let ab = overlay(&a, &b, op).unwrap();
        let ba = overlay(&b, &a, op).unwrap();
        assert!((area(&ab) - area(&ba)).abs() < 1e-9, "{op}");
    }
    // A - B and B - A partition the symmetric difference
    let diff = area(&overlay(&a, &b, OpCode::Difference).unwrap()) + area(&overlay(&b, &a, OpCode::Difference).unwrap());
    assert!((diff - area(&overlay(&a, &b, OpCode::SymDifference).unwrap())).abs() < 1e-9);
}

#[test]
fn disjoint_inputs_give_typed_empty_results() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(5.0, 5.0, 1.0);
    let inter = overlay(&a, &b, OpCode::Intersection).unwrap();
    assert!(inter.is_empty());
    assert!(matches!(inter, Geometry::Polygon(_)));

    let p: Geometry<f64> = point!(x: 9.0, y: 9.0).into();
    let inter = overlay(&a, &p, OpCode::Intersection).unwrap();
    assert_eq!(inter, Geometry::MultiPoint(MultiPoint::new(vec![])));

    let inside: Geometry<f64> = point!(x: 0.5, y: 0.5).into();
    let diff = overlay(&inside, &a, OpCode::Difference).unwrap();
    assert_eq!(diff, Geometry::MultiPoint(MultiPoint::new(vec![])));
}

#[test]
fn self_overlay_cancels() {
    let a = square(0.0, 0.0, 2.0);
    let sym = overlay(&a, &a, OpCode::SymDifference).unwrap();
    assert!(sym.is_empty());
    let diff = overlay(&a, &a, OpCode::Difference).unwrap();
    assert_eq!(diff, Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])));
}

#[test]
fn duplicate_edges_fold() {
    let a = square(0.0, 0.0, 2.0);
    let Geometry::Polygon(union) = overlay(&a, &a, OpCode::Union).unwrap() else {
        panic!("expected one polygon");
    };
    assert_eq!(union.exterior().0.len(), 5);
    assert_eq!(union.unsigned_area(), 4.0);
}

#[test]
fn holes_are_assigned_deterministically() {
    let frame: Geometry<f64> = polygon!(
        exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
        interiors: [[(x: 2.0, y: 2.0), (x: 8.0, y: 2.0), (x: 8.0, y: 8.0), (x: 2.0, y: 8.0)]]
    ).into();
    let island = square(4.0, 4.0, 2.0);

    let first = overlay(&frame, &island, OpCode::Union).unwrap();
    for _ in 0..3 {
        assert_eq!(overlay(&frame, &island, OpCode::Union).unwrap(), first);
    }
    let Geometry::MultiPolygon(parts) = &first else { panic!("expected two polygons") };
    assert_eq!(parts.0.len(), 2);
    assert_eq!(parts.iter().map(|p| p.interiors().len()).sum::<usize>(), 1);
    assert_eq!(first.unsigned_area(), 100.0 - 36.0 + 4.0);
}

#[test]
fn lines_are_clipped_and_points_kept() {
    let a = square(0.0, 0.0, 4.0);
    let line: Geometry<f64> = LineString::from(vec![(-2.0, 1.0), (6.0, 1.0)]).into();
    let Geometry::LineString(clipped) = overlay(&line, &a, OpCode::Intersection).unwrap() else {
        panic!("expected one line");
    };
    assert_eq!(clipped.0, vec![coord! { x: 0.0, y: 1.0 }, coord! { x: 4.0, y: 1.0 }]);

    let outside = overlay(&line, &a, OpCode::Difference).unwrap();
    assert!(matches!(outside, Geometry::MultiLineString(mls) if mls.0.len() == 2));
}

#[test]
fn snapping_is_transparent_for_clean_inputs() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    for op in [OpCode::Intersection, OpCode::Union] {
        assert_eq!(overlay_snap_if_needed(&a, &b, op).unwrap(), overlay(&a, &b, op).unwrap());
    }
}
