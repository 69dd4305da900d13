use geo::{Area, Geometry, GeometryCollection, MultiPolygon, Polygon, Rect, coord, point};
use geoverlay::union::{CascadedPolygonUnion, ClassicUnion, OverlapUnion, UnaryUnionOp, unary_union_all};
use geoverlay::unary_union;

fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
    Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size }).to_polygon()
}

fn part_count(g: &Geometry<f64>) -> usize {
    match g {
        Geometry::Polygon(_) => 1,
        Geometry::MultiPolygon(mp) => mp.0.len(),
        _ => panic!("expected a polygonal result, got {g:?}"),
    }
}

#[test]
fn thousand_disjoint_squares() {
    let squares: Vec<Polygon<f64>> = (0..1000)
        .map(|i| square((i % 40) as f64 * 2.0, (i / 40) as f64 * 2.0, 1.0))
        .collect();
    let union = CascadedPolygonUnion::new(squares).union().unwrap();
    assert!(matches!(union, Geometry::MultiPolygon(_)));
    assert_eq!(part_count(&union), 1000);
    assert!((union.unsigned_area() - 1000.0).abs() < 1e-6);
}

#[test]
fn overlapping_grid_fills_its_extent() {
    let squares: Vec<Polygon<f64>> = (0..100)
        .map(|i| square((i % 10) as f64, (i / 10) as f64, 1.5))
        .collect();
    let union = CascadedPolygonUnion::new(squares).union().unwrap();
    let Geometry::Polygon(poly) = &union else { panic!("expected one polygon") };
    assert!(poly.interiors().is_empty());
    assert!((union.unsigned_area() - 10.5 * 10.5).abs() < 1e-6);
}

#[test]
fn overlap_strategy_matches_classic_union() {
    let squares = || -> Vec<Polygon<f64>> {
        (0..60).map(|i| square((i % 12) as f64 * 1.5, (i / 12) as f64 * 4.0, 2.0)).collect()
    };
    let classic = CascadedPolygonUnion::new(squares()).union().unwrap();
    let overlap = CascadedPolygonUnion::new(squares())
        .with_strategy(OverlapUnion::new(ClassicUnion))
        .union()
        .unwrap();
    assert_eq!(part_count(&overlap), part_count(&classic));
    assert!((overlap.unsigned_area() - classic.unsigned_area()).abs() < 1e-6);
}

#[test]
fn union_is_idempotent() {
    let squares: Vec<Geometry<f64>> = (0..12)
        .map(|i| square((i % 4) as f64 * 1.5, (i / 4) as f64 * 3.0, 2.0).into())
        .collect();
    let once = unary_union_all(&squares).unwrap();
    let twice = unary_union(&once).unwrap();
    assert_eq!(part_count(&once), part_count(&twice));
    assert!((once.unsigned_area() - twice.unsigned_area()).abs() < 1e-9);
}

#[test]
fn square_with_hole_stays_holed() {
    // a frame of four bars around an empty centre
    let bars: Vec<Geometry<f64>> = vec![
        square(0.0, 0.0, 1.0),
        Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 1.0 }).to_polygon(),
        Rect::new(coord! { x: 3.0, y: 0.0 }, coord! { x: 4.0, y: 4.0 }).to_polygon(),
        Rect::new(coord! { x: 0.0, y: 3.0 }, coord! { x: 4.0, y: 4.0 }).to_polygon(),
        Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 4.0 }).to_polygon(),
    ].into_iter().map(Geometry::Polygon).collect();
    let union = unary_union_all(&bars).unwrap();
    let Geometry::Polygon(frame) = &union else { panic!("expected one polygon") };
    assert_eq!(frame.interiors().len(), 1);
    assert!((union.unsigned_area() - 12.0).abs() < 1e-9);
}

#[test]
fn mixed_dimensions() {
    let geoms: Vec<Geometry<f64>> = vec![
        Geometry::MultiPolygon(MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)])),
        point!(x: 1.0, y: 1.0).into(),
        point!(x: 10.0, y: 10.0).into(),
    ];
    let union = UnaryUnionOp::new(&geoms).union().unwrap();
    let Geometry::GeometryCollection(gc) = &union else { panic!("expected a collection") };
    assert_eq!(gc.len(), 2);
    assert_eq!(gc.0[0], point!(x: 10.0, y: 10.0).into());
    assert!((union.unsigned_area() - 7.0).abs() < 1e-9);
}

#[test]
fn empty_collection() {
    let empty = Geometry::GeometryCollection(GeometryCollection::default());
    assert_eq!(unary_union(&empty).unwrap(), empty);
}
