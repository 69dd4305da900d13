use geo::{BoundingRect, Coord, Geometry, Intersects, LineString, Orientation, Point, Polygon};
use geograph::Location;
use geograph::direction::orientation;

use crate::algorithm::BoundaryNodeRule;

/// Location of `p` relative to the closed ring `ring`, by counting crossings
/// of a ray running in the positive x direction.
///
/// Points on a ring segment are `Boundary`.  The ring may be oriented
/// either way.
pub fn locate_point_in_ring(p: Coord<f64>, ring: &[Coord<f64>]) -> Location {
    let mut crossings = 0usize;
    for i in 1..ring.len() {
        let p1 = ring[i];
        let p2 = ring[i - 1];

        // segment strictly to the left of the ray
        if p1.x < p.x && p2.x < p.x { continue }
        if p == p2 { return Location::Boundary }

        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= min_x && p.x <= max_x { return Location::Boundary }
            continue;
        }

        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation(p1, p2, p);
            if orient == Orientation::Collinear { return Location::Boundary }
            if p2.y < p1.y {
                orient = match orient {
                    Orientation::Clockwise => Orientation::CounterClockwise,
                    _ => Orientation::Clockwise,
                };
            }
            if orient == Orientation::CounterClockwise { crossings += 1 }
        }
    }
    if crossings % 2 == 1 { Location::Interior } else { Location::Exterior }
}

/// True if `p` lies on some segment of `line`.
pub fn is_on_line(p: Coord<f64>, line: &[Coord<f64>]) -> bool {
    line.windows(2).any(|seg| is_on_segment(p, seg[0], seg[1]))
}

fn is_on_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    let within = p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y);
    within && orientation(a, b, p) == Orientation::Collinear
}

/// Location of `p` in a polygon: `Boundary` on any ring, `Interior` inside
/// the shell and outside every hole.
pub fn locate_in_polygon(p: Coord<f64>, poly: &Polygon<f64>) -> Location {
    let shell = poly.exterior();
    if shell.0.is_empty() { return Location::Exterior }
    match locate_in_ring(p, shell) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        Location::Interior => {}
    }
    for hole in poly.interiors() {
        match locate_in_ring(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

fn locate_in_ring(p: Coord<f64>, ring: &LineString<f64>) -> Location {
    match ring.bounding_rect() {
        Some(env) if env.intersects(&p) => locate_point_in_ring(p, &ring.0),
        _ => Location::Exterior,
    }
}

/// Location of `p` in the areal parts of `geom`, with area boundaries
/// counted as inside.  Points and lines have no area.
///
/// The result is `Interior` or `Exterior`, never `Boundary`.
pub fn locate_in_area(p: Coord<f64>, geom: &Geometry<f64>) -> Location {
    let inside = match geom {
        Geometry::Polygon(poly) => in_area(p, poly),
        Geometry::MultiPolygon(mp) => mp.iter().any(|poly| in_area(p, poly)),
        Geometry::Rect(r) => r.intersects(&p),
        Geometry::Triangle(t) => in_area(p, &t.to_polygon()),
        Geometry::GeometryCollection(gc) => gc.iter().any(|g| locate_in_area(p, g) == Location::Interior),
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::Line(_)
        | Geometry::LineString(_) | Geometry::MultiLineString(_) => false,
    };
    if inside { Location::Interior } else { Location::Exterior }
}

fn in_area(p: Coord<f64>, poly: &Polygon<f64>) -> bool {
    let shell = poly.exterior();
    if shell.0.is_empty() || locate_in_ring(p, shell) == Location::Exterior { return false }
    poly.interiors().iter().all(|hole| locate_in_ring(p, hole) != Location::Interior)
}

// ---------------------------------------------------------------------------
// PointLocator
// ---------------------------------------------------------------------------

/// Computes the topological location of a point in any geometry.
///
/// Components are located independently.  The point is `Boundary` if it
/// lies on the boundary of an areal component, or if the boundary rule
/// accepts the number of lineal components ending there.  It is `Interior`
/// if it lies in the interior or boundary of any component, and `Exterior`
/// otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointLocator {
    rule: BoundaryNodeRule,
}

#[derive(Default)]
struct Tally {
    is_in:          bool,
    num_boundaries: usize,
    area_boundary:  bool,
}

impl Tally {
    fn add(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.num_boundaries += 1,
            Location::Exterior => {}
        }
    }

    fn add_area(&mut self, loc: Location) {
        match loc {
            Location::Boundary => self.area_boundary = true,
            loc => self.add(loc),
        }
    }
}

impl PointLocator {
    pub fn new(rule: BoundaryNodeRule) -> Self { Self { rule } }

    /// True if `p` is not in the exterior of `geom`.
    pub fn intersects(&self, p: Coord<f64>, geom: &Geometry<f64>) -> bool {
        self.locate(p, geom) != Location::Exterior
    }

    pub fn locate(&self, p: Coord<f64>, geom: &Geometry<f64>) -> Location {
        let mut tally = Tally::default();
        self.tally(p, geom, &mut tally);

        if tally.area_boundary || self.rule.is_in_boundary(tally.num_boundaries) {
            return Location::Boundary;
        }
        if tally.num_boundaries > 0 || tally.is_in { return Location::Interior }
        Location::Exterior
    }

    fn tally(&self, p: Coord<f64>, geom: &Geometry<f64>, tally: &mut Tally) {
        match geom {
            Geometry::Point(pt) => tally.add(locate_on_point(p, pt)),
            Geometry::MultiPoint(mp) => mp.iter().for_each(|pt| tally.add(locate_on_point(p, pt))),
            Geometry::Line(l) => tally.add(locate_on_line_string(p, &LineString::new(vec![l.start, l.end]))),
            Geometry::LineString(ls) => tally.add(locate_on_line_string(p, ls)),
            Geometry::MultiLineString(mls) => mls.iter().for_each(|ls| tally.add(locate_on_line_string(p, ls))),
            Geometry::Polygon(poly) => tally.add_area(locate_in_polygon(p, poly)),
            Geometry::MultiPolygon(mp) => mp.iter().for_each(|poly| tally.add_area(locate_in_polygon(p, poly))),
            Geometry::Rect(r) => tally.add_area(locate_in_polygon(p, &r.to_polygon())),
            Geometry::Triangle(t) => tally.add_area(locate_in_polygon(p, &t.to_polygon())),
            Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.tally(p, g, tally)),
        }
    }
}

fn locate_on_point(p: Coord<f64>, pt: &Point<f64>) -> Location {
    if pt.0 == p { Location::Interior } else { Location::Exterior }
}

fn locate_on_line_string(p: Coord<f64>, ls: &LineString<f64>) -> Location {
    let pts = &ls.0;
    match ls.bounding_rect() {
        Some(env) if env.intersects(&p) => {}
        _ => return Location::Exterior,
    }
    if !ls.is_closed() && (p == pts[0] || p == pts[pts.len() - 1]) {
        return Location::Boundary;
    }
    if is_on_line(p, pts) { Location::Interior } else { Location::Exterior }
}
