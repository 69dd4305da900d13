use geo::{Coord, coord};
use geograph::{DirEdgeId, Edge, Label, Location, PlanarGraph, Position};

use Location::*;

/// A minimal two-triangle planar graph shared by several tests.
///
/// ```
///   c
///  / \
/// a---b
///  \ /
///   d
/// ```
/// Geometry 0 is the upper triangle (a, c, b), geometry 1 the lower triangle
/// (a, b, d).  Both are clockwise shells, so their interiors lie to the right
/// of their edges.  The shared edge a-b has already been folded.
fn two_triangles() -> (PlanarGraph, [Coord<f64>; 4]) {
    let a = coord! { x: 0.0, y: 0.0 };
    let b = coord! { x: 2.0, y: 0.0 };
    let c = coord! { x: 1.0, y: 2.0 };
    let d = coord! { x: 1.0, y: -2.0 };

    let upper = Label::area(0, Boundary, Exterior, Interior);
    let lower = Label::area(1, Boundary, Exterior, Interior);

    let mut graph = PlanarGraph::new();
    graph.add_edges([
        Edge::new(vec![a, b], lower.merged(&upper.flipped())),
        Edge::new(vec![a, c], upper),
        Edge::new(vec![c, b], upper),
        Edge::new(vec![b, d], lower),
        Edge::new(vec![d, a], lower),
    ]);
    (graph, [a, b, c, d])
}

fn find(graph: &PlanarGraph, from: Coord<f64>, to: Coord<f64>) -> DirEdgeId {
    graph.dir_edge_ids()
        .find(|&de| graph.dir_edge(de).p0 == from && graph.node(graph.dest(de)).coord == to)
        .unwrap()
}

#[test]
fn counts_are_correct() {
    let (graph, _) = two_triangles();
    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.num_edges(), 5);
    assert_eq!(graph.num_dir_edges(), 10);
}

#[test]
fn stars_are_sorted_counter_clockwise() {
    let (graph, [a, b, c, d]) = two_triangles();
    let na = graph.nodes.find(a).unwrap();
    assert_eq!(graph.node(na).star, vec![find(&graph, a, b), find(&graph, a, c), find(&graph, a, d)]);

    let nb = graph.nodes.find(b).unwrap();
    assert_eq!(graph.node(nb).star, vec![find(&graph, b, c), find(&graph, b, a), find(&graph, b, d)]);
}

#[test]
fn labelling_completes_every_position() {
    let (mut graph, [a, _, c, _]) = two_triangles();
    let mut located = Vec::new();
    graph.compute_labelling(|p, i| { located.push((p, i)); Exterior }).unwrap();

    // only the apexes need point location, each for the other geometry
    assert_eq!(located.len(), 2);
    assert!(located.contains(&(c, 1)));

    for de in graph.dir_edge_ids() {
        let label = graph.dir_edge(de).label;
        for i in 0..2 {
            assert!(!label.is_any_null(i), "{} has unset positions", label);
        }
    }

    let ac = graph.dir_edge(find(&graph, a, c)).label;
    assert_eq!(ac.location_at(1, Position::Left), Some(Exterior));
    assert_eq!(ac.location_at(1, Position::Right), Some(Exterior));

    let na = graph.nodes.find(a).unwrap();
    assert_eq!(graph.node(na).label.location(0), Some(Interior));
    assert_eq!(graph.node(na).label.location(1), Some(Interior));
}

#[test]
fn result_edges_link_into_a_ring() {
    let (mut graph, [a, b, c, d]) = two_triangles();
    graph.compute_labelling(|_, _| Exterior).unwrap();

    // union boundary: interior on the right, exterior on the left
    for (from, to) in [(a, c), (c, b), (b, d), (d, a)] {
        let de = find(&graph, from, to);
        graph.dir_edge_mut(de).in_result = true;
    }
    graph.link_result_directed_edges().unwrap();

    let start = find(&graph, a, c);
    let mut ring = vec![start];
    let mut de = graph.dir_edge(start).next.unwrap();
    while de != start {
        ring.push(de);
        de = graph.dir_edge(de).next.unwrap();
    }
    assert_eq!(ring, vec![find(&graph, a, c), find(&graph, c, b), find(&graph, b, d), find(&graph, d, a)]);
}

#[test]
fn covered_line_edges() {
    let (mut graph, [a, _, c, _]) = two_triangles();
    // a dangling line of geometry 1 leaving the upper apex
    let e = coord! { x: 1.0, y: 4.0 };
    graph.add_edges([Edge::new(vec![c, e], Label::line(1, Interior))]);
    graph.compute_labelling(|_, _| Exterior).unwrap();

    for de in graph.dir_edge_ids() {
        let label = graph.dir_edge(de).label;
        let inside = label.location_at(0, Position::Right) == Some(Interior)
            && label.location_at(0, Position::Left) == Some(Exterior);
        graph.dir_edge_mut(de).in_result = inside;
    }
    graph.find_covered_line_edges();

    let line = graph.edge_of(find(&graph, c, e));
    assert_eq!(line.covered, Some(false));
    assert!(graph.dir_edge(find(&graph, a, c)).in_result);
}

#[test]
fn json_dump_lists_nodes_and_edges() {
    let (graph, _) = two_triangles();
    let dump = graph.to_json();
    assert_eq!(dump["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(dump["edges"].as_array().unwrap().len(), 5);
    assert_eq!(dump["edges"][1]["label"], "A:ebi B:---");
}
