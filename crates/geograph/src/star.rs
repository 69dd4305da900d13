//! Labelling of the edge ends around a single node.
//!
//! The functions here operate on the labels of a node's edge ends, given in
//! counter-clockwise order.  They are shared by the overlay graph (one label
//! per directed edge) and the relate graph (one label per bundle of
//! coincident edge ends).

use geo::Coord;

use crate::error::{Result, TopologyError};
use crate::label::Label;
use crate::location::{Location, Position};

/// Completes the labels of a node's edge ends.
///
/// For each geometry, area side locations are propagated around the star;
/// positions still unset are then filled with `Exterior` if the star
/// contains a collapsed boundary edge for that geometry, and with the
/// location of the node in that geometry's area otherwise.  `locate` is
/// called at most once per geometry.
///
/// Returns the node label derived from the `On` locations of the edges as
/// they were before labelling: a geometry whose boundary or interior passes
/// through the node marks the node `Interior`.
pub fn compute_labelling(
    labels: &mut [Label],
    at:     Coord<f64>,
    mut locate: impl FnMut(usize) -> Location,
) -> Result<Label> {
    let mut node_label = Label::line_all(None);
    for label in labels.iter() {
        for i in 0..2 {
            if matches!(label.location(i), Some(Location::Interior | Location::Boundary)) {
                node_label.set_location(i, Some(Location::Interior));
            }
        }
    }

    propagate_side_labels(labels, 0, at)?;
    propagate_side_labels(labels, 1, at)?;

    let mut collapsed = [false; 2];
    for label in labels.iter() {
        for i in 0..2 {
            if label.is_line(i) && label.location(i) == Some(Location::Boundary) {
                collapsed[i] = true;
            }
        }
    }

    let mut located: [Option<Location>; 2] = [None; 2];
    for label in labels.iter_mut() {
        for i in 0..2 {
            if !label.is_any_null(i) { continue }
            let loc = if collapsed[i] {
                Location::Exterior
            } else {
                *located[i].get_or_insert_with(|| locate(i))
            };
            label.set_all_locations_if_null(i, Some(loc));
        }
    }
    Ok(node_label)
}

/// Propagates area side locations of geometry `geom_index` around the star.
///
/// Walking counter-clockwise, the location on the right of each area edge
/// end must match the location left of the previous one.  Edge ends with no
/// side locations inherit the current location on every position.
pub fn propagate_side_labels(labels: &mut [Label], geom_index: usize, at: Coord<f64>) -> Result<()> {
    let start = labels.iter()
        .filter(|l| l.is_area_at(geom_index))
        .filter_map(|l| l.location_at(geom_index, Position::Left))
        .last();
    let Some(mut current) = start else { return Ok(()) };

    for label in labels.iter_mut() {
        if label.location(geom_index).is_none() {
            label.set_location(geom_index, Some(current));
        }
        if !label.is_area_at(geom_index) { continue }

        let left = label.location_at(geom_index, Position::Left);
        match label.location_at(geom_index, Position::Right) {
            Some(right) => {
                if right != current {
                    return Err(TopologyError::SideLocationConflict(at));
                }
                // a single unset side cannot be resolved
                current = left.ok_or(TopologyError::SideLocationConflict(at))?;
            }
            None => {
                if left.is_some() {
                    return Err(TopologyError::SideLocationConflict(at));
                }
                label.set_location_at(geom_index, Position::Right, Some(current));
                label.set_location_at(geom_index, Position::Left, Some(current));
            }
        }
    }
    Ok(())
}

/// Fills positions still unset in each edge-end label from the node label.
pub fn update_labelling(labels: &mut [Label], node_label: &Label) {
    for label in labels.iter_mut() {
        label.set_all_locations_if_null(0, node_label.location(0));
        label.set_all_locations_if_null(1, node_label.location(1));
    }
}
