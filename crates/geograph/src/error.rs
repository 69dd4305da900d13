use geo::Coord;

/// A detected topological inconsistency.
///
/// These are raised when floating-point noding has produced a graph that
/// cannot be labelled or assembled consistently.  Callers may retry with
/// snapped or perturbed inputs.  Every variant carries the coordinate where
/// the inconsistency was found.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("found non-noded intersection at ({}, {})", .0.x, .0.y)]
    NonNodedIntersection(Coord<f64>),

    #[error("unable to assign hole to a shell at ({}, {})", .0.x, .0.y)]
    UnassignedHole(Coord<f64>),

    #[error("side location conflict at ({}, {})", .0.x, .0.y)]
    SideLocationConflict(Coord<f64>),

    #[error("no outgoing directed edge found at ({}, {})", .0.x, .0.y)]
    MissingOutgoingEdge(Coord<f64>),

    #[error("directed edge visited twice during ring-building at ({}, {})", .0.x, .0.y)]
    RingRevisit(Coord<f64>),

    #[error("found two shells in minimal edge ring at ({}, {})", .0.x, .0.y)]
    MultipleShells(Coord<f64>),
}

impl TopologyError {
    /// Where the inconsistency was detected.
    pub fn coordinate(&self) -> Coord<f64> {
        match *self {
            TopologyError::NonNodedIntersection(c)
            | TopologyError::UnassignedHole(c)
            | TopologyError::SideLocationConflict(c)
            | TopologyError::MissingOutgoingEdge(c)
            | TopologyError::RingRevisit(c)
            | TopologyError::MultipleShells(c) => c,
        }
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;
